//! Table-of-contents navigation and scroll-spy.
//!
//! Clicking a link scrolls its section to just below the fixed header.
//! Scrolling marks the link of whichever section enters the upper-middle
//! band of the viewport (root margin `-20% 0 -60% 0`).

/// Height of the fixed page header, in pixels.
pub const HEADER_OFFSET: f64 = 100.0;

/// Fraction of the viewport excluded above the scroll-spy band.
pub const SPY_TOP_MARGIN: f64 = 0.20;

/// Fraction of the viewport excluded below the scroll-spy band.
pub const SPY_BOTTOM_MARGIN: f64 = 0.60;

/// A page section, in document coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct Section {
    pub id: String,
    pub top: f64,
    pub height: f64,
}

impl Section {
    pub fn new(id: impl Into<String>, top: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            top,
            height,
        }
    }

    fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Visible window onto the document.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    /// Distance scrolled from the top of the document.
    pub scroll_y: f64,
    /// Viewport height.
    pub height: f64,
}

impl Viewport {
    pub fn new(scroll_y: f64, height: f64) -> Self {
        Self { scroll_y, height }
    }

    /// The band a section must overlap to count as "current".
    pub fn spy_band(&self) -> (f64, f64) {
        let top = self.scroll_y + self.height * SPY_TOP_MARGIN;
        let bottom = self.scroll_y + self.height * (1.0 - SPY_BOTTOM_MARGIN);
        (top, bottom)
    }

    /// Where the top of `section` appears relative to the viewport top.
    pub fn offset_of(&self, section: &Section) -> f64 {
        section.top - self.scroll_y
    }
}

/// A table-of-contents link.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavLink {
    pub href: String,
    pub active: bool,
}

impl NavLink {
    fn target_id(&self) -> &str {
        self.href.strip_prefix('#').unwrap_or(&self.href)
    }
}

/// Keeps one link active in sync with clicks and scrolling.
#[derive(Clone, Debug, Default)]
pub struct NavSync {
    links: Vec<NavLink>,
    sections: Vec<Section>,
    // None until the first observation, then the last intersection state
    intersecting: Vec<Option<bool>>,
}

impl NavSync {
    pub fn new<I, S>(hrefs: I, sections: Vec<Section>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let links = hrefs
            .into_iter()
            .map(|href| NavLink {
                href: href.into(),
                active: false,
            })
            .collect();
        let intersecting = vec![None; sections.len()];
        Self {
            links,
            sections,
            intersecting,
        }
    }

    pub fn links(&self) -> &[NavLink] {
        &self.links
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Href of the active link, if any.
    pub fn active(&self) -> Option<&str> {
        self.links
            .iter()
            .find(|l| l.active)
            .map(|l| l.href.as_str())
    }

    /// Handles a click on the first link with `href`.
    ///
    /// Scrolls `viewport` so the target section sits [`HEADER_OFFSET`] below
    /// its top and marks the link active. Returns the new scroll position, or
    /// `None` when the link or its section does not exist.
    pub fn click(&mut self, href: &str, viewport: &mut Viewport) -> Option<f64> {
        let index = self.links.iter().position(|l| l.href == href)?;
        let target_id = self.links[index].target_id();
        let section = self.sections.iter().find(|s| s.id == target_id)?;

        let target = (section.top - HEADER_OFFSET).max(0.0);
        viewport.scroll_y = target;

        for (i, link) in self.links.iter_mut().enumerate() {
            link.active = i == index;
        }
        tracing::debug!(href, scroll_y = target, "toc link clicked");
        Some(target)
    }

    /// Processes a scroll to `viewport`.
    ///
    /// Only sections whose intersection with the spy band changed are
    /// reported; each one that entered the band updates the active link, in
    /// document order, so the last one wins. Returns the active href.
    pub fn observe(&mut self, viewport: &Viewport) -> Option<&str> {
        let (band_top, band_bottom) = viewport.spy_band();

        let mut entered = Vec::new();
        for (i, section) in self.sections.iter().enumerate() {
            // touching an edge counts, as with a zero threshold
            let now = section.top <= band_bottom && section.bottom() >= band_top;
            if self.intersecting[i] != Some(now) {
                self.intersecting[i] = Some(now);
                if now {
                    entered.push(i);
                }
            }
        }

        for i in entered {
            let href = format!("#{}", self.sections[i].id);
            // A section without a link still clears the others
            for link in &mut self.links {
                link.active = link.href == href;
            }
        }
        self.active()
    }
}
