//! Page-level UI state.
//!
//! Owns every interactive component of a console page. Handlers take
//! `&mut UiState`, so there is no global mutable state: the document theme
//! lives in the theme toggle and the scroll lock is derived from the open
//! modals.
//!
//! Toast-producing handlers (`toggle_theme`, `notify`, `copy_code`) spawn
//! timer tasks and must be called from within a tokio runtime.

use common::errors::{AppError, AppResult};

use crate::clipboard::{Clipboard, CodeBlock, CopyButton};
use crate::modal::{EscapePolicy, ModalController};
use crate::nav::{NavSync, Section, Viewport};
use crate::ready::ReadyGate;
use crate::storage::PreferenceStore;
use crate::theme::{Theme, ThemeToggle};
use crate::toast::{ToastKind, Toaster};

/// Keys the page reacts to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Escape,
    Other(char),
}

/// Interactive elements found when the document is parsed.
#[derive(Clone, Debug, Default)]
pub struct PageLayout {
    /// `href`s of the table-of-contents links.
    pub nav_links: Vec<String>,
    /// Sections the links point at.
    pub sections: Vec<Section>,
    /// Ids of modal elements.
    pub modal_ids: Vec<String>,
    /// Code blocks carrying a copy button.
    pub code_blocks: Vec<CodeBlock>,
    /// Viewport height.
    pub viewport_height: f64,
}

/// State of one console page.
pub struct UiState {
    pub toaster: Toaster,
    pub theme: ThemeToggle,
    pub modals: ModalController,
    pub nav: NavSync,
    pub copy_buttons: Vec<CopyButton>,
    pub viewport: Viewport,
}

impl UiState {
    pub fn new(store: Box<dyn PreferenceStore>, escape: EscapePolicy) -> Self {
        Self {
            toaster: Toaster::new(),
            theme: ThemeToggle::new(store),
            modals: ModalController::new(escape),
            nav: NavSync::default(),
            copy_buttons: Vec::new(),
            viewport: Viewport::default(),
        }
    }

    /// Queues page wiring until the document is ready.
    pub fn wire(&mut self, gate: &mut ReadyGate<UiState>, layout: PageLayout) {
        gate.on_ready(self, move |ui| {
            if let Err(e) = ui.theme.load() {
                tracing::warn!(error = %e, "failed to read theme preference");
            }

            for id in &layout.modal_ids {
                ui.modals.register(id.clone());
            }
            ui.copy_buttons = layout.code_blocks.into_iter().map(CopyButton::new).collect();
            ui.viewport = Viewport::new(0.0, layout.viewport_height);
            ui.nav = NavSync::new(layout.nav_links, layout.sections);
            // initial intersection report
            ui.nav.observe(&ui.viewport);

            tracing::info!(
                links = ui.nav.links().len(),
                modals = layout.modal_ids.len(),
                copy_buttons = ui.copy_buttons.len(),
                theme = %ui.theme.theme(),
                "page wired"
            );
        });
    }

    /// Handles a key press.
    pub fn key_down(&mut self, key: Key) {
        if key == Key::Escape {
            let closed = self.modals.escape();
            if !closed.is_empty() {
                tracing::debug!(closed = ?closed, "escape closed modals");
            }
        }
    }

    pub fn open_modal(&mut self, id: &str) -> bool {
        self.modals.open(id)
    }

    pub fn close_modal(&mut self, id: &str) -> bool {
        self.modals.close(id)
    }

    /// Whether the page can currently be scrolled.
    pub fn scroll_enabled(&self) -> bool {
        !self.modals.scroll_locked()
    }

    /// Handles a click on a table-of-contents link.
    pub fn click_nav(&mut self, href: &str) -> Option<f64> {
        self.nav.click(href, &mut self.viewport)
    }

    /// Handles the page being scrolled to `scroll_y`.
    pub fn scroll_to(&mut self, scroll_y: f64) -> Option<String> {
        self.viewport.scroll_y = scroll_y.max(0.0);
        self.nav.observe(&self.viewport).map(str::to_string)
    }

    /// Handles a click on the copy button of code block `index`.
    pub async fn copy_code(&mut self, index: usize, clipboard: &dyn Clipboard) -> AppResult<()> {
        let button = self
            .copy_buttons
            .get_mut(index)
            .ok_or_else(|| AppError::Validation(format!("no code block at index {}", index)))?;
        button.copy(clipboard, &self.toaster).await
    }

    /// Handles a click on the theme toggle.
    ///
    /// # Panics
    /// Outside a tokio runtime, since the confirmation toast starts a timer.
    pub fn toggle_theme(&mut self) -> AppResult<Theme> {
        self.theme.toggle(&self.toaster)
    }

    /// Shows a toast and returns its id. Pass `ToastKind::default()` for
    /// a success toast.
    ///
    /// # Panics
    /// Outside a tokio runtime.
    pub fn notify(&self, message: impl Into<String>, kind: ToastKind) -> String {
        self.toaster.notify(message, kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::{MemoryClipboard, CONFIRMED_ICON};
    use crate::storage::MemoryStore;
    use crate::theme::THEME_STORAGE_KEY;

    fn docs_layout() -> PageLayout {
        PageLayout {
            nav_links: vec!["#overview".into(), "#install".into(), "#api".into()],
            sections: vec![
                Section::new("overview", 0.0, 700.0),
                Section::new("install", 700.0, 900.0),
                Section::new("api", 1600.0, 1200.0),
            ],
            modal_ids: vec!["product-modal".into(), "delete-modal".into()],
            code_blocks: vec![CodeBlock::new("python app.py")],
            viewport_height: 900.0,
        }
    }

    fn wired(store: MemoryStore, escape: EscapePolicy) -> UiState {
        let mut gate = ReadyGate::new();
        let mut ui = UiState::new(Box::new(store), escape);
        ui.wire(&mut gate, docs_layout());
        assert!(ui.nav.links().is_empty());
        gate.mark_ready(&mut ui);
        ui
    }

    #[tokio::test]
    async fn test_wiring_runs_on_ready() {
        let mut store = MemoryStore::new();
        store.set(THEME_STORAGE_KEY, "light").unwrap();
        let ui = wired(store, EscapePolicy::CloseAll);

        assert_eq!(ui.nav.links().len(), 3);
        assert_eq!(ui.nav.active(), Some("#overview"));
        assert_eq!(ui.copy_buttons.len(), 1);
        assert_eq!(ui.theme.theme(), Theme::Light);
        assert!(ui.scroll_enabled());
    }

    #[tokio::test]
    async fn test_install_link_scenario() {
        let mut ui = wired(MemoryStore::new(), EscapePolicy::CloseAll);

        assert_eq!(ui.click_nav("#install"), Some(600.0));
        let install = ui.nav.sections()[1].clone();
        assert_eq!(ui.viewport.offset_of(&install), 100.0);
        let active: Vec<_> = ui.nav.links().iter().filter(|l| l.active).collect();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].href, "#install");
    }

    #[tokio::test]
    async fn test_scrolling_updates_active_link() {
        let mut ui = wired(MemoryStore::new(), EscapePolicy::CloseAll);
        // band 1780..1960
        assert_eq!(ui.scroll_to(1600.0).as_deref(), Some("#api"));
    }

    #[tokio::test]
    async fn test_escape_unlocks_scroll() {
        let mut ui = wired(MemoryStore::new(), EscapePolicy::CloseAll);
        ui.open_modal("product-modal");
        ui.open_modal("delete-modal");
        assert!(!ui.scroll_enabled());

        ui.key_down(Key::Other('a'));
        assert!(!ui.scroll_enabled());

        ui.key_down(Key::Escape);
        assert!(ui.scroll_enabled());
        assert!(ui.modals.open_modals().is_empty());
    }

    #[tokio::test]
    async fn test_escape_topmost_keeps_lock_for_remaining_modal() {
        let mut ui = wired(MemoryStore::new(), EscapePolicy::CloseTopmost);
        ui.open_modal("product-modal");
        ui.open_modal("delete-modal");

        ui.key_down(Key::Escape);
        assert!(ui.modals.is_open("product-modal"));
        assert!(!ui.scroll_enabled());
    }

    #[tokio::test]
    async fn test_copy_and_toggle_through_page() {
        let mut ui = wired(MemoryStore::new(), EscapePolicy::CloseAll);
        let clipboard = MemoryClipboard::new();

        ui.copy_code(0, &clipboard).await.unwrap();
        assert_eq!(clipboard.contents().as_deref(), Some("python app.py"));
        assert_eq!(ui.copy_buttons[0].icon(), CONFIRMED_ICON);
        assert!(ui.copy_code(5, &clipboard).await.is_err());

        assert_eq!(ui.toggle_theme().unwrap(), Theme::Light);
        assert_eq!(ui.toaster.len(), 1);
    }

    #[tokio::test]
    async fn test_notify_honours_kind() {
        let ui = wired(MemoryStore::new(), EscapePolicy::CloseAll);

        let saved = ui.notify("Produit enregistré", ToastKind::default());
        let failed = ui.notify("Erreur lors de la suppression", ToastKind::Error);

        assert_eq!(ui.toaster.get(&saved).unwrap().kind, ToastKind::Success);
        let toast = ui.toaster.get(&failed).unwrap();
        assert_eq!(toast.kind, ToastKind::Error);
        assert_eq!(toast.message, "Erreur lors de la suppression");
    }
}
