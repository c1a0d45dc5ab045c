//! Copy-to-clipboard buttons for code blocks.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use common::errors::{AppError, AppResult};
use tokio::task::JoinHandle;

use crate::toast::Toaster;

/// How long the confirmed icon stays before reverting.
pub const COPY_FEEDBACK: Duration = Duration::from_secs(2);

/// Icon shown after a successful copy.
pub const CONFIRMED_ICON: &str = "bx bx-check";

/// Icon a copy button starts with.
pub const DEFAULT_COPY_ICON: &str = "bx bx-copy";

/// System clipboard.
#[async_trait]
pub trait Clipboard: Send + Sync {
    /// Writes `text`, failing if the platform rejects the write.
    async fn write_text(&self, text: &str) -> AppResult<()>;
}

/// Clipboard kept in memory.
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Mutex<Option<String>>,
    denied: bool,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard that rejects every write, like a browser without permission.
    pub fn denied() -> Self {
        Self {
            contents: Mutex::new(None),
            denied: true,
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.contents
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl Clipboard for MemoryClipboard {
    async fn write_text(&self, text: &str) -> AppResult<()> {
        if self.denied {
            return Err(AppError::Clipboard("write permission denied".to_string()));
        }
        *self
            .contents
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(text.to_string());
        Ok(())
    }
}

/// A code block as rendered, possibly with highlighting markup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeBlock {
    pub html: String,
}

impl CodeBlock {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    /// Rendered text: tags stripped, common entities decoded.
    pub fn plain_text(&self) -> String {
        let mut text = String::with_capacity(self.html.len());
        let mut in_tag = false;
        for c in self.html.chars() {
            match c {
                '<' => in_tag = true,
                '>' if in_tag => in_tag = false,
                _ if !in_tag => text.push(c),
                _ => {}
            }
        }
        decode_entities(&text)
    }
}

fn decode_entities(text: &str) -> String {
    const ENTITIES: [(&str, &str); 6] = [
        ("&lt;", "<"),
        ("&gt;", ">"),
        ("&quot;", "\""),
        ("&#39;", "'"),
        ("&nbsp;", "\u{a0}"),
        ("&amp;", "&"),
    ];

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    'outer: while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        for (entity, replacement) in ENTITIES {
            if let Some(tail) = rest.strip_prefix(entity) {
                out.push_str(replacement);
                rest = tail;
                continue 'outer;
            }
        }
        out.push('&');
        rest = &rest[1..];
    }
    out.push_str(rest);
    out
}

/// A copy button attached to one code block.
pub struct CopyButton {
    block: CodeBlock,
    original_icon: String,
    icon: Arc<Mutex<String>>,
    revert: Option<JoinHandle<()>>,
}

impl CopyButton {
    pub fn new(block: CodeBlock) -> Self {
        Self::with_icon(block, DEFAULT_COPY_ICON)
    }

    pub fn with_icon(block: CodeBlock, icon: impl Into<String>) -> Self {
        let icon = icon.into();
        Self {
            block,
            original_icon: icon.clone(),
            icon: Arc::new(Mutex::new(icon)),
            revert: None,
        }
    }

    pub fn block(&self) -> &CodeBlock {
        &self.block
    }

    /// Current icon class.
    pub fn icon(&self) -> String {
        self.icon
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Copies the block's text.
    ///
    /// On success the icon shows [`CONFIRMED_ICON`] for [`COPY_FEEDBACK`];
    /// copying again restarts the countdown. On failure the icon is left
    /// alone and an error toast is shown.
    pub async fn copy(&mut self, clipboard: &dyn Clipboard, toaster: &Toaster) -> AppResult<()> {
        let text = self.block.plain_text();
        if let Err(e) = clipboard.write_text(&text).await {
            tracing::warn!(error = %e, "clipboard write rejected");
            toaster.error("Copy failed");
            return Err(e);
        }

        self.set_icon(CONFIRMED_ICON);
        if let Some(previous) = self.revert.take() {
            previous.abort();
        }

        let icon = Arc::clone(&self.icon);
        let original = self.original_icon.clone();
        self.revert = Some(tokio::spawn(async move {
            tokio::time::sleep(COPY_FEEDBACK).await;
            *icon.lock().unwrap_or_else(|poisoned| poisoned.into_inner()) = original;
        }));
        Ok(())
    }

    fn set_icon(&self, class: &str) {
        *self
            .icon
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = class.to_string();
    }
}

impl Drop for CopyButton {
    fn drop(&mut self) {
        if let Some(revert) = self.revert.take() {
            revert.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn elapse(ms: u64) {
        tokio::time::sleep(Duration::from_millis(ms)).await;
        tokio::task::yield_now().await;
    }

    fn highlighted() -> CodeBlock {
        CodeBlock::new(
            r#"<span class="kw">pip</span> install -r requirements.txt &amp;&amp; python db_init.py"#,
        )
    }

    #[test]
    fn test_plain_text_strips_markup() {
        assert_eq!(
            highlighted().plain_text(),
            "pip install -r requirements.txt && python db_init.py"
        );
        assert_eq!(CodeBlock::new("a &lt; b &unknown;").plain_text(), "a < b &unknown;");
    }

    #[tokio::test(start_paused = true)]
    async fn test_copy_confirms_then_reverts() {
        let clipboard = MemoryClipboard::new();
        let toaster = Toaster::new();
        let mut button = CopyButton::new(highlighted());

        button.copy(&clipboard, &toaster).await.unwrap();
        assert_eq!(
            clipboard.contents().as_deref(),
            Some("pip install -r requirements.txt && python db_init.py")
        );
        assert_eq!(button.icon(), CONFIRMED_ICON);

        elapse(1999).await;
        assert_eq!(button.icon(), CONFIRMED_ICON);

        elapse(2).await;
        assert_eq!(button.icon(), DEFAULT_COPY_ICON);
        assert!(toaster.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_second_copy_restarts_countdown() {
        let clipboard = MemoryClipboard::new();
        let toaster = Toaster::new();
        let mut button = CopyButton::new(highlighted());

        button.copy(&clipboard, &toaster).await.unwrap();
        elapse(1500).await;
        button.copy(&clipboard, &toaster).await.unwrap();

        elapse(1000).await;
        assert_eq!(button.icon(), CONFIRMED_ICON);

        elapse(1001).await;
        assert_eq!(button.icon(), DEFAULT_COPY_ICON);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rejected_write_shows_error_toast() {
        let clipboard = MemoryClipboard::denied();
        let toaster = Toaster::new();
        let mut button = CopyButton::new(highlighted());

        let result = button.copy(&clipboard, &toaster).await;

        assert!(matches!(result, Err(AppError::Clipboard(_))));
        assert_eq!(button.icon(), DEFAULT_COPY_ICON);
        let toasts = toaster.toasts();
        assert_eq!(toasts.len(), 1);
        assert_eq!(toasts[0].message, "Copy failed");
    }
}
