//! Modal dialogs and page scroll locking.
//!
//! Open modals are kept as a stack in opening order. The page scroll lock is
//! not stored separately: scrolling is disabled exactly while the stack is
//! non-empty.

use std::collections::HashSet;

/// What the escape key closes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EscapePolicy {
    /// Every open modal.
    #[default]
    CloseAll,
    /// Only the most recently opened modal.
    CloseTopmost,
}

/// Tracks which registered modals are open.
#[derive(Clone, Debug, Default)]
pub struct ModalController {
    registered: HashSet<String>,
    stack: Vec<String>,
    policy: EscapePolicy,
}

impl ModalController {
    pub fn new(policy: EscapePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    /// Makes a modal known to the controller.
    pub fn register(&mut self, id: impl Into<String>) {
        self.registered.insert(id.into());
    }

    pub fn policy(&self) -> EscapePolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: EscapePolicy) {
        self.policy = policy;
    }

    pub fn is_open(&self, id: &str) -> bool {
        self.stack.iter().any(|open| open == id)
    }

    /// Open modals, oldest first.
    pub fn open_modals(&self) -> &[String] {
        &self.stack
    }

    /// Whether page scrolling is currently disabled.
    pub fn scroll_locked(&self) -> bool {
        !self.stack.is_empty()
    }

    /// Opens a modal. Unknown ids are ignored and return `false`.
    pub fn open(&mut self, id: &str) -> bool {
        if !self.registered.contains(id) {
            tracing::debug!(id, "open ignored: unknown modal");
            return false;
        }
        if !self.is_open(id) {
            self.stack.push(id.to_string());
        }
        true
    }

    /// Closes a modal. Unknown ids are ignored and return `false`.
    pub fn close(&mut self, id: &str) -> bool {
        if !self.registered.contains(id) {
            tracing::debug!(id, "close ignored: unknown modal");
            return false;
        }
        self.stack.retain(|open| open != id);
        true
    }

    /// Handles the escape key. Returns the ids that were closed.
    pub fn escape(&mut self) -> Vec<String> {
        match self.policy {
            EscapePolicy::CloseAll => std::mem::take(&mut self.stack),
            EscapePolicy::CloseTopmost => self.stack.pop().into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller(policy: EscapePolicy) -> ModalController {
        let mut modals = ModalController::new(policy);
        for id in ["product-modal", "order-modal", "confirm-modal"] {
            modals.register(id);
        }
        modals
    }

    #[test]
    fn test_open_then_close_restores_scrolling() {
        let mut modals = controller(EscapePolicy::CloseAll);

        assert!(modals.open("product-modal"));
        assert!(modals.is_open("product-modal"));
        assert!(modals.scroll_locked());

        assert!(modals.close("product-modal"));
        assert!(!modals.is_open("product-modal"));
        assert!(!modals.scroll_locked());
    }

    #[test]
    fn test_unknown_modal_is_noop() {
        let mut modals = controller(EscapePolicy::CloseAll);
        assert!(!modals.open("missing"));
        assert!(!modals.scroll_locked());
        assert!(!modals.close("missing"));
    }

    #[test]
    fn test_closing_one_of_two_keeps_scroll_locked() {
        let mut modals = controller(EscapePolicy::CloseAll);
        modals.open("product-modal");
        modals.open("confirm-modal");

        modals.close("confirm-modal");
        assert!(modals.scroll_locked());
        assert_eq!(modals.open_modals(), ["product-modal".to_string()]);
    }

    #[test]
    fn test_reopening_does_not_duplicate() {
        let mut modals = controller(EscapePolicy::CloseAll);
        modals.open("order-modal");
        modals.open("order-modal");
        assert_eq!(modals.open_modals().len(), 1);
        modals.close("order-modal");
        assert!(!modals.scroll_locked());
    }

    #[test]
    fn test_escape_closes_all() {
        let mut modals = controller(EscapePolicy::CloseAll);
        modals.open("product-modal");
        modals.open("confirm-modal");

        let closed = modals.escape();
        assert_eq!(closed, vec!["product-modal", "confirm-modal"]);
        assert!(!modals.scroll_locked());
    }

    #[test]
    fn test_escape_closes_topmost() {
        let mut modals = controller(EscapePolicy::CloseTopmost);
        modals.open("product-modal");
        modals.open("confirm-modal");

        assert_eq!(modals.escape(), vec!["confirm-modal"]);
        assert!(modals.is_open("product-modal"));
        assert!(modals.scroll_locked());

        assert_eq!(modals.escape(), vec!["product-modal"]);
        assert!(!modals.scroll_locked());
        assert!(modals.escape().is_empty());
    }
}
