//! Document ready gate.
//!
//! Wiring registered before the document is parsed is queued and replayed
//! once, in registration order, when the document becomes ready.

use std::collections::VecDeque;

type Callback<T> = Box<dyn FnOnce(&mut T) + Send>;

/// Parse state of the document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DocumentState {
    #[default]
    Loading,
    Ready,
}

/// Defers callbacks until the document is ready.
pub struct ReadyGate<T> {
    state: DocumentState,
    pending: VecDeque<Callback<T>>,
}

impl<T> Default for ReadyGate<T> {
    fn default() -> Self {
        Self {
            state: DocumentState::Loading,
            pending: VecDeque::new(),
        }
    }
}

impl<T> ReadyGate<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DocumentState {
        self.state
    }

    pub fn is_ready(&self) -> bool {
        self.state == DocumentState::Ready
    }

    /// Number of callbacks waiting for readiness.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Runs `f` now if the document is ready, otherwise queues it.
    pub fn on_ready<F>(&mut self, ctx: &mut T, f: F)
    where
        F: FnOnce(&mut T) + Send + 'static,
    {
        match self.state {
            DocumentState::Ready => f(ctx),
            DocumentState::Loading => self.pending.push_back(Box::new(f)),
        }
    }

    /// Marks the document parsed and drains the queue.
    ///
    /// Returns the number of callbacks run. Calling it again is a no-op.
    pub fn mark_ready(&mut self, ctx: &mut T) -> usize {
        if self.is_ready() {
            return 0;
        }
        self.state = DocumentState::Ready;

        let mut ran = 0;
        while let Some(callback) = self.pending.pop_front() {
            callback(ctx);
            ran += 1;
        }
        tracing::debug!(callbacks = ran, "document ready");
        ran
    }
}
