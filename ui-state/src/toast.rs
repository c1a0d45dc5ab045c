//! Toast notifications.
//!
//! Every toast owns its timer task: after [`TOAST_LIFETIME`] it starts
//! leaving, and [`TOAST_EXIT`] later it is removed. Dismissing a toast or
//! dropping the last handle to the container aborts the pending timers.

use std::sync::{Arc, Mutex, MutexGuard, Weak};
use std::time::Duration;

use chrono::{DateTime, Utc};
use common::utils::IdGenerator;
use serde::Serialize;
use tokio::task::JoinHandle;

/// Time a toast stays fully visible.
pub const TOAST_LIFETIME: Duration = Duration::from_millis(3000);

/// Length of the fade/slide-out transition before removal.
pub const TOAST_EXIT: Duration = Duration::from_millis(300);

/// Kind of toast.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastKind {
    #[default]
    Success,
    Error,
}

impl ToastKind {
    /// Icon class rendered next to the message.
    pub fn icon_class(self) -> &'static str {
        match self {
            ToastKind::Success => "bx bxs-check-circle",
            ToastKind::Error => "bx bxs-error-circle",
        }
    }
}

/// Lifecycle phase of a toast.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastPhase {
    Visible,
    Leaving,
}

/// Snapshot of a toast in the container.
#[derive(Clone, Debug, Serialize)]
pub struct Toast {
    pub id: String,
    pub message: String,
    pub kind: ToastKind,
    pub phase: ToastPhase,
    pub created_at: DateTime<Utc>,
}

struct Entry {
    toast: Toast,
    timer: JoinHandle<()>,
}

#[derive(Default)]
struct Container {
    entries: Vec<Entry>,
}

impl Container {
    fn set_phase(&mut self, id: &str, phase: ToastPhase) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.toast.id == id) {
            entry.toast.phase = phase;
        }
    }

    fn remove(&mut self, id: &str) -> Option<Entry> {
        let index = self.entries.iter().position(|e| e.toast.id == id)?;
        Some(self.entries.remove(index))
    }
}

impl Drop for Container {
    fn drop(&mut self) {
        for entry in &self.entries {
            entry.timer.abort();
        }
    }
}

/// Fixed toast container.
///
/// Cheap to clone; clones share the same container. Must be used inside a
/// tokio runtime.
#[derive(Clone, Default)]
pub struct Toaster {
    inner: Arc<Mutex<Container>>,
}

impl Toaster {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Container> {
        lock(&self.inner)
    }

    /// Shows `message` and schedules its removal. Returns the toast id.
    pub fn notify(&self, message: impl Into<String>, kind: ToastKind) -> String {
        let toast = Toast {
            id: IdGenerator::toast_id(),
            message: message.into(),
            kind,
            phase: ToastPhase::Visible,
            created_at: Utc::now(),
        };
        let id = toast.id.clone();
        tracing::debug!(id = %id, kind = ?kind, message = %toast.message, "toast shown");

        let timer = tokio::spawn(run_lifecycle(Arc::downgrade(&self.inner), id.clone()));
        self.lock().entries.push(Entry { toast, timer });
        id
    }

    pub fn success(&self, message: impl Into<String>) -> String {
        self.notify(message, ToastKind::Success)
    }

    pub fn error(&self, message: impl Into<String>) -> String {
        self.notify(message, ToastKind::Error)
    }

    /// Toasts currently in the container, oldest first.
    pub fn toasts(&self) -> Vec<Toast> {
        self.lock().entries.iter().map(|e| e.toast.clone()).collect()
    }

    pub fn get(&self, id: &str) -> Option<Toast> {
        self.lock()
            .entries
            .iter()
            .find(|e| e.toast.id == id)
            .map(|e| e.toast.clone())
    }

    pub fn len(&self) -> usize {
        self.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes a toast now and cancels its timers.
    pub fn dismiss(&self, id: &str) -> bool {
        match self.lock().remove(id) {
            Some(entry) => {
                entry.timer.abort();
                true
            }
            None => false,
        }
    }

    /// Removes every toast and cancels all timers.
    pub fn clear(&self) {
        let entries = std::mem::take(&mut self.lock().entries);
        for entry in entries {
            entry.timer.abort();
        }
    }
}

fn lock(inner: &Mutex<Container>) -> MutexGuard<'_, Container> {
    inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

async fn run_lifecycle(container: Weak<Mutex<Container>>, id: String) {
    tokio::time::sleep(TOAST_LIFETIME).await;
    match container.upgrade() {
        Some(inner) => lock(&inner).set_phase(&id, ToastPhase::Leaving),
        None => return,
    }

    tokio::time::sleep(TOAST_EXIT).await;
    if let Some(inner) = container.upgrade() {
        lock(&inner).remove(&id);
        tracing::debug!(id = %id, "toast removed");
    }
}
