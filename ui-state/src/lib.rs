//! Boutique 控制台界面状态
//!
//! 控制台页面的交互组件：
//! - 文档就绪门控（`ready`）
//! - 目录导航与滚动监听（`nav`）
//! - 代码块复制（`clipboard`）
//! - 提示消息（`toast`）
//! - 弹窗与滚动锁定（`modal`）
//! - 明暗主题切换（`theme`, `storage`）
//! - 金额格式化（`format`）

pub mod clipboard;
pub mod format;
pub mod modal;
pub mod nav;
pub mod ready;
pub mod state;
pub mod storage;
pub mod theme;
pub mod toast;

pub use clipboard::{Clipboard, CodeBlock, CopyButton, MemoryClipboard};
pub use format::format_currency;
pub use modal::{EscapePolicy, ModalController};
pub use nav::{NavLink, NavSync, Section, Viewport};
pub use ready::ReadyGate;
pub use state::{Key, PageLayout, UiState};
pub use storage::{FileStore, MemoryStore, PreferenceStore};
pub use theme::{Theme, ThemeToggle};
pub use toast::{Toast, ToastKind, Toaster};
