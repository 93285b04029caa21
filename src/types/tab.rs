use serde::{Deserialize, Serialize};

/// Title shown for a tab until its page reports one.
pub const DEFAULT_TAB_TITLE: &str = "New Tab";

/// Serializable view of a tab, pushed to the chrome webview to draw the tab strip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TabSnapshot {
    pub id: String,
    pub title: String,
    pub url: String,
    pub active: bool,
}

/// What the window should do after a tab was closed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CloseOutcome {
    /// Another tab remained and was activated.
    Activated(String),
    /// The last tab was closed; the owning window should close.
    WindowShouldClose,
}
