use thiserror::Error;

// === SurfaceError ===

/// Failures reported by a content surface (an embedded webview).
///
/// These never escape the tab manager; they are logged and degraded to a
/// no-op or an empty string.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SurfaceError {
    /// The surface refused to load the destination.
    #[error("Surface rejected destination {url}: {reason}")]
    Rejected { url: String, reason: String },
    /// The surface could not be read (e.g. mid-navigation).
    #[error("Surface unreadable: {0}")]
    Unreadable(String),
    /// The surface does not support the requested query or command.
    #[error("Surface does not support {0}")]
    Unsupported(&'static str),
    /// The surface could not be created.
    #[error("Surface creation failed: {0}")]
    Creation(String),
    /// A command (reload, history step, visibility) was not carried out.
    #[error("Surface command {command} failed: {reason}")]
    CommandFailed { command: &'static str, reason: String },
}

// === TabError ===

/// Errors related to tab coordination.
#[derive(Debug, Error)]
pub enum TabError {
    /// Tab with the given ID was not found.
    #[error("Tab not found: {0}")]
    NotFound(String),
    /// An operation needed an active tab but none exists.
    #[error("No active tab")]
    NoActiveTab,
    /// The content surface for a new tab could not be created.
    #[error("Failed to open tab: {0}")]
    Surface(#[from] SurfaceError),
}

// === SettingsError ===

/// Errors related to settings management.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// An I/O error occurred while reading or writing settings.
    #[error("Settings I/O error: {0}")]
    IoError(String),
    /// Failed to serialize or deserialize settings.
    #[error("Settings serialization error: {0}")]
    SerializationError(String),
    /// The provided settings key is invalid.
    #[error("Invalid settings key: {0}")]
    InvalidKey(String),
    /// The provided settings value is invalid.
    #[error("Invalid settings value: {0}")]
    InvalidValue(String),
}

// === LaunchError ===

/// Errors raised while bringing the window up.
#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("Window creation failed: {0}")]
    Window(String),
}
