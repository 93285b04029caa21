use serde::{Deserialize, Serialize};

/// Search engine used when address-bar input is not a destination.
/// `%s` is replaced with the percent-encoded query.
pub const DEFAULT_SEARCH_TEMPLATE: &str = "https://www.google.com/search?q=%s";

/// Page opened in new tabs, served by the internal `jb://` protocol.
pub const DEFAULT_HOMEPAGE: &str = "jb://localhost/home";

/// Top-level browser settings container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct BrowserSettings {
    pub general: GeneralSettings,
    pub window: WindowSettings,
    pub developer: DeveloperSettings,
}

/// General browsing settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneralSettings {
    pub homepage: String,
    pub search_template: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            homepage: DEFAULT_HOMEPAGE.to_string(),
            search_template: DEFAULT_SEARCH_TEMPLATE.to_string(),
        }
    }
}

/// Main window geometry and behaviour.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WindowSettings {
    pub width: u32,
    pub height: u32,
    pub start_maximized: bool,
    /// Height in logical pixels of the chrome strip (tabs + address bar).
    pub chrome_height: u32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 800,
            start_maximized: true,
            chrome_height: 76,
        }
    }
}

/// Diagnostics.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DeveloperSettings {
    /// Default `tracing` filter when `RUST_LOG` is unset.
    pub log_level: String,
    pub devtools: bool,
}

impl Default for DeveloperSettings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            devtools: cfg!(debug_assertions),
        }
    }
}
