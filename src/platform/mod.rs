// Platform abstraction
// Resolves where the browser keeps its configuration on Windows, macOS and Linux.
//
// Uses `cfg(target_os)` to select the implementation at compile time.

use std::path::PathBuf;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "windows")]
mod windows;

/// Returns the platform-specific configuration directory.
///
/// - **Linux**: `$XDG_CONFIG_HOME/jaydensbrowser` or `~/.config/jaydensbrowser`
/// - **macOS**: `~/Library/Application Support/JaydensBrowser`
/// - **Windows**: `%APPDATA%/JaydensBrowser`
pub fn get_config_dir() -> PathBuf {
    #[cfg(target_os = "linux")]
    {
        linux::get_config_dir()
    }
    #[cfg(target_os = "macos")]
    {
        macos::get_config_dir()
    }
    #[cfg(target_os = "windows")]
    {
        windows::get_config_dir()
    }
    #[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
    {
        PathBuf::from(".jaydensbrowser")
    }
}
