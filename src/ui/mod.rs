//! Native window layer.
//!
//! One frameless `tao` window hosts a `wry` chrome webview (tab strip, address
//! bar, window buttons) and one child content webview per tab. The chrome's
//! HTML is served from the internal `jb://` scheme.

pub mod file_dialog;
pub mod layout;
pub mod webview_app;
pub mod webview_surface;
