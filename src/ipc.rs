//! Message handling between the chrome UI, the content webviews and the host.
//!
//! The chrome webview (tab strip, address bar, window buttons) posts JSON
//! messages tagged by `cmd`. Tab work is done here against [`App`]; anything
//! that needs the native window is returned as a [`WindowCommand`] for the
//! event loop to carry out. Kept free of `wry`/`tao` so it can be tested
//! without a display.

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, warn};
use url::Url;

use crate::app::App;
use crate::managers::tab_manager::TabManagerTrait;
use crate::surface::SurfaceFactory;
use crate::types::tab::{CloseOutcome, TabSnapshot};

/// Messages posted by the chrome webview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "kebab-case")]
pub enum ChromeMessage {
    UiReady,
    MinimizeWindow,
    MaximizeOrRestoreWindow,
    CloseWindow,
    ReloadWindow,
    DragWindow,
    /// Load an already-formed URL in the active tab.
    Navigate { url: String },
    /// Raw address-bar text, to be classified.
    SubmitAddress { input: String },
    OpenFileDialog,
    NewTab,
    CloseTab { id: String },
    ActivateTab { id: String },
    Back,
    Forward,
    Reload,
}

/// Messages posted by the bridge script injected into every content page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum ContentMessage {
    /// Fragment or history-API navigation that did not reload the page.
    InPageNavigation { url: String },
}

/// Events a content surface reports back, tagged with the owning tab.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceEvent {
    Navigated { tab_id: String, url: String },
    TitleChanged { tab_id: String, title: String },
    Ready { tab_id: String },
}

/// Work only the event loop can do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WindowCommand {
    Minimize,
    MaximizeOrRestore,
    Close,
    ReloadChrome,
    DragWindow,
    OpenFileDialog,
    /// Tabs or the address changed; redraw the chrome.
    SyncChrome,
}

pub fn parse_chrome_message(body: &str) -> Option<ChromeMessage> {
    serde_json::from_str(body)
        .map_err(|e| {
            let head: String = body.chars().take(200).collect();
            warn!(error = %e, body = %head, "malformed chrome message");
        })
        .ok()
}

pub fn parse_content_message(body: &str) -> Option<ContentMessage> {
    serde_json::from_str(body)
        .map_err(|e| debug!(error = %e, "ignoring content message"))
        .ok()
}

/// Whether `reported` belongs to the same origin as the page at `page`.
///
/// Tuple origins (scheme, host, port) must match. Opaque origins such as
/// `file:` only match the same scheme and path. Unparseable URLs never match.
pub fn is_same_origin(page: &str, reported: &str) -> bool {
    let (Ok(page), Ok(reported)) = (Url::parse(page), Url::parse(reported)) else {
        return false;
    };
    let (page_origin, reported_origin) = (page.origin(), reported.origin());
    if page_origin.is_tuple() || reported_origin.is_tuple() {
        return page_origin == reported_origin;
    }
    page.scheme() == reported.scheme() && page.path() == reported.path()
}

/// URL of an in-page navigation posted by the page at `page_url`.
///
/// `None` for anything that is not an in-page navigation, or one that points
/// at another origin: a page can only move the address within its own origin.
pub fn in_page_navigation(page_url: &str, body: &str) -> Option<String> {
    let ContentMessage::InPageNavigation { url } = parse_content_message(body)?;
    if !is_same_origin(page_url, &url) {
        warn!(page = page_url, reported = %url, "ignoring cross-origin in-page navigation");
        return None;
    }
    Some(url)
}

/// Apply a chrome message to the app.
pub fn handle_message<F: SurfaceFactory>(app: &mut App<F>, msg: ChromeMessage) -> Option<WindowCommand> {
    debug!(?msg, "chrome message");
    match msg {
        ChromeMessage::UiReady => {
            app.on_ui_ready();
            Some(WindowCommand::SyncChrome)
        }
        ChromeMessage::MinimizeWindow => Some(WindowCommand::Minimize),
        ChromeMessage::MaximizeOrRestoreWindow => Some(WindowCommand::MaximizeOrRestore),
        ChromeMessage::CloseWindow => Some(WindowCommand::Close),
        ChromeMessage::DragWindow => Some(WindowCommand::DragWindow),
        ChromeMessage::ReloadWindow => {
            app.pending.mark_unready();
            Some(WindowCommand::ReloadChrome)
        }
        ChromeMessage::OpenFileDialog => Some(WindowCommand::OpenFileDialog),

        ChromeMessage::Navigate { url } => {
            if !url.trim().is_empty() {
                if let Err(e) = app.tab_manager.navigate_active_to(url.trim()) {
                    debug!(error = %e, "navigate ignored");
                }
            }
            None
        }
        ChromeMessage::SubmitAddress { input } => {
            if let Err(e) = app.submit_address(&input) {
                debug!(error = %e, "address submission ignored");
            }
            None
        }

        ChromeMessage::NewTab => match app.tab_manager.open_tab(None) {
            Ok(_) => Some(WindowCommand::SyncChrome),
            Err(e) => {
                warn!(error = %e, "failed to open tab");
                None
            }
        },
        ChromeMessage::CloseTab { id } => match app.tab_manager.close(&id) {
            Ok(CloseOutcome::Activated(_)) => Some(WindowCommand::SyncChrome),
            Ok(CloseOutcome::WindowShouldClose) => Some(WindowCommand::Close),
            Err(e) => {
                warn!(error = %e, "close ignored");
                None
            }
        },
        ChromeMessage::ActivateTab { id } => match app.tab_manager.activate(&id) {
            Ok(()) => Some(WindowCommand::SyncChrome),
            Err(e) => {
                warn!(error = %e, "activate ignored");
                None
            }
        },

        ChromeMessage::Back => log_tab_result(app.tab_manager.go_back()),
        ChromeMessage::Forward => log_tab_result(app.tab_manager.go_forward()),
        ChromeMessage::Reload => log_tab_result(app.tab_manager.reload()),
    }
}

fn log_tab_result(result: Result<(), crate::types::errors::TabError>) -> Option<WindowCommand> {
    if let Err(e) = result {
        debug!(error = %e, "tab command ignored");
    }
    None
}

/// Apply a content surface event. Events for tabs closed in the meantime are dropped.
pub fn handle_surface_event<F: SurfaceFactory>(app: &mut App<F>, event: SurfaceEvent) -> Option<WindowCommand> {
    let result = match &event {
        SurfaceEvent::Navigated { tab_id, url } => app.tab_manager.on_navigation_event(tab_id, url),
        SurfaceEvent::TitleChanged { tab_id, title } => app.tab_manager.on_title_event(tab_id, title),
        SurfaceEvent::Ready { tab_id } => app.tab_manager.on_ready(tab_id),
    };
    match result {
        Ok(()) => Some(WindowCommand::SyncChrome),
        Err(e) => {
            debug!(error = %e, ?event, "stale surface event");
            None
        }
    }
}

/// Script that redraws the chrome's tab strip and address field.
pub fn chrome_render_script(tabs: &[TabSnapshot], address: &str) -> String {
    let state = json!({ "tabs": tabs, "address": address });
    format!("if(window.__jb_render)window.__jb_render({})", state)
}

/// Render script for the app's current state.
pub fn render_app<F: SurfaceFactory>(app: &App<F>) -> String {
    chrome_render_script(&app.tab_manager.snapshots(), app.tab_manager.address())
}
