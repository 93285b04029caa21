//! `wry` content surfaces: one child webview per tab.
//!
//! Page events are not handled here. Each webview's callbacks post a
//! [`SurfaceEvent`] tagged with the tab id to the event loop, which applies it
//! to the tab manager on the loop thread.

use std::rc::Rc;

use tao::event_loop::EventLoopProxy;
use tao::window::Window;
use tracing::{debug, info};
use wry::{NewWindowResponse, PageLoadEvent, Rect, WebView, WebViewBuilder};

use crate::ipc::{self, SurfaceEvent};
use crate::surface::{ContentSurface, SurfaceFactory};
use crate::types::errors::SurfaceError;
use crate::ui::layout;
use crate::ui::webview_app::{serve_internal, UserEvent, INTERNAL_SCHEME};

const CONTENT_BRIDGE_JS: &str = include_str!("../../resources/ui/content_bridge.js");

fn command_failed(command: &'static str, e: wry::Error) -> SurfaceError {
    SurfaceError::CommandFailed {
        command,
        reason: e.to_string(),
    }
}

/// A tab's page view.
pub struct WebViewSurface {
    webview: WebView,
}

impl WebViewSurface {
    pub fn set_bounds(&self, bounds: Rect) {
        if let Err(e) = self.webview.set_bounds(bounds) {
            debug!(error = %e, "failed to resize content webview");
        }
    }
}

impl ContentSurface for WebViewSurface {
    fn load_destination(&mut self, url: &str) -> Result<(), SurfaceError> {
        self.webview.load_url(url).map_err(|e| SurfaceError::Rejected {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }

    fn set_source(&mut self, url: &str) -> Result<(), SurfaceError> {
        let literal = serde_json::to_string(url).map_err(|e| SurfaceError::Rejected {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        self.webview
            .evaluate_script(&format!("window.location.assign({})", literal))
            .map_err(|e| SurfaceError::Rejected {
                url: url.to_string(),
                reason: e.to_string(),
            })
    }

    fn current_url(&self) -> Result<String, SurfaceError> {
        self.webview
            .url()
            .map_err(|e| SurfaceError::Unreadable(e.to_string()))
    }

    fn reload(&mut self) -> Result<(), SurfaceError> {
        self.webview
            .reload()
            .map_err(|e| command_failed("reload", e))
    }

    fn go_back(&mut self) -> Result<(), SurfaceError> {
        self.webview
            .evaluate_script("history.back()")
            .map_err(|e| command_failed("go_back", e))
    }

    fn go_forward(&mut self) -> Result<(), SurfaceError> {
        self.webview
            .evaluate_script("history.forward()")
            .map_err(|e| command_failed("go_forward", e))
    }

    // The system webviews do not expose their session history.
    fn can_go_back(&self) -> Result<bool, SurfaceError> {
        Err(SurfaceError::Unsupported("can_go_back"))
    }

    fn can_go_forward(&self) -> Result<bool, SurfaceError> {
        Err(SurfaceError::Unsupported("can_go_forward"))
    }

    fn set_visible(&mut self, visible: bool) -> Result<(), SurfaceError> {
        self.webview
            .set_visible(visible)
            .map_err(|e| command_failed("set_visible", e))?;
        if visible {
            if let Err(e) = self.webview.focus() {
                debug!(error = %e, "failed to focus content webview");
            }
        }
        Ok(())
    }

    fn destroy(self) -> Result<(), SurfaceError> {
        drop(self.webview);
        Ok(())
    }
}

/// Builds content webviews as children of the main window.
pub struct WebViewFactory {
    window: Rc<Window>,
    proxy: EventLoopProxy<UserEvent>,
    chrome_height: f64,
    devtools: bool,
}

impl WebViewFactory {
    pub fn new(window: Rc<Window>, proxy: EventLoopProxy<UserEvent>, chrome_height: f64, devtools: bool) -> Self {
        Self {
            window,
            proxy,
            chrome_height,
            devtools,
        }
    }
}

impl SurfaceFactory for WebViewFactory {
    type Surface = WebViewSurface;

    fn create(&mut self, tab_id: &str, url: &str) -> Result<WebViewSurface, SurfaceError> {
        let load_proxy = self.proxy.clone();
        let title_proxy = self.proxy.clone();
        let ipc_proxy = self.proxy.clone();
        let popup_proxy = self.proxy.clone();
        let load_tab = tab_id.to_string();
        let title_tab = tab_id.to_string();
        let ipc_tab = tab_id.to_string();

        let builder = WebViewBuilder::new()
            .with_url(url)
            .with_bounds(layout::content_bounds(&self.window, self.chrome_height))
            .with_visible(false)
            .with_devtools(self.devtools)
            .with_custom_protocol(INTERNAL_SCHEME.into(), |_wv_id, request| serve_internal(&request))
            .with_initialization_script(CONTENT_BRIDGE_JS)
            .with_on_page_load_handler(move |event, url| {
                if let PageLoadEvent::Finished = event {
                    let _ = load_proxy.send_event(UserEvent::Surface(SurfaceEvent::Navigated {
                        tab_id: load_tab.clone(),
                        url,
                    }));
                    let _ = load_proxy.send_event(UserEvent::Surface(SurfaceEvent::Ready {
                        tab_id: load_tab.clone(),
                    }));
                }
            })
            .with_document_title_changed_handler(move |title| {
                let _ = title_proxy.send_event(UserEvent::Surface(SurfaceEvent::TitleChanged {
                    tab_id: title_tab.clone(),
                    title,
                }));
            })
            .with_ipc_handler(move |request: wry::http::Request<String>| {
                let page_url = request.uri().to_string();
                if let Some(url) = ipc::in_page_navigation(&page_url, request.body()) {
                    let _ = ipc_proxy.send_event(UserEvent::Surface(SurfaceEvent::Navigated {
                        tab_id: ipc_tab.clone(),
                        url,
                    }));
                }
            })
            .with_new_window_req_handler(move |url, _features| {
                if url.starts_with("http://") || url.starts_with("https://") {
                    let _ = popup_proxy.send_event(UserEvent::OpenTab(url));
                }
                NewWindowResponse::Deny
            });

        // Child webviews on Linux need X11.
        let webview = builder
            .build_as_child(self.window.as_ref())
            .map_err(|e| SurfaceError::Creation(e.to_string()))?;

        info!(tab = tab_id, %url, "content webview created");
        Ok(WebViewSurface { webview })
    }
}
