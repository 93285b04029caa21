//! Browser window built on `wry` + `tao`.
//!
//! Architecture:
//! - A frameless window; the chrome webview draws its own title bar and
//!   forwards button presses over IPC.
//! - The chrome is served from the internal `jb://` scheme and sits on top.
//! - Each tab is a child webview below the chrome; only the active one is visible.
//! - IPC handlers and page callbacks never touch state. They post a
//!   [`UserEvent`] and the event loop applies it to the [`App`].

use std::borrow::Cow;
use std::rc::Rc;

use tao::event::{Event, WindowEvent};
use tao::event_loop::{ControlFlow, EventLoop, EventLoopBuilder, EventLoopProxy};
use tao::window::{Window, WindowBuilder};
use tracing::{debug, error, info, warn};
use wry::http::header::{HeaderValue, CONTENT_TYPE};
use wry::http::{Request, Response, StatusCode};
use wry::{WebView, WebViewBuilder};

use crate::app::App;
use crate::ipc::{self, ChromeMessage, SurfaceEvent, WindowCommand};
use crate::managers::tab_manager::TabManagerTrait;
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::types::errors::LaunchError;
use crate::ui::file_dialog;
use crate::ui::layout;
use crate::ui::webview_surface::WebViewFactory;

/// Scheme serving the built-in pages.
pub const INTERNAL_SCHEME: &str = "jb";
const CHROME_URL: &str = "jb://localhost/chrome";

const CHROME_HTML: &str = include_str!("../../resources/ui/chrome.html");
const HOME_HTML: &str = include_str!("../../resources/ui/home.html");

#[derive(Debug)]
pub enum UserEvent {
    Chrome(ChromeMessage),
    Surface(SurfaceEvent),
    /// A page asked for a new window; open it as a tab instead.
    OpenTab(String),
}

/// Answer a request on the internal scheme.
pub fn serve_internal(request: &Request<Vec<u8>>) -> Response<Cow<'static, [u8]>> {
    let (status, body) = match request.uri().path() {
        "/chrome" => (StatusCode::OK, CHROME_HTML),
        "/" | "/home" => (StatusCode::OK, HOME_HTML),
        other => {
            debug!(path = other, "unknown internal page");
            (StatusCode::NOT_FOUND, "Not found")
        }
    };
    let mut response = Response::new(Cow::Borrowed(body.as_bytes()));
    *response.status_mut() = status;
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("text/html; charset=utf-8"));
    response
}

fn build_chrome(
    window: &Window,
    proxy: EventLoopProxy<UserEvent>,
    chrome_height: f64,
    devtools: bool,
) -> Result<WebView, LaunchError> {
    WebViewBuilder::new()
        .with_custom_protocol(INTERNAL_SCHEME.into(), |_wv_id, request| serve_internal(&request))
        .with_url(CHROME_URL)
        .with_bounds(layout::chrome_bounds(window, chrome_height))
        .with_devtools(devtools)
        .with_ipc_handler(move |request: Request<String>| {
            if let Some(msg) = ipc::parse_chrome_message(request.body()) {
                let _ = proxy.send_event(UserEvent::Chrome(msg));
            }
        })
        .build_as_child(window)
        .map_err(|e| LaunchError::Window(e.to_string()))
}

fn sync_chrome(chrome: &WebView, app: &App<WebViewFactory>) {
    if let Err(e) = chrome.evaluate_script(&ipc::render_app(app)) {
        warn!(error = %e, "failed to update chrome");
    }
}

fn relayout(window: &Window, chrome: &WebView, app: &App<WebViewFactory>, chrome_height: f64) {
    if let Err(e) = chrome.set_bounds(layout::chrome_bounds(window, chrome_height)) {
        debug!(error = %e, "failed to resize chrome");
    }
    for tab in app.tab_manager.tabs() {
        tab.surface().set_bounds(layout::content_bounds(window, chrome_height));
    }
}

/// Carry out a window command. Returns `true` when the loop should exit.
fn execute(
    command: WindowCommand,
    window: &Window,
    chrome: &WebView,
    app: &mut App<WebViewFactory>,
) -> bool {
    match command {
        WindowCommand::Minimize => window.set_minimized(true),
        WindowCommand::MaximizeOrRestore => window.set_maximized(!window.is_maximized()),
        WindowCommand::Close => {
            app.shutdown();
            return true;
        }
        WindowCommand::ReloadChrome => {
            if let Err(e) = chrome.reload() {
                warn!(error = %e, "failed to reload chrome");
            }
        }
        WindowCommand::DragWindow => {
            if let Err(e) = window.drag_window() {
                debug!(error = %e, "drag not started");
            }
        }
        WindowCommand::OpenFileDialog => {
            if let Some(url) = file_dialog::pick_file_url() {
                if let Err(e) = app.tab_manager.navigate_active_to(&url) {
                    warn!(error = %e, %url, "cannot open picked file");
                }
                sync_chrome(chrome, app);
            }
        }
        WindowCommand::SyncChrome => sync_chrome(chrome, app),
    }
    false
}

/// Open the browser window and run the event loop. Returns only on setup failure.
pub fn run(settings_engine: SettingsEngine, launch_url: Option<String>) -> Result<(), LaunchError> {
    let settings = settings_engine.get_settings().clone();
    let chrome_height = f64::from(settings.window.chrome_height);
    let devtools = settings.developer.devtools;

    let event_loop: EventLoop<UserEvent> = EventLoopBuilder::with_user_event().build();
    let proxy = event_loop.create_proxy();

    let window = WindowBuilder::new()
        .with_title("Jayden's Browser")
        .with_decorations(false)
        .with_inner_size(tao::dpi::LogicalSize::new(
            f64::from(settings.window.width),
            f64::from(settings.window.height),
        ))
        .with_maximized(settings.window.start_maximized)
        .build(&event_loop)
        .map_err(|e| LaunchError::Window(e.to_string()))?;
    let window = Rc::new(window);

    // Child webviews on Linux need X11.
    let chrome = build_chrome(&window, proxy.clone(), chrome_height, devtools)?;

    let factory = WebViewFactory::new(Rc::clone(&window), proxy, chrome_height, devtools);
    let mut app = App::new(settings_engine, factory, launch_url);
    app.startup();
    info!("window ready");

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        let command = match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => Some(WindowCommand::Close),

            Event::WindowEvent {
                event: WindowEvent::Resized(_),
                ..
            } => {
                relayout(&window, &chrome, &app, chrome_height);
                None
            }

            Event::Opened { urls } => {
                let mut delivered = false;
                for url in &urls {
                    delivered |= app.receive_external_url(url.as_str());
                }
                delivered.then_some(WindowCommand::SyncChrome)
            }

            Event::UserEvent(UserEvent::Chrome(msg)) => ipc::handle_message(&mut app, msg),
            Event::UserEvent(UserEvent::Surface(event)) => ipc::handle_surface_event(&mut app, event),
            Event::UserEvent(UserEvent::OpenTab(url)) => match app.tab_manager.open_tab(Some(&url)) {
                Ok(_) => Some(WindowCommand::SyncChrome),
                Err(e) => {
                    error!(error = %e, %url, "failed to open tab for new window request");
                    None
                }
            },

            _ => None,
        };

        if let Some(command) = command {
            if execute(command, &window, &chrome, &mut app) {
                *control_flow = ControlFlow::Exit;
            }
        }
    })
}
