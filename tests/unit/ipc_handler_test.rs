//! Tests for chrome/content message parsing and dispatch against the app core.

#[path = "../common/mock_surface.rs"]
mod mock_surface;

use jaydensbrowser::app::App;
use jaydensbrowser::ipc::{
    chrome_render_script, handle_message, handle_surface_event, in_page_navigation, is_same_origin,
    parse_chrome_message, parse_content_message, render_app, ChromeMessage, ContentMessage,
    SurfaceEvent, WindowCommand,
};
use jaydensbrowser::managers::tab_manager::TabManagerTrait;
use jaydensbrowser::services::settings_engine::SettingsEngine;
use jaydensbrowser::types::settings::BrowserSettings;
use jaydensbrowser::types::tab::TabSnapshot;
use mock_surface::{Call, MockFactory, Shared};
use rstest::rstest;
use tempfile::TempDir;

/// The returned `TempDir` keeps the settings directory alive for the test.
fn app_with(launch_url: Option<&str>) -> (App<MockFactory>, Shared, TempDir) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.json").to_string_lossy().to_string();
    let engine = SettingsEngine::with_settings(path, BrowserSettings::default());
    let (factory, state) = MockFactory::new();
    let mut app = App::new(engine, factory, launch_url.map(str::to_string));
    app.startup();
    (app, state, dir)
}

fn active_calls(app: &App<MockFactory>, state: &Shared) -> Vec<Call> {
    let id = app.tab_manager.active_tab_id().unwrap().to_string();
    state.borrow().calls_for(&id)
}

// === parsing ===

#[test]
fn test_parse_signals_without_payload() {
    assert_eq!(parse_chrome_message(r#"{"cmd":"ui-ready"}"#), Some(ChromeMessage::UiReady));
    assert_eq!(
        parse_chrome_message(r#"{"cmd":"maximize-or-restore-window"}"#),
        Some(ChromeMessage::MaximizeOrRestoreWindow)
    );
    assert_eq!(
        parse_chrome_message(r#"{"cmd":"open-file-dialog"}"#),
        Some(ChromeMessage::OpenFileDialog)
    );
}

#[test]
fn test_parse_messages_with_payload() {
    assert_eq!(
        parse_chrome_message(r#"{"cmd":"submit-address","input":"hello world"}"#),
        Some(ChromeMessage::SubmitAddress {
            input: "hello world".to_string()
        })
    );
    assert_eq!(
        parse_chrome_message(r#"{"cmd":"close-tab","id":"t1"}"#),
        Some(ChromeMessage::CloseTab { id: "t1".to_string() })
    );
}

#[test]
fn test_parse_rejects_malformed_and_unknown() {
    assert_eq!(parse_chrome_message("not json"), None);
    assert_eq!(parse_chrome_message(r#"{"cmd":"launch-rockets"}"#), None);
    assert_eq!(parse_chrome_message(r#"{"cmd":"navigate"}"#), None);
}

#[test]
fn test_parse_content_message() {
    assert_eq!(
        parse_content_message(r#"{"kind":"in-page-navigation","url":"https://a.example/#top"}"#),
        Some(ContentMessage::InPageNavigation {
            url: "https://a.example/#top".to_string()
        })
    );
    assert_eq!(parse_content_message(r#"{"cmd":"close-window"}"#), None);
}

// === in-page navigation origin ===

#[rstest]
#[case("https://a.example/docs", "https://a.example/docs#intro", true)]
#[case("https://a.example/", "https://a.example/other/path?x=1", true)]
#[case("https://a.example/", "https://a.example:443/", true)]
#[case("file:///tmp/page.html", "file:///tmp/page.html#section", true)]
#[case("https://evil.example/", "https://bank.example/login", false)]
#[case("https://a.example/", "http://a.example/", false)]
#[case("https://a.example/", "https://a.example:8443/", false)]
#[case("https://a.example/", "https://sub.a.example/", false)]
#[case("file:///tmp/page.html", "file:///etc/passwd", false)]
#[case("https://a.example/", "file:///tmp/page.html", false)]
#[case("https://a.example/", "not a url", false)]
#[case("", "https://a.example/", false)]
fn test_is_same_origin(#[case] page: &str, #[case] reported: &str, #[case] expected: bool) {
    assert_eq!(is_same_origin(page, reported), expected);
}

#[test]
fn test_in_page_navigation_accepts_same_origin() {
    let body = r#"{"kind":"in-page-navigation","url":"https://a.example/app#/settings"}"#;
    assert_eq!(
        in_page_navigation("https://a.example/app", body),
        Some("https://a.example/app#/settings".to_string())
    );
}

#[test]
fn test_in_page_navigation_cannot_spoof_address() {
    let (mut app, _state, _dir) = app_with(None);
    let id = app.tab_manager.active_tab_id().unwrap().to_string();
    handle_surface_event(
        &mut app,
        SurfaceEvent::Navigated {
            tab_id: id.clone(),
            url: "https://evil.example/".to_string(),
        },
    );

    let body = r#"{"kind":"in-page-navigation","url":"https://bank.example/login"}"#;
    let reported = in_page_navigation("https://evil.example/", body);
    assert_eq!(reported, None);
    if let Some(url) = reported {
        handle_surface_event(&mut app, SurfaceEvent::Navigated { tab_id: id.clone(), url });
    }

    assert_eq!(app.tab_manager.address(), "https://evil.example/");
    assert_eq!(app.tab_manager.get_tab(&id).unwrap().url, "https://evil.example/");
}

#[test]
fn test_in_page_navigation_ignores_other_messages() {
    assert_eq!(in_page_navigation("https://a.example/", r#"{"cmd":"close-window"}"#), None);
    assert_eq!(in_page_navigation("https://a.example/", "garbage"), None);
}

// === window signals ===

#[test]
fn test_window_signals_map_to_commands() {
    let (mut app, _state, _dir) = app_with(None);
    let cases = [
        (ChromeMessage::MinimizeWindow, WindowCommand::Minimize),
        (ChromeMessage::MaximizeOrRestoreWindow, WindowCommand::MaximizeOrRestore),
        (ChromeMessage::CloseWindow, WindowCommand::Close),
        (ChromeMessage::DragWindow, WindowCommand::DragWindow),
        (ChromeMessage::OpenFileDialog, WindowCommand::OpenFileDialog),
    ];
    for (msg, expected) in cases {
        assert_eq!(handle_message(&mut app, msg), Some(expected));
    }
}

// === launch hand-off ===

#[test]
fn test_ui_ready_delivers_launch_url() {
    let (mut app, state, _dir) = app_with(Some("https://launched.example"));
    assert!(!active_calls(&app, &state).iter().any(|c| matches!(c, Call::Load(_))));

    let cmd = handle_message(&mut app, ChromeMessage::UiReady);

    assert_eq!(cmd, Some(WindowCommand::SyncChrome));
    assert_eq!(
        active_calls(&app, &state),
        vec![Call::Show, Call::Load("https://launched.example".to_string())]
    );
}

#[test]
fn test_reload_window_requeues_external_urls() {
    let (mut app, state, _dir) = app_with(None);
    handle_message(&mut app, ChromeMessage::UiReady);

    assert_eq!(
        handle_message(&mut app, ChromeMessage::ReloadWindow),
        Some(WindowCommand::ReloadChrome)
    );
    app.deliver_external("https://later.example".to_string());
    assert!(!active_calls(&app, &state).iter().any(|c| matches!(c, Call::Load(_))));

    handle_message(&mut app, ChromeMessage::UiReady);
    assert!(active_calls(&app, &state).contains(&Call::Load("https://later.example".to_string())));
}

#[test]
fn test_opened_url_waits_for_ui_ready() {
    let (mut app, state, _dir) = app_with(None);

    assert!(app.receive_external_url("jaydensbrowser://example.com/x"));
    assert!(!active_calls(&app, &state).iter().any(|c| matches!(c, Call::Load(_))));

    handle_message(&mut app, ChromeMessage::UiReady);
    assert!(active_calls(&app, &state).contains(&Call::Load("https://example.com/x".to_string())));
}

#[test]
fn test_opened_url_loads_once_ready() {
    let (mut app, state, _dir) = app_with(None);
    handle_message(&mut app, ChromeMessage::UiReady);

    assert!(app.receive_external_url("https://opened.example/"));
    assert!(active_calls(&app, &state).contains(&Call::Load("https://opened.example/".to_string())));
}

#[test]
fn test_opened_url_with_foreign_scheme_is_ignored() {
    let (mut app, state, _dir) = app_with(None);
    handle_message(&mut app, ChromeMessage::UiReady);

    assert!(!app.receive_external_url("ftp://files.example/"));
    assert_eq!(active_calls(&app, &state), vec![Call::Show]);
}

// === navigation ===

#[test]
fn test_submit_address_searches_free_text() {
    let (mut app, state, _dir) = app_with(None);

    let cmd = handle_message(
        &mut app,
        ChromeMessage::SubmitAddress {
            input: "hello world".to_string(),
        },
    );

    assert_eq!(cmd, None);
    assert!(active_calls(&app, &state).contains(&Call::Load(
        "https://www.google.com/search?q=hello%20world".to_string()
    )));
}

#[test]
fn test_submit_address_normalizes_domain() {
    let (mut app, state, _dir) = app_with(None);
    handle_message(
        &mut app,
        ChromeMessage::SubmitAddress {
            input: "example.com".to_string(),
        },
    );
    assert!(active_calls(&app, &state).contains(&Call::Load("https://example.com".to_string())));
}

#[test]
fn test_submit_blank_address_is_ignored() {
    let (mut app, state, _dir) = app_with(None);
    handle_message(&mut app, ChromeMessage::SubmitAddress { input: "  ".to_string() });
    assert_eq!(active_calls(&app, &state), vec![Call::Show]);
}

#[test]
fn test_navigate_passes_url_through() {
    let (mut app, state, _dir) = app_with(None);
    handle_message(
        &mut app,
        ChromeMessage::Navigate {
            url: "file:///tmp/a.txt".to_string(),
        },
    );
    assert!(active_calls(&app, &state).contains(&Call::Load("file:///tmp/a.txt".to_string())));
}

#[test]
fn test_history_commands_reach_active_surface() {
    let (mut app, state, _dir) = app_with(None);
    assert_eq!(handle_message(&mut app, ChromeMessage::Back), None);
    assert_eq!(handle_message(&mut app, ChromeMessage::Forward), None);
    assert_eq!(handle_message(&mut app, ChromeMessage::Reload), None);

    let calls = active_calls(&app, &state);
    assert!(calls.contains(&Call::Back));
    assert!(calls.contains(&Call::Forward));
    assert!(calls.contains(&Call::Reload));
}

// === tabs ===

#[test]
fn test_tab_messages() {
    let (mut app, _state, _dir) = app_with(None);
    let first = app.tab_manager.active_tab_id().unwrap().to_string();

    assert_eq!(handle_message(&mut app, ChromeMessage::NewTab), Some(WindowCommand::SyncChrome));
    assert_eq!(app.tab_manager.tab_count(), 2);

    assert_eq!(
        handle_message(&mut app, ChromeMessage::ActivateTab { id: first.clone() }),
        Some(WindowCommand::SyncChrome)
    );
    assert_eq!(app.tab_manager.active_tab_id(), Some(first.as_str()));

    assert_eq!(
        handle_message(&mut app, ChromeMessage::ActivateTab { id: "missing".to_string() }),
        None
    );
    assert_eq!(
        handle_message(&mut app, ChromeMessage::CloseTab { id: "missing".to_string() }),
        None
    );
}

#[test]
fn test_closing_last_tab_closes_window() {
    let (mut app, _state, _dir) = app_with(None);
    handle_message(&mut app, ChromeMessage::NewTab);
    let ids: Vec<String> = app.tab_manager.tabs().iter().map(|t| t.id.clone()).collect();

    assert_eq!(
        handle_message(&mut app, ChromeMessage::CloseTab { id: ids[1].clone() }),
        Some(WindowCommand::SyncChrome)
    );
    assert_eq!(
        handle_message(&mut app, ChromeMessage::CloseTab { id: ids[0].clone() }),
        Some(WindowCommand::Close)
    );
}

// === surface events ===

#[test]
fn test_surface_events_update_chrome() {
    let (mut app, _state, _dir) = app_with(None);
    let id = app.tab_manager.active_tab_id().unwrap().to_string();

    let cmd = handle_surface_event(
        &mut app,
        SurfaceEvent::Navigated {
            tab_id: id.clone(),
            url: "https://example.com/".to_string(),
        },
    );
    assert_eq!(cmd, Some(WindowCommand::SyncChrome));
    assert_eq!(app.tab_manager.address(), "https://example.com/");

    handle_surface_event(
        &mut app,
        SurfaceEvent::TitleChanged {
            tab_id: id.clone(),
            title: "Example Domain".to_string(),
        },
    );
    assert_eq!(app.tab_manager.active_tab().unwrap().title, "Example Domain");
}

#[test]
fn test_stale_surface_event_is_dropped() {
    let (mut app, _state, _dir) = app_with(None);
    let cmd = handle_surface_event(
        &mut app,
        SurfaceEvent::Ready {
            tab_id: "closed-tab".to_string(),
        },
    );
    assert_eq!(cmd, None);
}

// === rendering ===

#[test]
fn test_chrome_render_script_embeds_state() {
    let tabs = vec![TabSnapshot {
        id: "t1".to_string(),
        title: "Say \"hi\"".to_string(),
        url: "https://example.com".to_string(),
        active: true,
    }];

    let script = chrome_render_script(&tabs, "https://example.com");

    assert!(script.starts_with("if(window.__jb_render)window.__jb_render({"));
    assert!(script.contains(r#""address":"https://example.com""#));
    assert!(script.contains(r#""title":"Say \"hi\"""#));
    assert!(script.contains(r#""active":true"#));
}

#[test]
fn test_render_app_lists_every_tab() {
    let (mut app, _state, _dir) = app_with(None);
    handle_message(&mut app, ChromeMessage::NewTab);

    let script = render_app(&app);
    for tab in app.tab_manager.tabs() {
        assert!(script.contains(&tab.id));
    }
}
