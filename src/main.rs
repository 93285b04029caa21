//! Jayden's Browser: a frameless desktop browser shell with tabs and a smart
//! address bar.
//!
//! With the `gui` feature this opens the browser window. Without it, the
//! binary resolves address-bar input from its arguments (or stdin, one entry
//! per line) and prints the URL that would be loaded.

#[cfg(feature = "gui")]
fn main() {
    use jaydensbrowser::logging::init_logging;
    use jaydensbrowser::services::launch::url_from_args;
    use jaydensbrowser::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
    use tracing::{error, warn};

    let mut settings_engine = SettingsEngine::new(None);
    let loaded = settings_engine.load();
    init_logging(&settings_engine.get_settings().developer.log_level);
    if let Err(e) = loaded {
        warn!(error = %e, path = settings_engine.get_config_path(), "using default settings");
    }

    let launch_url = url_from_args(std::env::args().skip(1));
    if let Err(e) = jaydensbrowser::ui::webview_app::run(settings_engine, launch_url) {
        error!(error = %e, "browser failed to start");
        std::process::exit(1);
    }
}

#[cfg(not(feature = "gui"))]
fn main() {
    use std::io::BufRead;

    use jaydensbrowser::logging::init_logging;
    use jaydensbrowser::services::input_classifier::resolve;
    use jaydensbrowser::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
    use tracing::warn;

    let mut settings_engine = SettingsEngine::new(None);
    let loaded = settings_engine.load();
    init_logging(&settings_engine.get_settings().developer.log_level);
    if let Err(e) = loaded {
        warn!(error = %e, "using default settings");
    }
    let template = settings_engine.get_settings().general.search_template.clone();

    let print = |input: &str| {
        if let Some(url) = resolve(input, &template) {
            println!("{}", url);
        }
    };

    let args: Vec<String> = std::env::args().skip(1).collect();
    if !args.is_empty() {
        args.iter().for_each(|a| print(a));
        return;
    }
    for line in std::io::stdin().lock().lines() {
        match line {
            Ok(line) => print(&line),
            Err(e) => {
                warn!(error = %e, "stdin closed");
                break;
            }
        }
    }
}
