//! App core.
//!
//! Holds the settings, the tab manager and the launch hand-off queue, and runs
//! the startup and shutdown sequences. Generic over the surface factory so the
//! same core drives real webviews and test doubles.

use tracing::{error, info, warn};

use crate::managers::tab_manager::{TabManager, TabManagerTrait};
use crate::services::input_classifier;
use crate::services::launch::{self, PendingNavigation};
use crate::services::settings_engine::{SettingsEngine, SettingsEngineTrait};
use crate::surface::SurfaceFactory;
use crate::types::errors::TabError;
use crate::types::settings::BrowserSettings;

/// Central application struct.
pub struct App<F: SurfaceFactory> {
    pub settings_engine: SettingsEngine,
    pub tab_manager: TabManager<F>,
    pub pending: PendingNavigation,
}

impl<F: SurfaceFactory> App<F> {
    /// Creates the app around an already loaded settings engine.
    ///
    /// `launch_url` is an externally supplied URL (see
    /// [`crate::services::launch::url_from_args`]) held until the UI is ready.
    pub fn new(settings_engine: SettingsEngine, factory: F, launch_url: Option<String>) -> Self {
        let home = settings_engine.get_settings().general.homepage.clone();
        Self {
            settings_engine,
            tab_manager: TabManager::new(factory, home),
            pending: PendingNavigation::new(launch_url),
        }
    }

    pub fn settings(&self) -> &BrowserSettings {
        self.settings_engine.get_settings()
    }

    /// Startup sequence: open the initial tab at the home page.
    ///
    /// A failure to create the first tab is logged; the window stays up so the
    /// user can retry with a new tab.
    pub fn startup(&mut self) {
        info!(home = %self.tab_manager.home(), "starting up");
        if let Err(e) = self.tab_manager.open_tab(None) {
            error!(error = %e, "failed to create initial tab");
        }
    }

    /// Shutdown sequence. Nothing is persisted beyond settings already saved.
    pub fn shutdown(&mut self) {
        info!(tabs = self.tab_manager.tab_count(), "shutting down");
    }

    /// Navigate the active tab to whatever the user typed in the address bar.
    ///
    /// Blank input is ignored; non-destinations become a search.
    pub fn submit_address(&mut self, input: &str) -> Result<(), TabError> {
        let template = &self.settings_engine.get_settings().general.search_template;
        let Some(url) = input_classifier::resolve(input, template) else {
            return Ok(());
        };
        self.tab_manager.navigate_active_to(&url)
    }

    /// Deliver an already-normalized URL to the active tab, unless the UI is
    /// still starting, in which case it waits in the queue.
    pub fn deliver_external(&mut self, url: String) {
        if let Some(url) = self.pending.offer(url) {
            self.navigate_or_warn(&url);
        }
    }

    /// A URL handed over by the OS while running (`jaydensbrowser://` link or
    /// plain http(s) URL). Returns `false` when the URL is not one we open.
    pub fn receive_external_url(&mut self, raw: &str) -> bool {
        match launch::rewrite_external_url(raw) {
            Some(url) => {
                info!(%url, "external url received");
                self.deliver_external(url);
                true
            }
            None => false,
        }
    }

    /// The chrome UI has loaded: flush any queued external URL.
    pub fn on_ui_ready(&mut self) {
        if let Some(url) = self.pending.mark_ready() {
            info!(%url, "delivering queued url");
            self.navigate_or_warn(&url);
        }
    }

    fn navigate_or_warn(&mut self, url: &str) {
        if let Err(e) = self.tab_manager.navigate_active_to(url) {
            warn!(error = %e, %url, "dropping navigation");
        }
    }
}
