use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::services::input_classifier::file_title;
use crate::surface::{ContentSurface, SurfaceFactory};
use crate::types::errors::{SurfaceError, TabError};
use crate::types::tab::{CloseOutcome, TabSnapshot, DEFAULT_TAB_TITLE};

/// Trait defining the tab coordination interface.
pub trait TabManagerTrait {
    type Surface: ContentSurface;

    fn open_tab(&mut self, destination: Option<&str>) -> Result<String, TabError>;
    fn activate(&mut self, tab_id: &str) -> Result<(), TabError>;
    fn close(&mut self, tab_id: &str) -> Result<CloseOutcome, TabError>;
    fn on_navigation_event(&mut self, tab_id: &str, url: &str) -> Result<(), TabError>;
    fn on_title_event(&mut self, tab_id: &str, title: &str) -> Result<(), TabError>;
    fn on_ready(&mut self, tab_id: &str) -> Result<(), TabError>;
    fn navigate_active_to(&mut self, destination: &str) -> Result<(), TabError>;
    fn go_back(&mut self) -> Result<(), TabError>;
    fn go_forward(&mut self) -> Result<(), TabError>;
    fn reload(&mut self) -> Result<(), TabError>;
    fn get_tab(&self, tab_id: &str) -> Option<&Tab<Self::Surface>>;
    fn active_tab(&self) -> Option<&Tab<Self::Surface>>;
    fn tabs(&self) -> &[Tab<Self::Surface>];
    fn tab_count(&self) -> usize;
    fn address(&self) -> &str;
    fn snapshots(&self) -> Vec<TabSnapshot>;
}

/// A tab: its page view plus what the chrome shows for it.
#[derive(Debug)]
pub struct Tab<S> {
    pub id: String,
    pub title: String,
    /// Last destination reported by the surface.
    pub url: String,
    surface: S,
}

impl<S> Tab<S> {
    pub fn surface(&self) -> &S {
        &self.surface
    }
}

/// Owns the tabs of one window and the single active-tab reference.
///
/// Surface visibility is changed only by [`TabManagerTrait::activate`], so the
/// active tab's surface is the only visible one.
pub struct TabManager<F: SurfaceFactory> {
    factory: F,
    tabs: Vec<Tab<F::Surface>>,
    active_tab_id: Option<String>,
    address: String,
    home: String,
}

impl<F: SurfaceFactory> TabManager<F> {
    /// `home` is loaded by tabs opened without a destination.
    pub fn new(factory: F, home: impl Into<String>) -> Self {
        Self {
            factory,
            tabs: Vec::new(),
            active_tab_id: None,
            address: String::new(),
            home: home.into(),
        }
    }

    pub fn home(&self) -> &str {
        &self.home
    }

    pub fn active_tab_id(&self) -> Option<&str> {
        self.active_tab_id.as_deref()
    }

    fn find_tab_index(&self, tab_id: &str) -> Option<usize> {
        self.tabs.iter().position(|t| t.id == tab_id)
    }

    fn is_active(&self, tab_id: &str) -> bool {
        self.active_tab_id.as_deref() == Some(tab_id)
    }

    fn tab_mut(&mut self, tab_id: &str) -> Result<&mut Tab<F::Surface>, TabError> {
        self.tabs
            .iter_mut()
            .find(|t| t.id == tab_id)
            .ok_or_else(|| TabError::NotFound(tab_id.to_string()))
    }

    fn active_tab_mut(&mut self) -> Result<&mut Tab<F::Surface>, TabError> {
        let id = self.active_tab_id.clone().ok_or(TabError::NoActiveTab)?;
        self.tab_mut(&id)
    }

    /// Read the surface URL; an unreadable surface shows as an empty address.
    fn read_url(surface: &F::Surface) -> String {
        surface.current_url().unwrap_or_else(|e| {
            debug!(error = %e, "surface url unavailable");
            String::new()
        })
    }

    /// One back/forward step. A surface that cannot answer the "can step"
    /// query is commanded directly; a `false` answer or a failed query is a no-op.
    fn history_step(
        &mut self,
        label: &'static str,
        can_step: fn(&F::Surface) -> Result<bool, SurfaceError>,
        step: fn(&mut F::Surface) -> Result<(), SurfaceError>,
    ) -> Result<(), TabError> {
        let tab = self.active_tab_mut()?;
        let allowed = match can_step(&tab.surface) {
            Ok(allowed) => allowed,
            Err(SurfaceError::Unsupported(_)) => true,
            Err(e) => {
                warn!(tab = %tab.id, error = %e, "{} query failed", label);
                false
            }
        };
        if !allowed {
            debug!(tab = %tab.id, "{} not possible", label);
            return Ok(());
        }
        if let Err(e) = step(&mut tab.surface) {
            warn!(tab = %tab.id, error = %e, "{} failed", label);
        }
        Ok(())
    }
}

impl<F: SurfaceFactory> TabManagerTrait for TabManager<F> {
    type Surface = F::Surface;

    /// Create a tab at `destination` (or the home page) and activate it.
    /// The previously active surface is hidden, not destroyed.
    fn open_tab(&mut self, destination: Option<&str>) -> Result<String, TabError> {
        let id = Uuid::new_v4().to_string();
        let url = destination
            .filter(|d| !d.trim().is_empty())
            .unwrap_or(self.home.as_str())
            .to_string();

        let surface = self.factory.create(&id, &url)?;
        info!(tab = %id, %url, "tab opened");
        self.tabs.push(Tab {
            id: id.clone(),
            title: DEFAULT_TAB_TITLE.to_string(),
            url,
            surface,
        });
        self.activate(&id)?;
        Ok(id)
    }

    fn activate(&mut self, tab_id: &str) -> Result<(), TabError> {
        let idx = self
            .find_tab_index(tab_id)
            .ok_or_else(|| TabError::NotFound(tab_id.to_string()))?;

        for (i, tab) in self.tabs.iter_mut().enumerate() {
            if i == idx {
                continue;
            }
            if let Err(e) = tab.surface.set_visible(false) {
                warn!(tab = %tab.id, error = %e, "failed to hide surface");
            }
        }

        let tab = &mut self.tabs[idx];
        if let Err(e) = tab.surface.set_visible(true) {
            warn!(tab = %tab.id, error = %e, "failed to show surface");
        }
        self.address = Self::read_url(&tab.surface);
        self.active_tab_id = Some(tab_id.to_string());
        debug!(tab = tab_id, "tab activated");
        Ok(())
    }

    /// Close a tab. The first remaining tab becomes active; closing the last
    /// tab asks for the window to close.
    fn close(&mut self, tab_id: &str) -> Result<CloseOutcome, TabError> {
        let idx = self
            .find_tab_index(tab_id)
            .ok_or_else(|| TabError::NotFound(tab_id.to_string()))?;

        let tab = self.tabs.remove(idx);
        if let Err(e) = tab.surface.destroy() {
            warn!(tab = tab_id, error = %e, "failed to destroy surface");
        }
        if self.is_active(tab_id) {
            self.active_tab_id = None;
        }
        info!(tab = tab_id, remaining = self.tabs.len(), "tab closed");

        match self.tabs.first() {
            Some(first) => {
                let next = first.id.clone();
                self.activate(&next)?;
                Ok(CloseOutcome::Activated(next))
            }
            None => {
                self.address.clear();
                Ok(CloseOutcome::WindowShouldClose)
            }
        }
    }

    /// A surface finished a navigation, full or in-page.
    fn on_navigation_event(&mut self, tab_id: &str, url: &str) -> Result<(), TabError> {
        let active = self.is_active(tab_id);
        let tab = self.tab_mut(tab_id)?;
        tab.url = url.to_string();
        if !active {
            return Ok(());
        }
        if let Some(title) = file_title(url) {
            tab.title = title;
        }
        self.address = url.to_string();
        debug!(tab = tab_id, %url, "address updated");
        Ok(())
    }

    fn on_title_event(&mut self, tab_id: &str, title: &str) -> Result<(), TabError> {
        let tab = self.tab_mut(tab_id)?;
        if !title.is_empty() {
            tab.title = title.to_string();
        }
        Ok(())
    }

    /// A surface finished loading its document; refresh the address if it is shown.
    fn on_ready(&mut self, tab_id: &str) -> Result<(), TabError> {
        let idx = self
            .find_tab_index(tab_id)
            .ok_or_else(|| TabError::NotFound(tab_id.to_string()))?;
        if self.is_active(tab_id) {
            self.address = Self::read_url(&self.tabs[idx].surface);
        }
        Ok(())
    }

    /// Send the active tab to `destination`.
    ///
    /// A rejected load gets one fallback through [`ContentSurface::set_source`];
    /// if that fails too the navigation is dropped.
    fn navigate_active_to(&mut self, destination: &str) -> Result<(), TabError> {
        let tab = self.active_tab_mut()?;
        let Err(e) = tab.surface.load_destination(destination) else {
            debug!(tab = %tab.id, %destination, "navigating");
            return Ok(());
        };
        warn!(tab = %tab.id, error = %e, %destination, "load failed, assigning source");
        if let Err(e) = tab.surface.set_source(destination) {
            error!(tab = %tab.id, error = %e, %destination, "source assignment failed");
        }
        Ok(())
    }

    fn go_back(&mut self) -> Result<(), TabError> {
        self.history_step("back", ContentSurface::can_go_back, ContentSurface::go_back)
    }

    fn go_forward(&mut self) -> Result<(), TabError> {
        self.history_step("forward", ContentSurface::can_go_forward, ContentSurface::go_forward)
    }

    fn reload(&mut self) -> Result<(), TabError> {
        let tab = self.active_tab_mut()?;
        if let Err(e) = tab.surface.reload() {
            warn!(tab = %tab.id, error = %e, "reload failed");
        }
        Ok(())
    }

    fn get_tab(&self, tab_id: &str) -> Option<&Tab<Self::Surface>> {
        self.tabs.iter().find(|t| t.id == tab_id)
    }

    fn active_tab(&self) -> Option<&Tab<Self::Surface>> {
        self.active_tab_id
            .as_deref()
            .and_then(|id| self.get_tab(id))
    }

    fn tabs(&self) -> &[Tab<Self::Surface>] {
        &self.tabs
    }

    fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    /// Text currently shown in the address field.
    fn address(&self) -> &str {
        &self.address
    }

    fn snapshots(&self) -> Vec<TabSnapshot> {
        self.tabs
            .iter()
            .map(|t| TabSnapshot {
                id: t.id.clone(),
                title: t.title.clone(),
                url: t.url.clone(),
                active: self.is_active(&t.id),
            })
            .collect()
    }
}
