//! Content surface capability.
//!
//! A content surface is the embedded page view behind a tab. It is an opaque
//! collaborator: every call may fail, and failures are reported as values so
//! the tab manager can decide on a fallback instead of unwinding.

use crate::types::errors::SurfaceError;

/// Commands and queries a tab's page view must support.
pub trait ContentSurface {
    /// Navigate to `url` through the surface's own loader.
    fn load_destination(&mut self, url: &str) -> Result<(), SurfaceError>;

    /// Point the surface at `url` by replacing its source directly.
    ///
    /// Used only as a fallback when [`ContentSurface::load_destination`] fails.
    fn set_source(&mut self, url: &str) -> Result<(), SurfaceError>;

    /// URL currently displayed by the surface.
    fn current_url(&self) -> Result<String, SurfaceError>;

    fn reload(&mut self) -> Result<(), SurfaceError>;
    fn go_back(&mut self) -> Result<(), SurfaceError>;
    fn go_forward(&mut self) -> Result<(), SurfaceError>;

    /// `Err(SurfaceError::Unsupported(_))` when the surface cannot tell.
    fn can_go_back(&self) -> Result<bool, SurfaceError>;
    /// `Err(SurfaceError::Unsupported(_))` when the surface cannot tell.
    fn can_go_forward(&self) -> Result<bool, SurfaceError>;

    fn set_visible(&mut self, visible: bool) -> Result<(), SurfaceError>;

    /// Tear the surface down. Consumes it.
    fn destroy(self) -> Result<(), SurfaceError>
    where
        Self: Sized;
}

/// Creates one content surface per tab.
pub trait SurfaceFactory {
    type Surface: ContentSurface;

    /// Build a surface for `tab_id`, initially showing `url`.
    fn create(&mut self, tab_id: &str, url: &str) -> Result<Self::Surface, SurfaceError>;
}
