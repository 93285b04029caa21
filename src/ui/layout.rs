//! Window layout: the chrome strip on top, the active tab's page below it.

use tao::window::Window;
use wry::dpi::{LogicalPosition, LogicalSize};
use wry::Rect;

/// Window inner size in logical pixels.
fn logical_size(window: &Window) -> (f64, f64) {
    let scale = window.scale_factor();
    let size = window.inner_size();
    (size.width as f64 / scale, size.height as f64 / scale)
}

pub fn chrome_bounds(window: &Window, chrome_height: f64) -> Rect {
    let (width, height) = logical_size(window);
    Rect {
        position: LogicalPosition::new(0, 0).into(),
        size: LogicalSize::new(width, chrome_height.min(height)).into(),
    }
}

/// Everything below the chrome. Collapses to zero height on tiny windows.
pub fn content_bounds(window: &Window, chrome_height: f64) -> Rect {
    let (width, height) = logical_size(window);
    let (top, content_height) = split_height(height, chrome_height);
    Rect {
        position: LogicalPosition::new(0, top as i32).into(),
        size: LogicalSize::new(width, content_height).into(),
    }
}

fn split_height(height: f64, chrome_height: f64) -> (f64, f64) {
    let top = chrome_height.clamp(0.0, height.max(0.0));
    (top, (height - top).max(0.0))
}
