//! Jayden's Browser: a minimal frameless web browser shell.
//!
//! This library crate exposes all modules for use by the binary and integration tests.

pub mod app;
pub mod ipc;
pub mod logging;
pub mod managers;
pub mod platform;
pub mod services;
pub mod surface;
pub mod types;

#[cfg(feature = "gui")]
pub mod ui;
