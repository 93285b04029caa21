// Shared type definitions
// Each submodule defines types used across the application.

pub mod destination;
pub mod errors;
pub mod settings;
pub mod tab;
