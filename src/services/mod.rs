// Services
// Stateless helpers and small engines: input classification, settings, launch hand-off.

pub mod input_classifier;
pub mod launch;
pub mod settings_engine;
