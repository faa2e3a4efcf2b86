//! Input/output operations, configuration and error handling

/// Command-line interface and batch driver
pub mod cli;
/// Constants and defaults
pub mod configuration;
/// Error types
pub mod error;
/// Exemplar loading and presets
pub mod exemplar;
/// PNG rendering
pub mod image;
/// Transition model serialization
pub mod model;
/// Progress display
pub mod progress;
/// Animated pass capture
pub mod visualization;
