//! Input/output collaborators of the engine
//!
//! Everything here sits outside the collapse/propagation core: argument
//! parsing, tile set sources, renderers and progress display.

/// Command-line parsing and the single-run driver
pub mod cli;
/// Compile-time defaults and limits
pub mod configuration;
/// Error type and result alias
pub mod error;
/// PNG export of a grid
pub mod image;
/// Built-in tile sets
pub mod presets;
/// Progress bar for a running generation
pub mod progress;
/// ASCII and JSON rendering
pub mod render;
/// JSON tile set files
pub mod tileset;
/// Animated replay of the collapse order
pub mod visualization;
