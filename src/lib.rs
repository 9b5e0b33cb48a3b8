pub mod battery;
pub mod config;
pub mod device;
pub mod engine;
pub mod error;
pub mod input;
pub mod logging;
pub mod menu;
pub mod render;
pub mod tui;

pub use engine::Engine;
pub use error::{MenuError, Result};
