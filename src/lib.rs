mod common;
mod config;
mod logging;
pub mod tui;

pub use common::{PROJECT_NAME, PROJECT_VERSION, PROJECT_VERSION_HASH};
pub use config::{ConfigureArgs, Settings, configure, show_configuration};
pub use logging::Logging;
