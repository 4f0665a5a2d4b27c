mod settings;
pub use settings::{ConfigureArgs, Settings, configure, show_configuration};

#[cfg(test)]
mod settings_tests;
