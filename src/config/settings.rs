use std::{fs, io::Write, path::Path, time::Duration};

use anyhow::{Context, Result, bail};
use bon::Builder;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::common::project_config_dir;

const SETTINGS_FILE_NAME: &str = "settings.json";
const DEFAULT_SPINNER_INTERVAL_MS: u64 = 100;

#[derive(clap::Args)]
pub struct ConfigureArgs {
    /// Always use numbered selection instead of arrow-key menus
    #[arg(long)]
    fallback_only: Option<bool>,

    /// Colored output
    #[arg(long)]
    color: Option<bool>,

    /// Milliseconds between spinner frames
    #[arg(long)]
    spinner_interval_ms: Option<u64>,
}

/// User preferences for the prompt subsystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
#[serde(default)]
pub struct Settings {
    /// Skip raw mode and use numbered selection (default: false)
    #[builder(default)]
    pub fallback_only: bool,
    /// Colored output (default: true)
    #[builder(default = true)]
    pub color: bool,
    /// Delay between spinner frames (default: 100)
    #[builder(default = DEFAULT_SPINNER_INTERVAL_MS)]
    pub spinner_interval_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fallback_only: false,
            color: true,
            spinner_interval_ms: DEFAULT_SPINNER_INTERVAL_MS,
        }
    }
}

impl Settings {
    /// Loads settings from the project config directory.
    pub fn load() -> Result<Self> {
        let settings_file = project_config_dir()?.join(SETTINGS_FILE_NAME);
        Self::load_from(&settings_file)
    }

    /// Loads settings from `settings_file`, or defaults if it does not exist.
    pub fn load_from(settings_file: &Path) -> Result<Self> {
        if !settings_file.exists() {
            debug!("{} not found, using default settings", settings_file.display());
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(settings_file)
            .with_context(|| format!("Unable to read {}", settings_file.display()))?;

        let settings: Self = serde_json::from_str(&contents)
            .with_context(|| format!("Unable to parse {}", settings_file.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    pub fn save(&self) -> Result<()> {
        let settings_file = project_config_dir()?.join(SETTINGS_FILE_NAME);
        self.save_to(&settings_file)
    }

    pub fn save_to(&self, settings_file: &Path) -> Result<()> {
        self.validate()?;

        let contents =
            serde_json::to_string_pretty(self).context("Unable to serialize settings")?;

        let mut fd = fs::OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(settings_file)
            .with_context(|| format!("Unable to write {}", settings_file.display()))?;

        fd.write_all(contents.as_bytes())
            .with_context(|| format!("Failed to write settings to {}", settings_file.display()))?;

        info!("settings saved to {}", settings_file.display());
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.spinner_interval_ms == 0 {
            bail!("spinner_interval_ms must be greater than zero");
        }
        Ok(())
    }

    #[must_use]
    pub fn spinner_interval(&self) -> Duration {
        Duration::from_millis(self.spinner_interval_ms)
    }

    /// Applies process-wide effects, currently the color switch.
    pub fn apply(&self) {
        if !self.color {
            colored::control::set_override(false);
        }
    }
}

////////////////////////////////////////////////////////////////////////////////
// PUBLIC
////////////////////////////////////////////////////////////////////////////////

pub fn show_configuration() -> Result<()> {
    let settings = Settings::load()?;
    let settings_file = project_config_dir()?.join(SETTINGS_FILE_NAME);

    println!("{}", settings_file.display());
    println!(
        "{}",
        serde_json::to_string_pretty(&settings).context("Unable to serialize settings")?
    );

    Ok(())
}

pub fn configure(args: &ConfigureArgs) -> Result<()> {
    let mut settings = Settings::load()?;

    if let Some(fallback_only) = args.fallback_only {
        settings.fallback_only = fallback_only;
    }
    if let Some(color) = args.color {
        settings.color = color;
    }
    if let Some(spinner_interval_ms) = args.spinner_interval_ms {
        settings.spinner_interval_ms = spinner_interval_ms;
    }

    settings.save()?;

    show_configuration()
}
