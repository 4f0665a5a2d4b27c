use std::{
    fs::{self, File},
    path::{Path, PathBuf},
};

#[cfg(unix)]
use std::os::unix::fs::OpenOptionsExt;

use anyhow::{Context, Result};
use env_logger::Target;
use log::LevelFilter;

use crate::common::project_data_dir;

/// Logger setup.
///
/// Without a file, records go to stderr. With a file, they go to that file
/// inside the project data directory so they never mix with prompt output.
#[derive(Default)]
pub struct Logging {
    file_name: Option<PathBuf>,
    debug_mode: bool,
}

impl Logging {
    #[must_use]
    pub fn new() -> Self {
        Self {
            file_name: None,
            debug_mode: false,
        }
    }

    #[must_use]
    pub fn with_file<P>(mut self, file_name: P) -> Self
    where
        P: Into<PathBuf>,
    {
        self.file_name = Some(file_name.into());
        self
    }

    /// Log at debug level instead of info.
    #[must_use]
    pub fn with_debug_mode(mut self, enable: bool) -> Self {
        self.debug_mode = enable;
        self
    }

    pub fn start(&self) -> Result<()> {
        let mut b = env_logger::builder();

        if self.debug_mode {
            b.filter_level(LevelFilter::Debug);
        } else {
            b.filter_level(LevelFilter::Info);
        }

        if let Some(file_name) = &self.file_name {
            let log_file = project_data_dir()?.join(file_name);
            let fd = open_log_file(&log_file)?;
            b.target(Target::Pipe(Box::new(fd)));
        }

        b.try_init().context("Unable to install logger")?;

        Ok(())
    }
}

/// Opens `path` for writing, truncating any previous run's log.
fn open_log_file(path: &Path) -> Result<File> {
    let mut options = fs::OpenOptions::new();
    options.create(true).write(true).truncate(true);

    #[cfg(unix)]
    options.mode(0o600);

    options
        .open(path)
        .with_context(|| format!("Unable to open {} for writing", path.display()))
}
