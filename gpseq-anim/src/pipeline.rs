//! Boundary with the external analysis engine.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use std::process::Command;

use crate::constants::{DEFAULT_ENGINE, ENGINE_ENV, LOG_SUFFIX, SETTINGS_FILENAME};
use crate::error::FrontendError;
use crate::resolve::ResolvedConfig;

/// The collaborator that performs the actual image analysis.
pub trait Pipeline {
    /// File name for a new log, without directory.
    fn log_name(&self) -> String;

    /// Runs the analysis to completion and returns the exit status.
    ///
    /// # Errors
    ///
    /// Returns an error if the analysis could not be started.
    fn run(&mut self, config: &ResolvedConfig) -> Result<i32>;
}

/// Timestamped log name, e.g. `20261018-142501_gpseq-anim.log`.
#[must_use]
pub fn timestamped_log_name() -> String {
    format!(
        "{}{LOG_SUFFIX}",
        chrono::Local::now().format("%Y%m%d-%H%M%S")
    )
}

/// Runs the analysis engine as a child process.
///
/// The resolved settings are written as JSON into the output directory and
/// the engine is invoked as `<engine> --settings <file>`.
#[derive(Debug, Clone)]
pub struct ProcessPipeline {
    engine: String,
}

impl ProcessPipeline {
    /// Uses the given engine executable.
    #[must_use]
    pub fn new(engine: impl Into<String>) -> Self {
        Self {
            engine: engine.into(),
        }
    }

    /// Picks the engine: explicit choice, then `GPSEQ_ENGINE`, then the default.
    #[must_use]
    pub fn from_env(explicit: Option<String>) -> Self {
        let engine = explicit
            .or_else(|| std::env::var(ENGINE_ENV).ok().filter(|e| !e.is_empty()))
            .unwrap_or_else(|| DEFAULT_ENGINE.to_owned());
        Self::new(engine)
    }

    /// Engine executable.
    #[must_use]
    pub fn engine(&self) -> &str {
        &self.engine
    }

    /// Writes the engine settings file and returns its path.
    ///
    /// # Errors
    ///
    /// Fails if the output directory cannot be created or written.
    pub fn write_settings(config: &ResolvedConfig) -> Result<PathBuf> {
        fs::create_dir_all(&config.out_dir).with_context(|| {
            format!(
                "Failed to create output directory '{}'",
                config.out_dir.display()
            )
        })?;
        let path = config.out_dir.join(SETTINGS_FILENAME);
        let json = serde_json::to_string_pretty(&config.engine_settings())?;
        fs::write(&path, json)
            .with_context(|| format!("Failed to write settings to '{}'", path.display()))?;
        Ok(path)
    }
}

impl Pipeline for ProcessPipeline {
    fn log_name(&self) -> String {
        timestamped_log_name()
    }

    fn run(&mut self, config: &ResolvedConfig) -> Result<i32> {
        let settings = Self::write_settings(config)?;
        tracing::info!(engine = %self.engine, settings = %settings.display(), "launching analysis engine");

        let status = Command::new(&self.engine)
            .arg("--settings")
            .arg(&settings)
            .status()
            .map_err(|source| FrontendError::EngineSpawn {
                engine: self.engine.clone(),
                source,
            })?;

        // No exit code means the engine was killed by a signal.
        let code = status.code().unwrap_or(1);
        tracing::info!(code, "analysis engine finished");
        Ok(code)
    }
}
