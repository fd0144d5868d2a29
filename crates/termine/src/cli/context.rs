//! Shared context for running CLI commands.

use std::{
    env,
    path::{Path, PathBuf},
    process::ExitCode,
};

use termine_config::Config;
use termine_extract::StopwordTable;
use tracing::info;

/// Command execution context built once per CLI invocation.
pub struct CommandContext {
    /// Current working directory.
    pub cwd: PathBuf,
    /// Loaded configuration (default if no config files were found).
    pub config: Config,
}

impl CommandContext {
    /// Loads the current directory and configuration.
    pub fn load() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        let config = Config::load(&cwd).map_err(|e| {
            eprintln!("error: failed to load configuration: {e}");
            ExitCode::FAILURE
        })?;
        Ok(Self { cwd, config })
    }

    /// Loads only the current directory, skipping configuration parsing.
    pub fn load_cwd_only() -> Result<Self, ExitCode> {
        let cwd = current_dir_or_failure()?;
        Ok(Self {
            cwd,
            config: Config::default(),
        })
    }

    /// Loads the stopword table for a command.
    ///
    /// An explicit file wins over the configured `stopword_list`; without
    /// either the built-in list for `language` is used.
    pub fn stopwords(
        &self,
        explicit: Option<&Path>,
        language: &str,
    ) -> Result<StopwordTable, ExitCode> {
        let path = explicit
            .map(|p| self.cwd.join(p))
            .or_else(|| self.config.extract.stopword_list.clone());

        let Some(path) = path else {
            info!(target: "termine", %language, "using built-in stopword list");
            return Ok(StopwordTable::builtin(language));
        };

        let table = StopwordTable::load(&path).map_err(|e| {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        })?;
        info!(target: "termine", path = %path.display(), entries = table.len(), "loaded stopwords");
        Ok(table)
    }
}

/// Returns the current working directory or exits with a consistent error.
fn current_dir_or_failure() -> Result<PathBuf, ExitCode> {
    env::current_dir().map_err(|e| {
        eprintln!("error: could not determine current directory: {e}");
        ExitCode::FAILURE
    })
}
