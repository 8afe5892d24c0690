//! Configuration loading
//!
//! Coordinates loading configuration from `.env` files, the environment and
//! the command line.

use crate::primitives::ConfigError;
use clap::Parser;
use std::ffi::OsString;
use tracing::trace;

use super::{
    cli::{Cli, CliConfig},
    env::EnvironmentConfig,
};

/// Files read into the process environment before parsing, first wins
pub const ENV_FILES: &[&str] = &[".env.local", ".env"];

/// Load `.env` files into the process environment without overriding
/// variables that are already set. Missing files are skipped.
pub fn load_env_files() -> Result<(), ConfigError> {
    for env_file in ENV_FILES {
        match dotenvy::from_filename(env_file) {
            Ok(path) => trace!("Loaded environment from {}", path.display()),
            Err(e) if e.not_found() => {}
            Err(e) => {
                return Err(ConfigError::EnvFileError {
                    file: env_file.to_string(),
                    source: e,
                });
            }
        }
    }
    Ok(())
}

impl CliConfig {
    /// Load config: defaults -> .env -> env vars -> CLI
    pub fn load() -> Result<Self, ConfigError> {
        // .env values become environment variables that clap reads as defaults
        load_env_files()?;

        let cli = Cli::parse();
        Self::from_cli(cli, &EnvironmentConfig::load()?)
    }

    /// Parse an explicit argument list (first item is the binary name)
    pub fn try_from_args<I, T>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let cli = Cli::try_parse_from(args)?;
        Self::from_cli(cli, &EnvironmentConfig::default())
    }

    /// Resolve color from the environment and validate
    pub fn from_cli(cli: Cli, environment: &EnvironmentConfig) -> Result<Self, ConfigError> {
        let mut app_config = cli.config;
        app_config.color = environment.apply_color_config(app_config.color);
        app_config.validate()?;

        Ok(Self {
            app_config,
            command: cli.command,
        })
    }
}

#[cfg(test)]
mod tests {
    include!("loader.test.rs");
}
