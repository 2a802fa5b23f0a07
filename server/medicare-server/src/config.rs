//! Layered server settings.
//!
//! Precedence, lowest first: built-in defaults, the optional config file,
//! `MEDICARE_*` environment variables (a `.env` file is loaded into the
//! environment by the binary), then command-line flags.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File};
use diagnosis_engine::loader::{DEFAULT_ENCODER_CANDIDATES, DEFAULT_MODEL_CANDIDATES};
use diagnosis_engine::ArtifactCandidates;
use serde::Deserialize;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_CONFIG_FILE: &str = "medicare-server.toml";
pub const ENV_PREFIX: &str = "MEDICARE";

/// Candidate files per artifact, relative ones resolved against the
/// artifact directory
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ArtifactSettings {
    pub model: Vec<PathBuf>,
    pub encoder: Vec<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub host: String,
    pub port: u16,
    pub artifact_dir: PathBuf,
    pub artifacts: ArtifactSettings,
}

/// Values given on the command line; `None` leaves the lower layers alone.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub artifact_dir: Option<PathBuf>,
}

impl Settings {
    /// Build settings from defaults, `config_file` (if it exists) and the
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the file or an environment variable
    /// holds a value of the wrong type.
    pub fn load(config_file: &Path) -> Result<Self, ConfigError> {
        Self::builder()?
            .add_source(File::from(config_file).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("host", DEFAULT_HOST)?
            .set_default("port", i64::from(DEFAULT_PORT))?
            .set_default("artifact_dir", ".")?
            .set_default("artifacts.model", to_strings(&DEFAULT_MODEL_CANDIDATES))?
            .set_default("artifacts.encoder", to_strings(&DEFAULT_ENCODER_CANDIDATES))
    }

    #[must_use]
    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        if let Some(host) = overrides.host {
            self.host = host;
        }
        if let Some(port) = overrides.port {
            self.port = port;
        }
        if let Some(dir) = overrides.artifact_dir {
            self.artifact_dir = dir;
        }
        self
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn model_candidates(&self) -> ArtifactCandidates {
        ArtifactCandidates::new("model", self.artifacts.model.clone())
            .resolve_against(&self.artifact_dir)
    }

    pub fn encoder_candidates(&self) -> ArtifactCandidates {
        ArtifactCandidates::new("label encoder", self.artifacts.encoder.clone())
            .resolve_against(&self.artifact_dir)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            artifact_dir: PathBuf::from("."),
            artifacts: ArtifactSettings {
                model: DEFAULT_MODEL_CANDIDATES.iter().map(PathBuf::from).collect(),
                encoder: DEFAULT_ENCODER_CANDIDATES.iter().map(PathBuf::from).collect(),
            },
        }
    }
}

fn to_strings(paths: &[&str]) -> Vec<String> {
    paths.iter().map(|p| (*p).to_string()).collect()
}
