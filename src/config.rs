//! Optional TOML configuration for the command-line front end

use std::{fs, path::Path};

use plotwalk_core::{GraphBuildOptions, RouteOptions};
use serde::Deserialize;

use crate::error::{CliError, Result};

/// Contents of a `plotwalk.toml` file; both tables are optional
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PlotwalkConfig {
    pub graph: GraphBuildOptions,
    pub route: RouteOptions,
}

impl PlotwalkConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| CliError::Config(format!("{}: {e}", path.as_ref().display())))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: PlotwalkConfig = toml::from_str(contents)?;
        config.graph.validate()?;
        config.route.validate()?;
        Ok(config)
    }

    /// Loads `path` when given, otherwise the defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                tracing::info!("Loading configuration from {}", path.display());
                Self::from_file(path)
            }
            None => Ok(Self::default()),
        }
    }
}
