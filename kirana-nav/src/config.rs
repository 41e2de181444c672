//! Navigation configuration, loadable from YAML.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use kirana_geom::Scalar;

/// Configuration error.
#[derive(Error, Debug)]
pub enum ConfigLoadError {
    #[error("failed to read config file: {0}")]
    Io(String),

    #[error("failed to parse config: {0}")]
    Parse(String),
}

/// Tolerances of the navigation engine.
///
/// All lengths are in detector units.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// Below this pending path length a candidate counts as reached.
    #[serde(default = "default_on_surface_tolerance")]
    pub on_surface_tolerance: Scalar,

    /// Candidates closer than this at admission time are treated as
    /// already crossed and dropped. Strictly positive; without it the
    /// navigator would re-detect the surface it just crossed.
    #[serde(default = "default_backstep_tolerance")]
    pub backstep_tolerance: Scalar,

    /// Widening applied to every mask containment test.
    #[serde(default = "default_mask_tolerance")]
    pub mask_tolerance: Scalar,
}

fn default_on_surface_tolerance() -> Scalar {
    1e-5
}

fn default_backstep_tolerance() -> Scalar {
    1e-7
}

fn default_mask_tolerance() -> Scalar {
    1e-5
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            on_surface_tolerance: default_on_surface_tolerance(),
            backstep_tolerance: default_backstep_tolerance(),
            mask_tolerance: default_mask_tolerance(),
        }
    }
}

impl NavigationConfig {
    /// Load configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigLoadError::Io(e.to_string()))?;
        Self::from_yaml(&contents)
    }

    /// Parse from a YAML string. Missing fields take their defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigLoadError> {
        serde_yaml::from_str(yaml).map_err(|e| ConfigLoadError::Parse(e.to_string()))
    }
}
