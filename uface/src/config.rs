use std::path::Path;

use lbp::{BINS, GridLayout};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Environment variable naming a JSON [`PipelineConfig`] file.
pub const CONFIG_ENV: &str = "UFACE_CONFIG";

/// Geometry of the descriptor: the face crop size, the number of grid cells
/// and the number of bins per cell. Missing JSON fields take the defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    pub width: usize,
    pub height: usize,
    pub grid_size: usize,
    pub bins: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            width: 256,
            height: 256,
            grid_size: 16,
            bins: BINS,
        }
    }
}

impl PipelineConfig {
    /// Checks the configuration and returns the grid it describes.
    pub fn validate(&self) -> Result<GridLayout> {
        if self.bins != BINS {
            return Err(lbp::Error::BinCount {
                got: self.bins,
                expected: BINS,
            }
            .into());
        }
        Ok(GridLayout::new(self.width, self.height, self.grid_size)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: PipelineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let json: String = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loading pipeline config");
        Self::from_json(&json)
    }

    /// Loads the file named by [`CONFIG_ENV`], or the defaults when unset.
    pub fn from_env() -> Result<Self> {
        match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::from_file(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }
}
