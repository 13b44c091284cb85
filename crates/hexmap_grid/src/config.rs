use std::{
    fs::{File, read_to_string},
    io::Write,
    path::Path,
};

use hexmap_data::{
    bounds::GridBounds,
    layout::{HexLayout, LayoutError, Orientation},
    math::{Float, UInt},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    cell::PassabilityTable,
    ron::{pretty_config, ron_options},
};

pub const DEFAULT_CELL_SIZE: Float = 64.0;
pub const DEFAULT_MAP_SIZE: UInt = 5;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse grid config: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("failed to write grid config: {0}")]
    Write(#[from] ron::Error),
    #[error("invalid grid layout: {0}")]
    Layout(#[from] LayoutError),
}

/// Everything needed to set up a [`HexGrid`](crate::grid::HexGrid).
///
/// Fields missing from a document take their default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub layout: HexLayout,
    pub bounds: GridBounds,
    pub passability: PassabilityTable,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            layout: HexLayout::new(Orientation::PointyTop, DEFAULT_CELL_SIZE).unwrap_or_default(),
            bounds: GridBounds::parallelogram(DEFAULT_MAP_SIZE, DEFAULT_MAP_SIZE),
            passability: PassabilityTable::default(),
        }
    }
}

impl GridConfig {
    pub fn new(orientation: Orientation, cell_size: Float, bounds: GridBounds) -> Result<Self, ConfigError> {
        Ok(Self {
            layout: HexLayout::new(orientation, cell_size)?,
            bounds,
            passability: PassabilityTable::default(),
        })
    }

    #[must_use]
    pub fn with_passability(mut self, passability: PassabilityTable) -> Self {
        self.passability = passability;
        self
    }

    pub fn from_ron_str(s: &str) -> Result<Self, ConfigError> {
        Ok(ron_options().from_str(s)?)
    }

    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        Ok(ron_options().to_string_pretty(self, pretty_config())?)
    }

    /// Reads the config at `path`, or the default one when it is missing or broken.
    pub fn load_from(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        log::info!("Loading grid config from {}...", path.display());

        let file = match read_to_string(path) {
            Ok(file) => file,
            Err(err) => {
                log::warn!("Could not read grid config! The default one will be used. Error: {err}");

                return Self::default();
            }
        };

        Self::from_ron_str(&file)
            .inspect(|_| log::info!("Loaded grid config!"))
            .inspect_err(|err| log::warn!("Error parsing grid config! The default one will be used. Error: {err}"))
            .unwrap_or_default()
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let path = path.as_ref();

        log::info!("Serializing grid config...");
        log::debug!("\n{self:?}");

        let document = self
            .to_ron_string()
            .inspect_err(|err| log::warn!("Error writing grid config! Error: {err}"))?;

        log::info!("Saving grid config to {}...", path.display());

        let mut file = File::create(path)?;
        write!(&mut file, "{document}")?;

        log::info!("Saved grid config!");

        Ok(())
    }
}
