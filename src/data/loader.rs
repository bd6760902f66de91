//! Reading and writing the lifecycle JSON document.

use std::path::{Path, PathBuf};

use thiserror::Error;

use super::defaults::default_dataset;
use super::model::LifecycleData;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("failed to read lifecycle data from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed lifecycle data in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write lifecycle data to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize lifecycle data: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Where a loaded dataset came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    File,
    /// File was missing; the built-in dataset was used (and written back when possible)
    BuiltInDefault,
}

impl LifecycleData {
    /// Parse a lifecycle document. No fallback.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DataError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| DataError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::from_str(&contents).map_err(|source| DataError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the document, or substitute the built-in dataset when the file does not exist.
    ///
    /// The default is written to `path` so it can be edited afterwards. A failed
    /// write only logs a warning. A present but malformed file is an error.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<(Self, DataSource), DataError> {
        let path = path.as_ref();

        if path.exists() {
            let data = Self::load(path)?;
            tracing::info!(
                "Loaded lifecycle data from {} ({} stages, {} connections, {} exemplars)",
                path.display(),
                data.stages.len(),
                data.connections.len(),
                data.exemplars.len()
            );
            return Ok((data, DataSource::File));
        }

        tracing::info!("{} not found, using built-in lifecycle dataset", path.display());
        let data = default_dataset();

        if let Err(e) = data.save(path) {
            tracing::warn!("Could not write default dataset: {}", e);
        }

        Ok((data, DataSource::BuiltInDefault))
    }

    /// Write the document as pretty-printed JSON, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), DataError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| DataError::Write {
                path: path.to_path_buf(),
                source,
            })?;
        }

        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json).map_err(|source| DataError::Write {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn default_dataset() -> Self {
        default_dataset()
    }
}
