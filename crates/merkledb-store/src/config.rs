use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

/// Configuration for an [`ObjectStore`](crate::ObjectStore).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Re-hash every object on read and reject bytes whose digest does not
    /// match the requested id.
    pub verify_reads: bool,
}

impl StoreConfig {
    /// A configuration that verifies every read.
    pub fn verifying() -> Self {
        Self { verify_reads: true }
    }

    /// Parse a configuration from TOML. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> StoreResult<Self> {
        toml::from_str(s).map_err(|e| StoreError::Config(e.to_string()))
    }
}
