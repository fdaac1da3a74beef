// SPDX-License-Identifier: MIT OR Apache-2.0

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration for a group store instance.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// Name of the table or collection holding group records.
    pub(crate) groups_table: String,

    /// Maximum number of connections a pooled store backend may open.
    pub(crate) max_connections: u32,
}

impl Config {
    pub fn new(groups_table: &str) -> Self {
        Self {
            groups_table: groups_table.to_owned(),
            max_connections: 16,
        }
    }

    /// Reads the table name from the `GROUPS_TABLE` environment variable.
    pub fn from_env() -> Result<Self, ConfigError> {
        let groups_table =
            std::env::var("GROUPS_TABLE").map_err(|_| ConfigError::MissingGroupsTable)?;
        Ok(Self::new(&groups_table))
    }

    pub fn groups_table(&self) -> &str {
        &self.groups_table
    }

    pub fn max_connections(&self) -> u32 {
        self.max_connections
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("GROUPS_TABLE environment variable is not set")]
    MissingGroupsTable,
}
