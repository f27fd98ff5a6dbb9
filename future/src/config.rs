//! Behaviour knobs for [`Deferred::make_with`](crate::Deferred::make_with).
//!
//! ```toml
//! # rail.toml
//! resolve_policy = "reject"   # or "ignore" (default)
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What a [`Resolver`](crate::Resolver) does when asked to settle a Deferred
/// that already holds a value. The first value wins under both policies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolvePolicy {
    /// Silently drop the second value and report success.
    #[default]
    Ignore,
    /// Hand the second value back as [`AlreadySettled`](crate::AlreadySettled).
    Reject,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DeferredConfig {
    pub resolve_policy: ResolvePolicy,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

impl DeferredConfig {
    #[must_use]
    pub fn with_resolve_policy(mut self, policy: ResolvePolicy) -> Self {
        self.resolve_policy = policy;
        self
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), policy = ?config.resolve_policy, "Loaded deferred config");
        Ok(config)
    }
}
