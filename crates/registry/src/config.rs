//! Page configuration.
//!
//! Both policies default to the loss-free behavior: pre-registry submissions are
//! queued and merges append. Configuration is read from TOML:
//!
//! ```toml
//! pending = "last-write-wins"
//! merge = "append"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// What happens when several mappings are submitted before the registry exists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PendingPolicy {
	/// Keep every mapping and drain them in arrival order.
	#[default]
	Queue,
	/// Keep only the most recent mapping, as the generated page script does.
	///
	/// Earlier pending mappings are dropped with a warning.
	LastWriteWins,
}

/// How a mapping is combined with what the registry already holds for a key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MergePolicy {
	/// Append the incoming entries after the existing ones.
	#[default]
	Append,
	/// Discard the existing entries for each incoming key.
	Replace,
}

/// Policies a [`Page`](crate::Page) runs with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PageConfig {
	pub pending: PendingPolicy,
	pub merge: MergePolicy,
}

impl PageConfig {
	/// Parses a configuration from TOML. Missing fields take their defaults.
	pub fn from_toml_str(content: &str) -> Result<Self> {
		Ok(toml::from_str(content)?)
	}

	/// Reads and parses a TOML configuration file.
	pub fn load(path: &Path) -> Result<Self> {
		let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		let config = Self::from_toml_str(&content)?;
		tracing::debug!(path = %path.display(), ?config, "loaded page config");
		Ok(config)
	}

	pub fn with_pending(mut self, pending: PendingPolicy) -> Self {
		self.pending = pending;
		self
	}

	pub fn with_merge(mut self, merge: MergePolicy) -> Self {
		self.merge = merge;
		self
	}
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	/// The configuration file could not be read.
	#[error("failed to read {}: {source}", path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// The TOML was malformed or named an unknown field or policy.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
