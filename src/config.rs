use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::fee::DEFAULT_FEE_PER_BYTE;
use crate::submit::DuplicateMatcher;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
	pub node: NodeConfig,
	pub fees: FeeConfig,
	pub submit: SubmitConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeConfig {
	pub url: String,
	pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeConfig {
	/// Fee rate used for coin types no quote was ever set for.
	pub default_fee_per_byte: u64,
}

/// How "already known" node errors are told apart from genuine
/// rejections.  The node's error vocabulary varies between versions,
/// so both lists are operator-tunable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitConfig {
	pub duplicate_codes: Vec<String>,
	pub duplicate_phrases: Vec<String>,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			node: NodeConfig {
				url: "http://127.0.0.1:9888".into(),
				timeout_secs: 30,
			},
			fees: FeeConfig {
				default_fee_per_byte: DEFAULT_FEE_PER_BYTE,
			},
			submit: SubmitConfig {
				duplicate_codes: Vec::new(),
				duplicate_phrases: vec![
					"already know".into(),
					"already in".into(),
					"duplicate".into(),
				],
			},
		}
	}
}

impl Config {
	/// Directory where CLI state is stored (~/.btm-contract/).
	pub fn dir() -> PathBuf {
		dirs::home_dir()
			.expect("could not determine home directory")
			.join(".btm-contract")
	}

	/// Path to the config file.
	pub fn path() -> PathBuf {
		Self::dir().join("config.toml")
	}

	/// Load config from disk, falling back to defaults if no file exists.
	pub fn load() -> anyhow::Result<Self> {
		let path = Self::path();
		if path.exists() {
			let content = std::fs::read_to_string(&path)?;
			Ok(toml::from_str(&content)?)
		} else {
			Ok(Self::default())
		}
	}

	/// Persist the current config to disk, creating the directory if needed.
	pub fn save(&self) -> anyhow::Result<()> {
		let path = Self::path();
		if let Some(parent) = path.parent() {
			std::fs::create_dir_all(parent)?;
		}
		std::fs::write(&path, toml::to_string_pretty(self)?)?;
		Ok(())
	}

	pub fn request_timeout(&self) -> std::time::Duration {
		std::time::Duration::from_secs(self.node.timeout_secs)
	}

	pub fn duplicate_matcher(&self) -> DuplicateMatcher {
		DuplicateMatcher::new(
			self.submit.duplicate_codes.clone(),
			self.submit.duplicate_phrases.clone(),
		)
	}
}
