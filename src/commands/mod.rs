pub mod compile;
pub mod fee;
pub mod tx;

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::cli::Cli;
use crate::config::Config;
use crate::rpc::RpcClient;

/// Build the node client from the CLI flag or config.
pub fn resolve_rpc(cli: &Cli, config: &Config) -> RpcClient {
	let url = cli.node_url.as_deref().unwrap_or(&config.node.url);
	RpcClient::with_timeout(url, config.request_timeout())
}

/// Read a JSON document from disk.
pub fn read_document(path: &Path) -> Result<Value> {
	let content = std::fs::read_to_string(path)
		.with_context(|| format!("reading {}", path.display()))?;
	serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))
}

/// Write a document to disk the way the node tools do: pretty-printed,
/// keys sorted, and echoed to stdout.
pub fn write_document<T: serde::Serialize>(path: &Path, doc: &T) -> Result<()> {
	// Round-trip through Value so map keys come out sorted.
	let value = serde_json::to_value(doc)?;
	let rendered = serde_json::to_string_pretty(&value)?;
	println!("{rendered}");
	std::fs::write(path, rendered).with_context(|| format!("writing {}", path.display()))?;
	Ok(())
}
