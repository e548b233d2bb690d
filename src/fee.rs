use std::collections::HashMap;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::PipelineError;
use crate::rpc::Transport;

/// Fallback fee rate for coin types nobody has set a quote for, in the
/// ledger's native unit per byte of serialized transaction.
pub const DEFAULT_FEE_PER_BYTE: u64 = 80;

/// Which asset/ledger a fee quote and transaction apply to.  The codes
/// follow the BIP-44 registry the node uses on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CoinType {
	Bitcoin,
	Testnet3,
	Regtest,
}

impl CoinType {
	pub fn code(&self) -> u32 {
		match self {
			Self::Bitcoin => 0,
			Self::Testnet3 => 1,
			Self::Regtest => 257,
		}
	}

	pub fn as_str(&self) -> &str {
		match self {
			Self::Bitcoin => "bitcoin",
			Self::Testnet3 => "testnet3",
			Self::Regtest => "regtest",
		}
	}
}

impl std::fmt::Display for CoinType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// The current fee rate for one coin type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeQuote {
	pub coin_type: CoinType,
	pub fee_per_byte: u64,
}

/// Live fee-per-byte table, keyed by coin type.
///
/// Constructed once at startup and shared by reference into the
/// transaction builder; an operator command retunes it at runtime
/// without touching build specs.  Quotes are replaced whole under the
/// write lock, so readers always observe a fully-written quote;
/// concurrent writers to the same coin type are last-write-wins.
pub struct FeeStore {
	default_fee: u64,
	quotes: RwLock<HashMap<CoinType, u64>>,
}

impl FeeStore {
	pub fn new() -> Self {
		Self::with_default(DEFAULT_FEE_PER_BYTE)
	}

	pub fn with_default(default_fee: u64) -> Self {
		Self {
			default_fee,
			quotes: RwLock::new(HashMap::new()),
		}
	}

	/// Current quote for `coin`; coin types never set resolve to the
	/// store's default rather than an error.
	pub fn get_fee(&self, coin: CoinType) -> FeeQuote {
		let quotes = self.quotes.read().expect("fee store lock poisoned");
		FeeQuote {
			coin_type: coin,
			fee_per_byte: quotes.get(&coin).copied().unwrap_or(self.default_fee),
		}
	}

	/// Replace the quote for `coin`.  A negative fee is rejected
	/// locally and the prior quote stays in place.
	pub fn set_fee(&self, coin: CoinType, fee_per_byte: i64) -> Result<(), PipelineError> {
		if fee_per_byte < 0 {
			return Err(PipelineError::InvalidArgument(format!(
				"fee per byte must be non-negative, got {fee_per_byte}"
			)));
		}
		let mut quotes = self.quotes.write().expect("fee store lock poisoned");
		quotes.insert(coin, fee_per_byte as u64);
		Ok(())
	}
}

impl Default for FeeStore {
	fn default() -> Self {
		Self::new()
	}
}

// -- Node fee endpoints --

#[derive(Deserialize)]
struct GetFeeResponse {
	current_fee: u64,
}

/// Ask the node for its current fee rate for `coin`.
pub async fn fetch_fee(
	transport: &dyn Transport,
	coin: CoinType,
) -> Result<u64, crate::error::RpcError> {
	let data = transport
		.call("get-fee", &json!({ "coin_type": coin.code() }))
		.await?;
	let resp: GetFeeResponse = serde_json::from_value(data)
		.map_err(|e| crate::error::RpcError::Protocol(format!("get-fee response: {e}")))?;
	Ok(resp.current_fee)
}

/// Push a new fee rate for `coin` to the node.  The node replies with
/// a bare ack; any payload it does send is ignored.
pub async fn push_fee(
	transport: &dyn Transport,
	coin: CoinType,
	fee_per_byte: u64,
) -> Result<(), crate::error::RpcError> {
	transport
		.call(
			"set-fee",
			&json!({ "fee": fee_per_byte, "coin_type": coin.code() }),
		)
		.await?;
	Ok(())
}
