use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::PipelineError;
use crate::fee::{CoinType, FeeStore};
use crate::rpc::Transport;

/// Caller-supplied description of a transaction's intended actions
/// (spends, issuances, control-program outputs, contract invocations).
///
/// The document is treated as opaque: a spec referencing raw bytecode
/// the node never compiled for us is passed through untouched.  The
/// builder clones it to attach the fee quote, so the caller's copy is
/// never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BuildSpec(Map<String, Value>);

impl BuildSpec {
	/// Wrap a caller document, which must be a JSON object so the fee
	/// quote has somewhere to go.
	pub fn from_value(value: Value) -> Result<Self, PipelineError> {
		match value {
			Value::Object(map) => Ok(Self(map)),
			other => Err(PipelineError::InvalidArgument(format!(
				"build spec must be a JSON object, got {other}"
			))),
		}
	}

	pub fn as_object(&self) -> &Map<String, Value> {
		&self.0
	}
}

/// Node-built transaction, raw or partially signed, with whatever
/// metadata (inputs, outputs, fee) the node attached for inspection
/// before signing and submission.  Opaque but serializable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionDescriptor(Value);

impl TransactionDescriptor {
	pub fn from_value(value: Value) -> Result<Self, PipelineError> {
		if !value.is_object() {
			return Err(PipelineError::Protocol(format!(
				"transaction descriptor must be a JSON object, got {value}"
			)));
		}
		Ok(Self(value))
	}

	pub fn as_value(&self) -> &Value {
		&self.0
	}

	/// The node-assigned transaction id, if the descriptor carries one.
	pub fn transaction_id(&self) -> Option<&str> {
		["transaction_id", "tx_id", "hash"]
			.iter()
			.find_map(|key| self.0.get(key).and_then(Value::as_str))
	}
}

/// Build a transaction on the node from `spec`, priced at the fee
/// store's current quote for `coin`.
///
/// The quote is snapshotted once per call; the node does the actual
/// fee arithmetic, since only it knows the serialized byte size.  Node
/// rejections (unresolvable inputs, insufficient value, malformed
/// actions) surface verbatim and are not retried; a connection failure
/// leaves the whole build safe to repeat.
pub async fn build(
	transport: &dyn Transport,
	fees: &FeeStore,
	spec: &BuildSpec,
	coin: CoinType,
) -> Result<TransactionDescriptor, PipelineError> {
	let quote = fees.get_fee(coin);

	let mut payload = spec.0.clone();
	payload.insert("fee_per_byte".into(), quote.fee_per_byte.into());

	let data = transport
		.call("build-transaction", &Value::Object(payload))
		.await
		.map_err(|e| e.into_stage(PipelineError::Build))?;

	TransactionDescriptor::from_value(data)
}
