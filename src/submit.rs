use serde::{Deserialize, Serialize};

use crate::error::{node_diagnostic, PipelineError, RpcError};
use crate::rpc::Transport;
use crate::tx_builder::TransactionDescriptor;

/// Terminal artifact of the pipeline: the id the network knows the
/// broadcast transaction by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionReceipt {
	#[serde(rename = "transaction_id", alias = "tx_id")]
	pub transaction_id: String,
}

/// Recognition rule for node errors that really mean "this transaction
/// was already accepted."
///
/// The node's error vocabulary is not pinned down anywhere we can rely
/// on, so the rule is configuration: exact codes and case-insensitive
/// message substrings, both extendable from the config file.
#[derive(Debug, Clone)]
pub struct DuplicateMatcher {
	codes: Vec<String>,
	phrases: Vec<String>,
}

impl DuplicateMatcher {
	pub fn new(codes: Vec<String>, phrases: Vec<String>) -> Self {
		let phrases = phrases.into_iter().map(|p| p.to_lowercase()).collect();
		Self { codes, phrases }
	}

	pub fn matches(&self, code: &str, message: &str) -> bool {
		if !code.is_empty() && self.codes.iter().any(|c| c == code) {
			return true;
		}
		let message = message.to_lowercase();
		self.phrases.iter().any(|p| message.contains(p))
	}
}

impl Default for DuplicateMatcher {
	fn default() -> Self {
		Self::new(
			Vec::new(),
			vec![
				"already know".into(),
				"already in".into(),
				"duplicate".into(),
			],
		)
	}
}

/// Broadcast a finalized transaction through the node.
///
/// Resubmitting a descriptor the node already accepted is not a fatal
/// error: when the node reports a duplicate (per `matcher`), the call
/// folds into a successful receipt carrying the descriptor's own
/// transaction id, so at-least-once delivery after a masked first
/// success still resolves to the same receipt.  Every other node
/// rejection (malformed transaction, double spend, fee too low)
/// surfaces verbatim as a submission failure.
pub async fn submit(
	transport: &dyn Transport,
	matcher: &DuplicateMatcher,
	tx: &TransactionDescriptor,
) -> Result<SubmissionReceipt, PipelineError> {
	match transport.call("submit-transaction", tx.as_value()).await {
		Ok(data) => serde_json::from_value(data)
			.map_err(|e| PipelineError::Protocol(format!("submit response: {e}"))),
		Err(RpcError::Node { code, message }) if matcher.matches(&code, &message) => {
			match tx.transaction_id() {
				Some(id) => Ok(SubmissionReceipt {
					transaction_id: id.to_owned(),
				}),
				// Duplicate with no recoverable id; nothing useful to
				// hand back, so report the node's verdict instead.
				None => Err(PipelineError::Submission(node_diagnostic(&code, &message))),
			}
		}
		Err(err) => Err(err.into_stage(PipelineError::Submission)),
	}
}
