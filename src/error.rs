use thiserror::Error;

/// Why a call never produced a node response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectReason {
	/// The per-call deadline elapsed before the node answered.
	Timeout,
	/// The caller's cancellation signal fired mid-flight.
	Cancelled,
	/// Socket/DNS/TLS failure reaching the node.
	Transport,
}

impl std::fmt::Display for ConnectReason {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let s = match self {
			Self::Timeout => "timeout",
			Self::Cancelled => "cancelled",
			Self::Transport => "transport",
		};
		f.write_str(s)
	}
}

/// Transport-tier failure for a single remote call.
///
/// `Connection` is the only retry-safe variant and deliberately carries
/// no node diagnostic; the node never saw (or never answered) the call.
#[derive(Debug, Error)]
pub enum RpcError {
	#[error("node unreachable ({reason}): {detail}")]
	Connection {
		reason: ConnectReason,
		detail: String,
	},

	/// The response did not match the node's wire contract.
	#[error("malformed node response: {0}")]
	Protocol(String),

	/// The node executed the call and reported an application error.
	#[error("node error {code}: {message}")]
	Node { code: String, message: String },
}

impl RpcError {
	/// Lift a transport failure into the stage taxonomy.  Node errors
	/// are wrapped by the per-stage constructor with the diagnostic
	/// passed through verbatim; the other variants map one-to-one.
	pub(crate) fn into_stage(self, wrap: fn(String) -> PipelineError) -> PipelineError {
		match self {
			Self::Connection { reason, detail } => PipelineError::Connection { reason, detail },
			Self::Protocol(msg) => PipelineError::Protocol(msg),
			Self::Node { code, message } => wrap(node_diagnostic(&code, &message)),
		}
	}
}

/// Render a node error as `code: message`, dropping whichever half is empty.
pub(crate) fn node_diagnostic(code: &str, message: &str) -> String {
	match (code.is_empty(), message.is_empty()) {
		(true, _) => message.to_owned(),
		(_, true) => code.to_owned(),
		_ => format!("{code}: {message}"),
	}
}

/// Failure of a pipeline stage, as reported to callers.
///
/// Every variant tells the caller which of three things went wrong:
/// their input (`InvalidArgument`), the node's verdict (`Compilation`,
/// `Build`, `Submission` — node diagnostic verbatim), or the network
/// (`Connection`, which carries no diagnostic at all).
#[derive(Debug, Error)]
pub enum PipelineError {
	#[error("node unreachable ({reason}): {detail}")]
	Connection {
		reason: ConnectReason,
		detail: String,
	},

	#[error("malformed node response: {0}")]
	Protocol(String),

	#[error("compilation failed: {0}")]
	Compilation(String),

	#[error("build failed: {0}")]
	Build(String),

	#[error("submission rejected: {0}")]
	Submission(String),

	/// Local validation failure; the request never reached the network.
	#[error("invalid argument: {0}")]
	InvalidArgument(String),
}

impl PipelineError {
	/// Whether retrying the same call unchanged can possibly succeed.
	/// Only connection failures qualify; everything else needs caller
	/// intervention first.
	pub fn is_retryable(&self) -> bool {
		matches!(self, Self::Connection { .. })
	}
}
