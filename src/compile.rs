use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::PipelineError;
use crate::rpc::Transport;

/// One typed argument bound to a contract's declared parameters.
///
/// Serializes externally tagged (`{"string": "..."}` and so on), which
/// is the single-field object shape the node's compile endpoint takes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContractArg {
	Boolean(bool),
	Integer(u64),
	String(String),
}

#[derive(Serialize)]
struct CompileRequest<'a> {
	contract: String,
	/// Absent field, not null: an uninstantiated template is a distinct
	/// accepted input shape on the node side.
	#[serde(skip_serializing_if = "Option::is_none")]
	args: Option<&'a [ContractArg]>,
}

/// Compiled program descriptor returned by the node.  Everything beyond
/// the program body is node metadata we preserve but do not interpret.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompiledProgram {
	pub program: String,
	#[serde(flatten)]
	pub meta: Map<String, Value>,
}

/// Compile contract source on the node, optionally instantiating it
/// with `args`.
///
/// Line breaks in `source` are a file-formatting artifact, not syntax,
/// and are stripped before transmission; the same program reformatted
/// across lines produces a byte-identical request.
pub async fn compile(
	transport: &dyn Transport,
	source: &str,
	args: Option<&[ContractArg]>,
) -> Result<CompiledProgram, PipelineError> {
	let request = CompileRequest {
		contract: source.replace(['\r', '\n'], ""),
		args,
	};
	let payload = serde_json::to_value(&request)
		.map_err(|e| PipelineError::InvalidArgument(format!("compile request: {e}")))?;

	let data = transport
		.call("compile", &payload)
		.await
		.map_err(|e| e.into_stage(PipelineError::Compilation))?;

	serde_json::from_value(data)
		.map_err(|e| PipelineError::Protocol(format!("compile response: {e}")))
}
