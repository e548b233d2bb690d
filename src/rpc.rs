use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{ConnectReason, RpcError};

/// Default per-call deadline when the config does not override it.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// A single named call against the remote node.
///
/// Implementations perform no caching and no retries; every call
/// re-contacts the node, and retry policy belongs to the caller.
#[async_trait]
pub trait Transport: Send + Sync {
	async fn call(&self, method: &str, params: &Value) -> Result<Value, RpcError>;
}

/// HTTP client for the node's JSON API.
///
/// Each method is a POST to `{base_url}/{method}` with the parameter
/// document as the body.  The node wraps every response in an envelope
/// `{status, code, msg, error_detail, data}`; `parse_envelope` unpacks
/// it into the success/failure split callers see.
pub struct RpcClient {
	url: String,
	http: reqwest::Client,
	timeout: Duration,
}

impl RpcClient {
	pub fn new(url: &str) -> Self {
		Self::with_timeout(url, DEFAULT_TIMEOUT)
	}

	pub fn with_timeout(url: &str, timeout: Duration) -> Self {
		Self {
			url: url.trim_end_matches('/').to_owned(),
			http: reqwest::Client::new(),
			timeout,
		}
	}

	pub fn url(&self) -> &str {
		&self.url
	}

	/// Like `Transport::call`, but resolves early when `cancel` fires.
	/// A cancelled call reports `Connection` with a cancellation
	/// reason and is never retried here.
	pub async fn call_with_cancel<F>(
		&self,
		method: &str,
		params: &Value,
		cancel: F,
	) -> Result<Value, RpcError>
	where
		F: Future<Output = ()> + Send,
	{
		tokio::select! {
			_ = cancel => Err(RpcError::Connection {
				reason: ConnectReason::Cancelled,
				detail: format!("{method} call cancelled by caller"),
			}),
			result = self.call_inner(method, params) => result,
		}
	}

	async fn call_inner(&self, method: &str, params: &Value) -> Result<Value, RpcError> {
		let endpoint = format!("{}/{}", self.url, method);

		let response = self
			.http
			.post(&endpoint)
			.timeout(self.timeout)
			.json(params)
			.send()
			.await
			.map_err(classify_transport_error)?;

		let body: Value = response
			.json()
			.await
			.map_err(|e| RpcError::Protocol(format!("response body is not JSON: {e}")))?;

		parse_envelope(body)
	}
}

#[async_trait]
impl Transport for RpcClient {
	async fn call(&self, method: &str, params: &Value) -> Result<Value, RpcError> {
		self.call_inner(method, params).await
	}
}

// -- Private helpers --

fn classify_transport_error(err: reqwest::Error) -> RpcError {
	let reason = if err.is_timeout() {
		ConnectReason::Timeout
	} else {
		ConnectReason::Transport
	};
	RpcError::Connection {
		reason,
		detail: err.to_string(),
	}
}

/// Unpack the node's response envelope.
///
/// `status == "success"` yields the `data` document (which may be
/// absent for bare acks).  `status == "fail"` yields the node's own
/// error, message taken from `msg` with `error_detail` as fallback.
/// Anything else is a schema mismatch, not a node verdict.
fn parse_envelope(body: Value) -> Result<Value, RpcError> {
	match body.get("status").and_then(Value::as_str) {
		Some("success") => Ok(body.get("data").cloned().unwrap_or(Value::Null)),
		Some("fail") => {
			let code = body
				.get("code")
				.and_then(Value::as_str)
				.unwrap_or("")
				.to_owned();
			let message = body
				.get("msg")
				.and_then(Value::as_str)
				.or_else(|| body.get("error_detail").and_then(Value::as_str))
				.unwrap_or("")
				.to_owned();
			Err(RpcError::Node { code, message })
		}
		_ => Err(RpcError::Protocol(format!(
			"unrecognized response envelope: {body}"
		))),
	}
}
