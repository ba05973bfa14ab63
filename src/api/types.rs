/*!
 * JSON-RPC Types
 * Envelope, parameter records and error codes for the /filesystem endpoint
 */

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::vfs::FsError;

pub const JSONRPC_VERSION: &str = "2.0";

/// Standard and service-specific JSON-RPC error codes
pub mod codes {
    pub const PARSE_ERROR: i64 = -32700;
    pub const INVALID_REQUEST: i64 = -32600;
    pub const METHOD_NOT_FOUND: i64 = -32601;
    pub const INVALID_PARAMS: i64 = -32602;
    pub const INTERNAL_ERROR: i64 = -32603;
    pub const NOT_FOUND: i64 = -32001;
    pub const ALREADY_EXISTS: i64 = -32002;
}

/// Error object carried in a failed response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RpcError {
    pub code: i64,
    pub message: String,
}

impl RpcError {
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn parse_error(detail: impl fmt::Display) -> Self {
        Self::new(codes::PARSE_ERROR, format!("Parse error: {}", detail))
    }

    pub fn invalid_request(detail: impl fmt::Display) -> Self {
        Self::new(codes::INVALID_REQUEST, format!("Invalid request: {}", detail))
    }

    pub fn method_not_found(method: &str) -> Self {
        Self::new(
            codes::METHOD_NOT_FOUND,
            format!("Method not found: {}", method),
        )
    }

    pub fn invalid_params(detail: impl fmt::Display) -> Self {
        Self::new(
            codes::INVALID_PARAMS,
            format!("Invalid parameters: {}", detail),
        )
    }

    pub fn internal(detail: impl fmt::Display) -> Self {
        Self::new(codes::INTERNAL_ERROR, format!("Internal error: {}", detail))
    }
}

impl From<FsError> for RpcError {
    fn from(err: FsError) -> Self {
        match err {
            FsError::NotFound(_) => RpcError::new(codes::NOT_FOUND, err.to_string()),
            FsError::AlreadyExists(_) => RpcError::new(codes::ALREADY_EXISTS, err.to_string()),
            FsError::InvalidPath(_) => RpcError::invalid_params(err),
            FsError::IoFailure(_) => RpcError::internal(err),
        }
    }
}

/// Result or error half of a response; exactly one is serialized
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum RpcOutcome {
    #[serde(rename = "result")]
    Result(Value),
    #[serde(rename = "error")]
    Error(RpcError),
}

/// One JSON-RPC 2.0 response
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RpcResponse {
    pub jsonrpc: &'static str,
    #[serde(flatten)]
    pub outcome: RpcOutcome,
    pub id: Value,
}

impl RpcResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            outcome: RpcOutcome::Result(result),
            id,
        }
    }

    pub fn failure(id: Value, error: RpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION,
            outcome: RpcOutcome::Error(error),
            id,
        }
    }

    /// Error object if this response is a failure
    pub fn error(&self) -> Option<&RpcError> {
        match &self.outcome {
            RpcOutcome::Error(e) => Some(e),
            RpcOutcome::Result(_) => None,
        }
    }
}

/// Body of an HTTP reply: one response or a batch
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum RpcReply {
    Single(RpcResponse),
    Batch(Vec<RpcResponse>),
}

/// Request envelope after structural checks
#[derive(Debug, Clone)]
pub struct RpcRequest {
    pub method: String,
    pub params: Option<Value>,
    pub id: Value,
    /// No `id` member at all; the caller expects no reply
    pub notification: bool,
}

impl RpcRequest {
    /// Validate the envelope of one decoded request object
    ///
    /// On failure the id (when recoverable) is returned with the error so the
    /// reply can still be correlated.
    pub fn from_value(value: Value) -> Result<Self, (Value, RpcError)> {
        let Value::Object(mut fields) = value else {
            return Err((Value::Null, RpcError::invalid_request("expected an object")));
        };

        let notification = !fields.contains_key("id");
        let id = fields.remove("id").unwrap_or(Value::Null);
        if !matches!(id, Value::Null | Value::String(_) | Value::Number(_)) {
            return Err((
                Value::Null,
                RpcError::invalid_request("id must be a string, number or null"),
            ));
        }

        match fields.get("jsonrpc") {
            Some(Value::String(v)) if v == JSONRPC_VERSION => {}
            _ => {
                return Err((
                    id,
                    RpcError::invalid_request("jsonrpc must be \"2.0\""),
                ))
            }
        }

        let method = match fields.remove("method") {
            Some(Value::String(method)) => method,
            _ => return Err((id, RpcError::invalid_request("method must be a string"))),
        };

        Ok(Self {
            method,
            params: fields.remove("params"),
            id,
            notification,
        })
    }

    /// Id rendered for logs
    pub fn id_label(&self) -> String {
        match &self.id {
            Value::Null => "null".to_string(),
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    /// Decode params into a typed record
    ///
    /// Accepts a named-parameter object or a positional array holding exactly
    /// that object.
    pub fn decode_params<T>(&self) -> Result<T, RpcError>
    where
        T: for<'de> Deserialize<'de>,
    {
        let object = match &self.params {
            Some(Value::Object(_)) => self.params.clone(),
            Some(Value::Array(items)) if items.len() == 1 => Some(items[0].clone()),
            Some(Value::Array(items)) => {
                return Err(RpcError::invalid_params(format!(
                    "expected one positional parameter, got {}",
                    items.len()
                )))
            }
            Some(Value::Null) | None => None,
            Some(_) => return Err(RpcError::invalid_params("params must be an object")),
        };

        let object = object.ok_or_else(|| RpcError::invalid_params("params are missing"))?;
        serde_json::from_value(object).map_err(RpcError::invalid_params)
    }
}

/// `getFileInfo`, `listChildren`, `delete`
#[derive(Debug, Clone, Deserialize)]
pub struct PathParams {
    pub path: Option<String>,
}

/// `create`
#[derive(Debug, Clone, Deserialize)]
pub struct CreateParams {
    pub path: Option<String>,
    #[serde(default)]
    pub directory: bool,
}

/// `move`, `copy`
#[derive(Debug, Clone, Deserialize)]
pub struct TransferParams {
    pub source: Option<String>,
    pub destination: Option<String>,
}

/// `append`
#[derive(Debug, Clone, Deserialize)]
pub struct AppendParams {
    pub path: Option<String>,
    pub data: Option<String>,
}

/// `read`
///
/// Signed so out-of-range values reach validation instead of failing decode.
#[derive(Debug, Clone, Deserialize)]
pub struct ReadParams {
    pub path: Option<String>,
    #[serde(default)]
    pub offset: i64,
    pub length: Option<i64>,
}

/// `read` result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadResult {
    pub data: String,
}
