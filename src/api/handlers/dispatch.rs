/*!
 * JSON-RPC Dispatcher
 * Decodes request bodies, routes methods and assembles replies
 */

use serde_json::Value;
use tracing::{debug, warn, Instrument};

use super::fs_handlers::*;
use crate::api::types::{codes, RpcError, RpcReply, RpcRequest, RpcResponse};
use crate::engine::FileEngine;
use crate::monitoring::span_request;

/// Method names served on the endpoint
pub const METHODS: &[&str] = &[
    "getFileInfo",
    "listChildren",
    "create",
    "delete",
    "move",
    "copy",
    "append",
    "read",
];

/// Routes decoded requests to the file engine
#[derive(Debug, Clone)]
pub struct RpcDispatcher {
    engine: FileEngine,
}

impl RpcDispatcher {
    pub fn new(engine: FileEngine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &FileEngine {
        &self.engine
    }

    /// Handle one raw HTTP body
    ///
    /// Batches are answered element by element, in order. Returns `None` when
    /// every request in the body was a notification.
    pub async fn handle_body(&self, body: &[u8]) -> Option<RpcReply> {
        let value: Value = match serde_json::from_slice(body) {
            Ok(value) => value,
            Err(e) => {
                debug!(error = %e, "unparseable request body");
                return Some(RpcReply::Single(RpcResponse::failure(
                    Value::Null,
                    RpcError::parse_error(e),
                )));
            }
        };

        match value {
            Value::Array(items) if items.is_empty() => Some(RpcReply::Single(
                RpcResponse::failure(Value::Null, RpcError::invalid_request("empty batch")),
            )),
            Value::Array(items) => {
                let mut replies = Vec::with_capacity(items.len());
                for item in items {
                    replies.extend(self.handle_value(item).await);
                }
                (!replies.is_empty()).then_some(RpcReply::Batch(replies))
            }
            single => self.handle_value(single).await.map(RpcReply::Single),
        }
    }

    /// Handle one decoded request object
    ///
    /// Malformed envelopes are always answered, even without an id.
    pub async fn handle_value(&self, value: Value) -> Option<RpcResponse> {
        match RpcRequest::from_value(value) {
            Ok(request) => self.handle_request(request).await,
            Err((id, error)) => {
                debug!(code = error.code, "malformed request envelope");
                Some(RpcResponse::failure(id, error))
            }
        }
    }

    /// Run one request; notifications are executed but get no response
    pub async fn handle_request(&self, request: RpcRequest) -> Option<RpcResponse> {
        let span = span_request(&request.method, &request.id_label());

        let outcome = self.call(&request).instrument(span.span().clone()).await;
        let _entered = span.enter();
        let response = match outcome {
            Ok(result) => {
                span.record_success();
                RpcResponse::success(request.id, result)
            }
            Err(error) => {
                span.record_error(error.code);
                if error.code == codes::INTERNAL_ERROR {
                    warn!(method = %request.method, message = %error.message, "request failed");
                }
                RpcResponse::failure(request.id, error)
            }
        };

        if request.notification {
            debug!(method = %request.method, "notification handled, no reply");
            return None;
        }
        Some(response)
    }

    async fn call(&self, request: &RpcRequest) -> Result<Value, RpcError> {
        let engine = &self.engine;
        match request.method.as_str() {
            "getFileInfo" => handle_get_file_info(engine, request).await,
            "listChildren" => handle_list_children(engine, request).await,
            "create" => handle_create(engine, request).await,
            "delete" => handle_delete(engine, request).await,
            "move" => handle_move(engine, request).await,
            "copy" => handle_copy(engine, request).await,
            "append" => handle_append(engine, request).await,
            "read" => handle_read(engine, request).await,
            other => Err(RpcError::method_not_found(other)),
        }
    }
}
