/*!
 * Filesystem method handlers
 * Field validation, then one engine call on the blocking pool
 */

use serde::Serialize;
use serde_json::Value;
use tracing::{error, Span};

use crate::api::types::{
    AppendParams, CreateParams, PathParams, ReadParams, ReadResult, RpcError, RpcRequest,
    TransferParams,
};
use crate::engine::FileEngine;
use crate::vfs::FsResult;

/// Require a present, non-blank string field
fn require_non_blank(value: Option<String>, field: &str) -> Result<String, RpcError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(RpcError::invalid_params(format!(
            "{} must not be blank",
            field
        ))),
    }
}

fn require_present<T>(value: Option<T>, field: &str) -> Result<T, RpcError> {
    value.ok_or_else(|| RpcError::invalid_params(format!("{} must not be null", field)))
}

/// Run one engine call off the async workers and encode its result
async fn run_blocking<T, F>(engine: &FileEngine, call: F) -> Result<Value, RpcError>
where
    T: Serialize + Send + 'static,
    F: FnOnce(FileEngine) -> FsResult<T> + Send + 'static,
{
    let engine = engine.clone();
    // Keep engine spans under the request span on the blocking thread
    let parent = Span::current();
    let outcome = tokio::task::spawn_blocking(move || parent.in_scope(|| call(engine)))
        .await
        .map_err(|e| {
            error!(error = %e, "engine task failed");
            RpcError::internal("engine task failed")
        })?;

    let value = outcome.map_err(RpcError::from)?;
    serde_json::to_value(value).map_err(RpcError::internal)
}

/// `getFileInfo`; a blank path addresses the sandbox root
pub async fn handle_get_file_info(
    engine: &FileEngine,
    request: &RpcRequest,
) -> Result<Value, RpcError> {
    let params: PathParams = request.decode_params()?;
    let path = require_present(params.path, "path")?;
    run_blocking(engine, move |engine| engine.get_info(&path)).await
}

/// `listChildren`; a blank path addresses the sandbox root
pub async fn handle_list_children(
    engine: &FileEngine,
    request: &RpcRequest,
) -> Result<Value, RpcError> {
    let params: PathParams = request.decode_params()?;
    let path = require_present(params.path, "path")?;
    run_blocking(engine, move |engine| engine.list_children(&path)).await
}

pub async fn handle_create(engine: &FileEngine, request: &RpcRequest) -> Result<Value, RpcError> {
    let params: CreateParams = request.decode_params()?;
    let path = require_non_blank(params.path, "path")?;
    let directory = params.directory;
    run_blocking(engine, move |engine| engine.create(&path, directory)).await
}

pub async fn handle_delete(engine: &FileEngine, request: &RpcRequest) -> Result<Value, RpcError> {
    let params: PathParams = request.decode_params()?;
    let path = require_non_blank(params.path, "path")?;
    run_blocking(engine, move |engine| engine.delete(&path)).await
}

pub async fn handle_move(engine: &FileEngine, request: &RpcRequest) -> Result<Value, RpcError> {
    let params: TransferParams = request.decode_params()?;
    let source = require_non_blank(params.source, "source")?;
    let destination = require_non_blank(params.destination, "destination")?;
    run_blocking(engine, move |engine| engine.move_entry(&source, &destination)).await
}

pub async fn handle_copy(engine: &FileEngine, request: &RpcRequest) -> Result<Value, RpcError> {
    let params: TransferParams = request.decode_params()?;
    let source = require_non_blank(params.source, "source")?;
    let destination = require_non_blank(params.destination, "destination")?;
    run_blocking(engine, move |engine| engine.copy_entry(&source, &destination)).await
}

pub async fn handle_append(engine: &FileEngine, request: &RpcRequest) -> Result<Value, RpcError> {
    let params: AppendParams = request.decode_params()?;
    let path = require_non_blank(params.path, "path")?;
    let data = require_present(params.data, "data")?;
    run_blocking(engine, move |engine| engine.append(&path, &data)).await
}

pub async fn handle_read(engine: &FileEngine, request: &RpcRequest) -> Result<Value, RpcError> {
    let params: ReadParams = request.decode_params()?;
    let path = require_non_blank(params.path, "path")?;

    let offset = u64::try_from(params.offset)
        .map_err(|_| RpcError::invalid_params("offset must not be negative"))?;
    let length = require_present(params.length, "length")?;
    let length = match u32::try_from(length) {
        Ok(n) if n > 0 => n,
        _ => {
            return Err(RpcError::invalid_params(format!(
                "length must be between 1 and {}",
                u32::MAX
            )))
        }
    };

    run_blocking(engine, move |engine| {
        engine
            .read(&path, offset, length)
            .map(|data| ReadResult { data })
    })
    .await
}
