/*!
 * API Module
 * JSON-RPC 2.0 surface over HTTP
 */

pub mod handlers;
pub mod server;
pub mod types;

pub use handlers::RpcDispatcher;
pub use server::{router, serve, shutdown_signal};
pub use types::{codes, RpcError, RpcReply, RpcRequest, RpcResponse};
