/*!
 * Handler implementations for JSON-RPC filesystem methods
 */

pub mod dispatch;
pub mod fs_handlers;

pub use dispatch::RpcDispatcher;
