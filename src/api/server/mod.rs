/*!
 * Server Module
 * HTTP transport for the JSON-RPC endpoint
 */

pub mod http_server;

pub use http_server::{router, serve, shutdown_signal};
