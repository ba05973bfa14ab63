/*!
 * Monitoring
 * Structured tracing for file operations and RPC requests
 */

mod tracer;

pub use tracer::{
    generate_trace_id, init_tracing, span_operation, span_request, OperationSpan, RequestSpan,
};
