//! Observability module - request IDs and per-request root spans.

mod request_id;
mod root_span;

pub use request_id::{RequestId, RequestIdMiddleware};
pub use root_span::{ServiceName, ServiceRootSpan};
