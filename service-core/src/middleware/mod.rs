pub mod json;
pub mod metrics;
pub mod security_headers;
pub mod tracing;

pub use self::json::JsonBody;
pub use self::metrics::metrics_middleware;
pub use self::security_headers::security_headers_middleware;
pub use self::tracing::{REQUEST_ID_HEADER, make_request_span, request_id_middleware};
