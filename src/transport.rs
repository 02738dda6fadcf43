//! HTTP transport: URL resolution, header merging and error normalization.

mod http;

pub use http::{HttpTransport, RequestOptions, TransportError, REQUEST_ID_HEADER};
