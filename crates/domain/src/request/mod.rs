//! HTTP request domain types

mod header;
mod method;
mod resolved;
mod snapshot;

pub use header::{Header, Headers};
pub use method::HttpMethod;
pub use resolved::ResolvedRequest;
pub use snapshot::RequestSnapshot;
