//! HTTP response domain types

pub(crate) mod spec;

pub use spec::{ApiResponse, ResponseData, StatusClass, format_duration};
