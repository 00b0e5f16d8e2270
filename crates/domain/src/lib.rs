//! Courier Domain - Core business types
//!
//! This crate defines the domain model for the Courier API tester.
//! All types here are pure Rust with no I/O dependencies.

pub mod environment;
pub mod error;
pub mod history;
pub mod id;
pub mod request;
pub mod response;
pub mod state;
pub mod template;

pub use environment::{Environment, Variable};
pub use error::{DomainError, DomainResult};
pub use history::{HistoryFilter, MAX_HISTORY_ENTRIES, RequestHistory, RequestHistoryItem};
pub use id::generate_id;
pub use request::{Header, Headers, HttpMethod, RequestSnapshot, ResolvedRequest};
pub use response::{ApiResponse, ResponseData, StatusClass, format_duration};
pub use state::{RequestErrorKind, RequestState};
pub use template::RequestTemplate;
