//! Courier Application - Use cases and ports
//!
//! This crate defines the application layer with:
//! - Port traits (storage, HTTP transport, clock)
//! - The request composer and variable interpolation
//! - The dispatcher and the persisted collections built on the store
//! - A session tying them together for a front end

pub mod composer;
pub mod dispatcher;
pub mod environments;
pub mod error;
pub mod history;
pub mod ports;
pub mod session;
pub mod store;
pub mod templates;
pub mod variable_resolver;

#[cfg(test)]
pub(crate) mod testing;

pub use composer::{ComposeError, RequestComposer};
pub use dispatcher::{DispatchError, Dispatcher};
pub use environments::EnvironmentRegistry;
pub use error::{ApplicationError, ApplicationResult};
pub use history::HistoryLedger;
pub use ports::{Clock, HttpClient, HttpClientError, KeyValueStorage, StorageError, TransportResponse};
pub use session::Session;
pub use store::CollectionStore;
pub use templates::TemplateLibrary;
pub use variable_resolver::interpolate;
