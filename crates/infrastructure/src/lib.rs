//! Courier Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer, plus settings loading.

pub mod adapters;
pub mod persistence;
pub mod serialization;
pub mod settings;

pub use adapters::{ReqwestHttpClient, SystemClock};
pub use persistence::FileStorage;
pub use serialization::{SerializationError, from_json, to_json_stable};
pub use settings::{Settings, SettingsError, SettingsOverrides};
