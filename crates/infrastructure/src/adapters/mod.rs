//! Port adapters

mod reqwest_client;
mod system_clock;

pub use reqwest_client::{DEFAULT_MAX_REDIRECTS, DEFAULT_USER_AGENT, ReqwestHttpClient};
pub use system_clock::SystemClock;
