pub mod environment;
pub mod history;
pub mod output;
pub mod send;
pub mod template;
