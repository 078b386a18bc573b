//! This crate is intended to contain code that is required to provide or
//! improve the observability of the tools. That includes initialization logic
//! for logging as well as the command line arguments controlling it.
pub mod arguments;
pub mod config;
pub mod panic_hook;
pub mod tracing;

pub use config::Config;
