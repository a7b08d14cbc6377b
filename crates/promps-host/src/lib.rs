//! Promps Host - Configuration, saved macros and command dispatch
//!
//! Wraps `promps-core` for a front-end: commands take JSON-shaped arguments,
//! resolve token sequences from editor chains, DSL text or raw tokens, and
//! return serializable results. The `promps` binary serves these commands
//! over stdin/stdout, one JSON request per line.

pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod macros;
pub mod rpc;
pub mod state;

pub use config::{AppConfig, ConfigError};
pub use error::{CommandError, ErrorBody, Result};
pub use macros::MacroRegistry;
pub use rpc::{dispatch, handle_line, Request, Response};
pub use state::{CatalogState, HostState};
