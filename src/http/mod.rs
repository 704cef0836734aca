//! HTTP server module.
//!
//! Serves plain HTTP; TLS termination is expected in front of the service.
//! The server includes graceful shutdown on SIGTERM/SIGINT with connection
//! draining.

mod server;
mod shutdown;

pub use server::{start_server, ServerError};
