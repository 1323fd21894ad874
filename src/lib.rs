//! InvSys application library
//!
//! The sixteen route modules and the startup sequence that wires them to the
//! database and the HTTP server.

pub mod modules;
pub mod server;

pub use server::{build_registry, connect, prepare_database, serve};
