//! Password Policy Store - command line interface
//!
//! Wires configuration, logging, the connection pool, and the Postgres
//! adapter together and exposes the store's read operations as
//! subcommands that print JSON.

pub mod config;
pub mod telemetry;
pub mod cli;

pub use cli::{Cli, Command};
pub use config::{LogFormat, StoreConfig};
