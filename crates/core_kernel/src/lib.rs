//! Core Kernel - Foundational types for the password policy store
//!
//! This crate provides the building blocks shared by the domain and
//! infrastructure crates:
//! - Strongly-typed identifiers
//! - The common error type
//! - Port infrastructure for the ports-and-adapters layout

pub mod identifiers;
pub mod error;
pub mod ports;

pub use identifiers::PasswordPolicyId;
pub use error::CoreError;
pub use ports::{
    PortError, DomainPort, HealthCheckable, HealthCheckResult, AdapterHealth,
};
