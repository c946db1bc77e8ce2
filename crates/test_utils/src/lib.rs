//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! password policy store test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built policy requests and timestamps
//! - `builders`: Builder for fully formed `PasswordPolicy` records
//! - `database`: PostgreSQL test containers with migrations applied
//! - `assertions`: Assertion helpers for policy listings
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod database;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use database::*;
pub use assertions::*;
pub use generators::*;
