//! Infrastructure Database Layer
//!
//! This crate provides PostgreSQL access for the password policy store using
//! SQLx.
//!
//! # Architecture
//!
//! The crate follows the repository pattern: `PasswordPolicyRepository`
//! holds the hand-written SQL and maps rows, and
//! `PostgresPasswordPolicyAdapter` exposes it through the domain's
//! `PasswordPolicyPort`. The connection pool is created once and handed to
//! both explicitly.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, run_migrations, DatabaseConfig, PostgresPasswordPolicyAdapter};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/password_policies")).await?;
//! run_migrations(&pool).await?;
//! let port = PostgresPasswordPolicyAdapter::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod migrate;
pub mod repositories;
pub mod adapters;

pub use pool::{DatabasePool, create_pool, DatabaseConfig};
pub use error::DatabaseError;
pub use migrate::run_migrations;
pub use repositories::{PasswordPolicyRepository, PasswordPolicyRow};
pub use adapters::PostgresPasswordPolicyAdapter;
