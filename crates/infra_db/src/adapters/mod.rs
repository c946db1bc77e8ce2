//! Domain Adapters
//!
//! This module provides adapter implementations for domain ports,
//! connecting domain interfaces to the PostgreSQL database layer.
//!
//! # Usage
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresPasswordPolicyAdapter;
//! use domain_password_policy::PasswordPolicyPort;
//!
//! let adapter = PostgresPasswordPolicyAdapter::new(pool);
//! let policy = adapter.find_by_key("minLength").await?;
//! ```

pub mod password_policy;

pub use password_policy::PostgresPasswordPolicyAdapter;
