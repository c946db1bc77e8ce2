//! Repository implementations
//!
//! Repositories encapsulate SQL queries and map between database rows and
//! domain types.
//!
//! # Architecture
//!
//! Each repository follows these principles:
//! - Every query is an explicit, parameterized SQL string bound to a named method
//! - Rows are decoded with `sqlx::FromRow`
//! - The pool is injected through the constructor

pub mod password_policy;

pub use password_policy::{PasswordPolicyRepository, PasswordPolicyRow};
