//! Password Policy Domain
//!
//! This crate owns the password policy record and the read port through which
//! the rest of the system reaches the policy store.
//!
//! A password policy is a named, prioritized rule record. Policies flagged as
//! `required` are enforced in ascending `priority` order; the latest
//! `update_date` across all policies acts as a freshness watermark that
//! consumers compare against to decide whether their view is stale.
//!
//! The rule document carried by each policy (`validation_rules`) is opaque
//! here: this crate stores and returns it, it does not evaluate it.
//!
//! # Examples
//!
//! ```rust
//! use domain_password_policy::NewPasswordPolicy;
//! use serde_json::json;
//!
//! let request = NewPasswordPolicy::new("minLength", "Minimum length", 1)
//!     .required(true)
//!     .with_rules(json!({ "minLength": 12 }));
//!
//! assert!(domain_password_policy::validation::validate_new(&request).is_ok());
//! ```

pub mod policy;
pub mod error;
pub mod validation;
pub mod ports;
pub mod cache;

pub use policy::{PasswordPolicy, NewPasswordPolicy, UpdatePasswordPolicy};
pub use error::PolicyError;
pub use ports::{PasswordPolicyPort, PasswordPolicyPortExt};
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::InMemoryPasswordPolicyPort;
pub use cache::RequiredPolicyCache;
