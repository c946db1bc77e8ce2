//! Password policy records
//!
//! `PasswordPolicy` mirrors one row of the policy store. The write request
//! types describe what an administration layer may submit; the store assigns
//! the identifier and both timestamps.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::PasswordPolicyId;

/// A named, prioritized rule record governing password acceptability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PasswordPolicy {
    /// Store-assigned identifier
    pub id: PasswordPolicyId,
    /// Lookup key, unique across the store (e.g. "minLength")
    pub key: String,
    /// Human readable name
    pub name: String,
    pub description: Option<String>,
    /// Opaque rule document interpreted by policy consumers
    pub validation_rules: serde_json::Value,
    /// Evaluation order among required policies, lower first
    pub priority: i32,
    /// Whether the policy must be enforced
    pub required: bool,
    pub created_by: Option<String>,
    pub create_date: DateTime<Utc>,
    pub updated_by: Option<String>,
    /// Last modification time, source of the freshness watermark
    pub update_date: DateTime<Utc>,
}

impl PasswordPolicy {
    /// Orders policies the way the store lists required policies:
    /// ascending priority, ties broken by identifier
    pub fn priority_order(a: &PasswordPolicy, b: &PasswordPolicy) -> std::cmp::Ordering {
        a.priority.cmp(&b.priority).then_with(|| a.id.cmp(&b.id))
    }
}

/// Request for creating a password policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct NewPasswordPolicy {
    #[validate(length(min = 1, max = 255))]
    pub key: String,
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    pub description: Option<String>,
    pub validation_rules: serde_json::Value,
    #[validate(range(min = 0))]
    pub priority: i32,
    pub required: bool,
    #[validate(length(max = 255))]
    pub created_by: Option<String>,
}

impl NewPasswordPolicy {
    /// Creates a non-required request with an empty rule document
    pub fn new(key: impl Into<String>, name: impl Into<String>, priority: i32) -> Self {
        Self {
            key: key.into(),
            name: name.into(),
            description: None,
            validation_rules: serde_json::Value::Object(serde_json::Map::new()),
            priority,
            required: false,
            created_by: None,
        }
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_rules(mut self, rules: serde_json::Value) -> Self {
        self.validation_rules = rules;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn created_by(mut self, actor: impl Into<String>) -> Self {
        self.created_by = Some(actor.into());
        self
    }
}

/// Partial update of a password policy
///
/// Fields left as `None` keep their stored value. The key is immutable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct UpdatePasswordPolicy {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub validation_rules: Option<serde_json::Value>,
    #[validate(range(min = 0))]
    pub priority: Option<i32>,
    pub required: Option<bool>,
    #[validate(length(max = 255))]
    pub updated_by: Option<String>,
}

impl UpdatePasswordPolicy {
    /// Returns true if the update would not change any policy field
    ///
    /// `updated_by` only names the actor and does not count as a change.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.validation_rules.is_none()
            && self.priority.is_none()
            && self.required.is_none()
    }

    /// Applies the update to an in-memory record, stamping `update_date`
    pub fn apply_to(&self, policy: &mut PasswordPolicy, now: DateTime<Utc>) {
        if let Some(ref name) = self.name {
            policy.name = name.clone();
        }
        if let Some(ref description) = self.description {
            policy.description = Some(description.clone());
        }
        if let Some(ref rules) = self.validation_rules {
            policy.validation_rules = rules.clone();
        }
        if let Some(priority) = self.priority {
            policy.priority = priority;
        }
        if let Some(required) = self.required {
            policy.required = required;
        }
        if self.updated_by.is_some() {
            policy.updated_by = self.updated_by.clone();
        }
        policy.update_date = now;
    }
}
