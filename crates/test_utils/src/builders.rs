//! Test Data Builders
//!
//! Provides a builder for fully formed `PasswordPolicy` records, for tests
//! that seed the in-memory adapter with exact identifiers and timestamps.

use chrono::{DateTime, Utc};
use core_kernel::PasswordPolicyId;
use domain_password_policy::PasswordPolicy;
use fake::faker::lorem::en::Sentence;
use fake::Fake;
use serde_json::json;

use crate::fixtures::TemporalFixtures;

/// Builder for constructing test policy records
pub struct PasswordPolicyBuilder {
    id: PasswordPolicyId,
    key: String,
    name: String,
    description: Option<String>,
    validation_rules: serde_json::Value,
    priority: i32,
    required: bool,
    create_date: DateTime<Utc>,
    update_date: DateTime<Utc>,
}

impl PasswordPolicyBuilder {
    /// Creates a builder for a non-required policy with the given id and key
    pub fn new(id: i64, key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            id: PasswordPolicyId::new(id),
            name: format!("{} policy", key),
            key,
            description: Some(Sentence(3..8).fake()),
            validation_rules: json!({}),
            priority: 0,
            required: false,
            create_date: TemporalFixtures::epoch(),
            update_date: TemporalFixtures::epoch(),
        }
    }

    /// Sets the priority
    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Marks the policy as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Sets the rule document
    pub fn rules(mut self, rules: serde_json::Value) -> Self {
        self.validation_rules = rules;
        self
    }

    /// Sets the last update time
    pub fn updated_at(mut self, at: DateTime<Utc>) -> Self {
        self.update_date = at;
        self
    }

    /// Builds the record
    pub fn build(self) -> PasswordPolicy {
        PasswordPolicy {
            id: self.id,
            key: self.key,
            name: self.name,
            description: self.description,
            validation_rules: self.validation_rules,
            priority: self.priority,
            required: self.required,
            created_by: Some("builder".to_string()),
            create_date: self.create_date,
            updated_by: None,
            update_date: self.update_date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let policy = PasswordPolicyBuilder::new(7, "minLength").build();

        assert_eq!(policy.id.value(), 7);
        assert_eq!(policy.key, "minLength");
        assert!(!policy.required);
        assert_eq!(policy.update_date, policy.create_date);
        assert!(policy.description.is_some());
    }

    #[test]
    fn test_builder_overrides() {
        let at = TemporalFixtures::ascending_triple().2;
        let policy = PasswordPolicyBuilder::new(1, "maxAge")
            .priority(4)
            .required()
            .rules(json!({ "passwordExpiryDays": 30 }))
            .updated_at(at)
            .build();

        assert_eq!(policy.priority, 4);
        assert!(policy.required);
        assert_eq!(policy.validation_rules["passwordExpiryDays"], 30);
        assert_eq!(policy.update_date, at);
    }
}
