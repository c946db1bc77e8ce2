//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating policy data that respects
//! the store's invariants: unique keys, non-negative priorities.

use chrono::{DateTime, Duration, Utc};
use domain_password_policy::{NewPasswordPolicy, PasswordPolicy};
use proptest::prelude::*;
use serde_json::json;

use crate::builders::PasswordPolicyBuilder;
use crate::fixtures::TemporalFixtures;

/// Strategy for valid policy keys
pub fn policy_key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9_.-]{0,30}"
}

/// Strategy for valid priorities
pub fn priority_strategy() -> impl Strategy<Value = i32> {
    0i32..1_000
}

/// Strategy for timestamps within a year of the fixture epoch
pub fn update_date_strategy() -> impl Strategy<Value = DateTime<Utc>> {
    (0i64..365 * 24 * 60).prop_map(|minutes| TemporalFixtures::epoch() + Duration::minutes(minutes))
}

/// Strategy for valid creation requests
pub fn new_policy_strategy() -> impl Strategy<Value = NewPasswordPolicy> {
    (policy_key_strategy(), priority_strategy(), any::<bool>(), 1u32..64).prop_map(
        |(key, priority, required, min_length)| {
            NewPasswordPolicy::new(key.clone(), format!("{} policy", key), priority)
                .required(required)
                .with_rules(json!({ "minLength": min_length }))
        },
    )
}

/// Strategy for sets of stored policies with unique keys and ids 1..=n
pub fn policy_set_strategy(max_len: usize) -> impl Strategy<Value = Vec<PasswordPolicy>> {
    proptest::collection::btree_set(policy_key_strategy(), 0..=max_len)
        .prop_flat_map(|keys| {
            let n = keys.len();
            (
                Just(keys),
                proptest::collection::vec(
                    (priority_strategy(), any::<bool>(), update_date_strategy()),
                    n,
                ),
            )
        })
        .prop_map(|(keys, attributes)| {
            keys.into_iter()
                .zip(attributes)
                .enumerate()
                .map(|(i, (key, (priority, required, updated)))| {
                    let builder = PasswordPolicyBuilder::new(i as i64 + 1, key)
                        .priority(priority)
                        .updated_at(updated);
                    if required {
                        builder.required().build()
                    } else {
                        builder.build()
                    }
                })
                .collect()
        })
}
