//! Custom Test Assertions
//!
//! Provides assertion helpers for policy listings that give more meaningful
//! failure messages than comparing whole vectors.

use domain_password_policy::PasswordPolicy;

/// Asserts that policies are sorted ascending by priority
///
/// # Panics
///
/// Panics at the first adjacent pair that is out of order
pub fn assert_priority_ascending(policies: &[PasswordPolicy]) {
    for pair in policies.windows(2) {
        assert!(
            pair[0].priority <= pair[1].priority,
            "Policies out of priority order: '{}' (priority {}) before '{}' (priority {})",
            pair[0].key,
            pair[0].priority,
            pair[1].key,
            pair[1].priority
        );
    }
}

/// Asserts that every policy in the listing is required
pub fn assert_all_required(policies: &[PasswordPolicy]) {
    if let Some(optional) = policies.iter().find(|p| !p.required) {
        panic!(
            "Expected only required policies, found optional policy '{}'",
            optional.key
        );
    }
}

/// Asserts that the listing contains exactly these keys, in this order
pub fn assert_keys(policies: &[PasswordPolicy], expected: &[&str]) {
    let actual: Vec<&str> = policies.iter().map(|p| p.key.as_str()).collect();
    assert_eq!(
        actual, expected,
        "Policy keys differ: actual={:?}, expected={:?}",
        actual, expected
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builders::PasswordPolicyBuilder;

    #[test]
    fn test_sorted_listing_passes() {
        let policies = vec![
            PasswordPolicyBuilder::new(1, "a").priority(1).required().build(),
            PasswordPolicyBuilder::new(2, "b").priority(1).required().build(),
            PasswordPolicyBuilder::new(3, "c").priority(4).required().build(),
        ];

        assert_priority_ascending(&policies);
        assert_all_required(&policies);
        assert_keys(&policies, &["a", "b", "c"]);
    }

    #[test]
    #[should_panic(expected = "out of priority order")]
    fn test_unsorted_listing_panics() {
        let policies = vec![
            PasswordPolicyBuilder::new(1, "a").priority(5).build(),
            PasswordPolicyBuilder::new(2, "b").priority(1).build(),
        ];
        assert_priority_ascending(&policies);
    }

    #[test]
    #[should_panic(expected = "optional policy 'b'")]
    fn test_optional_policy_panics() {
        let policies = vec![
            PasswordPolicyBuilder::new(1, "a").required().build(),
            PasswordPolicyBuilder::new(2, "b").build(),
        ];
        assert_all_required(&policies);
    }
}
