//! Tests for strongly-typed identifiers

use core_kernel::{CoreError, PasswordPolicyId};
use proptest::prelude::*;

#[test]
fn test_prefix() {
    assert_eq!(PasswordPolicyId::prefix(), "PWP");
}

#[test]
fn test_ordering_follows_value() {
    let mut ids = vec![
        PasswordPolicyId::new(3),
        PasswordPolicyId::new(1),
        PasswordPolicyId::new(2),
    ];
    ids.sort();

    let values: Vec<i64> = ids.iter().map(|id| id.value()).collect();
    assert_eq!(values, vec![1, 2, 3]);
}

#[test]
fn test_serde_is_transparent() {
    let id = PasswordPolicyId::new(12);
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, "12");

    let back: PasswordPolicyId = serde_json::from_str("12").unwrap();
    assert_eq!(back, id);
}

#[test]
fn test_wrong_prefix_is_rejected() {
    let result = "POL-12".parse::<PasswordPolicyId>();
    assert!(matches!(result, Err(CoreError::InvalidIdentifier(_))));
}

proptest! {
    #[test]
    fn display_then_parse_preserves_value(value in any::<i64>()) {
        let id = PasswordPolicyId::new(value);
        let parsed: PasswordPolicyId = id.to_string().parse().unwrap();
        prop_assert_eq!(parsed, id);
    }
}
