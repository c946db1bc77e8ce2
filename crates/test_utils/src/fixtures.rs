//! Pre-built Test Fixtures
//!
//! Provides ready-to-use policy requests and timestamps that mirror a
//! typical password policy set.

use chrono::{DateTime, Duration, TimeZone, Utc};
use domain_password_policy::NewPasswordPolicy;
use serde_json::json;

/// Fixture for password policy creation requests
pub struct PolicyFixtures;

impl PolicyFixtures {
    /// Required minimum-length policy, priority 1
    pub fn min_length() -> NewPasswordPolicy {
        NewPasswordPolicy::new("minLength", "Minimum length", 1)
            .required(true)
            .with_description("Passwords must be at least twelve characters long")
            .with_rules(json!({ "minLength": 12, "maxLength": 128 }))
            .created_by("fixtures")
    }

    /// Required maximum-age policy, priority 2
    pub fn max_age() -> NewPasswordPolicy {
        NewPasswordPolicy::new("maxAge", "Maximum age", 2)
            .required(true)
            .with_rules(json!({ "passwordExpiryDays": 90 }))
            .created_by("fixtures")
    }

    /// Required complexity policy, priority 3
    pub fn complexity() -> NewPasswordPolicy {
        NewPasswordPolicy::new("complexity", "Character complexity", 3)
            .required(true)
            .with_rules(json!({
                "minUppercase": 1,
                "minLowercase": 1,
                "minDigits": 1,
                "minSpecialChars": 1
            }))
            .created_by("fixtures")
    }

    /// Optional password-history policy, priority 0
    pub fn history() -> NewPasswordPolicy {
        NewPasswordPolicy::new("passwordHistory", "Password history", 0)
            .with_rules(json!({ "passwordHistoryCount": 5 }))
            .created_by("fixtures")
    }

    /// The full standard set, in insertion order
    pub fn standard_set() -> Vec<NewPasswordPolicy> {
        vec![
            Self::max_age(),
            Self::history(),
            Self::complexity(),
            Self::min_length(),
        ]
    }

    /// Keys of `standard_set` required policies, in priority order
    pub fn standard_required_keys() -> Vec<&'static str> {
        vec!["minLength", "maxAge", "complexity"]
    }
}

/// Fixture for timestamps
pub struct TemporalFixtures;

impl TemporalFixtures {
    /// Reference instant all fixture timestamps are derived from (Jan 1, 2024)
    pub fn epoch() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
    }

    /// Three strictly increasing instants
    pub fn ascending_triple() -> (DateTime<Utc>, DateTime<Utc>, DateTime<Utc>) {
        let t1 = Self::epoch();
        (t1, t1 + Duration::hours(6), t1 + Duration::days(3))
    }
}
