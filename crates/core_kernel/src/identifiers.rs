//! Strongly-typed identifiers for domain entities
//!
//! Store-assigned numeric keys are wrapped in newtypes so that an identifier
//! of one entity cannot be passed where another is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

macro_rules! define_numeric_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a store-assigned key
            pub fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the underlying key
            pub fn value(&self) -> i64 {
                self.0
            }

            /// Returns the identifier prefix for display
            pub fn prefix() -> &'static str {
                $prefix
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}-{}", $prefix, self.0)
            }
        }

        impl FromStr for $name {
            type Err = CoreError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let raw = s.strip_prefix(concat!($prefix, "-")).unwrap_or(s);
                raw.parse::<i64>()
                    .map(Self)
                    .map_err(|e| CoreError::invalid_identifier(format!("'{}': {}", s, e)))
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> i64 {
                id.0
            }
        }
    };
}

define_numeric_id!(PasswordPolicyId, "PWP");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_id_display() {
        let id = PasswordPolicyId::new(42);
        assert_eq!(id.to_string(), "PWP-42");
    }

    #[test]
    fn test_id_parsing() {
        let original = PasswordPolicyId::new(7);
        let parsed: PasswordPolicyId = original.to_string().parse().unwrap();
        assert_eq!(original, parsed);

        let bare: PasswordPolicyId = "7".parse().unwrap();
        assert_eq!(bare, original);
    }

    #[test]
    fn test_id_parsing_rejects_garbage() {
        let result = "PWP-seven".parse::<PasswordPolicyId>();
        assert!(matches!(result, Err(CoreError::InvalidIdentifier(_))));
    }

    #[test]
    fn test_i64_conversion() {
        let id = PasswordPolicyId::from(99);
        let back: i64 = id.into();
        assert_eq!(back, 99);
    }
}
