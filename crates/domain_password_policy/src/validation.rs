//! Write request validation
//!
//! Field bounds come from the `validator` derives on the request types. Keys
//! are additionally restricted to ASCII letters, digits, `_`, `.` and `-` so
//! that they can be used verbatim in configuration and URLs.

use validator::{Validate, ValidationErrors};

use crate::error::PolicyError;
use crate::policy::{NewPasswordPolicy, UpdatePasswordPolicy};

/// Returns true if `key` only contains characters allowed in a policy key
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
}

/// Validates a creation request
pub fn validate_new(request: &NewPasswordPolicy) -> Result<(), PolicyError> {
    let mut errors = collect(request.validate());

    if !request.key.is_empty() && !is_valid_key(&request.key) {
        errors.push(format!(
            "key: '{}' may only contain ASCII letters, digits, '_', '.' and '-'",
            request.key
        ));
    }
    if !request.validation_rules.is_object() {
        errors.push("validation_rules: must be a JSON object".to_string());
    }

    finish(errors)
}

/// Validates a partial update request
///
/// An update that changes no policy field is rejected, since applying it
/// would still advance `update_date`.
pub fn validate_update(request: &UpdatePasswordPolicy) -> Result<(), PolicyError> {
    let mut errors = collect(request.validate());

    if request.is_empty() {
        errors.push("update: at least one policy field must change".to_string());
    }

    if let Some(ref rules) = request.validation_rules {
        if !rules.is_object() {
            errors.push("validation_rules: must be a JSON object".to_string());
        }
    }

    finish(errors)
}

fn collect(result: Result<(), ValidationErrors>) -> Vec<String> {
    match result {
        Ok(()) => Vec::new(),
        Err(errors) => {
            let mut messages: Vec<String> = errors
                .field_errors()
                .iter()
                .map(|(field, errs)| {
                    let codes: Vec<&str> = errs.iter().map(|e| &*e.code).collect();
                    format!("{}: {}", field, codes.join(", "))
                })
                .collect();
            messages.sort();
            messages
        }
    }
}

fn finish(errors: Vec<String>) -> Result<(), PolicyError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(PolicyError::validation_failed(errors))
    }
}
