// ABOUTME: Field validation rules applied to bound request payloads
// ABOUTME: Collects per-field errors instead of stopping at the first failure

use serde::Serialize;
use serde_json::{Map, Value as JsonValue};
use std::fmt;
use validator::ValidateEmail;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationRule {
    Required,
    Email,
    MinLength(usize),
    MaxLength(usize),
}

impl ValidationRule {
    /// Check a present, non-empty value. `Required` is handled by the caller.
    fn check(&self, value: &str) -> Option<String> {
        match self {
            ValidationRule::Required => None,
            ValidationRule::Email => {
                if value.to_string().validate_email() {
                    None
                } else {
                    Some("must be a valid email address".to_string())
                }
            }
            ValidationRule::MinLength(min) => {
                if value.chars().count() < *min {
                    Some(format!("must be at least {} characters", min))
                } else {
                    None
                }
            }
            ValidationRule::MaxLength(max) => {
                if value.chars().count() > *max {
                    Some(format!("must be at most {} characters", max))
                } else {
                    None
                }
            }
        }
    }
}

/// Rules for one field of the bound payload.
#[derive(Debug, Clone)]
pub struct FieldValidator {
    pub field: String,
    pub rules: Vec<ValidationRule>,
}

impl FieldValidator {
    pub fn new(field: impl Into<String>, rules: Vec<ValidationRule>) -> Self {
        Self {
            field: field.into(),
            rules,
        }
    }

    pub fn validate(&self, payload: &Map<String, JsonValue>) -> Vec<FieldError> {
        let value = field_text(payload, &self.field);
        let mut errors = Vec::new();

        match value {
            None => {
                if self.rules.contains(&ValidationRule::Required) {
                    errors.push(FieldError::required(&self.field));
                }
            }
            Some(text) => {
                for rule in &self.rules {
                    if let Some(message) = rule.check(&text) {
                        errors.push(FieldError::new(&self.field, message));
                    }
                }
            }
        }

        errors
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn required(field: &str) -> Self {
        Self::new(field, "is required")
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.field, self.message)
    }
}

/// Fields that must be present and non-empty.
pub fn validate_required(payload: &Map<String, JsonValue>, fields: &[String]) -> Vec<FieldError> {
    fields
        .iter()
        .filter(|field| field_text(payload, field).is_none())
        .map(|field| FieldError::required(field))
        .collect()
}

pub fn validate_fields(
    payload: &Map<String, JsonValue>,
    validators: &[FieldValidator],
) -> Vec<FieldError> {
    validators
        .iter()
        .flat_map(|validator| validator.validate(payload))
        .collect()
}

/// Textual form of a field; `None` when absent, null, or an empty string.
fn field_text(payload: &Map<String, JsonValue>, field: &str) -> Option<String> {
    match payload.get(field)? {
        JsonValue::Null => None,
        JsonValue::String(s) if s.is_empty() => None,
        JsonValue::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
