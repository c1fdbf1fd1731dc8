//! Field rules for incoming contact submissions.
//!
//! Validation runs in ordered stages (presence, then length, then email
//! syntax). The first stage with any violation stops the pipeline, so a
//! caller always sees the earliest class of problem first.

use folio_adapters::NewSubmission;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use validator::ValidateLength;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// Raw request body. Every field is optional here so that a missing field
/// surfaces as a validation failure rather than a deserialization error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SubmissionPayload {
    pub fullname: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// One or more violations from a single validation stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    errors: Vec<FieldError>,
}

impl ValidationError {
    pub fn single(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            errors: vec![FieldError {
                field,
                message: message.into(),
            }],
        }
    }

    /// Message of the first failing field.
    pub fn message(&self) -> &str {
        self.errors
            .first()
            .map(|error| error.message.as_str())
            .unwrap_or("invalid submission")
    }

    pub fn field(&self) -> Option<&'static str> {
        self.errors.first().map(|error| error.field)
    }

    pub fn details(&self) -> &[FieldError] {
        &self.errors
    }
}

struct FieldRule {
    name: &'static str,
    min: usize,
    max: usize,
}

const FULLNAME: FieldRule = FieldRule {
    name: "fullname",
    min: 2,
    max: 100,
};
const EMAIL: FieldRule = FieldRule {
    name: "email",
    min: 1,
    max: 255,
};
const ADDRESS: FieldRule = FieldRule {
    name: "address",
    min: 5,
    max: 500,
};
const MESSAGE: FieldRule = FieldRule {
    name: "message",
    min: 10,
    max: 2000,
};

impl FieldRule {
    fn check_length(&self, value: &str) -> Option<FieldError> {
        // `validate_length` counts chars, not bytes.
        if !value.validate_length(Some(self.min as u64), Some(self.max as u64), None) {
            let message = if self.min <= 1 {
                format!("{} must be at most {} characters", self.name, self.max)
            } else {
                format!(
                    "{} must be between {} and {} characters",
                    self.name, self.min, self.max
                )
            };
            return Some(FieldError {
                field: self.name,
                message,
            });
        }
        None
    }
}

fn into_result(errors: Vec<FieldError>) -> Result<(), ValidationError> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { errors })
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Turns a raw payload into a storable submission, trimming every field and
/// lowercasing the email.
pub fn validate(payload: &SubmissionPayload) -> Result<NewSubmission, ValidationError> {
    let fields = [
        (&FULLNAME, &payload.fullname),
        (&EMAIL, &payload.email),
        (&ADDRESS, &payload.address),
        (&MESSAGE, &payload.message),
    ];

    into_result(
        fields
            .iter()
            .filter(|(_, value)| present(value).is_none())
            .map(|(rule, _)| FieldError {
                field: rule.name,
                message: format!("{} is required", rule.name),
            })
            .collect(),
    )?;

    let [fullname, email, address, message] =
        fields.map(|(_, value)| present(value).unwrap_or_default());
    // Lowercasing can lengthen a string, so the stored form is what gets measured.
    let email = email.to_lowercase();
    let email = email.as_str();

    into_result(
        [
            FULLNAME.check_length(fullname),
            EMAIL.check_length(email),
            ADDRESS.check_length(address),
            MESSAGE.check_length(message),
        ]
        .into_iter()
        .flatten()
        .collect(),
    )?;

    if !is_valid_email(email) {
        return Err(ValidationError::single(
            EMAIL.name,
            "email must be a valid email address",
        ));
    }

    Ok(NewSubmission {
        fullname: fullname.to_string(),
        email: email.to_string(),
        address: address.to_string(),
        message: message.to_string(),
    })
}
