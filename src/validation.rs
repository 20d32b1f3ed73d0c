// Copyright (c) 2025, The Fintech Personal Authors
// MIT License
// All rights reserved.

//! # Validation Helpers
//!
//! Field-level checks for DTOs crossing service boundaries. A [`Validator`]
//! collects every problem into a [`ValidationReport`] instead of stopping at
//! the first one, so callers can surface the full list to the client in a
//! single response.

use crate::errors::AppError;
use std::fmt;

/// One failed check on one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationIssue {
    pub field: String,
    /// Stable machine-readable code for the failed check
    pub code: String,
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Accumulates issues across every field of a value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    pub fn new() -> Self {
        ValidationReport::default()
    }

    pub fn push(&mut self, field: &str, code: &str, message: &str) {
        self.issues.push(ValidationIssue {
            field: field.to_owned(),
            code: code.to_owned(),
            message: message.to_owned(),
        });
    }

    /// Runs one check, recording the issue when it fails.
    pub fn check(&mut self, ok: bool, field: &str, code: &str, message: &str) {
        if !ok {
            self.push(field, code, message);
        }
    }

    pub fn is_valid(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn issues(&self) -> &[ValidationIssue] {
        &self.issues
    }

    /// Converts the report into `Ok(())` or a single validation error
    /// carrying every issue, semicolon-separated.
    pub fn into_result(self) -> Result<(), AppError> {
        if self.issues.is_empty() {
            return Ok(());
        }
        let summary = self
            .issues
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Err(AppError::Validation(summary))
    }
}

/// Validates one DTO type.
pub trait Validator {
    /// Collects every issue; an empty report means the value is valid.
    fn validate(&self) -> ValidationReport;

    /// Shorthand that rejects with [`AppError::Validation`] on any issue.
    fn validate_or_reject(&self) -> Result<(), AppError> {
        self.validate().into_result()
    }
}

/// Whether the string is empty or whitespace-only.
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Minimal email shape check: one `@` with a non-empty local part and a
/// domain containing a dot, no whitespace anywhere.
pub fn is_email(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = value.splitn(2, '@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next().unwrap_or_default();
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    // the domain needs a dot that is neither leading nor trailing
    domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

/// Whether the string parses as a UUID.
pub fn is_uuid(value: &str) -> bool {
    uuid::Uuid::parse_str(value).is_ok()
}

/// Whether the string parses as an RFC 3339 timestamp.
pub fn is_rfc3339_timestamp(value: &str) -> bool {
    chrono::DateTime::parse_from_rfc3339(value).is_ok()
}
