//! Field rules - per-entity validation producing structured field errors
//!
//! Request shapes are checked at the HTTP boundary with `validator`. These
//! rules run on the entity itself after a create or a merged update.

use serde::Serialize;
use std::fmt;

use crate::error::DomainError;

/// A single rejected field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Ordered list of rejected fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError::new(field, message));
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    /// Record an error if `value` (trimmed) is empty or longer than `max` chars
    pub fn text(&mut self, field: &'static str, value: &str, max: usize) {
        let len = value.trim().chars().count();
        if len == 0 {
            self.push(field, "must not be empty");
        } else if len > max {
            self.push(field, format!("must be at most {max} characters"));
        }
    }

    /// Like [`text`](Self::text) but allows the field to be absent
    pub fn optional_text(&mut self, field: &'static str, value: Option<&str>, max: usize) {
        if let Some(value) = value {
            self.text(field, value, max);
        }
    }

    pub fn non_negative(&mut self, field: &'static str, value: i64) {
        if value < 0 {
            self.push(field, "must not be negative");
        }
    }

    /// Record an error unless `0 <= value <= max`
    pub fn amount(&mut self, field: &'static str, value: i64, max: i64) {
        if !(0..=max).contains(&value) {
            self.push(field, format!("must be between 0 and {max}"));
        }
    }

    pub fn count(&mut self, field: &'static str, len: usize, min: usize, max: usize) {
        if len < min {
            self.push(field, format!("must contain at least {min} item(s)"));
        } else if len > max {
            self.push(field, format!("must contain at most {max} item(s)"));
        }
    }

    /// Every entry of a URL list must be non-empty
    pub fn urls(&mut self, field: &'static str, urls: &[String]) {
        if urls.iter().any(|u| u.trim().is_empty()) {
            self.push(field, "must not contain empty URLs");
        }
    }

    pub fn into_result(self) -> Result<(), DomainError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(DomainError::InvalidFields(self))
        }
    }
}

impl From<Vec<FieldError>> for FieldErrors {
    fn from(errors: Vec<FieldError>) -> Self {
        Self(errors)
    }
}

impl IntoIterator for FieldErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for error in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{} {}", error.field, error.message)?;
            first = false;
        }
        Ok(())
    }
}

/// Validation rules attached to an entity
pub trait EntityRules {
    /// Every rule violation, in field order
    fn field_errors(&self) -> FieldErrors;

    fn check(&self) -> Result<(), DomainError> {
        self.field_errors().into_result()
    }
}
