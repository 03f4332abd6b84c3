//! Client-side validation of drafts before they reach the store.

use serde::Serialize;
use std::fmt;

/// A single reason a draft was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// The outcome of validating a draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Valid,
    Invalid(Vec<FieldError>),
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        matches!(self, Validation::Valid)
    }

    pub fn errors(&self) -> &[FieldError] {
        match self {
            Validation::Valid => &[],
            Validation::Invalid(errors) => errors,
        }
    }

    /// Names of the rejected fields, in the order they were checked.
    pub fn fields(&self) -> Vec<&'static str> {
        self.errors().iter().map(|e| e.field).collect()
    }
}

impl fmt::Display for Validation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Validation::Valid => write!(f, "valid"),
            Validation::Invalid(errors) => {
                let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
                write!(f, "{}", messages.join(" "))
            }
        }
    }
}

/// Collects field checks and turns them into a [`Validation`].
#[derive(Debug, Default)]
pub struct RequiredFields {
    errors: Vec<FieldError>,
}

impl RequiredFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires `value` to contain something other than whitespace.
    pub fn text(self, field: &'static str, value: &str) -> Self {
        let blank = value.trim().is_empty();
        self.check(!blank, field, format!("{field} is required."))
    }

    pub fn check(mut self, ok: bool, field: &'static str, message: impl Into<String>) -> Self {
        if !ok {
            self.errors.push(FieldError {
                field,
                message: message.into(),
            });
        }
        self
    }

    pub fn finish(self) -> Validation {
        if self.errors.is_empty() {
            Validation::Valid
        } else {
            Validation::Invalid(self.errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_is_rejected() {
        let result = RequiredFields::new()
            .text("title", "Dubai")
            .text("location", "   ")
            .finish();
        assert_eq!(result.fields(), vec!["location"]);
        assert_eq!(result.to_string(), "location is required.");
    }

    #[test]
    fn no_errors_is_valid() {
        assert!(RequiredFields::new().text("title", "x").finish().is_valid());
    }
}
