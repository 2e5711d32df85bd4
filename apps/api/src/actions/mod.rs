//! Form actions: validate submitted fields, write, and report the outcome as a
//! value. Validation and persistence failures never surface as HTTP errors.

pub mod forms;
pub mod handlers;
pub mod submit;
pub mod validate;

use std::collections::BTreeMap;

use serde::Serialize;

/// Field name → messages, in field-name order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// `Ok(value)` when no errors were recorded.
    pub fn into_result<T>(self, value: T) -> Result<T, FieldErrors> {
        if self.is_empty() {
            Ok(value)
        } else {
            Err(self)
        }
    }
}

/// Outcome of a form submission, returned to the dashboard as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionResult {
    pub message: String,
    pub errors: FieldErrors,
    pub success: bool,
}

impl ActionResult {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            errors: FieldErrors::new(),
            success: true,
        }
    }

    pub fn invalid(errors: FieldErrors) -> Self {
        Self {
            message: "Please correct the highlighted fields.".to_string(),
            errors,
            success: false,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            errors: FieldErrors::new(),
            success: false,
        }
    }
}
