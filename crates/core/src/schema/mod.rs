//! Declarative entity schemas with full and partial validation modes.
//!
//! Each entity (`user`, `category`, `profile`) has exactly one schema; the
//! two modes are views over the same rule set:
//!
//! - [`Mode::Partial`] validates only the fields present in the input and
//!   ignores absent ones. Used for query filters, deletes and patches.
//! - [`Mode::Full`] additionally reports a `Required` error for every
//!   absent field. Used for creation payloads.
//!
//! Validation never produces a single opaque string: failures are a
//! sequence of [`FieldError`] records (`{path, code, expected, message}`)
//! so callers can render per-field errors. Successful validation returns
//! coerced values built from the typed wrappers in [`crate::types`].

pub mod category;
pub mod profile;
pub mod user;

use core::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

/// Validation mode for an entity schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Every schema field must be present and valid (except generated ids).
    Full,
    /// Only fields present in the input are validated.
    Partial,
}

/// Error codes carried by [`FieldError`].
///
/// The vocabulary is deliberately small and stable; clients switch on it.
pub mod codes {
    /// Wrong JSON type, or a required field that is absent.
    pub const INVALID_TYPE: &str = "invalid_type";
    /// Value below a minimum length or bound.
    pub const TOO_SMALL: &str = "too_small";
    /// Value above a maximum length or bound.
    pub const TOO_BIG: &str = "too_big";
    /// Value of the right type but malformed (email, UUID, digit rules).
    pub const INVALID_FORMAT: &str = "invalid_format";
}

/// A single field-level validation failure.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    /// Path of the offending field within the payload.
    pub path: Vec<String>,
    /// Stable machine-readable code (see [`codes`]).
    pub code: &'static str,
    /// JSON type the schema expected, set for type errors only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<&'static str>,
    /// Human-readable message.
    pub message: String,
}

impl FieldError {
    /// Create a field error for a top-level field.
    #[must_use]
    pub fn new(field: &str, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            path: vec![field.to_owned()],
            code,
            expected: None,
            message: message.into(),
        }
    }

    /// Attach the expected JSON type.
    #[must_use]
    pub fn with_expected(mut self, expected: &'static str) -> Self {
        self.expected = Some(expected);
        self
    }

    /// Error for a field that is absent in [`Mode::Full`].
    #[must_use]
    pub fn required(field: &str, expected: &'static str) -> Self {
        Self::new(field, codes::INVALID_TYPE, "Required").with_expected(expected)
    }

    /// Error for a field of the wrong JSON type.
    #[must_use]
    pub fn invalid_type(field: &str, expected: &'static str, received: &str) -> Self {
        Self::new(
            field,
            codes::INVALID_TYPE,
            format!("Invalid input: expected {expected}, received {received}"),
        )
        .with_expected(expected)
    }
}

/// A non-empty collection of [`FieldError`] records.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    /// Wrap a single field error.
    #[must_use]
    pub fn single(error: FieldError) -> Self {
        Self {
            errors: vec![error],
        }
    }

    /// The individual field errors, in input order.
    #[must_use]
    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for error in &self.errors {
            if !first {
                write!(f, "; ")?;
            }
            first = false;
            write!(f, "{}: {}", error.path.join("."), error.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

/// Name of a JSON value's type, as reported in `invalid_type` messages.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Field-by-field walker over a JSON object.
///
/// Entity schemas drive it: each accessor resolves one named field
/// according to the mode, accumulating type errors, and returns the raw
/// value only when it has the expected JSON type. Rule errors discovered
/// by the caller are pushed back via [`ObjectValidator::push`].
pub(crate) struct ObjectValidator<'a> {
    input: &'a Map<String, Value>,
    mode: Mode,
    errors: Vec<FieldError>,
}

impl<'a> ObjectValidator<'a> {
    pub(crate) fn new(input: &'a Map<String, Value>, mode: Mode) -> Self {
        Self {
            input,
            mode,
            errors: Vec::new(),
        }
    }

    /// Resolve a field's raw value, handling absence per mode.
    fn value(&mut self, name: &str, expected: &'static str) -> Option<&'a Value> {
        match self.input.get(name) {
            Some(value) => Some(value),
            None => {
                if self.mode == Mode::Full {
                    self.errors.push(FieldError::required(name, expected));
                }
                None
            }
        }
    }

    /// A string field, required in full mode.
    pub(crate) fn string(&mut self, name: &str) -> Option<&'a str> {
        let value = self.value(name, "string")?;
        match value.as_str() {
            Some(s) => Some(s),
            None => {
                self.errors
                    .push(FieldError::invalid_type(name, "string", json_type_name(value)));
                None
            }
        }
    }

    /// A string field that is never required, even in full mode
    /// (generated identifiers).
    pub(crate) fn generated_string(&mut self, name: &str) -> Option<&'a str> {
        let value = self.input.get(name)?;
        match value.as_str() {
            Some(s) => Some(s),
            None => {
                self.errors
                    .push(FieldError::invalid_type(name, "string", json_type_name(value)));
                None
            }
        }
    }

    /// An integer field, required in full mode.
    pub(crate) fn integer(&mut self, name: &str) -> Option<i64> {
        let value = self.value(name, "number")?;
        match value {
            Value::Number(n) => match n.as_i64() {
                Some(i) => Some(i),
                None => {
                    self.errors
                        .push(FieldError::invalid_type(name, "integer", "number"));
                    None
                }
            },
            other => {
                self.errors
                    .push(FieldError::invalid_type(name, "number", json_type_name(other)));
                None
            }
        }
    }

    /// An integer field that is never required, even in full mode
    /// (generated identifiers).
    pub(crate) fn generated_integer(&mut self, name: &str) -> Option<i64> {
        let value = self.input.get(name)?;
        match value {
            Value::Number(n) => match n.as_i64() {
                Some(i) => Some(i),
                None => {
                    self.errors
                        .push(FieldError::invalid_type(name, "integer", "number"));
                    None
                }
            },
            other => {
                self.errors
                    .push(FieldError::invalid_type(name, "number", json_type_name(other)));
                None
            }
        }
    }

    /// A boolean field, required in full mode.
    pub(crate) fn boolean(&mut self, name: &str) -> Option<bool> {
        let value = self.value(name, "boolean")?;
        match value.as_bool() {
            Some(b) => Some(b),
            None => {
                self.errors
                    .push(FieldError::invalid_type(name, "boolean", json_type_name(value)));
                None
            }
        }
    }

    /// Record a rule failure discovered by the entity schema.
    pub(crate) fn push(&mut self, error: FieldError) {
        self.errors.push(error);
    }

    /// Finish validation, returning the coerced value or the accumulated
    /// field errors.
    pub(crate) fn finish<T>(self, value: T) -> Result<T, ValidationErrors> {
        if self.errors.is_empty() {
            Ok(value)
        } else {
            Err(ValidationErrors {
                errors: self.errors,
            })
        }
    }
}

/// Validate a non-empty string of at most `max` characters.
///
/// Shared by the display-name and address rules. Pushes `too_small` or
/// `too_big` with the given messages and returns the accepted value.
fn bounded_text(
    v: &mut ObjectValidator<'_>,
    name: &str,
    s: &str,
    max: usize,
    empty_message: &str,
    long_message: &str,
) -> Option<String> {
    if s.is_empty() {
        v.push(FieldError::new(name, codes::TOO_SMALL, empty_message));
        return None;
    }
    if s.chars().count() > max {
        v.push(FieldError::new(name, codes::TOO_BIG, long_message));
        return None;
    }
    Some(s.to_owned())
}
