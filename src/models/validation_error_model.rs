use std::{collections::BTreeMap, fmt};

use serde::{Serialize, Serializer, ser::SerializeStruct};

use crate::models::field_error_model::FieldError;

/// Outcome of one validation call.
///
/// Holds the translated field failures in the order they were reported and,
/// separately, an internal error for engine misuse (unknown rule, value that
/// cannot be walked). A value with neither is the empty, successful result.
#[derive(Debug, Default)]
pub struct ValidationError {
    errors: Vec<FieldError>,
    internal: Option<anyhow::Error>,
}

impl ValidationError {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Wraps a failure of the validator itself rather than of the input.
    pub fn new(err: impl Into<anyhow::Error>) -> Self {
        Self {
            errors: Vec::new(),
            internal: Some(err.into()),
        }
    }

    pub fn add_error(
        &mut self,
        field: impl Into<String>,
        rule: impl Into<String>,
        message: impl Into<String>,
    ) {
        self.errors.push(FieldError::new(field, rule, message));
    }

    pub fn has_validation_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn has_internal_error(&self) -> bool {
        self.internal.is_some()
    }

    pub fn internal_error(&self) -> Option<&anyhow::Error> {
        self.internal.as_ref()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Messages grouped by field.
    pub fn messages(&self) -> BTreeMap<&str, Vec<&str>> {
        let mut grouped: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for error in &self.errors {
            grouped
                .entry(error.field.as_str())
                .or_default()
                .push(error.message.as_str());
        }
        grouped
    }

    pub fn is_empty(&self) -> bool {
        !self.has_validation_errors() && !self.has_internal_error()
    }

    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(internal) = &self.internal {
            return write!(f, "internal validation error: {internal}");
        }
        if self.errors.is_empty() {
            return f.write_str("no validation errors");
        }
        let joined = self
            .errors
            .iter()
            .map(|error| format!("{}: {}", error.field, error.message))
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&joined)
    }
}

impl std::error::Error for ValidationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.internal
            .as_ref()
            .map(|err| &**err as &(dyn std::error::Error + 'static))
    }
}

impl Serialize for ValidationError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ValidationError", 2)?;
        state.serialize_field("errors", &self.errors)?;
        state.serialize_field(
            "internal",
            &self.internal.as_ref().map(|err| err.to_string()),
        )?;
        state.end()
    }
}
