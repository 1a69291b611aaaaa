use std::fmt;

/// A rule violation as reported by the rule engine, before translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFailure {
    field: String,
    struct_field: String,
    tag: String,
    param: String,
}

impl RawFailure {
    pub fn new(
        field: impl Into<String>,
        struct_field: impl Into<String>,
        tag: impl Into<String>,
        param: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            struct_field: struct_field.into(),
            tag: tag.into(),
            param: param.into(),
        }
    }

    /// Reported field name (the serialized alias when one is set).
    pub fn field(&self) -> &str {
        &self.field
    }

    /// Rust field name.
    pub fn struct_field(&self) -> &str {
        &self.struct_field
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn param(&self) -> &str {
        &self.param
    }

    /// Relabels a variable failure with the caller-supplied name.
    pub fn renamed(mut self, name: &str) -> Self {
        self.field = name.to_string();
        self.struct_field = name.to_string();
        self
    }

    /// Untranslated message used when no translator is configured. Both
    /// name slots carry the reported name.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for RawFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Key: '{}' Error:Field validation for '{}' failed on the '{}' tag",
            self.field, self.field, self.tag
        )
    }
}
