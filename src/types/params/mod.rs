use std::fmt;

/// A rule parameter resolved for message formatting.
///
/// Rule parameters arrive as strings (`"5"`, `"2.5"`, `"Password"`). They are
/// parsed once, integer first, then float; anything else is kept verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    Int(i64),
    Float(f64),
    Raw(String),
}

impl Param {
    pub fn parse(raw: &str) -> Self {
        if let Ok(value) = raw.parse::<i64>() {
            return Self::Int(value);
        }
        if let Ok(value) = raw.parse::<f64>() {
            return Self::Float(value);
        }
        Self::Raw(raw.to_string())
    }

    /// Count driving plural form selection. Floats are truncated, raw
    /// parameters count as zero.
    pub fn count(&self) -> i64 {
        match self {
            Self::Int(value) => *value,
            Self::Float(value) => *value as i64,
            Self::Raw(_) => 0,
        }
    }
}

impl fmt::Display for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => write!(f, "{value}"),
            Self::Raw(value) => f.write_str(value),
        }
    }
}
