use std::path::PathBuf;
use thiserror::Error;

/// Misuse of the rule engine, as opposed to invalid input data.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("undefined validation rule '{0}'")]
    UnknownRule(String),

    #[error("malformed rule string '{0}'")]
    MalformedRules(String),

    #[error("invalid parameter '{param}' for rule '{rule}'")]
    InvalidParam { rule: String, param: String },

    #[error("failed to serialize value: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("expected a struct-like value, got {0}")]
    NotAStruct(&'static str),
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse messages for '{locale}/{namespace}': {source}")]
    Json {
        locale: String,
        namespace: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("message '{0}' must be a string or an object of plural forms")]
    Shape(String),
}
