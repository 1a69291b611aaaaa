//! Localized validation for structs and single values.
//!
//! [`I18nValidator`] runs comma-separated rule strings (`required,min=3`)
//! against serializable values and renders every failure through a
//! [`Translator`], choosing plural forms from the rule parameter. Values can
//! override their own messages through [`Translatable`]. Iranian and network
//! format checks are available both as plain functions in
//! [`utils::validators`] and as named rules through
//! [`register_regional_rules`].

pub mod config;
pub mod constants;
pub mod models;
pub mod repositories;
pub mod services;
pub mod types;
pub mod utils;
pub mod validations;

pub use config::validator_config::ValidatorConfig;
pub use models::{field_error_model::FieldError, validation_error_model::ValidationError};
pub use repositories::message_repository::Catalog;
pub use services::{rule_engine_service::RuleEngine, validator_service::I18nValidator};
pub use types::{
    errors::{CatalogError, EngineError},
    params::Param,
    translations::{PluralOption, Translatable, Translator},
    validations::{FieldLevel, FieldRules, Validatable},
};
pub use validations::regional::register_regional_rules;
