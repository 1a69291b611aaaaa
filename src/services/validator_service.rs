use std::fmt;

use serde::Serialize;

use crate::{
    models::{raw_failure_model::RawFailure, validation_error_model::ValidationError},
    services::{
        rule_engine_service::RuleEngine,
        translation_service::{FailureContext, TranslationService, catalog_key},
    },
    types::{
        errors::EngineError,
        params::Param,
        translations::{PluralOption, Translatable, Translator},
        validations::{FieldLevel, Validatable},
    },
};

/// Localized validation facade.
///
/// Runs the rule engine and turns each failure into a message from the
/// configured translator. Without a translator, failures carry the engine's
/// default English message. An empty `locale` selects the translator's
/// default locale.
///
/// Registration takes `&mut self`; validation takes `&self`, so a configured
/// validator can be shared across threads behind an `Arc`.
pub struct I18nValidator {
    engine: RuleEngine,
    translator: Option<Box<dyn Translator>>,
    prefix: String,
}

impl Default for I18nValidator {
    fn default() -> Self {
        Self::new(RuleEngine::new())
    }
}

impl fmt::Debug for I18nValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("I18nValidator")
            .field("engine", &self.engine)
            .field("translator", &self.translator.is_some())
            .field("prefix", &self.prefix)
            .finish()
    }
}

impl I18nValidator {
    pub fn new(engine: RuleEngine) -> Self {
        Self {
            engine,
            translator: None,
            prefix: String::new(),
        }
    }

    /// Uses `translator` for messages, looking rules up as `prefix.rule`
    /// (or the bare rule when `prefix` is empty).
    pub fn with_translator(mut self, translator: impl Translator + 'static, prefix: &str) -> Self {
        self.translator = Some(Box::new(translator));
        self.prefix = prefix.trim().to_string();
        self
    }

    pub fn translator(&self) -> Option<&dyn Translator> {
        self.translator.as_deref()
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn engine(&self) -> &RuleEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut RuleEngine {
        &mut self.engine
    }

    /// Registers a custom rule. Blank names are ignored.
    pub fn add_validation<F>(&mut self, rule: &str, f: F)
    where
        F: Fn(&FieldLevel<'_>) -> bool + Send + Sync + 'static,
    {
        let rule = rule.trim();
        if rule.is_empty() {
            log::warn!("Ignoring validation rule with a blank name");
            return;
        }
        self.engine.register(rule, f);
    }

    /// Registers a message for `rule` in `locale`. Ignored when the rule is
    /// blank or no translator is configured.
    pub fn add_translation(
        &mut self,
        locale: &str,
        rule: &str,
        message: &str,
        options: &[PluralOption],
    ) {
        let rule = rule.trim();
        let Some(translator) = self.translator.as_deref_mut() else {
            log::warn!("Ignoring translation for '{rule}': no translator configured");
            return;
        };
        if rule.is_empty() {
            log::warn!("Ignoring translation with a blank rule name");
            return;
        }
        translator.add_message(locale, &catalog_key(&self.prefix, rule), message, options);
    }

    /// Validates every field of `value`.
    pub fn validate<T: Validatable>(&self, locale: &str, value: &T) -> ValidationError {
        self.parse_struct_errors(locale, value, self.engine.validate_struct(value))
    }

    /// Validates every field of `value` except `fields`.
    pub fn validate_except<T: Validatable>(
        &self,
        locale: &str,
        value: &T,
        fields: &[&str],
    ) -> ValidationError {
        self.parse_struct_errors(
            locale,
            value,
            self.engine.validate_struct_except(value, fields),
        )
    }

    /// Validates only `fields` of `value`.
    pub fn validate_partial<T: Validatable>(
        &self,
        locale: &str,
        value: &T,
        fields: &[&str],
    ) -> ValidationError {
        self.parse_struct_errors(
            locale,
            value,
            self.engine.validate_struct_partial(value, fields),
        )
    }

    /// Validates one value against `rules`, reporting failures under `name`.
    pub fn var<V>(&self, locale: &str, name: &str, value: &V, rules: &str) -> ValidationError
    where
        V: Serialize + Translatable + ?Sized,
    {
        self.parse_variable_errors(locale, name, value, self.engine.validate_var(value, rules))
    }

    /// Like [`var`](Self::var), with cross-field rules comparing against
    /// `other`.
    pub fn var_with_value<V, O>(
        &self,
        locale: &str,
        name: &str,
        value: &V,
        other: &O,
        rules: &str,
    ) -> ValidationError
    where
        V: Serialize + Translatable + ?Sized,
        O: Serialize + ?Sized,
    {
        self.parse_variable_errors(
            locale,
            name,
            value,
            self.engine.validate_var_with_value(value, other, rules),
        )
    }

    fn translation(&self) -> TranslationService<'_> {
        TranslationService::new(self.translator.as_deref(), &self.prefix)
    }

    fn parse_struct_errors<T: Translatable + ?Sized>(
        &self,
        locale: &str,
        value: &T,
        result: Result<Vec<RawFailure>, EngineError>,
    ) -> ValidationError {
        let failures = match result {
            Ok(failures) => failures,
            Err(err) => return internal_error(err),
        };

        let mut errors = ValidationError::empty();
        let translation = self.translation();
        for failure in failures {
            if self.translator.is_none() {
                errors.add_error(failure.field(), failure.tag(), failure.message());
                continue;
            }

            let param = Param::parse(failure.param());
            let message = translation.translate(&FailureContext {
                locale,
                name: failure.field(),
                rule: failure.tag(),
                field: failure.struct_field(),
                param: &param,
                value,
            });
            errors.add_error(failure.field(), failure.tag(), message);
        }
        errors
    }

    fn parse_variable_errors<V: Translatable + ?Sized>(
        &self,
        locale: &str,
        name: &str,
        value: &V,
        result: Result<Vec<RawFailure>, EngineError>,
    ) -> ValidationError {
        let failures = match result {
            Ok(failures) => failures,
            Err(err) => return internal_error(err),
        };

        let mut errors = ValidationError::empty();
        let translation = self.translation();
        for failure in failures.into_iter().map(|failure| failure.renamed(name)) {
            if self.translator.is_none() {
                errors.add_error(name, failure.tag(), failure.message());
                continue;
            }

            let param = Param::parse(failure.param());
            let message = translation.translate(&FailureContext {
                locale,
                name,
                rule: failure.tag(),
                field: name,
                param: &param,
                value,
            });
            errors.add_error(name, failure.tag(), message);
        }
        errors
    }
}

fn internal_error(err: EngineError) -> ValidationError {
    log::warn!("Validation could not run: {err}");
    ValidationError::new(err)
}
