use std::{env, path::PathBuf};

use anyhow::{Context, Result, bail};

use crate::{
    constants::{
        DEFAULT_LOCALE, DEFAULT_PREFIX, VALIDATOR_LOCALE, VALIDATOR_LOCALES_DIR,
        VALIDATOR_PREFIX, VALIDATOR_REGIONAL_RULES,
    },
    repositories::message_repository::Catalog,
    services::{rule_engine_service::RuleEngine, validator_service::I18nValidator},
    validations::regional::register_regional_rules,
};

/// Settings for a ready-to-use validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatorConfig {
    pub locale: String,
    pub prefix: String,
    pub locales_dir: Option<PathBuf>,
    pub regional_rules: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_string(),
            prefix: DEFAULT_PREFIX.to_string(),
            locales_dir: None,
            regional_rules: true,
        }
    }
}

impl ValidatorConfig {
    /// Reads the process environment, after loading a `.env` file if one
    /// exists.
    pub fn from_env() -> Result<Self> {
        if let Ok(path) = dotenv::dotenv() {
            log::debug!("Loaded environment from {path:?}");
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads settings through `lookup`; missing or blank values fall back to
    /// the defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        let regional_rules = match read(VALIDATOR_REGIONAL_RULES) {
            Some(value) => parse_flag(&value)
                .with_context(|| format!("{VALIDATOR_REGIONAL_RULES} has an invalid value"))?,
            None => defaults.regional_rules,
        };

        Ok(Self {
            locale: read(VALIDATOR_LOCALE).unwrap_or(defaults.locale),
            prefix: read(VALIDATOR_PREFIX).unwrap_or(defaults.prefix),
            locales_dir: read(VALIDATOR_LOCALES_DIR).map(PathBuf::from),
            regional_rules,
        })
    }

    /// Builds a validator with a catalog loaded from `locales_dir`, or from
    /// the bundled locale files when no directory is set.
    pub fn build(&self) -> Result<I18nValidator> {
        let catalog = match &self.locales_dir {
            Some(dir) => {
                let mut catalog = Catalog::new(&self.locale);
                let files = catalog
                    .load_dir(dir)
                    .with_context(|| format!("Failed to load locales from {dir:?}"))?;
                log::info!("Loaded {files} message files from {dir:?}");
                catalog
            }
            None => Catalog::bundled(&self.locale).context("Failed to load bundled locales")?,
        };

        let mut validator =
            I18nValidator::new(RuleEngine::new()).with_translator(catalog, &self.prefix);
        if self.regional_rules {
            register_regional_rules(validator.engine_mut());
        }
        Ok(validator)
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("expected a boolean, got '{other}'"),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = ValidatorConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, ValidatorConfig::default());
        assert_eq!(config.locale, "en");
        assert_eq!(config.prefix, "validation");
        assert!(config.regional_rules);
    }

    #[test]
    fn test_reads_values() {
        let config = ValidatorConfig::from_lookup(lookup(&[
            ("VALIDATOR_LOCALE", "fa"),
            ("VALIDATOR_PREFIX", " messages "),
            ("VALIDATOR_LOCALES_DIR", "/srv/locales"),
            ("VALIDATOR_REGIONAL_RULES", "off"),
        ]))
        .unwrap();
        assert_eq!(config.locale, "fa");
        assert_eq!(config.prefix, "messages");
        assert_eq!(config.locales_dir, Some(PathBuf::from("/srv/locales")));
        assert!(!config.regional_rules);
    }

    #[test]
    fn test_invalid_flag_is_an_error() {
        let err = ValidatorConfig::from_lookup(lookup(&[("VALIDATOR_REGIONAL_RULES", "maybe")]))
            .unwrap_err();
        assert!(err.to_string().contains("VALIDATOR_REGIONAL_RULES"));
    }

    #[test]
    fn test_build_with_bundled_locales() {
        let validator = ValidatorConfig::default().build().unwrap();
        assert!(validator.engine().has_rule("ir_national_code"));
        assert_eq!(validator.prefix(), "validation");

        let errors = validator.var("en", "Mobile", "0912", "ir_mobile");
        assert_eq!(errors.errors().len(), 1);
        assert!(errors.errors()[0].message.contains("Mobile"));
    }

    #[test]
    fn test_build_without_regional_rules() {
        let config = ValidatorConfig {
            regional_rules: false,
            ..ValidatorConfig::default()
        };
        let validator = config.build().unwrap();
        assert!(!validator.engine().has_rule("ir_mobile"));
    }
}
