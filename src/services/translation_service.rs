use std::collections::HashMap;

use crate::types::{
    params::Param,
    translations::{Translatable, Translator},
};

/// Catalog key of a rule: `prefix.rule`, or the bare rule without a prefix.
pub fn catalog_key(prefix: &str, rule: &str) -> String {
    if prefix.is_empty() {
        rule.to_string()
    } else {
        format!("{prefix}.{rule}")
    }
}

/// One failed rule, as seen by the translation step.
#[derive(Debug)]
pub struct FailureContext<'a, V: ?Sized> {
    pub locale: &'a str,
    /// Name placed into `{field}`.
    pub name: &'a str,
    pub rule: &'a str,
    /// Identity passed to the value's override hooks.
    pub field: &'a str,
    pub param: &'a Param,
    pub value: &'a V,
}

/// Turns rule failures into localized messages.
pub struct TranslationService<'t> {
    translator: Option<&'t dyn Translator>,
    prefix: &'t str,
}

impl<'t> TranslationService<'t> {
    pub fn new(translator: Option<&'t dyn Translator>, prefix: &'t str) -> Self {
        Self { translator, prefix }
    }

    /// Message for one failure, in priority order: the value's own error
    /// text, then the catalog message for `prefix.rule` with `{field}` set to
    /// the value's title for the field (or the field name) and `{param}` set
    /// to the rule parameter.
    ///
    /// Empty when no translator is configured or nothing matches.
    pub fn translate<V: Translatable + ?Sized>(&self, failure: &FailureContext<'_, V>) -> String {
        let Some(translator) = self.translator else {
            return String::new();
        };

        let own = failure
            .value
            .translate_error(failure.locale, failure.rule, failure.field);
        if !own.is_empty() {
            return own;
        }

        let key = catalog_key(self.prefix, failure.rule);

        let title = failure.value.translate_title(failure.locale, failure.field);
        let name = if title.is_empty() {
            failure.name.to_string()
        } else {
            title
        };

        let values = HashMap::from([("field", name), ("param", failure.param.to_string())]);
        translator.plural(failure.locale, &key, failure.param.count(), &values)
    }
}
