use std::collections::BTreeMap;

use crate::{
    types::translations::PluralOption,
    utils::plural_utils::{PluralCategory, plural_category},
};

/// A catalog entry: the `other` form plus optional plural forms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluralMessage {
    other: String,
    forms: BTreeMap<PluralCategory, String>,
}

impl PluralMessage {
    pub fn new(other: impl Into<String>, options: &[PluralOption]) -> Self {
        let mut message = Self {
            other: other.into(),
            forms: BTreeMap::new(),
        };
        for option in options {
            message.set_form(option.category(), option.message());
        }
        message
    }

    pub fn other(&self) -> &str {
        &self.other
    }

    pub fn form(&self, category: PluralCategory) -> Option<&str> {
        if category == PluralCategory::Other {
            return Some(&self.other);
        }
        self.forms.get(&category).map(String::as_str)
    }

    pub fn set_form(&mut self, category: PluralCategory, message: impl Into<String>) {
        if category == PluralCategory::Other {
            self.other = message.into();
        } else {
            self.forms.insert(category, message.into());
        }
    }

    /// Picks the template for `count`. An explicit zero form wins for a zero
    /// count, then the language's plural category, then `other`.
    pub fn select(&self, language: &str, count: i64) -> &str {
        if count == 0 {
            if let Some(zero) = self.forms.get(&PluralCategory::Zero) {
                return zero;
            }
        }
        self.form(plural_category(language, count))
            .unwrap_or(&self.other)
    }
}
