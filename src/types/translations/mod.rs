//! Translation seams: the catalog backend contract and the per-value
//! override capability.

use std::collections::{BTreeMap, HashMap};

use crate::utils::plural_utils::PluralCategory;

/// Message catalog backend used by the validator to render failures.
pub trait Translator: Send + Sync {
    /// Registers `message` as the `other` form of `key` in `locale`, with
    /// optional extra plural forms. Re-registration replaces the message.
    fn add_message(&mut self, locale: &str, key: &str, message: &str, options: &[PluralOption]);

    /// Renders `key` for `locale`, choosing the plural form for `count` and
    /// substituting `{name}` placeholders from `values`.
    ///
    /// Returns an empty string when no message is found.
    fn plural(
        &self,
        locale: &str,
        key: &str,
        count: i64,
        values: &HashMap<&str, String>,
    ) -> String;
}

/// Extra plural forms registered alongside a message's `other` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PluralOption {
    Zero(String),
    One(String),
    Two(String),
    Few(String),
    Many(String),
}

impl PluralOption {
    pub fn zero(message: impl Into<String>) -> Self {
        Self::Zero(message.into())
    }

    pub fn one(message: impl Into<String>) -> Self {
        Self::One(message.into())
    }

    pub fn two(message: impl Into<String>) -> Self {
        Self::Two(message.into())
    }

    pub fn few(message: impl Into<String>) -> Self {
        Self::Few(message.into())
    }

    pub fn many(message: impl Into<String>) -> Self {
        Self::Many(message.into())
    }

    pub fn category(&self) -> PluralCategory {
        match self {
            Self::Zero(_) => PluralCategory::Zero,
            Self::One(_) => PluralCategory::One,
            Self::Two(_) => PluralCategory::Two,
            Self::Few(_) => PluralCategory::Few,
            Self::Many(_) => PluralCategory::Many,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Zero(message)
            | Self::One(message)
            | Self::Two(message)
            | Self::Few(message)
            | Self::Many(message) => message,
        }
    }
}

/// Lets a validated value phrase its own error messages.
///
/// Both hooks return an empty string to mean "no override". A non-empty
/// `translate_error` result is used verbatim and skips the catalog; a
/// non-empty `translate_title` result replaces the `{field}` name inside the
/// catalog message.
pub trait Translatable {
    fn translate_error(&self, _locale: &str, _rule: &str, _field: &str) -> String {
        String::new()
    }

    fn translate_title(&self, _locale: &str, _field: &str) -> String {
        String::new()
    }
}

macro_rules! no_overrides {
    ($($ty:ty),* $(,)?) => {
        $(impl Translatable for $ty {})*
    };
}

no_overrides!(
    bool,
    char,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    f32,
    f64,
    str,
    String,
    serde_json::Value,
);

impl<T: Translatable + ?Sized> Translatable for &T {
    fn translate_error(&self, locale: &str, rule: &str, field: &str) -> String {
        (**self).translate_error(locale, rule, field)
    }

    fn translate_title(&self, locale: &str, field: &str) -> String {
        (**self).translate_title(locale, field)
    }
}

impl<T: Translatable + ?Sized> Translatable for Box<T> {
    fn translate_error(&self, locale: &str, rule: &str, field: &str) -> String {
        (**self).translate_error(locale, rule, field)
    }

    fn translate_title(&self, locale: &str, field: &str) -> String {
        (**self).translate_title(locale, field)
    }
}

impl<T: Translatable> Translatable for Option<T> {
    fn translate_error(&self, locale: &str, rule: &str, field: &str) -> String {
        self.as_ref()
            .map(|value| value.translate_error(locale, rule, field))
            .unwrap_or_default()
    }

    fn translate_title(&self, locale: &str, field: &str) -> String {
        self.as_ref()
            .map(|value| value.translate_title(locale, field))
            .unwrap_or_default()
    }
}

impl<T> Translatable for [T] {}
impl<T> Translatable for Vec<T> {}
impl<K, V> Translatable for HashMap<K, V> {}
impl<K, V> Translatable for BTreeMap<K, V> {}
