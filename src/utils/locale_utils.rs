use std::{
    collections::{BTreeMap, HashMap},
    fs,
    path::Path,
    str::FromStr,
};

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use serde_json::{Map, Value};

use crate::{
    models::plural_message_model::PluralMessage, types::errors::CatalogError,
    utils::plural_utils::PluralCategory,
};

static PLACEHOLDER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([A-Za-z0-9_]+)\}").expect("placeholder pattern is valid"));

/// Lower-cases a locale tag and uses `-` as the subtag separator.
pub fn normalize_locale(code: &str) -> String {
    code.trim().to_ascii_lowercase().replace('_', "-")
}

/// `"fa-ir"` -> `"fa"`.
pub fn primary_language(locale: &str) -> &str {
    locale.split('-').next().unwrap_or(locale)
}

/// Replaces `{name}` placeholders found in `values`; unknown placeholders
/// are left untouched. Substituted text is never rescanned.
pub fn interpolate(template: &str, values: &HashMap<&str, String>) -> String {
    PLACEHOLDER_REGEX
        .replace_all(template, |caps: &Captures<'_>| match values.get(&caps[1]) {
            Some(value) => value.clone(),
            None => caps[0].to_string(),
        })
        .into_owned()
}

pub fn read_message_file(
    path: &Path,
    locale: &str,
    namespace: &str,
) -> Result<Value, CatalogError> {
    let content = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_messages(&content, locale, namespace)
}

pub fn parse_messages(content: &str, locale: &str, namespace: &str) -> Result<Value, CatalogError> {
    serde_json::from_str(content).map_err(|source| CatalogError::Json {
        locale: locale.to_string(),
        namespace: namespace.to_string(),
        source,
    })
}

/// Flattens a message tree into dotted keys.
///
/// Strings are plain messages. An object whose keys are all plural
/// categories and which has an `other` form is one plural message; any other
/// object is a nested namespace.
pub fn flatten_messages(
    value: &Value,
    prefix: &str,
    out: &mut BTreeMap<String, PluralMessage>,
) -> Result<(), CatalogError> {
    match value {
        Value::String(text) => {
            out.insert(prefix.to_string(), PluralMessage::new(text.as_str(), &[]));
            Ok(())
        }
        Value::Object(entries) => {
            if let Some(message) = plural_message(entries) {
                out.insert(prefix.to_string(), message);
                return Ok(());
            }
            for (key, child) in entries {
                let path = if prefix.is_empty() {
                    key.to_string()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten_messages(child, &path, out)?;
            }
            Ok(())
        }
        _ => Err(CatalogError::Shape(prefix.to_string())),
    }
}

fn plural_message(entries: &Map<String, Value>) -> Option<PluralMessage> {
    let other = entries.get("other")?.as_str()?;
    let mut message = PluralMessage::new(other, &[]);
    for (key, form) in entries {
        let category = PluralCategory::from_str(key).ok()?;
        message.set_form(category, form.as_str()?);
    }
    Some(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_locale() {
        assert_eq!(normalize_locale(" fa_IR "), "fa-ir");
        assert_eq!(normalize_locale("EN"), "en");
    }

    #[test]
    fn test_primary_language() {
        assert_eq!(primary_language("fa-ir"), "fa");
        assert_eq!(primary_language("en"), "en");
        assert_eq!(primary_language(""), "");
    }

    #[test]
    fn test_interpolate() {
        let values = HashMap::from([("field", "Name".to_string()), ("param", "3".to_string())]);
        assert_eq!(
            interpolate("{field} needs {param} chars, {unknown} stays", &values),
            "Name needs 3 chars, {unknown} stays"
        );
    }

    #[test]
    fn test_interpolate_does_not_rescan_values() {
        let values = HashMap::from([("field", "{param}".to_string()), ("param", "3".to_string())]);
        assert_eq!(interpolate("{field}", &values), "{param}");
    }

    #[test]
    fn test_flatten_nested_and_plural() {
        let tree = json!({
            "required": "{field} is required",
            "string": {
                "min": {"one": "at least {param} character", "other": "at least {param} characters"}
            }
        });
        let mut out = BTreeMap::new();
        flatten_messages(&tree, "validation", &mut out).unwrap();

        assert_eq!(out["validation.required"].other(), "{field} is required");
        let min = &out["validation.string.min"];
        assert_eq!(min.select("en", 1), "at least {param} character");
        assert_eq!(min.select("en", 2), "at least {param} characters");
    }

    #[test]
    fn test_flatten_object_without_other_is_namespace() {
        let tree = json!({"one": "first", "two": "second"});
        let mut out = BTreeMap::new();
        flatten_messages(&tree, "", &mut out).unwrap();
        assert_eq!(out["one"].other(), "first");
        assert_eq!(out["two"].other(), "second");
    }

    #[test]
    fn test_flatten_rejects_numbers() {
        let tree = json!({"required": 3});
        let mut out = BTreeMap::new();
        let err = flatten_messages(&tree, "", &mut out).unwrap_err();
        assert!(matches!(err, CatalogError::Shape(key) if key == "required"));
    }

    #[test]
    fn test_parse_messages_reports_locale() {
        let err = parse_messages("{not json", "fa", "validation").unwrap_err();
        assert!(err.to_string().contains("fa/validation"));
    }
}
