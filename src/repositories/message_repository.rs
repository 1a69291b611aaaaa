use std::{
    collections::{BTreeMap, HashMap},
    fs,
    path::Path,
};

use serde_json::Value;

use crate::{
    constants::BUNDLED_LOCALES,
    models::plural_message_model::PluralMessage,
    types::{
        errors::CatalogError,
        translations::{PluralOption, Translator},
    },
    utils::locale_utils::{
        flatten_messages, interpolate, normalize_locale, parse_messages, primary_language,
        read_message_file,
    },
};

type Messages = BTreeMap<String, PluralMessage>;

/// In-memory message catalog keyed by locale, then by dotted message key.
///
/// Lookups fall back from the exact locale tag (`fa-ir`) to its primary
/// language (`fa`) and finally to the default locale.
#[derive(Debug, Clone)]
pub struct Catalog {
    default_locale: String,
    locales: HashMap<String, Messages>,
}

impl Catalog {
    pub fn new(default_locale: &str) -> Self {
        Self {
            default_locale: normalize_locale(default_locale),
            locales: HashMap::new(),
        }
    }

    /// Catalog preloaded with the locale files compiled into the crate.
    pub fn bundled(default_locale: &str) -> Result<Self, CatalogError> {
        let mut catalog = Self::new(default_locale);
        for (locale, namespace, content) in BUNDLED_LOCALES {
            catalog.load_json(locale, namespace, content)?;
        }
        Ok(catalog)
    }

    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    pub fn locales(&self) -> Vec<&str> {
        let mut locales: Vec<&str> = self.locales.keys().map(String::as_str).collect();
        locales.sort_unstable();
        locales
    }

    pub fn has(&self, locale: &str, key: &str) -> bool {
        self.lookup(locale, key).is_some()
    }

    /// Plain lookup of the `other` form.
    pub fn translate(&self, locale: &str, key: &str, values: &HashMap<&str, String>) -> String {
        self.lookup(locale, key)
            .map(|(_, message)| interpolate(message.other(), values))
            .unwrap_or_default()
    }

    /// Loads one message file's content under `namespace`.
    pub fn load_json(
        &mut self,
        locale: &str,
        namespace: &str,
        content: &str,
    ) -> Result<(), CatalogError> {
        let tree = parse_messages(content, locale, namespace)?;
        self.load_value(locale, namespace, &tree)
    }

    pub fn load_value(
        &mut self,
        locale: &str,
        namespace: &str,
        tree: &Value,
    ) -> Result<(), CatalogError> {
        let mut flattened = Messages::new();
        flatten_messages(tree, namespace, &mut flattened)?;

        let count = flattened.len();
        self.locales
            .entry(normalize_locale(locale))
            .or_default()
            .extend(flattened);
        log::debug!("Loaded {count} messages for '{locale}/{namespace}'");
        Ok(())
    }

    /// Loads every `<dir>/<locale>/<namespace>.json` file and returns how many
    /// files were read.
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize, CatalogError> {
        let mut loaded = 0;
        for locale_dir in sorted_entries(dir)? {
            if !locale_dir.is_dir() {
                continue;
            }
            let Some(locale) = file_name(&locale_dir) else {
                continue;
            };

            for file in sorted_entries(&locale_dir)? {
                if file.extension().and_then(|ext| ext.to_str()) != Some("json") {
                    continue;
                }
                let Some(namespace) = file.file_stem().and_then(|stem| stem.to_str()) else {
                    continue;
                };
                let tree = read_message_file(&file, &locale, namespace)?;
                self.load_value(&locale, namespace, &tree)?;
                loaded += 1;
            }
        }

        if loaded == 0 {
            log::warn!("No message files found in {dir:?}");
        }
        Ok(loaded)
    }

    fn lookup(&self, locale: &str, key: &str) -> Option<(&str, &PluralMessage)> {
        let requested = normalize_locale(locale);
        let requested = if requested.is_empty() {
            self.default_locale.clone()
        } else {
            requested
        };

        [
            requested.as_str(),
            primary_language(&requested),
            self.default_locale.as_str(),
        ]
        .into_iter()
        .find_map(|candidate| {
            let (tag, messages) = self.locales.get_key_value(candidate)?;
            messages
                .get(key)
                .map(|message| (primary_language(tag), message))
        })
    }
}

impl Translator for Catalog {
    fn add_message(&mut self, locale: &str, key: &str, message: &str, options: &[PluralOption]) {
        log::debug!("Registered message '{key}' for '{locale}'");
        self.locales
            .entry(normalize_locale(locale))
            .or_default()
            .insert(key.to_string(), PluralMessage::new(message, options));
    }

    fn plural(
        &self,
        locale: &str,
        key: &str,
        count: i64,
        values: &HashMap<&str, String>,
    ) -> String {
        let Some((language, message)) = self.lookup(locale, key) else {
            return String::new();
        };

        let template = message.select(language, count);
        if values.contains_key("count") {
            return interpolate(template, values);
        }
        let mut values = values.clone();
        values.insert("count", count.to_string());
        interpolate(template, &values)
    }
}

fn sorted_entries(dir: &Path) -> Result<Vec<std::path::PathBuf>, CatalogError> {
    let io_error = |source| CatalogError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut entries = fs::read_dir(dir)
        .map_err(io_error)?
        .map(|entry| entry.map(|entry| entry.path()))
        .collect::<Result<Vec<_>, _>>()
        .map_err(io_error)?;
    entries.sort();
    Ok(entries)
}

fn file_name(path: &Path) -> Option<String> {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(normalize_locale)
}
