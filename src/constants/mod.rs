macro_rules! env_key {
    ($name:ident) => {
        pub const $name: &str = stringify!($name);
    };
}

env_key!(VALIDATOR_LOCALE);
env_key!(VALIDATOR_PREFIX);
env_key!(VALIDATOR_LOCALES_DIR);
env_key!(VALIDATOR_REGIONAL_RULES);

pub const DEFAULT_LOCALE: &str = "en";
pub const DEFAULT_PREFIX: &str = "validation";

/// `(locale, namespace, content)` of the locale files compiled into the crate.
pub const BUNDLED_LOCALES: &[(&str, &str, &str)] = &[
    (
        "en",
        "validation",
        include_str!("../../locales/en/validation.json"),
    ),
    (
        "fa",
        "validation",
        include_str!("../../locales/fa/validation.json"),
    ),
];
