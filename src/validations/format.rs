use email_address::EmailAddress;
use once_cell::sync::Lazy;
use phonenumber::country;
use regex::Regex;
use serde_json::Value;
use validator::{ValidateIp, ValidateUrl};

use crate::{
    types::validations::{FieldLevel, RuleResult},
    utils::validators::is_alpha_numeric,
};

static NUMERIC_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[-+]?[0-9]+(?:\.[0-9]+)?$").expect("numeric pattern is valid"));

/// Runs `check` on string values; every other kind fails.
fn text_rule(level: &FieldLevel<'_>, check: impl FnOnce(&str) -> bool) -> RuleResult {
    Ok(level.as_str().is_some_and(check))
}

pub fn alpha(level: &FieldLevel<'_>) -> RuleResult {
    text_rule(level, |text| {
        !text.is_empty() && text.chars().all(|c| c.is_ascii_alphabetic())
    })
}

pub fn alphanum(level: &FieldLevel<'_>) -> RuleResult {
    text_rule(level, |text| is_alpha_numeric(text, ""))
}

pub fn numeric(level: &FieldLevel<'_>) -> RuleResult {
    match level.field() {
        Value::Number(_) => Ok(true),
        _ => text_rule(level, |text| NUMERIC_REGEX.is_match(text)),
    }
}

pub fn email(level: &FieldLevel<'_>) -> RuleResult {
    text_rule(level, EmailAddress::is_valid)
}

pub fn url(level: &FieldLevel<'_>) -> RuleResult {
    text_rule(level, |text| !text.is_empty() && text.validate_url())
}

pub fn ip(level: &FieldLevel<'_>) -> RuleResult {
    text_rule(level, |text| text.validate_ip())
}

pub fn ipv4(level: &FieldLevel<'_>) -> RuleResult {
    text_rule(level, |text| text.validate_ipv4())
}

pub fn ipv6(level: &FieldLevel<'_>) -> RuleResult {
    text_rule(level, |text| text.validate_ipv6())
}

/// International phone number; the optional parameter is the region used
/// for numbers written without a country code (`phone=IR`).
pub fn phone(level: &FieldLevel<'_>) -> RuleResult {
    let region = match level.param().trim() {
        "" => None,
        code => Some(
            code.to_ascii_uppercase()
                .parse::<country::Id>()
                .map_err(|_| level.invalid_param())?,
        ),
    };

    text_rule(level, |text| {
        phonenumber::parse(region, text).is_ok_and(|number| phonenumber::is_valid(&number))
    })
}

pub fn contains(level: &FieldLevel<'_>) -> RuleResult {
    text_rule(level, |text| text.contains(level.param()))
}

pub fn excludes(level: &FieldLevel<'_>) -> RuleResult {
    text_rule(level, |text| !text.contains(level.param()))
}

pub fn startswith(level: &FieldLevel<'_>) -> RuleResult {
    text_rule(level, |text| text.starts_with(level.param()))
}

pub fn endswith(level: &FieldLevel<'_>) -> RuleResult {
    text_rule(level, |text| text.ends_with(level.param()))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn check(rule: fn(&FieldLevel<'_>) -> RuleResult, value: Value, param: &str) -> bool {
        rule(&FieldLevel::new(&value, "test", param)).unwrap()
    }

    #[test]
    fn test_character_classes() {
        assert!(check(alpha, json!("abc"), ""));
        assert!(!check(alpha, json!("abc1"), ""));
        assert!(check(alphanum, json!("abc1"), ""));
        assert!(!check(alphanum, json!("abc-1"), ""));
        assert!(check(numeric, json!("-12.5"), ""));
        assert!(check(numeric, json!(7), ""));
        assert!(!check(numeric, json!("12a"), ""));
    }

    #[test]
    fn test_email() {
        assert!(check(email, json!("user@example.com"), ""));
        assert!(!check(email, json!("user.example.com"), ""));
        assert!(!check(email, json!(42), ""));
    }

    #[test]
    fn test_url_and_ip() {
        assert!(check(url, json!("https://example.com/path"), ""));
        assert!(!check(url, json!("not a url"), ""));
        assert!(check(ip, json!("10.0.0.1"), ""));
        assert!(check(ipv4, json!("10.0.0.1"), ""));
        assert!(!check(ipv4, json!("::1"), ""));
        assert!(check(ipv6, json!("::1"), ""));
    }

    #[test]
    fn test_phone() {
        assert!(check(phone, json!("+16502530000"), ""));
        assert!(check(phone, json!("09121234567"), "IR"));
        assert!(!check(phone, json!("12"), ""));
        let value = json!("+16502530000");
        assert!(phone(&FieldLevel::new(&value, "phone", "nowhere")).is_err());
    }

    #[test]
    fn test_substring_rules() {
        assert!(check(contains, json!("hello world"), "lo w"));
        assert!(check(excludes, json!("hello"), "@"));
        assert!(check(startswith, json!("hello"), "he"));
        assert!(!check(endswith, json!("hello"), "he"));
    }
}
