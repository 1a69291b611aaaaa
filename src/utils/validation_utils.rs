use serde_json::Value;

use crate::types::{errors::EngineError, validations::FieldLevel};

pub const OMIT_EMPTY: &str = "omitempty";

/// One `name` or `name=param` call inside a rule string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleCall {
    pub name: String,
    pub param: String,
}

/// One comma-separated token. A token with several alternatives (`a|b`)
/// passes when any alternative passes.
///
/// `tag` is the rule name for a single call and the whole token for an OR
/// group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRule {
    pub tag: String,
    pub alternatives: Vec<RuleCall>,
}

impl ParsedRule {
    pub fn is_omit_empty(&self) -> bool {
        self.alternatives.len() == 1 && self.alternatives[0].name == OMIT_EMPTY
    }

    /// Parameter reported with a failure; OR groups have none.
    pub fn param(&self) -> &str {
        match self.alternatives.as_slice() {
            [single] => &single.param,
            _ => "",
        }
    }
}

/// Splits a rule string such as `required,min=3,alpha|numeric`.
pub fn parse_rules(rules: &str) -> Result<Vec<ParsedRule>, EngineError> {
    let rules = rules.trim();
    if rules.is_empty() {
        return Ok(Vec::new());
    }

    rules
        .split(',')
        .map(|token| {
            let token = token.trim();
            if token.is_empty() {
                return Err(EngineError::MalformedRules(rules.to_string()));
            }

            let alternatives = token
                .split('|')
                .map(|alternative| {
                    let (name, param) = alternative.split_once('=').unwrap_or((alternative, ""));
                    let name = name.trim();
                    if name.is_empty() {
                        return Err(EngineError::MalformedRules(rules.to_string()));
                    }
                    Ok(RuleCall {
                        name: name.to_string(),
                        param: param.trim().to_string(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;

            let tag = match alternatives.as_slice() {
                [single] => single.name.clone(),
                _ => token.to_string(),
            };
            Ok(ParsedRule { tag, alternatives })
        })
        .collect()
}

/// Zero value check used by `required`: null, empty string, zero, false.
pub fn is_zero_value(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Emptiness check used by `omitempty`, which also skips empty collections.
pub fn is_empty_value(value: &Value) -> bool {
    match value {
        Value::Array(items) => items.is_empty(),
        Value::Object(entries) => entries.is_empty(),
        other => is_zero_value(other),
    }
}

/// Size of a value for length and range rules: characters of a string,
/// numeric value of a number, element count of a collection.
pub fn size_of(value: &Value) -> Option<f64> {
    match value {
        Value::String(text) => Some(text.chars().count() as f64),
        Value::Number(number) => number.as_f64(),
        Value::Array(items) => Some(items.len() as f64),
        Value::Object(entries) => Some(entries.len() as f64),
        Value::Null | Value::Bool(_) => None,
    }
}

pub fn number_param(level: &FieldLevel<'_>) -> Result<f64, EngineError> {
    level
        .param()
        .trim()
        .parse::<f64>()
        .map_err(|_| level.invalid_param())
}

pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
