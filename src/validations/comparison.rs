use std::cmp::Ordering;

use serde_json::Value;

use crate::{
    types::validations::{FieldLevel, RuleResult},
    utils::validation_utils::{number_param, size_of},
};

/// Compares a value with the rule parameter: strings by content, numbers by
/// value, booleans by `true`/`false`, collections by element count.
fn equals_param(level: &FieldLevel<'_>) -> RuleResult {
    let param = level.param();
    match level.field() {
        Value::String(text) => Ok(text == param),
        Value::Number(_) | Value::Array(_) | Value::Object(_) => {
            let expected = number_param(level)?;
            Ok(size_of(level.field()) == Some(expected))
        }
        Value::Bool(flag) => match param {
            "true" => Ok(*flag),
            "false" => Ok(!flag),
            _ => Err(level.invalid_param()),
        },
        Value::Null => Ok(param.is_empty()),
    }
}

pub fn eq(level: &FieldLevel<'_>) -> RuleResult {
    equals_param(level)
}

pub fn ne(level: &FieldLevel<'_>) -> RuleResult {
    equals_param(level).map(|equal| !equal)
}

/// Space-separated list of accepted strings or numbers.
pub fn oneof(level: &FieldLevel<'_>) -> RuleResult {
    let mut options = level.param().split_whitespace();
    match level.field() {
        Value::String(text) => Ok(options.any(|option| option == text)),
        Value::Number(number) => {
            let value = number.as_f64();
            for option in options {
                let option = option
                    .parse::<f64>()
                    .map_err(|_| level.invalid_param())?;
                if value == Some(option) {
                    return Ok(true);
                }
            }
            Ok(false)
        }
        _ => Ok(false),
    }
}

fn values_equal(left: &Value, right: &Value) -> bool {
    match (left.as_f64(), right.as_f64()) {
        (Some(left), Some(right)) => left == right,
        _ => left == right,
    }
}

/// Orders two values: numbers by value, strings and collections by length.
/// Values of different kinds are not comparable.
fn order(left: &Value, right: &Value) -> Option<Ordering> {
    let comparable = matches!(
        (left, right),
        (Value::Number(_), Value::Number(_))
            | (Value::String(_), Value::String(_))
            | (Value::Array(_), Value::Array(_))
            | (Value::Object(_), Value::Object(_))
    );
    if !comparable {
        return None;
    }
    size_of(left)?.partial_cmp(&size_of(right)?)
}

fn compare_related(level: &FieldLevel<'_>, check: fn(Ordering) -> bool) -> RuleResult {
    Ok(level
        .related()
        .and_then(|other| order(level.field(), other))
        .is_some_and(check))
}

pub fn eqfield(level: &FieldLevel<'_>) -> RuleResult {
    Ok(level
        .related()
        .is_some_and(|other| values_equal(level.field(), other)))
}

pub fn nefield(level: &FieldLevel<'_>) -> RuleResult {
    Ok(level
        .related()
        .is_none_or(|other| !values_equal(level.field(), other)))
}

pub fn gtfield(level: &FieldLevel<'_>) -> RuleResult {
    compare_related(level, Ordering::is_gt)
}

pub fn gtefield(level: &FieldLevel<'_>) -> RuleResult {
    compare_related(level, Ordering::is_ge)
}

pub fn ltfield(level: &FieldLevel<'_>) -> RuleResult {
    compare_related(level, Ordering::is_lt)
}

pub fn ltefield(level: &FieldLevel<'_>) -> RuleResult {
    compare_related(level, Ordering::is_le)
}
