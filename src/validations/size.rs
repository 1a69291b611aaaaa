use crate::{
    types::validations::{FieldLevel, RuleResult},
    utils::validation_utils::{is_zero_value, number_param, size_of},
};

fn compare_size(level: &FieldLevel<'_>, check: fn(f64, f64) -> bool) -> RuleResult {
    let limit = number_param(level)?;
    Ok(size_of(level.field()).is_some_and(|size| check(size, limit)))
}

pub fn required(level: &FieldLevel<'_>) -> RuleResult {
    Ok(!is_zero_value(level.field()))
}

pub fn len(level: &FieldLevel<'_>) -> RuleResult {
    compare_size(level, |size, limit| size == limit)
}

pub fn min(level: &FieldLevel<'_>) -> RuleResult {
    compare_size(level, |size, limit| size >= limit)
}

pub fn max(level: &FieldLevel<'_>) -> RuleResult {
    compare_size(level, |size, limit| size <= limit)
}

pub fn gt(level: &FieldLevel<'_>) -> RuleResult {
    compare_size(level, |size, limit| size > limit)
}

pub fn gte(level: &FieldLevel<'_>) -> RuleResult {
    compare_size(level, |size, limit| size >= limit)
}

pub fn lt(level: &FieldLevel<'_>) -> RuleResult {
    compare_size(level, |size, limit| size < limit)
}

pub fn lte(level: &FieldLevel<'_>) -> RuleResult {
    compare_size(level, |size, limit| size <= limit)
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;
    use crate::types::errors::EngineError;

    fn check(rule: fn(&FieldLevel<'_>) -> RuleResult, value: Value, param: &str) -> bool {
        rule(&FieldLevel::new(&value, "test", param)).unwrap()
    }

    #[test]
    fn test_required() {
        assert!(check(required, json!("x"), ""));
        assert!(check(required, json!([]), ""));
        assert!(!check(required, json!(""), ""));
        assert!(!check(required, json!(0), ""));
        assert!(!check(required, json!(null), ""));
    }

    #[test]
    fn test_min_max_count_characters() {
        assert!(check(min, json!("سلام"), "4"));
        assert!(!check(min, json!("ab"), "3"));
        assert!(check(max, json!("abc"), "3"));
        assert!(!check(max, json!([1, 2, 3, 4]), "3"));
    }

    #[test]
    fn test_numbers_compare_by_value() {
        assert!(check(gt, json!(18), "17"));
        assert!(!check(gt, json!(17), "17"));
        assert!(check(gte, json!(17.5), "17.5"));
        assert!(check(lt, json!(-1), "0"));
        assert!(check(lte, json!(0), "0"));
        assert!(check(len, json!(5), "5"));
    }

    #[test]
    fn test_unsized_values_fail() {
        assert!(!check(min, json!(true), "1"));
        assert!(!check(max, json!(null), "1"));
    }

    #[test]
    fn test_non_numeric_param_is_engine_error() {
        let value = json!("abc");
        let err = min(&FieldLevel::new(&value, "min", "three")).unwrap_err();
        assert!(matches!(
            err,
            EngineError::InvalidParam { rule, param } if rule == "min" && param == "three"
        ));
    }
}
