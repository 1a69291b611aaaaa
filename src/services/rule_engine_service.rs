use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::{
    models::raw_failure_model::RawFailure,
    repositories::rule_repository::RuleRepository,
    types::{
        errors::EngineError,
        validations::{FieldLevel, FieldRules, RuleFn, Validatable},
    },
    utils::validation_utils::{ParsedRule, is_empty_value, json_kind, parse_rules},
};

static NULL: Value = Value::Null;

/// Evaluates rule strings against serialized values.
///
/// Every token of a rule string is checked, so one field can report several
/// failures. Rule names are resolved before anything is evaluated: an
/// unknown rule fails the whole call.
#[derive(Debug, Clone)]
pub struct RuleEngine {
    rules: RuleRepository,
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleEngine {
    /// Engine with the builtin rule set.
    pub fn new() -> Self {
        Self::with_rules(RuleRepository::with_builtins())
    }

    pub fn with_rules(rules: RuleRepository) -> Self {
        Self { rules }
    }

    /// Adds a rule or replaces one with the same name, builtins included.
    pub fn register<F>(&mut self, name: &str, rule: F)
    where
        F: Fn(&FieldLevel<'_>) -> bool + Send + Sync + 'static,
    {
        let rule: RuleFn =
            Arc::new(move |level: &FieldLevel<'_>| Ok::<_, EngineError>(rule(level)));
        self.rules.register(name, rule);
    }

    pub fn has_rule(&self, name: &str) -> bool {
        self.rules.contains(name)
    }

    pub fn validate_struct<T: Validatable>(
        &self,
        value: &T,
    ) -> Result<Vec<RawFailure>, EngineError> {
        self.walk(value, |_| true)
    }

    /// Validates every field except those named in `excluded` (Rust field
    /// name or alias).
    pub fn validate_struct_except<T: Validatable>(
        &self,
        value: &T,
        excluded: &[&str],
    ) -> Result<Vec<RawFailure>, EngineError> {
        self.walk(value, |entry| !excluded.iter().any(|name| entry.matches(name)))
    }

    /// Validates only the fields named in `included`.
    pub fn validate_struct_partial<T: Validatable>(
        &self,
        value: &T,
        included: &[&str],
    ) -> Result<Vec<RawFailure>, EngineError> {
        self.walk(value, |entry| included.iter().any(|name| entry.matches(name)))
    }

    /// Validates a single value. Failures carry empty field names.
    pub fn validate_var<V: Serialize + ?Sized>(
        &self,
        value: &V,
        rules: &str,
    ) -> Result<Vec<RawFailure>, EngineError> {
        let value = serde_json::to_value(value)?;
        let rules = self.prepare(rules)?;
        self.evaluate(&value, None, None, &rules)
            .map(|failed| unnamed_failures(&failed))
    }

    /// Validates a single value; cross-field rules compare against `other`.
    pub fn validate_var_with_value<V: Serialize + ?Sized, O: Serialize + ?Sized>(
        &self,
        value: &V,
        other: &O,
        rules: &str,
    ) -> Result<Vec<RawFailure>, EngineError> {
        let value = serde_json::to_value(value)?;
        let other = serde_json::to_value(other)?;
        let rules = self.prepare(rules)?;
        self.evaluate(&value, None, Some(&other), &rules)
            .map(|failed| unnamed_failures(&failed))
    }

    fn walk<T: Validatable>(
        &self,
        value: &T,
        selected: impl Fn(&FieldRules) -> bool,
    ) -> Result<Vec<RawFailure>, EngineError> {
        let tree = serde_json::to_value(value)?;
        let Value::Object(parent) = &tree else {
            return Err(EngineError::NotAStruct(json_kind(&tree)));
        };

        let entries = T::rules();
        let siblings = with_struct_names(parent, &entries);
        let table = entries
            .into_iter()
            .filter(|entry| selected(entry))
            .map(|entry| self.prepare(entry.rules()).map(|rules| (entry, rules)))
            .collect::<Result<Vec<_>, _>>()?;

        let mut failures = Vec::new();
        for (entry, rules) in &table {
            let field = parent.get(entry.field()).unwrap_or(&NULL);
            for rule in self.evaluate(field, Some(&siblings), None, rules)? {
                failures.push(RawFailure::new(
                    entry.field(),
                    entry.struct_field(),
                    &rule.tag,
                    rule.param(),
                ));
            }
        }
        Ok(failures)
    }

    fn prepare(&self, rules: &str) -> Result<Vec<ParsedRule>, EngineError> {
        let parsed = parse_rules(rules)?;
        for rule in parsed.iter().filter(|rule| !rule.is_omit_empty()) {
            if let Some(unknown) = rule
                .alternatives
                .iter()
                .find(|call| !self.rules.contains(&call.name))
            {
                return Err(EngineError::UnknownRule(unknown.name.clone()));
            }
        }
        Ok(parsed)
    }

    /// Returns the failed tokens, in rule order.
    fn evaluate<'r>(
        &self,
        field: &Value,
        parent: Option<&Map<String, Value>>,
        other: Option<&Value>,
        rules: &'r [ParsedRule],
    ) -> Result<Vec<&'r ParsedRule>, EngineError> {
        let mut failed = Vec::new();
        for rule in rules {
            if rule.is_omit_empty() {
                if is_empty_value(field) {
                    break;
                }
                continue;
            }
            if !self.passes(field, parent, other, rule)? {
                failed.push(rule);
            }
        }
        Ok(failed)
    }

    fn passes(
        &self,
        field: &Value,
        parent: Option<&Map<String, Value>>,
        other: Option<&Value>,
        rule: &ParsedRule,
    ) -> Result<bool, EngineError> {
        for call in &rule.alternatives {
            let check = self
                .rules
                .get(&call.name)
                .ok_or_else(|| EngineError::UnknownRule(call.name.clone()))?;
            let level = FieldLevel::new(field, &call.name, &call.param)
                .with_parent(parent)
                .with_other(other);
            if check(&level)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// Sibling lookup for cross-field rules. Aliased fields are also reachable
/// under their Rust field name unless that key is already taken.
fn with_struct_names(parent: &Map<String, Value>, entries: &[FieldRules]) -> Map<String, Value> {
    let mut siblings = parent.clone();
    for entry in entries.iter().filter(|entry| entry.field() != entry.struct_field()) {
        if let Some(value) = parent.get(entry.field()) {
            siblings
                .entry(entry.struct_field())
                .or_insert_with(|| value.clone());
        }
    }
    siblings
}

fn unnamed_failures(failed: &[&ParsedRule]) -> Vec<RawFailure> {
    failed
        .iter()
        .map(|rule| RawFailure::new("", "", &rule.tag, rule.param()))
        .collect()
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::types::translations::Translatable;

    #[derive(Serialize)]
    struct Account {
        #[serde(rename = "userName")]
        user_name: String,
        password: String,
        confirm: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        nickname: Option<String>,
        age: u32,
    }

    impl Translatable for Account {}

    impl Validatable for Account {
        fn rules() -> Vec<FieldRules> {
            vec![
                FieldRules::new("user_name", "required,min=3,alphanum").alias("userName"),
                FieldRules::new("password", "required,min=8"),
                FieldRules::new("confirm", "eqfield=password"),
                FieldRules::new("nickname", "omitempty,min=2"),
                FieldRules::new("age", "gte=18"),
            ]
        }
    }

    fn account() -> Account {
        Account {
            user_name: "alice".to_string(),
            password: "correct-horse".to_string(),
            confirm: "correct-horse".to_string(),
            nickname: None,
            age: 30,
        }
    }

    fn tags(failures: &[RawFailure]) -> Vec<(&str, &str)> {
        failures.iter().map(|f| (f.field(), f.tag())).collect()
    }

    // ===== Struct walking =====

    #[test]
    fn test_valid_struct_has_no_failures() {
        let engine = RuleEngine::new();
        assert!(engine.validate_struct(&account()).unwrap().is_empty());
    }

    #[test]
    fn test_every_failing_rule_is_reported_in_order() {
        let engine = RuleEngine::new();
        let mut value = account();
        value.user_name = "a!".to_string();
        value.confirm = "other".to_string();
        value.age = 12;

        let failures = engine.validate_struct(&value).unwrap();
        assert_eq!(
            tags(&failures),
            vec![
                ("userName", "min"),
                ("userName", "alphanum"),
                ("confirm", "eqfield"),
                ("age", "gte"),
            ]
        );
        assert_eq!(failures[0].struct_field(), "user_name");
        assert_eq!(failures[0].param(), "3");
    }

    #[test]
    fn test_missing_key_reads_as_null() {
        let engine = RuleEngine::new();
        let mut value = account();
        value.nickname = Some("x".to_string());
        assert_eq!(tags(&engine.validate_struct(&value).unwrap()), vec![("nickname", "min")]);

        value.nickname = None;
        assert!(engine.validate_struct(&value).unwrap().is_empty());
    }

    #[test]
    fn test_except_and_partial_match_name_or_alias() {
        let engine = RuleEngine::new();
        let mut value = account();
        value.user_name = String::new();
        value.age = 1;

        let except = engine.validate_struct_except(&value, &["userName"]).unwrap();
        assert_eq!(tags(&except), vec![("age", "gte")]);

        let partial = engine.validate_struct_partial(&value, &["user_name"]).unwrap();
        assert_eq!(
            tags(&partial),
            vec![("userName", "required"), ("userName", "min"), ("userName", "alphanum")]
        );
    }

    #[derive(Serialize)]
    struct Signup {
        #[serde(rename = "pass")]
        password: String,
        confirm: String,
    }

    impl Translatable for Signup {}

    impl Validatable for Signup {
        fn rules() -> Vec<FieldRules> {
            vec![
                FieldRules::new("password", "required").alias("pass"),
                FieldRules::new("confirm", "eqfield=password"),
            ]
        }
    }

    #[test]
    fn test_cross_field_param_resolves_aliased_sibling() {
        let engine = RuleEngine::new();
        let mut signup = Signup {
            password: "same".to_string(),
            confirm: "same".to_string(),
        };
        assert!(engine.validate_struct(&signup).unwrap().is_empty());

        signup.confirm = "other".to_string();
        let failures = engine.validate_struct(&signup).unwrap();
        assert_eq!(tags(&failures), vec![("confirm", "eqfield")]);
        assert_eq!(failures[0].param(), "password");
    }

    #[test]
    fn test_non_object_is_rejected() {
        #[derive(Serialize)]
        struct Wrapper(u32);
        impl Translatable for Wrapper {}
        impl Validatable for Wrapper {
            fn rules() -> Vec<FieldRules> {
                vec![]
            }
        }

        let err = RuleEngine::new().validate_struct(&Wrapper(1)).unwrap_err();
        assert!(matches!(err, EngineError::NotAStruct("number")));
    }

    // ===== Rule strings =====

    #[test]
    fn test_unknown_rule_fails_before_evaluation() {
        let engine = RuleEngine::new();
        let err = engine.validate_var(&json!(""), "required,nope").unwrap_err();
        assert!(matches!(err, EngineError::UnknownRule(name) if name == "nope"));
    }

    #[test]
    fn test_or_group() {
        let engine = RuleEngine::new();
        assert!(engine.validate_var(&json!("123"), "alpha|numeric").unwrap().is_empty());

        let failures = engine.validate_var(&json!("a-1"), "alpha|numeric").unwrap();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].tag(), "alpha|numeric");
        assert_eq!(failures[0].param(), "");
    }

    #[test]
    fn test_omitempty_skips_remaining_rules() {
        let engine = RuleEngine::new();
        assert!(engine.validate_var(&json!(""), "omitempty,email").unwrap().is_empty());
        assert_eq!(engine.validate_var(&json!("x"), "omitempty,email").unwrap().len(), 1);
    }

    #[test]
    fn test_blank_rules_validate_nothing() {
        let engine = RuleEngine::new();
        assert!(engine.validate_var(&json!(null), "  ").unwrap().is_empty());
    }

    #[test]
    fn test_var_with_value_compares_other() {
        let engine = RuleEngine::new();
        let failures = engine
            .validate_var_with_value(&json!("a"), &json!("b"), "eqfield")
            .unwrap();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].field(), "");
        assert!(engine
            .validate_var_with_value(&10, &5, "gtfield")
            .unwrap()
            .is_empty());
    }

    // ===== Registration =====

    #[test]
    fn test_custom_rule_can_shadow_builtin() {
        let mut engine = RuleEngine::new();
        engine.register("is_even", |level: &FieldLevel<'_>| {
            level.field().as_i64().is_some_and(|n| n % 2 == 0)
        });
        assert!(engine.validate_var(&4, "is_even").unwrap().is_empty());
        assert_eq!(engine.validate_var(&3, "is_even").unwrap().len(), 1);

        engine.register("required", |_: &FieldLevel<'_>| true);
        assert!(engine.validate_var(&json!(""), "required").unwrap().is_empty());
    }
}
