use std::sync::Arc;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::types::{errors::EngineError, translations::Translatable};

pub type RuleResult = Result<bool, EngineError>;

/// A named rule implementation. `Ok(false)` is a validation failure,
/// `Err` is engine misuse (bad parameter and the like).
pub type RuleFn = Arc<dyn Fn(&FieldLevel<'_>) -> RuleResult + Send + Sync>;

/// Everything a rule can see while it checks one value.
#[derive(Debug, Clone, Copy)]
pub struct FieldLevel<'a> {
    field: &'a Value,
    rule: &'a str,
    param: &'a str,
    parent: Option<&'a Map<String, Value>>,
    other: Option<&'a Value>,
}

impl<'a> FieldLevel<'a> {
    pub fn new(field: &'a Value, rule: &'a str, param: &'a str) -> Self {
        Self {
            field,
            rule,
            param,
            parent: None,
            other: None,
        }
    }

    pub fn with_parent(mut self, parent: Option<&'a Map<String, Value>>) -> Self {
        self.parent = parent;
        self
    }

    pub fn with_other(mut self, other: Option<&'a Value>) -> Self {
        self.other = other;
        self
    }

    pub fn field(&self) -> &'a Value {
        self.field
    }

    pub fn as_str(&self) -> Option<&'a str> {
        self.field.as_str()
    }

    pub fn rule(&self) -> &'a str {
        self.rule
    }

    pub fn param(&self) -> &'a str {
        self.param
    }

    /// The value a cross-field rule compares against: the explicit `other`
    /// value when validating a variable, otherwise the sibling field named by
    /// the parameter.
    pub fn related(&self) -> Option<&'a Value> {
        self.other
            .or_else(|| self.parent.and_then(|parent| parent.get(self.param)))
    }

    pub fn invalid_param(&self) -> EngineError {
        EngineError::InvalidParam {
            rule: self.rule.to_string(),
            param: self.param.to_string(),
        }
    }
}

/// Rule string attached to one struct field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRules {
    struct_field: &'static str,
    alias: Option<&'static str>,
    rules: &'static str,
}

impl FieldRules {
    pub const fn new(struct_field: &'static str, rules: &'static str) -> Self {
        Self {
            struct_field,
            alias: None,
            rules,
        }
    }

    /// Reported name of the field. Must match the key the field serializes
    /// under (for example a `#[serde(rename)]` value).
    pub const fn alias(mut self, alias: &'static str) -> Self {
        self.alias = Some(alias);
        self
    }

    pub fn field(&self) -> &'static str {
        self.alias.unwrap_or(self.struct_field)
    }

    pub fn struct_field(&self) -> &'static str {
        self.struct_field
    }

    pub fn rules(&self) -> &'static str {
        self.rules
    }

    pub fn matches(&self, name: &str) -> bool {
        self.struct_field == name || self.alias == Some(name)
    }
}

/// A struct whose serialized fields are checked against a rule table.
///
/// ```ignore
/// #[derive(Serialize)]
/// struct Signup {
///     #[serde(rename = "user_name")]
///     username: String,
///     mobile: String,
/// }
///
/// impl Translatable for Signup {}
///
/// impl Validatable for Signup {
///     fn rules() -> Vec<FieldRules> {
///         vec![
///             FieldRules::new("username", "required,username,min=3").alias("user_name"),
///             FieldRules::new("mobile", "required,ir_mobile"),
///         ]
///     }
/// }
/// ```
pub trait Validatable: Serialize + Translatable {
    fn rules() -> Vec<FieldRules>;
}
