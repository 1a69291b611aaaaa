use std::sync::Arc;

use crate::types::validations::{FieldLevel, RuleFn, RuleResult};

pub mod comparison;
pub mod format;
pub mod regional;
pub mod size;

fn rule(check: fn(&FieldLevel<'_>) -> RuleResult) -> RuleFn {
    Arc::new(check)
}

/// The rules every engine starts with.
pub fn builtin_rules() -> Vec<(&'static str, RuleFn)> {
    vec![
        ("required", rule(size::required)),
        ("len", rule(size::len)),
        ("min", rule(size::min)),
        ("max", rule(size::max)),
        ("gt", rule(size::gt)),
        ("gte", rule(size::gte)),
        ("lt", rule(size::lt)),
        ("lte", rule(size::lte)),
        ("eq", rule(comparison::eq)),
        ("ne", rule(comparison::ne)),
        ("oneof", rule(comparison::oneof)),
        ("eqfield", rule(comparison::eqfield)),
        ("nefield", rule(comparison::nefield)),
        ("gtfield", rule(comparison::gtfield)),
        ("gtefield", rule(comparison::gtefield)),
        ("ltfield", rule(comparison::ltfield)),
        ("ltefield", rule(comparison::ltefield)),
        ("alpha", rule(format::alpha)),
        ("alphanum", rule(format::alphanum)),
        ("numeric", rule(format::numeric)),
        ("email", rule(format::email)),
        ("url", rule(format::url)),
        ("ip", rule(format::ip)),
        ("ipv4", rule(format::ipv4)),
        ("ipv6", rule(format::ipv6)),
        ("phone", rule(format::phone)),
        ("contains", rule(format::contains)),
        ("excludes", rule(format::excludes)),
        ("startswith", rule(format::startswith)),
        ("endswith", rule(format::endswith)),
    ]
}
