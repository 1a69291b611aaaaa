use crate::{
    services::rule_engine_service::RuleEngine,
    types::validations::FieldLevel,
    utils::validators::{
        is_alpha_numeric, is_alpha_numeric_with_persian, is_valid_ip_port,
        is_valid_iranian_bank_card, is_valid_iranian_iban, is_valid_iranian_id_number,
        is_valid_iranian_mobile, is_valid_iranian_national_code, is_valid_iranian_phone,
        is_valid_iranian_postal_code, is_valid_username,
    },
};

const TEXT_RULES: &[(&str, fn(&str) -> bool)] = &[
    ("username", is_valid_username),
    ("ir_phone", is_valid_iranian_phone),
    ("ir_mobile", is_valid_iranian_mobile),
    ("ir_postal_code", is_valid_iranian_postal_code),
    ("ir_id_number", is_valid_iranian_id_number),
    ("ir_national_code", is_valid_iranian_national_code),
    ("ir_bank_card", is_valid_iranian_bank_card),
    ("ir_iban", is_valid_iranian_iban),
    ("ip_port", is_valid_ip_port),
];

/// Registers the Iranian and network format checks as named rules.
///
/// `alnum_extra` and `alnum_fa` take the extra allowed characters as their
/// parameter (`alnum_fa=_-`).
pub fn register_regional_rules(engine: &mut RuleEngine) {
    for &(name, check) in TEXT_RULES {
        engine.register(name, move |level: &FieldLevel<'_>| {
            level.as_str().is_some_and(check)
        });
    }

    engine.register("alnum_extra", |level: &FieldLevel<'_>| {
        level
            .as_str()
            .is_some_and(|text| is_alpha_numeric(text, level.param()))
    });
    engine.register("alnum_fa", |level: &FieldLevel<'_>| {
        level
            .as_str()
            .is_some_and(|text| is_alpha_numeric_with_persian(text, level.param()))
    });
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn engine() -> RuleEngine {
        let mut engine = RuleEngine::new();
        register_regional_rules(&mut engine);
        engine
    }

    #[test]
    fn test_all_regional_rules_registered() {
        let engine = engine();
        for name in [
            "alnum_extra",
            "alnum_fa",
            "username",
            "ir_phone",
            "ir_mobile",
            "ir_postal_code",
            "ir_id_number",
            "ir_national_code",
            "ir_bank_card",
            "ir_iban",
            "ip_port",
        ] {
            assert!(engine.has_rule(name), "missing '{name}'");
        }
    }

    #[test]
    fn test_regional_rules_check_strings() {
        let engine = engine();
        let failures = engine
            .validate_var(&json!("09123456789"), "required,ir_mobile")
            .unwrap();
        assert!(failures.is_empty());

        let failures = engine.validate_var(&json!(9123456789_u64), "ir_mobile").unwrap();
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].tag(), "ir_mobile");
    }

    #[test]
    fn test_extra_characters_come_from_param() {
        let engine = engine();
        assert!(engine.validate_var(&json!("ab_c"), "alnum_extra=_").unwrap().is_empty());
        assert!(engine.validate_var(&json!("علی_1"), "alnum_fa=_").unwrap().is_empty());
        assert_eq!(engine.validate_var(&json!("ab-c"), "alnum_extra=_").unwrap().len(), 1);
    }
}
