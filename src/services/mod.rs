pub mod rule_engine_service;
pub mod translation_service;
pub mod validator_service;
