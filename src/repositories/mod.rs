pub mod message_repository;
pub mod rule_repository;
