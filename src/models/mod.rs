pub mod field_error_model;
pub mod plural_message_model;
pub mod raw_failure_model;
pub mod validation_error_model;
