pub mod locale_utils;
pub mod plural_utils;
pub mod validation_utils;
pub mod validators;
