pub mod errors;
pub mod params;
pub mod translations;
pub mod validations;
