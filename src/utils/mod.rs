//! Shared utilities: input validation helpers.

pub mod validation;

pub use validation::{is_valid_hostname, parse_hostname, validate_external_network};
