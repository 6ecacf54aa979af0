//! Request validation trait and helper macros.
//!
//! Every mutating request type implements [`RequestValidation`]; handlers
//! call `request.validate()?` before touching the store.

use crate::error::ApiError;

/// Validation entry point for request payloads.
pub trait RequestValidation {
    fn validate(&self) -> Result<(), ApiError>;
}

/// Fail with a validation error when a required string field is empty.
#[macro_export]
macro_rules! validate_required {
    ($field:expr, $message:expr) => {
        if $field.trim().is_empty() {
            return Err($crate::error::ApiError::validation($message));
        }
    };
}

/// Fail with a validation error unless the condition holds.
#[macro_export]
macro_rules! validate_field {
    ($field:expr, $condition:expr, $message:expr) => {
        if !$condition {
            let _ = &$field;
            return Err($crate::error::ApiError::validation($message));
        }
    };
}

/// Fail with a validation error when a string field is outside a length range.
#[macro_export]
macro_rules! validate_length {
    ($field:expr, $min:expr, $max:expr, $message:expr) => {
        if $field.len() < $min || $field.len() > $max {
            return Err($crate::error::ApiError::validation($message));
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Demo {
        name: String,
    }

    impl RequestValidation for Demo {
        fn validate(&self) -> Result<(), ApiError> {
            validate_required!(self.name, "Name is required");
            validate_length!(self.name, 1, 10, "Name must be at most 10 characters");
            Ok(())
        }
    }

    #[test]
    fn empty_required_field_fails() {
        let demo = Demo { name: "  ".into() };
        assert!(demo.validate().is_err());
    }

    #[test]
    fn populated_field_passes() {
        let demo = Demo { name: "Kim".into() };
        assert!(demo.validate().is_ok());
    }
}
