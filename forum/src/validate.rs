//! Shallow JSON payload validation.

use crate::ForumError;

/// Guard a free-form JSON payload.
///
/// Empty is accepted and treated as "absent". Otherwise the payload must
/// start with `{` and be strictly shorter than `max_size` bytes. This is
/// a shape check, not a parse — hosts embedding the payload elsewhere
/// remain responsible for real JSON parsing.
pub fn validate_json(field: &str, payload: &str, max_size: usize) -> Result<(), ForumError> {
    if payload.is_empty() {
        return Ok(());
    }
    if !payload.starts_with('{') {
        return Err(ForumError::Validation(format!(
            "{field} must be a JSON object (if specified)"
        )));
    }
    if payload.len() >= max_size {
        return Err(ForumError::Validation(format!(
            "{field} should be shorter than {max_size} bytes"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_payload_is_absent() {
        assert!(validate_json("payload", "", 16).is_ok());
    }

    #[test]
    fn payload_must_open_an_object() {
        assert!(validate_json("payload", "{}", 16).is_ok());
        assert!(validate_json("payload", r#"{"k":"v"}"#, 16).is_ok());
        assert!(matches!(
            validate_json("payload", "not-json", 16),
            Err(ForumError::Validation(_))
        ));
        assert!(matches!(
            validate_json("payload", "[1,2]", 16),
            Err(ForumError::Validation(_))
        ));
    }

    #[test]
    fn size_limit_is_exclusive() {
        let at_limit = format!("{{{}}}", "a".repeat(14)); // exactly 16 bytes
        assert!(matches!(
            validate_json("payload", &at_limit, 16),
            Err(ForumError::Validation(_))
        ));
        let under_limit = format!("{{{}}}", "a".repeat(13));
        assert!(validate_json("payload", &under_limit, 16).is_ok());
    }

    #[test]
    fn shape_check_only_inspects_the_first_byte() {
        // Deliberately shallow: this is not a JSON grammar validator.
        assert!(validate_json("payload", "{not really json", 32).is_ok());
    }
}
