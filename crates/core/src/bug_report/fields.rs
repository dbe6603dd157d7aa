//! Per-field validators for bug report submissions.
//!
//! Each validator takes the raw JSON value submitted for one field (`None`
//! when the key is missing) and never panics on a wrong type: a number where
//! text is expected is simply a failed check. The `normalize_*` variants
//! return the cleaned value on success and are what the contract builds
//! records from; the `validate_*` functions are the pass/fail view.

use serde_json::Value;

use super::{
    BugPriority, BugStatus, FieldError, FieldErrorCode, FIELD_DESCRIPTION, FIELD_PRIORITY,
    FIELD_REPORTED_BY, FIELD_STATUS, FIELD_TITLE,
};

/// Minimum title length, in characters, after trimming.
pub const TITLE_MIN_LENGTH: usize = 3;
/// Maximum title length, in characters, after trimming.
pub const TITLE_MAX_LENGTH: usize = 100;
/// Minimum description length, in characters, after trimming.
pub const DESCRIPTION_MIN_LENGTH: usize = 10;

/// Outcome of a single field check.
pub type FieldResult = Result<(), FieldError>;

// ---------------------------------------------------------------------------
// Pass/fail validators
// ---------------------------------------------------------------------------

pub fn validate_title(value: Option<&Value>) -> FieldResult {
    normalize_title(value).map(drop)
}

/// Description has a minimum length but no upper bound.
pub fn validate_description(value: Option<&Value>) -> FieldResult {
    normalize_description(value).map(drop)
}

/// Status is optional; a missing, `null`, or empty value passes.
pub fn validate_status(value: Option<&Value>) -> FieldResult {
    normalize_status(value).map(drop)
}

/// Priority is optional; a missing, `null`, or empty value passes.
pub fn validate_priority(value: Option<&Value>) -> FieldResult {
    normalize_priority(value).map(drop)
}

/// Reporter is always required and never defaulted.
pub fn validate_reporter(value: Option<&Value>) -> FieldResult {
    normalize_reporter(value).map(drop)
}

// ---------------------------------------------------------------------------
// Normalizing validators
// ---------------------------------------------------------------------------

/// Return the trimmed title or the first rule it fails.
pub fn normalize_title(value: Option<&Value>) -> Result<String, FieldError> {
    let text = as_text(value).ok_or_else(|| {
        FieldError::new(
            FIELD_TITLE,
            FieldErrorCode::Required,
            "Title is required and must be a string",
        )
    })?;

    let len = text.chars().count();
    if len < TITLE_MIN_LENGTH {
        return Err(FieldError::new(
            FIELD_TITLE,
            FieldErrorCode::TooShort,
            format!("Title must be at least {TITLE_MIN_LENGTH} characters"),
        ));
    }
    if len > TITLE_MAX_LENGTH {
        return Err(FieldError::new(
            FIELD_TITLE,
            FieldErrorCode::TooLong,
            format!("Title cannot exceed {TITLE_MAX_LENGTH} characters"),
        ));
    }

    Ok(text.to_owned())
}

/// Return the trimmed description or the first rule it fails.
pub fn normalize_description(value: Option<&Value>) -> Result<String, FieldError> {
    let text = as_text(value).ok_or_else(|| {
        FieldError::new(
            FIELD_DESCRIPTION,
            FieldErrorCode::Required,
            "Description is required and must be a string",
        )
    })?;

    if text.chars().count() < DESCRIPTION_MIN_LENGTH {
        return Err(FieldError::new(
            FIELD_DESCRIPTION,
            FieldErrorCode::TooShort,
            format!("Description must be at least {DESCRIPTION_MIN_LENGTH} characters"),
        ));
    }

    Ok(text.to_owned())
}

/// `Ok(None)` means "not supplied"; the caller decides the default.
pub fn normalize_status(value: Option<&Value>) -> Result<Option<BugStatus>, FieldError> {
    if is_unset(value) {
        return Ok(None);
    }
    value
        .and_then(Value::as_str)
        .and_then(BugStatus::parse)
        .map(Some)
        .ok_or_else(|| {
            FieldError::new(
                FIELD_STATUS,
                FieldErrorCode::InvalidEnum,
                format!(
                    "Status must be one of: {}",
                    join_names(BugStatus::ALL.map(BugStatus::as_str))
                ),
            )
        })
}

/// `Ok(None)` means "not supplied"; the caller decides the default.
pub fn normalize_priority(value: Option<&Value>) -> Result<Option<BugPriority>, FieldError> {
    if is_unset(value) {
        return Ok(None);
    }
    value
        .and_then(Value::as_str)
        .and_then(BugPriority::parse)
        .map(Some)
        .ok_or_else(|| {
            FieldError::new(
                FIELD_PRIORITY,
                FieldErrorCode::InvalidEnum,
                format!(
                    "Priority must be one of: {}",
                    join_names(BugPriority::ALL.map(BugPriority::as_str))
                ),
            )
        })
}

/// Return the trimmed reporter name; blank counts as missing.
pub fn normalize_reporter(value: Option<&Value>) -> Result<String, FieldError> {
    match as_text(value) {
        Some(name) if !name.is_empty() => Ok(name.to_owned()),
        _ => Err(FieldError::new(
            FIELD_REPORTED_BY,
            FieldErrorCode::Required,
            "Reporter name is required",
        )),
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// The trimmed string, or `None` if the value is missing or not a string.
fn as_text(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).map(str::trim)
}

/// Optional enum fields treat missing, `null`, and `""` alike.
fn is_unset(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}

fn join_names<const N: usize>(names: [&str; N]) -> String {
    names.join(", ")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use serde_json::json;

    use super::*;

    fn code(result: FieldResult) -> Option<FieldErrorCode> {
        result.err().map(|e| e.code)
    }

    // -- title ---------------------------------------------------------------

    #[test]
    fn title_valid() {
        assert!(validate_title(Some(&json!("Valid Bug Title"))).is_ok());
    }

    #[test]
    fn title_length_boundaries() {
        let at = |n: usize| json!("A".repeat(n));
        assert_eq!(code(validate_title(Some(&at(2)))), Some(FieldErrorCode::TooShort));
        assert!(validate_title(Some(&at(3))).is_ok());
        assert!(validate_title(Some(&at(100))).is_ok());
        assert_eq!(code(validate_title(Some(&at(101)))), Some(FieldErrorCode::TooLong));
    }

    #[test]
    fn title_surrounding_whitespace_does_not_count() {
        assert_eq!(
            code(validate_title(Some(&json!("   AB   ")))),
            Some(FieldErrorCode::TooShort)
        );
        assert_eq!(
            normalize_title(Some(&json!("   Valid Title   "))).unwrap(),
            "Valid Title"
        );
        let padded = format!("  {}  ", "A".repeat(100));
        assert!(validate_title(Some(&json!(padded))).is_ok());
    }

    #[test]
    fn title_empty_string_is_too_short() {
        let err = validate_title(Some(&json!(""))).unwrap_err();
        assert_eq!(err.code, FieldErrorCode::TooShort);
        assert!(err.message.contains("at least 3 characters"));
    }

    #[test]
    fn title_missing_or_wrong_type_is_required() {
        assert_eq!(code(validate_title(None)), Some(FieldErrorCode::Required));
        assert_eq!(code(validate_title(Some(&Value::Null))), Some(FieldErrorCode::Required));
        let err = validate_title(Some(&json!(123))).unwrap_err();
        assert_eq!(err.code, FieldErrorCode::Required);
        assert!(err.message.contains("must be a string"));
    }

    #[test]
    fn title_length_counts_characters_not_bytes() {
        // Three characters, nine bytes.
        assert!(validate_title(Some(&json!("日本語"))).is_ok());
    }

    #[test]
    fn title_too_long_message() {
        let err = validate_title(Some(&json!("A".repeat(101)))).unwrap_err();
        assert_eq!(err.field, "title");
        assert_eq!(err.message, "Title cannot exceed 100 characters");
    }

    // -- description ---------------------------------------------------------

    #[test]
    fn description_length_boundaries() {
        assert_eq!(
            code(validate_description(Some(&json!("A".repeat(9))))),
            Some(FieldErrorCode::TooShort)
        );
        assert!(validate_description(Some(&json!("A".repeat(10)))).is_ok());
        assert!(validate_description(Some(&json!("A".repeat(50_000)))).is_ok());
    }

    #[test]
    fn description_short_message() {
        let err = validate_description(Some(&json!("Short"))).unwrap_err();
        assert_eq!(err.message, "Description must be at least 10 characters");
    }

    #[test]
    fn description_missing_or_wrong_type_is_required() {
        assert_eq!(code(validate_description(None)), Some(FieldErrorCode::Required));
        assert_eq!(
            code(validate_description(Some(&Value::Null))),
            Some(FieldErrorCode::Required)
        );
        assert_eq!(
            code(validate_description(Some(&json!(["not", "text"])))),
            Some(FieldErrorCode::Required)
        );
    }

    // -- status / priority ---------------------------------------------------

    #[test]
    fn status_accepts_every_enumerator() {
        for name in ["open", "in-progress", "resolved"] {
            assert!(validate_status(Some(&json!(name))).is_ok(), "{name} should pass");
        }
    }

    #[test]
    fn status_unset_passes() {
        assert!(validate_status(None).is_ok());
        assert!(validate_status(Some(&Value::Null)).is_ok());
        assert_matches!(normalize_status(Some(&json!(""))), Ok(None));
    }

    #[test]
    fn status_outside_enumeration_fails() {
        let err = validate_status(Some(&json!("closed"))).unwrap_err();
        assert_eq!(err.code, FieldErrorCode::InvalidEnum);
        assert_eq!(err.message, "Status must be one of: open, in-progress, resolved");
        assert_eq!(code(validate_status(Some(&json!(1)))), Some(FieldErrorCode::InvalidEnum));
    }

    #[test]
    fn priority_accepts_every_enumerator() {
        for name in ["low", "medium", "high", "critical"] {
            assert_matches!(normalize_priority(Some(&json!(name))), Ok(Some(_)));
        }
    }

    #[test]
    fn priority_unset_passes() {
        assert!(validate_priority(None).is_ok());
    }

    #[test]
    fn priority_outside_enumeration_fails() {
        let err = validate_priority(Some(&json!("super-urgent"))).unwrap_err();
        assert_eq!(err.code, FieldErrorCode::InvalidEnum);
        assert_eq!(
            err.message,
            "Priority must be one of: low, medium, high, critical"
        );
    }

    // -- reporter ------------------------------------------------------------

    #[test]
    fn reporter_blank_or_missing_is_required() {
        for value in [None, Some(json!("")), Some(json!("   ")), Some(json!(7))] {
            let err = validate_reporter(value.as_ref()).unwrap_err();
            assert_eq!(err.code, FieldErrorCode::Required);
            assert_eq!(err.message, "Reporter name is required");
        }
    }

    #[test]
    fn reporter_is_trimmed() {
        assert_eq!(normalize_reporter(Some(&json!("  John Doe "))).unwrap(), "John Doe");
    }
}
