use regex::Regex;
use std::sync::OnceLock;

use crate::utils::error::AppError;

pub const INVALID_RECIPIENTS_MESSAGE: &str = "Invalid recipient list format.";

static EMAIL_PATTERN: OnceLock<Regex> = OnceLock::new();

fn email_pattern() -> &'static Regex {
    EMAIL_PATTERN.get_or_init(|| {
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
    })
}

pub fn is_valid_email(address: &str) -> bool {
    email_pattern().is_match(address)
}

/// Parses the JSON-encoded recipient array, trimming trailing whitespace
/// from each address.
pub fn parse_recipients(raw: Option<&str>) -> Result<Vec<String>, AppError> {
    let raw = raw.ok_or_else(|| {
        tracing::warn!("Invalid recipients format: field missing");
        AppError::Validation(INVALID_RECIPIENTS_MESSAGE.to_string())
    })?;

    let parsed: Vec<String> = serde_json::from_str(raw).map_err(|e| {
        tracing::warn!(error = %e, "Invalid recipients format");
        AppError::Validation(INVALID_RECIPIENTS_MESSAGE.to_string())
    })?;

    Ok(parsed
        .into_iter()
        .map(|address| address.trim_end().to_string())
        .collect())
}

/// Rejects the whole list if any address is malformed.
pub fn validate_recipients(recipients: &[String]) -> Result<(), AppError> {
    let invalid: Vec<&str> = recipients
        .iter()
        .map(String::as_str)
        .filter(|address| !is_valid_email(address))
        .collect();

    if invalid.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "Invalid email addresses: {}",
            invalid.join(", ")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_pattern() {
        assert!(is_valid_email("alice@example.com"));
        assert!(is_valid_email("a.b+c@sub.example.co"));
        assert!(!is_valid_email("alice.example.com"));
        assert!(!is_valid_email("alice@example"));
        assert!(!is_valid_email("al ice@example.com"));
        assert!(!is_valid_email("alice@@example.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_parse_recipients_trims_trailing_whitespace_only() {
        let list = parse_recipients(Some(r#"["a@x.io  ", " b@y.io"]"#)).unwrap();
        assert_eq!(list, vec!["a@x.io", " b@y.io"]);
    }

    #[test]
    fn test_parse_recipients_rejects_bad_json() {
        for raw in [Some("not json"), Some(r#"{"a":1}"#), Some("[1, 2]"), None] {
            match parse_recipients(raw) {
                Err(AppError::Validation(msg)) => assert_eq!(msg, INVALID_RECIPIENTS_MESSAGE),
                other => panic!("expected validation error, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_validate_recipients_lists_every_invalid_address() {
        let list = vec![
            "ok@example.com".to_string(),
            "nope".to_string(),
            "also@bad".to_string(),
        ];
        match validate_recipients(&list) {
            Err(AppError::Validation(msg)) => {
                assert_eq!(msg, "Invalid email addresses: nope, also@bad")
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_recipients_accepts_empty_list() {
        assert!(validate_recipients(&[]).is_ok());
    }
}
