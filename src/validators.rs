/// Input validators - length limits and format checks on request fields.
use lazy_static::lazy_static;
use regex::Regex;

use crate::error::ValidationError;

const MAX_EMAIL_LENGTH: usize = 254; // RFC 5321
const MIN_EMAIL_LENGTH: usize = 5;

lazy_static! {
    // RFC 5322 simplified email regex (practical validation)
    static ref EMAIL_REGEX: Regex = Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$"
    ).unwrap();
}

/// Validates an email address: trims, enforces length bounds, checks format.
pub fn is_valid_email(email: &str) -> Result<String, ValidationError> {
    let trimmed = email.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField("email".to_string()));
    }

    if trimmed.len() < MIN_EMAIL_LENGTH || !EMAIL_REGEX.is_match(trimmed) {
        return Err(ValidationError::InvalidFormat("email".to_string()));
    }

    if trimmed.len() > MAX_EMAIL_LENGTH {
        return Err(ValidationError::TooLong("email".to_string(), MAX_EMAIL_LENGTH));
    }

    Ok(trimmed.to_string())
}

/// Validates a free-text field: non-empty after trimming, bounded length.
pub fn is_valid_field(
    name: &str,
    value: &str,
    max_length: usize,
) -> Result<String, ValidationError> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField(name.to_string()));
    }

    if trimmed.len() > max_length {
        return Err(ValidationError::TooLong(name.to_string(), max_length));
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        let valid = vec![
            "user@example.com",
            "first.last@example.co.uk",
            "user+tag@example.com",
        ];
        for email in valid {
            assert!(is_valid_email(email).is_ok(), "Should accept: {}", email);
        }
    }

    #[test]
    fn test_invalid_emails() {
        let invalid = vec!["notanemail", "user@", "@example.com", "user@@example.com", ""];
        for email in invalid {
            assert!(is_valid_email(email).is_err(), "Should reject: {}", email);
        }
    }

    #[test]
    fn test_email_is_trimmed() {
        let email = is_valid_email("  user@example.com  ").expect("Should accept padded email");
        assert_eq!(email, "user@example.com");
    }

    #[test]
    fn test_overlong_email_rejected() {
        let local = "a".repeat(250);
        let email = format!("{}@example.com", local);
        assert!(is_valid_email(&email).is_err());
    }

    #[test]
    fn test_empty_field_rejected() {
        assert!(is_valid_field("preference_type", "   ", 64).is_err());
    }

    #[test]
    fn test_overlong_field_rejected() {
        let value = "x".repeat(65);
        assert!(is_valid_field("preference_type", &value, 64).is_err());
    }

    #[test]
    fn test_field_is_trimmed() {
        let value = is_valid_field("value", " dad jokes ", 64).expect("Should accept");
        assert_eq!(value, "dad jokes");
    }
}
