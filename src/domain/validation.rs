use once_cell::sync::Lazy;
use regex::Regex;

/// Permissive `local@domain.tld` shape, not full RFC 5322. Rejects embedded
/// whitespace, a missing `@`, and a dot-less domain part.
static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid"));

pub const MSG_NAME_REQUIRED: &str = "Name is required";
pub const MSG_EMAIL_REQUIRED: &str = "Email is required";
pub const MSG_EMAIL_INVALID: &str = "Please enter a valid email address";
pub const MSG_PHONE_INVALID: &str = "Please enter a valid phone number";
pub const MSG_PROJECT_DETAILS_TOO_LONG: &str =
    "Project details must be less than 1000 characters";

/// Minimum significant characters for a phone number. A length heuristic,
/// not a phone-number grammar.
pub const PHONE_MIN_CHARS: usize = 10;

/// Maximum characters allowed in the project details field.
pub const PROJECT_DETAILS_MAX_CHARS: usize = 1000;

pub fn is_non_empty(value: &str) -> bool {
    !value.trim().is_empty()
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value.trim())
}

/// Empty is valid (the field is optional); anything else must carry at least
/// [`PHONE_MIN_CHARS`] characters after trimming.
pub fn is_valid_phone(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty() || trimmed.chars().count() >= PHONE_MIN_CHARS
}

/// Empty is valid; anything else must stay within
/// [`PROJECT_DETAILS_MAX_CHARS`] characters after trimming.
pub fn is_valid_project_details(value: &str) -> bool {
    value.trim().chars().count() <= PROJECT_DETAILS_MAX_CHARS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_only_counts_as_empty() {
        assert!(!is_non_empty(""));
        assert!(!is_non_empty("   \t\n"));
        assert!(is_non_empty("  a  "));
    }

    #[test]
    fn email_accepts_simple_shapes() {
        assert!(is_valid_email("test@example.com"));
        assert!(is_valid_email("first.last@sub.example.co"));
        assert!(is_valid_email("  padded@example.com  "));
    }

    #[test]
    fn email_rejects_malformed_shapes() {
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("invalid"));
        assert!(!is_valid_email("no-at-sign.example.com"));
        assert!(!is_valid_email("user@domain-without-dot"));
        assert!(!is_valid_email("user name@example.com"));
        assert!(!is_valid_email("user@exam ple.com"));
    }

    #[test]
    fn phone_is_optional_but_length_checked_when_present() {
        assert!(is_valid_phone(""));
        assert!(is_valid_phone("   "));
        assert!(is_valid_phone("0123456789"));
        assert!(is_valid_phone("+1 (555) 010-2030"));
        assert!(!is_valid_phone("12345"));
        assert!(!is_valid_phone("  123456789  "));
    }

    #[test]
    fn project_details_capped_at_limit() {
        assert!(is_valid_project_details(""));
        assert!(is_valid_project_details("short note"));
        assert!(is_valid_project_details(&"x".repeat(PROJECT_DETAILS_MAX_CHARS)));
        assert!(!is_valid_project_details(&"x".repeat(PROJECT_DETAILS_MAX_CHARS + 1)));
        // Surrounding whitespace does not count against the limit.
        let padded = format!("  {}  ", "x".repeat(PROJECT_DETAILS_MAX_CHARS));
        assert!(is_valid_project_details(&padded));
    }

    #[test]
    fn validators_are_idempotent() {
        for input in ["", "  ", "test@example.com", "invalid", "12345", "0123456789"] {
            assert_eq!(is_non_empty(input), is_non_empty(input));
            assert_eq!(is_valid_email(input), is_valid_email(input));
            assert_eq!(is_valid_phone(input), is_valid_phone(input));
            assert_eq!(is_valid_project_details(input), is_valid_project_details(input));
        }
    }
}
