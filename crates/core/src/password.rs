//! Password policy for self-service registration.
//!
//! Hashing lives in the API crate next to the argon2 dependency; this module
//! only decides whether a plaintext is acceptable.

/// Minimum password length in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length in characters.
pub const MAX_PASSWORD_LENGTH: usize = 72;

/// Characters that satisfy the "special character" rule.
pub const SPECIAL_CHARACTERS: &str = "!@#$%^&";

/// Check a plaintext password against the registration policy.
///
/// Rules are evaluated in order and only the first violation is reported:
/// length bounds, no leading/trailing space, then character classes.
/// Returns `None` when the password is acceptable.
pub fn validate_password(password: &str) -> Option<&'static str> {
    let length = password.chars().count();

    if length < MIN_PASSWORD_LENGTH {
        return Some("Password must be longer than 8 characters");
    }
    if length > MAX_PASSWORD_LENGTH {
        return Some("Password must be less than 72 characters");
    }
    if password.starts_with(' ') || password.ends_with(' ') {
        return Some("Password must not start or end with empty space");
    }

    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_special = password.chars().any(|c| SPECIAL_CHARACTERS.contains(c));

    if !(has_upper && has_lower && has_digit && has_special) {
        return Some(
            "Password must contain at least 1 upper case letter, lower case letter, \
             number, and special character",
        );
    }

    None
}
