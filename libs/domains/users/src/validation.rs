//! Field validation rules for registration requests.
//!
//! Every function is wired into the `validator` derive on the request DTOs,
//! so a request reports all of its violated rules at once rather than
//! failing on the first.

use std::borrow::Cow;
use validator::ValidationError;

/// Domains of disposable-email providers rejected at registration.
pub const TEMP_EMAIL_PROVIDERS: &[&str] = &[
    "tempmail.com",
    "mailinator.com",
    "yopmail.com",
    "guerrillamail.com",
];

/// Characters accepted as the "special character" in a password.
pub const PASSWORD_SPECIAL_CHARS: &str = r#"!@#$%^&*()_+-=[]{};':"\|,.<>/?"#;

const MIN_NAME_LENGTH: usize = 3;
const PASSWORD_MIN_LENGTH: usize = 8;
const PASSWORD_MAX_LENGTH: usize = 20;

const PASSWORD_RULE_MESSAGE: &str = "Password must include 1 uppercase letter, 1 lowercase letter, 1 number, 1 special character, and be 8-20 characters long.";

fn rule_violation(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

pub fn validate_first_name(value: &str) -> Result<(), ValidationError> {
    if value.trim().len() >= MIN_NAME_LENGTH {
        Ok(())
    } else {
        Err(rule_violation(
            "first_name_length",
            "First name must be at least 3 characters long.",
        ))
    }
}

pub fn validate_last_name(value: &str) -> Result<(), ValidationError> {
    if value.trim().len() >= MIN_NAME_LENGTH {
        Ok(())
    } else {
        Err(rule_violation(
            "last_name_length",
            "Last name must be at least 3 characters long.",
        ))
    }
}

/// An email must carry a domain part, and the domain must not belong to a
/// disposable-email provider.
pub fn validate_email(value: &str) -> Result<(), ValidationError> {
    let Some(domain) = value.split('@').nth(1) else {
        return Err(rule_violation(
            "email_format",
            "A valid email is required.",
        ));
    };

    if is_temporary_domain(domain) {
        return Err(rule_violation(
            "temporary_email",
            "Temporary email addresses are not allowed.",
        ));
    }

    Ok(())
}

pub fn is_temporary_domain(domain: &str) -> bool {
    TEMP_EMAIL_PROVIDERS
        .iter()
        .any(|provider| domain.eq_ignore_ascii_case(provider))
}

pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    let ten_digits = value.len() == 10 && value.bytes().all(|b| b.is_ascii_digit());
    if ten_digits {
        Ok(())
    } else {
        Err(rule_violation(
            "phone_format",
            "Phone number must be exactly 10 digits.",
        ))
    }
}

pub fn validate_password(value: &str) -> Result<(), ValidationError> {
    if is_valid_password(value) {
        Ok(())
    } else {
        Err(rule_violation("password_strength", PASSWORD_RULE_MESSAGE))
    }
}

/// A password is valid iff it is 8-20 characters long and contains at least
/// one uppercase letter, one lowercase letter, one digit, and one character
/// from [`PASSWORD_SPECIAL_CHARS`].
pub fn is_valid_password(password: &str) -> bool {
    let length = password.chars().count();
    let length_ok = (PASSWORD_MIN_LENGTH..=PASSWORD_MAX_LENGTH).contains(&length);
    let uppercase = password.chars().any(|c| c.is_ascii_uppercase());
    let lowercase = password.chars().any(|c| c.is_ascii_lowercase());
    let digit = password.chars().any(|c| c.is_ascii_digit());
    let special = password.chars().any(|c| PASSWORD_SPECIAL_CHARS.contains(c));

    length_ok && uppercase && lowercase && digit && special
}
