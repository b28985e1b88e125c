//! Field validation for the account forms

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid regex pattern for email")
});

const SPECIAL_CHARS: &str = "!@#$%^&*(),.?\":{}|<>";

/// A rejected form field. The display text is the message shown next to
/// the field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Username is required")]
    UsernameRequired,

    #[error("Username must be at least 3 characters")]
    UsernameTooShort,

    #[error("Email is required")]
    EmailRequired,

    #[error("Please enter a valid email address")]
    InvalidEmail,

    #[error("Password is required")]
    PasswordRequired,

    #[error("Password does not meet all requirements")]
    WeakPassword,

    #[error("Verification code is required")]
    CodeRequired,

    #[error("Please enter a valid 6-digit code")]
    InvalidCode,

    #[error("Please confirm your password")]
    ConfirmationRequired,

    #[error("Passwords do not match")]
    PasswordMismatch,
}

impl FormError {
    /// Name of the field the error belongs to
    pub fn field(&self) -> &'static str {
        match self {
            FormError::UsernameRequired | FormError::UsernameTooShort => "username",
            FormError::EmailRequired | FormError::InvalidEmail => "email",
            FormError::PasswordRequired | FormError::WeakPassword => "password",
            FormError::CodeRequired | FormError::InvalidCode => "code",
            FormError::ConfirmationRequired | FormError::PasswordMismatch => "confirm_password",
        }
    }
}

/// Checklist shown under a password field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordRequirements {
    pub min_length: bool,
    pub max_length: bool,
    pub no_spaces: bool,
    pub upper_case: bool,
    pub lower_case: bool,
    pub number: bool,
    pub special_char: bool,
}

impl PasswordRequirements {
    pub fn check(password: &str) -> Self {
        let len = password.chars().count();
        Self {
            min_length: len >= 8,
            max_length: len <= 128,
            no_spaces: !password.chars().any(char::is_whitespace),
            upper_case: password.chars().any(|c| c.is_ascii_uppercase()),
            lower_case: password.chars().any(|c| c.is_ascii_lowercase()),
            number: password.chars().any(|c| c.is_ascii_digit()),
            special_char: password.chars().any(|c| SPECIAL_CHARS.contains(c)),
        }
    }

    pub fn all_met(&self) -> bool {
        self.min_length
            && self.max_length
            && self.no_spaces
            && self.upper_case
            && self.lower_case
            && self.number
            && self.special_char
    }
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}

pub fn is_valid_password(password: &str) -> bool {
    PasswordRequirements::check(password).all_met()
}

pub fn validate_username(username: &str) -> Result<(), FormError> {
    if username.trim().is_empty() {
        Err(FormError::UsernameRequired)
    } else if username.chars().count() < 3 {
        Err(FormError::UsernameTooShort)
    } else {
        Ok(())
    }
}

pub fn validate_email(email: &str) -> Result<(), FormError> {
    if email.trim().is_empty() {
        Err(FormError::EmailRequired)
    } else if !is_valid_email(email) {
        Err(FormError::InvalidEmail)
    } else {
        Ok(())
    }
}

pub fn validate_password(password: &str) -> Result<(), FormError> {
    if password.trim().is_empty() {
        Err(FormError::PasswordRequired)
    } else if !is_valid_password(password) {
        Err(FormError::WeakPassword)
    } else {
        Ok(())
    }
}

/// A verification code is exactly six ASCII digits
pub fn validate_code(code: &str) -> Result<(), FormError> {
    if code.trim().is_empty() {
        Err(FormError::CodeRequired)
    } else if code.chars().count() != 6 || !code.chars().all(|c| c.is_ascii_digit()) {
        Err(FormError::InvalidCode)
    } else {
        Ok(())
    }
}

pub fn validate_confirmation(password: &str, confirmation: &str) -> Result<(), FormError> {
    if confirmation.is_empty() {
        Err(FormError::ConfirmationRequired)
    } else if password != confirmation {
        Err(FormError::PasswordMismatch)
    } else {
        Ok(())
    }
}

/// Validate the sign-up form. Every failing field is reported.
pub fn validate_sign_up(username: &str, email: &str, password: &str) -> Result<(), Vec<FormError>> {
    collect([
        validate_username(username),
        validate_email(email),
        validate_password(password),
    ])
}

/// Validate the last step of the password reset flow
pub fn validate_password_reset(password: &str, confirmation: &str) -> Result<(), Vec<FormError>> {
    collect([
        validate_password(password),
        validate_confirmation(password, confirmation),
    ])
}

fn collect<const N: usize>(results: [Result<(), FormError>; N]) -> Result<(), Vec<FormError>> {
    let errors: Vec<FormError> = results.into_iter().filter_map(Result::err).collect();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
