//! User input validation

use thiserror::Error;

/// Errors that can occur during user validation
#[derive(Debug, Error, Clone, PartialEq)]
pub enum UserValidationError {
    #[error("User ID must be a UUID")]
    InvalidId,

    #[error("Email cannot be empty")]
    EmptyEmail,

    #[error("Email exceeds maximum length of {0} characters")]
    EmailTooLong(usize),

    #[error("Email is not a valid address")]
    InvalidEmail,

    #[error("Name cannot be empty")]
    EmptyName,

    #[error("Name exceeds maximum length of {0} characters")]
    NameTooLong(usize),

    #[error("Password cannot be empty")]
    EmptyPassword,

    #[error("Password exceeds maximum length of {0} characters")]
    PasswordTooLong(usize),
}

const MAX_EMAIL_LENGTH: usize = 255;
const MAX_NAME_LENGTH: usize = 255;
const MAX_PASSWORD_LENGTH: usize = 128;

/// Validate an email address
///
/// Rules:
/// - Cannot be empty
/// - Maximum 255 characters
/// - Exactly one '@' with a non-empty local part and domain
pub fn validate_email(email: &str) -> Result<(), UserValidationError> {
    if email.is_empty() {
        return Err(UserValidationError::EmptyEmail);
    }

    if email.len() > MAX_EMAIL_LENGTH {
        return Err(UserValidationError::EmailTooLong(MAX_EMAIL_LENGTH));
    }

    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next().unwrap_or_default();

    if local.is_empty() || domain.is_empty() || domain.contains('@') || email.contains(' ') {
        return Err(UserValidationError::InvalidEmail);
    }

    Ok(())
}

/// Validate a display name
pub fn validate_name(name: &str) -> Result<(), UserValidationError> {
    if name.trim().is_empty() {
        return Err(UserValidationError::EmptyName);
    }

    if name.len() > MAX_NAME_LENGTH {
        return Err(UserValidationError::NameTooLong(MAX_NAME_LENGTH));
    }

    Ok(())
}

/// Validate a password
///
/// Rules:
/// - Cannot be empty
/// - Maximum 128 characters
///
/// No minimum length: any non-empty password is hashed as given.
pub fn validate_password(password: &str) -> Result<(), UserValidationError> {
    if password.is_empty() {
        return Err(UserValidationError::EmptyPassword);
    }

    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(UserValidationError::PasswordTooLong(MAX_PASSWORD_LENGTH));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_emails() {
        assert!(validate_email("a@x.com").is_ok());
        assert!(validate_email("first.last@example.org").is_ok());
    }

    #[test]
    fn test_empty_email() {
        assert_eq!(validate_email(""), Err(UserValidationError::EmptyEmail));
    }

    #[test]
    fn test_email_missing_parts() {
        assert_eq!(validate_email("ax.com"), Err(UserValidationError::InvalidEmail));
        assert_eq!(validate_email("@x.com"), Err(UserValidationError::InvalidEmail));
        assert_eq!(validate_email("a@"), Err(UserValidationError::InvalidEmail));
        assert_eq!(validate_email("a@b@c"), Err(UserValidationError::InvalidEmail));
    }

    #[test]
    fn test_email_too_long() {
        let long_email = format!("{}@x.com", "a".repeat(255));
        assert_eq!(
            validate_email(&long_email),
            Err(UserValidationError::EmailTooLong(255))
        );
    }

    #[test]
    fn test_valid_names() {
        assert!(validate_name("A").is_ok());
        assert!(validate_name("Jane Doe").is_ok());
    }

    #[test]
    fn test_empty_name() {
        assert_eq!(validate_name(""), Err(UserValidationError::EmptyName));
        assert_eq!(validate_name("   "), Err(UserValidationError::EmptyName));
    }

    #[test]
    fn test_valid_passwords() {
        assert!(validate_password("password123").is_ok());
        // Short passwords are accepted as given
        assert!(validate_password("p1").is_ok());
    }

    #[test]
    fn test_empty_password() {
        assert_eq!(
            validate_password(""),
            Err(UserValidationError::EmptyPassword)
        );
    }

    #[test]
    fn test_password_too_long() {
        let long_password = "a".repeat(129);
        assert_eq!(
            validate_password(&long_password),
            Err(UserValidationError::PasswordTooLong(128))
        );
    }
}
