//! Username and password rules applied at signup.

use crate::error::CoreError;

/// Longest accepted username, in characters.
pub const MAX_USERNAME_CHARS: usize = 150;

/// Shortest accepted password, in bytes.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Validate a username: 1..=150 characters, each a letter, a digit, or one
/// of `@ . + - _`.
pub fn validate_username(username: &str) -> Result<(), CoreError> {
    if username.is_empty() {
        return Err(CoreError::Validation("Username must not be empty".into()));
    }
    if username.chars().count() > MAX_USERNAME_CHARS {
        return Err(CoreError::Validation(format!(
            "Username must be at most {MAX_USERNAME_CHARS} characters"
        )));
    }
    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
    {
        return Err(CoreError::Validation(
            "Username may contain only letters, digits and @/./+/-/_".into(),
        ));
    }
    Ok(())
}

/// Validate that a password meets the minimum length.
pub fn validate_password_strength(password: &str) -> Result<(), CoreError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(CoreError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters long"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_word_characters_and_symbols() {
        assert!(validate_username("leo_tolstoy").is_ok());
        assert!(validate_username("a.b+c-d@e").is_ok());
        assert!(validate_username("лев").is_ok());
    }

    #[test]
    fn rejects_empty_and_spaces() {
        assert!(validate_username("").is_err());
        assert!(validate_username("leo tolstoy").is_err());
        assert!(validate_username("leo/../admin").is_err());
    }

    #[test]
    fn rejects_overlong_username() {
        let name = "x".repeat(MAX_USERNAME_CHARS + 1);
        assert!(validate_username(&name).is_err());
        let name = "x".repeat(MAX_USERNAME_CHARS);
        assert!(validate_username(&name).is_ok());
    }

    #[test]
    fn password_length_boundary() {
        assert!(validate_password_strength("short").is_err());
        assert!(validate_password_strength("exactly8").is_ok());
        let msg = validate_password_strength("1234567").unwrap_err().to_string();
        assert!(msg.contains("at least 8 characters"));
    }
}
