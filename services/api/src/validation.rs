//! Input validation utilities

/// Minimum password length, counted in characters
pub const MIN_PASSWORD_LENGTH: usize = 6;

/// Validate username
pub fn validate_username(username: &str) -> Result<(), String> {
    if username.trim().is_empty() {
        return Err("Username is required".to_string());
    }

    Ok(())
}

/// Validate password
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.is_empty() {
        return Err("Password is required".to_string());
    }

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(format!(
            "Password must be at least {} characters long",
            MIN_PASSWORD_LENGTH
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_required() {
        assert!(validate_username("").is_err());
        assert!(validate_username("  ").is_err());
        assert!(validate_username("alice").is_ok());
    }

    #[test]
    fn test_password_minimum_length() {
        assert_eq!(
            validate_password("").unwrap_err(),
            "Password is required".to_string()
        );
        assert!(validate_password("12345").is_err());
        assert!(validate_password("secret").is_ok());
        // Multi-byte characters count once each
        assert!(validate_password("ééééé").is_err());
        assert!(validate_password("éééééé").is_ok());
    }
}
