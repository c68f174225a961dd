pub mod extractors;
pub mod password;
pub mod service;
pub mod token;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::{not_blank, User};

// Re-export necessary items
pub use extractors::AuthenticatedUser;
pub use password::PasswordHasher;
pub use service::AuthService;
pub use token::{AuthError, Claims, TokenService};

pub const REGISTERED_MESSAGE: &str = "User Created Successfully";
pub const LOGGED_IN_MESSAGE: &str = "Logged in successfully";

/// bcrypt only reads the first 72 bytes of a password.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Byte length, not char length: a multibyte password can pass a char count and still
/// be truncated by bcrypt.
fn within_bcrypt_limit(password: &str) -> Result<(), ValidationError> {
    if password.len() > MAX_PASSWORD_BYTES {
        return Err(ValidationError::new("password_too_long"));
    }
    Ok(())
}

/// Represents the payload for a new user registration request.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Display name, 1 to 100 characters, not just whitespace.
    #[validate(length(min = 1, max = 100), custom = "not_blank")]
    pub name: String,
    /// Login email. Stored trimmed and lowercased.
    #[validate(email)]
    pub email: String,
    /// At least 6 characters and at most 72 bytes.
    #[validate(length(min = 6), custom = "within_bcrypt_limit")]
    pub password: String,
}

/// Represents the payload for a user login request.
///
/// Only presence is checked here. Anything else about the credentials is reported
/// as invalid credentials, never as a field-level error.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Body of a successful `POST /register`.
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub user: User,
    pub message: String,
}

/// Body of a successful `POST /login`.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: User,
    /// Bearer token for the `Authorization` header.
    pub token: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    fn register(name: &str, email: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_register_request_validation() {
        assert!(register("John", "john@x.com", "secret").validate().is_ok());
        assert!(register("John Doe", "john@example.com", "mypassword").validate().is_ok());

        assert!(register("", "john@x.com", "secret").validate().is_err());
        assert!(register("   ", "john@x.com", "secret").validate().is_err());
        assert!(register(&"a".repeat(101), "john@x.com", "secret").validate().is_err());
        assert!(register("John", "johnx.com", "secret").validate().is_err());
        assert!(register("John", "", "secret").validate().is_err());
        assert!(register("John", "john@x.com", "123").validate().is_err());
        assert!(register("John", "john@x.com", &"p".repeat(73)).validate().is_err());
    }

    #[test]
    fn test_password_limit_counts_bytes() {
        assert!(register("John", "john@x.com", &"p".repeat(72)).validate().is_ok());

        // 36 two-byte chars + 30 ASCII: 66 chars, 102 bytes.
        let multibyte = format!("{}{}", "é".repeat(36), "A".repeat(30));
        assert_eq!(multibyte.chars().count(), 66);
        assert!(register("John", "john@x.com", &multibyte).validate().is_err());

        // 36 two-byte chars exactly fill the limit.
        assert!(register("John", "john@x.com", &"é".repeat(36)).validate().is_ok());
        assert!(register("John", "john@x.com", &"é".repeat(37)).validate().is_err());
    }

    #[test]
    fn test_missing_fields_fail_to_deserialize() {
        let missing_password = serde_json::from_str::<RegisterRequest>(
            r#"{"name":"John","email":"john@x.com"}"#,
        );
        assert!(missing_password.is_err());

        let missing_email = serde_json::from_str::<LoginRequest>(r#"{"password":"secret"}"#);
        assert!(missing_email.is_err());
    }
}
