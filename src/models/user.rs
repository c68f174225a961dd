use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A user as it is stored, including the password digest.
///
/// Never serialized. Convert to [`User`] before anything leaves the service layer.
#[derive(Debug, Clone, FromRow)]
pub struct UserRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// The public view of a user, safe to return to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            email: record.email,
            created_at: record.created_at,
        }
    }
}

/// A validated, normalized registration ready to be persisted.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password_hash: String,
}

impl NewUser {
    pub fn into_record(self) -> UserRecord {
        UserRecord {
            id: Uuid::new_v4(),
            name: self.name,
            email: self.email,
            password_hash: self.password_hash,
            created_at: Utc::now(),
        }
    }
}

/// Emails are compared case-insensitively and without surrounding whitespace.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email("  John@X.com "), "john@x.com");
        assert_eq!(normalize_email("john@x.com"), "john@x.com");
    }

    #[test]
    fn test_public_user_has_no_hash() {
        let record = NewUser {
            name: "John".to_string(),
            email: "john@x.com".to_string(),
            password_hash: "$2b$04$digest".to_string(),
        }
        .into_record();

        let json = serde_json::to_value(User::from(record.clone())).unwrap();
        assert_eq!(json["id"], record.id.to_string());
        assert_eq!(json["email"], "john@x.com");
        assert!(json.get("password_hash").is_none());
        assert!(!json.to_string().contains("$2b$04$digest"));
    }
}
