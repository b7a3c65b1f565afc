use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

use super::Organisation;

/// Stored user row. Not serialisable: the password hash never leaves the
/// server, clients receive a [`UserProfile`] instead.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password_hash: String,
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organisations: Option<Vec<Organisation>>,
}

impl User {
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            user_id: self.id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
            organisations: None,
        }
    }

    pub fn profile_with_organisations(&self, organisations: Vec<Organisation>) -> UserProfile {
        UserProfile {
            organisations: Some(organisations),
            ..self.profile()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: Uuid::new_v4(),
            first_name: "John".to_string(),
            last_name: "Doe".to_string(),
            email: "johndoe@example.com".to_string(),
            password_hash: "$argon2id$v=19$secret".to_string(),
            phone: Some("1234567890".to_string()),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn profile_never_exposes_password_hash() {
        let json = serde_json::to_value(user().profile()).unwrap();

        assert_eq!(json["firstName"], "John");
        assert_eq!(json["email"], "johndoe@example.com");
        assert!(json.get("password").is_none());
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("organisations").is_none());
    }

    #[test]
    fn profile_nests_organisations_when_given() {
        let user = user();
        let org = Organisation {
            id: Uuid::new_v4(),
            name: "John's Organisation".to_string(),
            description: None,
            created_at: Utc::now(),
        };

        let json = serde_json::to_value(user.profile_with_organisations(vec![org.clone()])).unwrap();

        assert_eq!(json["userId"], user.id.to_string());
        assert_eq!(json["organisations"][0]["orgId"], org.id.to_string());
        assert_eq!(json["organisations"][0]["name"], "John's Organisation");
    }
}
