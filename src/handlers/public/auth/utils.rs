use serde::{Deserialize, Serialize};

use crate::database::models::UserProfile;
use crate::error::ApiError;
use crate::services::{AuthSession, Registration};

/// POST /auth/register body. Absent fields deserialize as empty so they are
/// reported by validation rather than by the JSON extractor.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthPayload {
    pub access_token: String,
    pub user: UserProfile,
}

impl From<AuthSession> for AuthPayload {
    fn from(session: AuthSession) -> Self {
        Self {
            user: session.user.profile_with_organisations(session.organisations),
            access_token: session.access_token,
        }
    }
}

impl RegisterRequest {
    /// Checks required fields in order and reports the first one missing.
    pub fn validate(self) -> Result<Registration, ApiError> {
        let first_name = required(&self.first_name, "First name is required")?;
        let last_name = required(&self.last_name, "Last name is required")?;
        let email = required(&self.email, "Email is required")?.to_lowercase();
        // Passwords are taken verbatim; only emptiness is checked
        if self.password.is_empty() {
            return Err(ApiError::validation("Password is required"));
        }
        validate_email_format(&email).map_err(ApiError::validation)?;

        Ok(Registration {
            first_name,
            last_name,
            email,
            password: self.password,
            phone: self
                .phone
                .map(|p| p.trim().to_string())
                .filter(|p| !p.is_empty()),
        })
    }
}

fn required(value: &str, message: &'static str) -> Result<String, ApiError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ApiError::validation(message));
    }
    Ok(value.to_string())
}

/// Basic email shape check: one `@`, non-empty local part, dotted domain.
pub fn validate_email_format(email: &str) -> Result<(), &'static str> {
    let Some((local, domain)) = email.split_once('@') else {
        return Err("Invalid email format");
    };

    if local.is_empty() || domain.contains('@') || email.chars().any(char::is_whitespace) {
        return Err("Invalid email format");
    }

    let mut labels = domain.split('.');
    let valid_domain = domain.contains('.') && labels.all(|label| !label.is_empty());
    if !valid_domain {
        return Err("Invalid email format");
    }

    Ok(())
}
