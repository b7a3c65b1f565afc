use tracing::{info, warn};

use crate::auth::{hash_password, verify_password, Credentials, UNMATCHABLE_PASSWORD_HASH};
use crate::database::models::{NewOrganisation, NewUser, Organisation, User};
use crate::database::Store;
use crate::error::ApiError;
use crate::state::AppState;

pub const EMAIL_TAKEN: &str = "Email already exists";
pub const AUTHENTICATION_FAILED: &str = "Authentication failed";

/// Registration input that already passed field validation. Email is
/// trimmed and lowercased.
#[derive(Debug, Clone)]
pub struct Registration {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub phone: Option<String>,
}

/// Result of a successful register or login.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub access_token: String,
    pub user: User,
    pub organisations: Vec<Organisation>,
}

/// Registration and login flows.
pub struct AuthService<'a> {
    store: &'a dyn Store,
    credentials: &'a Credentials,
}

impl<'a> AuthService<'a> {
    pub fn new(store: &'a dyn Store, credentials: &'a Credentials) -> Self {
        Self { store, credentials }
    }

    pub fn from_state(state: &'a AppState) -> Self {
        Self::new(state.store.as_ref(), &state.credentials)
    }

    /// Create the user with a hashed password, their default organisation
    /// and the membership linking them, then issue a token.
    pub async fn register(&self, registration: Registration) -> Result<AuthSession, ApiError> {
        if self.store.find_user_by_email(&registration.email).await?.is_some() {
            info!("Registration rejected: email already in use");
            return Err(ApiError::validation(EMAIL_TAKEN));
        }

        let password_hash = hash_password(&registration.password)?;
        let organisation = NewOrganisation::default_for(&registration.first_name);
        let new_user = NewUser {
            first_name: registration.first_name,
            last_name: registration.last_name,
            email: registration.email,
            password_hash,
            phone: registration.phone,
        };

        // A concurrent registration can still win the race; the store's
        // unique constraint turns that into the same 422.
        let (user, organisation) = self.store.register_user(new_user, organisation).await?;
        let access_token = self.credentials.issue_token(user.id)?;

        info!(user_id = %user.id, org_id = %organisation.id, "Registered user");
        Ok(AuthSession {
            access_token,
            user,
            organisations: vec![organisation],
        })
    }

    /// Unknown email and wrong password fail identically.
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthSession, ApiError> {
        let email = email.trim().to_lowercase();

        let Some(user) = self.store.find_user_by_email(&email).await? else {
            // Pay for a full verification so unknown emails are not faster
            verify_password(password, UNMATCHABLE_PASSWORD_HASH)?;
            warn!("Login failed: unknown email");
            return Err(ApiError::unauthorized(AUTHENTICATION_FAILED));
        };

        if !verify_password(password, &user.password_hash)? {
            warn!(user_id = %user.id, "Login failed: wrong password");
            return Err(ApiError::unauthorized(AUTHENTICATION_FAILED));
        }

        let access_token = self.credentials.issue_token(user.id)?;
        let organisations = self.store.organisations_for_user(user.id).await?;

        info!(user_id = %user.id, "User logged in");
        Ok(AuthSession {
            access_token,
            user,
            organisations,
        })
    }
}
