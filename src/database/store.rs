use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use super::models::{Membership, NewOrganisation, NewUser, Organisation, User};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Email already exists: {0}")]
    EmailTaken(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Persistence handle injected into every flow.
///
/// Implementations own their transactional guarantees: `register_user` and
/// `create_organisation` persist all of their rows or none of them, and email
/// uniqueness is enforced here rather than by callers.
#[async_trait]
pub trait Store: Send + Sync {
    /// Creates the user, their default organisation and the membership
    /// linking them, atomically.
    async fn register_user(
        &self,
        user: NewUser,
        organisation: NewOrganisation,
    ) -> Result<(User, Organisation), StoreError>;

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn find_organisation(&self, id: Uuid) -> Result<Option<Organisation>, StoreError>;

    /// Creates an organisation with `owner` as its first member.
    async fn create_organisation(
        &self,
        owner: Uuid,
        organisation: NewOrganisation,
    ) -> Result<Organisation, StoreError>;

    /// Adding a membership that already exists is a no-op.
    async fn add_membership(&self, membership: Membership) -> Result<(), StoreError>;

    async fn is_member(&self, user_id: Uuid, org_id: Uuid) -> Result<bool, StoreError>;

    async fn organisations_for_user(&self, user_id: Uuid) -> Result<Vec<Organisation>, StoreError>;

    /// True when both users belong to at least one common organisation.
    async fn shares_organisation(&self, user_id: Uuid, other_id: Uuid) -> Result<bool, StoreError>;

    async fn health_check(&self) -> Result<(), StoreError>;

    /// Releases underlying resources on shutdown.
    async fn close(&self);
}
