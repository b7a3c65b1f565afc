use tracing::{info, warn};
use uuid::Uuid;

use crate::database::models::{Membership, NewOrganisation, Organisation};
use crate::database::Store;
use crate::error::ApiError;
use crate::state::AppState;

pub const NO_ORGANISATION_ACCESS: &str = "You do not have access to this organisation";

/// Organisation lookups and mutations, all gated on membership.
pub struct OrganisationService<'a> {
    store: &'a dyn Store,
}

fn access_denied() -> ApiError {
    ApiError::forbidden(NO_ORGANISATION_ACCESS)
}

impl<'a> OrganisationService<'a> {
    pub fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    pub fn from_state(state: &'a AppState) -> Self {
        Self::new(state.store.as_ref())
    }

    /// Returns the organisation if `caller` is a member of it. Malformed,
    /// unknown and foreign ids all produce the same 403.
    pub async fn get_for_member(&self, caller: Uuid, org_id: &str) -> Result<Organisation, ApiError> {
        let Ok(org_id) = Uuid::parse_str(org_id.trim()) else {
            warn!(user_id = %caller, "Organisation access denied: malformed id");
            return Err(access_denied());
        };

        if !self.store.is_member(caller, org_id).await? {
            warn!(user_id = %caller, %org_id, "Organisation access denied: not a member");
            return Err(access_denied());
        }

        self.store
            .find_organisation(org_id)
            .await?
            .ok_or_else(access_denied)
    }

    pub async fn list_for_user(&self, caller: Uuid) -> Result<Vec<Organisation>, ApiError> {
        Ok(self.store.organisations_for_user(caller).await?)
    }

    pub async fn create(
        &self,
        caller: Uuid,
        name: &str,
        description: Option<&str>,
    ) -> Result<Organisation, ApiError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ApiError::validation("Name is required"));
        }

        let organisation = NewOrganisation {
            name: name.to_string(),
            description: description
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string),
        };

        let created = self.store.create_organisation(caller, organisation).await?;
        info!(user_id = %caller, org_id = %created.id, "Created organisation");
        Ok(created)
    }

    /// Adds `user_id` to the organisation. The caller must already be a
    /// member; re-adding an existing member succeeds.
    pub async fn add_user(
        &self,
        caller: Uuid,
        org_id: &str,
        user_id: Option<&str>,
    ) -> Result<Membership, ApiError> {
        let organisation = self.get_for_member(caller, org_id).await?;
        self.add_user_to(caller, &organisation, user_id).await
    }

    /// Adds `user_id` to an organisation already returned by
    /// `get_for_member` for `caller`.
    pub async fn add_user_to(
        &self,
        caller: Uuid,
        organisation: &Organisation,
        user_id: Option<&str>,
    ) -> Result<Membership, ApiError> {
        let raw = user_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ApiError::validation("User ID is required"))?;
        let target = Uuid::parse_str(raw).map_err(|_| ApiError::validation("User ID is invalid"))?;

        if self.store.find_user(target).await?.is_none() {
            return Err(ApiError::not_found("User not found"));
        }

        let membership = Membership::new(target, organisation.id);
        self.store.add_membership(membership).await?;

        info!(user_id = %target, org_id = %organisation.id, added_by = %caller, "Added organisation member");
        Ok(membership)
    }
}
