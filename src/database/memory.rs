use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeSet, HashMap};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::models::{Membership, NewOrganisation, NewUser, Organisation, User};
use super::store::{Store, StoreError};

#[derive(Default)]
struct State {
    users: HashMap<Uuid, User>,
    emails: HashMap<String, Uuid>,
    organisations: HashMap<Uuid, Organisation>,
    memberships: BTreeSet<Membership>,
}

impl State {
    fn insert_organisation(&mut self, organisation: NewOrganisation) -> Organisation {
        let created = Organisation {
            id: Uuid::new_v4(),
            name: organisation.name,
            description: organisation.description,
            created_at: Utc::now(),
        };
        self.organisations.insert(created.id, created.clone());
        created
    }

    fn org_ids_for(&self, user_id: Uuid) -> impl Iterator<Item = Uuid> + '_ {
        self.memberships
            .iter()
            .filter(move |m| m.user_id == user_id)
            .map(|m| m.org_id)
    }
}

/// In-process store. Every write happens under one lock, which gives the
/// same all-or-nothing and unique-email guarantees as the PostgreSQL store.
/// Used by the test suite and `serve --memory`.
#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<State>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn register_user(
        &self,
        user: NewUser,
        organisation: NewOrganisation,
    ) -> Result<(User, Organisation), StoreError> {
        let mut state = self.state.write().await;

        if state.emails.contains_key(&user.email) {
            return Err(StoreError::EmailTaken(user.email));
        }

        let created_user = User {
            id: Uuid::new_v4(),
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            password_hash: user.password_hash,
            phone: user.phone,
            created_at: Utc::now(),
        };
        state.emails.insert(created_user.email.clone(), created_user.id);
        state.users.insert(created_user.id, created_user.clone());

        let created_org = state.insert_organisation(organisation);
        state
            .memberships
            .insert(Membership::new(created_user.id, created_org.id));

        Ok((created_user, created_org))
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.state.read().await.users.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let state = self.state.read().await;
        Ok(state
            .emails
            .get(email)
            .and_then(|id| state.users.get(id))
            .cloned())
    }

    async fn find_organisation(&self, id: Uuid) -> Result<Option<Organisation>, StoreError> {
        Ok(self.state.read().await.organisations.get(&id).cloned())
    }

    async fn create_organisation(
        &self,
        owner: Uuid,
        organisation: NewOrganisation,
    ) -> Result<Organisation, StoreError> {
        let mut state = self.state.write().await;

        if !state.users.contains_key(&owner) {
            return Err(StoreError::NotFound(format!("user {owner}")));
        }

        let created = state.insert_organisation(organisation);
        state.memberships.insert(Membership::new(owner, created.id));
        Ok(created)
    }

    async fn add_membership(&self, membership: Membership) -> Result<(), StoreError> {
        let mut state = self.state.write().await;

        if !state.users.contains_key(&membership.user_id) {
            return Err(StoreError::NotFound(format!("user {}", membership.user_id)));
        }
        if !state.organisations.contains_key(&membership.org_id) {
            return Err(StoreError::NotFound(format!("organisation {}", membership.org_id)));
        }

        state.memberships.insert(membership);
        Ok(())
    }

    async fn is_member(&self, user_id: Uuid, org_id: Uuid) -> Result<bool, StoreError> {
        let state = self.state.read().await;
        Ok(state.memberships.contains(&Membership::new(user_id, org_id)))
    }

    async fn organisations_for_user(&self, user_id: Uuid) -> Result<Vec<Organisation>, StoreError> {
        let state = self.state.read().await;
        let mut organisations: Vec<Organisation> = state
            .org_ids_for(user_id)
            .filter_map(|id| state.organisations.get(&id).cloned())
            .collect();
        organisations.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.name.cmp(&b.name)));
        Ok(organisations)
    }

    async fn shares_organisation(&self, user_id: Uuid, other_id: Uuid) -> Result<bool, StoreError> {
        let state = self.state.read().await;
        let shared = state
            .org_ids_for(user_id)
            .any(|org_id| state.memberships.contains(&Membership::new(other_id, org_id)));
        Ok(shared)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn close(&self) {}
}
