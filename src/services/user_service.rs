use tracing::warn;
use uuid::Uuid;

use crate::database::models::User;
use crate::database::Store;
use crate::error::ApiError;
use crate::state::AppState;

pub const NO_USER_ACCESS: &str = "You do not have access to this user";

pub struct UserService<'a> {
    store: &'a dyn Store,
}

impl<'a> UserService<'a> {
    pub fn new(store: &'a dyn Store) -> Self {
        Self { store }
    }

    pub fn from_state(state: &'a AppState) -> Self {
        Self::new(state.store.as_ref())
    }

    /// A user may read their own record and the records of users they share
    /// an organisation with.
    pub async fn get_visible(&self, caller: Uuid, user_id: &str) -> Result<User, ApiError> {
        let denied = || ApiError::forbidden(NO_USER_ACCESS);

        let Ok(target) = Uuid::parse_str(user_id.trim()) else {
            return Err(denied());
        };

        if target != caller && !self.store.shares_organisation(caller, target).await? {
            warn!(user_id = %caller, target = %target, "User access denied");
            return Err(denied());
        }

        self.store.find_user(target).await?.ok_or_else(denied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::models::{Membership, NewOrganisation, NewUser};
    use crate::database::MemoryStore;

    async fn register(store: &MemoryStore, first_name: &str) -> (User, Uuid) {
        let (user, org) = store
            .register_user(
                NewUser {
                    first_name: first_name.to_string(),
                    last_name: "Doe".to_string(),
                    email: format!("{}@example.com", first_name.to_lowercase()),
                    password_hash: "hash".to_string(),
                    phone: None,
                },
                NewOrganisation::default_for(first_name),
            )
            .await
            .unwrap();
        (user, org.id)
    }

    #[tokio::test]
    async fn visibility_follows_shared_membership() {
        let store = MemoryStore::new();
        let (john, john_org) = register(&store, "John").await;
        let (jane, _) = register(&store, "Jane").await;
        let service = UserService::new(&store);

        assert_eq!(service.get_visible(john.id, &john.id.to_string()).await.unwrap().id, john.id);
        assert_eq!(
            service.get_visible(john.id, &jane.id.to_string()).await.unwrap_err(),
            ApiError::forbidden(NO_USER_ACCESS)
        );

        store.add_membership(Membership::new(jane.id, john_org)).await.unwrap();
        assert_eq!(service.get_visible(john.id, &jane.id.to_string()).await.unwrap().id, jane.id);
        assert!(service.get_visible(john.id, "not-a-uuid").await.is_err());
    }
}
