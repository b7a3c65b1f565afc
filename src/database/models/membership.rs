use uuid::Uuid;

/// Join entity linking one user to one organisation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Membership {
    pub user_id: Uuid,
    pub org_id: Uuid,
}

impl Membership {
    pub fn new(user_id: Uuid, org_id: Uuid) -> Self {
        Self { user_id, org_id }
    }
}
