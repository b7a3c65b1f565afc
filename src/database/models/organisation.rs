use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Organisation {
    #[serde(rename = "orgId")]
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    #[serde(skip_serializing)]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrganisation {
    pub name: String,
    pub description: Option<String>,
}

impl NewOrganisation {
    /// The personal organisation created for every newly registered user.
    pub fn default_for(first_name: &str) -> Self {
        Self {
            name: format!("{first_name}'s Organisation"),
            description: None,
        }
    }
}
