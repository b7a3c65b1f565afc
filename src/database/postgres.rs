use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

use super::models::{Membership, NewOrganisation, NewUser, Organisation, User};
use super::schema::MIGRATIONS;
use super::store::{Store, StoreError};

const USER_COLUMNS: &str =
    "id, first_name, last_name, email, password_hash, phone, created_at";
const ORGANISATION_COLUMNS: &str = "id, name, description, created_at";

/// PostgreSQL-backed store over a pool created by `DatabaseManager`.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Apply the schema. Every statement is idempotent.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;
        for statement in MIGRATIONS {
            sqlx::query(statement).execute(&mut *tx).await?;
        }
        tx.commit().await?;
        info!("Applied {} schema statements", MIGRATIONS.len());
        Ok(())
    }
}

/// Maps constraint violations to store errors; everything else stays sqlx.
fn map_constraint(err: sqlx::Error, email: &str) -> StoreError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            return StoreError::EmailTaken(email.to_string());
        }
        if db.is_foreign_key_violation() {
            return StoreError::NotFound("user or organisation".to_string());
        }
    }
    StoreError::Sqlx(err)
}

#[async_trait]
impl Store for PgStore {
    async fn register_user(
        &self,
        user: NewUser,
        organisation: NewOrganisation,
    ) -> Result<(User, Organisation), StoreError> {
        let mut tx = self.pool.begin().await?;

        let created_user = sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users (id, first_name, last_name, email, password_hash, phone)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .bind(&user.phone)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_constraint(e, &user.email))?;

        let created_org = sqlx::query_as::<_, Organisation>(&format!(
            "INSERT INTO organisations (id, name, description)
             VALUES ($1, $2, $3)
             RETURNING {ORGANISATION_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(&organisation.name)
        .bind(&organisation.description)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO user_organisations (user_id, org_id) VALUES ($1, $2)")
            .bind(created_user.id)
            .bind(created_org.id)
            .execute(&mut *tx)
            .await?;

        // Dropping the transaction before this point rolls all three inserts back
        tx.commit().await?;

        debug!("Registered user {} with organisation {}", created_user.id, created_org.id);
        Ok((created_user, created_org))
    }

    async fn find_user(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = $1"
        ))
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_organisation(&self, id: Uuid) -> Result<Option<Organisation>, StoreError> {
        let organisation = sqlx::query_as::<_, Organisation>(&format!(
            "SELECT {ORGANISATION_COLUMNS} FROM organisations WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(organisation)
    }

    async fn create_organisation(
        &self,
        owner: Uuid,
        organisation: NewOrganisation,
    ) -> Result<Organisation, StoreError> {
        let mut tx = self.pool.begin().await?;

        let created = sqlx::query_as::<_, Organisation>(&format!(
            "INSERT INTO organisations (id, name, description)
             VALUES ($1, $2, $3)
             RETURNING {ORGANISATION_COLUMNS}"
        ))
        .bind(Uuid::new_v4())
        .bind(&organisation.name)
        .bind(&organisation.description)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO user_organisations (user_id, org_id) VALUES ($1, $2)")
            .bind(owner)
            .bind(created.id)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_constraint(e, ""))?;

        tx.commit().await?;
        Ok(created)
    }

    async fn add_membership(&self, membership: Membership) -> Result<(), StoreError> {
        sqlx::query(
            "INSERT INTO user_organisations (user_id, org_id) VALUES ($1, $2)
             ON CONFLICT (user_id, org_id) DO NOTHING",
        )
        .bind(membership.user_id)
        .bind(membership.org_id)
        .execute(&self.pool)
        .await
        .map_err(|e| map_constraint(e, ""))?;

        Ok(())
    }

    async fn is_member(&self, user_id: Uuid, org_id: Uuid) -> Result<bool, StoreError> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (
                SELECT 1 FROM user_organisations WHERE user_id = $1 AND org_id = $2
             )",
        )
        .bind(user_id)
        .bind(org_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn organisations_for_user(&self, user_id: Uuid) -> Result<Vec<Organisation>, StoreError> {
        let organisations = sqlx::query_as::<_, Organisation>(
            "SELECT o.id, o.name, o.description, o.created_at
             FROM organisations o
             JOIN user_organisations uo ON uo.org_id = o.id
             WHERE uo.user_id = $1
             ORDER BY o.created_at, o.name",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(organisations)
    }

    async fn shares_organisation(&self, user_id: Uuid, other_id: Uuid) -> Result<bool, StoreError> {
        let shared = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (
                SELECT 1
                FROM user_organisations a
                JOIN user_organisations b ON a.org_id = b.org_id
                WHERE a.user_id = $1 AND b.user_id = $2
             )",
        )
        .bind(user_id)
        .bind(other_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(shared)
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
        info!("Closed database pool");
    }
}
