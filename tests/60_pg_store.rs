// Runs against the PostgreSQL database named by DATABASE_URL (or .env).
// Each test returns early when no database is configured.

use anyhow::Result;
use sqlx::PgPool;
use tokio::sync::OnceCell;
use uuid::Uuid;

use orgauth_api::config::AppConfig;
use orgauth_api::database::models::{Membership, NewOrganisation, NewUser};
use orgauth_api::database::{DatabaseManager, PgStore, Store, StoreError};

// Concurrent CREATE TABLE IF NOT EXISTS can race in PostgreSQL
static MIGRATED: OnceCell<()> = OnceCell::const_new();

async fn connect() -> Result<Option<(PgStore, PgPool)>> {
    let _ = dotenvy::dotenv();
    let config = AppConfig::from_env();
    if config.database.url.is_none() {
        eprintln!("DATABASE_URL not set, skipping PostgreSQL store test");
        return Ok(None);
    }

    let pool = DatabaseManager::connect(&config.database).await?;
    let store = PgStore::new(pool.clone());
    MIGRATED.get_or_try_init(|| store.migrate()).await?;
    Ok(Some((store, pool)))
}

/// Email and first name unique to this run so tests can share a database.
fn new_user(first_name: &str) -> NewUser {
    let tag = Uuid::new_v4().simple().to_string();
    NewUser {
        first_name: format!("{first_name}-{tag}"),
        last_name: "Doe".to_string(),
        email: format!("{}-{tag}@example.com", first_name.to_lowercase()),
        password_hash: "hash".to_string(),
        phone: None,
    }
}

#[tokio::test]
async fn duplicate_email_rolls_back_the_whole_registration() -> Result<()> {
    let Some((store, pool)) = connect().await? else {
        return Ok(());
    };

    let first = new_user("John");
    let email = first.email.clone();
    let org = NewOrganisation::default_for(&first.first_name);
    store.register_user(first, org).await?;

    let mut second = new_user("Jane");
    second.email = email.clone();
    let orphan = NewOrganisation::default_for(&second.first_name);
    let orphan_name = orphan.name.clone();
    let err = store
        .register_user(second, orphan)
        .await
        .expect_err("duplicate email must fail");
    assert!(matches!(err, StoreError::EmailTaken(ref taken) if *taken == email));

    let orphans: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM organisations WHERE name = $1")
        .bind(&orphan_name)
        .fetch_one(&pool)
        .await?;
    assert_eq!(orphans, 0);

    let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE email = $1")
        .bind(&email)
        .fetch_one(&pool)
        .await?;
    assert_eq!(users, 1);

    store.close().await;
    Ok(())
}

#[tokio::test]
async fn re_adding_a_member_is_a_no_op() -> Result<()> {
    let Some((store, pool)) = connect().await? else {
        return Ok(());
    };

    let john = new_user("John");
    let org = NewOrganisation::default_for(&john.first_name);
    let (john, john_org) = store.register_user(john, org).await?;
    let jane = new_user("Jane");
    let org = NewOrganisation::default_for(&jane.first_name);
    let (jane, _) = store.register_user(jane, org).await?;

    let membership = Membership::new(jane.id, john_org.id);
    store.add_membership(membership).await?;
    store.add_membership(membership).await?;

    let rows: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM user_organisations WHERE user_id = $1 AND org_id = $2",
    )
    .bind(jane.id)
    .bind(john_org.id)
    .fetch_one(&pool)
    .await?;
    assert_eq!(rows, 1);
    assert!(store.is_member(jane.id, john_org.id).await?);
    assert!(store.is_member(john.id, john_org.id).await?);

    let missing = store
        .add_membership(Membership::new(Uuid::new_v4(), john_org.id))
        .await;
    assert!(matches!(missing, Err(StoreError::NotFound(_))));

    store.close().await;
    Ok(())
}

#[tokio::test]
async fn shared_organisations_follow_memberships() -> Result<()> {
    let Some((store, _pool)) = connect().await? else {
        return Ok(());
    };

    let john = new_user("John");
    let org = NewOrganisation::default_for(&john.first_name);
    let (john, john_org) = store.register_user(john, org).await?;
    let jane = new_user("Jane");
    let org = NewOrganisation::default_for(&jane.first_name);
    let (jane, jane_org) = store.register_user(jane, org).await?;

    assert!(!store.shares_organisation(john.id, jane.id).await?);
    assert_eq!(store.organisations_for_user(jane.id).await?, vec![jane_org.clone()]);

    store.add_membership(Membership::new(jane.id, john_org.id)).await?;

    assert!(store.shares_organisation(john.id, jane.id).await?);
    assert!(store.shares_organisation(jane.id, john.id).await?);

    let ids: Vec<Uuid> = store
        .organisations_for_user(jane.id)
        .await?
        .into_iter()
        .map(|org| org.id)
        .collect();
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&john_org.id));
    assert!(ids.contains(&jane_org.id));

    store.close().await;
    Ok(())
}
