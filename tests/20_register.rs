mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn registers_user_with_default_organisation() -> Result<()> {
    let server = common::TestServer::spawn().await?;

    let res = server
        .register(common::registration("John", "johndoe@example.com"))
        .await?;

    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = res.json().await?;
    assert_eq!(body["status"], "success");
    assert_eq!(body["message"], "Registration successful");
    assert_eq!(body["data"]["user"]["firstName"], "John");
    assert_eq!(body["data"]["user"]["email"], "johndoe@example.com");
    assert!(body["data"]["user"].get("password").is_none());

    let organisations = body["data"]["user"]["organisations"]
        .as_array()
        .expect("organisations array");
    assert_eq!(organisations.len(), 1);
    assert_eq!(organisations[0]["name"], "John's Organisation");
    assert!(!common::token_of(&body).is_empty());
    Ok(())
}

#[tokio::test]
async fn rejects_missing_first_name() -> Result<()> {
    let server = common::TestServer::spawn().await?;

    let res = server
        .register(json!({
            "firstName": "",
            "lastName": "Doe",
            "email": "janedoe@example.com",
            "password": "password",
            "phone": "1234567890",
        }))
        .await?;

    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = res.json().await?;
    assert_eq!(body["status"], "Bad Request");
    assert_eq!(body["message"], "First name is required");
    Ok(())
}

#[tokio::test]
async fn reports_each_missing_field() -> Result<()> {
    let server = common::TestServer::spawn().await?;

    let cases = [
        (json!({ "firstName": "A", "email": "a@example.com", "password": "p" }), "Last name is required"),
        (json!({ "firstName": "A", "lastName": "B", "password": "p" }), "Email is required"),
        (json!({ "firstName": "A", "lastName": "B", "email": "a@example.com" }), "Password is required"),
        (json!({ "firstName": "A", "lastName": "B", "email": "nope", "password": "p" }), "Invalid email format"),
    ];

    for (payload, message) in cases {
        let res = server.register(payload).await?;
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = res.json().await?;
        assert_eq!(body["message"], message);
    }
    Ok(())
}

#[tokio::test]
async fn rejects_duplicate_email() -> Result<()> {
    let server = common::TestServer::spawn().await?;

    server.register_user("John", "duplicate@example.com").await?;
    let res = server
        .register(common::registration("Jane", "duplicate@example.com"))
        .await?;

    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: Value = res.json().await?;
    assert_eq!(body["status"], "Bad Request");
    assert_eq!(body["message"], "Email already exists");
    Ok(())
}

#[tokio::test]
async fn concurrent_duplicate_registrations_create_one_user() -> Result<()> {
    let server = common::TestServer::spawn().await?;

    let (a, b) = tokio::join!(
        server.register(common::registration("John", "race@example.com")),
        server.register(common::registration("Jane", "race@example.com")),
    );
    let mut statuses = vec![a?.status(), b?.status()];
    statuses.sort();

    assert_eq!(statuses, vec![StatusCode::CREATED, StatusCode::UNPROCESSABLE_ENTITY]);
    Ok(())
}

#[tokio::test]
async fn malformed_json_is_bad_request() -> Result<()> {
    let server = common::TestServer::spawn().await?;

    let res = server
        .client
        .post(server.url("/auth/register"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await?;
    assert_eq!(body["message"], "Invalid request body");
    Ok(())
}
