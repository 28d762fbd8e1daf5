mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{Value, json};

macro_rules! init_app {
    ($pool:expr) => {
        test::init_service(common::test_app($pool.clone(), common::test_config())).await
    };
}

macro_rules! signup {
    ($app:expr, $email:expr) => {{
        let resp = test::call_service(
            &$app,
            common::post("/auth/signup")
                .set_json(json!({
                    "email": $email,
                    "password": "secret123",
                    "name": "Jane Manager"
                }))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        body
    }};
}

#[actix_web::test]
async fn signup_issues_session_and_normalizes_email() {
    let pool = common::test_pool().await;
    let app = init_app!(pool);

    let body = signup!(app, "Jane@Company.com");

    assert_eq!(body["user"]["email"], "jane@company.com");
    assert_eq!(body["user"]["role"], "HR Manager");
    assert!(!body["access"].as_str().unwrap().is_empty());
    assert!(!body["refresh"].as_str().unwrap().is_empty());
}

#[actix_web::test]
async fn second_signup_with_same_email_fails() {
    let pool = common::test_pool().await;
    let app = init_app!(pool);

    signup!(app, "jane@company.com");

    let resp = test::call_service(
        &app,
        common::post("/auth/signup")
            .set_json(json!({
                "email": "JANE@company.com",
                "password": "different1",
                "name": "Impostor"
            }))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["field"], "email");
}

#[actix_web::test]
async fn signup_validates_fields() {
    let pool = common::test_pool().await;
    let app = init_app!(pool);

    let resp = test::call_service(
        &app,
        common::post("/auth/signup")
            .set_json(json!({"email": "jane@company.com", "password": "short", "name": "Jane"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["field"], "password");

    let resp = test::call_service(
        &app,
        common::post("/auth/signup")
            .set_json(json!({"email": "not-an-email", "password": "secret123", "name": "Jane"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["field"], "email");
}

#[actix_web::test]
async fn login_rejects_wrong_password_and_accepts_right_one() {
    let pool = common::test_pool().await;
    let app = init_app!(pool);

    signup!(app, "jane@company.com");

    let resp = test::call_service(
        &app,
        common::post("/auth/login")
            .set_json(json!({"email": "jane@company.com", "password": "wrong-pass"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Invalid email or password");

    let resp = test::call_service(
        &app,
        common::post("/auth/login")
            .set_json(json!({"email": "jane@company.com", "password": "secret123"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["user"]["email"], "jane@company.com");
    assert!(!body["access"].as_str().unwrap().is_empty());
    assert!(!body["refresh"].as_str().unwrap().is_empty());
}

#[actix_web::test]
async fn protected_routes_never_answer_without_valid_access_token() {
    let pool = common::test_pool().await;
    let app = init_app!(pool);

    let body = signup!(app, "jane@company.com");
    let access = body["access"].as_str().unwrap();
    let refresh = body["refresh"].as_str().unwrap();

    // No header at all
    let resp = test::call_service(&app, common::get("/dashboard/stats").to_request()).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // Garbage token
    let resp = test::call_service(
        &app,
        common::bearer(common::get("/dashboard/stats"), "not.a.jwt").to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // A refresh token is not an access credential
    let resp = test::call_service(
        &app,
        common::bearer(common::get("/dashboard/stats"), refresh).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let resp = test::call_service(
        &app,
        common::bearer(common::get("/dashboard/stats"), access).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
}

#[actix_web::test]
async fn logout_blacklists_refresh_token_idempotently() {
    let pool = common::test_pool().await;
    let app = init_app!(pool);

    let body = signup!(app, "jane@company.com");
    let access = body["access"].as_str().unwrap().to_string();
    let refresh = body["refresh"].as_str().unwrap().to_string();

    // Refresh works while the token is live
    let resp = test::call_service(
        &app,
        common::post("/auth/token/refresh")
            .set_json(json!({"refresh": refresh}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert!(!body["access"].as_str().unwrap().is_empty());

    // Logout blacklists it
    let resp = test::call_service(
        &app,
        common::bearer(common::post("/auth/logout"), &access)
            .set_json(json!({"refresh": refresh}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    // The token is far from expiry but permanently unusable
    let resp = test::call_service(
        &app,
        common::post("/auth/token/refresh")
            .set_json(json!({"refresh": refresh}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    // Logging out again still succeeds
    let resp = test::call_service(
        &app,
        common::bearer(common::post("/auth/logout"), &access)
            .set_json(json!({"refresh": refresh}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);

    // A present but undecodable token is a 400
    let resp = test::call_service(
        &app,
        common::bearer(common::post("/auth/logout"), &access)
            .set_json(json!({"refresh": "garbage"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn refresh_rejects_access_tokens() {
    let pool = common::test_pool().await;
    let app = init_app!(pool);

    let body = signup!(app, "jane@company.com");
    let access = body["access"].as_str().unwrap();

    let resp = test::call_service(
        &app,
        common::post("/auth/token/refresh")
            .set_json(json!({"refresh": access}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn profile_roundtrip_and_role_capability() {
    let pool = common::test_pool().await;
    let app = init_app!(pool);

    let body = signup!(app, "jane@company.com");
    let access = body["access"].as_str().unwrap().to_string();

    let resp = test::call_service(
        &app,
        common::bearer(common::get("/auth/profile"), &access).to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["email"], "jane@company.com");
    assert_eq!(body["name"], "Jane Manager");

    let resp = test::call_service(
        &app,
        common::bearer(common::patch("/auth/profile"), &access)
            .set_json(json!({"name": "Jane Q. Manager", "phone": "+15550100"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["name"], "Jane Q. Manager");
    assert_eq!(body["phone"], "+15550100");

    // HR Managers cannot grant themselves a role
    let resp = test::call_service(
        &app,
        common::bearer(common::patch("/auth/profile"), &access)
            .set_json(json!({"role": "Administrator"}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    // Empty update is rejected
    let resp = test::call_service(
        &app,
        common::bearer(common::put("/auth/profile"), &access)
            .set_json(json!({}))
            .to_request(),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
