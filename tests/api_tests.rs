//! Integration tests for authentication and user administration.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use steelyard::config::Config;
use tower::ServiceExt;

async fn spawn_app() -> Router {
    let db_path = std::env::temp_dir().join(format!("steelyard-api-test-{}.db", uuid::Uuid::new_v4()));

    let mut config = Config::default();
    config.general.database_path = format!("sqlite:{}", db_path.display());
    config.general.images_path = std::env::temp_dir()
        .join(format!("steelyard-api-images-{}", uuid::Uuid::new_v4()))
        .display()
        .to_string();
    config.catalog.master_path = "does-not-exist.json".to_string();

    let state = steelyard::api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");
    steelyard::api::router(state).await
}

/// Send a JSON request, optionally with a session cookie, and return the
/// status plus parsed body (Null for empty bodies).
async fn request(
    app: &Router,
    method: &str,
    uri: &str,
    cookie: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value, Option<String>) {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }

    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();

    let status = response.status();
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(ToString::to_string);

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };

    (status, body, set_cookie)
}

/// Log in and return the session cookie.
async fn login(app: &Router, username: &str, password: &str) -> (StatusCode, Value, Option<String>) {
    request(
        app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({ "username": username, "password": password })),
    )
    .await
}

async fn login_ok(app: &Router, username: &str, password: &str) -> (Value, String) {
    let (status, body, cookie) = login(app, username, password).await;
    assert_eq!(status, StatusCode::OK, "login failed: {body}");
    (body, cookie.expect("missing session cookie"))
}

#[tokio::test]
async fn test_protected_routes_require_session() {
    let app = spawn_app().await;

    for uri in ["/api/stock", "/api/users", "/api/auth/me", "/api/catalog/items"] {
        let (status, _, _) = request(&app, "GET", uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri} was reachable");
    }
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let app = spawn_app().await;

    let (status, _, _) = login(&app, "admin", "wrong-password").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _, _) = login(&app, "nobody", "admin123").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _, _) = login(&app, "", "admin123").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_seeded_admin_can_log_in() {
    let app = spawn_app().await;

    let (body, cookie) = login_ok(&app, "admin", "admin123").await;
    assert_eq!(body["data"]["username"], "admin");
    assert_eq!(body["data"]["role"], "admin");
    // Seeded row is exempt from forced rotation.
    assert_eq!(body["data"]["must_change_password"], false);

    let (status, body, _) = request(&app, "GET", "/api/auth/me", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], "admin");
}

#[tokio::test]
async fn test_logout_invalidates_session() {
    let app = spawn_app().await;
    let (_, cookie) = login_ok(&app, "admin", "admin123").await;

    let (status, _, _) = request(&app, "POST", "/api/auth/logout", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, _) = request(&app, "GET", "/api/auth/me", Some(&cookie), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_user_lifecycle_scenario() {
    let app = spawn_app().await;
    let (_, admin_cookie) = login_ok(&app, "admin", "admin123").await;

    // Create alice; she starts on the fixed default password with a
    // pending rotation.
    let (status, body, _) = request(
        &app,
        "POST",
        "/api/users",
        Some(&admin_cookie),
        Some(json!({ "username": "alice" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["username"], "alice");
    assert_eq!(body["data"]["role"], "user");
    assert_eq!(body["data"]["must_change_password"], true);

    let (body, alice_cookie) = login_ok(&app, "alice", "welcome123").await;
    assert_eq!(body["data"]["must_change_password"], true);

    // Rotate the password; the flag clears.
    let (status, _, _) = request(
        &app,
        "PUT",
        "/api/auth/password",
        Some(&alice_cookie),
        Some(json!({ "current_password": "welcome123", "new_password": "newpass1" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (body, _) = login_ok(&app, "alice", "newpass1").await;
    assert_eq!(body["data"]["must_change_password"], false);

    // The old password no longer works.
    let (status, _, _) = login(&app, "alice", "welcome123").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_user_validations() {
    let app = spawn_app().await;
    let (_, admin_cookie) = login_ok(&app, "admin", "admin123").await;

    let (status, _, _) = request(
        &app,
        "POST",
        "/api/users",
        Some(&admin_cookie),
        Some(json!({ "username": "bob" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    // Duplicate username is a conflict, not a crash.
    let (status, body, _) = request(
        &app,
        "POST",
        "/api/users",
        Some(&admin_cookie),
        Some(json!({ "username": "bob" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);

    for bad in ["", "   ", "bad name", "bad/name"] {
        let (status, _, _) = request(
            &app,
            "POST",
            "/api/users",
            Some(&admin_cookie),
            Some(json!({ "username": bad })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "accepted {bad:?}");
    }
}

#[tokio::test]
async fn test_user_administration_is_admin_only() {
    let app = spawn_app().await;
    let (_, admin_cookie) = login_ok(&app, "admin", "admin123").await;

    request(
        &app,
        "POST",
        "/api/users",
        Some(&admin_cookie),
        Some(json!({ "username": "bob" })),
    )
    .await;
    let (_, bob_cookie) = login_ok(&app, "bob", "welcome123").await;

    let (status, _, _) = request(&app, "GET", "/api/users", Some(&bob_cookie), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _, _) = request(
        &app,
        "POST",
        "/api/users",
        Some(&bob_cookie),
        Some(json!({ "username": "carol" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _, _) = request(&app, "DELETE", "/api/users/admin", Some(&bob_cookie), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_delete_user_rules() {
    let app = spawn_app().await;
    let (_, admin_cookie) = login_ok(&app, "admin", "admin123").await;

    // The seeded admin account is never deletable.
    let (status, _, _) = request(&app, "DELETE", "/api/users/admin", Some(&admin_cookie), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    request(
        &app,
        "POST",
        "/api/users",
        Some(&admin_cookie),
        Some(json!({ "username": "carol" })),
    )
    .await;

    let (status, _, _) = request(&app, "DELETE", "/api/users/carol", Some(&admin_cookie), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, _) = request(&app, "DELETE", "/api/users/carol", Some(&admin_cookie), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body, _) = request(&app, "GET", "/api/users", Some(&admin_cookie), None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["username"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["admin"]);
}

#[tokio::test]
async fn test_change_password_validations() {
    let app = spawn_app().await;
    let (_, admin_cookie) = login_ok(&app, "admin", "admin123").await;

    // Too short.
    let (status, _, _) = request(
        &app,
        "PUT",
        "/api/auth/password",
        Some(&admin_cookie),
        Some(json!({ "current_password": "admin123", "new_password": "abc" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Unchanged.
    let (status, _, _) = request(
        &app,
        "PUT",
        "/api/auth/password",
        Some(&admin_cookie),
        Some(json!({ "current_password": "admin123", "new_password": "admin123" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Wrong current password.
    let (status, _, _) = request(
        &app,
        "PUT",
        "/api/auth/password",
        Some(&admin_cookie),
        Some(json!({ "current_password": "nope", "new_password": "longenough" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Nothing above changed the stored hash.
    let (status, _, _) = login(&app, "admin", "admin123").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_admin_password_reset_rearms_rotation() {
    let app = spawn_app().await;
    let (_, admin_cookie) = login_ok(&app, "admin", "admin123").await;

    request(
        &app,
        "POST",
        "/api/users",
        Some(&admin_cookie),
        Some(json!({ "username": "erin" })),
    )
    .await;

    let (_, erin_cookie) = login_ok(&app, "erin", "welcome123").await;
    request(
        &app,
        "PUT",
        "/api/auth/password",
        Some(&erin_cookie),
        Some(json!({ "current_password": "welcome123", "new_password": "mysecret" })),
    )
    .await;

    let (status, _, _) = request(
        &app,
        "POST",
        "/api/users/erin/reset-password",
        Some(&admin_cookie),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _, _) = login(&app, "erin", "mysecret").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (body, _) = login_ok(&app, "erin", "welcome123").await;
    assert_eq!(body["data"]["must_change_password"], true);
}
