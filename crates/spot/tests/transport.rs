mod common;

use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use common::*;
use serde_json::{json, Value};
use spot::{SpotError, UserRole};
use std::sync::{Arc, Mutex};

#[tokio::test]
async fn test_enveloped_and_bare_payloads() {
    let routes = Router::new()
        .route("/courses", get(|| async { Json(envelope(json!([course_json(1)]))) }))
        .route("/courses/:id", get(|| async { Json(course_json(2)) }));
    let client = client(&serve(routes).await);

    let courses = client.courses().list().await.unwrap();
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0].course_code, "CS201");

    let course = client.courses().get(2).await.unwrap();
    assert_eq!(course.id, 2);
}

#[tokio::test]
async fn test_error_envelope_on_success_status() {
    let routes = Router::new().route(
        "/sections/:id",
        get(|| async {
            Json(json!({ "result": "ERROR", "message": "Section not found", "data": null }))
        }),
    );
    let client = client(&serve(routes).await);

    let err = client.sections().get(9).await.unwrap_err();
    assert!(matches!(&err, SpotError::Api { status: 200, message } if message == "Section not found"));
}

#[tokio::test]
async fn test_detail_read_propagates_server_message() {
    let routes = Router::new().route(
        "/courses/:id",
        get(|| async {
            (
                StatusCode::NOT_FOUND,
                Json(json!({ "result": "ERROR", "message": "Course not found with id: 4" })),
            )
        }),
    );
    let client = client(&serve(routes).await);

    let err = client.courses().get(4).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.user_message(), "Course not found with id: 4");
}

#[tokio::test]
async fn test_list_reads_degrade_to_empty() {
    let routes = Router::new().route(
        "/courses",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let client = client(&serve(routes).await);

    assert!(client.courses().list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unauthorized_clears_session_everywhere() {
    let routes = Router::new().route(
        "/courses",
        get(|| async { (StatusCode::UNAUTHORIZED, "expired") }),
    );
    let (client, store) = client_with_store(&serve(routes).await);
    client.set_session(session(5, UserRole::Student)).unwrap();
    let mut changes = client.session().subscribe();
    assert!(store.load_session().unwrap().is_some());

    // Session failures are not swallowed by the list policy
    let err = client.courses().list().await.unwrap_err();
    assert!(matches!(err, SpotError::Unauthorized));

    assert!(client.session().get().is_none());
    assert!(store.load_session().unwrap().is_none());
    assert!(changes.has_changed().unwrap());
    assert!(changes.borrow_and_update().is_none());
}

#[tokio::test]
async fn test_login_is_sent_without_bearer_and_stored() {
    let seen: Arc<Mutex<Vec<Option<String>>>> = Arc::new(Mutex::new(Vec::new()));
    let captured = seen.clone();
    let routes = Router::new().route(
        "/auth/login",
        post(move |headers: HeaderMap, Json(body): Json<Value>| {
            let captured = captured.clone();
            async move {
                captured.lock().unwrap().push(
                    headers
                        .get("authorization")
                        .map(|v| v.to_str().unwrap().to_string()),
                );
                assert_eq!(body["email"], "juan@cit.edu");
                Json(json!({
                    "accessToken": "jwt-abc",
                    "tokenType": "Bearer",
                    "userType": "STUDENT",
                    "id": 5,
                    "email": "juan@cit.edu",
                    "name": "Juan Dela Cruz"
                }))
            }
        }),
    );
    let (client, store) = client_with_store(&serve(routes).await);
    // A stale session must not leak onto the login request
    client.set_session(session(1, UserRole::Teacher)).unwrap();

    let logged_in = client.auth().login("  Juan@CIT.edu ", "secret").await.unwrap();
    assert_eq!(logged_in.role, UserRole::Student);
    assert_eq!(seen.lock().unwrap().as_slice(), &[None]);

    let saved = store.load_session().unwrap().unwrap();
    assert_eq!(saved.token, "jwt-abc");
    assert_eq!(saved.user_id, 5);
}

#[tokio::test]
async fn test_failed_login_keeps_server_message() {
    let routes = Router::new().route(
        "/auth/login",
        post(|| async {
            (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "result": "ERROR", "message": "Invalid email or password" })),
            )
        }),
    );
    let client = client(&serve(routes).await);

    let err = client.auth().login("juan@cit.edu", "wrong").await.unwrap_err();
    assert_eq!(err.user_message(), "Invalid email or password");
}

#[tokio::test]
async fn test_bearer_attached_to_protected_calls() {
    let seen: Arc<Mutex<Option<String>>> = Arc::new(Mutex::new(None));
    let captured = seen.clone();
    let routes = Router::new().route(
        "/teacher-profile/me",
        get(move |headers: HeaderMap| {
            let captured = captured.clone();
            async move {
                *captured.lock().unwrap() = headers
                    .get("authorization")
                    .map(|v| v.to_str().unwrap().to_string());
                Json(json!({
                    "id": 1,
                    "firstName": "Ada",
                    "lastName": "Lovelace",
                    "email": "ada@cit.edu"
                }))
            }
        }),
    );
    let client = client(&serve(routes).await);
    client.set_session(session(1, UserRole::Teacher)).unwrap();

    let teacher = client.teachers().me().await.unwrap();
    assert_eq!(teacher.name(), "Ada Lovelace");
    assert_eq!(seen.lock().unwrap().as_deref(), Some("Bearer test-token"));
}

#[tokio::test]
async fn test_saved_session_restored_on_startup() {
    let base = serve(Router::new()).await;
    let (client, store) = client_with_store(&base);
    client.set_session(session(7, UserRole::Student)).unwrap();

    let restored = spot::SpotClient::with_store(&spot::ClientConfig::with_api_url(&base), store).unwrap();
    assert_eq!(restored.require_user_id().unwrap(), 7);

    restored.auth().logout();
    assert!(matches!(restored.require_user_id(), Err(SpotError::NotLoggedIn)));
}
