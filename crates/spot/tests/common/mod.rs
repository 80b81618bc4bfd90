#![allow(dead_code)]

use axum::Router;
use serde_json::{json, Value};
use spot::{AuthSession, ClientConfig, LocalStore, SpotClient, UserRole};
use std::sync::Arc;

/// Serves `routes` under `/api` on an ephemeral port and returns the base URL.
pub async fn serve(routes: Router) -> String {
    let app = Router::new().nest("/api", routes);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/api")
}

pub fn client(base_url: &str) -> SpotClient {
    SpotClient::new(&ClientConfig::with_api_url(base_url)).unwrap()
}

pub fn client_with_store(base_url: &str) -> (SpotClient, Arc<LocalStore>) {
    let store = Arc::new(LocalStore::in_memory().unwrap());
    let client = SpotClient::with_store(&ClientConfig::with_api_url(base_url), store.clone()).unwrap();
    (client, store)
}

pub fn session(user_id: i64, role: UserRole) -> AuthSession {
    AuthSession {
        token: "test-token".to_string(),
        token_type: "Bearer".to_string(),
        user_id,
        role,
        email: "juan@cit.edu".to_string(),
        name: "Juan Dela Cruz".to_string(),
    }
}

/// `{ result: SUCCESS, message, data }`
pub fn envelope(data: Value) -> Value {
    json!({ "result": "SUCCESS", "message": "ok", "data": data })
}

pub fn course_json(id: i64) -> Value {
    json!({
        "id": id,
        "courseName": "Data Structures",
        "courseDescription": "Lists and trees",
        "courseCode": "CS201",
        "sectionCount": 1
    })
}

pub fn section_json(id: i64) -> Value {
    json!({
        "id": id,
        "course": course_json(1),
        "sectionName": "G01",
        "enrollmentKey": "KEY123",
        "enrollmentOpen": true,
        "enrollmentCount": 12
    })
}

pub fn student_json(id: i64) -> Value {
    json!({
        "id": id,
        "firstName": "Juan",
        "lastName": "Dela Cruz",
        "email": "juan@cit.edu",
        "studentPhysicalId": "21-0001-234"
    })
}

pub fn enrollment_json(id: i64, student_id: i64, section_id: i64) -> Value {
    json!({
        "id": id,
        "section": section_json(section_id),
        "student": student_json(student_id),
        "enrolledAt": "2024-03-01T08:00:00"
    })
}

pub fn attendance_json(id: i64, student_id: i64, section_id: i64, date: &str) -> Value {
    json!({
        "id": id,
        "studentId": student_id,
        "sectionId": section_id,
        "date": date,
        "startTime": "08:05:00"
    })
}
