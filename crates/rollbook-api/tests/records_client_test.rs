#![allow(clippy::unwrap_used)]
// Integration tests for `RecordsClient` using wiremock.

use chrono::NaiveDate;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use rollbook_api::birthday::password_for;
use rollbook_api::{Error, LoginRequest, RecordsClient, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, RecordsClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = RecordsClient::with_client(reqwest::Client::new(), base_url);
    (server, client)
}

fn jane_request() -> LoginRequest {
    let dob = NaiveDate::from_ymd_opt(2005, 3, 1).unwrap();
    LoginRequest::new("R100", password_for(dob))
}

fn details_body() -> serde_json::Value {
    json!({
        "basic": { "name": "Jane Doe", "regNo": "R100", "gender": "Female" },
        "academic": {
            "course": "BA",
            "stream": "Arts",
            "batch": "2023",
            "section": "B",
            "session": "2023-24"
        },
        "subjects": [
            { "name": "History", "mode": "Theory" },
            { "name": "English", "mode": "Theory" }
        ]
    })
}

// ── Login tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_login_success() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .and(body_json(json!({ "login_id": "R100", "password": "01-Mar-2005" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "name": "Jane Doe",
            "regNo": "R100",
            "sessionList": ["2023-24", "2024-25"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let result = client.login(&jane_request()).await.unwrap();

    assert_eq!(result.name, "Jane Doe");
    assert_eq!(result.reg_no, "R100");
    assert_eq!(result.session_list, ["2023-24", "2024-25"]);
}

#[tokio::test]
async fn test_login_rejected_with_detail() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "detail": "Invalid credentials" })),
        )
        .mount(&server)
        .await;

    let err = client.login(&jane_request()).await.unwrap_err();

    match err {
        Error::Rejected { status, ref detail } => {
            assert_eq!(status, 401);
            assert_eq!(detail.as_deref(), Some("Invalid credentials"));
        }
        other => panic!("expected Rejected error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_login_rejected_without_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let err = client.login(&jane_request()).await.unwrap_err();

    assert!(
        matches!(err, Error::Rejected { detail: None, .. }),
        "expected Rejected, got: {err:?}"
    );
    assert_eq!(err.status(), Some(500));
}

#[tokio::test]
async fn test_login_legacy_shape_is_reported() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "student": {
                "Name as per 10th Document": "Jane Doe",
                "Roll Number": "R100"
            }
        })))
        .mount(&server)
        .await;

    let err = client.login(&jane_request()).await.unwrap_err();

    assert!(
        matches!(err, Error::LegacyLoginShape),
        "expected LegacyLoginShape, got: {err:?}"
    );
}

#[tokio::test]
async fn test_login_malformed_success_body() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = client.login(&jane_request()).await.unwrap_err();

    match err {
        Error::Deserialization { ref body, .. } => assert!(body.contains("oops")),
        other => panic!("expected Deserialization error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_login_connection_refused() {
    // Reserve a port, then close it so the connection is refused.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    let base_url = Url::parse(&format!("http://127.0.0.1:{port}")).unwrap();

    let client = RecordsClient::new(base_url, &TransportConfig::default()).unwrap();
    let err = client.login(&jane_request()).await.unwrap_err();

    assert!(err.is_transport(), "expected transport error, got: {err:?}");
}

// ── Details tests ───────────────────────────────────────────────────

#[tokio::test]
async fn test_student_details_success() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/student/details"))
        .and(query_param("regNo", "R100"))
        .and(query_param("session", "2023-24"))
        .respond_with(ResponseTemplate::new(200).set_body_json(details_body()))
        .expect(1)
        .mount(&server)
        .await;

    let details = client.student_details("R100", "2023-24").await.unwrap();

    assert_eq!(details.basic.name, "Jane Doe");
    assert_eq!(details.academic.section, "B");
    assert_eq!(details.subjects.len(), 2);
    assert_eq!(details.subjects[0].name, "History");
}

#[tokio::test]
async fn test_student_details_encodes_session() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/student/details"))
        .and(query_param("session", "2023/24 Odd&Even"))
        .respond_with(ResponseTemplate::new(200).set_body_json(details_body()))
        .expect(1)
        .mount(&server)
        .await;

    client
        .student_details("R100", "2023/24 Odd&Even")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_student_details_rejected_ignores_body() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/student/details"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "detail": "nope" })))
        .mount(&server)
        .await;

    let err = client.student_details("R100", "2023-24").await.unwrap_err();

    match err {
        Error::Rejected { status, detail } => {
            assert_eq!(status, 404);
            assert_eq!(detail, None);
        }
        other => panic!("expected Rejected error, got: {other:?}"),
    }
}
