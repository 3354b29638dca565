use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use mockito::{Matcher, Server, ServerGuard};
use postsync_api::{
    create_router,
    handlers::sync::{FETCH_FAILED_MESSAGE, SAVE_FAILED_MESSAGE, SUCCESS_MESSAGE},
    AppState,
};
use postsync_store::StoreConfig;
use tower::ServiceExt;

const POSTS_PATH: &str = "/posts";
const DOCS_PATH: &str = "/v1/projects/demo/databases/(default)/documents/posts";

fn app(api: &ServerGuard, firestore: &ServerGuard) -> Router {
    let store_config = StoreConfig::new("demo").with_emulator_host(firestore.host_with_port());
    create_router(AppState::new(
        format!("{}{}", api.url(), POSTS_PATH),
        store_config,
    ))
}

async fn call(app: Router, method: Method, uri: &str) -> (StatusCode, String, String) {
    let response = app
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string())
        .unwrap_or_default();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();

    (status, content_type, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn test_fetch_and_store_succeeds() {
    let mut api = Server::new_async().await;
    let mut firestore = Server::new_async().await;

    api.mock("GET", POSTS_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"id":1,"title":"a","body":"b"},{"id":2,"title":"c","body":"d"}]"#)
        .create_async()
        .await;

    let first = firestore
        .mock("PATCH", format!("{}/1", DOCS_PATH).as_str())
        .match_body(Matcher::PartialJsonString(
            r#"{"fields":{"title":{"stringValue":"a"},"body":{"stringValue":"b"}}}"#.to_string(),
        ))
        .with_status(200)
        .with_body("{}")
        .expect(1)
        .create_async()
        .await;
    let second = firestore
        .mock("PATCH", format!("{}/2", DOCS_PATH).as_str())
        .match_body(Matcher::PartialJsonString(
            r#"{"fields":{"title":{"stringValue":"c"},"body":{"stringValue":"d"}}}"#.to_string(),
        ))
        .with_status(200)
        .with_body("{}")
        .expect(1)
        .create_async()
        .await;

    let (status, content_type, body) = call(app(&api, &firestore), Method::GET, "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(content_type.starts_with("text/plain"));
    assert_eq!(body, SUCCESS_MESSAGE);
    first.assert_async().await;
    second.assert_async().await;
}

#[tokio::test]
async fn test_upstream_unavailable_skips_writer() {
    let mut api = Server::new_async().await;
    let mut firestore = Server::new_async().await;

    api.mock("GET", POSTS_PATH)
        .with_status(503)
        .create_async()
        .await;
    let writes = firestore
        .mock("PATCH", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let (status, content_type, body) = call(app(&api, &firestore), Method::GET, "/").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(content_type.starts_with("text/plain"));
    assert_eq!(body, FETCH_FAILED_MESSAGE);
    writes.assert_async().await;
}

#[tokio::test]
async fn test_malformed_upstream_body() {
    let mut api = Server::new_async().await;
    let firestore = Server::new_async().await;

    api.mock("GET", POSTS_PATH)
        .with_status(200)
        .with_body(r#"{"id":1,"title":"a","body":"b"}"#)
        .create_async()
        .await;

    let (status, _, body) = call(app(&api, &firestore), Method::GET, "/").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, FETCH_FAILED_MESSAGE);
}

#[tokio::test]
async fn test_failed_write_reports_save_failure() {
    let mut api = Server::new_async().await;
    let mut firestore = Server::new_async().await;

    api.mock("GET", POSTS_PATH)
        .with_status(200)
        .with_body(r#"[{"id":7,"title":"x","body":"y"}]"#)
        .create_async()
        .await;
    let write = firestore
        .mock("PATCH", format!("{}/7", DOCS_PATH).as_str())
        .with_status(500)
        .with_body(r#"{"error":{"code":500,"status":"INTERNAL"}}"#)
        .expect(1)
        .create_async()
        .await;

    let (status, _, body) = call(app(&api, &firestore), Method::GET, "/").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, SAVE_FAILED_MESSAGE);
    // The record id stays in the server logs.
    assert!(!body.contains('7'));
    write.assert_async().await;
}

#[tokio::test]
async fn test_missing_project_reports_save_failure() {
    let mut api = Server::new_async().await;

    api.mock("GET", POSTS_PATH)
        .with_status(200)
        .with_body(r#"[{"id":1,"title":"a","body":"b"}]"#)
        .create_async()
        .await;

    let app = create_router(AppState::new(
        format!("{}{}", api.url(), POSTS_PATH),
        StoreConfig::default(),
    ));
    let (status, _, body) = call(app, Method::GET, "/").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, SAVE_FAILED_MESSAGE);
}

#[tokio::test]
async fn test_any_method_is_accepted() {
    let mut api = Server::new_async().await;
    let mut firestore = Server::new_async().await;

    api.mock("GET", POSTS_PATH)
        .with_status(200)
        .with_body("[]")
        .expect(2)
        .create_async()
        .await;
    firestore
        .mock("PATCH", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    for method in [Method::POST, Method::PUT] {
        let (status, _, body) = call(app(&api, &firestore), method, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, SUCCESS_MESSAGE);
    }
}

#[tokio::test]
async fn test_other_paths_are_not_routed() {
    let api = Server::new_async().await;
    let firestore = Server::new_async().await;

    let (status, _, _) = call(app(&api, &firestore), Method::GET, "/posts").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}
