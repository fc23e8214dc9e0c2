use super::*;

use axum::Router;
use axum::http::{HeaderValue, Method};
use axum::routing::{get, post};
use tower::ServiceExt;

// =============================================================================
// Path selection
// =============================================================================

#[test]
fn backend_path_accepts_known_prefixes() {
    assert_eq!(backend_path("", "/machine/"), Some("/machine/"));
    assert_eq!(backend_path("", "/machine/token/S1/ssh/3"), Some("/machine/token/S1/ssh/3"));
    assert_eq!(backend_path("", "/recover"), Some("/recover"));
    assert_eq!(backend_path("", "/edumfaserver/test_request"), Some("/edumfaserver/test_request"));
}

#[test]
fn backend_path_rejects_ui_and_unknown_paths() {
    assert_eq!(backend_path("", "/recovery"), None);
    assert_eq!(backend_path("", "/component/clienttype"), None);
    assert_eq!(backend_path("", "/"), None);
}

#[test]
fn backend_path_strips_instance() {
    assert_eq!(backend_path("/edumfa", "/edumfa/client/"), Some("/client/"));
    assert_eq!(backend_path("/edumfa", "/client/"), None);
    assert_eq!(backend_path("/edumfa", "/edumfaserver/"), None);
}

#[test]
fn target_keeps_query() {
    let backend = Backend::new("http://backend:5000/", "");
    assert_eq!(
        backend.target("/machine/", Some("resolver=hosts")).as_deref(),
        Some("http://backend:5000/machine/?resolver=hosts")
    );
    assert_eq!(backend.target("/client/", Some("")).as_deref(), Some("http://backend:5000/client/"));
    assert_eq!(backend.target("/pkg/app.js", None), None);
}

#[test]
fn only_auth_and_content_type_are_forwarded() {
    let mut headers = HeaderMap::new();
    headers.insert(AUTHORIZATION, HeaderValue::from_static("token"));
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert("cookie", HeaderValue::from_static("session=1"));

    let out = forwarded_headers(&headers);

    assert_eq!(out.len(), 2);
    assert_eq!(out.get(AUTHORIZATION), Some(&HeaderValue::from_static("token")));
}

// =============================================================================
// Relay
// =============================================================================

async fn spawn_backend() -> String {
    let app = Router::new()
        .route(
            "/machine/",
            get(|request: Request| async move {
                let auth = request
                    .headers()
                    .get(AUTHORIZATION)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default()
                    .to_owned();
                let query = request.uri().query().unwrap_or_default().to_owned();
                axum::Json(serde_json::json!({"auth": auth, "query": query}))
            }),
        )
        .route(
            "/edumfaserver/{identifier}",
            post(|body: String| async move { (StatusCode::CREATED, body) }),
        );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

fn proxy(base: &str) -> Router {
    Router::new().fallback(forward).with_state(Backend::new(base, ""))
}

#[tokio::test]
async fn relays_query_and_authorization() {
    let base = spawn_backend().await;
    let response = proxy(&base)
        .oneshot(
            axum::http::Request::builder()
                .uri("/machine/?resolver=hosts")
                .header(AUTHORIZATION, "abc")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["auth"], "abc");
    assert_eq!(json["query"], "resolver=hosts");
}

#[tokio::test]
async fn relays_body_and_status() {
    let base = spawn_backend().await;
    let response = proxy(&base)
        .oneshot(
            axum::http::Request::builder()
                .method(Method::POST)
                .uri("/edumfaserver/main")
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(r#"{"url":"https://remote"}"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert_eq!(&body[..], br#"{"url":"https://remote"}"#);
}

#[tokio::test]
async fn non_backend_paths_are_not_found() {
    let response = proxy("http://127.0.0.1:9")
        .oneshot(axum::http::Request::builder().uri("/nowhere").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn unreachable_backend_is_bad_gateway() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let response = proxy(&format!("http://{addr}"))
        .oneshot(axum::http::Request::builder().uri("/client/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}
