//! HTTP profile fetcher against an in-process `/me` endpoint.

mod common;

use std::sync::Arc;

use anyhow::Result;
use axum::{
    Json, Router,
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
    routing::get,
};
use serde_json::json;

use scolaris_auth::{PermissionId, RoleId};
use scolaris_core::{SchoolId, SubjectId, UserId};
use scolaris_session::{
    AuthPhase, FetchError, HttpProfileFetcher, ProfileFetcher, SessionConfig, SessionManager,
};

use common::{FakeProvider, session_with_token};

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(router: Router) -> Result<Self> {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let base_url = format!("http://{addr}");

        let handle = tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        Ok(Self { base_url, handle })
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn profile_body() -> serde_json::Value {
    json!({
        "user": {
            "id": UserId::new(),
            "email": "r.iyer@stmarys.edu",
            "school_id": SchoolId::new(),
            "roles": ["FACULTY"],
            "permissions": ["MARKS_ENTRY"],
            "full_name": "Radhika Iyer",
            "login_status": "APPROVED"
        }
    })
}

/// `/me` that insists on the expected bearer token.
async fn me(headers: HeaderMap) -> axum::response::Response {
    let bearer = headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok());

    match bearer {
        Some("Bearer tok-valid") => (StatusCode::OK, Json(profile_body())).into_response(),
        _ => StatusCode::UNAUTHORIZED.into_response(),
    }
}

#[tokio::test]
async fn fetches_and_parses_the_profile() -> Result<()> {
    let srv = TestServer::spawn(Router::new().route("/me", get(me))).await?;
    let fetcher = HttpProfileFetcher::new(srv.base_url.clone());

    let user = fetcher.fetch("tok-valid").await.expect("profile should load");

    assert_eq!(user.full_name, "Radhika Iyer");
    assert!(user.roles.contains(&RoleId::Faculty));
    assert!(user.permissions.contains(&PermissionId::MarksEntry));
    Ok(())
}

#[tokio::test]
async fn a_rejected_token_surfaces_as_an_api_error() -> Result<()> {
    let srv = TestServer::spawn(Router::new().route("/me", get(me))).await?;
    let fetcher = HttpProfileFetcher::new(srv.base_url.clone());

    let err = fetcher.fetch("tok-stale").await.unwrap_err();

    assert!(matches!(err, FetchError::Api(401, _)));
    Ok(())
}

#[tokio::test]
async fn a_server_error_surfaces_as_an_api_error() -> Result<()> {
    let router = Router::new().route(
        "/me",
        get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let srv = TestServer::spawn(router).await?;
    let fetcher = HttpProfileFetcher::new(srv.base_url.clone());

    let err = fetcher.fetch("tok-valid").await.unwrap_err();

    assert!(matches!(err, FetchError::Api(500, _)));
    Ok(())
}

#[tokio::test]
async fn a_malformed_body_surfaces_as_a_parse_error() -> Result<()> {
    let router = Router::new().route(
        "/me",
        get(|| async { Json(json!({ "user": { "id": 5 } })) }),
    );
    let srv = TestServer::spawn(router).await?;
    let fetcher = HttpProfileFetcher::new(srv.base_url.clone());

    let err = fetcher.fetch("tok-valid").await.unwrap_err();

    assert!(matches!(err, FetchError::Parse(_)));
    Ok(())
}

#[tokio::test]
async fn an_unreachable_host_surfaces_as_a_network_error() {
    // Port 1 is unassigned on loopback; the connection is refused.
    let fetcher = HttpProfileFetcher::new("http://127.0.0.1:1");

    let err = fetcher.fetch("tok-valid").await.unwrap_err();

    assert!(matches!(err, FetchError::Network(_)));
}

#[tokio::test]
async fn the_manager_initializes_over_real_http() -> Result<()> {
    scolaris_observability::init();

    let srv = TestServer::spawn(Router::new().route("/me", get(me))).await?;

    // The session carries the token `/me` accepts.
    let session = session_with_token(SubjectId::new(), "tok-valid");
    let provider = Arc::new(FakeProvider::new(Some(session)));
    let config = SessionConfig::new(srv.base_url.clone())
        .with_grace(std::time::Duration::ZERO);
    let fetcher = HttpProfileFetcher::new(config.api_url.clone());
    let manager = SessionManager::new(provider, fetcher, config);

    manager.initialize().await;

    assert_eq!(manager.phase(), AuthPhase::AuthenticatedProfiled);
    assert_eq!(manager.user().unwrap().full_name, "Radhika Iyer");
    Ok(())
}
