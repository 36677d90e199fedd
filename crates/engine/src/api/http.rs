//! HTTP routes.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;

use jinni_domain::{GameError, WishOutcome};

use crate::app::App;
use crate::use_cases::WishError;

/// Header carrying the caller's opaque session id.
pub const SESSION_HEADER: &str = "x-session-id";

/// Create all HTTP routes.
pub fn routes() -> Router<Arc<App>> {
    Router::new()
        .route("/", get(health))
        .route("/api/health", get(health))
        .route("/start", post(start_game))
        .route("/wish", post(make_wish))
        .route("/restart", post(restart_game))
}

async fn health() -> &'static str {
    "OK"
}

fn session_id(headers: &HeaderMap) -> Result<String, ApiError> {
    headers
        .get(SESSION_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .ok_or(ApiError::MissingSessionId)
}

#[derive(Serialize)]
struct StartResponse {
    story: String,
}

#[derive(Deserialize, Default)]
struct WishRequest {
    #[serde(default)]
    wish: String,
}

#[derive(Serialize)]
struct WishResponse {
    reply: String,
    status: WishOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    wish_count: Option<u8>,
}

#[derive(Serialize)]
struct RestartResponse {
    restarted: bool,
}

async fn start_game(
    State(app): State<Arc<App>>,
    headers: HeaderMap,
) -> Result<Json<StartResponse>, ApiError> {
    let session_id = session_id(&headers)?;
    let story = app.use_cases.start_game.execute(&session_id);
    Ok(Json(StartResponse { story }))
}

async fn make_wish(
    State(app): State<Arc<App>>,
    headers: HeaderMap,
    Json(body): Json<WishRequest>,
) -> Result<Json<WishResponse>, ApiError> {
    let session_id = session_id(&headers)?;
    let resolved = app.use_cases.make_wish.execute(&session_id, &body.wish).await?;
    Ok(Json(WishResponse {
        reply: resolved.reply,
        status: resolved.status,
        wish_count: resolved.wish_count,
    }))
}

async fn restart_game(
    State(app): State<Arc<App>>,
    headers: HeaderMap,
) -> Result<Json<RestartResponse>, ApiError> {
    let session_id = session_id(&headers)?;
    app.use_cases.restart_game.execute(&session_id);
    Ok(Json(RestartResponse { restarted: true }))
}

#[derive(Debug)]
pub enum ApiError {
    MissingSessionId,
    EmptyWish,
    SessionExpired,
    Generation(String),
}

impl From<WishError> for ApiError {
    fn from(e: WishError) -> Self {
        match e {
            WishError::Game(GameError::EmptyWish) => ApiError::EmptyWish,
            WishError::Game(GameError::SessionExpired) => ApiError::SessionExpired,
            WishError::Generation(cause) => ApiError::Generation(cause.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::MissingSessionId => (StatusCode::BAD_REQUEST, "Missing session id".to_string()),
            ApiError::EmptyWish => (StatusCode::BAD_REQUEST, "Empty wish".to_string()),
            ApiError::SessionExpired => (
                StatusCode::BAD_REQUEST,
                "Session expired. Please restart.".to_string(),
            ),
            ApiError::Generation(cause) => {
                (StatusCode::INTERNAL_SERVER_ERROR, format!("API error: {cause}"))
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use chrono::{TimeZone, Utc};
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::infrastructure::clock::{FixedClock, FixedRandom};
    use crate::infrastructure::ports::{FinishReason, LlmError, LlmResponse, MockLlmPort};
    use crate::scenarios::SCENARIOS;

    fn test_router(llm: MockLlmPort) -> Router {
        let app = App::with_ports(
            Arc::new(llm),
            Arc::new(FixedClock(Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap())),
            Arc::new(FixedRandom(0)),
        );
        routes().with_state(Arc::new(app))
    }

    fn llm_replying(reply: &'static str) -> MockLlmPort {
        let mut llm = MockLlmPort::new();
        llm.expect_generate().returning(move |_| {
            Ok(LlmResponse {
                content: reply.to_string(),
                finish_reason: FinishReason::Stop,
                usage: None,
            })
        });
        llm
    }

    fn post(uri: &str, body: Option<Value>) -> Request<Body> {
        let builder = Request::builder()
            .method("POST")
            .uri(uri)
            .header(SESSION_HEADER, "test-session");
        match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("valid request")
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body readable");
        serde_json::from_slice(&bytes).expect("valid json")
    }

    #[tokio::test]
    async fn start_returns_the_story() {
        let router = test_router(MockLlmPort::new());

        let response = router.oneshot(post("/start", None)).await.expect("response");
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["story"], SCENARIOS[0]);
    }

    #[tokio::test]
    async fn start_without_session_header_is_rejected() {
        let router = test_router(MockLlmPort::new());
        let request = Request::builder()
            .method("POST")
            .uri("/start")
            .body(Body::empty())
            .expect("valid request");

        let response = router.oneshot(request).await.expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert_eq!(json["error"], "Missing session id");
    }

    #[tokio::test]
    async fn wish_round_trip_reports_status_and_count() {
        let router = test_router(llm_replying("You get gold, cursed! "));

        let response = router
            .clone()
            .oneshot(post("/start", None))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);

        let response = router
            .oneshot(post("/wish", Some(json!({"wish": "I wish for gold"}))))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["reply"], "You get gold, cursed!");
        assert_eq!(json["status"], "ok");
        assert_eq!(json["wish_count"], 1);
    }

    #[tokio::test]
    async fn empty_wish_is_a_bad_request() {
        let router = test_router(MockLlmPort::new());

        router
            .clone()
            .oneshot(post("/start", None))
            .await
            .expect("response");

        let response = router
            .oneshot(post("/wish", Some(json!({"wish": "   "}))))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert_eq!(json["error"], "Empty wish");
    }

    #[tokio::test]
    async fn wish_before_start_reports_expired_session() {
        let router = test_router(MockLlmPort::new());

        let response = router
            .oneshot(post("/wish", Some(json!({"wish": "gold"}))))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert_eq!(json["error"], "Session expired. Please restart.");
    }

    #[tokio::test]
    async fn generation_failure_maps_to_api_error() {
        let mut llm = MockLlmPort::new();
        llm.expect_generate()
            .returning(|_| Err(LlmError::RequestFailed("backend down".to_string())));
        let router = test_router(llm);

        router
            .clone()
            .oneshot(post("/start", None))
            .await
            .expect("response");

        let response = router
            .oneshot(post("/wish", Some(json!({"wish": "gold"}))))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = body_json(response).await;
        let message = json["error"].as_str().expect("error string");
        assert!(message.starts_with("API error: "));
    }

    #[tokio::test]
    async fn spent_session_reply_omits_wish_count() {
        let router = test_router(llm_replying("Granted."));

        router
            .clone()
            .oneshot(post("/start", None))
            .await
            .expect("response");
        for wish in ["one", "two", "three"] {
            let response = router
                .clone()
                .oneshot(post("/wish", Some(json!({ "wish": wish }))))
                .await
                .expect("response");
            assert_eq!(response.status(), StatusCode::OK);
        }

        let response = router
            .oneshot(post("/wish", Some(json!({"wish": "four"}))))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["status"], "spent");
        assert!(json.get("wish_count").is_none());
        assert_eq!(
            json["reply"],
            crate::use_cases::game::WISHES_SPENT_REPLY
        );
    }

    #[tokio::test]
    async fn restart_clears_the_session() {
        let router = test_router(MockLlmPort::new());

        router
            .clone()
            .oneshot(post("/start", None))
            .await
            .expect("response");

        let response = router
            .clone()
            .oneshot(post("/restart", None))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["restarted"], true);

        let response = router
            .oneshot(post("/wish", Some(json!({"wish": "gold"}))))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
