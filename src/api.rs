use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use metrics::{counter, describe_counter, describe_histogram, histogram};
use once_cell::sync::OnceCell;
use tower_http::cors::CorsLayer;

use crate::aggregate;
use crate::config::Settings;
use crate::merge;
use crate::source::SourceClient;

fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!(
            "aggregate_requests_total",
            "Aggregation requests received on /numbers."
        );
        describe_histogram!(
            "aggregate_duration_ms",
            "End-to-end aggregation time in milliseconds."
        );
    });
}

#[derive(Clone)]
pub struct AppState {
    pub settings: Arc<Settings>,
    pub client: SourceClient,
}

impl AppState {
    pub fn new(settings: Settings) -> anyhow::Result<Self> {
        let client = SourceClient::new(settings.source_timeout, settings.access_token.clone())?;
        Ok(Self {
            settings: Arc::new(settings),
            client,
        })
    }
}

/// Build the public router. CORS is wide open so the browser-hosted
/// dashboard can call /numbers cross-origin.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/numbers", get(numbers))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(serde::Serialize)]
struct NumbersResp {
    numbers: Vec<serde_json::Number>,
}

#[derive(serde::Serialize)]
struct ErrorBody {
    error: String,
}

pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: &str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.to_string(),
        }
    }

    fn internal(message: &str) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}

/// GET /numbers — fan out to every configured source, merge, respond.
/// The caller always gets a well-formed numeric list (possibly empty if
/// every source failed) or one of the two structured errors; a fatal
/// coordinator fault is never papered over with a partial body.
async fn numbers(State(state): State<AppState>) -> Result<Json<NumbersResp>, ApiError> {
    ensure_metrics_described();
    counter!("aggregate_requests_total").increment(1);

    let urls = &state.settings.source_urls;
    if urls.is_empty() {
        return Err(ApiError::bad_request("no sources configured"));
    }

    let t0 = Instant::now();
    let results = aggregate::aggregate(&state.client, urls).await.map_err(|e| {
        tracing::error!(error = ?e, "aggregation faulted");
        ApiError::internal("internal aggregation failure")
    })?;

    let merged = merge::merge(results);
    histogram!("aggregate_duration_ms").record(t0.elapsed().as_secs_f64() * 1_000.0);

    Ok(Json(NumbersResp {
        numbers: merge::to_json_numbers(&merged),
    }))
}
