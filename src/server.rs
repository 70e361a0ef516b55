use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::{sync::Arc, time::Duration};
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};
use tracing::error;

use crate::data::WalletNfts;
use crate::ledger::LedgerClient;
use crate::resolve::{ResolveError, Resolver};

#[derive(Debug, Deserialize)]
pub struct WalletQuery {
    pub wallet: Option<String>,
}

pub fn create_router<L: LedgerClient + 'static>(
    resolver: Arc<Resolver<L>>,
    request_timeout: Duration,
) -> Router {
    Router::new()
        .route("/get_nfts", get(get_nfts::<L>))
        .route("/health", get(health))
        .with_state(resolver)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn get_nfts<L: LedgerClient + 'static>(
    State(resolver): State<Arc<Resolver<L>>>,
    Query(query): Query<WalletQuery>,
) -> Result<Json<WalletNfts>, ApiError> {
    let wallet = query.wallet.unwrap_or_default();
    let result = resolver.resolve_wallet(wallet.as_str()).await?;

    Ok(Json(WalletNfts::from(&result)))
}

pub struct ApiError(ResolveError);

impl From<ResolveError> for ApiError {
    fn from(err: ResolveError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ResolveError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ResolveError::UpstreamUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        };

        if status.is_server_error() {
            error!(error = %self.0, "wallet lookup failed");
        }

        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
