//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use currency_types::{
    AppError, ConversionRequest, ConversionResponse, ConvertQuery, RateProvider, RatesResponse,
};

use crate::ConversionService;

const INVALID_PARAMS: &str = "Invalid request parameters";

/// Application state shared across handlers.
pub struct AppState<P: RateProvider> {
    pub service: ConversionService<P>,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self.0 {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::ServiceUnavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg),
        };

        let body = serde_json::json!({
            "error": message,
            "code": status.as_u16()
        });

        (status, Json(body)).into_response()
    }
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// Convert an amount between two currencies.
#[tracing::instrument(skip(state))]
pub async fn convert<P: RateProvider + 'static>(
    State(state): State<Arc<AppState<P>>>,
    query: Result<Query<ConvertQuery>, QueryRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let Query(params) = query.map_err(|e| {
        tracing::debug!(error = %e, "Rejected conversion query");
        AppError::BadRequest(INVALID_PARAMS.into())
    })?;

    // A zero amount is treated as missing, like an empty currency code.
    let missing = params.value == 0.0 || params.from.is_empty() || params.to.is_empty();
    if missing || !params.value.is_finite() {
        return Err(AppError::BadRequest(INVALID_PARAMS.into()).into());
    }

    let result = state
        .service
        .convert(ConversionRequest::new(params.value, params.from, params.to))
        .await
        .map_err(AppError::from)?;

    Ok(Json(ConversionResponse::from(result)))
}

/// Show the rate table currently served.
#[tracing::instrument(skip(state))]
pub async fn rates<P: RateProvider + 'static>(
    State(state): State<Arc<AppState<P>>>,
) -> Result<impl IntoResponse, ApiError> {
    let snapshot = state
        .service
        .rates()
        .await
        .map_err(AppError::from)?
        .ok_or_else(|| AppError::ServiceUnavailable("No exchange rates cached".into()))?;

    Ok(Json(RatesResponse::from(snapshot.as_ref())))
}
