//! Conversion CRUD and filter endpoints.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use pulse_core::types::Conversion;
use pulse_data::requests::{CreateConversionRequest, UpdateConversionRequest};

use crate::rest::{reject, AppState, ErrorResponse};

#[derive(Debug, Default, Deserialize)]
pub struct ConversionListQuery {
    pub customer_id: Option<String>,
    pub channel_id: Option<u32>,
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

/// GET /v1/conversions — List conversions with optional filters. Filters
/// combine; each narrows the result further.
#[utoipa::path(
    get,
    path = "/v1/conversions",
    tag = "Conversions",
    params(
        ("customer_id" = Option<String>, Query, description = "Filter by customer"),
        ("channel_id" = Option<u32>, Query, description = "Conversions whose path touched this channel"),
        ("start" = Option<String>, Query, description = "Inclusive RFC 3339 lower bound"),
        ("end" = Option<String>, Query, description = "Inclusive RFC 3339 upper bound"),
    ),
    responses((status = 200, description = "Matching conversions", body = [Conversion]))
)]
pub async fn list_conversions(
    State(state): State<AppState>,
    Query(query): Query<ConversionListQuery>,
) -> Json<Vec<Conversion>> {
    let mut conversions = match &query.customer_id {
        Some(customer_id) => state.store.conversions_by_customer(customer_id),
        None => state.store.list_conversions(),
    };
    if let Some(channel_id) = query.channel_id {
        conversions.retain(|c| {
            c.touchpoints
                .iter()
                .any(|t| t.channel_id == Some(channel_id))
        });
    }
    if let Some(start) = query.start {
        conversions.retain(|c| c.timestamp >= start);
    }
    if let Some(end) = query.end {
        conversions.retain(|c| c.timestamp <= end);
    }
    Json(conversions)
}

/// GET /v1/conversions/{id} — Fetch one conversion with its touchpoints.
#[utoipa::path(
    get,
    path = "/v1/conversions/{id}",
    tag = "Conversions",
    params(("id" = u32, Path, description = "Conversion id")),
    responses(
        (status = 200, description = "The conversion", body = Conversion),
        (status = 404, description = "No such conversion", body = ErrorResponse),
    )
)]
pub async fn get_conversion(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<Conversion>, (StatusCode, Json<ErrorResponse>)> {
    state.store.get_conversion(id).map(Json).map_err(reject)
}

/// POST /v1/conversions — Record a conversion.
#[utoipa::path(
    post,
    path = "/v1/conversions",
    tag = "Conversions",
    request_body = CreateConversionRequest,
    responses((status = 201, description = "Conversion recorded", body = Conversion))
)]
pub async fn create_conversion(
    State(state): State<AppState>,
    Json(req): Json<CreateConversionRequest>,
) -> (StatusCode, Json<Conversion>) {
    let conversion = state.store.create_conversion(req);
    metrics::counter!("api.conversions.created").increment(1);
    (StatusCode::CREATED, Json(conversion))
}

/// PUT /v1/conversions/{id} — Merge an update into a conversion.
#[utoipa::path(
    put,
    path = "/v1/conversions/{id}",
    tag = "Conversions",
    params(("id" = u32, Path, description = "Conversion id")),
    request_body = UpdateConversionRequest,
    responses(
        (status = 200, description = "Updated conversion", body = Conversion),
        (status = 404, description = "No such conversion", body = ErrorResponse),
    )
)]
pub async fn update_conversion(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    Json(req): Json<UpdateConversionRequest>,
) -> Result<Json<Conversion>, (StatusCode, Json<ErrorResponse>)> {
    state.store.update_conversion(id, req).map(Json).map_err(reject)
}

/// DELETE /v1/conversions/{id} — Remove a conversion.
#[utoipa::path(
    delete,
    path = "/v1/conversions/{id}",
    tag = "Conversions",
    params(("id" = u32, Path, description = "Conversion id")),
    responses(
        (status = 204, description = "Conversion removed"),
        (status = 404, description = "No such conversion", body = ErrorResponse),
    )
)]
pub async fn delete_conversion(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    state.store.delete_conversion(id).map_err(reject)?;
    metrics::counter!("api.conversions.deleted").increment(1);
    Ok(StatusCode::NO_CONTENT)
}
