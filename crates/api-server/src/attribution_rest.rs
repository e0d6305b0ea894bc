//! Attribution endpoints — the aggregated breakdown report and the
//! per-conversion credit map behind the touchpoint analysis panel.

use std::collections::BTreeMap;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use pulse_attribution::engine::{attribute, channel_key, device_key};
use pulse_core::types::AttributionModel;
use pulse_core::PulseResult;
use pulse_reporting::attribution_report::{breakdown, AttributionBreakdown, BreakdownDimension};

use crate::rest::{reject, AppState, ErrorResponse};

#[derive(Debug, Default, Deserialize)]
pub struct AttributionQuery {
    pub model: Option<String>,
    pub dimension: Option<String>,
}

/// Resolves the model parameter: absent falls back to the configured
/// default, an explicit unknown identifier is an error.
fn resolve_model(param: Option<&str>, default_model: AttributionModel) -> PulseResult<AttributionModel> {
    match param {
        Some(id) => id.parse(),
        None => Ok(default_model),
    }
}

fn resolve_dimension(param: Option<&str>) -> PulseResult<BreakdownDimension> {
    match param {
        Some(id) => id.parse(),
        None => Ok(BreakdownDimension::Channel),
    }
}

/// GET /v1/attribution/breakdown — Aggregated attribution report across
/// all conversions.
#[utoipa::path(
    get,
    path = "/v1/attribution/breakdown",
    tag = "Attribution",
    params(
        ("model" = Option<String>, Query, description = "first-touch | last-touch | linear | time-decay"),
        ("dimension" = Option<String>, Query, description = "channel | device, default channel"),
    ),
    responses(
        (status = 200, description = "Attribution breakdown", body = AttributionBreakdown),
        (status = 400, description = "Unknown model or dimension", body = ErrorResponse),
    )
)]
pub async fn attribution_breakdown(
    State(state): State<AppState>,
    Query(query): Query<AttributionQuery>,
) -> Result<Json<AttributionBreakdown>, (StatusCode, Json<ErrorResponse>)> {
    let model = resolve_model(query.model.as_deref(), state.default_model).map_err(reject)?;
    let dimension = resolve_dimension(query.dimension.as_deref()).map_err(reject)?;

    let conversions = state.store.list_conversions();
    let channels = state.store.list_channels();
    let report = breakdown(&conversions, &channels, model, dimension);
    metrics::counter!("api.attribution.reports", "model" => model.as_str()).increment(1);
    Ok(Json(report))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ConversionAttribution {
    pub conversion_id: u32,
    pub model: AttributionModel,
    pub dimension: BreakdownDimension,
    /// Credit per key; sums to 1.0 whenever the path is non-empty.
    pub credits: BTreeMap<String, f64>,
}

/// GET /v1/attribution/conversions/{id} — Credit map for one conversion's
/// touchpoint path.
#[utoipa::path(
    get,
    path = "/v1/attribution/conversions/{id}",
    tag = "Attribution",
    params(
        ("id" = u32, Path, description = "Conversion id"),
        ("model" = Option<String>, Query, description = "first-touch | last-touch | linear | time-decay"),
        ("dimension" = Option<String>, Query, description = "channel | device, default channel"),
    ),
    responses(
        (status = 200, description = "Per-key credit for the conversion", body = ConversionAttribution),
        (status = 400, description = "Unknown model or dimension", body = ErrorResponse),
        (status = 404, description = "No such conversion", body = ErrorResponse),
    )
)]
pub async fn conversion_attribution(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    Query(query): Query<AttributionQuery>,
) -> Result<Json<ConversionAttribution>, (StatusCode, Json<ErrorResponse>)> {
    let model = resolve_model(query.model.as_deref(), state.default_model).map_err(reject)?;
    let dimension = resolve_dimension(query.dimension.as_deref()).map_err(reject)?;
    let conversion = state.store.get_conversion(id).map_err(reject)?;

    let credits = match dimension {
        BreakdownDimension::Channel => attribute(&conversion.touchpoints, model, channel_key),
        BreakdownDimension::Device => attribute(&conversion.touchpoints, model, device_key),
    };
    Ok(Json(ConversionAttribution {
        conversion_id: id,
        model,
        dimension,
        credits,
    }))
}
