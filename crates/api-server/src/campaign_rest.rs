//! Campaign CRUD and filter endpoints.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use pulse_core::types::{Campaign, CampaignStatus};
use pulse_data::requests::{CreateCampaignRequest, UpdateCampaignRequest};

use crate::rest::{reject, AppState, ErrorResponse};

#[derive(Debug, Default, Deserialize)]
pub struct CampaignListQuery {
    pub status: Option<CampaignStatus>,
    pub channel_id: Option<u32>,
}

/// GET /v1/campaigns — List campaigns, optionally filtered by status
/// and/or channel.
#[utoipa::path(
    get,
    path = "/v1/campaigns",
    tag = "Campaigns",
    params(
        ("status" = Option<String>, Query, description = "Filter by campaign status"),
        ("channel_id" = Option<u32>, Query, description = "Filter by owning channel"),
    ),
    responses((status = 200, description = "Matching campaigns", body = [Campaign]))
)]
pub async fn list_campaigns(
    State(state): State<AppState>,
    Query(query): Query<CampaignListQuery>,
) -> Json<Vec<Campaign>> {
    let mut campaigns = match query.channel_id {
        Some(channel_id) => state.store.campaigns_by_channel(channel_id),
        None => state.store.list_campaigns(),
    };
    if let Some(status) = query.status {
        campaigns.retain(|c| c.status == status);
    }
    Json(campaigns)
}

/// GET /v1/campaigns/{id} — Fetch one campaign.
#[utoipa::path(
    get,
    path = "/v1/campaigns/{id}",
    tag = "Campaigns",
    params(("id" = u32, Path, description = "Campaign id")),
    responses(
        (status = 200, description = "The campaign", body = Campaign),
        (status = 404, description = "No such campaign", body = ErrorResponse),
    )
)]
pub async fn get_campaign(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<Campaign>, (StatusCode, Json<ErrorResponse>)> {
    state.store.get_campaign(id).map(Json).map_err(reject)
}

/// POST /v1/campaigns — Create a campaign.
#[utoipa::path(
    post,
    path = "/v1/campaigns",
    tag = "Campaigns",
    request_body = CreateCampaignRequest,
    responses((status = 201, description = "Campaign created", body = Campaign))
)]
pub async fn create_campaign(
    State(state): State<AppState>,
    Json(req): Json<CreateCampaignRequest>,
) -> (StatusCode, Json<Campaign>) {
    let campaign = state.store.create_campaign(req);
    metrics::counter!("api.campaigns.created").increment(1);
    (StatusCode::CREATED, Json(campaign))
}

/// PUT /v1/campaigns/{id} — Merge an update into a campaign.
#[utoipa::path(
    put,
    path = "/v1/campaigns/{id}",
    tag = "Campaigns",
    params(("id" = u32, Path, description = "Campaign id")),
    request_body = UpdateCampaignRequest,
    responses(
        (status = 200, description = "Updated campaign", body = Campaign),
        (status = 404, description = "No such campaign", body = ErrorResponse),
    )
)]
pub async fn update_campaign(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    Json(req): Json<UpdateCampaignRequest>,
) -> Result<Json<Campaign>, (StatusCode, Json<ErrorResponse>)> {
    state.store.update_campaign(id, req).map(Json).map_err(reject)
}

/// DELETE /v1/campaigns/{id} — Remove a campaign.
#[utoipa::path(
    delete,
    path = "/v1/campaigns/{id}",
    tag = "Campaigns",
    params(("id" = u32, Path, description = "Campaign id")),
    responses(
        (status = 204, description = "Campaign removed"),
        (status = 404, description = "No such campaign", body = ErrorResponse),
    )
)]
pub async fn delete_campaign(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    state.store.delete_campaign(id).map_err(reject)?;
    metrics::counter!("api.campaigns.deleted").increment(1);
    Ok(StatusCode::NO_CONTENT)
}
