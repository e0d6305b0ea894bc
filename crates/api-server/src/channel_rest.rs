//! Channel CRUD endpoints.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use pulse_core::types::Channel;
use pulse_data::requests::{CreateChannelRequest, UpdateChannelRequest};

use crate::rest::{reject, AppState, ErrorResponse};

/// GET /v1/channels — List all channels.
#[utoipa::path(
    get,
    path = "/v1/channels",
    tag = "Channels",
    responses((status = 200, description = "All channels", body = [Channel]))
)]
pub async fn list_channels(State(state): State<AppState>) -> Json<Vec<Channel>> {
    Json(state.store.list_channels())
}

/// GET /v1/channels/{id} — Fetch one channel.
#[utoipa::path(
    get,
    path = "/v1/channels/{id}",
    tag = "Channels",
    params(("id" = u32, Path, description = "Channel id")),
    responses(
        (status = 200, description = "The channel", body = Channel),
        (status = 404, description = "No such channel", body = ErrorResponse),
    )
)]
pub async fn get_channel(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<Json<Channel>, (StatusCode, Json<ErrorResponse>)> {
    state.store.get_channel(id).map(Json).map_err(reject)
}

/// POST /v1/channels — Create a channel.
#[utoipa::path(
    post,
    path = "/v1/channels",
    tag = "Channels",
    request_body = CreateChannelRequest,
    responses((status = 201, description = "Channel created", body = Channel))
)]
pub async fn create_channel(
    State(state): State<AppState>,
    Json(req): Json<CreateChannelRequest>,
) -> (StatusCode, Json<Channel>) {
    let channel = state.store.create_channel(req);
    metrics::counter!("api.channels.created").increment(1);
    (StatusCode::CREATED, Json(channel))
}

/// PUT /v1/channels/{id} — Merge an update into a channel.
#[utoipa::path(
    put,
    path = "/v1/channels/{id}",
    tag = "Channels",
    params(("id" = u32, Path, description = "Channel id")),
    request_body = UpdateChannelRequest,
    responses(
        (status = 200, description = "Updated channel", body = Channel),
        (status = 404, description = "No such channel", body = ErrorResponse),
    )
)]
pub async fn update_channel(
    State(state): State<AppState>,
    Path(id): Path<u32>,
    Json(req): Json<UpdateChannelRequest>,
) -> Result<Json<Channel>, (StatusCode, Json<ErrorResponse>)> {
    state.store.update_channel(id, req).map(Json).map_err(reject)
}

/// DELETE /v1/channels/{id} — Remove a channel.
#[utoipa::path(
    delete,
    path = "/v1/channels/{id}",
    tag = "Channels",
    params(("id" = u32, Path, description = "Channel id")),
    responses(
        (status = 204, description = "Channel removed"),
        (status = 404, description = "No such channel", body = ErrorResponse),
    )
)]
pub async fn delete_channel(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> Result<StatusCode, (StatusCode, Json<ErrorResponse>)> {
    state.store.delete_channel(id).map_err(reject)?;
    metrics::counter!("api.channels.deleted").increment(1);
    Ok(StatusCode::NO_CONTENT)
}
