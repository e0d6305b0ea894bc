//! Cross-device journey endpoints behind the device-path panel.

use std::collections::BTreeMap;

use axum::extract::{Query, State};
use axum::Json;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use pulse_attribution::cross_device::{journeys, summarize, transition_flow, JourneyFilter};
use pulse_attribution::{CrossDeviceJourney, CrossDeviceSummary};
use pulse_core::types::Conversion;

use crate::rest::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct CrossDeviceQuery {
    /// Window size in days. Absent means the whole history.
    pub days: Option<i64>,
    pub device: Option<String>,
}

fn cutoff(days: Option<i64>) -> Option<DateTime<Utc>> {
    days.map(|d| Utc::now() - Duration::days(d))
}

fn windowed(conversions: Vec<Conversion>, since: Option<DateTime<Utc>>) -> Vec<Conversion> {
    match since {
        Some(since) => conversions
            .into_iter()
            .filter(|c| c.timestamp >= since)
            .collect(),
        None => conversions,
    }
}

/// GET /v1/cross-device/summary — Aggregate multi-device figures over the
/// requested window.
#[utoipa::path(
    get,
    path = "/v1/cross-device/summary",
    tag = "Cross-device",
    params(("days" = Option<i64>, Query, description = "Window size in days, default all history")),
    responses((status = 200, description = "Cross-device summary", body = CrossDeviceSummary))
)]
pub async fn cross_device_summary(
    State(state): State<AppState>,
    Query(query): Query<CrossDeviceQuery>,
) -> Json<CrossDeviceSummary> {
    let conversions = windowed(state.store.list_conversions(), cutoff(query.days));
    Json(summarize(&conversions))
}

/// GET /v1/cross-device/journeys — Per-conversion device paths, most
/// recent first.
#[utoipa::path(
    get,
    path = "/v1/cross-device/journeys",
    tag = "Cross-device",
    params(
        ("days" = Option<i64>, Query, description = "Window size in days, default all history"),
        ("device" = Option<String>, Query, description = "Keep journeys that touched this device label"),
    ),
    responses((status = 200, description = "Matching journeys", body = [CrossDeviceJourney]))
)]
pub async fn cross_device_journeys(
    State(state): State<AppState>,
    Query(query): Query<CrossDeviceQuery>,
) -> Json<Vec<CrossDeviceJourney>> {
    let filter = JourneyFilter {
        device: query.device,
        since: cutoff(query.days),
    };
    Json(journeys(&state.store.list_conversions(), &filter))
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TransitionFlowResponse {
    /// `"from->to"` device pair to occurrence count.
    pub transitions: BTreeMap<String, u64>,
    pub generated_at: DateTime<Utc>,
}

/// GET /v1/cross-device/transitions — Consecutive device-pair counts
/// across all journeys in the window.
#[utoipa::path(
    get,
    path = "/v1/cross-device/transitions",
    tag = "Cross-device",
    params(("days" = Option<i64>, Query, description = "Window size in days, default all history")),
    responses((status = 200, description = "Device transition counts", body = TransitionFlowResponse))
)]
pub async fn cross_device_transitions(
    State(state): State<AppState>,
    Query(query): Query<CrossDeviceQuery>,
) -> Json<TransitionFlowResponse> {
    let conversions = windowed(state.store.list_conversions(), cutoff(query.days));
    Json(TransitionFlowResponse {
        transitions: transition_flow(&conversions),
        generated_at: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use pulse_core::types::{AttributionModel, DeviceType, Touchpoint};
    use pulse_data::requests::CreateConversionRequest;
    use pulse_data::DashboardStore;

    fn touchpoint(device: DeviceType, minutes_ago: i64) -> Touchpoint {
        Touchpoint {
            channel_id: Some(1),
            device: Some(device),
            interaction: "click".to_string(),
            timestamp: Utc::now() - Duration::minutes(minutes_ago),
            weight: None,
        }
    }

    fn test_state() -> AppState {
        let store = DashboardStore::new();
        store.create_conversion(CreateConversionRequest {
            customer_id: "cust-1".to_string(),
            revenue: 200.0,
            timestamp: Some(Utc::now() - Duration::days(2)),
            touchpoints: vec![
                touchpoint(DeviceType::Mobile, 3000),
                touchpoint(DeviceType::Desktop, 2900),
            ],
        });
        store.create_conversion(CreateConversionRequest {
            customer_id: "cust-2".to_string(),
            revenue: 100.0,
            timestamp: Some(Utc::now() - Duration::days(30)),
            touchpoints: vec![touchpoint(DeviceType::Desktop, 43_300)],
        });
        AppState::new(Arc::new(store), AttributionModel::Linear)
    }

    #[tokio::test]
    async fn test_summary_covers_all_history_by_default() {
        let state = test_state();
        let summary = cross_device_summary(State(state), Query(CrossDeviceQuery::default())).await;
        assert_eq!(summary.0.total_conversions, 2);
        assert_eq!(summary.0.cross_device_conversions, 1);
        assert!((summary.0.cross_device_rate - 0.5).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_days_window_narrows_the_summary() {
        let state = test_state();
        let query = CrossDeviceQuery {
            days: Some(7),
            device: None,
        };
        let summary = cross_device_summary(State(state), Query(query)).await;
        assert_eq!(summary.0.total_conversions, 1);
        assert_eq!(summary.0.cross_device_conversions, 1);
    }

    #[tokio::test]
    async fn test_journeys_filter_by_device_label() {
        let state = test_state();
        let query = CrossDeviceQuery {
            days: None,
            device: Some("mobile".to_string()),
        };
        let journeys = cross_device_journeys(State(state), Query(query)).await;
        assert_eq!(journeys.0.len(), 1);
        assert_eq!(journeys.0[0].customer_id, "cust-1");
    }

    #[tokio::test]
    async fn test_transitions_count_device_pairs() {
        let state = test_state();
        let flows =
            cross_device_transitions(State(state), Query(CrossDeviceQuery::default())).await;
        assert_eq!(flows.0.transitions["mobile->desktop"], 1);
        assert_eq!(flows.0.transitions.len(), 1);
    }
}
