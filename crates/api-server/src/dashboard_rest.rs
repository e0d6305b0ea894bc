//! Dashboard overview endpoint.

use axum::extract::{Query, State};
use axum::Json;
use chrono::{Duration, Utc};
use serde::Deserialize;

use pulse_reporting::dashboard::overview;
use pulse_reporting::DashboardOverview;

use crate::rest::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct OverviewQuery {
    /// Window size in days for the conversion series. Absent means the
    /// whole history.
    pub days: Option<i64>,
}

/// GET /v1/dashboard/overview — Headline totals, per-channel breakdown,
/// and the daily conversion series.
#[utoipa::path(
    get,
    path = "/v1/dashboard/overview",
    tag = "Dashboard",
    params(("days" = Option<i64>, Query, description = "Window size in days, default all history")),
    responses((status = 200, description = "Dashboard overview", body = DashboardOverview))
)]
pub async fn dashboard_overview(
    State(state): State<AppState>,
    Query(query): Query<OverviewQuery>,
) -> Json<DashboardOverview> {
    let mut conversions = state.store.list_conversions();
    if let Some(days) = query.days {
        let since = Utc::now() - Duration::days(days);
        conversions.retain(|c| c.timestamp >= since);
    }

    let channels = state.store.list_channels();
    let campaigns = state.store.list_campaigns();
    metrics::counter!("api.dashboard.overviews").increment(1);
    Json(overview(&channels, &campaigns, &conversions))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use pulse_core::types::AttributionModel;
    use pulse_data::requests::{CreateChannelRequest, CreateConversionRequest};
    use pulse_data::DashboardStore;

    fn test_state() -> AppState {
        let store = DashboardStore::new();
        store.create_channel(CreateChannelRequest {
            name: "Google Ads".to_string(),
            spend: 1000.0,
            conversions: 10,
            revenue: 4000.0,
        });
        store.create_conversion(CreateConversionRequest {
            customer_id: "cust-1".to_string(),
            revenue: 400.0,
            timestamp: Some(Utc::now() - Duration::days(1)),
            touchpoints: Vec::new(),
        });
        store.create_conversion(CreateConversionRequest {
            customer_id: "cust-2".to_string(),
            revenue: 400.0,
            timestamp: Some(Utc::now() - Duration::days(60)),
            touchpoints: Vec::new(),
        });
        AppState::new(Arc::new(store), AttributionModel::Linear)
    }

    #[tokio::test]
    async fn test_overview_totals_come_from_the_store() {
        let state = test_state();
        let overview = dashboard_overview(State(state), Query(OverviewQuery::default())).await;
        assert!((overview.0.total_spend - 1000.0).abs() < 1e-9);
        assert!((overview.0.overall_roas - 4.0).abs() < 1e-9);
        assert_eq!(overview.0.channel_breakdown.len(), 1);
        assert_eq!(overview.0.conversions_over_time.len(), 2);
    }

    #[tokio::test]
    async fn test_days_window_narrows_the_conversion_series() {
        let state = test_state();
        let query = OverviewQuery { days: Some(7) };
        let overview = dashboard_overview(State(state), Query(query)).await;
        assert_eq!(overview.0.conversions_over_time.len(), 1);
    }
}
