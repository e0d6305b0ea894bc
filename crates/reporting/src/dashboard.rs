//! Dashboard overview aggregation.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use pulse_core::types::{Campaign, CampaignStatus, Channel, Conversion};

use crate::metrics;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ChannelPerformanceRow {
    pub channel_id: u32,
    pub name: String,
    pub spend: f64,
    pub revenue: f64,
    pub roas: f64,
    pub conversions: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TimeSeriesPoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DashboardOverview {
    pub total_spend: f64,
    pub total_revenue: f64,
    pub total_conversions: u64,
    pub total_impressions: u64,
    pub total_clicks: u64,
    pub overall_roas: f64,
    pub overall_ctr: f64,
    pub overall_conversion_rate: f64,
    pub active_campaigns: u64,
    pub channel_breakdown: Vec<ChannelPerformanceRow>,
    pub conversions_over_time: Vec<TimeSeriesPoint>,
    pub generated_at: DateTime<Utc>,
}

/// Builds the overview from the current collections. Callers narrow the
/// conversion slice to the requested window first.
pub fn overview(
    channels: &[Channel],
    campaigns: &[Campaign],
    conversions: &[Conversion],
) -> DashboardOverview {
    let total_spend: f64 = channels.iter().map(|c| c.spend).sum();
    let total_revenue: f64 = channels.iter().map(|c| c.revenue).sum();
    let total_conversions: u64 = channels.iter().map(|c| c.conversions).sum();
    let total_impressions: u64 = campaigns.iter().map(|c| c.impressions).sum();
    let total_clicks: u64 = campaigns.iter().map(|c| c.clicks).sum();
    let campaign_conversions: u64 = campaigns.iter().map(|c| c.conversions).sum();

    let channel_breakdown = channels
        .iter()
        .map(|c| ChannelPerformanceRow {
            channel_id: c.id,
            name: c.name.clone(),
            spend: c.spend,
            revenue: c.revenue,
            roas: c.roas,
            conversions: c.conversions,
        })
        .collect();

    DashboardOverview {
        total_spend,
        total_revenue,
        total_conversions,
        total_impressions,
        total_clicks,
        overall_roas: metrics::roas(total_revenue, total_spend),
        overall_ctr: metrics::ctr(total_clicks, total_impressions),
        overall_conversion_rate: metrics::conversion_rate(campaign_conversions, total_clicks),
        active_campaigns: campaigns
            .iter()
            .filter(|c| c.status == CampaignStatus::Active)
            .count() as u64,
        channel_breakdown,
        conversions_over_time: conversions_per_day(conversions),
        generated_at: Utc::now(),
    }
}

/// Daily conversion counts, oldest day first.
pub fn conversions_per_day(conversions: &[Conversion]) -> Vec<TimeSeriesPoint> {
    let mut buckets: BTreeMap<NaiveDate, u64> = BTreeMap::new();
    for conversion in conversions {
        *buckets.entry(conversion.timestamp.date_naive()).or_insert(0) += 1;
    }
    buckets
        .into_iter()
        .map(|(day, count)| TimeSeriesPoint {
            timestamp: day.and_time(NaiveTime::MIN).and_utc(),
            value: count as f64,
        })
        .collect()
}
