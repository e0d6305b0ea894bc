//! Attribution breakdown reports — joins engine output with channel names
//! for the dashboard's attribution panel.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use pulse_attribution::engine::{aggregate, channel_key, device_key};
use pulse_core::types::{AttributionModel, Channel, Conversion};
use pulse_core::PulseError;

/// Grouping dimension for a breakdown report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum BreakdownDimension {
    Channel,
    Device,
}

impl FromStr for BreakdownDimension {
    type Err = PulseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "channel" => Ok(BreakdownDimension::Channel),
            "device" => Ok(BreakdownDimension::Device),
            other => Err(PulseError::Validation(format!(
                "unknown breakdown dimension: {other}"
            ))),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BreakdownRow {
    pub key: String,
    /// Display label: channel name for the channel dimension, the device
    /// label otherwise. Unmapped channel ids render as "Unknown".
    pub label: String,
    pub conversions: f64,
    pub revenue: f64,
    pub revenue_share: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AttributionBreakdown {
    pub model: AttributionModel,
    pub dimension: BreakdownDimension,
    pub total_revenue: f64,
    pub rows: Vec<BreakdownRow>,
    pub generated_at: DateTime<Utc>,
}

/// Aggregated attribution report over the conversion set.
pub fn breakdown(
    conversions: &[Conversion],
    channels: &[Channel],
    model: AttributionModel,
    dimension: BreakdownDimension,
) -> AttributionBreakdown {
    let raw = match dimension {
        BreakdownDimension::Channel => aggregate(conversions, model, channel_key),
        BreakdownDimension::Device => aggregate(conversions, model, device_key),
    };
    let total_revenue: f64 = raw.iter().map(|r| r.revenue).sum();

    let rows = raw
        .into_iter()
        .map(|row| {
            let label = match dimension {
                BreakdownDimension::Channel => channel_label(channels, &row.key),
                BreakdownDimension::Device => row.key.clone(),
            };
            BreakdownRow {
                revenue_share: if total_revenue > 0.0 {
                    row.revenue / total_revenue
                } else {
                    0.0
                },
                key: row.key,
                label,
                conversions: row.conversions,
                revenue: row.revenue,
            }
        })
        .collect();

    debug!(%model, ?dimension, conversions = conversions.len(), "built attribution breakdown");
    AttributionBreakdown {
        model,
        dimension,
        total_revenue,
        rows,
        generated_at: Utc::now(),
    }
}

fn channel_label(channels: &[Channel], key: &str) -> String {
    key.parse::<u32>()
        .ok()
        .and_then(|id| channels.iter().find(|c| c.id == id))
        .map(|c| c.name.clone())
        .unwrap_or_else(|| "Unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pulse_core::types::{DeviceType, Touchpoint};

    fn touchpoint(channel_id: Option<u32>, device: DeviceType, minute: i64) -> Touchpoint {
        Touchpoint {
            channel_id,
            device: Some(device),
            interaction: "click".to_string(),
            timestamp: Utc.with_ymd_and_hms(2026, 3, 1, 10, 0, 0).unwrap()
                + chrono::Duration::minutes(minute),
            weight: None,
        }
    }

    fn conversion(id: u32, revenue: f64, channels: &[Option<u32>]) -> Conversion {
        Conversion {
            id,
            customer_id: format!("cust-{id}"),
            revenue,
            timestamp: Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
            touchpoints: channels
                .iter()
                .enumerate()
                .map(|(i, &c)| touchpoint(c, DeviceType::Desktop, i as i64))
                .collect(),
        }
    }

    fn demo_channels() -> Vec<Channel> {
        vec![
            Channel {
                id: 1,
                name: "Google Ads".to_string(),
                spend: 0.0,
                conversions: 0,
                revenue: 0.0,
                roas: 0.0,
            },
            Channel {
                id: 2,
                name: "Email Marketing".to_string(),
                spend: 0.0,
                conversions: 0,
                revenue: 0.0,
                roas: 0.0,
            },
        ]
    }

    #[test]
    fn test_channel_breakdown_joins_names_and_shares() {
        let conversions = vec![
            conversion(1, 100.0, &[Some(1), Some(2)]),
            conversion(2, 100.0, &[Some(1)]),
        ];
        let report = breakdown(
            &conversions,
            &demo_channels(),
            AttributionModel::Linear,
            BreakdownDimension::Channel,
        );

        assert_eq!(report.rows.len(), 2);
        assert_eq!(report.rows[0].label, "Google Ads");
        assert!((report.rows[0].revenue - 150.0).abs() < 1e-9);
        assert!((report.rows[0].revenue_share - 0.75).abs() < 1e-9);
        let share_total: f64 = report.rows.iter().map(|r| r.revenue_share).sum();
        assert!((share_total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_unmapped_and_missing_channels_label_as_unknown() {
        let conversions = vec![conversion(1, 80.0, &[Some(99), None])];
        let report = breakdown(
            &conversions,
            &demo_channels(),
            AttributionModel::Linear,
            BreakdownDimension::Channel,
        );
        let labels: Vec<_> = report.rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["Unknown", "Unknown"]);
        // Keys stay distinct even when labels collide.
        let keys: Vec<_> = report.rows.iter().map(|r| r.key.as_str()).collect();
        assert!(keys.contains(&"99") && keys.contains(&"unknown"));
    }

    #[test]
    fn test_device_breakdown_uses_device_labels() {
        let conversions = vec![Conversion {
            id: 1,
            customer_id: "cust-1".to_string(),
            revenue: 60.0,
            timestamp: Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
            touchpoints: vec![
                touchpoint(Some(1), DeviceType::Mobile, 0),
                touchpoint(Some(1), DeviceType::Desktop, 1),
            ],
        }];
        let report = breakdown(
            &conversions,
            &demo_channels(),
            AttributionModel::LastTouch,
            BreakdownDimension::Device,
        );
        assert_eq!(report.rows[0].label, "desktop");
        assert!((report.rows[0].revenue - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_set_produces_empty_report_with_zero_total() {
        let report = breakdown(
            &[],
            &demo_channels(),
            AttributionModel::TimeDecay,
            BreakdownDimension::Channel,
        );
        assert!(report.rows.is_empty());
        assert_eq!(report.total_revenue, 0.0);
    }

    #[test]
    fn test_dimension_parses_strictly() {
        assert_eq!(
            "channel".parse::<BreakdownDimension>().unwrap(),
            BreakdownDimension::Channel
        );
        assert!(matches!(
            "customer".parse::<BreakdownDimension>().unwrap_err(),
            PulseError::Validation(_)
        ));
    }
}
