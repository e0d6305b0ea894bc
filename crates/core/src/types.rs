use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

use crate::error::PulseError;

/// Device category a touchpoint was recorded on.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DeviceType {
    Desktop,
    Mobile,
    Tablet,
    SmartTv,
    Wearable,
}

impl DeviceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeviceType::Desktop => "desktop",
            DeviceType::Mobile => "mobile",
            DeviceType::Tablet => "tablet",
            DeviceType::SmartTv => "smart_tv",
            DeviceType::Wearable => "wearable",
        }
    }
}

/// One recorded marketing interaction on the path to a conversion.
/// Ordering within a conversion is chronological and significant.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Touchpoint {
    /// Referencing channel id; absent on malformed records, which attribute
    /// to the "unknown" key rather than being dropped.
    #[serde(default)]
    pub channel_id: Option<u32>,
    #[serde(default)]
    pub device: Option<DeviceType>,
    pub interaction: String,
    pub timestamp: DateTime<Utc>,
    /// Precomputed display weight carried by the source records. The
    /// attribution engine derives credit from model and position only.
    #[serde(default)]
    pub weight: Option<f64>,
}

/// A completed purchase/signup event with the touchpoint sequence that led
/// to it. Immutable input to the attribution engine.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Conversion {
    pub id: u32,
    pub customer_id: String,
    pub revenue: f64,
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub touchpoints: Vec<Touchpoint>,
}

/// A marketing channel with its lifetime performance totals.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Channel {
    pub id: u32,
    pub name: String,
    pub spend: f64,
    pub conversions: u64,
    pub revenue: f64,
    pub roas: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CampaignStatus {
    Draft,
    Active,
    Paused,
    Completed,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Campaign {
    pub id: u32,
    pub name: String,
    pub channel_id: u32,
    pub status: CampaignStatus,
    pub spend: f64,
    pub revenue: f64,
    pub impressions: u64,
    pub clicks: u64,
    pub ctr: f64,
    pub conversions: u64,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

/// Rule for splitting conversion credit across touchpoints.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, ToSchema)]
#[serde(rename_all = "kebab-case")]
pub enum AttributionModel {
    FirstTouch,
    LastTouch,
    Linear,
    TimeDecay,
}

impl AttributionModel {
    pub const ALL: [AttributionModel; 4] = [
        AttributionModel::FirstTouch,
        AttributionModel::LastTouch,
        AttributionModel::Linear,
        AttributionModel::TimeDecay,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AttributionModel::FirstTouch => "first-touch",
            AttributionModel::LastTouch => "last-touch",
            AttributionModel::Linear => "linear",
            AttributionModel::TimeDecay => "time-decay",
        }
    }
}

impl FromStr for AttributionModel {
    type Err = PulseError;

    /// Strict parse: unknown identifiers fail instead of falling back to a
    /// default model, so a typo can never silently reshape a report.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first-touch" => Ok(AttributionModel::FirstTouch),
            "last-touch" => Ok(AttributionModel::LastTouch),
            "linear" => Ok(AttributionModel::Linear),
            "time-decay" => Ok(AttributionModel::TimeDecay),
            other => Err(PulseError::UnsupportedModel(other.to_string())),
        }
    }
}

impl fmt::Display for AttributionModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
