//! Create/update payloads accepted by the REST API. Update payloads merge
//! field-by-field; absent fields leave the stored value untouched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use pulse_core::types::{CampaignStatus, Touchpoint};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateChannelRequest {
    pub name: String,
    #[serde(default)]
    pub spend: f64,
    #[serde(default)]
    pub conversions: u64,
    #[serde(default)]
    pub revenue: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateChannelRequest {
    pub name: Option<String>,
    pub spend: Option<f64>,
    pub conversions: Option<u64>,
    pub revenue: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateCampaignRequest {
    pub name: String,
    pub channel_id: u32,
    #[serde(default = "default_status")]
    pub status: CampaignStatus,
    #[serde(default)]
    pub spend: f64,
    #[serde(default)]
    pub revenue: f64,
    #[serde(default)]
    pub impressions: u64,
    #[serde(default)]
    pub clicks: u64,
    #[serde(default)]
    pub conversions: u64,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

fn default_status() -> CampaignStatus {
    CampaignStatus::Draft
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateCampaignRequest {
    pub name: Option<String>,
    pub channel_id: Option<u32>,
    pub status: Option<CampaignStatus>,
    pub spend: Option<f64>,
    pub revenue: Option<f64>,
    pub impressions: Option<u64>,
    pub clicks: Option<u64>,
    pub conversions: Option<u64>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateConversionRequest {
    pub customer_id: String,
    pub revenue: f64,
    /// Conversion time; defaults to now when omitted.
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub touchpoints: Vec<Touchpoint>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateConversionRequest {
    pub customer_id: Option<String>,
    pub revenue: Option<f64>,
    pub timestamp: Option<DateTime<Utc>>,
    pub touchpoints: Option<Vec<Touchpoint>>,
}
