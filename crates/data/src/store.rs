//! In-memory dashboard store behind `parking_lot` locks.
//!
//! Production: replace with PostgreSQL (sqlx) or similar ACID store.
//! This provides the same API surface for development and testing.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use tracing::info;

use pulse_core::types::{Campaign, CampaignStatus, Channel, Conversion};
use pulse_core::{PulseError, PulseResult};

use crate::requests::*;

/// Thread-safe in-memory store for channels, campaigns, and conversions.
/// Insertion order is preserved; list endpoints rely on it.
pub struct DashboardStore {
    channels: RwLock<Vec<Channel>>,
    campaigns: RwLock<Vec<Campaign>>,
    conversions: RwLock<Vec<Conversion>>,
}

fn roas(revenue: f64, spend: f64) -> f64 {
    if spend > 0.0 {
        revenue / spend
    } else {
        0.0
    }
}

fn ctr(clicks: u64, impressions: u64) -> f64 {
    if impressions > 0 {
        clicks as f64 / impressions as f64 * 100.0
    } else {
        0.0
    }
}

impl DashboardStore {
    pub fn new() -> Self {
        info!("dashboard store initialized (in-memory, development mode)");
        Self {
            channels: RwLock::new(Vec::new()),
            campaigns: RwLock::new(Vec::new()),
            conversions: RwLock::new(Vec::new()),
        }
    }

    /// Bulk-loads seeded collections, replacing whatever is present.
    pub fn load(&self, channels: Vec<Channel>, campaigns: Vec<Campaign>, conversions: Vec<Conversion>) {
        *self.channels.write() = channels;
        *self.campaigns.write() = campaigns;
        *self.conversions.write() = conversions;
    }

    // ─── Channels ──────────────────────────────────────────────────────────

    pub fn list_channels(&self) -> Vec<Channel> {
        self.channels.read().clone()
    }

    pub fn get_channel(&self, id: u32) -> PulseResult<Channel> {
        self.channels
            .read()
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| PulseError::not_found("channel", id))
    }

    pub fn create_channel(&self, req: CreateChannelRequest) -> Channel {
        let mut channels = self.channels.write();
        let channel = Channel {
            id: channels.iter().map(|c| c.id).max().unwrap_or(0) + 1,
            name: req.name,
            spend: req.spend,
            conversions: req.conversions,
            revenue: req.revenue,
            roas: roas(req.revenue, req.spend),
        };
        channels.push(channel.clone());
        channel
    }

    pub fn update_channel(&self, id: u32, req: UpdateChannelRequest) -> PulseResult<Channel> {
        let mut channels = self.channels.write();
        let channel = channels
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| PulseError::not_found("channel", id))?;
        if let Some(name) = req.name {
            channel.name = name;
        }
        if let Some(spend) = req.spend {
            channel.spend = spend;
        }
        if let Some(conversions) = req.conversions {
            channel.conversions = conversions;
        }
        if let Some(revenue) = req.revenue {
            channel.revenue = revenue;
        }
        channel.roas = roas(channel.revenue, channel.spend);
        Ok(channel.clone())
    }

    pub fn delete_channel(&self, id: u32) -> PulseResult<Channel> {
        let mut channels = self.channels.write();
        let index = channels
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| PulseError::not_found("channel", id))?;
        Ok(channels.remove(index))
    }

    // ─── Campaigns ─────────────────────────────────────────────────────────

    pub fn list_campaigns(&self) -> Vec<Campaign> {
        self.campaigns.read().clone()
    }

    pub fn campaigns_by_channel(&self, channel_id: u32) -> Vec<Campaign> {
        self.campaigns
            .read()
            .iter()
            .filter(|c| c.channel_id == channel_id)
            .cloned()
            .collect()
    }

    pub fn campaigns_by_status(&self, status: CampaignStatus) -> Vec<Campaign> {
        self.campaigns
            .read()
            .iter()
            .filter(|c| c.status == status)
            .cloned()
            .collect()
    }

    pub fn get_campaign(&self, id: u32) -> PulseResult<Campaign> {
        self.campaigns
            .read()
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| PulseError::not_found("campaign", id))
    }

    pub fn create_campaign(&self, req: CreateCampaignRequest) -> Campaign {
        let mut campaigns = self.campaigns.write();
        let campaign = Campaign {
            id: campaigns.iter().map(|c| c.id).max().unwrap_or(0) + 1,
            name: req.name,
            channel_id: req.channel_id,
            status: req.status,
            spend: req.spend,
            revenue: req.revenue,
            impressions: req.impressions,
            clicks: req.clicks,
            ctr: ctr(req.clicks, req.impressions),
            conversions: req.conversions,
            start_date: req.start_date,
            end_date: req.end_date,
        };
        campaigns.push(campaign.clone());
        campaign
    }

    pub fn update_campaign(&self, id: u32, req: UpdateCampaignRequest) -> PulseResult<Campaign> {
        let mut campaigns = self.campaigns.write();
        let campaign = campaigns
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| PulseError::not_found("campaign", id))?;
        if let Some(name) = req.name {
            campaign.name = name;
        }
        if let Some(channel_id) = req.channel_id {
            campaign.channel_id = channel_id;
        }
        if let Some(status) = req.status {
            campaign.status = status;
        }
        if let Some(spend) = req.spend {
            campaign.spend = spend;
        }
        if let Some(revenue) = req.revenue {
            campaign.revenue = revenue;
        }
        if let Some(impressions) = req.impressions {
            campaign.impressions = impressions;
        }
        if let Some(clicks) = req.clicks {
            campaign.clicks = clicks;
        }
        if let Some(conversions) = req.conversions {
            campaign.conversions = conversions;
        }
        if let Some(start) = req.start_date {
            campaign.start_date = Some(start);
        }
        if let Some(end) = req.end_date {
            campaign.end_date = Some(end);
        }
        campaign.ctr = ctr(campaign.clicks, campaign.impressions);
        Ok(campaign.clone())
    }

    pub fn delete_campaign(&self, id: u32) -> PulseResult<Campaign> {
        let mut campaigns = self.campaigns.write();
        let index = campaigns
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| PulseError::not_found("campaign", id))?;
        Ok(campaigns.remove(index))
    }

    // ─── Conversions ───────────────────────────────────────────────────────

    pub fn list_conversions(&self) -> Vec<Conversion> {
        self.conversions.read().clone()
    }

    pub fn conversions_by_customer(&self, customer_id: &str) -> Vec<Conversion> {
        self.conversions
            .read()
            .iter()
            .filter(|c| c.customer_id == customer_id)
            .cloned()
            .collect()
    }

    pub fn conversions_by_date_range(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Vec<Conversion> {
        self.conversions
            .read()
            .iter()
            .filter(|c| c.timestamp >= start && c.timestamp <= end)
            .cloned()
            .collect()
    }

    /// Conversions whose path touched the given channel.
    pub fn conversions_by_channel(&self, channel_id: u32) -> Vec<Conversion> {
        self.conversions
            .read()
            .iter()
            .filter(|c| {
                c.touchpoints
                    .iter()
                    .any(|t| t.channel_id == Some(channel_id))
            })
            .cloned()
            .collect()
    }

    pub fn get_conversion(&self, id: u32) -> PulseResult<Conversion> {
        self.conversions
            .read()
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| PulseError::not_found("conversion", id))
    }

    pub fn create_conversion(&self, req: CreateConversionRequest) -> Conversion {
        let mut conversions = self.conversions.write();
        let conversion = Conversion {
            id: conversions.iter().map(|c| c.id).max().unwrap_or(0) + 1,
            customer_id: req.customer_id,
            revenue: req.revenue,
            timestamp: req.timestamp.unwrap_or_else(Utc::now),
            touchpoints: req.touchpoints,
        };
        conversions.push(conversion.clone());
        conversion
    }

    pub fn update_conversion(&self, id: u32, req: UpdateConversionRequest) -> PulseResult<Conversion> {
        let mut conversions = self.conversions.write();
        let conversion = conversions
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| PulseError::not_found("conversion", id))?;
        if let Some(customer_id) = req.customer_id {
            conversion.customer_id = customer_id;
        }
        if let Some(revenue) = req.revenue {
            conversion.revenue = revenue;
        }
        if let Some(timestamp) = req.timestamp {
            conversion.timestamp = timestamp;
        }
        if let Some(touchpoints) = req.touchpoints {
            conversion.touchpoints = touchpoints;
        }
        Ok(conversion.clone())
    }

    pub fn delete_conversion(&self, id: u32) -> PulseResult<Conversion> {
        let mut conversions = self.conversions.write();
        let index = conversions
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| PulseError::not_found("conversion", id))?;
        Ok(conversions.remove(index))
    }
}

impl Default for DashboardStore {
    fn default() -> Self {
        Self::new()
    }
}
