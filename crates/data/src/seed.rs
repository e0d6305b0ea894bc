//! Deterministic demo-data seeder. Everything here is synthetic; a given
//! seed and reference time always produce the same records, so reports and
//! tests are reproducible. This is the only place in the workspace that
//! draws random numbers.

use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use pulse_core::types::{
    Campaign, CampaignStatus, Channel, Conversion, DeviceType, Touchpoint,
};

use crate::store::DashboardStore;

const CHANNEL_NAMES: [&str; 8] = [
    "Google Ads",
    "Facebook Ads",
    "Instagram Ads",
    "LinkedIn Ads",
    "YouTube Ads",
    "Email Marketing",
    "Organic Search",
    "Direct Traffic",
];

const CAMPAIGN_ROSTER: [(&str, u32, CampaignStatus); 10] = [
    ("Brand Search Always-On", 1, CampaignStatus::Active),
    ("Generic Search Expansion", 1, CampaignStatus::Active),
    ("Lookalike Prospecting", 2, CampaignStatus::Active),
    ("Feed Retargeting", 2, CampaignStatus::Paused),
    ("Stories Spring Push", 3, CampaignStatus::Active),
    ("B2B Decision Makers", 4, CampaignStatus::Active),
    ("Product Demo Pre-Roll", 5, CampaignStatus::Completed),
    ("Weekly Newsletter", 6, CampaignStatus::Active),
    ("Winback Drip", 6, CampaignStatus::Paused),
    ("Holiday Teaser", 2, CampaignStatus::Draft),
];

const INTERACTIONS: [&str; 4] = ["impression", "click", "view", "email_open"];

pub struct DemoData {
    pub channels: Vec<Channel>,
    pub campaigns: Vec<Campaign>,
    pub conversions: Vec<Conversion>,
}

/// Demo records anchored at `now`. Fully determined by `(seed,
/// conversion_count, now)`.
pub fn demo_data_at(seed: u64, conversion_count: usize, now: DateTime<Utc>) -> DemoData {
    let mut rng = StdRng::seed_from_u64(seed);

    let channels: Vec<Channel> = CHANNEL_NAMES
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let spend = rng.gen_range(2_000.0..60_000.0_f64).round();
            let revenue = spend * rng.gen_range(0.6..4.5);
            let conversions = rng.gen_range(40..1_200);
            Channel {
                id: i as u32 + 1,
                name: name.to_string(),
                spend,
                conversions,
                revenue: revenue.round(),
                roas: if spend > 0.0 { revenue.round() / spend } else { 0.0 },
            }
        })
        .collect();

    let campaigns: Vec<Campaign> = CAMPAIGN_ROSTER
        .iter()
        .enumerate()
        .map(|(i, &(name, channel_id, status))| {
            let live = status != CampaignStatus::Draft;
            let impressions = if live { rng.gen_range(50_000..2_000_000) } else { 0 };
            let clicks = if live { impressions / rng.gen_range(20..80) } else { 0 };
            let conversions = if live { clicks / rng.gen_range(15..60) } else { 0 };
            let spend = if live { rng.gen_range(1_000.0..25_000.0_f64).round() } else { 0.0 };
            let revenue = if live { spend * rng.gen_range(0.5..4.0) } else { 0.0 };
            Campaign {
                id: i as u32 + 1,
                name: name.to_string(),
                channel_id,
                status,
                spend,
                revenue: revenue.round(),
                impressions,
                clicks,
                ctr: if impressions > 0 {
                    clicks as f64 / impressions as f64 * 100.0
                } else {
                    0.0
                },
                conversions,
                start_date: Some(now - Duration::days(rng.gen_range(30..90))),
                end_date: if status == CampaignStatus::Completed {
                    Some(now - Duration::days(rng.gen_range(1..20)))
                } else {
                    None
                },
            }
        })
        .collect();

    let customer_pool = (conversion_count / 2).max(1);
    let conversions: Vec<Conversion> = (0..conversion_count)
        .map(|i| {
            let converted_at = now
                - Duration::days(rng.gen_range(0..30))
                - Duration::minutes(rng.gen_range(0..24 * 60));
            let path_len = rng.gen_range(1..=5);
            let mut stamps = Vec::with_capacity(path_len);
            let mut minutes_before = rng.gen_range(10..120);
            for _ in 0..path_len {
                stamps.push(converted_at - Duration::minutes(minutes_before));
                minutes_before += rng.gen_range(30..600);
            }
            stamps.reverse();
            let touchpoints = stamps
                .into_iter()
                .map(|timestamp| {
                    // A thin slice of records arrives without channel or
                    // device labels, as the real trackers produce.
                    let channel_id = if rng.gen_bool(0.03) {
                        None
                    } else {
                        Some(rng.gen_range(1..=CHANNEL_NAMES.len() as u32))
                    };
                    let device = if rng.gen_bool(0.02) {
                        None
                    } else {
                        Some(pick_device(&mut rng))
                    };
                    Touchpoint {
                        channel_id,
                        device,
                        interaction: INTERACTIONS[rng.gen_range(0..INTERACTIONS.len())]
                            .to_string(),
                        timestamp,
                        weight: Some(1.0 / path_len as f64),
                    }
                })
                .collect();
            Conversion {
                id: i as u32 + 1,
                customer_id: format!("cust-{:04}", rng.gen_range(0..customer_pool)),
                revenue: rng.gen_range(20.0..600.0_f64).round(),
                timestamp: converted_at,
                touchpoints,
            }
        })
        .collect();

    DemoData {
        channels,
        campaigns,
        conversions,
    }
}

/// Demo records anchored at the current time.
pub fn demo_data(seed: u64, conversion_count: usize) -> DemoData {
    demo_data_at(seed, conversion_count, Utc::now())
}

/// A store loaded with demo records.
pub fn seeded_store(seed: u64, conversion_count: usize) -> DashboardStore {
    let data = demo_data(seed, conversion_count);
    info!(
        seed,
        channels = data.channels.len(),
        campaigns = data.campaigns.len(),
        conversions = data.conversions.len(),
        "seeded demo data"
    );
    let store = DashboardStore::new();
    store.load(data.channels, data.campaigns, data.conversions);
    store
}

fn pick_device(rng: &mut StdRng) -> DeviceType {
    // Device mix roughly matching observed dashboard traffic.
    let roll: f64 = rng.gen();
    if roll < 0.40 {
        DeviceType::Desktop
    } else if roll < 0.78 {
        DeviceType::Mobile
    } else if roll < 0.93 {
        DeviceType::Tablet
    } else if roll < 0.98 {
        DeviceType::SmartTv
    } else {
        DeviceType::Wearable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn anchor() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 4, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_same_seed_produces_identical_data() {
        let a = demo_data_at(7, 50, anchor());
        let b = demo_data_at(7, 50, anchor());
        assert_eq!(
            serde_json::to_string(&a.channels).unwrap(),
            serde_json::to_string(&b.channels).unwrap()
        );
        assert_eq!(
            serde_json::to_string(&a.campaigns).unwrap(),
            serde_json::to_string(&b.campaigns).unwrap()
        );
        assert_eq!(
            serde_json::to_string(&a.conversions).unwrap(),
            serde_json::to_string(&b.conversions).unwrap()
        );
    }

    #[test]
    fn test_different_seeds_diverge() {
        let a = demo_data_at(1, 20, anchor());
        let b = demo_data_at(2, 20, anchor());
        assert_ne!(
            serde_json::to_string(&a.conversions).unwrap(),
            serde_json::to_string(&b.conversions).unwrap()
        );
    }

    #[test]
    fn test_seeded_shapes() {
        let data = demo_data_at(42, 30, anchor());
        assert_eq!(data.channels.len(), 8);
        assert_eq!(data.channels[0].name, "Google Ads");
        assert_eq!(data.campaigns.len(), 10);
        assert_eq!(data.conversions.len(), 30);
        for conversion in &data.conversions {
            assert!(!conversion.touchpoints.is_empty());
            assert!(conversion.touchpoints.len() <= 5);
            // Paths are chronological and end before the conversion.
            for pair in conversion.touchpoints.windows(2) {
                assert!(pair[0].timestamp <= pair[1].timestamp);
            }
            assert!(
                conversion.touchpoints.last().unwrap().timestamp <= conversion.timestamp
            );
        }
    }
}
