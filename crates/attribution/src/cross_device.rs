//! Cross-device journey analytics. Reconstructs the per-conversion device
//! path from its touchpoints and summarizes multi-device behavior across
//! the conversion set.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use pulse_core::types::Conversion;

use crate::engine::device_key;

/// Per-device slice of a journey. Journey devices are ordered by first
/// interaction, so the sequence reads as the customer moved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DeviceSummary {
    pub device: String,
    pub first_seen: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
    pub touchpoints: u64,
}

/// One conversion's path across devices.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CrossDeviceJourney {
    pub conversion_id: u32,
    pub customer_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub revenue: f64,
    pub devices: Vec<DeviceSummary>,
    pub total_touchpoints: u64,
}

impl CrossDeviceJourney {
    /// A journey is cross-device when more than one distinct device label
    /// appears among its touchpoints. `"unknown"` counts as one label.
    pub fn is_cross_device(&self) -> bool {
        self.devices.len() > 1
    }
}

/// Aggregate multi-device figures over a conversion set. Every ratio is 0
/// when its denominator is 0.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CrossDeviceSummary {
    pub total_conversions: u64,
    pub cross_device_conversions: u64,
    pub cross_device_rate: f64,
    pub cross_device_revenue: f64,
    pub cross_device_revenue_share: f64,
    pub avg_devices_per_conversion: f64,
    pub mobile_to_desktop_rate: f64,
}

/// Narrowing criteria for journey listings. `since` is a cutoff on the
/// conversion timestamp; `device` keeps journeys that touched the label.
#[derive(Debug, Clone, Default)]
pub struct JourneyFilter {
    pub device: Option<String>,
    pub since: Option<DateTime<Utc>>,
}

/// Builds the journey for a single conversion. Touchpoints are
/// chronological within a conversion, so first-appearance order is the
/// device order.
pub fn journey(conversion: &Conversion) -> CrossDeviceJourney {
    let mut devices: Vec<DeviceSummary> = Vec::new();
    for touchpoint in &conversion.touchpoints {
        let label = device_key(touchpoint);
        match devices.iter_mut().find(|d| d.device == label) {
            Some(seen) => {
                seen.last_seen = touchpoint.timestamp;
                seen.touchpoints += 1;
            }
            None => devices.push(DeviceSummary {
                device: label,
                first_seen: touchpoint.timestamp,
                last_seen: touchpoint.timestamp,
                touchpoints: 1,
            }),
        }
    }

    let start_time = conversion
        .touchpoints
        .iter()
        .map(|t| t.timestamp)
        .min()
        .unwrap_or(conversion.timestamp);

    CrossDeviceJourney {
        conversion_id: conversion.id,
        customer_id: conversion.customer_id.clone(),
        start_time,
        end_time: conversion.timestamp,
        revenue: conversion.revenue,
        devices,
        total_touchpoints: conversion.touchpoints.len() as u64,
    }
}

/// Journeys for the conversion set matching `filter`, most recent first.
pub fn journeys(conversions: &[Conversion], filter: &JourneyFilter) -> Vec<CrossDeviceJourney> {
    let mut matched: Vec<CrossDeviceJourney> = conversions
        .iter()
        .filter(|c| filter.since.map_or(true, |cutoff| c.timestamp >= cutoff))
        .map(journey)
        .filter(|j| match &filter.device {
            Some(device) => j.devices.iter().any(|d| &d.device == device),
            None => true,
        })
        .collect();
    matched.sort_by(|a, b| b.end_time.cmp(&a.end_time));
    debug!(
        total = conversions.len(),
        matched = matched.len(),
        "built cross-device journeys"
    );
    matched
}

/// Summarizes multi-device behavior across the whole conversion set.
pub fn summarize(conversions: &[Conversion]) -> CrossDeviceSummary {
    let all: Vec<CrossDeviceJourney> = conversions.iter().map(journey).collect();
    let total = all.len() as u64;
    let cross: Vec<&CrossDeviceJourney> =
        all.iter().filter(|j| j.is_cross_device()).collect();

    let total_revenue: f64 = all.iter().map(|j| j.revenue).sum();
    let cross_revenue: f64 = cross.iter().map(|j| j.revenue).sum();
    let device_count: u64 = all.iter().map(|j| j.devices.len() as u64).sum();
    let mobile_to_desktop = all
        .iter()
        .filter(|j| {
            j.devices.iter().any(|d| d.device == "mobile")
                && j.devices.iter().any(|d| d.device == "desktop")
        })
        .count() as u64;

    CrossDeviceSummary {
        total_conversions: total,
        cross_device_conversions: cross.len() as u64,
        cross_device_rate: ratio(cross.len() as f64, total as f64),
        cross_device_revenue: cross_revenue,
        cross_device_revenue_share: ratio(cross_revenue, total_revenue),
        avg_devices_per_conversion: ratio(device_count as f64, total as f64),
        mobile_to_desktop_rate: ratio(mobile_to_desktop as f64, total as f64),
    }
}

/// Counts of consecutive device pairs (`"from->to"`) along each journey's
/// device order.
pub fn transition_flow(conversions: &[Conversion]) -> BTreeMap<String, u64> {
    let mut flows = BTreeMap::new();
    for conversion in conversions {
        let path = journey(conversion);
        for pair in path.devices.windows(2) {
            let key = format!("{}->{}", pair[0].device, pair[1].device);
            *flows.entry(key).or_insert(0) += 1;
        }
    }
    flows
}

fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use pulse_core::types::{DeviceType, Touchpoint};

    fn touchpoint(device: Option<DeviceType>, minute: i64) -> Touchpoint {
        Touchpoint {
            channel_id: Some(1),
            device,
            interaction: "view".to_string(),
            timestamp: Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap()
                + Duration::minutes(minute),
            weight: None,
        }
    }

    fn conversion(id: u32, revenue: f64, devices: &[DeviceType]) -> Conversion {
        let touchpoints = devices
            .iter()
            .enumerate()
            .map(|(i, &d)| touchpoint(Some(d), i as i64))
            .collect();
        Conversion {
            id,
            customer_id: format!("cust-{id}"),
            revenue,
            timestamp: Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap()
                + Duration::minutes(id as i64),
            touchpoints,
        }
    }

    #[test]
    fn test_journey_orders_devices_by_first_interaction() {
        let conv = conversion(
            1,
            120.0,
            &[
                DeviceType::Mobile,
                DeviceType::Desktop,
                DeviceType::Mobile,
                DeviceType::Tablet,
            ],
        );
        let path = journey(&conv);
        let order: Vec<_> = path.devices.iter().map(|d| d.device.as_str()).collect();
        assert_eq!(order, vec!["mobile", "desktop", "tablet"]);
        assert_eq!(path.devices[0].touchpoints, 2);
        assert_eq!(path.total_touchpoints, 4);
        assert!(path.is_cross_device());
    }

    #[test]
    fn test_single_device_journey_is_not_cross_device() {
        let conv = conversion(2, 50.0, &[DeviceType::Desktop, DeviceType::Desktop]);
        assert!(!journey(&conv).is_cross_device());
    }

    #[test]
    fn test_unknown_devices_collapse_to_one_label() {
        let conv = Conversion {
            id: 3,
            customer_id: "cust-3".to_string(),
            revenue: 10.0,
            timestamp: Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap(),
            touchpoints: vec![touchpoint(None, 0), touchpoint(None, 1)],
        };
        let path = journey(&conv);
        assert_eq!(path.devices.len(), 1);
        assert_eq!(path.devices[0].device, "unknown");
        assert!(!path.is_cross_device());
    }

    #[test]
    fn test_empty_path_falls_back_to_conversion_time() {
        let conv = conversion(4, 75.0, &[]);
        let path = journey(&conv);
        assert_eq!(path.start_time, conv.timestamp);
        assert_eq!(path.end_time, conv.timestamp);
        assert!(path.devices.is_empty());
    }

    #[test]
    fn test_summary_rates_over_a_mixed_set() {
        let mut set: Vec<Conversion> = (0..7)
            .map(|i| conversion(i, 100.0, &[DeviceType::Desktop]))
            .collect();
        for i in 7..10 {
            set.push(conversion(
                i,
                200.0,
                &[DeviceType::Mobile, DeviceType::Desktop],
            ));
        }

        let summary = summarize(&set);
        assert_eq!(summary.total_conversions, 10);
        assert_eq!(summary.cross_device_conversions, 3);
        assert!((summary.cross_device_rate - 0.3).abs() < 1e-9);
        assert!((summary.cross_device_revenue - 600.0).abs() < 1e-9);
        assert!((summary.cross_device_revenue_share - 600.0 / 1300.0).abs() < 1e-9);
        assert!((summary.avg_devices_per_conversion - 1.3).abs() < 1e-9);
        assert!((summary.mobile_to_desktop_rate - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_summary_of_nothing_is_all_zeroes() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_conversions, 0);
        assert_eq!(summary.cross_device_rate, 0.0);
        assert_eq!(summary.cross_device_revenue_share, 0.0);
        assert_eq!(summary.avg_devices_per_conversion, 0.0);
        assert_eq!(summary.mobile_to_desktop_rate, 0.0);
    }

    #[test]
    fn test_journeys_sorted_most_recent_first_and_filtered_by_device() {
        let set = vec![
            conversion(1, 10.0, &[DeviceType::Desktop]),
            conversion(2, 20.0, &[DeviceType::Mobile, DeviceType::Desktop]),
            conversion(3, 30.0, &[DeviceType::Tablet]),
        ];

        let all = journeys(&set, &JourneyFilter::default());
        let ids: Vec<_> = all.iter().map(|j| j.conversion_id).collect();
        assert_eq!(ids, vec![3, 2, 1]);

        let mobile_only = journeys(
            &set,
            &JourneyFilter {
                device: Some("mobile".to_string()),
                since: None,
            },
        );
        assert_eq!(mobile_only.len(), 1);
        assert_eq!(mobile_only[0].conversion_id, 2);
    }

    #[test]
    fn test_journeys_respect_the_time_cutoff() {
        let set = vec![
            conversion(1, 10.0, &[DeviceType::Desktop]),
            conversion(2, 20.0, &[DeviceType::Mobile]),
        ];
        // Conversion 2 lands one minute after conversion 1.
        let cutoff = set[1].timestamp;
        let recent = journeys(
            &set,
            &JourneyFilter {
                device: None,
                since: Some(cutoff),
            },
        );
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].conversion_id, 2);
    }

    #[test]
    fn test_transition_flow_counts_consecutive_device_pairs() {
        let set = vec![
            conversion(
                1,
                10.0,
                &[DeviceType::Mobile, DeviceType::Desktop, DeviceType::Tablet],
            ),
            conversion(2, 20.0, &[DeviceType::Mobile, DeviceType::Desktop]),
            conversion(3, 30.0, &[DeviceType::Desktop]),
        ];
        let flows = transition_flow(&set);
        assert_eq!(flows["mobile->desktop"], 2);
        assert_eq!(flows["desktop->tablet"], 1);
        assert_eq!(flows.len(), 2);
    }
}
