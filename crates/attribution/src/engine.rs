//! The attribution engine proper. Pure functions over touchpoint slices;
//! no shared state, safe to call from any number of request handlers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use pulse_core::types::{AttributionModel, Conversion, Touchpoint};
use pulse_core::PulseResult;

/// Per-index credit vector for `n` touchpoints under `model`.
///
/// Credits sum to 1.0 for any `n >= 1`; `n == 0` yields an empty vector.
pub fn credit_weights(model: AttributionModel, n: usize) -> Vec<f64> {
    if n == 0 {
        return Vec::new();
    }
    match model {
        AttributionModel::FirstTouch => {
            let mut weights = vec![0.0; n];
            weights[0] = 1.0;
            weights
        }
        AttributionModel::LastTouch => {
            let mut weights = vec![0.0; n];
            weights[n - 1] = 1.0;
            weights
        }
        AttributionModel::Linear => vec![1.0 / n as f64; n],
        AttributionModel::TimeDecay => {
            // Raw geometric weights 2^(i-n+1), divided by their own sum so
            // the credits total 1.0 for every n, including n == 1.
            let raw: Vec<f64> = (0..n)
                .map(|i| (i as f64 - n as f64 + 1.0).exp2())
                .collect();
            let total: f64 = raw.iter().sum();
            raw.into_iter().map(|w| w / total).collect()
        }
    }
}

/// Grouping key for attribution by referencing channel. Records without a
/// channel reference land under `"unknown"` so their credit is never lost.
pub fn channel_key(touchpoint: &Touchpoint) -> String {
    match touchpoint.channel_id {
        Some(id) => id.to_string(),
        None => "unknown".to_string(),
    }
}

/// Grouping key for attribution by device category.
pub fn device_key(touchpoint: &Touchpoint) -> String {
    match touchpoint.device {
        Some(device) => device.as_str().to_string(),
        None => "unknown".to_string(),
    }
}

/// Credit map for a single conversion path, grouped by the caller's key
/// selector. Empty input yields an empty map.
pub fn attribute<K, F>(
    touchpoints: &[Touchpoint],
    model: AttributionModel,
    mut key_for: F,
) -> BTreeMap<K, f64>
where
    K: Ord,
    F: FnMut(&Touchpoint) -> K,
{
    let weights = credit_weights(model, touchpoints.len());
    let mut credits = BTreeMap::new();
    for (touchpoint, credit) in touchpoints.iter().zip(weights) {
        *credits.entry(key_for(touchpoint)).or_insert(0.0) += credit;
    }
    credits
}

/// Same as [`attribute`], taking the textual model identifier as it arrives
/// over the wire. An unknown identifier fails outright; there is no
/// fallback model and no partial result.
pub fn attribute_by_id<K, F>(
    touchpoints: &[Touchpoint],
    model_id: &str,
    key_for: F,
) -> PulseResult<BTreeMap<K, f64>>
where
    K: Ord,
    F: FnMut(&Touchpoint) -> K,
{
    let model: AttributionModel = model_id.parse()?;
    Ok(attribute(touchpoints, model, key_for))
}

/// One row of an aggregated attribution report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AttributionRow {
    pub key: String,
    /// Fractional conversion credit accumulated under this key.
    pub conversions: f64,
    /// Revenue credit accumulated under this key.
    pub revenue: f64,
}

/// Accumulates credit and revenue-credit per key across a conversion set.
///
/// Rows are sorted by revenue descending, ties broken by key ascending, so
/// the same input always produces the same report.
pub fn aggregate<F>(
    conversions: &[Conversion],
    model: AttributionModel,
    mut key_for: F,
) -> Vec<AttributionRow>
where
    F: FnMut(&Touchpoint) -> String,
{
    let mut totals: BTreeMap<String, (f64, f64)> = BTreeMap::new();
    for conversion in conversions {
        for (key, credit) in attribute(&conversion.touchpoints, model, &mut key_for) {
            let entry = totals.entry(key).or_insert((0.0, 0.0));
            entry.0 += credit;
            entry.1 += credit * conversion.revenue;
        }
    }

    let mut rows: Vec<AttributionRow> = totals
        .into_iter()
        .map(|(key, (conversions, revenue))| AttributionRow {
            key,
            conversions,
            revenue,
        })
        .collect();
    rows.sort_by(|a, b| b.revenue.total_cmp(&a.revenue).then_with(|| a.key.cmp(&b.key)));

    debug!(
        model = %model,
        conversions = conversions.len(),
        keys = rows.len(),
        "aggregated attribution"
    );
    rows
}
