//! Dashboard reporting — marketing math, overview aggregation, and
//! attribution breakdown reports.

pub mod attribution_report;
pub mod dashboard;
pub mod metrics;

pub use attribution_report::{AttributionBreakdown, BreakdownDimension, BreakdownRow};
pub use dashboard::{DashboardOverview, TimeSeriesPoint};
