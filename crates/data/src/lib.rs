//! In-memory data access for the dashboard. One injected store owns the
//! channel, campaign, and conversion collections; no global mutable state.

pub mod requests;
pub mod seed;
pub mod store;

pub use store::DashboardStore;
