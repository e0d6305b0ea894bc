//! Multi-touch attribution — distributes conversion credit across marketing
//! touchpoints, plus cross-device journey analytics built on the same
//! conversion records.

pub mod cross_device;
pub mod engine;

pub use cross_device::{CrossDeviceJourney, CrossDeviceSummary, DeviceSummary, JourneyFilter};
pub use engine::{aggregate, attribute, attribute_by_id, credit_weights, AttributionRow};
