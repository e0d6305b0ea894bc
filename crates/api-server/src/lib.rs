#![warn(clippy::unwrap_used)]

pub mod attribution_rest;
pub mod campaign_rest;
pub mod channel_rest;
pub mod conversion_rest;
pub mod cross_device_rest;
pub mod dashboard_rest;
pub mod rest;
pub mod server;
pub mod swagger;

pub use server::ApiServer;
pub use swagger::ApiDoc;
