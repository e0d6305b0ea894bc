//! OpenAPI specification and Swagger UI configuration.

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Pulseboard API",
        version = "0.1.0",
        description = "Marketing analytics dashboard backend.\n\nMulti-touch attribution, cross-device journey analytics, and campaign/channel performance reporting over an in-memory demo dataset.",
        license(name = "MIT"),
    ),
    tags(
        (name = "Attribution", description = "Multi-touch attribution reports and per-conversion credit"),
        (name = "Cross-device", description = "Device journey reconstruction and transition analytics"),
        (name = "Dashboard", description = "Headline totals and time-series reporting"),
        (name = "Channels", description = "Marketing channel CRUD"),
        (name = "Campaigns", description = "Campaign CRUD and filtering"),
        (name = "Conversions", description = "Conversion and touchpoint CRUD"),
        (name = "Operations", description = "Health, readiness, and liveness probes"),
    ),
    paths(
        // Attribution
        crate::attribution_rest::attribution_breakdown,
        crate::attribution_rest::conversion_attribution,
        // Cross-device
        crate::cross_device_rest::cross_device_summary,
        crate::cross_device_rest::cross_device_journeys,
        crate::cross_device_rest::cross_device_transitions,
        // Dashboard
        crate::dashboard_rest::dashboard_overview,
        // Channels
        crate::channel_rest::list_channels,
        crate::channel_rest::get_channel,
        crate::channel_rest::create_channel,
        crate::channel_rest::update_channel,
        crate::channel_rest::delete_channel,
        // Campaigns
        crate::campaign_rest::list_campaigns,
        crate::campaign_rest::get_campaign,
        crate::campaign_rest::create_campaign,
        crate::campaign_rest::update_campaign,
        crate::campaign_rest::delete_campaign,
        // Conversions
        crate::conversion_rest::list_conversions,
        crate::conversion_rest::get_conversion,
        crate::conversion_rest::create_conversion,
        crate::conversion_rest::update_conversion,
        crate::conversion_rest::delete_conversion,
        // Operations
        crate::rest::health_check,
        crate::rest::readiness,
        crate::rest::liveness,
    ),
    components(schemas(
        // Domain types
        pulse_core::types::AttributionModel,
        pulse_core::types::DeviceType,
        pulse_core::types::Touchpoint,
        pulse_core::types::Conversion,
        pulse_core::types::Channel,
        pulse_core::types::CampaignStatus,
        pulse_core::types::Campaign,
        // Request bodies
        pulse_data::requests::CreateChannelRequest,
        pulse_data::requests::UpdateChannelRequest,
        pulse_data::requests::CreateCampaignRequest,
        pulse_data::requests::UpdateCampaignRequest,
        pulse_data::requests::CreateConversionRequest,
        pulse_data::requests::UpdateConversionRequest,
        // Attribution reports
        pulse_attribution::AttributionRow,
        pulse_reporting::attribution_report::BreakdownDimension,
        pulse_reporting::attribution_report::BreakdownRow,
        pulse_reporting::AttributionBreakdown,
        crate::attribution_rest::ConversionAttribution,
        // Cross-device
        pulse_attribution::DeviceSummary,
        pulse_attribution::CrossDeviceJourney,
        pulse_attribution::CrossDeviceSummary,
        crate::cross_device_rest::TransitionFlowResponse,
        // Dashboard
        pulse_reporting::dashboard::ChannelPerformanceRow,
        pulse_reporting::TimeSeriesPoint,
        pulse_reporting::DashboardOverview,
        // REST error/health types
        crate::rest::ErrorResponse,
        crate::rest::HealthResponse,
    ))
)]
pub struct ApiDoc;
