//! API server — HTTP REST endpoints, Swagger UI, and the Prometheus
//! metrics exporter.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use pulse_core::types::AttributionModel;
use pulse_core::AppConfig;
use pulse_data::DashboardStore;

use crate::rest::{self, AppState};
use crate::swagger::ApiDoc;
use crate::{attribution_rest, campaign_rest, channel_rest, conversion_rest};
use crate::{cross_device_rest, dashboard_rest};

/// Main API server managing the REST and metrics endpoints.
pub struct ApiServer {
    config: AppConfig,
    store: Arc<DashboardStore>,
}

impl ApiServer {
    pub fn new(config: AppConfig, store: Arc<DashboardStore>) -> Self {
        Self { config, store }
    }

    /// Start the HTTP REST server.
    pub async fn start_http(&self) -> anyhow::Result<()> {
        let default_model: AttributionModel = self.config.attribution.default_model.parse()?;
        let state = AppState::new(self.store.clone(), default_model);

        let app = Router::new()
            // Channels
            .route(
                "/v1/channels",
                get(channel_rest::list_channels).post(channel_rest::create_channel),
            )
            .route(
                "/v1/channels/:id",
                get(channel_rest::get_channel)
                    .put(channel_rest::update_channel)
                    .delete(channel_rest::delete_channel),
            )
            // Campaigns
            .route(
                "/v1/campaigns",
                get(campaign_rest::list_campaigns).post(campaign_rest::create_campaign),
            )
            .route(
                "/v1/campaigns/:id",
                get(campaign_rest::get_campaign)
                    .put(campaign_rest::update_campaign)
                    .delete(campaign_rest::delete_campaign),
            )
            // Conversions
            .route(
                "/v1/conversions",
                get(conversion_rest::list_conversions).post(conversion_rest::create_conversion),
            )
            .route(
                "/v1/conversions/:id",
                get(conversion_rest::get_conversion)
                    .put(conversion_rest::update_conversion)
                    .delete(conversion_rest::delete_conversion),
            )
            // Attribution
            .route(
                "/v1/attribution/breakdown",
                get(attribution_rest::attribution_breakdown),
            )
            .route(
                "/v1/attribution/conversions/:id",
                get(attribution_rest::conversion_attribution),
            )
            // Cross-device
            .route(
                "/v1/cross-device/summary",
                get(cross_device_rest::cross_device_summary),
            )
            .route(
                "/v1/cross-device/journeys",
                get(cross_device_rest::cross_device_journeys),
            )
            .route(
                "/v1/cross-device/transitions",
                get(cross_device_rest::cross_device_transitions),
            )
            // Dashboard
            .route(
                "/v1/dashboard/overview",
                get(dashboard_rest::dashboard_overview),
            )
            // Operational endpoints
            .route("/health", get(rest::health_check))
            .route("/ready", get(rest::readiness))
            .route("/live", get(rest::liveness))
            // Interactive API docs
            .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
            // Middleware
            .layer(CompressionLayer::new())
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
            .with_state(state);

        let addr = SocketAddr::new(self.config.api.host.parse()?, self.config.api.http_port);

        info!(addr = %addr, "Starting HTTP server");

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }

    /// Start the metrics server on a separate port.
    pub async fn start_metrics(&self) -> anyhow::Result<()> {
        let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
        let handle = builder
            .with_http_listener(SocketAddr::new(
                self.config.api.host.parse()?,
                self.config.metrics.port,
            ))
            .install_recorder()?;

        info!(port = self.config.metrics.port, "Metrics exporter started");

        // Keep the handle alive
        std::mem::forget(handle);
        Ok(())
    }
}
