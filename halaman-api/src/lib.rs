//! halaman-api library interface
//!
//! Exposes the router and application state for integration testing.

pub mod api;
pub mod error;
pub mod news;
pub mod normalize;
pub mod providers;
pub mod util;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::news::NewsAggregator;
use crate::providers::Providers;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Upstream provider clients
    pub providers: Arc<Providers>,
    /// News aggregation chain
    pub news: Arc<NewsAggregator>,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(providers: Providers, news: NewsAggregator) -> Self {
        Self {
            providers: Arc::new(providers),
            news: Arc::new(news),
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(api::plants::plant_routes())
        .merge(api::plant_detail::plant_detail_routes())
        .merge(api::news::news_routes())
        .merge(api::philippines::philippine_routes())
        .merge(api::care::care_routes())
        .merge(api::health::health_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        // Enable CORS for local access
        .layer(CorsLayer::permissive())
}
