//! Curated Philippine plants endpoint: the featured list enriched with
//! Wikipedia summaries and images.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::providers::wikipedia::PhilippinePlant;
use crate::AppState;

use super::non_empty;

const PAGE_SIZE: u64 = 12;

#[derive(Debug, Deserialize)]
pub struct PhilippinesQuery {
    pub page: Option<u64>,
    pub category: Option<String>,
    pub q: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PhilippinesResponse {
    pub plants: Vec<PhilippinePlant>,
    pub meta: PhilippinesMeta,
}

#[derive(Debug, Serialize)]
pub struct PhilippinesMeta {
    pub total: u64,
}

/// GET /api/philippines
pub async fn philippine_plants(
    State(state): State<AppState>,
    Query(query): Query<PhilippinesQuery>,
) -> Json<PhilippinesResponse> {
    let page = query.page.unwrap_or(1).max(1);
    let category = non_empty(query.category);
    let q = non_empty(query.q);

    let (plants, total) = state
        .providers
        .wikipedia
        .philippine_plants(page, PAGE_SIZE, category.as_deref(), q.as_deref())
        .await;

    Json(PhilippinesResponse {
        plants,
        meta: PhilippinesMeta { total },
    })
}

/// Build Philippine browse routes
pub fn philippine_routes() -> Router<AppState> {
    Router::new().route("/api/philippines", get(philippine_plants))
}
