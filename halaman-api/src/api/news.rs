//! News endpoint. Never fails: the aggregator's final stage is a static
//! article set.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use halaman_common::news::{NewsArticle, NewsOrigin};

use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct NewsQuery {
    pub page: Option<u64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsResponse {
    pub articles: Vec<NewsArticle>,
    pub total_articles: u64,
    pub source: NewsOrigin,
}

/// GET /api/news
pub async fn news(
    State(state): State<AppState>,
    Query(query): Query<NewsQuery>,
) -> Json<NewsResponse> {
    let page = state.news.fetch_page(query.page.unwrap_or(1)).await;

    Json(NewsResponse {
        articles: page.articles,
        total_articles: page.total,
        source: page.origin,
    })
}

/// Build news routes
pub fn news_routes() -> Router<AppState> {
    Router::new().route("/api/news", get(news))
}
