//! News article types for the aggregation endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Where an aggregation response came from: live feeds, the secondary
/// search API, or the built-in static set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NewsOrigin {
    Rss,
    Gnews,
    Fallback,
}

/// Publication a story came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsSource {
    pub name: String,
    pub url: String,
}

/// One normalized news story. Synthesized per request, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsArticle {
    pub title: String,
    pub description: String,
    pub url: String,
    pub image: Option<String>,
    pub published_at: DateTime<Utc>,
    pub source: NewsSource,
}
