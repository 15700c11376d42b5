//! The news aggregation state machine.
//!
//! Stage 1: fetch every configured feed in parallel with a tolerant join.
//! Stage 2: accept the RSS result only when it produced at least
//! `MIN_RSS_ARTICLES` stories.
//! Stage 3: query the secondary keyword API when a key is configured.
//! Stage 4: the static fallback set, which cannot fail.

use tracing::{debug, warn};

use halaman_common::news::{NewsArticle, NewsOrigin};

use crate::providers::{http_client, ProviderError};
use crate::util::join_successes;

use super::fallback::fallback_articles;
use super::feeds::{default_feeds, FeedSpec};
use super::gnews::GnewsClient;
use super::rss::fetch_feed;

/// Articles per response page.
pub const PER_PAGE: usize = 12;

/// Minimum combined RSS article count to accept stage 1. Below this the
/// aggregator falls through to the secondary API.
pub const MIN_RSS_ARTICLES: usize = 3;

/// One page of aggregated news.
#[derive(Debug, Clone)]
pub struct NewsPage {
    pub articles: Vec<NewsArticle>,
    pub total: u64,
    pub origin: NewsOrigin,
}

/// News aggregator
pub struct NewsAggregator {
    http: reqwest::Client,
    feeds: Vec<FeedSpec>,
    gnews: Option<GnewsClient>,
}

impl NewsAggregator {
    pub fn new(gnews_key: Option<String>) -> Result<Self, ProviderError> {
        let gnews = match gnews_key {
            Some(key) => Some(GnewsClient::new(key)?),
            None => None,
        };
        Ok(Self {
            http: http_client("rss")?,
            feeds: default_feeds(),
            gnews,
        })
    }

    /// Aggregator over a custom feed set; used by tests to simulate feed
    /// outages without touching the real outlets.
    pub fn with_feeds(
        feeds: Vec<FeedSpec>,
        gnews: Option<GnewsClient>,
    ) -> Result<Self, ProviderError> {
        Ok(Self {
            http: http_client("rss")?,
            feeds,
            gnews,
        })
    }

    /// Run the fallback chain and return one page. Infallible: the final
    /// stage always answers.
    pub async fn fetch_page(&self, page: u64) -> NewsPage {
        // Stage 1: parallel feed fan-out; each failure contributes zero
        // articles and never aborts the batch.
        let fetches = self
            .feeds
            .iter()
            .map(|feed| fetch_feed(&self.http, feed))
            .collect();
        let mut articles: Vec<NewsArticle> =
            join_successes(fetches).await.into_iter().flatten().collect();

        // Stage 2: acceptance check.
        if articles.len() >= MIN_RSS_ARTICLES {
            articles = sort_and_dedup(articles);
            let total = articles.len() as u64;
            let page_articles = paginate(&articles, page, PER_PAGE);
            debug!(total, page, "serving RSS news");
            return NewsPage {
                articles: page_articles,
                total,
                origin: NewsOrigin::Rss,
            };
        }

        // Stage 3: secondary keyword API, when configured.
        if let Some(gnews) = &self.gnews {
            match gnews.search(page).await {
                Ok((articles, total)) => {
                    debug!(total, page, "serving GNews results");
                    return NewsPage {
                        articles,
                        total,
                        origin: NewsOrigin::Gnews,
                    };
                }
                Err(err) => warn!("GNews fallback failed: {}", err),
            }
        }

        // Stage 4: static data.
        let articles = fallback_articles();
        let total = articles.len() as u64;
        debug!("serving static fallback news");
        NewsPage {
            articles,
            total,
            origin: NewsOrigin::Fallback,
        }
    }
}

/// Sort newest-first, then drop later duplicates by case-insensitive
/// trimmed title.
pub fn sort_and_dedup(mut articles: Vec<NewsArticle>) -> Vec<NewsArticle> {
    articles.sort_by(|a, b| b.published_at.cmp(&a.published_at));

    let mut seen = std::collections::HashSet::new();
    articles.retain(|article| seen.insert(article.title.trim().to_lowercase()));
    articles
}

/// One page of a sorted article list; pages are 1-based.
pub fn paginate(articles: &[NewsArticle], page: u64, per_page: usize) -> Vec<NewsArticle> {
    let start = ((page.max(1) - 1) as usize).saturating_mul(per_page);
    articles.iter().skip(start).take(per_page).cloned().collect()
}
