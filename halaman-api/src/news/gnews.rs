//! GNews client: the secondary keyword-search news API.

use serde::Deserialize;
use tracing::debug;
use url::Url;

use halaman_common::news::{NewsArticle, NewsSource};

use crate::providers::{get_json, http_client, ProviderError};

const GNEWS_BASE_URL: &str = "https://gnews.io/api/v4/search";
const PROVIDER: &str = "gnews";

/// Fixed keyword query: the endpoint serves plant/forestry news only.
const SEARCH_QUERY: &str = "trees OR reforestation OR plants OR forestry OR botanical";

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GnewsResponse {
    total_articles: Option<u64>,
    #[serde(default)]
    articles: Vec<GnewsArticle>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GnewsArticle {
    title: String,
    description: Option<String>,
    url: String,
    image: Option<String>,
    published_at: Option<chrono::DateTime<chrono::Utc>>,
    source: Option<GnewsSource>,
}

#[derive(Debug, Clone, Deserialize)]
struct GnewsSource {
    name: Option<String>,
    url: Option<String>,
}

/// GNews API client
pub struct GnewsClient {
    http: reqwest::Client,
    api_key: String,
}

impl GnewsClient {
    pub fn new(api_key: String) -> Result<Self, ProviderError> {
        Ok(Self {
            http: http_client(PROVIDER)?,
            api_key,
        })
    }

    /// One page of keyword results, already in article shape.
    pub async fn search(&self, page: u64) -> Result<(Vec<NewsArticle>, u64), ProviderError> {
        let mut url = Url::parse(GNEWS_BASE_URL).map_err(|e| ProviderError::Decode {
            provider: PROVIDER,
            message: e.to_string(),
        })?;
        url.query_pairs_mut()
            .append_pair("apikey", &self.api_key)
            .append_pair("q", SEARCH_QUERY)
            .append_pair("lang", "en")
            .append_pair("max", "10")
            .append_pair("page", &page.to_string());

        debug!(page, "querying GNews");
        let response: GnewsResponse = get_json(&self.http, PROVIDER, url).await?;

        let fetched_at = chrono::Utc::now();
        let articles = response
            .articles
            .into_iter()
            .map(|article| NewsArticle {
                title: article.title,
                description: article.description.unwrap_or_default(),
                url: article.url,
                image: article.image,
                published_at: article.published_at.unwrap_or(fetched_at),
                source: match article.source {
                    Some(source) => NewsSource {
                        name: source.name.unwrap_or_else(|| "GNews".to_string()),
                        url: source.url.unwrap_or_default(),
                    },
                    None => NewsSource {
                        name: "GNews".to_string(),
                        url: String::new(),
                    },
                },
            })
            .collect::<Vec<_>>();

        let total = response.total_articles.unwrap_or(articles.len() as u64);
        Ok((articles, total))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_decodes_camel_case() {
        let response: GnewsResponse = serde_json::from_str(
            r#"{
                "totalArticles": 54,
                "articles": [{
                    "title": "Reforestation milestone",
                    "description": "Ten million seedlings planted.",
                    "url": "https://news.example/a",
                    "image": null,
                    "publishedAt": "2026-01-15T10:00:00Z",
                    "source": {"name": "Example News", "url": "https://news.example"}
                }]
            }"#,
        )
        .unwrap();
        assert_eq!(response.total_articles, Some(54));
        assert_eq!(response.articles[0].title, "Reforestation milestone");
    }
}
