//! RSS feed fetching and item mapping.
//!
//! Fetching uses a conforming feed parser; the semantic field extraction
//! (title/description/image priority/date) is a separate mapping step so
//! it can be tested against fixture feeds without any network.

use chrono::{DateTime, Utc};
use rss::{Channel, Item};
use std::time::Duration;
use tracing::debug;

use halaman_common::news::{NewsArticle, NewsSource};

use crate::providers::ProviderError;

use super::feeds::FeedSpec;
use super::text::{strip_html, truncate_chars};

const PROVIDER: &str = "rss";

/// Per-feed request timeout. Feeds are fetched in parallel and a slow
/// outlet must not stall the whole batch.
pub const FEED_TIMEOUT: Duration = Duration::from_secs(8);

/// RSS descriptions are capped at this many characters.
pub const DESCRIPTION_LIMIT: usize = 300;

/// Fetch one feed and map its items. Any failure is the caller's to
/// tolerate; this function never partially succeeds.
pub async fn fetch_feed(
    http: &reqwest::Client,
    feed: &FeedSpec,
) -> Result<Vec<NewsArticle>, ProviderError> {
    let response = http
        .get(&feed.url)
        .timeout(FEED_TIMEOUT)
        .send()
        .await
        .map_err(|e| ProviderError::Network {
            provider: PROVIDER,
            message: format!("{}: {}", feed.name, e),
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(ProviderError::Status {
            provider: PROVIDER,
            status: status.as_u16(),
        });
    }

    let body = response.bytes().await.map_err(|e| ProviderError::Network {
        provider: PROVIDER,
        message: format!("{}: {}", feed.name, e),
    })?;

    let channel = Channel::read_from(&body[..]).map_err(|e| ProviderError::Decode {
        provider: PROVIDER,
        message: format!("{}: {}", feed.name, e),
    })?;

    let fetched_at = Utc::now();
    let articles: Vec<NewsArticle> = channel
        .items()
        .iter()
        .filter_map(|item| article_from_item(item, &feed.name, fetched_at))
        .collect();

    debug!(feed = %feed.name, count = articles.len(), "parsed feed");
    Ok(articles)
}

/// Map one feed item to an article. Items without a title are dropped.
pub fn article_from_item(
    item: &Item,
    source_name: &str,
    fetched_at: DateTime<Utc>,
) -> Option<NewsArticle> {
    let title = strip_html(item.title()?);
    if title.is_empty() {
        return None;
    }

    let description = item
        .description()
        .map(|d| truncate_chars(&strip_html(d), DESCRIPTION_LIMIT))
        .unwrap_or_default();

    let link = item.link().unwrap_or_default().to_string();

    Some(NewsArticle {
        title,
        description,
        url: link.clone(),
        image: resolve_image(item),
        published_at: item
            .pub_date()
            .and_then(parse_pub_date)
            .unwrap_or(fetched_at),
        source: NewsSource {
            name: source_name.to_string(),
            url: link,
        },
    })
}

/// Image resolution priority chain, first match wins:
/// `media:content` → `enclosure` with an image type → `media:thumbnail`
/// → first `<img src>` inside the content body.
pub fn resolve_image(item: &Item) -> Option<String> {
    if let Some(url) = media_extension_url(item, "content") {
        return Some(url);
    }

    if let Some(enclosure) = item.enclosure() {
        if enclosure.mime_type().starts_with("image") && !enclosure.url().is_empty() {
            return Some(enclosure.url().to_string());
        }
    }

    if let Some(url) = media_extension_url(item, "thumbnail") {
        return Some(url);
    }

    let html = item.content().or_else(|| item.description())?;
    first_img_src(html)
}

/// `url` attribute of the first `media:<element>` extension on the item.
fn media_extension_url(item: &Item, element: &str) -> Option<String> {
    item.extensions()
        .get("media")?
        .get(element)?
        .iter()
        .find_map(|ext| ext.attrs().get("url").cloned())
}

/// First `<img src>` in an HTML fragment.
fn first_img_src(html: &str) -> Option<String> {
    let pattern = regex::Regex::new(r#"<img[^>]*src="([^"]+)""#).ok()?;
    pattern
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Feed dates are RFC 2822 in the wild, with the occasional RFC 3339.
fn parse_pub_date(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.with_timezone(&Utc))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn channel_with_items(items_xml: &str) -> Channel {
        let xml = format!(
            r#"<?xml version="1.0"?>
            <rss version="2.0" xmlns:media="http://search.yahoo.com/mrss/"
                 xmlns:content="http://purl.org/rss/1.0/modules/content/">
              <channel>
                <title>Fixture Feed</title>
                <link>https://feed.example</link>
                <description>fixture</description>
                {items_xml}
              </channel>
            </rss>"#
        );
        Channel::read_from(xml.as_bytes()).unwrap()
    }

    fn single_article(items_xml: &str) -> NewsArticle {
        let channel = channel_with_items(items_xml);
        article_from_item(&channel.items()[0], "Fixture Feed", Utc::now()).unwrap()
    }

    #[test]
    fn maps_basic_item() {
        let article = single_article(
            r#"<item>
                <title><![CDATA[Forest Fires Decline]]></title>
                <link>https://feed.example/fires</link>
                <description>&lt;p&gt;Fires are &amp;amp; down this year.&lt;/p&gt;</description>
                <pubDate>Wed, 14 Jan 2026 08:00:00 GMT</pubDate>
            </item>"#,
        );
        assert_eq!(article.title, "Forest Fires Decline");
        assert_eq!(article.description, "Fires are & down this year.");
        assert_eq!(article.url, "https://feed.example/fires");
        assert_eq!(
            article.published_at,
            DateTime::parse_from_rfc2822("Wed, 14 Jan 2026 08:00:00 GMT").unwrap()
        );
        assert_eq!(article.source.name, "Fixture Feed");
    }

    #[test]
    fn item_without_title_is_dropped() {
        let channel = channel_with_items(
            r#"<item><description>no title here</description></item>"#,
        );
        assert!(article_from_item(&channel.items()[0], "Fixture Feed", Utc::now()).is_none());
    }

    #[test]
    fn missing_pub_date_falls_back_to_fetch_time() {
        let channel = channel_with_items(
            r#"<item><title>Undated</title></item>"#,
        );
        let fetched_at = Utc::now();
        let article = article_from_item(&channel.items()[0], "Fixture Feed", fetched_at).unwrap();
        assert_eq!(article.published_at, fetched_at);

        let channel = channel_with_items(
            r#"<item><title>Bad date</title><pubDate>not a date</pubDate></item>"#,
        );
        let article = article_from_item(&channel.items()[0], "Fixture Feed", fetched_at).unwrap();
        assert_eq!(article.published_at, fetched_at);
    }

    #[test]
    fn description_is_truncated_to_limit() {
        let long = "word ".repeat(200);
        let article = single_article(&format!(
            r#"<item><title>Long</title><description>{long}</description></item>"#
        ));
        assert_eq!(article.description.chars().count(), DESCRIPTION_LIMIT);
    }

    #[test]
    fn media_content_wins_over_everything() {
        let article = single_article(
            r#"<item>
                <title>Imagery</title>
                <media:content url="https://img.example/content.jpg" type="image/jpeg"/>
                <enclosure url="https://img.example/enclosure.jpg" type="image/jpeg" length="1"/>
                <media:thumbnail url="https://img.example/thumb.jpg"/>
            </item>"#,
        );
        assert_eq!(article.image.as_deref(), Some("https://img.example/content.jpg"));
    }

    #[test]
    fn enclosure_beats_thumbnail_when_no_media_content() {
        // Declared chain order: media:content, then enclosure, then
        // media:thumbnail, then inline <img>.
        let article = single_article(
            r#"<item>
                <title>Imagery</title>
                <enclosure url="https://img.example/enclosure.jpg" type="image/jpeg" length="1"/>
                <media:thumbnail url="https://img.example/thumb.jpg"/>
            </item>"#,
        );
        assert_eq!(
            article.image.as_deref(),
            Some("https://img.example/enclosure.jpg")
        );
    }

    #[test]
    fn non_image_enclosure_is_skipped() {
        let article = single_article(
            r#"<item>
                <title>Podcast</title>
                <enclosure url="https://img.example/audio.mp3" type="audio/mpeg" length="1"/>
                <media:thumbnail url="https://img.example/thumb.jpg"/>
            </item>"#,
        );
        assert_eq!(article.image.as_deref(), Some("https://img.example/thumb.jpg"));
    }

    #[test]
    fn inline_img_is_the_last_resort() {
        let article = single_article(
            r#"<item>
                <title>Inline</title>
                <content:encoded><![CDATA[<p>story <img src="https://img.example/inline.jpg" alt=""/></p>]]></content:encoded>
            </item>"#,
        );
        assert_eq!(article.image.as_deref(), Some("https://img.example/inline.jpg"));
    }

    #[test]
    fn no_image_sources_yields_none() {
        let article = single_article(
            r#"<item><title>Plain</title><description>text only</description></item>"#,
        );
        assert_eq!(article.image, None);
    }
}
