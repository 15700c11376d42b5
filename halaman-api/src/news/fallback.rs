//! Static fallback articles, returned when both the feeds and the
//! secondary API are unavailable. This stage cannot fail.

use chrono::{DateTime, Utc};

use halaman_common::news::{NewsArticle, NewsSource};

fn article(
    title: &str,
    description: &str,
    url: &str,
    image: &str,
    published_at: &str,
    source_name: &str,
    source_url: &str,
) -> NewsArticle {
    NewsArticle {
        title: title.to_string(),
        description: description.to_string(),
        url: url.to_string(),
        image: Some(image.to_string()),
        published_at: DateTime::parse_from_rfc3339(published_at)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or(DateTime::<Utc>::MIN_UTC),
        source: NewsSource {
            name: source_name.to_string(),
            url: source_url.to_string(),
        },
    }
}

/// The hand-curated article set.
pub fn fallback_articles() -> Vec<NewsArticle> {
    vec![
        article(
            "World Record: 350 Million Trees Planted in a Single Day in Ethiopia",
            "Ethiopia set a new world record by planting an estimated 350 million tree seedlings in 12 hours as part of a campaign to restore the country's depleted forests.",
            "https://forestsnews.cifor.org/",
            "https://images.unsplash.com/photo-1542601906990-b4d3fb778b09?w=800",
            "2026-01-15T10:00:00Z",
            "CIFOR Forests News",
            "https://forestsnews.cifor.org",
        ),
        article(
            "Ancient Balete Tree Found in Philippines Estimated to be Over 1,500 Years Old",
            "A massive balete tree discovered in the forests of Mindanao is estimated to be over 1,500 years old, making it one of the oldest known trees in Southeast Asia.",
            "https://forestsnews.cifor.org/",
            "https://images.unsplash.com/photo-1441974231531-c6227db76b6e?w=800",
            "2025-12-20T08:30:00Z",
            "Forests News",
            "https://forestsnews.cifor.org",
        ),
        article(
            "Scientists Discover New Species of Orchid in Philippine Cloud Forests",
            "Researchers have identified a new species of orchid in the cloud forests of Mount Pulag, adding to the Philippines' rich biodiversity.",
            "https://www.ran.org/",
            "https://images.unsplash.com/photo-1567306226416-28f0efdc88ce?w=800",
            "2025-11-05T14:15:00Z",
            "Rainforest Action Network",
            "https://www.ran.org",
        ),
        article(
            "Global Reforestation Effort: One Trillion Trees by 2030",
            "The World Economic Forum's 1t.org initiative aims to conserve, restore, and grow one trillion trees by the end of the decade. Over 50 countries have pledged support.",
            "https://forests.org/",
            "https://images.unsplash.com/photo-1448375240586-882707db888b?w=800",
            "2025-10-12T11:00:00Z",
            "Sustainable Forestry Initiative",
            "https://forests.org",
        ),
        article(
            "Mangrove Restoration Projects Protect Philippine Coastlines from Storms",
            "Community-led mangrove planting initiatives across the Philippines have restored thousands of hectares of coastline, providing natural storm barriers against typhoons.",
            "https://blog.globalforestwatch.org/",
            "https://images.unsplash.com/photo-1542601906990-b4d3fb778b09?w=800",
            "2025-09-28T09:45:00Z",
            "Global Forest Watch",
            "https://blog.globalforestwatch.org",
        ),
        article(
            "Bamboo: The Sustainable Building Material of the Future",
            "Architects and engineers are increasingly turning to bamboo as a sustainable, rapidly renewable building material that could revolutionize construction worldwide.",
            "https://www.forest-trends.org/",
            "https://images.unsplash.com/photo-1558618666-fcd25c85f82e?w=800",
            "2025-08-14T16:30:00Z",
            "Forest Trends",
            "https://www.forest-trends.org",
        ),
        article(
            "Deforestation in Southeast Asia Slows Thanks to Community Conservation Programs",
            "A new report shows that deforestation rates in Southeast Asia have decreased by 15% over the past decade, largely attributed to community-based forest management programs.",
            "https://www.greenpeace.org.uk/topics/forests/",
            "https://images.unsplash.com/photo-1518531933037-91b2f5f229cc?w=800",
            "2025-07-20T12:00:00Z",
            "Greenpeace Forests",
            "https://www.greenpeace.org.uk",
        ),
        article(
            "The Role of Mycorrhizal Networks in Forest Health",
            "New research reveals how underground fungal networks connect trees across a forest, allowing them to share nutrients and communicate stress signals.",
            "https://forestsnews.cifor.org/",
            "https://images.unsplash.com/photo-1500382017468-9049fed747ef?w=800",
            "2025-06-10T08:00:00Z",
            "CIFOR Forests News",
            "https://forestsnews.cifor.org",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_set_is_well_formed() {
        let articles = fallback_articles();
        assert_eq!(articles.len(), 8);
        for article in &articles {
            assert!(!article.title.is_empty());
            assert!(article.image.is_some());
            assert!(article.published_at > DateTime::<Utc>::MIN_UTC);
        }
    }
}
