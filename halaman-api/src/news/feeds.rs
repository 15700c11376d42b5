//! Configured forestry/plant news feeds.

/// One RSS feed to aggregate.
#[derive(Debug, Clone)]
pub struct FeedSpec {
    pub name: String,
    pub url: String,
}

impl FeedSpec {
    pub fn new(name: &str, url: &str) -> Self {
        Self {
            name: name.to_string(),
            url: url.to_string(),
        }
    }
}

/// The default feed set: forestry and conservation outlets that publish
/// plant-relevant stories.
pub fn default_feeds() -> Vec<FeedSpec> {
    vec![
        FeedSpec::new("CIFOR Forests News", "https://forestsnews.cifor.org/feed/"),
        FeedSpec::new("Rainforest Action Network", "https://www.ran.org/feed/"),
        FeedSpec::new("Forest Trends", "https://www.forest-trends.org/blog/feed/"),
        FeedSpec::new("Sustainable Forestry Initiative", "https://forests.org/feed/"),
        FeedSpec::new("Global Forest Watch", "https://blog.globalforestwatch.org/feed"),
        FeedSpec::new(
            "Greenpeace Forests",
            "https://www.greenpeace.org.uk/topics/forests/feed/",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn six_feeds_configured() {
        let feeds = default_feeds();
        assert_eq!(feeds.len(), 6);
        assert!(feeds.iter().all(|f| f.url.starts_with("https://")));
    }
}
