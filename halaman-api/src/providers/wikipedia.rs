//! Wikipedia client
//!
//! Unauthenticated. Page summaries come from the REST summary endpoint
//! with an Action-API search fallback for names that miss or resolve to a
//! non-standard page. Batch lookups run in fixed-size groups of five to
//! bound the request fan-out.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::debug;
use url::Url;

use halaman_common::plant::{slugify, PlantSource};

use crate::util::join_successes;

use super::{get_json, http_client, ProviderError};

const WIKI_REST_BASE: &str = "https://en.wikipedia.org/api/rest_v1";
const WIKI_ACTION_API: &str = "https://en.wikipedia.org/w/api.php";
const PROVIDER: &str = "wikipedia";

/// Names per summary-fetch group.
const BATCH_SIZE: usize = 5;

/// Extracted page data for one plant.
#[derive(Debug, Clone)]
pub struct WikiPlantData {
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub thumbnail_url: Option<String>,
    pub extract: String,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
struct RestSummary {
    #[serde(rename = "type")]
    page_type: Option<String>,
    title: Option<String>,
    description: Option<String>,
    extract: Option<String>,
    thumbnail: Option<RestImage>,
    originalimage: Option<RestImage>,
    content_urls: Option<RestContentUrls>,
}

#[derive(Debug, Clone, Deserialize)]
struct RestImage {
    source: String,
}

#[derive(Debug, Clone, Deserialize)]
struct RestContentUrls {
    desktop: Option<RestDesktopUrls>,
}

#[derive(Debug, Clone, Deserialize)]
struct RestDesktopUrls {
    page: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct ActionResponse {
    query: Option<ActionQuery>,
}

#[derive(Debug, Clone, Deserialize)]
struct ActionQuery {
    pages: Option<BTreeMap<String, ActionPage>>,
}

#[derive(Debug, Clone, Deserialize)]
struct ActionPage {
    index: Option<i64>,
    title: Option<String>,
    extract: Option<String>,
    fullurl: Option<String>,
    thumbnail: Option<RestImage>,
    original: Option<RestImage>,
    missing: Option<serde_json::Value>,
}

/// One curated featured plant: display name, scientific name, category.
#[derive(Debug, Clone, Copy)]
pub struct FeaturedPlant {
    pub name: &'static str,
    pub scientific: &'static str,
    pub category: &'static str,
}

const fn featured(name: &'static str, scientific: &'static str, category: &'static str) -> FeaturedPlant {
    FeaturedPlant {
        name,
        scientific,
        category,
    }
}

/// Featured Philippine plants served by the curated browse endpoint.
pub const PHILIPPINE_PLANTS: &[FeaturedPlant] = &[
    // Trees
    featured("Narra", "Pterocarpus indicus", "tree"),
    featured("Molave", "Vitex parviflora", "tree"),
    featured("Ipil", "Intsia bijuga", "tree"),
    featured("Tindalo", "Afzelia rhomboidea", "tree"),
    featured("Kalantas", "Toona calantas", "tree"),
    featured("Kamagong", "Diospyros philippinensis", "tree"),
    featured("Philippine Mahogany", "Shorea contorta", "tree"),
    featured("Almaciga", "Agathis philippinensis", "tree"),
    featured("Dao", "Dracontomelon dao", "tree"),
    featured("Yakal", "Shorea astylosa", "tree"),
    // Flowers
    featured("Sampaguita", "Jasminum sambac", "flower"),
    featured("Waling-Waling", "Vanda sanderiana", "flower"),
    featured("Medinilla", "Medinilla magnifica", "flower"),
    featured("Rafflesia", "Rafflesia schadenbergiana", "flower"),
    featured("Jade Vine", "Strongylodon macrobotrys", "flower"),
    featured("Cadena de Amor", "Antigonon leptopus", "flower"),
    featured("Ylang-Ylang", "Cananga odorata", "flower"),
    featured("Champaca", "Magnolia champaca", "flower"),
    // Grasses & palms
    featured("Kawayan", "Bambusa vulgaris", "grass"),
    featured("Giant Bamboo", "Dendrocalamus asper", "grass"),
    featured("Coconut Palm", "Cocos nucifera", "grass"),
    featured("Nipa Palm", "Nypa fruticans", "grass"),
    featured("Anahaw", "Saribus rotundifolius", "grass"),
    featured("Carabao Grass", "Paspalum conjugatum", "grass"),
    // Ferns & mosses
    featured("Giant Tree Fern", "Cyathea contaminans", "fern"),
    featured("Staghorn Fern", "Platycerium grande", "fern"),
    featured("Birds Nest Fern", "Asplenium nidus", "fern"),
    featured("Selaginella", "Selaginella", "moss"),
    featured("Sphagnum", "Sphagnum", "moss"),
    // Medicinal & fruit
    featured("Banaba", "Lagerstroemia speciosa", "tree"),
    featured("Malunggay", "Moringa oleifera", "tree"),
    featured("Lagundi", "Vitex negundo", "tree"),
    featured("Calamansi", "Citrus × microcarpa", "tree"),
    featured("Durian", "Durio zibethinus", "tree"),
    featured("Mangosteen", "Garcinia mangostana", "tree"),
    featured("Rambutan", "Nephelium lappaceum", "tree"),
    featured("Pili Nut", "Canarium ovatum", "tree"),
    // Aquatic
    featured("Mangrove", "Rhizophora mucronata", "tree"),
    featured("Water Lily", "Nymphaea", "flower"),
    featured("Water Hyacinth", "Eichhornia crassipes", "flower"),
];

/// Curated plant enriched with Wikipedia data, as served by the
/// Philippine browse endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PhilippinePlant {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub scientific_name: String,
    pub family: Option<String>,
    pub family_common_name: Option<String>,
    pub category: String,
    pub image_url: Option<String>,
    pub full_image_url: Option<String>,
    pub description: String,
    pub wiki_url: Option<String>,
    pub source: PlantSource,
}

/// Wikipedia API client
pub struct WikipediaClient {
    http: reqwest::Client,
}

impl WikipediaClient {
    pub fn new() -> Result<Self, ProviderError> {
        Ok(Self {
            http: http_client(PROVIDER)?,
        })
    }

    /// Page summary for a scientific or common name; falls back to a
    /// full-text search when the direct lookup misses or resolves to a
    /// non-standard page type.
    pub async fn plant_summary(&self, plant_name: &str) -> Result<WikiPlantData, ProviderError> {
        let title = plant_name.split_whitespace().collect::<Vec<_>>().join("_");
        let url = Url::parse(&format!("{WIKI_REST_BASE}/page/summary/{title}")).map_err(|e| {
            ProviderError::Decode {
                provider: PROVIDER,
                message: e.to_string(),
            }
        })?;

        match get_json::<RestSummary>(&self.http, PROVIDER, url).await {
            Ok(summary)
                if matches!(
                    summary.page_type.as_deref(),
                    Some("standard") | Some("disambiguation")
                ) =>
            {
                let fallback_url = format!("https://en.wikipedia.org/wiki/{title}");
                Ok(WikiPlantData {
                    title: summary.title.unwrap_or_else(|| plant_name.to_string()),
                    description: summary.description.unwrap_or_default(),
                    image_url: summary.originalimage.map(|i| i.source),
                    thumbnail_url: summary.thumbnail.map(|i| i.source),
                    extract: clean_extract(&summary.extract.unwrap_or_default()),
                    url: summary
                        .content_urls
                        .and_then(|u| u.desktop)
                        .and_then(|d| d.page)
                        .unwrap_or(fallback_url),
                })
            }
            Ok(_) | Err(_) => {
                debug!(name = plant_name, "summary lookup missed, searching");
                self.search_plant(plant_name).await
            }
        }
    }

    /// Action-API search fallback: take the best non-missing page.
    async fn search_plant(&self, query: &str) -> Result<WikiPlantData, ProviderError> {
        let mut url = Url::parse(WIKI_ACTION_API).map_err(|e| ProviderError::Decode {
            provider: PROVIDER,
            message: e.to_string(),
        })?;
        url.query_pairs_mut()
            .append_pair("action", "query")
            .append_pair("format", "json")
            .append_pair("generator", "search")
            .append_pair("gsrsearch", query)
            .append_pair("gsrlimit", "3")
            .append_pair("prop", "pageimages|extracts|info")
            .append_pair("piprop", "thumbnail|original")
            .append_pair("pithumbsize", "400")
            .append_pair("exintro", "1")
            .append_pair("explaintext", "1")
            .append_pair("exlimit", "3")
            .append_pair("inprop", "url");

        let response: ActionResponse = get_json(&self.http, PROVIDER, url).await?;
        let pages = response
            .query
            .and_then(|q| q.pages)
            .ok_or_else(|| ProviderError::NotFound {
                provider: PROVIDER,
                entity: query.to_string(),
            })?;

        // First search result is usually the most relevant.
        let mut pages: Vec<ActionPage> = pages.into_values().collect();
        pages.sort_by_key(|p| p.index.unwrap_or(0));

        pages
            .into_iter()
            .find(|page| page.missing.is_none())
            .map(|page| {
                let title = page.title.unwrap_or_else(|| query.to_string());
                let fallback_url = format!(
                    "https://en.wikipedia.org/wiki/{}",
                    title.split_whitespace().collect::<Vec<_>>().join("_")
                );
                WikiPlantData {
                    title,
                    description: String::new(),
                    image_url: page.original.map(|i| i.source),
                    thumbnail_url: page.thumbnail.map(|i| i.source),
                    extract: clean_extract(&page.extract.unwrap_or_default()),
                    url: page.fullurl.unwrap_or(fallback_url),
                }
            })
            .ok_or_else(|| ProviderError::NotFound {
                provider: PROVIDER,
                entity: query.to_string(),
            })
    }

    /// Best-effort batch lookup, `BATCH_SIZE` names at a time. Names
    /// whose lookups fail are simply absent from the result map.
    pub async fn batch_summaries(&self, names: &[String]) -> BTreeMap<String, WikiPlantData> {
        let mut results = BTreeMap::new();

        for chunk in names.chunks(BATCH_SIZE) {
            let lookups = chunk
                .iter()
                .map(|name| async move {
                    self.plant_summary(name)
                        .await
                        .map(|data| (name.clone(), data))
                })
                .collect();
            for (name, data) in join_successes(lookups).await {
                results.insert(name, data);
            }
        }

        results
    }

    /// Curated featured-plant listing, filtered, paged, and enriched
    /// with Wikipedia images and descriptions.
    pub async fn philippine_plants(
        &self,
        page: u64,
        page_size: u64,
        category: Option<&str>,
        query: Option<&str>,
    ) -> (Vec<PhilippinePlant>, u64) {
        let mut filtered: Vec<&FeaturedPlant> = PHILIPPINE_PLANTS.iter().collect();

        if let Some(category) = category {
            filtered.retain(|p| p.category == category);
        }
        if let Some(query) = query {
            let q = query.to_lowercase();
            filtered.retain(|p| {
                p.name.to_lowercase().contains(&q)
                    || p.scientific.to_lowercase().contains(&q)
                    || p.category.to_lowercase().contains(&q)
            });
        }

        let total = filtered.len() as u64;
        let start = ((page.max(1) - 1) * page_size) as usize;
        let paged: Vec<&FeaturedPlant> = filtered
            .into_iter()
            .skip(start)
            .take(page_size as usize)
            .collect();

        let names: Vec<String> = paged.iter().map(|p| p.scientific.to_string()).collect();
        let wiki_data = self.batch_summaries(&names).await;

        let plants = paged
            .into_iter()
            .map(|plant| {
                let wiki = wiki_data.get(plant.scientific);
                let slug = slugify(plant.scientific);
                PhilippinePlant {
                    id: format!("wikipedia-{slug}"),
                    slug,
                    name: plant.name.to_string(),
                    scientific_name: plant.scientific.to_string(),
                    family: None,
                    family_common_name: None,
                    category: plant.category.to_string(),
                    image_url: wiki
                        .and_then(|w| w.thumbnail_url.clone().or_else(|| w.image_url.clone())),
                    full_image_url: wiki.and_then(|w| w.image_url.clone()),
                    description: wiki.map(|w| w.extract.clone()).unwrap_or_default(),
                    wiki_url: wiki.map(|w| w.url.clone()),
                    source: PlantSource::Wikipedia,
                }
            })
            .collect();

        (plants, total)
    }
}

/// Tidy a page extract: collapse whitespace, drop empty parentheses left
/// behind by template stripping, cap the length.
pub fn clean_extract(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let without_empty_parens = collapsed.replace("( )", " ").replace("()", " ");
    let recollapsed = without_empty_parens
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    recollapsed.chars().take(500).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_extract_collapses_and_caps() {
        assert_eq!(
            clean_extract("The  narra\n tree ( ) grows tall."),
            "The narra tree grows tall."
        );

        let long = "x".repeat(600);
        assert_eq!(clean_extract(&long).chars().count(), 500);
    }

    #[test]
    fn curated_list_covers_all_categories() {
        for category in ["tree", "flower", "grass", "fern", "moss"] {
            assert!(
                PHILIPPINE_PLANTS.iter().any(|p| p.category == category),
                "no {category} entries"
            );
        }
    }

    #[test]
    fn action_page_missing_detection() {
        let page: ActionPage =
            serde_json::from_str(r#"{"title": "Gone", "missing": ""}"#).unwrap();
        assert!(page.missing.is_some());

        let page: ActionPage = serde_json::from_str(r#"{"title": "Here"}"#).unwrap();
        assert!(page.missing.is_none());
    }
}
