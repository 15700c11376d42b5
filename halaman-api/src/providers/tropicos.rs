//! Tropicos API client (Missouri Botanical Garden)
//!
//! Requires an API key, passed as an `apikey` query parameter together
//! with `format=json`. Tropicos has no plants-of-country endpoint, so
//! browsing without a query walks a curated list of well-known Philippine
//! species instead.

use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::util::join_successes;

use super::{get_json, http_client, ProviderError};

const TROPICOS_BASE_URL: &str = "https://services.tropicos.org";
const PROVIDER: &str = "tropicos";

/// Name search hit.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TropicosName {
    pub name_id: i64,
    pub scientific_name: String,
    pub scientific_name_with_authors: Option<String>,
    pub family: Option<String>,
    pub rank_abbreviation: Option<String>,
    pub nomenclature_status_name: Option<String>,
    pub author: Option<String>,
    pub display_reference: Option<String>,
    pub display_date: Option<String>,
    pub total_rows: Option<u64>,
}

/// Full name record from `/Name/{id}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TropicosNameDetail {
    pub name_id: i64,
    pub scientific_name: String,
    pub scientific_name_with_authors: Option<String>,
    pub family: Option<String>,
    pub genus: Option<String>,
    pub rank_abbreviation: Option<String>,
    pub nomenclature_status_name: Option<String>,
    pub author: Option<String>,
    pub display_reference: Option<String>,
    pub display_date: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TropicosImage {
    pub image_id: Option<i64>,
    pub name_id: Option<i64>,
    pub caption: Option<String>,
    pub short_description: Option<String>,
    pub image_kind_text: Option<String>,
    pub copyright: Option<String>,
    pub thumbnail_url: Option<String>,
    pub detail_jpg_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TropicosSynonym {
    pub synonym_name: Option<TropicosRelatedName>,
    pub accepted_name: Option<TropicosRelatedName>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TropicosRelatedName {
    pub name_id: i64,
    pub scientific_name: String,
    pub scientific_name_with_authors: Option<String>,
    pub family: Option<String>,
}

/// One browse/search hit with whatever images the name has.
#[derive(Debug, Clone)]
pub struct TropicosPlantHit {
    pub name: TropicosName,
    pub images: Vec<TropicosImage>,
}

/// A page of browse/search results. In curated-browse mode `total` is the
/// curated-list length, not a live upstream count.
#[derive(Debug, Clone)]
pub struct TropicosListing {
    pub plants: Vec<TropicosPlantHit>,
    pub total: u64,
}

/// Well-known Philippine species used for the no-query browse mode:
/// native trees, flowers, palms, ferns, vines, and medicinal plants.
const PH_PLANT_QUERIES: &[&str] = &[
    "Pterocarpus indicus",        // Narra, the national tree
    "Shorea",                     // Lauan
    "Vitex parviflora",           // Molave
    "Intsia bijuga",              // Ipil
    "Afzelia rhomboidea",         // Tindalo
    "Toona calantas",             // Kalantas
    "Diospyros philippinensis",   // Kamagong
    "Agathis philippinensis",     // Almaciga
    "Jasminum sambac",            // Sampaguita, the national flower
    "Vanda sanderiana",           // Waling-waling
    "Medinilla magnifica",
    "Rafflesia",
    "Bambusa",
    "Cocos nucifera",
    "Oryza sativa",
    "Cyathea",
    "Platycerium",
    "Strongylodon macrobotrys",   // Jade vine
    "Lagerstroemia speciosa",     // Banaba
    "Moringa oleifera",           // Malunggay
    "Vitex negundo",              // Lagundi
];

/// Ranks kept from name searches; everything coarser than species is
/// noise for an encyclopedia listing.
const SPECIES_RANKS: &[&str] = &["sp.", "var.", "subsp."];

/// Tropicos API client
pub struct TropicosClient {
    http: reqwest::Client,
    api_key: Option<String>,
}

impl TropicosClient {
    pub fn new(api_key: Option<String>) -> Result<Self, ProviderError> {
        Ok(Self {
            http: http_client(PROVIDER)?,
            api_key,
        })
    }

    fn url(&self, path: &str) -> Result<Url, ProviderError> {
        let key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingCredential { provider: PROVIDER })?;

        let mut url = Url::parse(&format!("{TROPICOS_BASE_URL}{path}")).map_err(|e| {
            ProviderError::Decode {
                provider: PROVIDER,
                message: e.to_string(),
            }
        })?;
        url.query_pairs_mut()
            .append_pair("apikey", key)
            .append_pair("format", "json");
        Ok(url)
    }

    /// Fetch an endpoint that returns either a JSON array or, when there
    /// are no results, an `{"Error": ...}` object. The error object maps
    /// to an empty list.
    async fn get_list<T: serde::de::DeserializeOwned>(
        &self,
        url: Url,
    ) -> Result<Vec<T>, ProviderError> {
        let value: serde_json::Value = get_json(&self.http, PROVIDER, url).await?;
        if !value.is_array() {
            return Ok(Vec::new());
        }
        serde_json::from_value(value).map_err(|e| ProviderError::Decode {
            provider: PROVIDER,
            message: e.to_string(),
        })
    }

    /// Wildcard name search, filtered to species-level ranks.
    pub async fn search_names(
        &self,
        name: &str,
        start_row: Option<u64>,
        page_size: Option<u64>,
    ) -> Result<Vec<TropicosName>, ProviderError> {
        let mut url = self.url("/Name/Search")?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("name", name).append_pair("type", "wildcard");
            if let Some(start_row) = start_row {
                pairs.append_pair("startrow", &start_row.to_string());
            }
            if let Some(page_size) = page_size {
                pairs.append_pair("pagesize", &page_size.to_string());
            }
        }

        debug!(name, "searching Tropicos names");
        let names: Vec<TropicosName> = self.get_list(url).await?;
        Ok(names
            .into_iter()
            .filter(|n| {
                n.rank_abbreviation
                    .as_deref()
                    .map(|rank| SPECIES_RANKS.contains(&rank))
                    .unwrap_or(false)
            })
            .collect())
    }

    pub async fn get_name_detail(
        &self,
        name_id: i64,
    ) -> Result<TropicosNameDetail, ProviderError> {
        let url = self.url(&format!("/Name/{name_id}"))?;
        get_json(&self.http, PROVIDER, url).await
    }

    pub async fn get_name_images(
        &self,
        name_id: i64,
    ) -> Result<Vec<TropicosImage>, ProviderError> {
        let url = self.url(&format!("/Name/{name_id}/Images"))?;
        self.get_list(url).await
    }

    pub async fn get_synonyms(
        &self,
        name_id: i64,
    ) -> Result<Vec<TropicosSynonym>, ProviderError> {
        let url = self.url(&format!("/Name/{name_id}/Synonyms"))?;
        self.get_list(url).await
    }

    pub async fn get_accepted_names(
        &self,
        name_id: i64,
    ) -> Result<Vec<TropicosSynonym>, ProviderError> {
        let url = self.url(&format!("/Name/{name_id}/AcceptedNames"))?;
        self.get_list(url).await
    }

    /// Philippine plant listing.
    ///
    /// With a query: a plain wildcard search page, enriched with images.
    /// Without one: a slice of the curated species list, one search +
    /// image lookup per curated name in a tolerant join — a failing name
    /// drops out instead of failing the page. The reported total in
    /// curated mode is the curated-list length, a known limitation.
    pub async fn browse_philippine_plants(
        &self,
        query: Option<&str>,
        page: u64,
        page_size: u64,
    ) -> Result<TropicosListing, ProviderError> {
        if let Some(query) = query {
            let start_row = (page - 1) * page_size + 1;
            let names = self
                .search_names(query, Some(start_row), Some(page_size))
                .await?;
            let total = names
                .first()
                .and_then(|n| n.total_rows)
                .unwrap_or(names.len() as u64);
            let plants = self.enrich_with_images(names).await;
            return Ok(TropicosListing { plants, total });
        }

        let total = PH_PLANT_QUERIES.len() as u64;
        let start = ((page - 1) * page_size) as usize;
        let end = (start + page_size as usize).min(PH_PLANT_QUERIES.len());
        if start >= PH_PLANT_QUERIES.len() {
            return Ok(TropicosListing {
                plants: Vec::new(),
                total,
            });
        }

        // One top hit per curated name; failures drop the entry.
        let searches = PH_PLANT_QUERIES[start..end]
            .iter()
            .map(|q| self.search_names(q, None, Some(1)))
            .collect();
        let top_hits: Vec<TropicosName> = join_successes(searches)
            .await
            .into_iter()
            .filter_map(|names| names.into_iter().next())
            .collect();

        let plants = self.enrich_with_images(top_hits).await;
        Ok(TropicosListing { plants, total })
    }

    /// Pair each name with its image list; image failures leave an empty
    /// list rather than dropping the plant.
    async fn enrich_with_images(&self, names: Vec<TropicosName>) -> Vec<TropicosPlantHit> {
        let lookups = names
            .iter()
            .map(|name| self.get_name_images(name.name_id))
            .collect::<Vec<_>>();
        let mut image_sets: Vec<Vec<TropicosImage>> =
            futures::future::join_all(lookups)
                .await
                .into_iter()
                .map(|result| result.unwrap_or_default())
                .collect();

        names
            .into_iter()
            .zip(image_sets.drain(..))
            .map(|(name, images)| TropicosPlantHit { name, images })
            .collect()
    }

    /// Number of entries in the curated Philippine browse list.
    pub fn curated_total() -> u64 {
        PH_PLANT_QUERIES.len() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_is_reported() {
        let client = TropicosClient::new(None).unwrap();
        let err = client.url("/Name/Search").unwrap_err();
        assert!(matches!(err, ProviderError::MissingCredential { .. }));
    }

    #[test]
    fn url_carries_key_and_format() {
        let client = TropicosClient::new(Some("k3y".into())).unwrap();
        let url = client.url("/Name/123").unwrap();
        assert_eq!(url.query(), Some("apikey=k3y&format=json"));
    }

    #[test]
    fn name_decodes_pascal_case() {
        let name: TropicosName = serde_json::from_str(
            r#"{
                "NameId": 13029921,
                "ScientificName": "Pterocarpus indicus",
                "ScientificNameWithAuthors": "Pterocarpus indicus Willd.",
                "Family": "Fabaceae",
                "RankAbbreviation": "sp.",
                "TotalRows": 4
            }"#,
        )
        .unwrap();
        assert_eq!(name.name_id, 13029921);
        assert_eq!(name.total_rows, Some(4));
    }

    #[test]
    fn curated_list_is_about_twenty_species() {
        let total = TropicosClient::curated_total();
        assert!((20..=25).contains(&total));
    }
}
