//! Perenual API client
//!
//! API-key-authenticated (`key` query parameter). Covers the species
//! list/detail endpoints plus the pest-disease and care-guide lists.

use serde::Deserialize;
use tracing::debug;
use url::Url;

use super::{get_json, http_client, ProviderError};

const PERENUAL_BASE_URL: &str = "https://perenual.com/api";
const PROVIDER: &str = "perenual";

/// Paged list envelope shared by the Perenual list endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct PerenualPage<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    pub total: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PerenualSpecies {
    pub id: i64,
    pub common_name: Option<String>,
    #[serde(default)]
    pub scientific_name: Vec<String>,
    pub cycle: Option<String>,
    pub default_image: Option<PerenualImage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PerenualImage {
    pub thumbnail: Option<String>,
    pub medium_url: Option<String>,
    pub regular_url: Option<String>,
    pub original_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PerenualSpeciesDetail {
    pub id: i64,
    pub common_name: Option<String>,
    #[serde(default)]
    pub scientific_name: Vec<String>,
    pub family: Option<String>,
    pub genus: Option<String>,
    pub cycle: Option<String>,
    pub default_image: Option<PerenualImage>,
    #[serde(default)]
    pub edible: Option<bool>,
    pub flowers: Option<PerenualFlower>,
    pub leaf: Option<PerenualLeaf>,
    pub fruit: Option<PerenualFruit>,
    pub dimensions: Option<PerenualDimensions>,
    pub growth_rate: Option<String>,
    #[serde(default)]
    pub poisonous_to_humans: i32,
    #[serde(default)]
    pub poisonous_to_pets: i32,
    #[serde(default)]
    pub sunlight: Vec<String>,
    #[serde(default)]
    pub soil: Vec<String>,
    pub watering: Option<String>,
    #[serde(default)]
    pub origin: Option<Vec<String>>,
    pub care_level: Option<String>,
    pub indoor: Option<bool>,
    pub maintenance: Option<String>,
    #[serde(default)]
    pub attracts: Vec<String>,
    pub hardiness: Option<PerenualHardiness>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PerenualFlower {
    pub color: Option<Vec<String>>,
    pub conspicuous: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PerenualLeaf {
    pub color: Option<Vec<String>>,
    pub texture: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PerenualFruit {
    pub edible: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PerenualDimensions {
    pub max_height: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PerenualHardiness {
    pub min: Option<String>,
    pub max: Option<String>,
}

/// Pest/disease list entry.
#[derive(Debug, Clone, Deserialize)]
pub struct PerenualDisease {
    pub id: i64,
    pub common_name: Option<String>,
    pub scientific_name: Option<String>,
    #[serde(default)]
    pub other_name: Option<Vec<String>>,
    pub family: Option<String>,
}

/// Care-guide list entry.
#[derive(Debug, Clone, Deserialize)]
pub struct PerenualCareGuide {
    pub id: i64,
    pub species_id: Option<i64>,
    pub common_name: Option<String>,
    #[serde(default)]
    pub scientific_name: Vec<String>,
    #[serde(default)]
    pub section: Vec<PerenualCareSection>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PerenualCareSection {
    #[serde(rename = "type")]
    pub section_type: Option<String>,
    pub description: Option<String>,
}

/// Perenual API client
pub struct PerenualClient {
    http: reqwest::Client,
    api_key: Option<String>,
}

impl PerenualClient {
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

        let mut url = Url::parse(&format!("{PERENUAL_BASE_URL}{path}")).map_err(|e| {
            ProviderError::Decode {
                provider: PROVIDER,
                message: e.to_string(),
            }
        })?;
        url.query_pairs_mut().append_pair("key", key);
        Ok(url)
    }

    pub async fn list_species(
        &self,
        page: u32,
        query: Option<&str>,
    ) -> Result<PerenualPage<PerenualSpecies>, ProviderError> {
        let mut url = self.url("/v2/species-list")?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("page", &page.to_string());
            if let Some(query) = query {
                pairs.append_pair("q", query);
            }
        }

        debug!(page, "listing Perenual species");
        get_json(&self.http, PROVIDER, url).await
    }

    pub async fn get_species_detail(
        &self,
        id: i64,
    ) -> Result<PerenualSpeciesDetail, ProviderError> {
        let url = self.url(&format!("/v2/species/details/{id}"))?;
        get_json(&self.http, PROVIDER, url).await
    }

    pub async fn list_diseases(
        &self,
        page: u32,
        query: Option<&str>,
    ) -> Result<PerenualPage<PerenualDisease>, ProviderError> {
        let mut url = self.url("/pest-disease-list")?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("page", &page.to_string());
            if let Some(query) = query {
                pairs.append_pair("q", query);
            }
        }

        debug!(page, "listing Perenual diseases");
        get_json(&self.http, PROVIDER, url).await
    }

    pub async fn list_care_guides(
        &self,
        page: u32,
        species_id: Option<i64>,
    ) -> Result<PerenualPage<PerenualCareGuide>, ProviderError> {
        let mut url = self.url("/species-care-guide-list")?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("page", &page.to_string());
            if let Some(species_id) = species_id {
                pairs.append_pair("species_id", &species_id.to_string());
            }
        }

        debug!(page, "listing Perenual care guides");
        get_json(&self.http, PROVIDER, url).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_is_reported() {
        let client = PerenualClient::new(None).unwrap();
        let err = client.url("/v2/species-list").unwrap_err();
        assert!(matches!(err, ProviderError::MissingCredential { .. }));
    }

    #[test]
    fn detail_tolerates_sparse_payload() {
        let detail: PerenualSpeciesDetail = serde_json::from_str(
            r#"{"id": 1, "scientific_name": ["Cocos nucifera"], "common_name": "coconut"}"#,
        )
        .unwrap();
        assert_eq!(detail.id, 1);
        assert_eq!(detail.poisonous_to_humans, 0);
        assert!(detail.sunlight.is_empty());
        assert!(detail.hardiness.is_none());
    }

    #[test]
    fn care_guide_section_type_renames() {
        let guide: PerenualCareGuide = serde_json::from_str(
            r#"{
                "id": 5,
                "species_id": 1,
                "section": [{"type": "watering", "description": "Keep moist."}]
            }"#,
        )
        .unwrap();
        assert_eq!(guide.section[0].section_type.as_deref(), Some("watering"));
    }
}
