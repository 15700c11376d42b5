//! Trefle API client
//!
//! The default plant provider. Trefle authenticates with a bearer token
//! passed as a `token` query parameter on every request.

use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::debug;
use url::Url;

use super::{get_json, http_client, ProviderError};

const TREFLE_BASE_URL: &str = "https://trefle.io/api/v1";
const PROVIDER: &str = "trefle";

/// TDWG level-3 zone code for the Philippines.
pub const PHILIPPINES_ZONE: &str = "PHI";

/// Paged list envelope shared by the Trefle list/search endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct TrefleListResponse {
    #[serde(default)]
    pub data: Vec<TreflePlant>,
    #[serde(default)]
    pub meta: Option<TrefleMeta>,
    #[serde(default)]
    pub links: Option<serde_json::Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrefleMeta {
    pub total: Option<u64>,
}

/// List-level plant record.
#[derive(Debug, Clone, Deserialize)]
pub struct TreflePlant {
    pub id: i64,
    pub slug: Option<String>,
    pub common_name: Option<String>,
    pub scientific_name: String,
    pub family: Option<String>,
    pub family_common_name: Option<String>,
    pub image_url: Option<String>,
}

/// Detail envelope for `/species/{id}` and `/plants/{id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct TrefleDetailResponse {
    pub data: TrefleSpecies,
    #[serde(default)]
    pub meta: Option<serde_json::Value>,
}

/// Full species record. Trefle is the richest provider; most of the
/// unified detail shape maps one-to-one from here.
#[derive(Debug, Clone, Deserialize)]
pub struct TrefleSpecies {
    pub id: i64,
    pub slug: Option<String>,
    pub common_name: Option<String>,
    pub scientific_name: String,
    pub family: Option<String>,
    pub family_common_name: Option<String>,
    pub genus: Option<String>,
    pub image_url: Option<String>,
    pub year: Option<i32>,
    pub author: Option<String>,
    pub bibliography: Option<String>,
    pub observations: Option<String>,
    pub vegetable: Option<bool>,
    pub edible: Option<bool>,
    pub edible_part: Option<Vec<String>>,
    pub duration: Option<Vec<String>>,
    pub status: Option<String>,
    pub rank: Option<String>,
    #[serde(default)]
    pub images: BTreeMap<String, Vec<TrefleImage>>,
    #[serde(default)]
    pub flower: Option<TrefleFlower>,
    #[serde(default)]
    pub foliage: Option<TrefleFoliage>,
    #[serde(default)]
    pub fruit_or_seed: Option<TrefleFruit>,
    #[serde(default)]
    pub specifications: Option<TrefleSpecifications>,
    #[serde(default)]
    pub growth: Option<TrefleGrowth>,
    #[serde(default)]
    pub distribution: Option<TrefleDistribution>,
    #[serde(default)]
    pub common_names: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub synonyms: Vec<TrefleSynonym>,
    #[serde(default)]
    pub sources: Vec<TrefleSource>,
}

/// Synonyms appear as bare strings on some records and `{name}` objects
/// on others.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum TrefleSynonym {
    Name(String),
    Record { name: String },
}

impl TrefleSynonym {
    pub fn name(&self) -> &str {
        match self {
            TrefleSynonym::Name(name) => name,
            TrefleSynonym::Record { name } => name,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrefleImage {
    pub image_url: Option<String>,
    pub copyright: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrefleFlower {
    pub color: Option<Vec<String>>,
    pub conspicuous: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrefleFoliage {
    pub texture: Option<String>,
    pub color: Option<Vec<String>>,
    pub leaf_retention: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrefleFruit {
    pub color: Option<Vec<String>>,
    pub conspicuous: Option<bool>,
    pub seed_persistence: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrefleSpecifications {
    pub ligneous_type: Option<String>,
    pub growth_form: Option<String>,
    pub growth_habit: Option<String>,
    pub growth_rate: Option<String>,
    pub average_height: Option<TrefleMeasurement>,
    pub maximum_height: Option<TrefleMeasurement>,
    pub toxicity: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrefleMeasurement {
    pub cm: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrefleTemperature {
    pub deg_c: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrefleGrowth {
    pub light: Option<u8>,
    pub atmospheric_humidity: Option<u8>,
    pub soil_nutriments: Option<u8>,
    pub soil_salinity: Option<u8>,
    pub soil_texture: Option<u8>,
    pub soil_humidity: Option<u8>,
    pub ph_minimum: Option<f64>,
    pub ph_maximum: Option<f64>,
    pub minimum_temperature: Option<TrefleTemperature>,
    pub maximum_temperature: Option<TrefleTemperature>,
    pub minimum_precipitation: Option<TrefleMeasurement>,
    pub maximum_precipitation: Option<TrefleMeasurement>,
    pub bloom_months: Option<Vec<String>>,
    pub growth_months: Option<Vec<String>>,
    pub fruit_months: Option<Vec<String>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrefleDistribution {
    #[serde(default)]
    pub native: Vec<String>,
    #[serde(default)]
    pub introduced: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrefleSource {
    pub name: String,
    pub url: Option<String>,
    pub citation: Option<String>,
    pub last_update: Option<String>,
}

/// Trefle API client
pub struct TrefleClient {
    http: reqwest::Client,
    token: Option<String>,
}

impl TrefleClient {
    pub fn new(token: Option<String>) -> Result<Self, ProviderError> {
        Ok(Self {
            http: http_client(PROVIDER)?,
            token,
        })
    }

    fn url(&self, path: &str) -> Result<Url, ProviderError> {
        let token = self
            .token
            .as_deref()
            .ok_or(ProviderError::MissingCredential { provider: PROVIDER })?;

        let mut url = Url::parse(&format!("{TREFLE_BASE_URL}{path}")).map_err(|e| {
            ProviderError::Decode {
                provider: PROVIDER,
                message: e.to_string(),
            }
        })?;
        url.query_pairs_mut().append_pair("token", token);
        Ok(url)
    }

    /// List species, optionally filtered by family name and/or edibility.
    pub async fn list_plants(
        &self,
        page: u32,
        family: Option<&str>,
        edible: bool,
    ) -> Result<TrefleListResponse, ProviderError> {
        let mut url = self.url("/species")?;
        url.query_pairs_mut().append_pair("page", &page.to_string());
        if let Some(family) = family {
            url.query_pairs_mut().append_pair("filter[family_name]", family);
        }
        if edible {
            url.query_pairs_mut().append_pair("filter[edible]", "true");
        }

        debug!(page, "listing Trefle species");
        get_json(&self.http, PROVIDER, url).await
    }

    /// Free-text species search.
    pub async fn search_plants(
        &self,
        query: &str,
        page: u32,
    ) -> Result<TrefleListResponse, ProviderError> {
        let mut url = self.url("/species/search")?;
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("page", &page.to_string());

        debug!(query, page, "searching Trefle species");
        get_json(&self.http, PROVIDER, url).await
    }

    /// Plants recorded for the Philippines distribution zone.
    pub async fn list_philippine_plants(
        &self,
        page: u32,
    ) -> Result<TrefleListResponse, ProviderError> {
        let mut url = self.url(&format!("/distributions/{PHILIPPINES_ZONE}/plants"))?;
        url.query_pairs_mut().append_pair("page", &page.to_string());

        debug!(page, "listing Trefle plants for zone {}", PHILIPPINES_ZONE);
        get_json(&self.http, PROVIDER, url).await
    }

    pub async fn get_species(
        &self,
        id_or_slug: &str,
    ) -> Result<TrefleDetailResponse, ProviderError> {
        let url = self.url(&format!("/species/{id_or_slug}"))?;
        get_json(&self.http, PROVIDER, url).await
    }

    pub async fn get_plant(
        &self,
        id_or_slug: &str,
    ) -> Result<TrefleDetailResponse, ProviderError> {
        let url = self.url(&format!("/plants/{id_or_slug}"))?;
        get_json(&self.http, PROVIDER, url).await
    }

    /// Detail lookup: species record first, plant record when the id only
    /// exists on the plants endpoint.
    pub async fn get_detail(
        &self,
        id_or_slug: &str,
    ) -> Result<TrefleDetailResponse, ProviderError> {
        match self.get_species(id_or_slug).await {
            Ok(detail) => Ok(detail),
            Err(first_err) => {
                debug!(
                    id = id_or_slug,
                    "Trefle species lookup failed ({}), trying plants endpoint", first_err
                );
                self.get_plant(id_or_slug).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_token_is_reported() {
        let client = TrefleClient::new(None).unwrap();
        let err = client.url("/species").unwrap_err();
        assert!(matches!(err, ProviderError::MissingCredential { .. }));
    }

    #[test]
    fn url_carries_token() {
        let client = TrefleClient::new(Some("sekret".into())).unwrap();
        let url = client.url("/species").unwrap();
        assert_eq!(url.query(), Some("token=sekret"));
    }

    #[test]
    fn synonym_decodes_both_shapes() {
        let synonyms: Vec<TrefleSynonym> =
            serde_json::from_str(r#"["Musa nana", {"name": "Musa cavendishii"}]"#).unwrap();
        assert_eq!(synonyms[0].name(), "Musa nana");
        assert_eq!(synonyms[1].name(), "Musa cavendishii");
    }

    #[test]
    fn list_response_tolerates_missing_fields() {
        let response: TrefleListResponse = serde_json::from_str(
            r#"{"data": [{"id": 1, "scientific_name": "Cocos nucifera"}]}"#,
        )
        .unwrap();
        assert_eq!(response.data.len(), 1);
        assert!(response.data[0].common_name.is_none());
        assert!(response.meta.is_none());
    }
}
