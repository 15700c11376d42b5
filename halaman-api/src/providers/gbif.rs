//! GBIF (Global Biodiversity Information Facility) API client
//!
//! Unauthenticated. Species search plus the media and vernacular-name
//! sub-resources needed to build a full detail record.

use serde::Deserialize;
use tracing::debug;
use url::Url;

use super::{get_json, http_client, ProviderError};

const GBIF_BASE_URL: &str = "https://api.gbif.org/v1";
const PROVIDER: &str = "gbif";

/// Plantae kingdom key in the GBIF backbone taxonomy.
const PLANTAE_KEY: &str = "6";

/// Paged search envelope.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GbifPage<T> {
    pub count: Option<u64>,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GbifSpecies {
    pub key: i64,
    pub scientific_name: String,
    pub canonical_name: Option<String>,
    pub vernacular_name: Option<String>,
    pub kingdom: Option<String>,
    pub family: Option<String>,
    pub genus: Option<String>,
    pub rank: Option<String>,
    pub taxonomic_status: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GbifMedia {
    #[serde(rename = "type")]
    pub media_type: Option<String>,
    pub identifier: Option<String>,
    pub format: Option<String>,
    pub title: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GbifVernacularName {
    pub vernacular_name: String,
    pub language: Option<String>,
}

/// Species detail plus its media and vernacular-name sub-resources, as
/// fetched by [`GbifClient::philippine_plant_detail`].
#[derive(Debug, Clone)]
pub struct GbifSpeciesBundle {
    pub species: GbifSpecies,
    pub media: Vec<GbifMedia>,
    pub vernacular_names: Vec<GbifVernacularName>,
}

/// GBIF API client
pub struct GbifClient {
    http: reqwest::Client,
}

impl GbifClient {
    pub fn new() -> Result<Self, ProviderError> {
        Ok(Self {
            http: http_client(PROVIDER)?,
        })
    }

    fn url(&self, path: &str) -> Result<Url, ProviderError> {
        Url::parse(&format!("{GBIF_BASE_URL}{path}")).map_err(|e| ProviderError::Decode {
            provider: PROVIDER,
            message: e.to_string(),
        })
    }

    /// Accepted Plantae species scoped to the Philippines.
    ///
    /// GBIF has no direct species-by-country endpoint; the species search
    /// is restricted to the Plantae kingdom and tagged with the country
    /// filter instead.
    pub async fn list_philippine_species(
        &self,
        query: Option<&str>,
        limit: u32,
        offset: u32,
    ) -> Result<GbifPage<GbifSpecies>, ProviderError> {
        let mut url = self.url("/species/search")?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("country", "PH")
                .append_pair("limit", &limit.to_string())
                .append_pair("offset", &offset.to_string())
                .append_pair("status", "ACCEPTED")
                .append_pair("rank", "SPECIES")
                .append_pair("highertaxonKey", PLANTAE_KEY);
            if let Some(query) = query {
                pairs.append_pair("q", query);
            }
        }

        debug!(limit, offset, "listing GBIF Philippine species");
        get_json(&self.http, PROVIDER, url).await
    }

    pub async fn get_species(&self, key: i64) -> Result<GbifSpecies, ProviderError> {
        let url = self.url(&format!("/species/{key}"))?;
        get_json(&self.http, PROVIDER, url).await
    }

    pub async fn get_species_media(
        &self,
        key: i64,
    ) -> Result<GbifPage<GbifMedia>, ProviderError> {
        let url = self.url(&format!("/species/{key}/media"))?;
        get_json(&self.http, PROVIDER, url).await
    }

    pub async fn get_vernacular_names(
        &self,
        key: i64,
    ) -> Result<GbifPage<GbifVernacularName>, ProviderError> {
        let url = self.url(&format!("/species/{key}/vernacularNames"))?;
        get_json(&self.http, PROVIDER, url).await
    }

    /// Composite detail fetch: species record, media, and vernacular
    /// names in parallel. The species record is required; the two
    /// secondary calls degrade to empty lists on failure so a partial
    /// upstream outage still yields a detail page.
    pub async fn philippine_plant_detail(
        &self,
        key: i64,
    ) -> Result<GbifSpeciesBundle, ProviderError> {
        let (species, media, names) = tokio::join!(
            self.get_species(key),
            self.get_species_media(key),
            self.get_vernacular_names(key),
        );

        let species = species?;
        let media = media.map(|page| page.results).unwrap_or_default();
        let vernacular_names = names.map(|page| page.results).unwrap_or_default();

        Ok(GbifSpeciesBundle {
            species,
            media,
            vernacular_names,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn species_decodes_camel_case() {
        let species: GbifSpecies = serde_json::from_str(
            r#"{
                "key": 2978223,
                "scientificName": "Pterocarpus indicus Willd.",
                "canonicalName": "Pterocarpus indicus",
                "family": "Fabaceae",
                "rank": "SPECIES",
                "taxonomicStatus": "ACCEPTED"
            }"#,
        )
        .unwrap();
        assert_eq!(species.key, 2978223);
        assert_eq!(species.canonical_name.as_deref(), Some("Pterocarpus indicus"));
        assert!(species.vernacular_name.is_none());
    }

    #[test]
    fn media_type_field_renames() {
        let media: GbifMedia = serde_json::from_str(
            r#"{"type": "StillImage", "identifier": "https://img.example/1.jpg"}"#,
        )
        .unwrap();
        assert_eq!(media.media_type.as_deref(), Some("StillImage"));
    }

    #[test]
    fn page_defaults_empty_results() {
        let page: GbifPage<GbifSpecies> = serde_json::from_str(r#"{"count": 0}"#).unwrap();
        assert!(page.results.is_empty());
    }
}
