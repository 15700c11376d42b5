//! Unified plant record types shared by every provider adapter.
//!
//! Each upstream source has its own response schema; the adapters in
//! `halaman-api` map everything into `PlantSummary` (list views) and
//! `PlantDetail` (detail views). Fields a source cannot supply are `None`
//! or empty, never omitted, so consumers see one uniform shape.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Closed set of upstream plant-data providers.
///
/// Dispatch on this enum everywhere a source tag appears; an unrecognized
/// tag is a parse error, not a silent default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlantSource {
    Trefle,
    Gbif,
    Tropicos,
    Perenual,
    Wikipedia,
}

impl PlantSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlantSource::Trefle => "trefle",
            PlantSource::Gbif => "gbif",
            PlantSource::Tropicos => "tropicos",
            PlantSource::Perenual => "perenual",
            PlantSource::Wikipedia => "wikipedia",
        }
    }
}

impl fmt::Display for PlantSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlantSource {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "trefle" => Ok(PlantSource::Trefle),
            "gbif" => Ok(PlantSource::Gbif),
            "tropicos" => Ok(PlantSource::Tropicos),
            "perenual" => Ok(PlantSource::Perenual),
            "wikipedia" | "wiki" => Ok(PlantSource::Wikipedia),
            other => Err(crate::Error::InvalidInput(format!(
                "unknown plant source: {other}"
            ))),
        }
    }
}

/// A plant id with its originating provider.
///
/// On the wire, ids from every provider except Trefle carry the provider
/// tag as a prefix before the first `-` (`"gbif-5284884"`). Trefle ids are
/// stored bare (`"123"`, `"banana"`) because Trefle is the default
/// provider. `parse` and `render` preserve that asymmetry in both
/// directions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlantId {
    pub source: PlantSource,
    pub raw: String,
}

impl PlantId {
    pub fn new(source: PlantSource, raw: impl Into<String>) -> Self {
        Self {
            source,
            raw: raw.into(),
        }
    }

    /// Split a wire id into provider and provider-local id.
    ///
    /// A prefix that is not a known source tag is NOT an error: Trefle
    /// slugs legitimately contain dashes (`"musa-acuminata"`), so the
    /// whole string becomes a bare Trefle id.
    pub fn parse(id: &str) -> Self {
        if let Some((prefix, rest)) = id.split_once('-') {
            if !rest.is_empty() {
                if let Ok(source) = prefix.parse::<PlantSource>() {
                    return Self::new(source, rest);
                }
            }
        }
        Self::new(PlantSource::Trefle, id)
    }

    /// Render the wire form: bare for Trefle, `<tag>-<id>` otherwise.
    pub fn render(&self) -> String {
        match self.source {
            PlantSource::Trefle => self.raw.clone(),
            source => format!("{}-{}", source, self.raw),
        }
    }

    /// Provider-local numeric id, for providers with integer keys.
    pub fn numeric(&self) -> Option<i64> {
        self.raw.parse().ok()
    }
}

/// List-view plant record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantSummary {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub scientific_name: String,
    pub family: Option<String>,
    pub family_common_name: Option<String>,
    pub image_url: Option<String>,
    pub source: PlantSource,
}

/// Detail-view plant record: everything a provider can tell us, with
/// `None`/empty for everything it cannot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantDetail {
    pub id: String,
    pub slug: String,
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
    pub vegetable: bool,
    pub edible: bool,
    pub edible_part: Option<Vec<String>>,
    pub duration: Option<Vec<String>>,
    pub status: Option<String>,
    pub rank: Option<String>,
    pub source: PlantSource,
    pub images: PlantImages,
    pub flower: FlowerInfo,
    pub foliage: FoliageInfo,
    pub fruit_or_seed: FruitInfo,
    pub specifications: Specifications,
    pub growth: Growth,
    pub distribution: Distribution,
    pub common_names: BTreeMap<String, Vec<String>>,
    pub synonyms: Vec<String>,
    pub sources: Vec<SourceRef>,
    // Care data only Perenual reports; null for everyone else.
    pub care_level: Option<String>,
    pub indoor: Option<bool>,
    pub maintenance: Option<String>,
    pub attracts: Vec<String>,
    pub hardiness: Option<String>,
}

impl PlantDetail {
    /// A detail record with nothing filled in beyond identity; adapters
    /// start from this and set what their provider knows.
    pub fn empty(id: String, slug: String, scientific_name: String, source: PlantSource) -> Self {
        Self {
            id,
            slug,
            common_name: None,
            scientific_name,
            family: None,
            family_common_name: None,
            genus: None,
            image_url: None,
            year: None,
            author: None,
            bibliography: None,
            observations: None,
            vegetable: false,
            edible: false,
            edible_part: None,
            duration: None,
            status: None,
            rank: None,
            source,
            images: PlantImages::default(),
            flower: FlowerInfo::default(),
            foliage: FoliageInfo::default(),
            fruit_or_seed: FruitInfo::default(),
            specifications: Specifications::default(),
            growth: Growth::default(),
            distribution: Distribution::default(),
            common_names: BTreeMap::new(),
            synonyms: Vec::new(),
            sources: Vec::new(),
            care_level: None,
            indoor: None,
            maintenance: None,
            attracts: Vec::new(),
            hardiness: None,
        }
    }
}

/// Images grouped by what they show.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantImages {
    pub flower: Vec<ImageEntry>,
    pub leaf: Vec<ImageEntry>,
    pub habit: Vec<ImageEntry>,
    pub fruit: Vec<ImageEntry>,
    pub bark: Vec<ImageEntry>,
    pub other: Vec<ImageEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageEntry {
    pub url: String,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub copyright: Option<String>,
}

impl ImageEntry {
    pub fn bare(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            caption: None,
            copyright: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowerInfo {
    pub color: Option<Vec<String>>,
    pub conspicuous: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoliageInfo {
    pub texture: Option<String>,
    pub color: Option<Vec<String>>,
    pub leaf_retention: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FruitInfo {
    pub color: Option<Vec<String>>,
    pub conspicuous: Option<bool>,
    pub seed_persistence: Option<bool>,
    pub edible: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Specifications {
    pub ligneous_type: Option<String>,
    pub growth_form: Option<String>,
    pub growth_habit: Option<String>,
    pub growth_rate: Option<String>,
    pub average_height: Option<Measurement>,
    pub maximum_height: Option<Measurement>,
    pub toxicity: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Measurement {
    pub cm: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Temperature {
    pub deg_c: Option<f64>,
}

/// Growing-condition data. Trefle reports the numeric scales; Perenual
/// reports the descriptive strings; each provider fills what it has.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Growth {
    pub light: Option<u8>,
    pub atmospheric_humidity: Option<u8>,
    pub soil_nutriments: Option<u8>,
    pub soil_salinity: Option<u8>,
    pub soil_texture: Option<u8>,
    pub soil_humidity: Option<u8>,
    pub ph_minimum: Option<f64>,
    pub ph_maximum: Option<f64>,
    pub minimum_temperature: Option<Temperature>,
    pub maximum_temperature: Option<Temperature>,
    pub minimum_precipitation: Option<Measurement>,
    pub maximum_precipitation: Option<Measurement>,
    pub bloom_months: Option<Vec<String>>,
    pub growth_months: Option<Vec<String>>,
    pub fruit_months: Option<Vec<String>>,
    pub sunlight: Option<String>,
    pub soil: Option<String>,
    pub watering: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Distribution {
    pub native: Vec<String>,
    pub introduced: Vec<String>,
}

/// Upstream citation attached to a detail record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceRef {
    pub name: String,
    pub url: Option<String>,
    #[serde(default)]
    pub citation: Option<String>,
    #[serde(default)]
    pub last_update: Option<String>,
}

/// Lowercase-and-dash slug from a scientific name.
pub fn slugify(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_round_trip() {
        for tag in ["trefle", "gbif", "tropicos", "perenual", "wikipedia"] {
            let source: PlantSource = tag.parse().unwrap();
            assert_eq!(source.as_str(), tag);
        }
    }

    #[test]
    fn source_rejects_unknown() {
        assert!("usda".parse::<PlantSource>().is_err());
        assert!("".parse::<PlantSource>().is_err());
    }

    #[test]
    fn id_parse_prefixed() {
        let id = PlantId::parse("gbif-5284884");
        assert_eq!(id.source, PlantSource::Gbif);
        assert_eq!(id.raw, "5284884");
        assert_eq!(id.numeric(), Some(5284884));
    }

    #[test]
    fn id_parse_bare_is_trefle() {
        let id = PlantId::parse("123");
        assert_eq!(id.source, PlantSource::Trefle);
        assert_eq!(id.raw, "123");
    }

    #[test]
    fn id_parse_dashed_slug_is_trefle() {
        // "musa" is not a source tag, so the whole slug is a Trefle id.
        let id = PlantId::parse("musa-acuminata");
        assert_eq!(id.source, PlantSource::Trefle);
        assert_eq!(id.raw, "musa-acuminata");
    }

    #[test]
    fn id_parse_explicit_trefle_prefix() {
        let id = PlantId::parse("trefle-123");
        assert_eq!(id.source, PlantSource::Trefle);
        assert_eq!(id.raw, "123");
        // Renders back bare: the asymmetry is preserved on write.
        assert_eq!(id.render(), "123");
    }

    #[test]
    fn id_render_prefixes_non_trefle() {
        let id = PlantId::new(PlantSource::Tropicos, "50000123");
        assert_eq!(id.render(), "tropicos-50000123");
        assert_eq!(PlantId::parse(&id.render()), id);
    }

    #[test]
    fn id_numeric_rejects_slug() {
        assert_eq!(PlantId::parse("gbif-abc").numeric(), None);
    }

    #[test]
    fn slugify_collapses_whitespace() {
        assert_eq!(slugify("Pterocarpus  indicus"), "pterocarpus-indicus");
    }

    #[test]
    fn detail_serializes_full_shape() {
        let detail = PlantDetail::empty(
            "gbif-1".into(),
            "x-y".into(),
            "X y".into(),
            PlantSource::Gbif,
        );
        let value = serde_json::to_value(&detail).unwrap();
        // Unknown fields serialize as null/empty, never disappear.
        assert!(value.get("genus").unwrap().is_null());
        assert_eq!(value["synonyms"], serde_json::json!([]));
        assert_eq!(value["distribution"]["native"], serde_json::json!([]));
        assert_eq!(value["source"], "gbif");
    }
}
