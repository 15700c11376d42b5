//! Plant-health endpoints backed by Perenual: pest/disease listings and
//! species care guides.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::error::ApiResult;
use crate::providers::perenual::{PerenualCareGuide, PerenualDisease};
use crate::AppState;

use super::non_empty;

#[derive(Debug, Deserialize)]
pub struct DiseasesQuery {
    pub page: Option<u32>,
    pub q: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiseaseRecord {
    pub id: i64,
    pub common_name: Option<String>,
    pub scientific_name: Option<String>,
    pub other_names: Vec<String>,
    pub family: Option<String>,
}

impl From<PerenualDisease> for DiseaseRecord {
    fn from(disease: PerenualDisease) -> Self {
        Self {
            id: disease.id,
            common_name: disease.common_name,
            scientific_name: disease.scientific_name,
            other_names: disease.other_name.unwrap_or_default(),
            family: disease.family,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ListMeta {
    pub total: u64,
}

#[derive(Debug, Serialize)]
pub struct DiseasesResponse {
    pub data: Vec<DiseaseRecord>,
    pub meta: ListMeta,
}

/// GET /api/diseases
pub async fn list_diseases(
    State(state): State<AppState>,
    Query(query): Query<DiseasesQuery>,
) -> ApiResult<Json<DiseasesResponse>> {
    let page = query.page.unwrap_or(1).max(1);
    let q = non_empty(query.q);

    let result = state
        .providers
        .perenual
        .list_diseases(page, q.as_deref())
        .await?;
    let data: Vec<DiseaseRecord> = result.data.into_iter().map(DiseaseRecord::from).collect();
    let total = result.total.unwrap_or(data.len() as u64);

    Ok(Json(DiseasesResponse {
        data,
        meta: ListMeta { total },
    }))
}

#[derive(Debug, Deserialize)]
pub struct CareGuidesQuery {
    pub page: Option<u32>,
    pub species_id: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CareGuideRecord {
    pub id: i64,
    pub species_id: Option<i64>,
    pub common_name: Option<String>,
    pub scientific_name: Option<String>,
    pub sections: Vec<CareGuideSection>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CareGuideSection {
    pub kind: Option<String>,
    pub description: Option<String>,
}

impl From<PerenualCareGuide> for CareGuideRecord {
    fn from(guide: PerenualCareGuide) -> Self {
        Self {
            id: guide.id,
            species_id: guide.species_id,
            common_name: guide.common_name,
            scientific_name: guide.scientific_name.into_iter().next(),
            sections: guide
                .section
                .into_iter()
                .map(|section| CareGuideSection {
                    kind: section.section_type,
                    description: section.description,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CareGuidesResponse {
    pub data: Vec<CareGuideRecord>,
    pub meta: ListMeta,
}

/// GET /api/care-guides
pub async fn list_care_guides(
    State(state): State<AppState>,
    Query(query): Query<CareGuidesQuery>,
) -> ApiResult<Json<CareGuidesResponse>> {
    let page = query.page.unwrap_or(1).max(1);

    let result = state
        .providers
        .perenual
        .list_care_guides(page, query.species_id)
        .await?;
    let data: Vec<CareGuideRecord> = result.data.into_iter().map(CareGuideRecord::from).collect();
    let total = result.total.unwrap_or(data.len() as u64);

    Ok(Json(CareGuidesResponse {
        data,
        meta: ListMeta { total },
    }))
}

/// Build plant-health routes
pub fn care_routes() -> Router<AppState> {
    Router::new()
        .route("/api/diseases", get(list_diseases))
        .route("/api/care-guides", get(list_care_guides))
}
