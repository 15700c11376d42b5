//! Plant list endpoint: provider selection, search/listing dispatch, and
//! normalization into the unified summary shape.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::warn;

use halaman_common::plant::{PlantSource, PlantSummary};

use crate::error::{ApiError, ApiResult};
use crate::normalize;
use crate::providers::trefle::TrefleListResponse;
use crate::AppState;

use super::non_empty;

/// Results per page for providers whose page size we control.
const PAGE_SIZE: u32 = 20;

#[derive(Debug, Deserialize)]
pub struct PlantsQuery {
    pub q: Option<String>,
    pub page: Option<u32>,
    pub family: Option<String>,
    pub edible: Option<String>,
    pub distribution: Option<String>,
    pub source: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MetaTotal {
    pub total: u64,
}

#[derive(Debug, Serialize)]
pub struct PlantListResponse {
    pub plants: Vec<PlantSummary>,
    pub meta: MetaTotal,
    pub links: serde_json::Value,
    pub source: PlantSource,
}

impl PlantListResponse {
    fn new(plants: Vec<PlantSummary>, total: u64, source: PlantSource) -> Self {
        Self {
            plants,
            meta: MetaTotal { total },
            links: json!({}),
            source,
        }
    }
}

/// GET /api/plants
pub async fn list_plants(
    State(state): State<AppState>,
    Query(query): Query<PlantsQuery>,
) -> ApiResult<Json<PlantListResponse>> {
    let page = query.page.unwrap_or(1).max(1);
    let q = non_empty(query.q);
    let family = non_empty(query.family);
    let edible = query.edible.as_deref() == Some("true");
    let distribution = non_empty(query.distribution);

    // An explicit source must be a known tag; no silent defaulting.
    let source = match non_empty(query.source) {
        Some(tag) => Some(tag.parse::<PlantSource>().map_err(|_| {
            ApiError::BadRequest(format!("Unknown source: {tag}"))
        })?),
        None => None,
    };

    match source {
        Some(PlantSource::Tropicos) => {
            let listing = state
                .providers
                .tropicos
                .browse_philippine_plants(q.as_deref(), page as u64, PAGE_SIZE as u64)
                .await?;
            let plants = listing.plants.iter().map(normalize::tropicos_summary).collect();
            Ok(Json(PlantListResponse::new(
                plants,
                listing.total,
                PlantSource::Tropicos,
            )))
        }

        Some(PlantSource::Perenual) => {
            let result = state
                .providers
                .perenual
                .list_species(page, q.as_deref())
                .await?;
            let plants: Vec<PlantSummary> =
                result.data.iter().map(normalize::perenual_summary).collect();
            let total = result.total.unwrap_or(plants.len() as u64);
            Ok(Json(PlantListResponse::new(plants, total, PlantSource::Perenual)))
        }

        Some(PlantSource::Wikipedia) => {
            let (curated, total) = state
                .providers
                .wikipedia
                .philippine_plants(page as u64, PAGE_SIZE as u64, None, q.as_deref())
                .await;
            let plants = curated
                .into_iter()
                .map(|plant| PlantSummary {
                    id: plant.id,
                    slug: plant.slug,
                    name: plant.name,
                    scientific_name: plant.scientific_name,
                    family: plant.family,
                    family_common_name: plant.family_common_name,
                    image_url: plant.image_url,
                    source: PlantSource::Wikipedia,
                })
                .collect();
            Ok(Json(PlantListResponse::new(plants, total, PlantSource::Wikipedia)))
        }

        Some(PlantSource::Gbif) => Ok(Json(gbif_listing(&state, q.as_deref(), page).await?)),

        // No source given but the Philippine zone was requested: GBIF
        // has the better coverage, with Trefle as the fallback.
        None if distribution.as_deref() == Some("PHI") => {
            match gbif_listing(&state, q.as_deref(), page).await {
                Ok(response) => Ok(Json(response)),
                Err(err) => {
                    warn!("GBIF listing failed, falling back to Trefle: {}", err);
                    Ok(Json(
                        trefle_listing(&state, q.as_deref(), page, family.as_deref(), edible, true)
                            .await?,
                    ))
                }
            }
        }

        Some(PlantSource::Trefle) | None => Ok(Json(
            trefle_listing(
                &state,
                q.as_deref(),
                page,
                family.as_deref(),
                edible,
                distribution.is_some(),
            )
            .await?,
        )),
    }
}

async fn gbif_listing(
    state: &AppState,
    q: Option<&str>,
    page: u32,
) -> Result<PlantListResponse, ApiError> {
    let offset = (page - 1) * PAGE_SIZE;
    let result = state
        .providers
        .gbif
        .list_philippine_species(q, PAGE_SIZE, offset)
        .await?;

    let plants: Vec<PlantSummary> = result
        .results
        .iter()
        .filter_map(normalize::gbif_summary)
        .collect();
    Ok(PlantListResponse::new(
        plants,
        result.count.unwrap_or(0),
        PlantSource::Gbif,
    ))
}

/// Trefle dispatch: zone listing when a distribution was requested,
/// search when a query is present, filtered listing otherwise. The
/// family/edible filters apply only to the listing path.
async fn trefle_listing(
    state: &AppState,
    q: Option<&str>,
    page: u32,
    family: Option<&str>,
    edible: bool,
    by_distribution: bool,
) -> Result<PlantListResponse, ApiError> {
    let trefle = &state.providers.trefle;
    let result = if by_distribution {
        trefle.list_philippine_plants(page).await?
    } else if let Some(q) = q {
        trefle.search_plants(q, page).await?
    } else {
        trefle.list_plants(page, family, edible).await?
    };

    Ok(trefle_response(result))
}

fn trefle_response(result: TrefleListResponse) -> PlantListResponse {
    let plants: Vec<PlantSummary> = result.data.iter().map(normalize::trefle_summary).collect();
    let total = result.meta.as_ref().and_then(|m| m.total).unwrap_or(0);
    PlantListResponse {
        plants,
        meta: MetaTotal { total },
        links: result.links.unwrap_or_else(|| json!({})),
        source: PlantSource::Trefle,
    }
}

/// Build plant list routes
pub fn plant_routes() -> Router<AppState> {
    Router::new().route("/api/plants", get(list_plants))
}
