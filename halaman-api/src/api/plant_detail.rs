//! Plant detail endpoint: provider inference from the id prefix, then a
//! provider-specific fetch mapped into the unified detail shape.

use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::json;

use halaman_common::plant::{PlantDetail, PlantId, PlantSource};

use crate::error::{ApiError, ApiResult};
use crate::normalize;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct PlantDetailResponse {
    pub plant: PlantDetail,
    pub meta: serde_json::Value,
}

/// GET /api/plants/{id}
///
/// The provider comes from the id's prefix; un-prefixed ids are Trefle
/// ids by contract. Providers with integer keys reject non-numeric ids
/// with a 400 before any upstream call.
pub async fn plant_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<PlantDetailResponse>> {
    let plant_id = PlantId::parse(&id);

    match plant_id.source {
        PlantSource::Tropicos => {
            let name_id = plant_id
                .numeric()
                .ok_or_else(|| ApiError::BadRequest("Invalid Tropicos ID".to_string()))?;

            // Detail is required; images and synonyms are best-effort.
            let (detail, images, synonyms) = tokio::join!(
                state.providers.tropicos.get_name_detail(name_id),
                state.providers.tropicos.get_name_images(name_id),
                state.providers.tropicos.get_synonyms(name_id),
            );
            let detail = detail?;
            let images = images.unwrap_or_default();
            let synonyms = synonyms.unwrap_or_default();

            Ok(Json(PlantDetailResponse {
                plant: normalize::tropicos_detail(detail, images, synonyms),
                meta: json!({}),
            }))
        }

        PlantSource::Gbif => {
            let key = plant_id
                .numeric()
                .ok_or_else(|| ApiError::BadRequest("Invalid GBIF key".to_string()))?;
            let bundle = state.providers.gbif.philippine_plant_detail(key).await?;

            Ok(Json(PlantDetailResponse {
                plant: normalize::gbif_detail(bundle),
                meta: json!({}),
            }))
        }

        PlantSource::Perenual => {
            let species_id = plant_id
                .numeric()
                .ok_or_else(|| ApiError::BadRequest("Invalid Perenual ID".to_string()))?;
            let detail = state.providers.perenual.get_species_detail(species_id).await?;

            Ok(Json(PlantDetailResponse {
                plant: normalize::perenual_detail(detail),
                meta: json!({}),
            }))
        }

        PlantSource::Wikipedia => {
            // Wikipedia ids carry the scientific-name slug.
            let name = plant_id.raw.replace('-', " ");
            let summary = state.providers.wikipedia.plant_summary(&name).await?;

            Ok(Json(PlantDetailResponse {
                plant: normalize::wikipedia_detail(&name, summary),
                meta: json!({}),
            }))
        }

        PlantSource::Trefle => {
            let response = state.providers.trefle.get_detail(&plant_id.raw).await?;
            let meta = response.meta.unwrap_or_else(|| json!({}));

            Ok(Json(PlantDetailResponse {
                plant: normalize::trefle_detail(response.data),
                meta,
            }))
        }
    }
}

/// Build plant detail routes
pub fn plant_detail_routes() -> Router<AppState> {
    Router::new().route("/api/plants/:id", get(plant_detail))
}
