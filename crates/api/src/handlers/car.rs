//! HTTP handlers for the car entity.

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use fleet_core::dto::CarDto;
use fleet_core::error::CoreError;
use fleet_core::patch::{CarPatch, Patch};
use fleet_core::types::DbId;
use fleet_db::services::CarService;

use crate::error::{AppError, AppResult};
use crate::handlers::owner::check_id;
use crate::state::AppState;

const ENTITY_NAME: &str = "car";

/// POST /api/cars
///
/// Create a new car. Rejects payloads that already carry an id. An unknown
/// owner reference surfaces as a referential-integrity conflict from the
/// store.
pub async fn create(
    State(state): State<AppState>,
    Json(dto): Json<CarDto>,
) -> AppResult<impl IntoResponse> {
    tracing::debug!(name = %dto.name, "REST request to create car");
    if dto.id.is_some() {
        return Err(AppError::BadRequestAlert {
            entity: ENTITY_NAME,
            error_key: "idexists",
            message: "A new car cannot already have an id".to_string(),
        });
    }
    dto.validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let created = CarService::save(&state.pool, &dto).await?;

    tracing::info!(id = created.id, name = %created.name, "Car created");

    let location = format!("/api/cars/{}", created.id.unwrap_or_default());
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(created),
    ))
}

/// PUT /api/cars/{id}
///
/// Full update of an existing car. The body id must be present and match
/// the path id.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(dto): Json<CarDto>,
) -> AppResult<impl IntoResponse> {
    tracing::debug!(id, "REST request to update car");
    check_id(ENTITY_NAME, id, dto.id)?;
    dto.validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let updated = CarService::update(&state.pool, id, &dto)
        .await?
        .ok_or(AppError::BadRequestAlert {
            entity: ENTITY_NAME,
            error_key: "idnotfound",
            message: "Entity not found".to_string(),
        })?;

    Ok(Json(updated))
}

/// PATCH /api/cars/{id}
///
/// Merge the fields present in the payload onto the stored car; absent
/// fields keep their stored values. An explicit `"owner": null` clears the
/// owner reference.
pub async fn partial_update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(patch): Json<CarPatch>,
) -> AppResult<impl IntoResponse> {
    tracing::debug!(id, "REST request to partially update car");
    check_id(ENTITY_NAME, id, patch.id)?;
    if matches!(&patch.name, Patch::Set(name) if name.is_empty()) {
        return Err(AppError::BadRequest("name must not be empty".to_string()));
    }
    if matches!(&patch.model, Patch::Set(model) if model.is_empty()) {
        return Err(AppError::BadRequest("model must not be empty".to_string()));
    }

    let merged = CarService::partial_update(&state.pool, id, &patch)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Car", id }))?;

    Ok(Json(merged))
}

/// GET /api/cars
///
/// List all cars.
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    tracing::debug!("REST request to get all cars");
    let cars = CarService::find_all(&state.pool).await?;
    Ok(Json(cars))
}

/// GET /api/cars/{id}
///
/// Get a single car by id.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    tracing::debug!(id, "REST request to get car");
    let car = CarService::find_one(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Car", id }))?;
    Ok(Json(car))
}

/// DELETE /api/cars/{id}
///
/// Delete a car by id.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    tracing::debug!(id, "REST request to delete car");
    CarService::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
