//! HTTP handlers for the owner entity, including the car-set sub-resource.

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use fleet_core::dto::OwnerDto;
use fleet_core::error::CoreError;
use fleet_core::patch::{OwnerPatch, Patch};
use fleet_core::types::DbId;
use fleet_db::services::OwnerService;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

const ENTITY_NAME: &str = "owner";

/// POST /api/owners
///
/// Create a new owner. Rejects payloads that already carry an id.
pub async fn create(
    State(state): State<AppState>,
    Json(dto): Json<OwnerDto>,
) -> AppResult<impl IntoResponse> {
    tracing::debug!(name = %dto.name, "REST request to create owner");
    if dto.id.is_some() {
        return Err(AppError::BadRequestAlert {
            entity: ENTITY_NAME,
            error_key: "idexists",
            message: "A new owner cannot already have an id".to_string(),
        });
    }
    dto.validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let created = OwnerService::save(&state.pool, &dto).await?;

    tracing::info!(id = created.id, name = %created.name, "Owner created");

    let location = format!("/api/owners/{}", created.id.unwrap_or_default());
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(created),
    ))
}

/// PUT /api/owners/{id}
///
/// Full update of an existing owner. The body id must be present and match
/// the path id.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(dto): Json<OwnerDto>,
) -> AppResult<impl IntoResponse> {
    tracing::debug!(id, "REST request to update owner");
    check_id(ENTITY_NAME, id, dto.id)?;
    dto.validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    let updated = OwnerService::update(&state.pool, id, &dto)
        .await?
        .ok_or(AppError::BadRequestAlert {
            entity: ENTITY_NAME,
            error_key: "idnotfound",
            message: "Entity not found".to_string(),
        })?;

    Ok(Json(updated))
}

/// PATCH /api/owners/{id}
///
/// Merge the fields present in the payload onto the stored owner; absent
/// fields keep their stored values.
pub async fn partial_update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(patch): Json<OwnerPatch>,
) -> AppResult<impl IntoResponse> {
    tracing::debug!(id, "REST request to partially update owner");
    check_id(ENTITY_NAME, id, patch.id)?;
    if matches!(&patch.name, Patch::Set(name) if name.is_empty()) {
        return Err(AppError::BadRequest("name must not be empty".to_string()));
    }
    if matches!(&patch.gender, Patch::Set(gender) if gender.is_empty()) {
        return Err(AppError::BadRequest("gender must not be empty".to_string()));
    }

    let merged = OwnerService::partial_update(&state.pool, id, &patch)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Owner", id }))?;

    Ok(Json(merged))
}

/// GET /api/owners
///
/// List all owners.
pub async fn list(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    tracing::debug!("REST request to get all owners");
    let owners = OwnerService::find_all(&state.pool).await?;
    Ok(Json(owners))
}

/// GET /api/owners/{id}
///
/// Get a single owner by id.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    tracing::debug!(id, "REST request to get owner");
    let owner = OwnerService::find_one(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Owner", id }))?;
    Ok(Json(owner))
}

/// DELETE /api/owners/{id}
///
/// Delete an owner by id.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    tracing::debug!(id, "REST request to delete owner");
    OwnerService::delete(&state.pool, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PUT /api/owners/{id}/cars
///
/// Replace the set of cars owned by this owner with the given car ids.
/// Returns the resulting set of cars.
pub async fn set_cars(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(car_ids): Json<Vec<DbId>>,
) -> AppResult<impl IntoResponse> {
    tracing::debug!(id, count = car_ids.len(), "REST request to set owner cars");
    let cars = OwnerService::set_cars(&state.pool, id, &car_ids)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Owner", id }))?;
    Ok(Json(cars))
}

/// POST /api/owners/{id}/cars/{car_id}
///
/// Claim a single car for this owner. Returns the updated car.
pub async fn add_car(
    State(state): State<AppState>,
    Path((id, car_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    tracing::debug!(id, car_id, "REST request to add car to owner");
    let car = OwnerService::add_car(&state.pool, id, car_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Owner", id }))?;
    Ok(Json(car))
}

/// DELETE /api/owners/{id}/cars/{car_id}
///
/// Release a car from this owner. The car's owner reference is cleared even
/// when the car was not in this owner's set.
pub async fn remove_car(
    State(state): State<AppState>,
    Path((id, car_id)): Path<(DbId, DbId)>,
) -> AppResult<impl IntoResponse> {
    tracing::debug!(id, car_id, "REST request to remove car from owner");
    OwnerService::remove_car(&state.pool, id, car_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Owner", id }))?;
    Ok(StatusCode::NO_CONTENT)
}

/// Reject update/patch requests whose body id is missing or does not match
/// the path id.
pub(crate) fn check_id(
    entity: &'static str,
    path_id: DbId,
    body_id: Option<DbId>,
) -> Result<(), AppError> {
    let body_id = body_id.ok_or(AppError::BadRequestAlert {
        entity,
        error_key: "idnull",
        message: "Invalid id".to_string(),
    })?;
    if body_id != path_id {
        return Err(AppError::BadRequestAlert {
            entity,
            error_key: "idinvalid",
            message: "Invalid id".to_string(),
        });
    }
    Ok(())
}
