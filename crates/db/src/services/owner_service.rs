//! Record service for owners.
//!
//! Thin delegation over [`OwnerRepo`]: no business logic beyond mapping and
//! transaction scope. Every write runs in its own transaction (commit on
//! success, rollback when the transaction is dropped on error); reads use a
//! plain pool connection.

use std::collections::BTreeSet;

use fleet_core::dto::{CarDto, OwnerDto};
use fleet_core::mapper;
use fleet_core::patch::OwnerPatch;
use fleet_core::types::DbId;

use crate::repositories::{CarRepo, OwnerRepo};
use crate::DbPool;

pub struct OwnerService;

impl OwnerService {
    /// Persist a new owner, returning it with its assigned id.
    pub async fn save(pool: &DbPool, dto: &OwnerDto) -> Result<OwnerDto, sqlx::Error> {
        tracing::debug!(name = %dto.name, "request to save owner");
        let mut tx = pool.begin().await?;
        let owner = OwnerRepo::insert(&mut *tx, &dto.name, &dto.gender).await?;
        tx.commit().await?;
        Ok(mapper::owner_to_dto(&owner))
    }

    /// Full update of an existing owner. `None` when the id is unknown.
    pub async fn update(
        pool: &DbPool,
        id: DbId,
        dto: &OwnerDto,
    ) -> Result<Option<OwnerDto>, sqlx::Error> {
        tracing::debug!(id, "request to update owner");
        let mut tx = pool.begin().await?;
        let updated = OwnerRepo::update(&mut *tx, id, &dto.name, &dto.gender).await?;
        tx.commit().await?;
        Ok(updated.map(|owner| mapper::owner_to_dto(&owner)))
    }

    /// Locate, merge, save. The row is locked for the duration of the
    /// transaction so concurrent patches of the same id serialize.
    /// `None` when the id is unknown; nothing is written in that case.
    pub async fn partial_update(
        pool: &DbPool,
        id: DbId,
        patch: &OwnerPatch,
    ) -> Result<Option<OwnerDto>, sqlx::Error> {
        tracing::debug!(id, "request to partially update owner");
        let mut tx = pool.begin().await?;
        let Some(mut owner) = OwnerRepo::find_by_id_for_update(&mut *tx, id).await? else {
            return Ok(None);
        };
        patch.apply(&mut owner);
        let updated = OwnerRepo::update(&mut *tx, id, &owner.name, &owner.gender).await?;
        tx.commit().await?;
        Ok(updated.map(|owner| mapper::owner_to_dto(&owner)))
    }

    /// Get all owners.
    pub async fn find_all(pool: &DbPool) -> Result<Vec<OwnerDto>, sqlx::Error> {
        tracing::debug!("request to get all owners");
        let mut conn = pool.acquire().await?;
        let owners = OwnerRepo::list(&mut *conn).await?;
        Ok(owners.iter().map(mapper::owner_to_dto).collect())
    }

    /// Get one owner by id.
    pub async fn find_one(pool: &DbPool, id: DbId) -> Result<Option<OwnerDto>, sqlx::Error> {
        tracing::debug!(id, "request to get owner");
        let mut conn = pool.acquire().await?;
        let owner = OwnerRepo::find_by_id(&mut *conn, id).await?;
        Ok(owner.map(|owner| mapper::owner_to_dto(&owner)))
    }

    /// Delete an owner by id. Absence is not an error.
    pub async fn delete(pool: &DbPool, id: DbId) -> Result<(), sqlx::Error> {
        tracing::debug!(id, "request to delete owner");
        let mut tx = pool.begin().await?;
        OwnerRepo::delete(&mut *tx, id).await?;
        tx.commit().await?;
        Ok(())
    }

    /// Replace the owner's car set, returning the resulting set of cars.
    ///
    /// `None` when the owner is unknown. Unknown car ids abort the whole
    /// operation with `RowNotFound`, rolling back any released rows.
    pub async fn set_cars(
        pool: &DbPool,
        owner_id: DbId,
        car_ids: &[DbId],
    ) -> Result<Option<Vec<CarDto>>, sqlx::Error> {
        tracing::debug!(owner_id, count = car_ids.len(), "request to set owner cars");
        let mut tx = pool.begin().await?;
        if OwnerRepo::find_by_id(&mut *tx, owner_id).await?.is_none() {
            return Ok(None);
        }

        let distinct: Vec<DbId> = car_ids
            .iter()
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let claimed = OwnerRepo::set_cars(&mut *tx, owner_id, &distinct).await?;
        if claimed != distinct.len() as u64 {
            return Err(sqlx::Error::RowNotFound);
        }

        let cars = CarRepo::list_by_owner(&mut *tx, owner_id).await?;
        tx.commit().await?;
        Ok(Some(cars.iter().map(mapper::car_to_dto).collect()))
    }

    /// Claim a single car for the owner, returning the updated car.
    ///
    /// `None` when the owner is unknown; `RowNotFound` when the car is.
    pub async fn add_car(
        pool: &DbPool,
        owner_id: DbId,
        car_id: DbId,
    ) -> Result<Option<CarDto>, sqlx::Error> {
        tracing::debug!(owner_id, car_id, "request to add car to owner");
        let mut tx = pool.begin().await?;
        if OwnerRepo::find_by_id(&mut *tx, owner_id).await?.is_none() {
            return Ok(None);
        }
        if !OwnerRepo::add_car(&mut *tx, owner_id, car_id).await? {
            return Err(sqlx::Error::RowNotFound);
        }
        let car = CarRepo::find_by_id(&mut *tx, car_id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)?;
        tx.commit().await?;
        Ok(Some(mapper::car_to_dto(&car)))
    }

    /// Release a car from the owner. The owner reference is cleared even
    /// when the car is currently held by a different owner (or by nobody);
    /// an unknown car id is a no-op. `None` when the owner is unknown.
    pub async fn remove_car(
        pool: &DbPool,
        owner_id: DbId,
        car_id: DbId,
    ) -> Result<Option<()>, sqlx::Error> {
        tracing::debug!(owner_id, car_id, "request to remove car from owner");
        let mut tx = pool.begin().await?;
        if OwnerRepo::find_by_id(&mut *tx, owner_id).await?.is_none() {
            return Ok(None);
        }
        OwnerRepo::remove_car(&mut *tx, car_id).await?;
        tx.commit().await?;
        Ok(Some(()))
    }
}
