//! Record service for cars.
//!
//! Same shape as [`super::OwnerService`]: delegation plus transaction scope,
//! nothing else. Referential validation of the owner id is left to the
//! store's foreign-key constraint.

use fleet_core::dto::CarDto;
use fleet_core::mapper;
use fleet_core::patch::CarPatch;
use fleet_core::types::DbId;

use crate::repositories::CarRepo;
use crate::DbPool;

pub struct CarService;

impl CarService {
    /// Persist a new car, returning it with its assigned id.
    pub async fn save(pool: &DbPool, dto: &CarDto) -> Result<CarDto, sqlx::Error> {
        tracing::debug!(name = %dto.name, "request to save car");
        let car = mapper::car_from_dto(dto.clone());
        let mut tx = pool.begin().await?;
        let created = CarRepo::insert(&mut *tx, &car).await?;
        tx.commit().await?;
        Ok(mapper::car_to_dto(&created))
    }

    /// Full update of an existing car. `None` when the id is unknown.
    pub async fn update(
        pool: &DbPool,
        id: DbId,
        dto: &CarDto,
    ) -> Result<Option<CarDto>, sqlx::Error> {
        tracing::debug!(id, "request to update car");
        let car = mapper::car_from_dto(dto.clone());
        let mut tx = pool.begin().await?;
        let updated = CarRepo::update(&mut *tx, id, &car).await?;
        tx.commit().await?;
        Ok(updated.map(|car| mapper::car_to_dto(&car)))
    }

    /// Locate, merge, save. The row is locked for the duration of the
    /// transaction so concurrent patches of the same id serialize.
    /// `None` when the id is unknown; nothing is written in that case.
    pub async fn partial_update(
        pool: &DbPool,
        id: DbId,
        patch: &CarPatch,
    ) -> Result<Option<CarDto>, sqlx::Error> {
        tracing::debug!(id, "request to partially update car");
        let mut tx = pool.begin().await?;
        let Some(mut car) = CarRepo::find_by_id_for_update(&mut *tx, id).await? else {
            return Ok(None);
        };
        patch.apply(&mut car);
        let updated = CarRepo::update(&mut *tx, id, &car).await?;
        tx.commit().await?;
        Ok(updated.map(|car| mapper::car_to_dto(&car)))
    }

    /// Get all cars.
    pub async fn find_all(pool: &DbPool) -> Result<Vec<CarDto>, sqlx::Error> {
        tracing::debug!("request to get all cars");
        let mut conn = pool.acquire().await?;
        let cars = CarRepo::list(&mut *conn).await?;
        Ok(cars.iter().map(mapper::car_to_dto).collect())
    }

    /// Get one car by id.
    pub async fn find_one(pool: &DbPool, id: DbId) -> Result<Option<CarDto>, sqlx::Error> {
        tracing::debug!(id, "request to get car");
        let mut conn = pool.acquire().await?;
        let car = CarRepo::find_by_id(&mut *conn, id).await?;
        Ok(car.map(|car| mapper::car_to_dto(&car)))
    }

    /// Delete a car by id. Absence is not an error.
    pub async fn delete(pool: &DbPool, id: DbId) -> Result<(), sqlx::Error> {
        tracing::debug!(id, "request to delete car");
        let mut tx = pool.begin().await?;
        CarRepo::delete(&mut *tx, id).await?;
        tx.commit().await?;
        Ok(())
    }
}
