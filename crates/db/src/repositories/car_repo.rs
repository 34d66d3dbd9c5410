//! Repository for the `cars` table.

use fleet_core::model::Car;
use fleet_core::types::DbId;
use sqlx::PgConnection;

use crate::models::car::CarRow;

/// Column list for cars queries.
const COLUMNS: &str = "id, name, model, price, owner_id";

/// CRUD operations for cars.
pub struct CarRepo;

impl CarRepo {
    /// List all cars, ordered by id ascending.
    pub async fn list(conn: &mut PgConnection) -> Result<Vec<Car>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cars ORDER BY id ASC");
        let rows = sqlx::query_as::<_, CarRow>(&query).fetch_all(conn).await?;
        Ok(rows.into_iter().map(Car::from).collect())
    }

    /// List the cars owned by `owner_id`, ordered by id ascending.
    pub async fn list_by_owner(
        conn: &mut PgConnection,
        owner_id: DbId,
    ) -> Result<Vec<Car>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cars WHERE owner_id = $1 ORDER BY id ASC");
        let rows = sqlx::query_as::<_, CarRow>(&query)
            .bind(owner_id)
            .fetch_all(conn)
            .await?;
        Ok(rows.into_iter().map(Car::from).collect())
    }

    /// Find a car by id.
    pub async fn find_by_id(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Car>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cars WHERE id = $1");
        let row = sqlx::query_as::<_, CarRow>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await?;
        Ok(row.map(Car::from))
    }

    /// Find a car by id, locking the row until the surrounding transaction
    /// ends. Used by the locate-merge-save patch path.
    pub async fn find_by_id_for_update(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Car>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cars WHERE id = $1 FOR UPDATE");
        let row = sqlx::query_as::<_, CarRow>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await?;
        Ok(row.map(Car::from))
    }

    /// Insert a new car, returning the created entity. An unknown owner id
    /// surfaces as a foreign-key violation from the store.
    pub async fn insert(conn: &mut PgConnection, car: &Car) -> Result<Car, sqlx::Error> {
        let query = format!(
            "INSERT INTO cars (name, model, price, owner_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, CarRow>(&query)
            .bind(&car.name)
            .bind(&car.model)
            .bind(car.price)
            .bind(car.owner)
            .fetch_one(conn)
            .await?;
        Ok(Car::from(row))
    }

    /// Full update of all fields, returning the updated entity.
    pub async fn update(
        conn: &mut PgConnection,
        id: DbId,
        car: &Car,
    ) -> Result<Option<Car>, sqlx::Error> {
        let query = format!(
            "UPDATE cars SET name = $2, model = $3, price = $4, owner_id = $5
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, CarRow>(&query)
            .bind(id)
            .bind(&car.name)
            .bind(&car.model)
            .bind(car.price)
            .bind(car.owner)
            .fetch_optional(conn)
            .await?;
        Ok(row.map(Car::from))
    }

    /// Delete a car by id. Returns `true` if a row was deleted.
    pub async fn delete(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM cars WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
