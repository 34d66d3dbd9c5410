//! Repository for the `owners` table, including relationship maintenance
//! against `cars.owner_id`.

use std::collections::{BTreeMap, BTreeSet};

use fleet_core::model::Owner;
use fleet_core::types::DbId;
use sqlx::PgConnection;

use crate::models::owner::OwnerRow;

/// Column list for owners queries.
const COLUMNS: &str = "id, name, gender";

/// CRUD and relationship maintenance for owners.
///
/// All functions take a [`PgConnection`] so the caller decides the
/// transaction scope; the record services run every write inside one.
pub struct OwnerRepo;

impl OwnerRepo {
    /// List all owners with their car-id indexes, ordered by id ascending.
    pub async fn list(conn: &mut PgConnection) -> Result<Vec<Owner>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM owners ORDER BY id ASC");
        let rows = sqlx::query_as::<_, OwnerRow>(&query)
            .fetch_all(&mut *conn)
            .await?;

        // One grouped query materializes every owner's car-id index.
        let pairs: Vec<(DbId, DbId)> =
            sqlx::query_as("SELECT owner_id, id FROM cars WHERE owner_id IS NOT NULL")
                .fetch_all(&mut *conn)
                .await?;
        let mut index: BTreeMap<DbId, BTreeSet<DbId>> = BTreeMap::new();
        for (owner_id, car_id) in pairs {
            index.entry(owner_id).or_default().insert(car_id);
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let cars = index.remove(&row.id).unwrap_or_default();
                row.into_owner(cars)
            })
            .collect())
    }

    /// Find an owner by id.
    pub async fn find_by_id(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Owner>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM owners WHERE id = $1");
        let row = sqlx::query_as::<_, OwnerRow>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        match row {
            Some(row) => {
                let cars = Self::car_ids(conn, id).await?;
                Ok(Some(row.into_owner(cars)))
            }
            None => Ok(None),
        }
    }

    /// Find an owner by id, locking the row until the surrounding
    /// transaction ends. Used by the locate-merge-save patch path.
    pub async fn find_by_id_for_update(
        conn: &mut PgConnection,
        id: DbId,
    ) -> Result<Option<Owner>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM owners WHERE id = $1 FOR UPDATE");
        let row = sqlx::query_as::<_, OwnerRow>(&query)
            .bind(id)
            .fetch_optional(&mut *conn)
            .await?;
        match row {
            Some(row) => {
                let cars = Self::car_ids(conn, id).await?;
                Ok(Some(row.into_owner(cars)))
            }
            None => Ok(None),
        }
    }

    /// Insert a new owner, returning the created entity.
    pub async fn insert(
        conn: &mut PgConnection,
        name: &str,
        gender: &str,
    ) -> Result<Owner, sqlx::Error> {
        let query =
            format!("INSERT INTO owners (name, gender) VALUES ($1, $2) RETURNING {COLUMNS}");
        let row = sqlx::query_as::<_, OwnerRow>(&query)
            .bind(name)
            .bind(gender)
            .fetch_one(&mut *conn)
            .await?;
        Ok(row.into_owner(BTreeSet::new()))
    }

    /// Full update of the scalar fields, returning the updated entity.
    pub async fn update(
        conn: &mut PgConnection,
        id: DbId,
        name: &str,
        gender: &str,
    ) -> Result<Option<Owner>, sqlx::Error> {
        let query = format!(
            "UPDATE owners SET name = $2, gender = $3 WHERE id = $1 RETURNING {COLUMNS}"
        );
        let row = sqlx::query_as::<_, OwnerRow>(&query)
            .bind(id)
            .bind(name)
            .bind(gender)
            .fetch_optional(&mut *conn)
            .await?;
        match row {
            Some(row) => {
                let cars = Self::car_ids(conn, id).await?;
                Ok(Some(row.into_owner(cars)))
            }
            None => Ok(None),
        }
    }

    /// Delete an owner by id. Returns `true` if a row was deleted.
    pub async fn delete(conn: &mut PgConnection, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM owners WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Replace the set of cars owned by `owner_id`.
    ///
    /// Cars currently owned but not in `car_ids` are released; every car in
    /// `car_ids` is claimed. Returns the number of claimed rows so the
    /// caller can detect unknown car ids and roll back.
    pub async fn set_cars(
        conn: &mut PgConnection,
        owner_id: DbId,
        car_ids: &[DbId],
    ) -> Result<u64, sqlx::Error> {
        sqlx::query("UPDATE cars SET owner_id = NULL WHERE owner_id = $1 AND NOT (id = ANY($2))")
            .bind(owner_id)
            .bind(car_ids)
            .execute(&mut *conn)
            .await?;
        let claimed = sqlx::query("UPDATE cars SET owner_id = $1 WHERE id = ANY($2)")
            .bind(owner_id)
            .bind(car_ids)
            .execute(&mut *conn)
            .await?;
        Ok(claimed.rows_affected())
    }

    /// Claim a single car for `owner_id`. Returns `false` when the car id
    /// is unknown. Claiming an already-owned car is a plain overwrite.
    pub async fn add_car(
        conn: &mut PgConnection,
        owner_id: DbId,
        car_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE cars SET owner_id = $1 WHERE id = $2")
            .bind(owner_id)
            .bind(car_id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Release a car. The owner reference is cleared regardless of which
    /// owner currently holds it.
    pub async fn remove_car(conn: &mut PgConnection, car_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE cars SET owner_id = NULL WHERE id = $1")
            .bind(car_id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn car_ids(
        conn: &mut PgConnection,
        owner_id: DbId,
    ) -> Result<BTreeSet<DbId>, sqlx::Error> {
        let ids: Vec<(DbId,)> = sqlx::query_as("SELECT id FROM cars WHERE owner_id = $1")
            .bind(owner_id)
            .fetch_all(conn)
            .await?;
        Ok(ids.into_iter().map(|(id,)| id).collect())
    }
}
