//! Owner row model.

use std::collections::BTreeSet;

use fleet_core::model::Owner;
use fleet_core::types::DbId;
use sqlx::FromRow;

/// An owner row from the `owners` table.
///
/// The car-id index lives on the `cars` side (`cars.owner_id`); it is
/// attached when the row is turned into a domain entity.
#[derive(Debug, Clone, FromRow)]
pub struct OwnerRow {
    pub id: DbId,
    pub name: String,
    pub gender: String,
}

impl OwnerRow {
    /// Build the domain entity, attaching the ids of the cars it owns.
    pub fn into_owner(self, cars: BTreeSet<DbId>) -> Owner {
        Owner {
            id: Some(self.id),
            name: self.name,
            gender: self.gender,
            cars,
        }
    }
}
