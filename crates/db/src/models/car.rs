//! Car row model.

use fleet_core::model::Car;
use fleet_core::types::DbId;
use rust_decimal::Decimal;
use sqlx::FromRow;

/// A car row from the `cars` table.
#[derive(Debug, Clone, FromRow)]
pub struct CarRow {
    pub id: DbId,
    pub name: String,
    pub model: String,
    pub price: Decimal,
    pub owner_id: Option<DbId>,
}

impl From<CarRow> for Car {
    fn from(row: CarRow) -> Self {
        Car {
            id: Some(row.id),
            name: row.name,
            model: row.model,
            price: row.price,
            owner: row.owner_id,
        }
    }
}
