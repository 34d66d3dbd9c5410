//! Transport-facing representations of the entities.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::DbId;

/// Transport representation of an owner.
///
/// Does not carry the car set; the association is only visible from the car
/// side as a [`OwnerRef`] projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct OwnerDto {
    pub id: Option<DbId>,
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "gender must not be empty"))]
    pub gender: String,
}

/// Reference-only projection of an owner: the identifier and nothing else.
///
/// Keeps serialization of a car from dragging in the full owner record (and
/// through it the rest of the relationship graph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnerRef {
    pub id: DbId,
}

/// Transport representation of a car.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct CarDto {
    pub id: Option<DbId>,
    #[validate(length(min = 1, message = "name must not be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "model must not be empty"))]
    pub model: String,
    /// Exact decimal; serialized as a JSON string to avoid float rounding.
    pub price: Decimal,
    /// The owning owner as a reference-only projection.
    pub owner: Option<OwnerRef>,
}
