//! The Owner/Car entity model.
//!
//! The association between the two entities is id-based: `Owner.cars` is an
//! index of car ids and `Car.owner` the id back-reference. There are no live
//! cross-object pointers, so the graph cannot cycle or hold stale references.
//! Both sides stay consistent only through the operations in
//! [`crate::relationship`].

use std::collections::BTreeSet;

use rust_decimal::Decimal;

use crate::types::DbId;

/// An owner of zero or more cars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner {
    /// Absent until first persisted; assigned exactly once by the store.
    pub id: Option<DbId>,
    /// Unique across all owners (enforced at the storage layer).
    pub name: String,
    pub gender: String,
    /// Ids of the cars owned by this owner. Back-reference index only; the
    /// owner does not control car lifecycle.
    pub cars: BTreeSet<DbId>,
}

/// A car, optionally owned by exactly one [`Owner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Car {
    /// Absent until first persisted; assigned exactly once by the store.
    pub id: Option<DbId>,
    pub name: String,
    pub model: String,
    /// Exact decimal value. Equality is numeric-value equality, so
    /// `10.0 == 10.00` regardless of representation.
    pub price: Decimal,
    /// Id of the owning owner, if any. A car may be unowned.
    pub owner: Option<DbId>,
}
