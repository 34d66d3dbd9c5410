//! Sparse (merge-patch) updates.
//!
//! A patch has the same shape as the record it targets, but every field is a
//! [`Patch`] that tracks presence: a field omitted from the wire payload is
//! [`Patch::Absent`] and leaves the stored value untouched, while a present
//! field (including an explicit `null` for nullable fields) overwrites it.
//! The id is used purely to locate the record and is never altered.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::dto::OwnerRef;
use crate::model::{Car, Owner};
use crate::types::DbId;

/// A field in a sparse update payload.
///
/// With `#[serde(default)]` an omitted field deserializes to `Absent`; a
/// present field deserializes to `Set`. When `T` is an `Option`, an explicit
/// JSON `null` becomes `Set(None)` — a real overwrite, distinct from the
/// field being missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Patch<T> {
    #[default]
    Absent,
    Set(T),
}

impl<T> Patch<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Patch::Absent)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        T::deserialize(deserializer).map(Patch::Set)
    }
}

impl<T: Serialize> Serialize for Patch<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Patch::Absent => serializer.serialize_none(),
            Patch::Set(value) => value.serialize(serializer),
        }
    }
}

/// Sparse update for an [`Owner`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OwnerPatch {
    /// Locates the record; never written by [`apply`](Self::apply).
    pub id: Option<DbId>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub name: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub gender: Patch<String>,
}

impl OwnerPatch {
    /// Overwrite the fields present in this patch onto `owner`.
    pub fn apply(&self, owner: &mut Owner) {
        if let Patch::Set(name) = &self.name {
            owner.name = name.clone();
        }
        if let Patch::Set(gender) = &self.gender {
            owner.gender = gender.clone();
        }
    }
}

/// Sparse update for a [`Car`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CarPatch {
    /// Locates the record; never written by [`apply`](Self::apply).
    pub id: Option<DbId>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub name: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub model: Patch<String>,
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub price: Patch<Decimal>,
    /// `Set(None)` (explicit JSON null) clears the owner reference; `Absent`
    /// leaves it untouched.
    #[serde(default, skip_serializing_if = "Patch::is_absent")]
    pub owner: Patch<Option<OwnerRef>>,
}

impl CarPatch {
    /// Overwrite the fields present in this patch onto `car`.
    pub fn apply(&self, car: &mut Car) {
        if let Patch::Set(name) = &self.name {
            car.name = name.clone();
        }
        if let Patch::Set(model) = &self.model {
            car.model = model.clone();
        }
        if let Patch::Set(price) = &self.price {
            car.price = *price;
        }
        if let Patch::Set(owner) = &self.owner {
            car.owner = owner.as_ref().map(|o| o.id);
        }
    }
}
