//! Relationship maintenance for the Owner <-> Car association.
//!
//! Consistency between `Owner.cars` and `Car.owner` is enforced only by the
//! owner-side operations in this module. Writing `Car.owner` directly is
//! one-sided and does not remove the car from the old owner's index; that
//! asymmetry is part of the model.

use std::collections::{BTreeMap, BTreeSet};

use crate::model::{Car, Owner};
use crate::types::DbId;

/// Replace `owner`'s car set with `new_cars`.
///
/// Every car currently in the index but absent from `new_cars` loses its
/// owner reference; every car in `new_cars` gains one. Car ids without an
/// entry in `store` are skipped. Works when the index starts empty.
pub fn set_cars(owner: &mut Owner, store: &mut BTreeMap<DbId, Car>, new_cars: BTreeSet<DbId>) {
    for car_id in owner.cars.difference(&new_cars) {
        if let Some(car) = store.get_mut(car_id) {
            car.owner = None;
        }
    }
    for car_id in &new_cars {
        if let Some(car) = store.get_mut(car_id) {
            car.owner = owner.id;
        }
    }
    owner.cars = new_cars;
}

/// Add `car` to `owner`'s set and point its back-reference at `owner`.
///
/// Idempotent when the car is already present (set semantics); the
/// back-reference write still occurs.
pub fn add_car(owner: &mut Owner, car: &mut Car) {
    if let Some(car_id) = car.id {
        owner.cars.insert(car_id);
    }
    car.owner = owner.id;
}

/// Remove `car` from `owner`'s set and clear its back-reference.
///
/// The back-reference is cleared even when the car was not in the set.
pub fn remove_car(owner: &mut Owner, car: &mut Car) {
    if let Some(car_id) = car.id {
        owner.cars.remove(&car_id);
    }
    car.owner = None;
}
