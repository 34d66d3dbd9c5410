//! Conversion between domain entities and transport DTOs.
//!
//! Scalar fields map field-for-field in both directions; a car's owner
//! collapses to the reference-only [`OwnerRef`] projection so serialization
//! never traverses the relationship graph.

use std::collections::BTreeSet;

use crate::dto::{CarDto, OwnerDto, OwnerRef};
use crate::model::{Car, Owner};

/// Owner -> DTO. The car-id index is transport-invisible.
pub fn owner_to_dto(owner: &Owner) -> OwnerDto {
    OwnerDto {
        id: owner.id,
        name: owner.name.clone(),
        gender: owner.gender.clone(),
    }
}

/// DTO -> Owner. Yields an empty car index; the association is maintained
/// exclusively through [`crate::relationship`].
pub fn owner_from_dto(dto: OwnerDto) -> Owner {
    Owner {
        id: dto.id,
        name: dto.name,
        gender: dto.gender,
        cars: BTreeSet::new(),
    }
}

/// Car -> DTO, collapsing the owner to a reference-only projection.
pub fn car_to_dto(car: &Car) -> CarDto {
    CarDto {
        id: car.id,
        name: car.name.clone(),
        model: car.model.clone(),
        price: car.price,
        owner: car.owner.map(|id| OwnerRef { id }),
    }
}

/// DTO -> Car. Only the owner's id survives from the reference projection.
pub fn car_from_dto(dto: CarDto) -> Car {
    Car {
        id: dto.id,
        name: dto.name,
        model: dto.model,
        price: dto.price,
        owner: dto.owner.map(|owner| owner.id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    #[test]
    fn owner_round_trip_preserves_scalars() {
        let owner = Owner {
            id: Some(7),
            name: "Ada".to_string(),
            gender: "female".to_string(),
            cars: BTreeSet::from([1, 2]),
        };

        let back = owner_from_dto(owner_to_dto(&owner));
        assert_eq!(back.id, owner.id);
        assert_eq!(back.name, owner.name);
        assert_eq!(back.gender, owner.gender);
        // The DTO does not carry the index.
        assert!(back.cars.is_empty());
    }

    #[test]
    fn car_round_trip_preserves_scalars_and_owner_id() {
        let car = Car {
            id: Some(3),
            name: "Daily driver".to_string(),
            model: "Corolla".to_string(),
            price: Decimal::from_str("15000.50").unwrap(),
            owner: Some(7),
        };

        let dto = car_to_dto(&car);
        assert_eq!(dto.owner, Some(OwnerRef { id: 7 }));

        let back = car_from_dto(dto);
        assert_eq!(back, car);
    }

    #[test]
    fn unowned_car_maps_to_no_reference() {
        let car = Car {
            id: None,
            name: "Showroom".to_string(),
            model: "911".to_string(),
            price: Decimal::from_str("120000.00").unwrap(),
            owner: None,
        };

        let dto = car_to_dto(&car);
        assert_eq!(dto.owner, None);
        assert_eq!(car_from_dto(dto), car);
    }

    #[test]
    fn price_equality_is_numeric_not_representational() {
        let a = Decimal::from_str("10.0").unwrap();
        let b = Decimal::from_str("10.00").unwrap();
        assert_eq!(a, b);
    }
}
