//! Repositories for the `owners` and `cars` tables.

pub mod car_repo;
pub mod owner_repo;

pub use car_repo::CarRepo;
pub use owner_repo::OwnerRepo;
