//! Record services: thin, transactional orchestration over the repositories.

pub mod car_service;
pub mod owner_service;

pub use car_service::CarService;
pub use owner_service::OwnerService;
