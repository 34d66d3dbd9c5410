//! Domain logic for the fleet service.
//!
//! Pure, I/O-free building blocks shared by the persistence and HTTP layers:
//! the Owner/Car entity model, relationship maintenance, merge-patch
//! semantics, transport DTOs and the mapping between the two worlds.

pub mod dto;
pub mod error;
pub mod mapper;
pub mod model;
pub mod patch;
pub mod relationship;
pub mod types;
