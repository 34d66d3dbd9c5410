//! Request handlers for the owner and car entities.
//!
//! Each submodule provides async handler functions (create, list, get_by_id,
//! update, partial_update, delete) for a single entity type. Handlers check
//! id preconditions and field validity, then delegate to the record services
//! in `fleet_db` and map errors via [`AppError`](crate::error::AppError).

pub mod car;
pub mod owner;
