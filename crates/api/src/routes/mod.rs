pub mod health;

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{car, owner};
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// GET    /owners                     -> list
/// POST   /owners                     -> create
/// GET    /owners/{id}                -> get_by_id
/// PUT    /owners/{id}                -> update
/// PATCH  /owners/{id}                -> partial_update
/// DELETE /owners/{id}                -> delete
/// PUT    /owners/{id}/cars           -> set_cars
/// POST   /owners/{id}/cars/{car_id}  -> add_car
/// DELETE /owners/{id}/cars/{car_id}  -> remove_car
///
/// GET    /cars                       -> list
/// POST   /cars                       -> create
/// GET    /cars/{id}                  -> get_by_id
/// PUT    /cars/{id}                  -> update
/// PATCH  /cars/{id}                  -> partial_update
/// DELETE /cars/{id}                  -> delete
/// ```
pub fn api_routes() -> Router<AppState> {
    let owner_routes = Router::new()
        .route("/", get(owner::list).post(owner::create))
        .route(
            "/{id}",
            get(owner::get_by_id)
                .put(owner::update)
                .patch(owner::partial_update)
                .delete(owner::delete),
        )
        .route("/{id}/cars", put(owner::set_cars))
        .route(
            "/{id}/cars/{car_id}",
            post(owner::add_car).delete(owner::remove_car),
        );

    let car_routes = Router::new()
        .route("/", get(car::list).post(car::create))
        .route(
            "/{id}",
            get(car::get_by_id)
                .put(car::update)
                .patch(car::partial_update)
                .delete(car::delete),
        );

    Router::new()
        .nest("/owners", owner_routes)
        .nest("/cars", car_routes)
}
