//! HTTP route handlers for the bakery API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                              - Static landing page
//! GET  /health                        - Liveness check
//! GET  /health/ready                  - Readiness check (database ping)
//!
//! # Bakeries
//! GET   /bakeries                     - List all bakeries with their goods
//! GET   /bakeries/{id}                - One bakery with its goods (404 if unknown)
//! PATCH /bakeries/{id}                - Rename a bakery (form field: name)
//!
//! # Baked goods
//! GET    /baked_goods/by_price        - All goods, most expensive first
//! GET    /baked_goods/most_expensive  - Single priciest good (404 when empty)
//! GET    /baked_goods/{id}            - One good (404 if unknown)
//! POST   /baked_goods                 - Create (form fields: name, price, bakery_id)
//! PATCH  /baked_goods/{id}            - Partial update (form fields: name, price)
//! DELETE /baked_goods/{id}            - Delete, returns confirmation message
//! ```

pub mod baked_goods;
pub mod bakeries;
pub mod home;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the bakery routes router.
pub fn bakery_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(bakeries::index))
        .route("/{id}", get(bakeries::show).patch(bakeries::update))
}

/// Create the baked good routes router.
pub fn baked_good_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(baked_goods::create))
        .route("/by_price", get(baked_goods::by_price))
        .route("/most_expensive", get(baked_goods::most_expensive))
        .route(
            "/{id}",
            get(baked_goods::show)
                .patch(baked_goods::update)
                .delete(baked_goods::remove),
        )
}

/// Create all routes for the bakery API.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Landing page
        .route("/", get(home::home))
        // Bakery routes
        .nest("/bakeries", bakery_routes())
        // Baked good routes
        .nest("/baked_goods", baked_good_routes())
}
