//! Route definitions for the Store Back-Office Platform

use axum::{
    middleware,
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::{handlers, middleware::auth_middleware, AppState};

/// Create API routes
///
/// The application state is threaded into the auth layer so token
/// verification uses the configured secret.
pub fn api_routes(state: AppState) -> Router<AppState> {
    Router::new()
        // Health check (public)
        .route("/health", get(handlers::health_check))
        // Protected routes - inventory ledger
        .nest("/inventory", inventory_routes(state.clone()))
        // Protected routes - purchase orders
        .nest("/purchase", purchase_routes(state))
}

/// Inventory ledger routes (protected)
fn inventory_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/list", get(handlers::list_inventory))
        .route("/init", post(handlers::init_inventory))
        .route("/in", post(handlers::record_inbound))
        .route("/adjust", post(handlers::record_adjustment))
        .route(
            "/:store_inventory_id/optimal-quantity",
            patch(handlers::set_optimal_quantity),
        )
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}

/// Purchase-order routes (protected)
fn purchase_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/cart", post(handlers::build_cart))
        .route("/create", post(handlers::create_purchase_order))
        .route("/list", get(handlers::list_purchase_orders))
        .route("/detail/:order_id", get(handlers::get_purchase_order))
        .route(
            "/:order_id",
            put(handlers::update_purchase_order).delete(handlers::delete_purchase_order),
        )
        .route("/status/:order_id", put(handlers::update_order_status))
        .route("/detail/item/:line_id", delete(handlers::delete_order_line))
        .route_layer(middleware::from_fn_with_state(state, auth_middleware))
}
