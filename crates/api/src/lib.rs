//! HTTP API server with observability for the storefront backend.
//!
//! Provides REST endpoints for categories, products, members and orders,
//! with structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod extract;
pub mod routes;
pub mod seed;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, patch, post};
use domain::category::InMemoryCategoryRepository;
use domain::member::InMemoryMemberRepository;
use domain::order::InMemoryOrderRepository;
use domain::product::InMemoryProductRepository;
use domain::{CategoryService, MemberService, OrderService, ProductService};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub type Categories = CategoryService<InMemoryCategoryRepository, InMemoryProductRepository>;
pub type Products = ProductService<InMemoryCategoryRepository, InMemoryProductRepository>;
pub type Members = MemberService<InMemoryMemberRepository>;
pub type Orders = OrderService<
    InMemoryCategoryRepository,
    InMemoryProductRepository,
    InMemoryOrderRepository,
    Arc<Members>,
>;

/// Shared application state accessible from all handlers.
pub struct AppState {
    pub categories: Arc<Categories>,
    pub products: Arc<Products>,
    pub members: Arc<Members>,
    pub orders: Orders,
}

/// Creates the Axum application router with all routes and shared state.
pub fn create_app(state: Arc<AppState>, metrics_handle: PrometheusHandle) -> Router {
    use routes::{categories, members, orders, products};

    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    let storefront = Router::new()
        .route("/members", post(members::register))
        .route(
            "/members/me",
            get(members::me)
                .patch(members::update_me)
                .delete(members::withdraw),
        )
        .route("/categories", get(categories::list_public))
        .route("/categories/{id}", get(categories::get_public))
        .route("/categories/{id}/products", get(products::list_public))
        .route("/products/{id}", get(products::get_public))
        .route("/orders", post(orders::create).get(orders::list_mine))
        .route("/orders/{id}", get(orders::get))
        .route("/orders/{id}/cancel", post(orders::cancel));

    let admin = Router::new()
        .route(
            "/categories",
            post(categories::create).get(categories::list_all),
        )
        .route(
            "/categories/{id}",
            get(categories::get)
                .patch(categories::update)
                .delete(categories::delete),
        )
        .route("/categories/{id}/products", get(products::list_all))
        .route("/products", post(products::create))
        .route("/products/{id}", get(products::get).patch(products::update))
        .route("/products/{id}/status", patch(products::change_status))
        .route("/members", get(members::list_all))
        .route("/members/{id}/status", patch(members::change_status))
        .route("/members/{id}/role", patch(members::change_role))
        .route("/orders", get(orders::list_all));

    Router::new()
        .route("/health", get(routes::health::check))
        .nest("/api/v1", storefront.nest("/admin", admin))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the default application state over empty in-memory stores.
pub fn create_default_state() -> Arc<AppState> {
    let product_repo = InMemoryProductRepository::new();
    let categories = Arc::new(CategoryService::new(
        InMemoryCategoryRepository::new(),
        product_repo.clone(),
    ));
    let products = Arc::new(ProductService::new(product_repo, categories.clone()));
    let members = Arc::new(MemberService::new(InMemoryMemberRepository::new()));
    let orders = OrderService::new(
        InMemoryOrderRepository::new(),
        products.clone(),
        members.clone(),
    );

    Arc::new(AppState {
        categories,
        products,
        members,
        orders,
    })
}
