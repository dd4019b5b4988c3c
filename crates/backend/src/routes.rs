use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use sea_orm::DatabaseConnection;

use crate::{handlers, system};

/// Общее состояние приложения, доступное всем обработчикам
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
}

/// Конфигурация всех роутов приложения
pub fn configure_routes(state: AppState) -> Router {
    // ========================================
    // ADMIN ROUTES (PROTECTED)
    // ========================================
    let admin = Router::new()
        .route(
            "/admin/category",
            post(handlers::a001_category::add)
                .put(handlers::a001_category::update)
                .delete(handlers::a001_category::delete),
        )
        .route("/admin/category/page", get(handlers::a001_category::page))
        .route(
            "/admin/category/status/:status",
            post(handlers::a001_category::start_or_stop),
        )
        .route(
            "/admin/category/list",
            get(handlers::a001_category::list_by_type),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            system::auth::middleware::require_auth,
        ));

    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // AUTH ROUTES (PUBLIC)
        // ========================================
        .route(
            "/admin/employee/login",
            post(system::handlers::auth::login),
        )
        .merge(admin)
        .layer(middleware::from_fn(
            system::middleware::request_logger::request_logger,
        ))
        .with_state(state)
}
