use axum::{
    middleware,
    routing::{get, patch, post},
    Router,
};

use crate::{handlers, system};

/// Конфигурация всех роутов приложения
pub fn configure_routes() -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // SYSTEM AUTH ROUTES (PUBLIC)
        // ========================================
        .route(
            "/api/system/auth/login",
            post(system::handlers::auth::login),
        )
        .route(
            "/api/system/auth/refresh",
            post(system::handlers::auth::refresh),
        )
        .route(
            "/api/system/auth/logout",
            post(system::handlers::auth::logout),
        )
        // System auth routes (protected)
        .route(
            "/api/system/auth/me",
            get(system::handlers::auth::current_user)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        // System users management (admin only)
        .route(
            "/api/system/users",
            get(system::handlers::users::list)
                .post(system::handlers::users::create)
                .layer(middleware::from_fn(system::auth::middleware::require_admin)),
        )
        .route(
            "/api/system/users/bulk/active",
            post(system::handlers::users::bulk_active)
                .layer(middleware::from_fn(system::auth::middleware::require_admin)),
        )
        .route(
            "/api/system/users/:id",
            get(system::handlers::users::get_by_id)
                .put(system::handlers::users::update)
                .delete(system::handlers::users::delete)
                .layer(middleware::from_fn(system::auth::middleware::require_admin)),
        )
        .route(
            "/api/system/users/:id/change-password",
            post(system::handlers::users::change_password)
                .layer(middleware::from_fn(system::auth::middleware::require_auth)),
        )
        // ========================================
        // BUSINESS ROUTES (without auth for now)
        // ========================================
        // A001 Post handlers
        .route(
            "/api/post",
            get(handlers::a001_post::list_all).post(handlers::a001_post::upsert),
        )
        .route("/api/post/export.csv", get(handlers::export::posts_csv))
        .route("/api/post/export.json", get(handlers::export::posts_json))
        .route(
            "/api/post/bulk/publish",
            post(handlers::a001_post::bulk_publish),
        )
        .route(
            "/api/post/bulk/unpublish",
            post(handlers::a001_post::bulk_unpublish),
        )
        .route(
            "/api/post/bulk/delete",
            post(handlers::a001_post::bulk_delete),
        )
        .route(
            "/api/post/testdata",
            post(handlers::a001_post::insert_test_data),
        )
        .route(
            "/api/post/:id",
            get(handlers::a001_post::get_by_id).delete(handlers::a001_post::delete),
        )
        .route("/api/post/:id/field", patch(handlers::a001_post::set_field))
        // A002 Category handlers
        .route(
            "/api/category",
            get(handlers::a002_category::list_all).post(handlers::a002_category::upsert),
        )
        .route(
            "/api/category/bulk/delete",
            post(handlers::a002_category::bulk_delete),
        )
        .route(
            "/api/category/testdata",
            post(handlers::a002_category::insert_test_data),
        )
        .route(
            "/api/category/:id",
            get(handlers::a002_category::get_by_id).delete(handlers::a002_category::delete),
        )
        // A003 Comment handlers
        .route(
            "/api/comment",
            get(handlers::a003_comment::list_all).post(handlers::a003_comment::submit),
        )
        .route(
            "/api/comment/bulk/approve",
            post(handlers::a003_comment::bulk_approve),
        )
        .route(
            "/api/comment/bulk/spam",
            post(handlers::a003_comment::bulk_mark_spam),
        )
        .route(
            "/api/comment/bulk/delete",
            post(handlers::a003_comment::bulk_delete),
        )
        .route(
            "/api/comment/testdata",
            post(handlers::a003_comment::insert_test_data),
        )
        .route(
            "/api/comment/:id",
            get(handlers::a003_comment::get_by_id).delete(handlers::a003_comment::delete),
        )
        .route(
            "/api/comment/:id/status",
            post(handlers::a003_comment::set_status),
        )
}
