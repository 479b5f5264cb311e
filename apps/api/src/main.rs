//! Redress API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod dto;
mod error;
mod handlers;
mod middleware;
mod state;

use std::sync::Arc;

use axum::Router;
use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, Method};
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{get, post, put};
use redress_application::{
    AnalyticsService, GrievanceService, NotificationService, UserDirectoryService,
};
use redress_core::AppError;
use redress_infrastructure::{
    LocalFileStorage, PostgresAssignmentRepository, PostgresAttachmentRepository,
    PostgresCommentRepository, PostgresGrievanceRepository, PostgresNotificationRepository,
    PostgresUserRepository,
};
use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::api_config::ApiConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    api_config::init_tracing();

    let config = ApiConfig::load()?;

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .map_err(|error| AppError::Internal(format!("failed to connect to database: {error}")))?;

    sqlx::migrate!("../../crates/infrastructure/migrations")
        .run(&pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to run migrations: {error}")))?;

    if config.migrate_only {
        info!("database migrations applied successfully");
        return Ok(());
    }

    let grievance_repository = Arc::new(PostgresGrievanceRepository::new(pool.clone()));
    let assignment_repository = Arc::new(PostgresAssignmentRepository::new(pool.clone()));
    let comment_repository = Arc::new(PostgresCommentRepository::new(pool.clone()));
    let attachment_repository = Arc::new(PostgresAttachmentRepository::new(pool.clone()));
    let notification_repository = Arc::new(PostgresNotificationRepository::new(pool.clone()));
    let user_repository = Arc::new(PostgresUserRepository::new(pool.clone()));
    let file_storage = Arc::new(LocalFileStorage::new(config.upload_dir.clone()));

    let app_state = AppState {
        grievance_service: GrievanceService::new(
            grievance_repository.clone(),
            assignment_repository,
            comment_repository,
            attachment_repository,
            notification_repository.clone(),
            user_repository.clone(),
            file_storage,
        ),
        analytics_service: AnalyticsService::new(grievance_repository),
        notification_service: NotificationService::new(notification_repository),
        user_directory: UserDirectoryService::new(user_repository),
        postgres_pool: pool,
    };

    let protected_routes = Router::new()
        .route(
            "/api/grievances/{id}",
            get(handlers::grievances::get_grievance_handler),
        )
        .route(
            "/api/grievances/{id}/status",
            put(handlers::grievances::set_status_handler),
        )
        .route(
            "/api/grievances/{id}/priority",
            put(handlers::grievances::set_priority_handler),
        )
        .route(
            "/api/grievances/{id}/assignments",
            get(handlers::triage::list_assignments_handler)
                .post(handlers::triage::assign_grievance_handler),
        )
        .route(
            "/api/grievances/{id}/comments",
            get(handlers::comments::list_comments_handler)
                .post(handlers::comments::add_comment_handler),
        )
        .route(
            "/api/notifications",
            get(handlers::notifications::list_notifications_handler),
        )
        .route(
            "/api/notifications/unread-count",
            get(handlers::notifications::unread_count_handler),
        )
        .route(
            "/api/notifications/{id}/read",
            put(handlers::notifications::mark_notification_read_handler),
        )
        .route(
            "/api/dashboard",
            get(handlers::analytics::dashboard_stats_handler),
        )
        .route("/api/analytics", get(handlers::analytics::analytics_handler))
        .route("/api/me", get(handlers::users::me_handler))
        .route("/api/users", post(handlers::users::register_user_handler))
        .route_layer(from_fn(middleware::require_auth));

    let cors_layer = CorsLayer::new()
        .allow_origin(
            HeaderValue::from_str(&config.frontend_url)
                .map_err(|error| AppError::Internal(format!("invalid FRONTEND_URL: {error}")))?,
        )
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE]);

    // Submission and attachment upload also serve anonymous grievants, so
    // they sit outside the require_auth layer and share their paths with
    // the authenticated list routes.
    let app = Router::new()
        .route("/health", get(handlers::health::health_handler))
        .route(
            "/api/track/{tracking_id}",
            get(handlers::grievances::track_grievance_handler),
        )
        .route(
            "/api/grievances",
            get(handlers::grievances::list_grievances_handler)
                .post(handlers::grievances::submit_grievance_handler),
        )
        .route(
            "/api/grievances/{id}/attachments",
            get(handlers::attachments::list_attachments_handler)
                .post(handlers::attachments::upload_attachment_handler),
        )
        .merge(protected_routes)
        .layer(from_fn_with_state(
            app_state.clone(),
            middleware::resolve_identity,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(app_state);

    let address = config.socket_address()?;
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind listener: {error}")))?;

    info!(%address, "redress-api listening");

    axum::serve(listener, app)
        .await
        .map_err(|error| AppError::Internal(format!("api server error: {error}")))
}
