use redress_application::{
    AnalyticsService, GrievanceService, NotificationService, UserDirectoryService,
};
use sqlx::PgPool;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub grievance_service: GrievanceService,
    pub analytics_service: AnalyticsService,
    pub notification_service: NotificationService,
    pub user_directory: UserDirectoryService,
    pub postgres_pool: PgPool,
}
