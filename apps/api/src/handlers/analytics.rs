use axum::Json;
use axum::extract::{Extension, State};

use redress_application::{AnalyticsReport, DashboardStats};
use redress_domain::Actor;

use crate::error::ApiResult;
use crate::state::AppState;

pub async fn dashboard_stats_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> ApiResult<Json<DashboardStats>> {
    let stats = state.analytics_service.dashboard_stats(&actor).await?;

    Ok(Json(stats))
}

pub async fn analytics_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> ApiResult<Json<AnalyticsReport>> {
    let report = state.analytics_service.analytics(&actor).await?;

    Ok(Json(report))
}
