use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use crate::dto::HealthResponse;
use crate::state::AppState;

pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let postgres_ok = sqlx::query("SELECT 1")
        .execute(&state.postgres_pool)
        .await
        .is_ok();

    let (http_status, status, postgres) = if postgres_ok {
        (StatusCode::OK, "ok", "ok")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "degraded", "unreachable")
    };

    (http_status, Json(HealthResponse { status, postgres }))
}
