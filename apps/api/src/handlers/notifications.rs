use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use redress_domain::{Actor, NotificationId};

use crate::dto::{NotificationResponse, UnreadCountResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn list_notifications_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> ApiResult<Json<Vec<NotificationResponse>>> {
    let notifications = state
        .notification_service
        .list_for(&actor)
        .await?
        .into_iter()
        .map(NotificationResponse::from)
        .collect();

    Ok(Json(notifications))
}

pub async fn unread_count_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> ApiResult<Json<UnreadCountResponse>> {
    let unread = state.notification_service.unread_count(&actor).await?;

    Ok(Json(UnreadCountResponse { unread }))
}

pub async fn mark_notification_read_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    state
        .notification_service
        .mark_read(&actor, NotificationId::from_uuid(id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
