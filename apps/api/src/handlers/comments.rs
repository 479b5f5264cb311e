use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use redress_application::AddCommentInput;
use redress_domain::{Actor, GrievanceId};

use crate::dto::{AddCommentRequest, CommentResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn add_comment_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AddCommentRequest>,
) -> ApiResult<(StatusCode, Json<CommentResponse>)> {
    let input = AddCommentInput {
        grievance_id: GrievanceId::from_uuid(id),
        body: payload.body,
        internal: payload.internal,
    };

    let comment = state.grievance_service.add_comment(&actor, input).await?;

    Ok((StatusCode::CREATED, Json(CommentResponse::from(comment))))
}

pub async fn list_comments_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Vec<CommentResponse>>> {
    let comments = state
        .grievance_service
        .list_comments(&actor, GrievanceId::from_uuid(id))
        .await?
        .into_iter()
        .map(CommentResponse::from)
        .collect();

    Ok(Json(comments))
}
