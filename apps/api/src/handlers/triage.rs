use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use redress_application::AssignGrievanceInput;
use redress_domain::{Actor, GrievanceId, UserId};

use crate::dto::{AssignRequest, AssignmentResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn assign_grievance_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
    Json(payload): Json<AssignRequest>,
) -> ApiResult<(StatusCode, Json<AssignmentResponse>)> {
    let input = AssignGrievanceInput {
        grievance_id: GrievanceId::from_uuid(id),
        assignee: UserId::from_uuid(payload.assignee_id),
        note: payload.note,
        due_at: payload.due_at,
    };

    let assignment = state.grievance_service.assign(&actor, input).await?;

    Ok((
        StatusCode::CREATED,
        Json(AssignmentResponse::from(assignment)),
    ))
}

pub async fn list_assignments_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Vec<AssignmentResponse>>> {
    let assignments = state
        .grievance_service
        .list_assignments(&actor, GrievanceId::from_uuid(id))
        .await?
        .into_iter()
        .map(AssignmentResponse::from)
        .collect();

    Ok(Json(assignments))
}
