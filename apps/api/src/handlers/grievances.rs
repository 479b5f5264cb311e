use std::str::FromStr;

use axum::Json;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use redress_application::SubmitGrievanceInput;
use redress_core::AppError;
use redress_domain::{Actor, Category, GrievanceId, Priority, Status, TrackingId};

use crate::dto::{
    GrievanceResponse, SetPriorityRequest, SetStatusRequest, SubmitGrievanceRequest, TrackResponse,
};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn submit_grievance_handler(
    State(state): State<AppState>,
    actor: Option<Extension<Actor>>,
    Json(payload): Json<SubmitGrievanceRequest>,
) -> ApiResult<(StatusCode, Json<GrievanceResponse>)> {
    let input = SubmitGrievanceInput {
        category: Category::from_str(&payload.category)?,
        title: payload.title,
        description: payload.description,
        anonymous: payload.anonymous,
        confidential: payload.confidential,
    };

    let grievance = state
        .grievance_service
        .submit(actor.as_deref(), input)
        .await?;

    Ok((StatusCode::CREATED, Json(GrievanceResponse::from(grievance))))
}

/// Lists grievances visible to the caller. Shares its path with the
/// anonymous-capable submission route, so the caller check happens here
/// rather than in a route layer.
pub async fn list_grievances_handler(
    State(state): State<AppState>,
    actor: Option<Extension<Actor>>,
) -> ApiResult<Json<Vec<GrievanceResponse>>> {
    let Extension(actor) = actor.ok_or_else(unauthorized)?;
    let grievances = state
        .grievance_service
        .list_for(&actor)
        .await?
        .into_iter()
        .map(GrievanceResponse::from)
        .collect();

    Ok(Json(grievances))
}

pub async fn get_grievance_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<GrievanceResponse>> {
    let grievance = state
        .grievance_service
        .get(&actor, GrievanceId::from_uuid(id))
        .await?;

    Ok(Json(GrievanceResponse::from(grievance)))
}

pub(super) fn unauthorized() -> AppError {
    AppError::Unauthorized("authentication required".to_owned())
}

pub async fn track_grievance_handler(
    State(state): State<AppState>,
    Path(tracking_id): Path<String>,
) -> ApiResult<Json<TrackResponse>> {
    let tracking_id = TrackingId::from_str(&tracking_id)?;
    let grievance = state.grievance_service.track(&tracking_id).await?;

    Ok(Json(TrackResponse::from(grievance)))
}

pub async fn set_status_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SetStatusRequest>,
) -> ApiResult<Json<GrievanceResponse>> {
    let status = Status::from_str(&payload.status)?;
    let grievance = state
        .grievance_service
        .set_status(&actor, GrievanceId::from_uuid(id), status)
        .await?;

    Ok(Json(GrievanceResponse::from(grievance)))
}

pub async fn set_priority_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SetPriorityRequest>,
) -> ApiResult<Json<GrievanceResponse>> {
    let priority = Priority::from_str(&payload.priority)?;
    let grievance = state
        .grievance_service
        .set_priority(&actor, GrievanceId::from_uuid(id), priority)
        .await?;

    Ok(Json(GrievanceResponse::from(grievance)))
}
