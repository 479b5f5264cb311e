use axum::Json;
use axum::extract::{Extension, Multipart, Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use redress_application::AttachFileInput;
use redress_core::AppError;
use redress_domain::{Actor, GrievanceId};

use crate::dto::AttachmentResponse;
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn upload_attachment_handler(
    State(state): State<AppState>,
    actor: Option<Extension<Actor>>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> ApiResult<(StatusCode, Json<AttachmentResponse>)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|error| AppError::Validation(format!("malformed multipart upload: {error}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload").to_owned();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_owned();
        let bytes = field
            .bytes()
            .await
            .map_err(|error| AppError::Validation(format!("failed to read upload: {error}")))?;

        let input = AttachFileInput {
            grievance_id: GrievanceId::from_uuid(id),
            file_name,
            content_type,
            bytes: bytes.to_vec(),
        };
        let attachment = state
            .grievance_service
            .attach_file(actor.as_deref(), input)
            .await?;

        return Ok((
            StatusCode::CREATED,
            Json(AttachmentResponse::from(attachment)),
        ));
    }

    Err(AppError::Validation("multipart field 'file' is required".to_owned()).into())
}

/// Lists attachment metadata. Shares its path with the anonymous-capable
/// upload route, so the caller check happens here rather than in a route
/// layer.
pub async fn list_attachments_handler(
    State(state): State<AppState>,
    actor: Option<Extension<Actor>>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Vec<AttachmentResponse>>> {
    let Extension(actor) = actor.ok_or_else(super::grievances::unauthorized)?;
    let attachments = state
        .grievance_service
        .list_attachments(&actor, GrievanceId::from_uuid(id))
        .await?
        .into_iter()
        .map(AttachmentResponse::from)
        .collect();

    Ok(Json(attachments))
}
