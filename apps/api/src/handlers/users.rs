use std::str::FromStr;

use axum::Json;
use axum::extract::{Extension, State};
use axum::http::StatusCode;

use redress_application::NewUserInput;
use redress_core::AppError;
use redress_domain::{Actor, Role};

use crate::dto::{RegisterUserRequest, UserResponse};
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn me_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
) -> ApiResult<Json<UserResponse>> {
    let user = state
        .user_directory
        .find(actor.user_id())
        .await?
        .ok_or_else(|| {
            AppError::NotFound(format!("user '{}' does not exist", actor.user_id()))
        })?;

    Ok(Json(UserResponse::from(user)))
}

/// Creates a user record ahead of first login, letting administrators set
/// staff roles and departments up front. Identity-header provisioning only
/// ever creates students.
pub async fn register_user_handler(
    State(state): State<AppState>,
    Extension(actor): Extension<Actor>,
    Json(payload): Json<RegisterUserRequest>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    if actor.role() != Role::Administrator {
        return Err(AppError::Forbidden(
            "only administrators can register user records".to_owned(),
        )
        .into());
    }

    let input = NewUserInput {
        subject: payload.subject,
        display_name: payload.display_name,
        email: payload.email,
        role: Role::from_str(&payload.role)?,
        department: payload.department,
    };
    let user = state.user_directory.register(input).await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}
