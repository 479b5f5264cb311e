use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use redress_application::NewUserInput;
use redress_core::{AppError, AppResult};
use redress_domain::{Actor, Role, User};

use crate::error::ApiResult;
use crate::state::AppState;

/// Identity headers injected by the fronting identity provider.
const SUBJECT_HEADER: &str = "x-auth-subject";
const NAME_HEADER: &str = "x-auth-name";
const EMAIL_HEADER: &str = "x-auth-email";

/// Resolves the caller identity when the proxy forwarded one, injecting an
/// `Actor` extension. Applied to every route; routes that demand a caller
/// add [`require_auth`] on top. The submission and upload routes work with
/// or without the extension, serving anonymous grievants.
pub async fn resolve_identity(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> ApiResult<Response> {
    if let Some(actor) = resolve_actor(&state, request.headers()).await? {
        request.extensions_mut().insert(actor);
    }

    Ok(next.run(request).await)
}

pub async fn require_auth(request: Request, next: Next) -> ApiResult<Response> {
    if request.extensions().get::<Actor>().is_none() {
        return Err(AppError::Unauthorized("authentication required".to_owned()).into());
    }

    Ok(next.run(request).await)
}

/// Maps identity headers to a stored user record, provisioning a student
/// record on first sight. Staff roles are pre-registered by administrators,
/// so the stored role is always authoritative.
async fn resolve_actor(state: &AppState, headers: &HeaderMap) -> AppResult<Option<Actor>> {
    let Some(subject) = header_value(headers, SUBJECT_HEADER) else {
        return Ok(None);
    };

    let user = match state.user_directory.find_by_subject(&subject).await? {
        Some(user) => user,
        None => provision_user(state, headers, subject).await?,
    };

    Ok(Some(actor_from(&user)))
}

async fn provision_user(
    state: &AppState,
    headers: &HeaderMap,
    subject: String,
) -> AppResult<User> {
    let display_name = header_value(headers, NAME_HEADER).ok_or_else(|| {
        AppError::Unauthorized(format!("missing {NAME_HEADER} header for new identity"))
    })?;
    let email = header_value(headers, EMAIL_HEADER).ok_or_else(|| {
        AppError::Unauthorized(format!("missing {EMAIL_HEADER} header for new identity"))
    })?;

    state
        .user_directory
        .register(NewUserInput {
            subject,
            display_name,
            email,
            role: Role::Student,
            department: None,
        })
        .await
}

fn actor_from(user: &User) -> Actor {
    Actor::new(
        user.id(),
        user.subject().as_str(),
        user.display_name().as_str(),
        user.role(),
        user.department().map(ToOwned::to_owned),
    )
}

fn header_value(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(ToOwned::to_owned)
}
