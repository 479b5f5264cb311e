use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use redress_core::AppError;
use serde::Serialize;

/// API error payload.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    message: String,
}

/// HTTP API error wrapper around core application errors.
#[derive(Debug)]
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(value: AppError) -> Self {
        Self(value)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0 {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let payload = Json(ErrorResponse {
            message: self.0.to_string(),
        });

        (status, payload).into_response()
    }
}

/// Standard API result type.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use redress_core::AppError;

    use super::ApiError;

    #[test]
    fn every_error_category_maps_to_its_status_code() {
        let cases = [
            (
                AppError::Validation("bad input".to_owned()),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::NotFound("missing".to_owned()),
                StatusCode::NOT_FOUND,
            ),
            (
                AppError::Conflict("already taken".to_owned()),
                StatusCode::CONFLICT,
            ),
            (
                AppError::Unauthorized("no identity".to_owned()),
                StatusCode::UNAUTHORIZED,
            ),
            (
                AppError::Forbidden("not allowed".to_owned()),
                StatusCode::FORBIDDEN,
            ),
            (
                AppError::Internal("broken".to_owned()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            let response = ApiError::from(error).into_response();
            assert_eq!(response.status(), expected);
        }
    }
}
