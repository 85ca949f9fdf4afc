use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use domain::DomainError;
use domain::access::UnknownRole;
use thiserror::Error;

/// Failures surfaced by the HTTP layer.
///
/// Domain errors keep their meaning; the transport only chooses a status code.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// No role header, i.e. the request bypassed authentication
    #[error("Missing caller role header {0}")]
    MissingRole(String),

    #[error(transparent)]
    UnknownRole(#[from] UnknownRole),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Domain(DomainError::Forbidden { .. }) => StatusCode::FORBIDDEN,
            ApiError::Domain(DomainError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Domain(DomainError::ValidationFailed(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Domain(DomainError::StorageUnavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::MissingRole(_) => StatusCode::UNAUTHORIZED,
            ApiError::UnknownRole(_) => StatusCode::FORBIDDEN,
            ApiError::InvalidBody(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = serde_json::json!({ "error": self.to_string() });
        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{Operation, Role};

    #[test]
    fn test_status_code_mapping() {
        let forbidden = DomainError::Forbidden {
            role: Role::User,
            operation: Operation::Delete,
        };
        assert_eq!(ApiError::from(forbidden).status_code(), StatusCode::FORBIDDEN);
        assert_eq!(
            ApiError::from(DomainError::NotFound("x".into())).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(DomainError::ValidationFailed("x".into())).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::from(DomainError::StorageUnavailable("x".into())).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ApiError::MissingRole("x-user-role".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::from(UnknownRole("root".into())).status_code(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_domain_message_is_kept() {
        let err = ApiError::from(DomainError::not_found("42"));
        assert_eq!(err.to_string(), "No device type found for identifier 42");
        assert_eq!(err.into_response().status(), StatusCode::NOT_FOUND);
    }
}
