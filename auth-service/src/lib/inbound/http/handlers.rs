use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use serde::Serialize;

use crate::domain::account::errors::AccountError;
use crate::domain::session::errors::SessionError;

pub mod create_account;
pub mod login;
pub mod logout;
pub mod me;
pub mod refresh;

/// Message returned for every rejected login.
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

#[derive(Debug, Clone)]
pub struct ApiSuccess<T: Serialize + PartialEq>(StatusCode, Json<ApiResponseBody<T>>);

impl<T> PartialEq for ApiSuccess<T>
where
    T: Serialize + PartialEq,
{
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0 && self.1 .0 == other.1 .0
    }
}

impl<T: Serialize + PartialEq> ApiSuccess<T> {
    pub fn new(status: StatusCode, data: T) -> Self {
        ApiSuccess(status, Json(ApiResponseBody::new(status, data)))
    }
}

impl<T: Serialize + PartialEq> IntoResponse for ApiSuccess<T> {
    fn into_response(self) -> Response {
        (self.0, self.1).into_response()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    InternalServerError(String),
    UnprocessableEntity(String),
    Unauthorized(String),
    Forbidden(String),
    Conflict(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InternalServerError(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
            ApiError::UnprocessableEntity(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
        };

        (status, Json(ApiResponseBody::new_error(status, message))).into_response()
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::InvalidEmail(_) | SessionError::InvalidCredentials => {
                ApiError::Unauthorized(INVALID_CREDENTIALS.to_string())
            }
            SessionError::InvalidToken => ApiError::Unauthorized(err.to_string()),
            SessionError::UserStore(_) | SessionError::TokenIssue(_) => {
                tracing::error!(error = %err, "Session operation failed");
                ApiError::InternalServerError("Internal server error".to_string())
            }
        }
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::InvalidEmail(_)
            | AccountError::InvalidRole(_)
            | AccountError::EmptyPassword => ApiError::UnprocessableEntity(err.to_string()),
            AccountError::EmailAlreadyExists(_) => ApiError::Conflict(err.to_string()),
            AccountError::PasswordHashing(_) | AccountError::Repository(_) => {
                tracing::error!(error = %err, "Account operation failed");
                ApiError::InternalServerError("Internal server error".to_string())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiResponseBody<T: Serialize + PartialEq> {
    status_code: u16,
    data: T,
}

impl<T: Serialize + PartialEq> ApiResponseBody<T> {
    pub fn new(status_code: StatusCode, data: T) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data,
        }
    }
}

impl ApiResponseBody<ApiErrorData> {
    pub fn new_error(status_code: StatusCode, message: String) -> Self {
        Self {
            status_code: status_code.as_u16(),
            data: ApiErrorData { message },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiErrorData {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::session::errors::EmailError;

    #[test]
    fn test_login_failures_are_indistinguishable() {
        let invalid_email = ApiError::from(SessionError::InvalidEmail(EmailError::InvalidFormat(
            "missing @".to_string(),
        )));
        let rejected = ApiError::from(SessionError::InvalidCredentials);

        assert_eq!(invalid_email, rejected);
        assert_eq!(
            rejected,
            ApiError::Unauthorized(INVALID_CREDENTIALS.to_string())
        );
    }

    #[test]
    fn test_infrastructure_errors_hide_detail() {
        let err = ApiError::from(SessionError::UserStore("connection refused".to_string()));
        assert_eq!(
            err,
            ApiError::InternalServerError("Internal server error".to_string())
        );
    }

    #[test]
    fn test_account_errors() {
        assert_eq!(
            ApiError::from(AccountError::EmailAlreadyExists("bob@example.com".to_string())),
            ApiError::Conflict("Account already exists: bob@example.com".to_string())
        );
        assert_eq!(
            ApiError::from(AccountError::EmptyPassword),
            ApiError::UnprocessableEntity("Password cannot be empty".to_string())
        );
        assert_eq!(
            ApiError::from(AccountError::Repository("disk full".to_string())),
            ApiError::InternalServerError("Internal server error".to_string())
        );
    }
}
