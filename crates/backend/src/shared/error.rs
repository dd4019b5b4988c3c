use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use contracts::shared::api_response::ApiResponse;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

use crate::shared::autofill::AutoFillError;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// Нарушение бизнес-правила, сообщение уходит клиенту как есть
    #[error("{0}")]
    Business(String),
    /// Тело, query или path запроса не разобраны
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("unauthorized")]
    Unauthorized,
    #[error(transparent)]
    AutoFill(#[from] AutoFillError),
    #[error(transparent)]
    Database(#[from] DbErr),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn business(msg: impl Into<String>) -> Self {
        AppError::Business(msg.into())
    }

    /// Нарушение уникальности превращается в бизнес-ошибку `msg`
    pub fn from_db_unique(err: DbErr, msg: &str) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => AppError::business(msg),
            _ => AppError::Database(err),
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::Business(_) => StatusCode::OK,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::AutoFill(_) | AppError::Database(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let msg = if status.is_server_error() {
            tracing::error!("Request failed: {:#}", self);
            "Internal server error".to_string()
        } else {
            tracing::warn!("Request rejected: {}", self);
            self.to_string()
        };
        (status, Json(ApiResponse::<()>::error(msg))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::common::AuditField;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AppError::business("x").status(), StatusCode::OK);
        assert_eq!(
            AppError::NotFound("gone".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::BadRequest("bad".into()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::Unauthorized.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            AppError::from(AutoFillError::MissingField(AuditField::CreateTime)).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_non_unique_db_error_stays_database() {
        let err = AppError::from_db_unique(DbErr::Custom("boom".into()), "dup");
        assert!(matches!(err, AppError::Database(_)));
    }
}
