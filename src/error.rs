use actix_web::{HttpResponse, ResponseError};
use sea_orm::DbErr;
use serde_json::json;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Auth error: {0}")]
    AuthError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Out of stock: {0}")]
    OutOfStock(String),

    #[error("Already fulfilled: {0}")]
    AlreadyFulfilled(String),

    #[error("Transient store error: {0}")]
    TransientError(String),

    #[error("Database error: {0}")]
    DatabaseError(DbErr),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        // 连接类失败调用方可安全重试，与其它数据库错误区分开
        match err {
            DbErr::Conn(e) => AppError::TransientError(e.to_string()),
            DbErr::ConnectionAcquire(e) => AppError::TransientError(e.to_string()),
            other => AppError::DatabaseError(other),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let (status_code, error_code, message) = match self {
            AppError::ValidationError(msg) => {
                log::warn!("Validation error: {msg}");
                (
                    actix_web::http::StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    msg.clone(),
                )
            }
            AppError::AuthError(msg) => {
                log::warn!("Authentication error: {msg}");
                (
                    actix_web::http::StatusCode::UNAUTHORIZED,
                    "AUTH_ERROR",
                    msg.clone(),
                )
            }
            AppError::NotFound(msg) => (
                actix_web::http::StatusCode::NOT_FOUND,
                "NOT_FOUND",
                msg.clone(),
            ),
            AppError::OutOfStock(msg) => (
                actix_web::http::StatusCode::CONFLICT,
                "OUT_OF_STOCK",
                msg.clone(),
            ),
            AppError::AlreadyFulfilled(msg) => (
                actix_web::http::StatusCode::CONFLICT,
                "ALREADY_FULFILLED",
                msg.clone(),
            ),
            AppError::TransientError(msg) => {
                log::error!("Transient store error: {msg}");
                (
                    actix_web::http::StatusCode::SERVICE_UNAVAILABLE,
                    "TRANSIENT_ERROR",
                    "Store temporarily unavailable".to_string(),
                )
            }
            AppError::DatabaseError(err) => {
                log::error!("Database error: {err}");
                (
                    actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "Database error".to_string(),
                )
            }
            _ => {
                log::error!("Internal error: {self}");
                (
                    actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal server error".to_string(),
                )
            }
        };

        HttpResponse::build(status_code).json(json!({
            "success": false,
            "error": {
                "code": error_code,
                "message": message
            }
        }))
    }
}
