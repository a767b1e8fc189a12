use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use thiserror::Error;

/// Every failure a request can run into. Infrastructure variants carry the
/// underlying error for logging; the client only ever sees `public_message`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error("Invalid product ID")]
    InvalidId,

    #[error("Email already registered")]
    DuplicateEmail,

    #[error("No user found")]
    AuthenticationFailed,

    #[error("Token required")]
    MissingToken,

    #[error("Invalid Token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token payload")]
    InvalidTokenPayload,

    #[error("User not found")]
    UserNotFound,

    #[error("Failed to sign token: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    #[error("Password hashing error: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("Server misconfigured: {0}")]
    Misconfigured(&'static str),
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    fn is_internal(&self) -> bool {
        matches!(
            self,
            AppError::Signing(_)
                | AppError::Hashing(_)
                | AppError::Database(_)
                | AppError::Misconfigured(_)
        )
    }

    /// Message safe to hand to a client.
    pub fn public_message(&self) -> String {
        if self.is_internal() {
            "Internal Server Error".to_string()
        } else {
            self.to_string()
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::InvalidId => StatusCode::BAD_REQUEST,
            AppError::DuplicateEmail => StatusCode::CONFLICT,
            AppError::AuthenticationFailed
            | AppError::InvalidToken
            | AppError::TokenExpired
            | AppError::InvalidTokenPayload => StatusCode::UNAUTHORIZED,
            AppError::MissingToken => StatusCode::FORBIDDEN,
            AppError::UserNotFound => StatusCode::NOT_FOUND,
            AppError::Signing(_)
            | AppError::Hashing(_)
            | AppError::Database(_)
            | AppError::Misconfigured(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if self.is_internal() {
            log::error!("❌ {}", self);
        }

        HttpResponse::build(self.status_code()).json(serde_json::json!({
            "success": false,
            "error": self.public_message()
        }))
    }
}
