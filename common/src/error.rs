use actix_web::{ResponseError, HttpResponse};
use actix_web::http::StatusCode;
use thiserror::Error;
use redis::RedisError;
use serde_json::json;
use crate::validation::ValidationErrors;

pub type Result<T> = std::result::Result<T, InventoryError>;

#[derive(Error, Debug)]
pub enum InventoryError {
    #[error("Validation error: {0}")]
    Validation(ValidationErrors),
    #[error("Device not found: {0}")]
    NotFound(String),
    #[error("QR hash {hash} already belongs to device {existing_id}")]
    DuplicateHash { hash: String, existing_id: String },
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("QR render error: {0}")]
    Render(String),
    #[error("Configuration error: {0}")]
    Configuration(String),
    #[error("Server error: {0}")]
    Server(String),
}

impl From<ValidationErrors> for InventoryError {
    fn from(errors: ValidationErrors) -> Self {
        InventoryError::Validation(errors)
    }
}

impl From<serde_json::Error> for InventoryError {
    fn from(err: serde_json::Error) -> Self {
        InventoryError::Serialization(err.to_string())
    }
}

impl From<RedisError> for InventoryError {
    fn from(err: RedisError) -> Self {
        InventoryError::Storage(err.to_string())
    }
}

impl ResponseError for InventoryError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::DuplicateHash { .. } => StatusCode::CONFLICT,
            Self::Storage(_) |
            Self::Serialization(_) |
            Self::Render(_) |
            Self::Configuration(_) |
            Self::Server(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            Self::Validation(errors) => HttpResponse::BadRequest().json(json!({
                "error": "validation failed",
                "fields": errors,
            })),
            Self::NotFound(_) => HttpResponse::NotFound().json(json!({
                "error": "invalid code",
            })),
            Self::DuplicateHash { hash, existing_id } => HttpResponse::Conflict().json(json!({
                "error": self.to_string(),
                "qrHash": hash,
                "existingId": existing_id,
            })),
            _ => HttpResponse::build(self.status_code()).json(json!({
                "error": self.to_string(),
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::FieldError;

    #[test]
    fn maps_errors_to_status_codes() {
        let mut errors = ValidationErrors::default();
        errors.push(FieldError::new("name", "Name is required"));

        assert_eq!(InventoryError::from(errors).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(InventoryError::NotFound("abc".into()).status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            InventoryError::DuplicateHash { hash: "h".into(), existing_id: "1".into() }.status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(InventoryError::Storage("down".into()).status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
