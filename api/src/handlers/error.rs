use actix_web::{
    error::{InternalError, JsonPayloadError},
    http::StatusCode,
    HttpRequest, HttpResponse,
};
use validator::ValidationErrors;

use ea_core::errors::{AuthError, DomainError, StoreError};
use ea_shared::error_codes;

use crate::dto::{ErrorResponse, ErrorResponseExt};

/// Handle domain errors and convert them to HTTP responses
///
/// Every failure is a 400 except a rate-limit rejection, which is a 429.
/// Missing records and wrong codes share one error code so callers cannot
/// tell them apart.
pub fn handle_domain_error(error: &DomainError) -> HttpResponse {
    let (status, code) = match error {
        DomainError::Auth(auth_error) => match auth_error {
            AuthError::InvalidOrExpiredCode | AuthError::InvalidCode => {
                (StatusCode::BAD_REQUEST, error_codes::VERIFICATION_CODE_INVALID)
            }
            AuthError::SessionExpired => (StatusCode::BAD_REQUEST, error_codes::SESSION_EXPIRED),
            AuthError::RateLimited => {
                (StatusCode::TOO_MANY_REQUESTS, error_codes::RATE_LIMIT_EXCEEDED)
            }
            AuthError::DeliveryFailed { .. } => {
                (StatusCode::BAD_REQUEST, error_codes::EMAIL_DELIVERY_FAILED)
            }
        },
        DomainError::Store(StoreError::Timeout { .. }) | DomainError::Timeout { .. } => {
            (StatusCode::BAD_REQUEST, error_codes::TIMEOUT)
        }
        DomainError::Store(_) => (StatusCode::BAD_REQUEST, error_codes::CACHE_ERROR),
        DomainError::Validation { .. } => (StatusCode::BAD_REQUEST, error_codes::VALIDATION_ERROR),
        DomainError::Internal { .. } => (StatusCode::BAD_REQUEST, error_codes::INTERNAL_ERROR),
    };

    if error.is_transport() {
        log::error!("Request failed: {}", error);
    } else {
        log::warn!("Request rejected: {}", error);
    }

    ErrorResponse::new(code, public_message(error)).to_response(status)
}

/// Message shown to the caller; internal details stay in the logs
fn public_message(error: &DomainError) -> String {
    match error {
        DomainError::Auth(AuthError::DeliveryFailed { .. }) => {
            "failed to send verification email".to_string()
        }
        DomainError::Store(StoreError::Timeout { .. }) | DomainError::Timeout { .. } => {
            "request timed out".to_string()
        }
        DomainError::Store(_) => "record store unavailable".to_string(),
        DomainError::Internal { .. } => "an internal error occurred".to_string(),
        other => other.to_string(),
    }
}

/// 400 response for a body that failed field validation
pub fn validation_error(errors: &ValidationErrors) -> HttpResponse {
    let fields: Vec<String> = errors
        .field_errors()
        .keys()
        .map(|field| field.to_string())
        .collect();

    log::warn!("Request validation failed for fields: {:?}", fields);

    ErrorResponse::new(error_codes::VALIDATION_ERROR, "request validation failed")
        .add_detail("fields", fields)
        .to_response(StatusCode::BAD_REQUEST)
}

/// Turns JSON extraction failures into the uniform 400 body
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = ErrorResponse::new(error_codes::VALIDATION_ERROR, "invalid request body")
        .add_detail("reason", err.to_string())
        .to_response(StatusCode::BAD_REQUEST);

    InternalError::from_response(err, response).into()
}

/// Fallback for a known path hit with the wrong method
pub async fn invalid_method() -> HttpResponse {
    ErrorResponse::new(error_codes::INVALID_METHOD, "invalid method")
        .to_response(StatusCode::BAD_REQUEST)
}

/// Default 404 handler
pub async fn not_found() -> HttpResponse {
    ErrorResponse::new(
        error_codes::NOT_FOUND,
        "The requested resource was not found",
    )
    .to_response(StatusCode::NOT_FOUND)
}
