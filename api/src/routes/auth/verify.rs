use actix_web::{web, HttpResponse};
use validator::Validate;

use ea_core::services::{EmailSender, RecordStore};

use crate::app::AppState;
use crate::dto::auth::VerifyRequest;
use crate::handlers::{handle_domain_error, validation_error};

/// Handler for POST /verify
///
/// # Request Body
///
/// ```json
/// { "id": "<session id>", "fa2": "482913" }
/// ```
///
/// # Response
///
/// ## Success (201 Created)
/// `"user created"` for a signup session, `"sign up success"` for a signin.
pub async fn verify<S, E>(
    state: web::Data<AppState<S, E>>,
    request: web::Json<VerifyRequest>,
) -> HttpResponse
where
    S: RecordStore + ?Sized + 'static,
    E: EmailSender + ?Sized + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error(&errors);
    }

    match state
        .verification_service
        .verify(&request.id, &request.fa2)
        .await
    {
        Ok(outcome) => HttpResponse::Created().json(outcome.message()),
        Err(e) => handle_domain_error(&e),
    }
}
