use actix_web::{web, HttpResponse};
use validator::Validate;

use ea_core::services::{EmailSender, RecordStore};

use crate::app::AppState;
use crate::dto::auth::{SessionRequest, CODE_SENT_MESSAGE};
use crate::handlers::{handle_domain_error, validation_error};

/// Handler for GET /newcode
///
/// Takes `{"id": "<session id>"}` as a JSON body and answers 201 with
/// `"email sent"` once a fresh code is on its way. Whether earlier codes stay
/// valid depends on the configured code key strategy.
pub async fn new_code<S, E>(
    state: web::Data<AppState<S, E>>,
    request: web::Json<SessionRequest>,
) -> HttpResponse
where
    S: RecordStore + ?Sized + 'static,
    E: EmailSender + ?Sized + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error(&errors);
    }

    match state.verification_service.reissue_code(&request.id).await {
        Ok(_) => HttpResponse::Created().json(CODE_SENT_MESSAGE),
        Err(e) => handle_domain_error(&e),
    }
}
