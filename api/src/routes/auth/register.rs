use actix_web::{web, HttpResponse};
use validator::Validate;

use ea_core::domain::entities::Purpose;
use ea_core::services::{EmailSender, RecordStore};
use ea_shared::mask_email;

use crate::app::AppState;
use crate::dto::auth::{RegisterRequest, SessionResponse};
use crate::handlers::{handle_domain_error, validation_error};

/// Handler for POST /signup
///
/// # Request Body
///
/// ```json
/// { "name": "Ann", "email": "ann@example.com", "password": "pw" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "id": "0190f0c3a1b27c4e9d0a5b6c7d8e9f01" }
/// ```
pub async fn signup<S, E>(
    state: web::Data<AppState<S, E>>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse
where
    S: RecordStore + ?Sized + 'static,
    E: EmailSender + ?Sized + 'static,
{
    register(state, request.into_inner(), Purpose::Signup).await
}

/// Handler for POST /signin
///
/// Same body and response as `/signup`; the session is marked as a signin.
pub async fn signin<S, E>(
    state: web::Data<AppState<S, E>>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse
where
    S: RecordStore + ?Sized + 'static,
    E: EmailSender + ?Sized + 'static,
{
    register(state, request.into_inner(), Purpose::Signin).await
}

async fn register<S, E>(
    state: web::Data<AppState<S, E>>,
    request: RegisterRequest,
    purpose: Purpose,
) -> HttpResponse
where
    S: RecordStore + ?Sized + 'static,
    E: EmailSender + ?Sized + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error(&errors);
    }

    log::info!(
        "Processing {} request for {}",
        purpose,
        mask_email(&request.email)
    );

    match state
        .verification_service
        .register(purpose, request.into())
        .await
    {
        Ok(issued) => HttpResponse::Ok().json(SessionResponse {
            id: issued.session_id,
        }),
        Err(e) => handle_domain_error(&e),
    }
}
