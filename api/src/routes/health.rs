use actix_web::{web, HttpResponse};

use ea_core::services::{EmailSender, RecordStore};

use crate::app::AppState;

/// Health check endpoint handler
///
/// Answers 503 when the record store does not respond.
pub async fn health_check<S, E>(state: web::Data<AppState<S, E>>) -> HttpResponse
where
    S: RecordStore + ?Sized + 'static,
    E: EmailSender + ?Sized + 'static,
{
    let store_ok = state.verification_service.check_store().await.is_ok();

    let body = serde_json::json!({
        "status": if store_ok { "healthy" } else { "unhealthy" },
        "service": "email-auth",
        "version": env!("CARGO_PKG_VERSION"),
        "store": if store_ok { "ok" } else { "unavailable" },
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    if store_ok {
        HttpResponse::Ok().json(body)
    } else {
        HttpResponse::ServiceUnavailable().json(body)
    }
}
