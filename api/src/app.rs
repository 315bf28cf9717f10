//! Application state and factory
//!
//! This module holds the shared state handed to every handler and builds
//! the Actix-web application around it.

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::Logger,
    web, App, Error,
};
use std::sync::Arc;

use ea_core::services::{EmailSender, RateLimiter, RecordStore, VerificationService};
use ea_shared::CorsConfig;

use crate::handlers::{invalid_method, json_error_handler, not_found};
use crate::middleware::{create_cors, RateLimit};
use crate::routes::auth::{new_code, signin, signup, verify};
use crate::routes::health_check;

/// Application state that holds shared services
pub struct AppState<S: RecordStore + ?Sized, E: EmailSender + ?Sized> {
    pub verification_service: Arc<VerificationService<S, E>>,
    pub rate_limiter: Arc<RateLimiter<S>>,
    /// Rate limit on the forwarded client address instead of the peer
    pub trust_proxy_headers: bool,
}

impl<S: RecordStore + ?Sized, E: EmailSender + ?Sized> AppState<S, E> {
    pub fn new(
        verification_service: Arc<VerificationService<S, E>>,
        rate_limiter: Arc<RateLimiter<S>>,
    ) -> Self {
        Self {
            verification_service,
            rate_limiter,
            trust_proxy_headers: false,
        }
    }

    pub fn with_trust_proxy_headers(mut self, trust: bool) -> Self {
        self.trust_proxy_headers = trust;
        self
    }
}

/// Create and configure the application with all dependencies
///
/// `/signup`, `/signin` and `/newcode` sit behind the rate limiter; the
/// limiter also runs for requests with the wrong method on those paths.
/// `/verify` is not rate limited.
pub fn create_app<S, E>(
    app_state: web::Data<AppState<S, E>>,
    cors: &CorsConfig,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    S: RecordStore + ?Sized + 'static,
    E: EmailSender + ?Sized + 'static,
{
    let limiter = RateLimit::new(app_state.rate_limiter.clone())
        .trust_proxy_headers(app_state.trust_proxy_headers);

    let json_config = web::JsonConfig::default()
        .content_type_required(false)
        .error_handler(json_error_handler);

    App::new()
        .app_data(app_state)
        .app_data(json_config)
        .wrap(create_cors(cors))
        .wrap(Logger::default())
        .route("/health", web::get().to(health_check::<S, E>))
        .service(
            web::resource("/signup")
                .route(web::post().to(signup::<S, E>))
                .default_service(web::to(invalid_method))
                .wrap(limiter.clone()),
        )
        .service(
            web::resource("/signin")
                .route(web::post().to(signin::<S, E>))
                .default_service(web::to(invalid_method))
                .wrap(limiter.clone()),
        )
        .service(
            web::resource("/newcode")
                .route(web::get().to(new_code::<S, E>))
                .default_service(web::to(invalid_method))
                .wrap(limiter),
        )
        .service(
            web::resource("/verify")
                .route(web::post().to(verify::<S, E>))
                .default_service(web::to(invalid_method)),
        )
        .default_service(web::route().to(not_found))
}
