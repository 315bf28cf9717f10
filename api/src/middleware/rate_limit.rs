//! Per-address rate limiting middleware
//!
//! Wraps the resources that send email. Each request is checked against the
//! shared [`RateLimiter`] before the handler runs, so a limited request never
//! reaches the verification engine. Store failures reject the request with a
//! 503 rather than letting it through.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::StatusCode,
    Error,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
};

use ea_core::errors::{AuthError, DomainError};
use ea_core::services::{RateLimitDecision, RateLimiter, RecordStore};
use ea_shared::error_codes;

use crate::dto::{ErrorResponse, ErrorResponseExt};
use crate::handlers::handle_domain_error;

/// Rate limiter middleware factory
pub struct RateLimit<S: RecordStore + ?Sized> {
    limiter: Arc<RateLimiter<S>>,
    trust_proxy_headers: bool,
}

impl<S: RecordStore + ?Sized> RateLimit<S> {
    pub fn new(limiter: Arc<RateLimiter<S>>) -> Self {
        Self {
            limiter,
            trust_proxy_headers: false,
        }
    }

    /// Take the client address from `X-Forwarded-For` / `X-Real-IP` when present
    pub fn trust_proxy_headers(mut self, trust: bool) -> Self {
        self.trust_proxy_headers = trust;
        self
    }
}

impl<S: RecordStore + ?Sized> Clone for RateLimit<S> {
    fn clone(&self) -> Self {
        Self {
            limiter: self.limiter.clone(),
            trust_proxy_headers: self.trust_proxy_headers,
        }
    }
}

impl<Svc, B, S> Transform<Svc, ServiceRequest> for RateLimit<S>
where
    Svc: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    Svc::Future: 'static,
    B: 'static,
    S: RecordStore + ?Sized + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<Svc, S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: Svc) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
            limiter: self.limiter.clone(),
            trust_proxy_headers: self.trust_proxy_headers,
        }))
    }
}

/// Rate limiter middleware service
pub struct RateLimitMiddleware<Svc, S: RecordStore + ?Sized> {
    service: Rc<Svc>,
    limiter: Arc<RateLimiter<S>>,
    trust_proxy_headers: bool,
}

impl<Svc, B, S> Service<ServiceRequest> for RateLimitMiddleware<Svc, S>
where
    Svc: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    Svc::Future: 'static,
    B: 'static,
    S: RecordStore + ?Sized + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let limiter = self.limiter.clone();
        let address = client_address(&req, self.trust_proxy_headers);

        Box::pin(async move {
            match limiter.check(&address).await {
                Ok(RateLimitDecision::Admitted) => {
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Ok(RateLimitDecision::Limited) => {
                    let response =
                        handle_domain_error(&DomainError::Auth(AuthError::RateLimited));
                    Ok(req.into_response(response).map_into_right_body())
                }
                Err(e) => {
                    log::error!("Rate limit check failed for {}: {}", address, e);
                    let response = ErrorResponse::new(
                        error_codes::RATE_LIMIT_UNAVAILABLE,
                        "Unable to check rate limit",
                    )
                    .to_response(StatusCode::SERVICE_UNAVAILABLE);
                    Ok(req.into_response(response).map_into_right_body())
                }
            }
        })
    }
}

/// Address a request is rate limited under
///
/// The peer IP without its port, so reconnecting from a new source port does
/// not reset the window. Proxy headers are only read when trusted.
pub fn client_address(req: &ServiceRequest, trust_proxy_headers: bool) -> String {
    if trust_proxy_headers {
        if let Some(forwarded_for) = req.headers().get("X-Forwarded-For") {
            if let Ok(forwarded_str) = forwarded_for.to_str() {
                if let Some(ip) = forwarded_str.split(',').next() {
                    let ip = ip.trim();
                    if !ip.is_empty() {
                        return ip.to_string();
                    }
                }
            }
        }

        if let Some(real_ip) = req.headers().get("X-Real-IP") {
            if let Ok(ip_str) = real_ip.to_str() {
                if !ip_str.trim().is_empty() {
                    return ip_str.trim().to_string();
                }
            }
        }
    }

    req.peer_addr()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_client_address_strips_port() {
        let req = TestRequest::default()
            .peer_addr("10.1.2.3:5555".parse().unwrap())
            .to_srv_request();
        assert_eq!(client_address(&req, false), "10.1.2.3");
    }

    #[test]
    fn test_proxy_headers_ignored_unless_trusted() {
        let req = TestRequest::default()
            .peer_addr("10.1.2.3:5555".parse().unwrap())
            .insert_header(("X-Forwarded-For", "203.0.113.7, 10.0.0.1"))
            .to_srv_request();
        assert_eq!(client_address(&req, false), "10.1.2.3");
        assert_eq!(client_address(&req, true), "203.0.113.7");
    }

    #[test]
    fn test_real_ip_fallback() {
        let req = TestRequest::default()
            .peer_addr("10.1.2.3:5555".parse().unwrap())
            .insert_header(("X-Real-IP", "198.51.100.4"))
            .to_srv_request();
        assert_eq!(client_address(&req, true), "198.51.100.4");
    }

    #[test]
    fn test_missing_peer_address() {
        let req = TestRequest::default().to_srv_request();
        assert_eq!(client_address(&req, false), "unknown");
    }
}
