/// Fixed-window rate limiting keyed by client IP address.
///
/// The window state lives in process memory; this service has no external
/// dependencies, so there is no shared counter across instances.
use std::collections::HashMap;
use std::future::{ready, Ready};
use std::rc::Rc;
use std::sync::{Arc, Mutex};
use std::time::Instant;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::error::ResponseError;
use actix_web::Error;
use futures::future::LocalBoxFuture;
use serde::Deserialize;

use crate::error::AppError;

// Stale windows are dropped once the map grows past this many clients.
const MAX_TRACKED_CLIENTS: usize = 10_000;

#[derive(Debug, Clone, Deserialize)]
pub struct RateLimitConfig {
    pub max_requests: u32,
    pub window_seconds: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 5,
            window_seconds: 60,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Window {
    count: u32,
    started: Instant,
}

/// Shareable rate limiter; cloning shares the underlying window map.
#[derive(Clone)]
pub struct RateLimiter {
    config: RateLimitConfig,
    windows: Arc<Mutex<HashMap<String, Window>>>,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            windows: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Count one request for `client_id`; returns true when the client has
    /// exceeded its window allowance.
    pub fn is_rate_limited(&self, client_id: &str) -> bool {
        let now = Instant::now();
        let mut windows = self.windows.lock().expect("rate limit lock poisoned");

        if windows.len() > MAX_TRACKED_CLIENTS {
            let window_secs = self.config.window_seconds;
            windows.retain(|_, w| now.duration_since(w.started).as_secs() < window_secs);
        }

        let window = windows.entry(client_id.to_string()).or_insert(Window {
            count: 0,
            started: now,
        });

        if now.duration_since(window.started).as_secs() >= self.config.window_seconds {
            window.count = 0;
            window.started = now;
        }

        window.count += 1;
        window.count > self.config.max_requests
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimiter
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimiterService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimiterService {
            service: Rc::new(service),
            limiter: self.clone(),
        }))
    }
}

pub struct RateLimiterService<S> {
    service: Rc<S>,
    limiter: RateLimiter,
}

impl<S, B> Service<ServiceRequest> for RateLimiterService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let client_id = req
            .connection_info()
            .realip_remote_addr()
            .map(|ip| format!("ip:{ip}"))
            .unwrap_or_else(|| "ip:unknown".to_string());

        if self.limiter.is_rate_limited(&client_id) {
            tracing::debug!(%client_id, "request rate limited");
            let response = AppError::RateLimited(
                self.limiter.config.max_requests,
                self.limiter.config.window_seconds,
            )
            .error_response();
            let res = req.into_response(response).map_into_right_body();
            return Box::pin(ready(Ok(res)));
        }

        let fut = self.service.call(req);
        Box::pin(async move { Ok(fut.await?.map_into_left_body()) })
    }
}
