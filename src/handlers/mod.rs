/// HTTP handlers for post endpoints
///
/// This module contains the thin HTTP layer: request extraction, service
/// calls, and response conversion, plus the route table and the generic
/// JSON 404/405 fallbacks.
pub mod posts;

// Re-export handler functions at module level
pub use posts::{
    add_comment, create_post, delete_post, get_post, list_posts, search_posts, update_post,
};

use actix_web::{web, HttpResponse};

use crate::middleware::RateLimiter;

/// Generic JSON body for unmatched routes.
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({"error": "Not Found"}))
}

/// Generic JSON body for unsupported methods on known routes.
pub async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed().json(serde_json::json!({"error": "Method Not Allowed"}))
}

/// Register the `/api/posts` routes.
///
/// The listing/creation resource is wrapped with the rate limiter; the
/// remaining endpoints are unlimited. `/search` is registered before `/{id}`
/// so the literal segment wins.
pub fn configure(limiter: RateLimiter) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.service(
            web::scope("/api/posts")
                .service(
                    web::resource("")
                        .wrap(limiter)
                        .route(web::get().to(posts::list_posts))
                        .route(web::post().to(posts::create_post))
                        .default_service(web::route().to(method_not_allowed)),
                )
                .service(
                    web::resource("/search")
                        .route(web::get().to(posts::search_posts))
                        .default_service(web::route().to(method_not_allowed)),
                )
                .service(
                    web::resource("/{id}/comments")
                        .route(web::post().to(posts::add_comment))
                        .default_service(web::route().to(method_not_allowed)),
                )
                .service(
                    web::resource("/{id}")
                        .route(web::get().to(posts::get_post))
                        .route(web::put().to(posts::update_post))
                        .route(web::delete().to(posts::delete_post))
                        .default_service(web::route().to(method_not_allowed)),
                )
                .default_service(web::route().to(not_found)),
        );
    }
}
