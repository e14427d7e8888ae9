/// Post handlers - HTTP endpoints for post operations
use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::error::Result;
use crate::models::{NewPost, PostUpdate};
use crate::services::{ListQuery, PostService};

/// Query parameters for substring search
#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

/// Request body for appending a comment
#[derive(Debug, Deserialize)]
pub struct AddCommentRequest {
    pub comment: Option<String>,
}

/// List posts with optional sorting and pagination
pub async fn list_posts(
    service: web::Data<PostService>,
    query: web::Query<ListQuery>,
) -> Result<HttpResponse> {
    let posts = service.list(&query)?;
    Ok(HttpResponse::Ok().json(posts))
}

/// Create a new post
pub async fn create_post(
    service: web::Data<PostService>,
    body: web::Json<NewPost>,
) -> Result<HttpResponse> {
    let post = service.create(body.into_inner())?;
    Ok(HttpResponse::Created().json(post))
}

/// Get a post by ID
pub async fn get_post(
    service: web::Data<PostService>,
    id: web::Path<u64>,
) -> Result<HttpResponse> {
    let post = service.get(*id)?;
    Ok(HttpResponse::Ok().json(post))
}

/// Partially update a post's title and/or content
pub async fn update_post(
    service: web::Data<PostService>,
    id: web::Path<u64>,
    body: web::Json<PostUpdate>,
) -> Result<HttpResponse> {
    let post = service.update(*id, &body)?;
    Ok(HttpResponse::Ok().json(post))
}

/// Append a comment to a post
pub async fn add_comment(
    service: web::Data<PostService>,
    id: web::Path<u64>,
    body: web::Json<AddCommentRequest>,
) -> Result<HttpResponse> {
    let post = service.add_comment(*id, body.comment.as_deref())?;
    Ok(HttpResponse::Ok().json(post))
}

/// Delete a post
pub async fn delete_post(
    service: web::Data<PostService>,
    id: web::Path<u64>,
) -> Result<HttpResponse> {
    let id = id.into_inner();
    service.delete(id)?;
    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": format!("Post with id {id} has been deleted successfully."),
    })))
}

/// Search posts by title or content substring (logical OR)
pub async fn search_posts(
    service: web::Data<PostService>,
    query: web::Query<SearchQuery>,
) -> Result<HttpResponse> {
    let posts = service.search(&query.title, &query.content)?;
    Ok(HttpResponse::Ok().json(posts))
}
