/// Post Service Library
///
/// A small HTTP service exposing CRUD, search, sort, and pagination over a
/// collection of blog posts persisted in a single flat JSON file. Every
/// request loads the full collection into memory; write operations commit a
/// full rewrite back.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers and route registration
/// - `models`: Post record and request body shapes
/// - `services`: query and mutation logic over a loaded collection
/// - `storage`: flat-file persistence behind the `PostStore` trait
/// - `middleware`: per-client rate limiting
/// - `error`: error types and handling
/// - `config`: configuration management
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod storage;

pub use config::Config;
pub use error::{AppError, Result};
