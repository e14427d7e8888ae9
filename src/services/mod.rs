/// Business logic layer for post-service
///
/// This module provides the query engine (list with sort/pagination,
/// substring search) and the mutation engine (create, update, comment
/// append, delete) over the collection loaded from storage.
pub mod posts;

// Re-export commonly used services
pub use posts::{ListQuery, PostService};
