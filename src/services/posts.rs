/// Post service - query and mutation operations over the stored collection
///
/// Every operation loads the full collection from the store, works on that
/// in-memory snapshot, and (for writes) commits the full collection back.
/// Write operations hold a process-local mutex across the load-commit span
/// so two in-process writers cannot silently discard each other's commit;
/// the backing file itself remains last-writer-wins across processes.
use std::cmp::Ordering;
use std::sync::{Arc, Mutex};

use serde::Deserialize;

use crate::error::{AppError, Result};
use crate::models::{NewPost, Post, PostUpdate};
use crate::storage::PostStore;

const DEFAULT_PAGE: usize = 1;
const DEFAULT_LIMIT: usize = 10;

/// Field a listing may be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SortField {
    Title,
    Content,
}

impl SortField {
    /// Parse the `sort` query parameter. Empty/absent means unsorted.
    fn parse(raw: Option<&str>) -> Result<Option<Self>> {
        match raw.unwrap_or("").to_ascii_lowercase().as_str() {
            "" => Ok(None),
            "title" => Ok(Some(Self::Title)),
            "content" => Ok(Some(Self::Content)),
            _ => Err(AppError::InvalidArgument("Invalid sort field".to_string())),
        }
    }

    fn key<'a>(self, post: &'a Post) -> &'a str {
        match self {
            Self::Title => &post.title,
            Self::Content => &post.content,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Parse the `direction` query parameter. Absent means ascending.
    fn parse(raw: Option<&str>) -> Result<Self> {
        match raw.unwrap_or("asc").to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            _ => Err(AppError::InvalidArgument(
                "Invalid sort direction".to_string(),
            )),
        }
    }

    fn order(self, ord: Ordering) -> Ordering {
        match self {
            Self::Asc => ord,
            Self::Desc => ord.reverse(),
        }
    }
}

/// Raw query parameters for the list operation.
///
/// Values arrive as text and are validated by `PostService::list`, so a
/// non-numeric `page` or `limit` produces a 400 instead of a routing error.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub sort: Option<String>,
    pub direction: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

fn parse_count(raw: Option<&str>, name: &str, default: usize) -> Result<usize> {
    match raw {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|_| AppError::InvalidArgument(format!("Invalid {name} value"))),
    }
}

/// Query and mutation engine over an injected post store.
pub struct PostService {
    store: Arc<dyn PostStore>,
    // Serializes the load-commit span of write operations within this process.
    write_lock: Mutex<()>,
}

impl PostService {
    pub fn new(store: Arc<dyn PostStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// List posts with optional sorting and pagination.
    ///
    /// Sorting is stable on the field's text value (a missing field reads as
    /// empty text). Pagination slices `[(page-1)*limit, (page-1)*limit+limit)`
    /// with saturating arithmetic; an out-of-range page yields an empty or
    /// partial result, never an error.
    pub fn list(&self, query: &ListQuery) -> Result<Vec<Post>> {
        let sort_field = SortField::parse(query.sort.as_deref())?;
        let direction = SortDirection::parse(query.direction.as_deref())?;
        let page = parse_count(query.page.as_deref(), "page", DEFAULT_PAGE)?;
        let limit = parse_count(query.limit.as_deref(), "limit", DEFAULT_LIMIT)?;

        let mut posts = self.store.load()?;

        if let Some(field) = sort_field {
            posts.sort_by(|a, b| direction.order(field.key(a).cmp(field.key(b))));
        }

        let start = page.saturating_sub(1).saturating_mul(limit);
        Ok(posts.into_iter().skip(start).take(limit).collect())
    }

    /// Search posts whose title contains `title_query` OR whose content
    /// contains `content_query`, both case-insensitive substrings.
    ///
    /// An empty query is a substring of everything, so with both queries
    /// empty every post matches. This is a logical OR, not an intersection.
    pub fn search(&self, title_query: &str, content_query: &str) -> Result<Vec<Post>> {
        let title_query = title_query.to_lowercase();
        let content_query = content_query.to_lowercase();

        let posts = self.store.load()?;
        Ok(posts
            .into_iter()
            .filter(|post| {
                post.title.to_lowercase().contains(&title_query)
                    || post.content.to_lowercase().contains(&content_query)
            })
            .collect())
    }

    /// Fetch a single post by id.
    pub fn get(&self, id: u64) -> Result<Post> {
        let posts = self.store.load()?;
        posts
            .into_iter()
            .find(|post| post.id == id)
            .ok_or_else(post_not_found)
    }

    /// Create a post, assigning `max(existing ids) + 1` as its id.
    ///
    /// Ids are never reused after deletion, and the max+1 scheme is not safe
    /// across concurrent processes.
    pub fn create(&self, new_post: NewPost) -> Result<Post> {
        if new_post.title.is_empty() || new_post.content.is_empty() {
            return Err(AppError::InvalidArgument(
                "Title and content are required".to_string(),
            ));
        }

        let _guard = self.write_lock.lock().expect("write lock poisoned");
        let mut posts = self.store.load()?;

        let id = posts.iter().map(|post| post.id).max().unwrap_or(0) + 1;

        let mut extra = new_post.extra;
        // Ids are system-assigned; a caller-supplied one is discarded.
        extra.remove("id");

        let post = Post {
            id,
            title: new_post.title,
            content: new_post.content,
            comments: new_post.comments,
            extra,
        };

        posts.push(post.clone());
        self.store.commit(&posts)?;

        tracing::info!(post_id = id, "post created");
        Ok(post)
    }

    /// Apply a partial update (title and/or content) to a post.
    pub fn update(&self, id: u64, update: &PostUpdate) -> Result<Post> {
        let _guard = self.write_lock.lock().expect("write lock poisoned");
        let mut posts = self.store.load()?;

        let post = posts
            .iter_mut()
            .find(|post| post.id == id)
            .ok_or_else(post_not_found)?;

        if let Some(title) = &update.title {
            post.title = title.clone();
        }
        if let Some(content) = &update.content {
            post.content = content.clone();
        }
        let updated = post.clone();

        self.store.commit(&posts)?;
        Ok(updated)
    }

    /// Append a comment to a post's comment sequence.
    pub fn add_comment(&self, id: u64, comment: Option<&str>) -> Result<Post> {
        let _guard = self.write_lock.lock().expect("write lock poisoned");
        let mut posts = self.store.load()?;

        let post = posts
            .iter_mut()
            .find(|post| post.id == id)
            .ok_or_else(post_not_found)?;

        let comment = match comment {
            Some(comment) if !comment.is_empty() => comment,
            _ => {
                return Err(AppError::InvalidArgument(
                    "Comment is required".to_string(),
                ))
            }
        };

        post.comments.push(comment.to_string());
        let updated = post.clone();

        self.store.commit(&posts)?;
        Ok(updated)
    }

    /// Remove a post from the collection. Its id is never reassigned.
    pub fn delete(&self, id: u64) -> Result<()> {
        let _guard = self.write_lock.lock().expect("write lock poisoned");
        let mut posts = self.store.load()?;

        let index = posts
            .iter()
            .position(|post| post.id == id)
            .ok_or_else(post_not_found)?;

        posts.remove(index);
        self.store.commit(&posts)?;

        tracing::info!(post_id = id, "post deleted");
        Ok(())
    }
}

fn post_not_found() -> AppError {
    AppError::NotFound("Post not found".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryPostStore;

    fn service_with(posts: Vec<Post>) -> PostService {
        PostService::new(Arc::new(MemoryPostStore::with_posts(posts)))
    }

    fn post(id: u64, title: &str, content: &str) -> Post {
        Post {
            id,
            title: title.to_string(),
            content: content.to_string(),
            comments: Vec::new(),
            extra: serde_json::Map::new(),
        }
    }

    fn new_post(title: &str, content: &str) -> NewPost {
        serde_json::from_value(serde_json::json!({"title": title, "content": content}))
            .unwrap()
    }

    fn list_query(sort: &str, direction: &str) -> ListQuery {
        ListQuery {
            sort: Some(sort.to_string()),
            direction: Some(direction.to_string()),
            ..ListQuery::default()
        }
    }

    #[test]
    fn create_assigns_sequential_ids_from_one() {
        let service = service_with(Vec::new());

        let first = service.create(new_post("A", "B")).unwrap();
        let second = service.create(new_post("C", "D")).unwrap();

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
    }

    #[test]
    fn create_requires_title_and_content() {
        let service = service_with(Vec::new());

        let err = service.create(new_post("", "body")).unwrap_err();
        assert_eq!(err.to_string(), "Title and content are required");

        let err = service.create(new_post("head", "")).unwrap_err();
        assert_eq!(err.to_string(), "Title and content are required");
    }

    #[test]
    fn create_does_not_reuse_deleted_ids() {
        let service = service_with(Vec::new());
        let first = service.create(new_post("A", "a")).unwrap();
        service.create(new_post("B", "b")).unwrap();

        service.delete(first.id).unwrap();
        let third = service.create(new_post("C", "c")).unwrap();

        // max+1 over the surviving posts: id 1 is gone for good.
        assert_eq!(third.id, 3);
    }

    #[test]
    fn create_discards_caller_supplied_id() {
        let service = service_with(Vec::new());
        let body: NewPost = serde_json::from_value(serde_json::json!({
            "id": 999,
            "title": "A",
            "content": "B",
            "author": "kim",
        }))
        .unwrap();

        let created = service.create(body).unwrap();
        assert_eq!(created.id, 1);
        assert!(!created.extra.contains_key("id"));
        assert_eq!(created.extra["author"], serde_json::json!("kim"));
    }

    #[test]
    fn list_sorts_by_title_ascending_and_descending() {
        let posts = vec![post(1, "banana", "x"), post(2, "apple", "y")];

        let service = service_with(posts.clone());
        let asc = service.list(&list_query("title", "asc")).unwrap();
        assert_eq!(asc[0].title, "apple");

        let service = service_with(posts);
        let desc = service.list(&list_query("title", "desc")).unwrap();
        assert_eq!(desc[0].title, "banana");
    }

    #[test]
    fn list_sorts_by_content() {
        let service = service_with(vec![post(1, "a", "zzz"), post(2, "b", "aaa")]);
        let sorted = service.list(&list_query("content", "asc")).unwrap();
        assert_eq!(sorted[0].content, "aaa");
    }

    #[test]
    fn list_sort_parameters_are_case_insensitive() {
        let service = service_with(vec![post(1, "b", "x"), post(2, "a", "y")]);
        let sorted = service.list(&list_query("Title", "DESC")).unwrap();
        assert_eq!(sorted[0].title, "b");
    }

    #[test]
    fn list_rejects_invalid_sort_field() {
        let service = service_with(Vec::new());
        let err = service.list(&list_query("comments", "asc")).unwrap_err();
        assert_eq!(err.to_string(), "Invalid sort field");
    }

    #[test]
    fn list_rejects_invalid_sort_direction() {
        let service = service_with(Vec::new());
        let err = service.list(&list_query("title", "sideways")).unwrap_err();
        assert_eq!(err.to_string(), "Invalid sort direction");
    }

    #[test]
    fn list_without_sort_preserves_collection_order() {
        let service = service_with(vec![post(3, "c", "x"), post(1, "a", "y")]);
        let posts = service.list(&ListQuery::default()).unwrap();
        assert_eq!(posts[0].id, 3);
        assert_eq!(posts[1].id, 1);
    }

    #[test]
    fn list_paginates_with_defaults() {
        let posts = (1..=15).map(|i| post(i, "t", "c")).collect();
        let service = service_with(posts);

        // Default page 1, limit 10.
        let first = service.list(&ListQuery::default()).unwrap();
        assert_eq!(first.len(), 10);
        assert_eq!(first[0].id, 1);

        let second = service
            .list(&ListQuery {
                page: Some("2".to_string()),
                ..ListQuery::default()
            })
            .unwrap();
        assert_eq!(second.len(), 5);
        assert_eq!(second[0].id, 11);
    }

    #[test]
    fn list_out_of_range_page_yields_empty() {
        let service = service_with(vec![post(1, "t", "c")]);
        let posts = service
            .list(&ListQuery {
                page: Some("50".to_string()),
                ..ListQuery::default()
            })
            .unwrap();
        assert!(posts.is_empty());
    }

    #[test]
    fn list_rejects_non_numeric_page_and_limit() {
        let service = service_with(Vec::new());

        let err = service
            .list(&ListQuery {
                page: Some("abc".to_string()),
                ..ListQuery::default()
            })
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid page value");

        let err = service
            .list(&ListQuery {
                limit: Some("ten".to_string()),
                ..ListQuery::default()
            })
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid limit value");
    }

    #[test]
    fn search_matches_title_or_content() {
        let service = service_with(vec![
            post(1, "rust tips", "memory safety"),
            post(2, "gardening", "growing foo at home"),
            post(3, "cooking", "pasta"),
        ]);

        // "foo" only appears in post 2's content; title query still matches
        // it through the OR.
        let results = service.search("foo", "foo").unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, 2);
    }

    #[test]
    fn search_is_case_insensitive() {
        let service = service_with(vec![post(1, "Rust Tips", "Memory Safety")]);
        let results = service.search("rust", "no-such-content").unwrap();
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn search_with_empty_queries_matches_everything() {
        let service = service_with(vec![post(1, "a", "b"), post(2, "c", "d")]);
        assert_eq!(service.search("", "").unwrap().len(), 2);
    }

    #[test]
    fn get_returns_post_or_not_found() {
        let service = service_with(vec![post(1, "a", "b")]);
        assert_eq!(service.get(1).unwrap().id, 1);
        assert_eq!(service.get(2).unwrap_err().to_string(), "Post not found");
    }

    #[test]
    fn update_applies_only_present_fields() {
        let service = service_with(vec![post(1, "old title", "old content")]);

        let updated = service
            .update(
                1,
                &PostUpdate {
                    title: Some("new title".to_string()),
                    content: None,
                },
            )
            .unwrap();

        assert_eq!(updated.title, "new title");
        assert_eq!(updated.content, "old content");
    }

    #[test]
    fn update_unknown_id_is_not_found() {
        let service = service_with(Vec::new());
        let err = service.update(9, &PostUpdate::default()).unwrap_err();
        assert_eq!(err.to_string(), "Post not found");
    }

    #[test]
    fn add_comment_appends_in_order() {
        let service = service_with(vec![post(1, "a", "b")]);

        service.add_comment(1, Some("first")).unwrap();
        let updated = service.add_comment(1, Some("second")).unwrap();

        assert_eq!(updated.comments, vec!["first", "second"]);
    }

    #[test]
    fn add_comment_requires_comment() {
        let service = service_with(vec![post(1, "a", "b")]);

        let err = service.add_comment(1, None).unwrap_err();
        assert_eq!(err.to_string(), "Comment is required");

        let err = service.add_comment(1, Some("")).unwrap_err();
        assert_eq!(err.to_string(), "Comment is required");
    }

    #[test]
    fn add_comment_checks_post_before_comment() {
        let service = service_with(Vec::new());
        let err = service.add_comment(1, None).unwrap_err();
        assert_eq!(err.to_string(), "Post not found");
    }

    #[test]
    fn delete_removes_exactly_one_post() {
        let store = Arc::new(MemoryPostStore::with_posts(vec![
            post(1, "a", "b"),
            post(2, "c", "d"),
        ]));
        let service = PostService::new(store.clone());

        service.delete(1).unwrap();

        let remaining = store.load().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, 2);
    }

    #[test]
    fn delete_unknown_id_leaves_storage_unchanged() {
        let store = Arc::new(MemoryPostStore::with_posts(vec![post(1, "a", "b")]));
        let service = PostService::new(store.clone());

        let err = service.delete(42).unwrap_err();
        assert_eq!(err.to_string(), "Post not found");
        assert_eq!(store.load().unwrap().len(), 1);
    }

    #[test]
    fn list_is_idempotent_against_unchanged_storage() {
        let service = service_with(vec![post(1, "b", "x"), post(2, "a", "y")]);
        let query = list_query("title", "asc");
        assert_eq!(service.list(&query).unwrap(), service.list(&query).unwrap());
    }
}
