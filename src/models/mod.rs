/// Data structures for posts and request bodies
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A blog post record.
///
/// `id` is system-assigned and unique across the collection. `title` and
/// `content` default to empty text when absent in storage so sorting can
/// treat a missing field as empty. `comments` always serializes as an array,
/// even when it was absent in the stored record. Any other fields a caller
/// supplied are carried opaquely in `extra` and persisted verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub comments: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Request body for creating a post.
///
/// Unknown fields land in `extra` and pass through to storage; a client
/// supplied `id` is discarded by the mutation engine.
#[derive(Debug, Deserialize)]
pub struct NewPost {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub comments: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Request body for partially updating a post.
///
/// Only fields present in the body are applied; unrecognized fields are
/// ignored.
#[derive(Debug, Default, Deserialize)]
pub struct PostUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_without_comments_deserializes_to_empty_array() {
        let post: Post =
            serde_json::from_str(r#"{"id":1,"title":"A","content":"B"}"#).unwrap();
        assert!(post.comments.is_empty());
    }

    #[test]
    fn post_always_serializes_comments() {
        let post: Post =
            serde_json::from_str(r#"{"id":1,"title":"A","content":"B"}"#).unwrap();
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["comments"], serde_json::json!([]));
    }

    #[test]
    fn unknown_fields_round_trip_through_extra() {
        let raw = r#"{"id":7,"title":"A","content":"B","comments":[],"author":"kim"}"#;
        let post: Post = serde_json::from_str(raw).unwrap();
        assert_eq!(post.extra["author"], serde_json::json!("kim"));

        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["author"], serde_json::json!("kim"));
    }

    #[test]
    fn post_update_ignores_unrecognized_fields() {
        let update: PostUpdate =
            serde_json::from_str(r#"{"title":"new","id":99,"bogus":true}"#).unwrap();
        assert_eq!(update.title.as_deref(), Some("new"));
        assert!(update.content.is_none());
    }

    #[test]
    fn post_update_treats_null_as_absent() {
        let update: PostUpdate = serde_json::from_str(r#"{"title":null}"#).unwrap();
        assert!(update.title.is_none());
    }
}
