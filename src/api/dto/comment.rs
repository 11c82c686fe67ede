//! DTOs for entry comments.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::Comment;

/// Request body of `POST /api/entries/{id}/comments`.
///
/// Both fields are optional; a comment may be anonymous or empty.
#[derive(Debug, Deserialize, Validate)]
pub struct NewCommentRequest {
    #[validate(length(max = 100, message = "Author must be at most 100 characters"))]
    pub author: Option<String>,

    #[validate(length(max = 10000, message = "Comment must be at most 10000 characters"))]
    pub body: Option<String>,
}

/// A comment as shown under an entry.
#[derive(Debug, Serialize)]
pub struct CommentItem {
    pub author: Option<String>,
    pub body: Option<String>,
    pub date: DateTime<Utc>,
}

impl From<Comment> for CommentItem {
    fn from(comment: Comment) -> Self {
        Self {
            author: comment.author,
            body: comment.body,
            date: comment.date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_comment_is_valid() {
        let request: NewCommentRequest = serde_json::from_str("{}").unwrap();
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_long_author_is_rejected() {
        let request = NewCommentRequest {
            author: Some("a".repeat(101)),
            body: None,
        };
        assert!(request.validate().is_err());
    }
}
