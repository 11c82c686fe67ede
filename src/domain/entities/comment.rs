//! Comment value object embedded in entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A reader comment stored inline within its entry.
///
/// Comments have no identity of their own: they are created, persisted and
/// destroyed together with the owning [`super::Entry`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub author: Option<String>,
    pub body: Option<String>,
    #[serde(default = "Utc::now")]
    pub date: DateTime<Utc>,
}

impl Comment {
    /// Creates a comment dated now.
    pub fn new(author: Option<String>, body: Option<String>) -> Self {
        Self {
            author,
            body,
            date: Utc::now(),
        }
    }
}
