use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::book::Book;

/// What the user did with a book.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ActivityKind {
    View,
    Favorite,
    StatusChange,
    Review,
}

/// One entry in the user's activity log. Genre and author are denormalized
/// from the book at record time so the recommendation engine can work from
/// the log alone, without refetching books.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserActivity {
    pub book_id: String,
    /// Unix timestamp in milliseconds.
    pub timestamp: i64,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_name: Option<String>,
}

impl UserActivity {
    /// Records an activity happening now. When the full book record is at
    /// hand its genre and author are carried along verbatim; a book with a
    /// null category yields no genre here.
    pub fn now(book_id: impl Into<String>, kind: ActivityKind, book: Option<&Book>) -> Self {
        Self {
            book_id: book_id.into(),
            timestamp: Utc::now().timestamp_millis(),
            kind,
            genre: book.and_then(|b| b.category.name.clone()),
            author_name: book.map(|b| b.author.name.clone()),
        }
    }
}
