use serde::{Deserialize, Serialize};

use super::book::{Author, Book};

/// A book pinned to the user's personal shelf. Denormalized from [`Book`]
/// at the moment it is favorited so the shelf stays renderable without
/// further catalog round trips.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteBook {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    pub author: Author,
    pub rating: f64,
    pub genre: String,
    pub cover: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pages: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
}

impl FavoriteBook {
    /// Snapshots a catalog book for the shelf. `rating` is the synthesized
    /// rating at the moment of favoriting.
    pub fn from_book(book: &Book, rating: f64) -> Self {
        let details = &book.details;
        Self {
            id: book.id.clone(),
            title: book.title.clone(),
            author: book.author.clone(),
            rating,
            genre: book.genre().to_string(),
            cover: book.cover_image.clone(),
            description: book.summary.clone(),
            published_year: details.published_year(),
            pages: details.page_count(),
            // The catalog is Indonesian-language only and does not expose
            // a language field.
            language: Some("Indonesian".to_string()),
            isbn: (!details.isbn.is_empty()).then(|| details.isbn.clone()),
            publisher: (!book.publisher.is_empty()).then(|| book.publisher.clone()),
            summary: Some(book.summary.clone()),
        }
    }
}
