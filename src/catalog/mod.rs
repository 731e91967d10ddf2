/// Remote catalog abstraction
///
/// The catalog is the sole source of book records; everything local
/// (favorites, reviews, activity) only references catalog ids. Abstracting
/// the catalog behind a trait keeps the recommendation engine and the
/// library facade testable without network access.
use crate::{
    error::AppResult,
    models::{Book, BookPage},
};

pub mod bukuacak;

pub use bukuacak::BukuacakCatalog;

/// Trait for remote book catalogs
///
/// Listing and search both return one page at a time together with the
/// catalog's pagination envelope. Page numbers are 1-based.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait BookCatalog: Send + Sync {
    /// Fetch a page of the default catalog listing, newest first.
    async fn latest_books(&self, page: u32) -> AppResult<BookPage>;

    /// Search the catalog by keyword.
    async fn search_books(&self, keyword: &str, page: u32) -> AppResult<BookPage>;

    /// Fetch a single book by its catalog id.
    async fn book_by_id(&self, id: &str) -> AppResult<Book>;
}
