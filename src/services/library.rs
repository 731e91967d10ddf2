use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::{
    catalog::{BookCatalog, BukuacakCatalog},
    config::Config,
    error::AppResult,
    models::{ActivityKind, Book, BookPage, FavoriteBook, ReviewDraft, UserReview},
    services::{rating, RecommendationEngine},
    storage::{ActivityLog, FavoritesStore, JsonFileBackend, ReviewStore, StorageBackend},
};

/// Facade over the whole library: the remote catalog, the three local
/// repositories, and the recommendation engine. User-facing actions go
/// through here so the activity log stays consistent with what actually
/// happened.
pub struct LibraryService {
    catalog: Arc<dyn BookCatalog>,
    engine: RecommendationEngine,
    favorites: FavoritesStore,
    reviews: ReviewStore,
    activity: ActivityLog,
}

impl LibraryService {
    /// Wires the real catalog client and file-backed storage.
    pub fn from_config(config: &Config) -> Self {
        let catalog: Arc<dyn BookCatalog> = Arc::new(BukuacakCatalog::from_config(config));
        let backend: Arc<dyn StorageBackend> =
            Arc::new(JsonFileBackend::new(config.data_dir.clone()));
        Self::with_parts(catalog, backend)
    }

    /// Assembles the service from injected parts.
    pub fn with_parts(catalog: Arc<dyn BookCatalog>, backend: Arc<dyn StorageBackend>) -> Self {
        let favorites = FavoritesStore::new(Arc::clone(&backend));
        let reviews = ReviewStore::new(Arc::clone(&backend));
        let activity = ActivityLog::new(backend);
        let engine = RecommendationEngine::new(Arc::clone(&catalog));

        tracing::info!(
            favorites = favorites.all().len(),
            reviews = reviews.all().len(),
            activity = activity.len(),
            "Library loaded"
        );

        Self {
            catalog,
            engine,
            favorites,
            reviews,
            activity,
        }
    }

    /// Fetches a book for display and records the view.
    pub async fn view_book(&mut self, id: &str) -> AppResult<Book> {
        let book = self.catalog.book_by_id(id).await?;
        self.activity.track(id, ActivityKind::View, Some(&book));
        Ok(book)
    }

    /// Flips a book's favorite membership, snapshotting it with its current
    /// synthesized rating on add. Only adding records activity; returns
    /// `true` when the book is a favorite afterwards.
    pub fn toggle_favorite(&mut self, book: &Book) -> bool {
        let rating = rating::book_rating(book, self.reviews.all());
        let favorite = FavoriteBook::from_book(book, rating);

        let added = self.favorites.toggle(favorite);
        if added {
            self.activity
                .track(book.id.as_str(), ActivityKind::Favorite, Some(book));
        }
        added
    }

    /// Removes a favorite without touching the activity log.
    pub fn remove_favorite(&mut self, book_id: &str) -> bool {
        self.favorites.remove(book_id)
    }

    /// Validates and stores a review for the book, then records it.
    pub fn add_review(&mut self, book: &Book, draft: ReviewDraft) -> AppResult<UserReview> {
        let review = self.reviews.add(&book.id, draft)?;
        self.activity
            .track(book.id.as_str(), ActivityKind::Review, Some(book));
        Ok(review)
    }

    /// Deletes a review by id without touching the activity log.
    pub fn delete_review(&mut self, review_id: &str) -> bool {
        self.reviews.delete(review_id)
    }

    /// The rating shown for a book right now, reviews included.
    pub fn rating_for(&self, book: &Book) -> f64 {
        rating::book_rating(book, self.reviews.all())
    }

    /// Recommendations from the current activity log.
    pub async fn recommendations(&self) -> AppResult<Vec<Book>> {
        self.engine.recommend(self.activity.all()).await
    }

    /// Recommendations, abortable through `cancel`.
    pub async fn recommendations_cancellable(
        &self,
        cancel: &CancellationToken,
    ) -> AppResult<Vec<Book>> {
        self.engine
            .recommend_cancellable(self.activity.all(), cancel)
            .await
    }

    /// Browse the catalog listing. Browsing is not tracked; only opening a
    /// book is.
    pub async fn latest_books(&self, page: u32) -> AppResult<BookPage> {
        self.catalog.latest_books(page).await
    }

    /// Search the catalog. Not tracked, same as browsing.
    pub async fn search_books(&self, keyword: &str, page: u32) -> AppResult<BookPage> {
        self.catalog.search_books(keyword, page).await
    }

    pub fn favorites(&self) -> &FavoritesStore {
        &self.favorites
    }

    pub fn reviews(&self) -> &ReviewStore {
        &self.reviews
    }

    pub fn activity(&self) -> &ActivityLog {
        &self.activity
    }
}
