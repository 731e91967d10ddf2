use std::sync::Arc;

use crate::error::AppResult;
use crate::models::{ReviewDraft, UserReview};

use super::{load_or_default, persist, StorageBackend, StorageKey};

/// Repository for user-written reviews. Reviews are append-and-delete only;
/// there is no editing.
pub struct ReviewStore {
    backend: Arc<dyn StorageBackend>,
    reviews: Vec<UserReview>,
}

impl ReviewStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        let reviews = load_or_default(backend.as_ref(), StorageKey::Reviews);
        Self { backend, reviews }
    }

    /// Every stored review, oldest first.
    pub fn all(&self) -> &[UserReview] {
        &self.reviews
    }

    /// Reviews for one book, oldest first.
    pub fn for_book(&self, book_id: &str) -> Vec<UserReview> {
        self.reviews
            .iter()
            .filter(|r| r.book_id == book_id)
            .cloned()
            .collect()
    }

    /// Validates and stores a new review. An invalid draft leaves the store
    /// untouched.
    pub fn add(&mut self, book_id: &str, draft: ReviewDraft) -> AppResult<UserReview> {
        draft.validate()?;
        let review = draft.into_review(book_id);
        tracing::info!(book_id = %book_id, rating = review.rating, "Review added");
        self.reviews.push(review.clone());
        self.persist();
        Ok(review)
    }

    /// Deletes a review by its id; unknown ids are a no-op. Returns whether
    /// anything was deleted.
    pub fn delete(&mut self, review_id: &str) -> bool {
        let before = self.reviews.len();
        self.reviews.retain(|r| r.id != review_id);
        if self.reviews.len() == before {
            return false;
        }
        tracing::info!(review_id = %review_id, "Review deleted");
        self.persist();
        true
    }

    fn persist(&self) {
        persist(self.backend.as_ref(), StorageKey::Reviews, &self.reviews);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::storage::MemoryBackend;

    fn store() -> ReviewStore {
        ReviewStore::new(Arc::new(MemoryBackend::new()))
    }

    fn draft(name: &str, rating: u8, comment: &str) -> ReviewDraft {
        ReviewDraft {
            user_name: name.to_string(),
            rating,
            comment: comment.to_string(),
        }
    }

    #[test]
    fn test_add_stores_validated_review() {
        let mut store = store();
        let review = store.add("b-1", draft("Sari", 5, "Bagus.")).unwrap();

        assert_eq!(review.book_id, "b-1");
        assert_eq!(store.all().len(), 1);
        assert_eq!(store.all()[0].id, review.id);
    }

    #[test]
    fn test_invalid_draft_is_rejected_and_not_stored() {
        let mut store = store();
        let err = store.add("b-1", draft("", 5, "Bagus.")).unwrap_err();

        assert!(matches!(err, AppError::InvalidInput(_)));
        assert!(store.all().is_empty());
    }

    #[test]
    fn test_for_book_filters_by_id() {
        let mut store = store();
        store.add("b-1", draft("Sari", 5, "Bagus.")).unwrap();
        store.add("b-2", draft("Adi", 3, "Lumayan.")).unwrap();
        store.add("b-1", draft("Rina", 4, "Suka.")).unwrap();

        let for_b1 = store.for_book("b-1");
        assert_eq!(for_b1.len(), 2);
        assert!(for_b1.iter().all(|r| r.book_id == "b-1"));
        assert_eq!(for_b1[0].user_name, "Sari");
        assert_eq!(for_b1[1].user_name, "Rina");

        assert!(store.for_book("b-3").is_empty());
    }

    #[test]
    fn test_delete_by_review_id() {
        let mut store = store();
        let review = store.add("b-1", draft("Sari", 5, "Bagus.")).unwrap();
        store.add("b-1", draft("Adi", 2, "Kurang.")).unwrap();

        assert!(store.delete(&review.id));
        assert_eq!(store.all().len(), 1);
        assert_eq!(store.all()[0].user_name, "Adi");

        assert!(!store.delete(&review.id));
    }

    #[test]
    fn test_reviews_ids_are_unique() {
        let mut store = store();
        let first = store.add("b-1", draft("Sari", 5, "Bagus.")).unwrap();
        let second = store.add("b-1", draft("Sari", 5, "Bagus.")).unwrap();
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_survives_reload_through_shared_backend() {
        let backend = Arc::new(MemoryBackend::new());

        let mut store = ReviewStore::new(backend.clone());
        store.add("b-1", draft("Sari", 4, "Bagus.")).unwrap();
        drop(store);

        let reloaded = ReviewStore::new(backend);
        assert_eq!(reloaded.all().len(), 1);
        assert_eq!(reloaded.all()[0].user_name, "Sari");
    }
}
