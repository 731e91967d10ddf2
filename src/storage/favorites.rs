use std::cmp::Ordering;
use std::sync::Arc;

use crate::models::FavoriteBook;

use super::{load_or_default, persist, StorageBackend, StorageKey};

/// Sort orders for the favorites shelf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FavoriteSort {
    #[default]
    Title,
    Author,
    Rating,
    Genre,
}

/// Repository for the user's favorite books. Loads eagerly on construction;
/// every mutation rewrites the backing collection in full.
pub struct FavoritesStore {
    backend: Arc<dyn StorageBackend>,
    favorites: Vec<FavoriteBook>,
}

impl FavoritesStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        let favorites = load_or_default(backend.as_ref(), StorageKey::Favorites);
        Self { backend, favorites }
    }

    /// The shelf in the order books were favorited.
    pub fn all(&self) -> &[FavoriteBook] {
        &self.favorites
    }

    pub fn is_favorite(&self, book_id: &str) -> bool {
        self.favorites.iter().any(|f| f.id == book_id)
    }

    /// Adds a book to the shelf. Adding an already-favorited book is a
    /// no-op; returns whether the shelf changed.
    pub fn add(&mut self, favorite: FavoriteBook) -> bool {
        if self.is_favorite(&favorite.id) {
            return false;
        }
        tracing::info!(title = %favorite.title, "Added to favorites");
        self.favorites.push(favorite);
        self.persist();
        true
    }

    /// Removes a book by id; returns whether anything was removed.
    pub fn remove(&mut self, book_id: &str) -> bool {
        let before = self.favorites.len();
        self.favorites.retain(|f| f.id != book_id);
        if self.favorites.len() == before {
            return false;
        }
        tracing::info!(book_id = %book_id, "Removed from favorites");
        self.persist();
        true
    }

    /// Flips membership; returns `true` when the book is a favorite
    /// afterwards.
    pub fn toggle(&mut self, favorite: FavoriteBook) -> bool {
        if self.is_favorite(&favorite.id) {
            self.remove(&favorite.id);
            false
        } else {
            self.add(favorite);
            true
        }
    }

    /// Distinct genres across the shelf, in first-occurrence order.
    pub fn genres(&self) -> Vec<String> {
        let mut genres: Vec<String> = Vec::new();
        for favorite in &self.favorites {
            if !genres.iter().any(|g| g == &favorite.genre) {
                genres.push(favorite.genre.clone());
            }
        }
        genres
    }

    /// Shelf view: case-insensitive substring match on title or author,
    /// optional exact genre filter, sorted per `sort`. Rating sorts highest
    /// first, the other keys ascend.
    pub fn search(
        &self,
        query: &str,
        genre: Option<&str>,
        sort: FavoriteSort,
    ) -> Vec<FavoriteBook> {
        let query = query.to_lowercase();
        let mut matches: Vec<FavoriteBook> = self
            .favorites
            .iter()
            .filter(|f| {
                let matches_search = f.title.to_lowercase().contains(&query)
                    || f.author.name.to_lowercase().contains(&query);
                let matches_genre = genre.map_or(true, |g| f.genre == g);
                matches_search && matches_genre
            })
            .cloned()
            .collect();

        matches.sort_by(|a, b| match sort {
            FavoriteSort::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            FavoriteSort::Author => a
                .author
                .name
                .to_lowercase()
                .cmp(&b.author.name.to_lowercase()),
            FavoriteSort::Rating => b.rating.partial_cmp(&a.rating).unwrap_or(Ordering::Equal),
            FavoriteSort::Genre => a.genre.to_lowercase().cmp(&b.genre.to_lowercase()),
        });
        matches
    }

    fn persist(&self) {
        persist(
            self.backend.as_ref(),
            StorageKey::Favorites,
            &self.favorites,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::models::book::Author;
    use crate::storage::MemoryBackend;

    struct BrokenBackend;

    impl StorageBackend for BrokenBackend {
        fn read(&self, _key: StorageKey) -> crate::error::AppResult<Option<String>> {
            Ok(None)
        }

        fn write(&self, _key: StorageKey, _payload: &str) -> crate::error::AppResult<()> {
            Err(AppError::Storage("disk full".to_string()))
        }
    }

    fn favorite(id: &str, title: &str, author: &str, genre: &str, rating: f64) -> FavoriteBook {
        FavoriteBook {
            id: id.to_string(),
            title: title.to_string(),
            author: Author {
                name: author.to_string(),
                url: String::new(),
            },
            rating,
            genre: genre.to_string(),
            cover: String::new(),
            description: String::new(),
            published_year: None,
            pages: None,
            language: None,
            isbn: None,
            publisher: None,
            summary: None,
        }
    }

    fn store() -> FavoritesStore {
        FavoritesStore::new(Arc::new(MemoryBackend::new()))
    }

    #[test]
    fn test_add_is_idempotent_by_id() {
        let mut store = store();
        assert!(store.add(favorite("b-1", "Laskar Pelangi", "Andrea Hirata", "Fiction", 4.5)));
        assert!(!store.add(favorite("b-1", "Laskar Pelangi", "Andrea Hirata", "Fiction", 4.5)));
        assert_eq!(store.all().len(), 1);
    }

    #[test]
    fn test_remove_absent_is_noop() {
        let mut store = store();
        assert!(!store.remove("missing"));
        store.add(favorite("b-1", "Pulang", "Tere Liye", "Fiction", 4.2));
        assert!(store.remove("b-1"));
        assert!(store.all().is_empty());
    }

    #[test]
    fn test_toggle_cycles_membership() {
        let mut store = store();
        let fav = favorite("b-1", "Pulang", "Tere Liye", "Fiction", 4.2);

        assert!(store.toggle(fav.clone()));
        assert!(store.is_favorite("b-1"));
        assert!(!store.toggle(fav));
        assert!(!store.is_favorite("b-1"));
    }

    #[test]
    fn test_write_failure_does_not_surface_from_mutations() {
        let mut store = FavoritesStore::new(Arc::new(BrokenBackend));

        // The mutation itself still succeeds; only persistence is lost
        assert!(store.add(favorite("b-1", "Pulang", "Tere Liye", "Fiction", 4.2)));
        assert!(store.is_favorite("b-1"));
        assert!(store.remove("b-1"));
        assert!(store.all().is_empty());
    }

    #[test]
    fn test_survives_reload_through_shared_backend() {
        let backend = Arc::new(MemoryBackend::new());

        let mut store = FavoritesStore::new(backend.clone());
        store.add(favorite("b-1", "Pulang", "Tere Liye", "Fiction", 4.2));
        drop(store);

        let reloaded = FavoritesStore::new(backend);
        assert_eq!(reloaded.all().len(), 1);
        assert_eq!(reloaded.all()[0].title, "Pulang");
    }

    #[test]
    fn test_genres_distinct_in_first_occurrence_order() {
        let mut store = store();
        store.add(favorite("b-1", "A", "x", "Fiction", 4.0));
        store.add(favorite("b-2", "B", "x", "Self Improvement", 4.0));
        store.add(favorite("b-3", "C", "x", "Fiction", 4.0));

        assert_eq!(store.genres(), vec!["Fiction", "Self Improvement"]);
    }

    #[test]
    fn test_search_matches_title_or_author_case_insensitively() {
        let mut store = store();
        store.add(favorite("b-1", "Bumi Manusia", "Pramoedya Ananta Toer", "Fiction", 4.1));
        store.add(favorite("b-2", "Filosofi Teras", "Henry Manampiring", "Self Improvement", 4.8));

        let by_title = store.search("bumi", None, FavoriteSort::Title);
        assert_eq!(by_title.len(), 1);
        assert_eq!(by_title[0].id, "b-1");

        let by_author = store.search("MANAMPIRING", None, FavoriteSort::Title);
        assert_eq!(by_author.len(), 1);
        assert_eq!(by_author[0].id, "b-2");

        // Empty query matches everything
        assert_eq!(store.search("", None, FavoriteSort::Title).len(), 2);
    }

    #[test]
    fn test_search_genre_filter_is_exact() {
        let mut store = store();
        store.add(favorite("b-1", "A", "x", "Fiction", 4.0));
        store.add(favorite("b-2", "B", "y", "Self Improvement", 4.5));

        let filtered = store.search("", Some("Fiction"), FavoriteSort::Title);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "b-1");

        assert!(store.search("", Some("fiction"), FavoriteSort::Title).is_empty());
    }

    #[test]
    fn test_search_sort_orders() {
        let mut store = store();
        store.add(favorite("b-1", "Zarah", "Dee Lestari", "Fiction", 4.1));
        store.add(favorite("b-2", "Aroma Karsa", "Dee Lestari", "Fiction", 4.9));
        store.add(favorite("b-3", "Madre", "Dee Lestari", "Anthology", 4.5));

        let by_title: Vec<_> = store
            .search("", None, FavoriteSort::Title)
            .into_iter()
            .map(|f| f.id)
            .collect();
        assert_eq!(by_title, vec!["b-2", "b-3", "b-1"]);

        let by_rating: Vec<_> = store
            .search("", None, FavoriteSort::Rating)
            .into_iter()
            .map(|f| f.id)
            .collect();
        assert_eq!(by_rating, vec!["b-2", "b-3", "b-1"]);

        let by_genre: Vec<_> = store
            .search("", None, FavoriteSort::Genre)
            .into_iter()
            .map(|f| f.id)
            .collect();
        assert_eq!(by_genre, vec!["b-3", "b-1", "b-2"]);
    }
}
