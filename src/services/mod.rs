pub mod library;
pub mod rating;
pub mod recommendations;

pub use library::LibraryService;
pub use rating::{base_rating, book_rating};
pub use recommendations::{RecommendationEngine, MAX_RECOMMENDATIONS};
