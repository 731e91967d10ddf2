pub mod activity;
pub mod book;
pub mod favorite;
pub mod review;

pub use activity::{ActivityKind, UserActivity};
pub use book::{Author, Book, BookDetails, BookPage, BuyLink, Category, Pagination, Tag};
pub use favorite::FavoriteBook;
pub use review::{ReviewDraft, UserReview};
