//! Core library for Booktrack, a personal book cataloging app.
//!
//! Book data comes from the public bukuacak catalog; everything the user
//! owns (favorites, reviews, activity) lives in local JSON storage under
//! stable per-collection keys. Recommendations are assembled on demand
//! from the activity log.
//!
//! [`LibraryService`] is the intended entry point: it wires the catalog
//! client, the repositories, and the recommendation engine together and
//! keeps the activity log consistent across user actions.

pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod storage;

pub use catalog::{BookCatalog, BukuacakCatalog};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use services::{LibraryService, RecommendationEngine};
pub use storage::{JsonFileBackend, MemoryBackend, StorageBackend};
