/// Synthesized book ratings
///
/// The catalog exposes no rating data, so every book gets a deterministic
/// pseudo-rating derived from its id, blended with the user's own reviews
/// once any exist.
use crate::models::{Book, UserReview};

/// Weight of the user's average review rating in the blend.
const USER_WEIGHT: f64 = 0.7;
/// Weight of the synthetic base rating in the blend.
const BASE_WEIGHT: f64 = 0.3;

/// Deterministic base rating in [4.0, 5.0] derived from a book id.
///
/// The accumulator is `hash * 31 + unit` over the id's UTF-16 code units
/// under wrapping 32-bit signed arithmetic. Stored favorites carry ratings
/// produced by this exact function; changing any part of it silently
/// re-rates every book.
pub fn base_rating(id: &str) -> f64 {
    let mut hash: i32 = 0;
    for unit in id.encode_utf16() {
        hash = hash.wrapping_mul(31).wrapping_add(i32::from(unit));
    }
    f64::from((hash % 11).abs()) / 10.0 + 4.0
}

/// Rating shown for a book: the average of the user's reviews of it,
/// blended 70/30 with the synthetic base. With no reviews the base stands
/// alone. Reviews for other books are ignored.
pub fn book_rating(book: &Book, reviews: &[UserReview]) -> f64 {
    let base = base_rating(&book.id);

    let relevant: Vec<&UserReview> = reviews.iter().filter(|r| r.book_id == book.id).collect();
    if relevant.is_empty() {
        return base;
    }

    let total: f64 = relevant.iter().map(|r| f64::from(r.rating)).sum();
    let average = total / relevant.len() as f64;

    average * USER_WEIGHT + base * BASE_WEIGHT
}
