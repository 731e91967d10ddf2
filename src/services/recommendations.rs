use std::collections::HashSet;
use std::future::Future;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::{
    catalog::BookCatalog,
    error::{AppError, AppResult},
    models::{Book, UserActivity},
};

/// Upper bound on recommendations per assembly.
pub const MAX_RECOMMENDATIONS: usize = 4;

/// Generates personalized book recommendations
///
/// Works entirely from the activity log: the genres and authors the user
/// has touched seed catalog searches, and everything the user has already
/// interacted with is excluded. With no activity at all, the newest books
/// in the catalog stand in.
///
/// Queries run strictly sequentially and the whole assembly either
/// completes or fails; a half-built list is never returned.
pub struct RecommendationEngine {
    catalog: Arc<dyn BookCatalog>,
}

impl RecommendationEngine {
    pub fn new(catalog: Arc<dyn BookCatalog>) -> Self {
        Self { catalog }
    }

    /// Assembles recommendations without external cancellation.
    pub async fn recommend(&self, activity: &[UserActivity]) -> AppResult<Vec<Book>> {
        self.recommend_cancellable(activity, &CancellationToken::new())
            .await
    }

    /// Assembles up to [`MAX_RECOMMENDATIONS`] books. Every catalog call is
    /// raced against `cancel`; cancellation surfaces as
    /// [`AppError::Cancelled`] and discards partial progress. Returning
    /// fewer than the maximum is not an error.
    pub async fn recommend_cancellable(
        &self,
        activity: &[UserActivity],
        cancel: &CancellationToken,
    ) -> AppResult<Vec<Book>> {
        if activity.is_empty() {
            let page = unless_cancelled(cancel, || self.catalog.latest_books(1)).await?;
            let recommended: Vec<Book> =
                page.books.into_iter().take(MAX_RECOMMENDATIONS).collect();

            tracing::info!(
                count = recommended.len(),
                "Recommended from default listing, no activity yet"
            );
            return Ok(recommended);
        }

        let seen_ids: HashSet<&str> = activity.iter().map(|a| a.book_id.as_str()).collect();
        let genres = distinct_non_empty(activity.iter().map(|a| a.genre.as_deref()));
        let authors = distinct_non_empty(activity.iter().map(|a| a.author_name.as_deref()));

        let mut recommended: Vec<Book> = Vec::new();
        let mut picked_ids: HashSet<String> = HashSet::new();

        for genre in &genres {
            if recommended.len() >= MAX_RECOMMENDATIONS {
                break;
            }
            let page = unless_cancelled(cancel, || self.catalog.search_books(genre, 1)).await?;
            collect_candidates(&mut recommended, &mut picked_ids, &seen_ids, page.books);
        }

        if recommended.len() < MAX_RECOMMENDATIONS {
            for author in &authors {
                if recommended.len() >= MAX_RECOMMENDATIONS {
                    break;
                }
                let page =
                    unless_cancelled(cancel, || self.catalog.search_books(author, 1)).await?;
                collect_candidates(&mut recommended, &mut picked_ids, &seen_ids, page.books);
            }
        }

        // Still short: pad with the newest books the user hasn't touched
        if recommended.len() < MAX_RECOMMENDATIONS {
            let page = unless_cancelled(cancel, || self.catalog.latest_books(1)).await?;
            collect_candidates(&mut recommended, &mut picked_ids, &seen_ids, page.books);
        }

        tracing::info!(
            count = recommended.len(),
            genres = genres.len(),
            authors = authors.len(),
            "Recommendations assembled"
        );

        Ok(recommended)
    }
}

/// Runs one catalog call raced against the token. The pre-check keeps an
/// already-cancelled token from issuing any request at all.
async fn unless_cancelled<F, Fut, T>(cancel: &CancellationToken, fetch: F) -> AppResult<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = AppResult<T>>,
{
    if cancel.is_cancelled() {
        return Err(AppError::Cancelled);
    }

    tokio::select! {
        biased;
        _ = cancel.cancelled() => Err(AppError::Cancelled),
        result = fetch() => result,
    }
}

/// Distinct values in first-occurrence order, skipping blanks. Blank genre
/// and author values occur for books with a null category.
fn distinct_non_empty<'a>(values: impl Iterator<Item = Option<&'a str>>) -> Vec<String> {
    let mut distinct: Vec<String> = Vec::new();
    for value in values.flatten() {
        if value.is_empty() {
            continue;
        }
        if !distinct.iter().any(|v| v == value) {
            distinct.push(value.to_string());
        }
    }
    distinct
}

/// Moves acceptable candidates into the recommendation list, stopping at
/// the cap. Books the user has touched and books already picked by an
/// earlier query are skipped.
fn collect_candidates(
    recommended: &mut Vec<Book>,
    picked_ids: &mut HashSet<String>,
    seen_ids: &HashSet<&str>,
    books: Vec<Book>,
) {
    for book in books {
        if recommended.len() >= MAX_RECOMMENDATIONS {
            break;
        }
        if seen_ids.contains(book.id.as_str()) || picked_ids.contains(&book.id) {
            continue;
        }
        picked_ids.insert(book.id.clone());
        recommended.push(book);
    }
}
