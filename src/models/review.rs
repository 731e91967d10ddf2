use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// A review the user has written for a book. Stored locally; the remote
/// catalog has no notion of reviews.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserReview {
    pub id: String,
    pub book_id: String,
    pub user_name: String,
    /// 1-5 stars.
    pub rating: u8,
    pub comment: String,
    /// Calendar date of submission, serialized as YYYY-MM-DD.
    pub date: NaiveDate,
}

/// User-submitted review input, prior to validation and persistence.
#[derive(Debug, Clone, Default)]
pub struct ReviewDraft {
    pub user_name: String,
    pub rating: u8,
    pub comment: String,
}

impl ReviewDraft {
    /// Validates the draft, reporting the first failing field. Field order
    /// matches the submission form: name, then rating, then comment.
    pub fn validate(&self) -> AppResult<()> {
        if self.user_name.trim().is_empty() {
            return Err(AppError::InvalidInput("Name is required.".to_string()));
        }
        if self.rating == 0 {
            return Err(AppError::InvalidInput("Rating is required.".to_string()));
        }
        if self.rating > 5 {
            return Err(AppError::InvalidInput(
                "Rating must be between 1 and 5.".to_string(),
            ));
        }
        if self.comment.trim().is_empty() {
            return Err(AppError::InvalidInput("Comment is required.".to_string()));
        }
        Ok(())
    }

    /// Finalizes the draft into a stored review: trims free-text fields and
    /// stamps a fresh id and today's date.
    pub fn into_review(self, book_id: impl Into<String>) -> UserReview {
        UserReview {
            id: Uuid::new_v4().to_string(),
            book_id: book_id.into(),
            user_name: self.user_name.trim().to_string(),
            rating: self.rating,
            comment: self.comment.trim().to_string(),
            date: Utc::now().date_naive(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ReviewDraft {
        ReviewDraft {
            user_name: "Sari".to_string(),
            rating: 5,
            comment: "Luar biasa.".to_string(),
        }
    }

    #[test]
    fn test_valid_draft_passes() {
        assert!(draft().validate().is_ok());
    }

    #[test]
    fn test_blank_name_rejected() {
        let mut d = draft();
        d.user_name = "   ".to_string();
        let err = d.validate().unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(ref msg) if msg == "Name is required."));
    }

    #[test]
    fn test_zero_rating_rejected() {
        let mut d = draft();
        d.rating = 0;
        let err = d.validate().unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(ref msg) if msg == "Rating is required."));
    }

    #[test]
    fn test_out_of_range_rating_rejected() {
        let mut d = draft();
        d.rating = 6;
        let err = d.validate().unwrap_err();
        assert!(
            matches!(err, AppError::InvalidInput(ref msg) if msg == "Rating must be between 1 and 5.")
        );
    }

    #[test]
    fn test_blank_comment_rejected() {
        let mut d = draft();
        d.comment = "\n\t".to_string();
        let err = d.validate().unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(ref msg) if msg == "Comment is required."));
    }

    #[test]
    fn test_name_checked_before_rating_and_comment() {
        // Everything invalid at once still reports the name first
        let d = ReviewDraft::default();
        let err = d.validate().unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(ref msg) if msg == "Name is required."));
    }

    #[test]
    fn test_into_review_trims_and_stamps() {
        let review = ReviewDraft {
            user_name: "  Sari ".to_string(),
            rating: 4,
            comment: " Bagus sekali.  ".to_string(),
        }
        .into_review("book-1");

        assert_eq!(review.book_id, "book-1");
        assert_eq!(review.user_name, "Sari");
        assert_eq!(review.comment, "Bagus sekali.");
        assert_eq!(review.rating, 4);
        assert!(!review.id.is_empty());
        assert_eq!(review.date, Utc::now().date_naive());
    }

    #[test]
    fn test_review_date_wire_format() {
        let review = UserReview {
            id: "r-1".to_string(),
            book_id: "b-1".to_string(),
            user_name: "Sari".to_string(),
            rating: 5,
            comment: "Bagus.".to_string(),
            date: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
        };

        let json = serde_json::to_value(&review).unwrap();
        assert_eq!(json["date"], "2024-03-09");
        assert_eq!(json["bookId"], "b-1");
        assert_eq!(json["userName"], "Sari");
    }
}
