use serde::{Deserialize, Serialize};

/// Author as served by the catalog: a display name plus a catalog URL.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Author {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

/// Category attached to a book. Both fields are nullable upstream;
/// uncategorized books carry `name: null`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub name: Option<String>,
    pub url: Option<String>,
}

/// Free-form publication details. The catalog serves every field as a
/// display string ("256 pages", "February 14, 2023", "Rp 98.000"), so the
/// structured accessors below do the parsing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BookDetails {
    pub no_gm: String,
    pub isbn: String,
    pub price: String,
    pub total_pages: String,
    pub size: String,
    pub published_date: String,
    pub format: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tag {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BuyLink {
    pub store: String,
    pub url: String,
}

/// A single book record as served by the remote catalog. Read-only: the
/// catalog owns these records and this crate never writes them back.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Book {
    #[serde(rename = "_id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub cover_image: String,
    pub author: Author,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub details: BookDetails,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub buy_links: Vec<BuyLink>,
    #[serde(default)]
    pub publisher: String,
}

impl Book {
    /// Category name with the fallback used throughout the application for
    /// uncategorized books.
    pub fn genre(&self) -> &str {
        self.category
            .name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or("Unknown")
    }
}

impl BookDetails {
    /// Page count parsed from the leading digits of `total_pages`
    /// ("256 pages" -> 256).
    pub fn page_count(&self) -> Option<u32> {
        let digits: String = self
            .total_pages
            .trim()
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        digits.parse().ok()
    }

    /// Publication year: the first run of exactly four digits in the
    /// free-form `published_date` ("February 14, 2023" -> 2023).
    pub fn published_year(&self) -> Option<i32> {
        let mut run = String::new();
        for c in self.published_date.chars().chain(std::iter::once(' ')) {
            if c.is_ascii_digit() {
                run.push(c);
            } else {
                if run.len() == 4 {
                    return run.parse().ok();
                }
                run.clear();
            }
        }
        None
    }
}

/// Pagination envelope returned alongside every catalog listing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub current_page: u32,
    pub total_pages: u32,
    pub total_items: u64,
    pub items_per_page: u32,
    pub has_next_page: bool,
    pub has_prev_page: bool,
}

/// One page of catalog results: the listing and search endpoints both
/// return this shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookPage {
    pub books: Vec<Book>,
    pub pagination: Pagination,
}
