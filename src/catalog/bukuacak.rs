/// bukuacak API catalog
///
/// Client for the public bukuacak book catalog. The API is read-only and
/// unauthenticated; all endpoints live under a versioned base URL.
///
/// API flow:
/// 1. Listing: /book?sort=desc&page=N&limit=M → one page, newest first
/// 2. Search:  /book?keyword=K&page=N&limit=M → same page shape, filtered
/// 3. Detail:  /book/{id} → a single book record
use reqwest::{Client as HttpClient, StatusCode};

use crate::{
    catalog::BookCatalog,
    config::Config,
    error::{AppError, AppResult},
    models::{Book, BookPage},
};

#[derive(Clone)]
pub struct BukuacakCatalog {
    http_client: HttpClient,
    api_url: String,
    items_per_page: u32,
}

impl BukuacakCatalog {
    pub fn new(api_url: String, items_per_page: u32) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_url,
            items_per_page,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.catalog_api_url.clone(), config.items_per_page)
    }
}

#[async_trait::async_trait]
impl BookCatalog for BukuacakCatalog {
    async fn latest_books(&self, page: u32) -> AppResult<BookPage> {
        let url = format!("{}/book", self.api_url);
        let page_param = page.to_string();
        let limit_param = self.items_per_page.to_string();

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("sort", "desc"),
                ("page", page_param.as_str()),
                ("limit", limit_param.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Catalog(format!(
                "Catalog API returned status {}: {}",
                status, body
            )));
        }

        let book_page: BookPage = response.json().await?;

        tracing::debug!(
            page = page,
            books = book_page.books.len(),
            "Fetched catalog page"
        );

        Ok(book_page)
    }

    async fn search_books(&self, keyword: &str, page: u32) -> AppResult<BookPage> {
        if keyword.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Search keyword cannot be empty".to_string(),
            ));
        }

        let url = format!("{}/book", self.api_url);
        let page_param = page.to_string();
        let limit_param = self.items_per_page.to_string();

        let response = self
            .http_client
            .get(&url)
            .query(&[
                ("keyword", keyword),
                ("page", page_param.as_str()),
                ("limit", limit_param.as_str()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Catalog(format!(
                "Catalog API returned status {}: {}",
                status, body
            )));
        }

        let book_page: BookPage = response.json().await?;

        tracing::info!(
            keyword = %keyword,
            results = book_page.books.len(),
            "Catalog search completed"
        );

        Ok(book_page)
    }

    async fn book_by_id(&self, id: &str) -> AppResult<Book> {
        let url = format!("{}/book/{}", self.api_url, id);

        let response = self.http_client.get(&url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(AppError::NotFound(format!(
                "Book {} not found in catalog",
                id
            )));
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Catalog(format!(
                "Catalog API returned status {}: {}",
                status, body
            )));
        }

        let book: Book = response.json().await?;
        Ok(book)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_catalog() -> BukuacakCatalog {
        BukuacakCatalog::new("http://test.local/api/v1".to_string(), 15)
    }

    #[test]
    fn test_from_config_uses_configured_values() {
        let config = Config::default();
        let catalog = BukuacakCatalog::from_config(&config);
        assert_eq!(catalog.api_url, config.catalog_api_url);
        assert_eq!(catalog.items_per_page, 15);
    }

    #[tokio::test]
    async fn test_search_rejects_empty_keyword() {
        let catalog = create_test_catalog();
        let err = catalog.search_books("", 1).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_search_rejects_whitespace_keyword() {
        let catalog = create_test_catalog();
        let err = catalog.search_books("   ", 1).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput(_)));
    }
}
