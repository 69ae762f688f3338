use async_trait::async_trait;
use mongodb::bson::Document;

use crate::error::ProductResult;
use crate::models::ProductFilter;

/// Repository trait for product group documents
///
/// Abstracts the document store so the service layer can be exercised
/// against a mock. Returns raw group documents; flattening happens above
/// this seam.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Fetch one page of group documents matching `filter`, sorted by
    /// nested product name ascending.
    async fn find_groups(&self, filter: ProductFilter) -> ProductResult<Vec<Document>>;
}
