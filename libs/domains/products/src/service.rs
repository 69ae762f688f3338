//! Product service - business logic layer

use std::sync::Arc;
use std::time::Duration;
use tracing::instrument;

use crate::error::{ProductError, ProductResult};
use crate::models::{Product, ProductFilter, ProductQuery};
use crate::repository::ProductRepository;

/// Deadline for one store round trip
const QUERY_TIMEOUT: Duration = Duration::from_secs(10);

/// Product service running the query pipeline:
/// normalize paging, fetch one page of group documents under the query
/// deadline, flatten each group's product list in order.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new ProductService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Run the product query described by the raw HTTP parameters.
    ///
    /// The deadline is scoped to the repository call and released on every
    /// exit path. One store query per request; no retries, no caching.
    #[instrument(skip(self))]
    pub async fn list_products(&self, query: ProductQuery) -> ProductResult<Vec<Product>> {
        let filter = ProductFilter::from_query(query);

        let groups = tokio::time::timeout(QUERY_TIMEOUT, self.repository.find_groups(filter))
            .await
            .map_err(|_| ProductError::Timeout(QUERY_TIMEOUT.as_secs()))??;

        let products: Vec<Product> = groups.iter().flat_map(Product::flatten_group).collect();

        tracing::debug!(count = products.len(), "flattened product page");
        Ok(products)
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
