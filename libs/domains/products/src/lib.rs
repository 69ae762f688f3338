//! Products Domain
//!
//! Read side of the insurance product catalog: one query endpoint over
//! MongoDB group documents, with filtering, group-level pagination, and
//! flattening of each group's nested product list.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoint
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← paging normalization, query deadline, flattening
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← data access (trait + MongoDB implementation)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← wire types, filter, flattening algorithm
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{handlers, MongoProductRepository, ProductService};
//! use mongodb::Client;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Client::with_uri_str("mongodb://localhost:27017").await?;
//! let db = client.database("catalog");
//!
//! let repository = MongoProductRepository::new(&db);
//! let service = ProductService::new(repository);
//!
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongodb;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{ProductError, ProductResult};
pub use handlers::ApiDoc;
pub use models::{
    Broker, Insurer, Product, ProductFilter, ProductGroup, ProductListResponse, ProductQuery,
    ProductType,
};
pub use self::mongodb::{escape_pattern, MongoProductRepository};
pub use repository::ProductRepository;
pub use service::ProductService;
