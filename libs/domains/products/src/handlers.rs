//! HTTP handlers for the product query API

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use utoipa::OpenApi;

use crate::error::ProductResult;
use crate::models::{
    Broker, Insurer, Product, ProductGroup, ProductListResponse, ProductQuery, ProductType,
};
use crate::repository::ProductRepository;
use crate::service::ProductService;

/// OpenAPI documentation for the Products API
#[derive(OpenApi)]
#[openapi(
    paths(list_products),
    components(schemas(
        Product,
        ProductGroup,
        ProductType,
        Insurer,
        Broker,
        ProductListResponse
    )),
    tags(
        (name = "Products", description = "Product catalog query endpoint")
    )
)]
pub struct ApiDoc;

/// Create the products router
pub fn router<R: ProductRepository + 'static>(service: ProductService<R>) -> Router {
    let shared_service = Arc::new(service);

    Router::new()
        .route("/", get(list_products))
        .with_state(shared_service)
}

/// Query products with optional text and status filters
#[utoipa::path(
    get,
    path = "",
    tag = "Products",
    params(ProductQuery),
    responses(
        (status = 200, description = "Flattened page of products", body = ProductListResponse),
        (status = 500, description = "Query or decode failure; body is the raw error text", body = String)
    )
)]
async fn list_products<R: ProductRepository>(
    State(service): State<Arc<ProductService<R>>>,
    Query(query): Query<ProductQuery>,
) -> ProductResult<Json<ProductListResponse>> {
    let data = service.list_products(query).await?;
    Ok(Json(ProductListResponse { data }))
}
