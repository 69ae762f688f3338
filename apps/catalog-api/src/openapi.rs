//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Catalog API",
        version = "0.1.0",
        description = "Insurance product catalog query API over MongoDB",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/api/products", api = domain_products::ApiDoc)
    ),
    tags(
        (name = "Products", description = "Product catalog query endpoint")
    )
)]
pub struct ApiDoc;
