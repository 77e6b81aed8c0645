use utoipa::OpenApi;

use crate::routes::products::{ProductInput, ProductListResponse, ProductResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::products::get_product,
        crate::routes::products::create_product,
        crate::routes::products::update_product,
        crate::routes::products::delete_product,
        crate::routes::products::list_products,
        crate::routes::products::list_categories,
    ),
    components(
        schemas(
            ProductInput,
            ProductResponse,
            ProductListResponse,
        )
    ),
    tags(
        (name = "health"),
        (name = "products")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_product_paths() {
        let doc = ApiDoc::openapi();
        for path in ["/health", "/products", "/products/{id}", "/categories"] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
    }
}
