use axum::{extract::{Path, Query, State}, http::StatusCode, Json};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};
use service::pagination::Page;
use service::product::Product;
use tracing::info;
use utoipa::{IntoParams, ToSchema};

use crate::errors::ApiError;
use crate::routes::AppState;

/// External view of a product, decoupled from the table layout
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct ProductResponse {
    pub id: i32,
    pub category: String,
    pub name: String,
}

impl From<Product> for ProductResponse {
    fn from(p: Product) -> Self {
        Self { id: p.id, category: p.category, name: p.name }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductListResponse {
    pub items: Vec<ProductResponse>,
    pub total_pages: u64,
    pub total_elements: u64,
    pub page_index: u64,
}

impl From<Page<Product>> for ProductListResponse {
    fn from(page: Page<Product>) -> Self {
        let page = page.map(ProductResponse::from);
        Self {
            items: page.items,
            total_pages: page.total_pages,
            total_elements: page.total_elements,
            page_index: page.page_index,
        }
    }
}

/// Body of create and update; both fields are always required.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ProductInput {
    pub category: String,
    pub name: String,
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Category to filter on
    pub category: String,
    /// 0-based page index, defaults to 0
    pub page: Option<u64>,
    /// Page size, defaults to the configured default
    pub size: Option<u64>,
}

#[utoipa::path(
    get, path = "/products/{id}", tag = "products",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "OK", body = ProductResponse),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get_product(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, ApiError>,
) -> Result<Json<ProductResponse>, ApiError> {
    let product = state.products.get_by_id(id).await.map_err(ApiError::op("get_product"))?;
    Ok(Json(product.into()))
}

#[utoipa::path(
    post, path = "/products", tag = "products",
    request_body = ProductInput,
    responses(
        (status = 201, description = "Created", body = ProductResponse),
        (status = 400, description = "Validation Error")
    )
)]
pub async fn create_product(
    State(state): State<AppState>,
    WithRejection(Json(input), _): WithRejection<Json<ProductInput>, ApiError>,
) -> Result<(StatusCode, Json<ProductResponse>), ApiError> {
    let product = state
        .products
        .create(&input.category, &input.name)
        .await
        .map_err(ApiError::op("create_product"))?;
    Ok((StatusCode::CREATED, Json(product.into())))
}

#[utoipa::path(
    put, path = "/products/{id}", tag = "products",
    params(("id" = i32, Path, description = "Product ID")),
    request_body = ProductInput,
    responses(
        (status = 200, description = "Updated", body = ProductResponse),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn update_product(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, ApiError>,
    WithRejection(Json(input), _): WithRejection<Json<ProductInput>, ApiError>,
) -> Result<Json<ProductResponse>, ApiError> {
    let product = state
        .products
        .update(id, &input.category, &input.name)
        .await
        .map_err(ApiError::op("update_product"))?;
    Ok(Json(product.into()))
}

#[utoipa::path(
    delete, path = "/products/{id}", tag = "products",
    params(("id" = i32, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Deleted", body = bool),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete_product(
    State(state): State<AppState>,
    WithRejection(Path(id), _): WithRejection<Path<i32>, ApiError>,
) -> Result<Json<bool>, ApiError> {
    state.products.delete_by_id(id).await.map_err(ApiError::op("delete_product"))?;
    Ok(Json(true))
}

#[utoipa::path(
    get, path = "/products", tag = "products",
    params(ListQuery),
    responses(
        (status = 200, description = "List OK", body = ProductListResponse),
        (status = 400, description = "Validation Error")
    )
)]
pub async fn list_products(
    State(state): State<AppState>,
    WithRejection(Query(q), _): WithRejection<Query<ListQuery>, ApiError>,
) -> Result<Json<ProductListResponse>, ApiError> {
    let page = q.page.unwrap_or(0);
    let size = q.size.unwrap_or(state.default_page_size);
    let result = state
        .products
        .list_by_category(&q.category, page, size)
        .await
        .map_err(ApiError::op("list_products"))?;
    info!(category = %q.category, page, size, count = result.items.len(), "list products");
    Ok(Json(result.into()))
}

#[utoipa::path(
    get, path = "/categories", tag = "products",
    responses((status = 200, description = "Distinct categories, ascending", body = Vec<String>))
)]
pub async fn list_categories(State(state): State<AppState>) -> Result<Json<Vec<String>>, ApiError> {
    let categories = state
        .products
        .list_unique_categories()
        .await
        .map_err(ApiError::op("list_categories"))?;
    Ok(Json(categories))
}
