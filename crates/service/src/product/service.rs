use std::sync::Arc;

use tracing::{debug, info, instrument};

use super::domain::{Product, ProductDraft};
use super::repository::ProductRepository;
use crate::errors::ServiceError;
use crate::pagination::{Page, PageRequest, DEFAULT_MAX_PAGE_SIZE};

/// Product business service, independent of the web framework.
///
/// Every mutation of an existing product first re-reads it, so a missing id
/// always surfaces as `NotFound` rather than a silent no-op.
pub struct ProductService<R: ProductRepository + ?Sized> {
    repo: Arc<R>,
    max_page_size: u64,
}

impl<R: ProductRepository + ?Sized> ProductService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo, max_page_size: DEFAULT_MAX_PAGE_SIZE }
    }

    pub fn with_max_page_size(mut self, max_page_size: u64) -> Self {
        self.max_page_size = max_page_size;
        self
    }

    /// Persist a new product. Empty strings are accepted as is.
    ///
    /// # Examples
    /// ```
    /// use service::product::{ProductService, repository::mock::InMemoryProductRepository};
    /// use std::sync::Arc;
    /// let svc = ProductService::new(Arc::new(InMemoryProductRepository::default()));
    /// let p = tokio_test::block_on(svc.create("tools", "hammer")).unwrap();
    /// assert!(p.id > 0);
    /// assert_eq!(tokio_test::block_on(svc.get_by_id(p.id)).unwrap(), p);
    /// ```
    #[instrument(skip(self))]
    pub async fn create(&self, category: &str, name: &str) -> Result<Product, ServiceError> {
        let created = self.repo.save(ProductDraft::new(category, name)).await?;
        info!(id = created.id, category = %created.category, "product_created");
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: i32) -> Result<Product, ServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("product", id))
    }

    /// Re-read, overwrite both fields, save. Not atomic against a concurrent
    /// update of the same id: the later write wins.
    #[instrument(skip(self))]
    pub async fn update(&self, id: i32, category: &str, name: &str) -> Result<Product, ServiceError> {
        let mut draft = ProductDraft::from(self.get_by_id(id).await?);
        draft.category = category.to_string();
        draft.name = name.to_string();
        let updated = self.repo.save(draft).await?;
        info!(id = updated.id, category = %updated.category, "product_updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete_by_id(&self, id: i32) -> Result<(), ServiceError> {
        let existing = self.get_by_id(id).await?;
        if !self.repo.delete_by_id(existing.id).await? {
            // removed by someone else between the read and the delete
            return Err(ServiceError::not_found("product", id));
        }
        info!(id, "product_deleted");
        Ok(())
    }

    /// One page of a category, always ordered ascending by category.
    #[instrument(skip(self))]
    pub async fn list_by_category(&self, category: &str, page_index: u64, page_size: u64) -> Result<Page<Product>, ServiceError> {
        let request = PageRequest::new(page_index, page_size, self.max_page_size)?;
        let page = self.repo.page_by_category(category, request).await?;
        debug!(count = page.items.len(), total = page.total_elements, "products_listed");
        Ok(page)
    }

    #[instrument(skip(self))]
    pub async fn list_unique_categories(&self) -> Result<Vec<String>, ServiceError> {
        self.repo.distinct_categories().await
    }
}
