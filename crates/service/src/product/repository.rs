use async_trait::async_trait;

use super::domain::{Product, ProductDraft};
use crate::errors::ServiceError;
use crate::pagination::{Page, PageRequest};

/// Persistence abstraction for products.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Lookup by primary key; a miss is `Ok(None)`.
    async fn find_by_id(&self, id: i32) -> Result<Option<Product>, ServiceError>;

    /// Insert when the draft has no id, otherwise overwrite that row.
    /// Overwriting a row that no longer exists is `NotFound`.
    async fn save(&self, draft: ProductDraft) -> Result<Product, ServiceError>;

    /// Returns whether a row was removed.
    async fn delete_by_id(&self, id: i32) -> Result<bool, ServiceError>;

    /// Products of one category, ordered by category then id.
    async fn page_by_category(&self, category: &str, page: PageRequest) -> Result<Page<Product>, ServiceError>;

    /// Each category in use exactly once, ascending.
    async fn distinct_categories(&self) -> Result<Vec<String>, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::{BTreeMap, BTreeSet};
    use std::sync::{Mutex, MutexGuard};

    use crate::pagination::total_pages;

    #[derive(Default)]
    struct Rows {
        next_id: i32,
        by_id: BTreeMap<i32, Product>,
    }

    #[derive(Default)]
    pub struct InMemoryProductRepository {
        rows: Mutex<Rows>,
    }

    impl InMemoryProductRepository {
        fn rows(&self) -> Result<MutexGuard<'_, Rows>, ServiceError> {
            self.rows.lock().map_err(|_| ServiceError::Db("in-memory store poisoned".into()))
        }
    }

    #[async_trait]
    impl ProductRepository for InMemoryProductRepository {
        async fn find_by_id(&self, id: i32) -> Result<Option<Product>, ServiceError> {
            Ok(self.rows()?.by_id.get(&id).cloned())
        }

        async fn save(&self, draft: ProductDraft) -> Result<Product, ServiceError> {
            let mut rows = self.rows()?;
            let id = match draft.id {
                Some(id) if rows.by_id.contains_key(&id) => id,
                Some(id) => return Err(ServiceError::not_found("product", id)),
                None => {
                    rows.next_id += 1;
                    rows.next_id
                }
            };
            let product = Product { id, category: draft.category, name: draft.name };
            rows.by_id.insert(id, product.clone());
            Ok(product)
        }

        async fn delete_by_id(&self, id: i32) -> Result<bool, ServiceError> {
            Ok(self.rows()?.by_id.remove(&id).is_some())
        }

        async fn page_by_category(&self, category: &str, page: PageRequest) -> Result<Page<Product>, ServiceError> {
            let rows = self.rows()?;
            // BTreeMap iteration is id order; a single category makes that the full sort
            let matching: Vec<&Product> = rows.by_id.values().filter(|p| p.category == category).collect();
            let total_elements = matching.len() as u64;
            let skip = page.page_index.saturating_mul(page.page_size);
            let items = matching
                .into_iter()
                .skip(usize::try_from(skip).unwrap_or(usize::MAX))
                .take(usize::try_from(page.page_size).unwrap_or(usize::MAX))
                .cloned()
                .collect();
            Ok(Page {
                items,
                total_pages: total_pages(total_elements, page.page_size),
                total_elements,
                page_index: page.page_index,
            })
        }

        async fn distinct_categories(&self) -> Result<Vec<String>, ServiceError> {
            let rows = self.rows()?;
            let set: BTreeSet<&str> = rows.by_id.values().map(|p| p.category.as_str()).collect();
            Ok(set.into_iter().map(str::to_string).collect())
        }
    }
}
