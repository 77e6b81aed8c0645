use sea_orm::DatabaseConnection;

use crate::errors::ServiceError;
use crate::pagination::{Page, PageRequest};
use crate::product::domain::{Product, ProductDraft};
use crate::product::repository::ProductRepository;

pub struct SeaOrmProductRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmProductRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait::async_trait]
impl ProductRepository for SeaOrmProductRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Product>, ServiceError> {
        let found = models::product::find_by_id(&self.db, id).await?;
        Ok(found.map(Product::from))
    }

    async fn save(&self, draft: ProductDraft) -> Result<Product, ServiceError> {
        let saved = match draft.id {
            None => models::product::insert(&self.db, &draft.category, &draft.name).await?,
            Some(id) => models::product::update(&self.db, id, &draft.category, &draft.name).await?,
        };
        Ok(Product::from(saved))
    }

    async fn delete_by_id(&self, id: i32) -> Result<bool, ServiceError> {
        Ok(models::product::delete_by_id(&self.db, id).await?)
    }

    async fn page_by_category(&self, category: &str, page: PageRequest) -> Result<Page<Product>, ServiceError> {
        let rows = models::product::page_by_category(&self.db, category, page.page_index, page.page_size).await?;
        Ok(Page {
            items: rows.rows.into_iter().map(Product::from).collect(),
            total_pages: rows.total_pages,
            total_elements: rows.total_elements,
            page_index: rows.page_index,
        })
    }

    async fn distinct_categories(&self) -> Result<Vec<String>, ServiceError> {
        Ok(models::product::distinct_categories(&self.db).await?)
    }
}
