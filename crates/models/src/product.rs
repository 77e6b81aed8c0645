use sea_orm::{
    entity::prelude::*, ActiveValue::{NotSet, Set, Unchanged}, DatabaseConnection, PaginatorTrait,
    QueryOrder, QuerySelect,
};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product")]
pub struct Model {
    #[sea_orm(primary_key, column_name = "product_id")]
    pub id: i32,
    pub category: String,
    pub name: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// One page of rows plus the totals needed to address the others.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RowPage {
    pub rows: Vec<Model>,
    pub total_pages: u64,
    pub total_elements: u64,
    pub page_index: u64,
}

pub async fn find_by_id(db: &DatabaseConnection, id: i32) -> Result<Option<Model>, ModelError> {
    Ok(Entity::find_by_id(id).one(db).await?)
}

pub async fn insert(db: &DatabaseConnection, category: &str, name: &str) -> Result<Model, ModelError> {
    let am = ActiveModel {
        id: NotSet,
        category: Set(category.to_string()),
        name: Set(name.to_string()),
    };
    Ok(am.insert(db).await?)
}

/// Overwrite both mutable columns of an existing row. A missing row is `NotFound`.
pub async fn update(db: &DatabaseConnection, id: i32, category: &str, name: &str) -> Result<Model, ModelError> {
    let am = ActiveModel {
        id: Unchanged(id),
        category: Set(category.to_string()),
        name: Set(name.to_string()),
    };
    am.update(db).await.map_err(|e| match ModelError::from(e) {
        ModelError::NotFound(_) => ModelError::NotFound(format!("product {id} not found")),
        other => other,
    })
}

/// Returns true when a row was removed.
pub async fn delete_by_id(db: &DatabaseConnection, id: i32) -> Result<bool, ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await?;
    Ok(res.rows_affected > 0)
}

/// Rows of one category ordered by category, then id for a stable page split.
pub async fn page_by_category(
    db: &DatabaseConnection,
    category: &str,
    page_index: u64,
    page_size: u64,
) -> Result<RowPage, ModelError> {
    if page_size == 0 || i64::try_from(page_size).is_err() {
        return Err(ModelError::Validation(format!("page_size {page_size} out of range")));
    }
    let paginator = Entity::find()
        .filter(Column::Category.eq(category))
        .order_by_asc(Column::Category)
        .order_by_asc(Column::Id)
        .paginate(db, page_size);
    let totals = paginator.num_items_and_pages().await?;
    // past the last page: empty, and the offset is never computed
    let rows = if page_index < totals.number_of_pages {
        paginator.fetch_page(page_index).await?
    } else {
        Vec::new()
    };
    Ok(RowPage {
        rows,
        total_pages: totals.number_of_pages,
        total_elements: totals.number_of_items,
        page_index,
    })
}

/// Every category in use, once each, alphabetical.
pub async fn distinct_categories(db: &DatabaseConnection) -> Result<Vec<String>, ModelError> {
    let rows = Entity::find()
        .select_only()
        .column(Column::Category)
        .distinct()
        .order_by_asc(Column::Category)
        .into_tuple::<String>()
        .all(db)
        .await?;
    Ok(rows)
}
