/// A persisted product; `id` was assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: i32,
    pub category: String,
    pub name: String,
}

/// Input to `save`: without an id it is inserted, with one it overwrites that row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    pub id: Option<i32>,
    pub category: String,
    pub name: String,
}

impl ProductDraft {
    pub fn new(category: impl Into<String>, name: impl Into<String>) -> Self {
        Self { id: None, category: category.into(), name: name.into() }
    }
}

impl From<Product> for ProductDraft {
    fn from(p: Product) -> Self {
        Self { id: Some(p.id), category: p.category, name: p.name }
    }
}

impl From<models::product::Model> for Product {
    fn from(m: models::product::Model) -> Self {
        Self { id: m.id, category: m.category, name: m.name }
    }
}
