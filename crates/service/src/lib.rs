//! Service layer providing business-oriented CRUD operations on top of models.
//! - Separates business logic from data access (`ProductRepository`).
//! - Reuses the entity definitions in the `models` crate.
//! - Classifies every failure into a `ServiceError` kind.

pub mod errors;
pub mod pagination;
pub mod product;
#[cfg(test)]
pub mod test_support;
