//! Product catalog: domain types, store abstraction and the business service.

pub mod domain;
pub mod repository;
pub mod service;
pub mod repo;

pub use domain::{Product, ProductDraft};
pub use repository::ProductRepository;
pub use service::ProductService;
