//! Hierarchical category taxonomy.
//!
//! A category is a tree node (parent link, name, slug, active flag).
//! Deactivating a node through the save path cascades to all descendants;
//! the admin bulk actions touch one level of children only.

pub mod dtos;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;

pub use repository::CategoryRepository;
pub use services::{CategoryAdminService, CategoryService};
