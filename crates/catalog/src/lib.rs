//! Catalog domain module (read-only).
//!
//! This crate contains the point-of-sale catalog entities (products, serialized
//! inventory units, warehouses, order notes and their lines) plus the
//! [`CatalogStore`] collaborator boundary the recommendation engine reads
//! through. The engine never mutates catalog state; everything here is a
//! read model over the relational backing store.
//!
//! Entities reference each other by plain identifiers only. There are no
//! embedded back-pointers (product -> line -> order -> line cycles are modeled
//! as id lookups), so the object graph is acyclic by construction.

pub mod in_memory;
pub mod order;
pub mod product;
pub mod store;
pub mod warehouse;

pub use in_memory::InMemoryCatalog;
pub use order::{Order, OrderLine};
pub use product::{InventoryItem, Product};
pub use store::{CatalogStore, StoreError, StoreResult};
pub use warehouse::Warehouse;
