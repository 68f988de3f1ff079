//! Read-only catalog store boundary.
//!
//! This trait is the engine's only window onto the relational store. All
//! methods are batch-shaped so a caller can enrich N products with a fixed
//! number of round trips, and the aggregation-flavored queries (top products,
//! top clients, recent orders) run store-side, mirroring the SQL the
//! production adapter issues.

use async_trait::async_trait;
use thiserror::Error;

use cruza_core::{ClientId, OrderId, ProductId, WarehouseId};

use crate::order::OrderLine;
use crate::product::{InventoryItem, Product};
use crate::warehouse::Warehouse;

pub type StoreResult<T> = Result<T, StoreError>;

/// Infrastructure failure while querying the catalog store.
///
/// The engine treats every variant the same way (log and degrade), but
/// adapters should still distinguish query-shaped failures from the store
/// being unreachable.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("catalog query failed: {0}")]
    Query(String),

    #[error("catalog store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }
}

/// Read-only access to products, inventory units, warehouses and order notes.
///
/// Contract notes shared by all implementations:
/// - "active" always means `!inactive`; inactive products never leave the
///   store on any search or candidate path.
/// - Substring matches are case-insensitive (ILIKE semantics).
/// - Ranked queries break count ties on ascending id so results are
///   reproducible against unchanged data.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn product_by_id(&self, id: ProductId) -> StoreResult<Option<Product>>;

    /// Resolve a batch of ids to active products. Unknown and inactive ids
    /// are skipped; order of the input is preserved for the ids that resolve.
    async fn products_by_ids(&self, ids: &[ProductId]) -> StoreResult<Vec<Product>>;

    /// Active products whose name contains `term`, ordered by price
    /// descending (premium first), capped at `limit`. Service-type products
    /// are excluded unless `include_services` is set.
    async fn search_by_name(
        &self,
        term: &str,
        include_services: bool,
        limit: usize,
    ) -> StoreResult<Vec<Product>>;

    /// Active products whose name **or** code contains `term`, capped at
    /// `limit`. Used by the public search operation.
    async fn search_by_name_or_code(&self, term: &str, limit: usize) -> StoreResult<Vec<Product>>;

    /// Active products other than `exclude`, capped at `limit`. The
    /// latent-factor channel scores against this bounded candidate set.
    async fn candidate_product_ids(
        &self,
        exclude: ProductId,
        limit: usize,
    ) -> StoreResult<Vec<ProductId>>;

    /// All inventory units owned by the given products, counted or not.
    async fn inventory_for_products(&self, ids: &[ProductId]) -> StoreResult<Vec<InventoryItem>>;

    async fn warehouses_by_ids(&self, ids: &[WarehouseId]) -> StoreResult<Vec<Warehouse>>;

    /// Lines for the given products that are still open: not marked
    /// delivery-complete and whose owning order exists and is not voided.
    async fn open_lines_for_products(&self, ids: &[ProductId]) -> StoreResult<Vec<OrderLine>>;

    /// Most recent distinct order ids containing `product_id`, ordered by
    /// order id descending (recency proxy), capped at `limit`.
    async fn recent_order_ids_with_product(
        &self,
        product_id: ProductId,
        limit: usize,
    ) -> StoreResult<Vec<OrderId>>;

    /// All lines belonging to the given orders.
    async fn lines_for_orders(&self, ids: &[OrderId]) -> StoreResult<Vec<OrderLine>>;

    /// Product ids ranked by how many order lines reference them in orders
    /// dated within the given calendar month (1..=12), descending.
    async fn top_products_in_month(&self, month: u32, limit: usize) -> StoreResult<Vec<ProductId>>;

    /// Product ids ranked by how many order lines reference them in orders
    /// placed by `client_id`, descending.
    async fn top_products_for_client(
        &self,
        client_id: ClientId,
        limit: usize,
    ) -> StoreResult<Vec<ProductId>>;

    /// Client ids ranked by order count, descending.
    async fn top_clients(&self, limit: usize) -> StoreResult<Vec<ClientId>>;

    /// Most recent order lines by line id descending, capped at `limit`.
    /// Training sample for the latent-factor channel.
    async fn recent_lines(&self, limit: usize) -> StoreResult<Vec<OrderLine>>;
}
