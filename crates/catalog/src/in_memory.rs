use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::RwLock;

use async_trait::async_trait;

use cruza_core::{ClientId, OrderId, ProductId, WarehouseId};

use crate::order::{Order, OrderLine};
use crate::product::{InventoryItem, Product};
use crate::store::{CatalogStore, StoreError, StoreResult};
use crate::warehouse::Warehouse;

#[derive(Debug, Default)]
struct Inner {
    // BTreeMaps keep id-ordered iteration so ranked queries are reproducible.
    products: BTreeMap<ProductId, Product>,
    orders: BTreeMap<OrderId, Order>,
    warehouses: HashMap<WarehouseId, Warehouse>,
    items: Vec<InventoryItem>,
    lines: Vec<OrderLine>,
}

/// In-memory catalog store.
///
/// Intended for tests/dev. Not optimized for performance.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    inner: RwLock<Inner>,
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_uppercase().contains(&needle.to_uppercase())
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_product(&self, product: Product) {
        let mut inner = self.inner.write().expect("catalog lock poisoned");
        inner.products.insert(product.id, product);
    }

    pub fn insert_warehouse(&self, warehouse: Warehouse) {
        let mut inner = self.inner.write().expect("catalog lock poisoned");
        inner.warehouses.insert(warehouse.id, warehouse);
    }

    pub fn insert_inventory(&self, item: InventoryItem) {
        let mut inner = self.inner.write().expect("catalog lock poisoned");
        inner.items.push(item);
    }

    pub fn insert_order(&self, order: Order) {
        let mut inner = self.inner.write().expect("catalog lock poisoned");
        inner.orders.insert(order.id, order);
    }

    pub fn insert_line(&self, line: OrderLine) {
        let mut inner = self.inner.write().expect("catalog lock poisoned");
        inner.lines.push(line);
    }

    fn read(&self) -> StoreResult<std::sync::RwLockReadGuard<'_, Inner>> {
        self.inner
            .read()
            .map_err(|_| StoreError::unavailable("catalog lock poisoned"))
    }
}

/// Rank keys by occurrence count descending, ties on ascending key.
fn rank_by_count<K: Ord + Copy>(counts: HashMap<K, usize>, limit: usize) -> Vec<K> {
    let mut ranked: Vec<(K, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    ranked.into_iter().take(limit).map(|(k, _)| k).collect()
}

#[async_trait]
impl CatalogStore for InMemoryCatalog {
    async fn product_by_id(&self, id: ProductId) -> StoreResult<Option<Product>> {
        Ok(self.read()?.products.get(&id).cloned())
    }

    async fn products_by_ids(&self, ids: &[ProductId]) -> StoreResult<Vec<Product>> {
        let inner = self.read()?;
        Ok(ids
            .iter()
            .filter_map(|id| inner.products.get(id))
            .filter(|p| !p.inactive)
            .cloned()
            .collect())
    }

    async fn search_by_name(
        &self,
        term: &str,
        include_services: bool,
        limit: usize,
    ) -> StoreResult<Vec<Product>> {
        let inner = self.read()?;
        let mut matches: Vec<Product> = inner
            .products
            .values()
            .filter(|p| !p.inactive)
            .filter(|p| include_services || !p.is_service)
            .filter(|p| contains_ci(&p.name, term))
            .cloned()
            .collect();

        // Premium first; unpriced products sink to the back, ties on id.
        matches.sort_by(|a, b| {
            b.price_cents
                .unwrap_or(i64::MIN)
                .cmp(&a.price_cents.unwrap_or(i64::MIN))
                .then(a.id.cmp(&b.id))
        });
        matches.truncate(limit);
        Ok(matches)
    }

    async fn search_by_name_or_code(&self, term: &str, limit: usize) -> StoreResult<Vec<Product>> {
        let inner = self.read()?;
        Ok(inner
            .products
            .values()
            .filter(|p| !p.inactive)
            .filter(|p| contains_ci(&p.name, term) || contains_ci(&p.code, term))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn candidate_product_ids(
        &self,
        exclude: ProductId,
        limit: usize,
    ) -> StoreResult<Vec<ProductId>> {
        let inner = self.read()?;
        Ok(inner
            .products
            .values()
            .filter(|p| !p.inactive && p.id != exclude)
            .take(limit)
            .map(|p| p.id)
            .collect())
    }

    async fn inventory_for_products(&self, ids: &[ProductId]) -> StoreResult<Vec<InventoryItem>> {
        let wanted: HashSet<ProductId> = ids.iter().copied().collect();
        let inner = self.read()?;
        Ok(inner
            .items
            .iter()
            .filter(|i| wanted.contains(&i.product_id))
            .copied()
            .collect())
    }

    async fn warehouses_by_ids(&self, ids: &[WarehouseId]) -> StoreResult<Vec<Warehouse>> {
        let inner = self.read()?;
        Ok(ids
            .iter()
            .filter_map(|id| inner.warehouses.get(id).cloned())
            .collect())
    }

    async fn open_lines_for_products(&self, ids: &[ProductId]) -> StoreResult<Vec<OrderLine>> {
        let wanted: HashSet<ProductId> = ids.iter().copied().collect();
        let inner = self.read()?;
        Ok(inner
            .lines
            .iter()
            .filter(|l| wanted.contains(&l.product_id) && !l.delivery_complete)
            .filter(|l| {
                l.order_id
                    .and_then(|oid| inner.orders.get(&oid))
                    .is_some_and(|o| !o.voided)
            })
            .cloned()
            .collect())
    }

    async fn recent_order_ids_with_product(
        &self,
        product_id: ProductId,
        limit: usize,
    ) -> StoreResult<Vec<OrderId>> {
        let inner = self.read()?;
        let mut order_ids: Vec<OrderId> = inner
            .lines
            .iter()
            .filter(|l| l.product_id == product_id)
            .filter_map(|l| l.order_id)
            .collect();
        order_ids.sort_unstable_by(|a, b| b.cmp(a));
        order_ids.dedup();
        order_ids.truncate(limit);
        Ok(order_ids)
    }

    async fn lines_for_orders(&self, ids: &[OrderId]) -> StoreResult<Vec<OrderLine>> {
        let wanted: HashSet<OrderId> = ids.iter().copied().collect();
        let inner = self.read()?;
        Ok(inner
            .lines
            .iter()
            .filter(|l| l.order_id.is_some_and(|oid| wanted.contains(&oid)))
            .cloned()
            .collect())
    }

    async fn top_products_in_month(&self, month: u32, limit: usize) -> StoreResult<Vec<ProductId>> {
        use chrono::Datelike;

        let inner = self.read()?;
        let mut counts: HashMap<ProductId, usize> = HashMap::new();
        for line in &inner.lines {
            let in_month = line
                .order_id
                .and_then(|oid| inner.orders.get(&oid))
                .is_some_and(|o| o.date.month() == month);
            if in_month {
                *counts.entry(line.product_id).or_default() += 1;
            }
        }
        Ok(rank_by_count(counts, limit))
    }

    async fn top_products_for_client(
        &self,
        client_id: ClientId,
        limit: usize,
    ) -> StoreResult<Vec<ProductId>> {
        let inner = self.read()?;
        let mut counts: HashMap<ProductId, usize> = HashMap::new();
        for line in &inner.lines {
            let for_client = line
                .order_id
                .and_then(|oid| inner.orders.get(&oid))
                .is_some_and(|o| o.client_id == client_id);
            if for_client {
                *counts.entry(line.product_id).or_default() += 1;
            }
        }
        Ok(rank_by_count(counts, limit))
    }

    async fn top_clients(&self, limit: usize) -> StoreResult<Vec<ClientId>> {
        let inner = self.read()?;
        let mut counts: HashMap<ClientId, usize> = HashMap::new();
        for order in inner.orders.values() {
            *counts.entry(order.client_id).or_default() += 1;
        }
        Ok(rank_by_count(counts, limit))
    }

    async fn recent_lines(&self, limit: usize) -> StoreResult<Vec<OrderLine>> {
        let inner = self.read()?;
        let mut lines = inner.lines.clone();
        lines.sort_by(|a, b| b.id.cmp(&a.id));
        lines.truncate(limit);
        Ok(lines)
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn seeded() -> InMemoryCatalog {
        let catalog = InMemoryCatalog::new();
        catalog.insert_product(
            Product::new(ProductId::new(1), "TEC-01", "TECLADO GAMER X").with_price_cents(12_000),
        );
        catalog.insert_product(
            Product::new(ProductId::new(2), "TEC-02", "TECLADO MECANICO Y").with_price_cents(9_000),
        );
        catalog.insert_product(
            Product::new(ProductId::new(3), "TEC-03", "TECLADO VIEJO")
                .with_price_cents(1_000)
                .deactivated(),
        );
        catalog.insert_product(
            Product::new(ProductId::new(4), "SRV-01", "SERVICIO INSTALACION TECLADO")
                .with_price_cents(2_000)
                .as_service(),
        );
        catalog
    }

    #[tokio::test]
    async fn search_by_name_orders_premium_first_and_hides_inactive() {
        let catalog = seeded();
        let found = catalog.search_by_name("teclado", false, 10).await.unwrap();
        let ids: Vec<i64> = found.iter().map(|p| p.id.as_i64()).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn search_by_name_admits_services_on_request() {
        let catalog = seeded();
        let found = catalog.search_by_name("servicio", true, 10).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, ProductId::new(4));

        let hidden = catalog.search_by_name("servicio", false, 10).await.unwrap();
        assert!(hidden.is_empty());
    }

    #[tokio::test]
    async fn products_by_ids_resolve_active_only_in_input_order() {
        let catalog = seeded();
        let found = catalog
            .products_by_ids(&[ProductId::new(2), ProductId::new(3), ProductId::new(1)])
            .await
            .unwrap();
        let ids: Vec<i64> = found.iter().map(|p| p.id.as_i64()).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[tokio::test]
    async fn search_by_name_or_code_matches_code_too() {
        let catalog = seeded();
        let found = catalog.search_by_name_or_code("TEC-02", 10).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, ProductId::new(2));
    }

    #[tokio::test]
    async fn recent_order_ids_are_distinct_and_descending() {
        let catalog = InMemoryCatalog::new();
        let p = ProductId::new(1);
        for (line_id, order_id) in [(1, 10), (2, 30), (3, 30), (4, 20)] {
            catalog.insert_line(OrderLine::new(
                cruza_core::OrderLineId::new(line_id),
                OrderId::new(order_id),
                p,
                1.0,
            ));
        }
        let ids = catalog.recent_order_ids_with_product(p, 10).await.unwrap();
        let raw: Vec<i64> = ids.iter().map(|o| o.as_i64()).collect();
        assert_eq!(raw, vec![30, 20, 10]);
    }

    #[tokio::test]
    async fn open_lines_skip_voided_orders_and_completed_lines() {
        let catalog = InMemoryCatalog::new();
        let p = ProductId::new(1);
        let client = ClientId::new(1);
        catalog.insert_order(Order::new(OrderId::new(1), 1, date(2026, 3, 1), client));
        catalog.insert_order(Order::new(OrderId::new(2), 2, date(2026, 3, 2), client).voided());
        catalog.insert_line(OrderLine::new(
            cruza_core::OrderLineId::new(1),
            OrderId::new(1),
            p,
            2.0,
        ));
        catalog.insert_line(OrderLine::new(
            cruza_core::OrderLineId::new(2),
            OrderId::new(2),
            p,
            5.0,
        ));
        catalog.insert_line(
            OrderLine::new(cruza_core::OrderLineId::new(3), OrderId::new(1), p, 9.0)
                .delivered_in_full(),
        );

        let open = catalog.open_lines_for_products(&[p]).await.unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].quantity, 2.0);
    }

    #[tokio::test]
    async fn monthly_ranking_counts_line_occurrences() {
        let catalog = InMemoryCatalog::new();
        let client = ClientId::new(1);
        let a = ProductId::new(1);
        let b = ProductId::new(2);
        for oid in 1..=3 {
            catalog.insert_order(Order::new(OrderId::new(oid), oid, date(2025, 12, 5), client));
        }
        catalog.insert_order(Order::new(OrderId::new(4), 4, date(2025, 11, 5), client));

        let mut line_id = 0;
        for oid in [1, 2, 3] {
            line_id += 1;
            catalog.insert_line(OrderLine::new(
                cruza_core::OrderLineId::new(line_id),
                OrderId::new(oid),
                a,
                1.0,
            ));
        }
        for oid in [1, 4] {
            line_id += 1;
            catalog.insert_line(OrderLine::new(
                cruza_core::OrderLineId::new(line_id),
                OrderId::new(oid),
                b,
                1.0,
            ));
        }

        let ranked = catalog.top_products_in_month(12, 5).await.unwrap();
        assert_eq!(ranked, vec![a, b]);
    }

    #[tokio::test]
    async fn top_clients_rank_by_order_count() {
        let catalog = InMemoryCatalog::new();
        let busy = ClientId::new(7);
        let quiet = ClientId::new(8);
        for oid in 1..=3 {
            catalog.insert_order(Order::new(OrderId::new(oid), oid, date(2026, 1, 1), busy));
        }
        catalog.insert_order(Order::new(OrderId::new(4), 4, date(2026, 1, 1), quiet));

        let top = catalog.top_clients(10).await.unwrap();
        assert_eq!(top, vec![busy, quiet]);
    }
}
