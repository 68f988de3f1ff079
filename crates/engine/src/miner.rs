//! Statistical co-purchase mining.
//!
//! Fallback channel: when the habitat rules under-produce, rank products by
//! how often they appear in the same recent orders as the target product.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use cruza_catalog::{CatalogStore, StoreResult};
use cruza_core::ProductId;

/// Mines recent order history for statistical complements.
#[derive(Debug, Clone)]
pub struct CoPurchaseMiner<S> {
    store: Arc<S>,
    /// How many recent orders containing the target to sample.
    order_sample: usize,
    /// Extra candidates fetched beyond the requested slots so in-memory
    /// exclusion filtering still leaves enough survivors.
    overfetch: usize,
}

impl<S: CatalogStore> CoPurchaseMiner<S> {
    pub fn new(store: Arc<S>, order_sample: usize, overfetch: usize) -> Self {
        Self {
            store,
            order_sample,
            overfetch,
        }
    }

    /// Product ids co-purchased with `product_id`, frequency-ranked, excluding
    /// the target itself and everything in `exclude`, capped at `slots`.
    pub async fn statistical_complements(
        &self,
        product_id: ProductId,
        exclude: &HashSet<ProductId>,
        slots: usize,
    ) -> StoreResult<Vec<ProductId>> {
        if slots == 0 {
            return Ok(Vec::new());
        }

        let order_ids = self
            .store
            .recent_order_ids_with_product(product_id, self.order_sample)
            .await?;
        if order_ids.is_empty() {
            return Ok(Vec::new());
        }

        let lines = self.store.lines_for_orders(&order_ids).await?;

        let mut counts: HashMap<ProductId, usize> = HashMap::new();
        for line in &lines {
            *counts.entry(line.product_id).or_default() += 1;
        }

        let mut ranked: Vec<(ProductId, usize)> = counts.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

        Ok(ranked
            .into_iter()
            .take(slots + self.overfetch)
            .map(|(id, _)| id)
            .filter(|id| *id != product_id && !exclude.contains(id))
            .take(slots)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use cruza_catalog::{InMemoryCatalog, Order, OrderLine};
    use cruza_core::{ClientId, OrderId, OrderLineId};

    use super::*;

    fn seeded() -> Arc<InMemoryCatalog> {
        let catalog = Arc::new(InMemoryCatalog::new());
        let date = NaiveDate::from_ymd_opt(2026, 2, 1).unwrap();
        let client = ClientId::new(1);

        // Product 1 co-occurs with 2 three times, with 3 once.
        let mut line_id = 0;
        for (order_id, products) in [
            (1, vec![1, 2]),
            (2, vec![1, 2]),
            (3, vec![1, 2, 3]),
            (4, vec![5, 6]),
        ] {
            catalog.insert_order(Order::new(OrderId::new(order_id), order_id, date, client));
            for p in products {
                line_id += 1;
                catalog.insert_line(OrderLine::new(
                    OrderLineId::new(line_id),
                    OrderId::new(order_id),
                    ProductId::new(p),
                    1.0,
                ));
            }
        }
        catalog
    }

    fn miner(catalog: Arc<InMemoryCatalog>) -> CoPurchaseMiner<InMemoryCatalog> {
        CoPurchaseMiner::new(catalog, 50, 20)
    }

    #[tokio::test]
    async fn ranks_by_co_occurrence_and_excludes_the_target() {
        let miner = miner(seeded());
        let found = miner
            .statistical_complements(ProductId::new(1), &HashSet::new(), 5)
            .await
            .unwrap();
        assert_eq!(found, vec![ProductId::new(2), ProductId::new(3)]);
    }

    #[tokio::test]
    async fn honors_the_exclusion_set() {
        let miner = miner(seeded());
        let exclude: HashSet<ProductId> = [ProductId::new(2)].into();
        let found = miner
            .statistical_complements(ProductId::new(1), &exclude, 5)
            .await
            .unwrap();
        assert_eq!(found, vec![ProductId::new(3)]);
    }

    #[tokio::test]
    async fn caps_at_the_requested_slots() {
        let miner = miner(seeded());
        let found = miner
            .statistical_complements(ProductId::new(1), &HashSet::new(), 1)
            .await
            .unwrap();
        assert_eq!(found, vec![ProductId::new(2)]);
    }

    #[tokio::test]
    async fn product_with_no_history_yields_nothing() {
        let miner = miner(seeded());
        let found = miner
            .statistical_complements(ProductId::new(99), &HashSet::new(), 5)
            .await
            .unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn zero_slots_short_circuits() {
        let miner = miner(seeded());
        let found = miner
            .statistical_complements(ProductId::new(1), &HashSet::new(), 0)
            .await
            .unwrap();
        assert!(found.is_empty());
    }
}
