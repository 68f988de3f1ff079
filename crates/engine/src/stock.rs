//! Stock aggregation: net available-to-promise per product plus a warehouse
//! label, computed in one batched pass over the store.

use std::collections::HashMap;
use std::sync::Arc;

use cruza_catalog::{CatalogStore, StoreResult};
use cruza_core::{ProductId, WarehouseId};

use crate::dto::Recommendation;

/// Label shown when a product has no available stock.
pub const NO_STOCK_LABEL: &str = "Sin Stock";
/// Label shown when stock exists but no per-warehouse detail does.
pub const AVAILABLE_LABEL: &str = "Disponible";

/// Net physical minus committed, floored at zero.
pub(crate) fn available(real: i64, committed: i64) -> i64 {
    (real - committed).max(0)
}

/// Batch stock enrichment over the catalog store.
///
/// Issues one query per concern (inventory units, open order lines, warehouse
/// names) for the whole batch; the per-product loop then works purely over
/// in-memory lookup tables, so query count does not grow with batch size.
#[derive(Debug, Clone)]
pub struct StockAggregator<S> {
    store: Arc<S>,
}

impl<S: CatalogStore> StockAggregator<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Fill `stock` and `warehouse` on every DTO in the batch.
    pub async fn enrich(&self, recs: &mut [Recommendation]) -> StoreResult<()> {
        if recs.is_empty() {
            return Ok(());
        }

        let ids: Vec<ProductId> = recs.iter().map(|r| r.product_id).collect();

        let items = self.store.inventory_for_products(&ids).await?;
        let open_lines = self.store.open_lines_for_products(&ids).await?;

        // Physical stock, global and per warehouse.
        let mut real: HashMap<ProductId, i64> = HashMap::new();
        let mut per_warehouse: HashMap<ProductId, HashMap<WarehouseId, i64>> = HashMap::new();
        for item in &items {
            let Some(warehouse_id) = item.warehouse_id.filter(|_| item.counts_toward_stock())
            else {
                continue;
            };
            *real.entry(item.product_id).or_default() += 1;
            *per_warehouse
                .entry(item.product_id)
                .or_default()
                .entry(warehouse_id)
                .or_default() += 1;
        }

        // Committed stock: open deficit over non-voided, undelivered lines.
        // The store pre-filters; the per-line clamp defends against delivered >
        // ordered.
        let mut committed: HashMap<ProductId, f64> = HashMap::new();
        for line in &open_lines {
            *committed.entry(line.product_id).or_default() += line.open_quantity();
        }

        let warehouse_ids: Vec<WarehouseId> = {
            let mut ids: Vec<WarehouseId> = per_warehouse
                .values()
                .flat_map(|counts| counts.keys().copied())
                .collect();
            ids.sort_unstable();
            ids.dedup();
            ids
        };
        let warehouse_names: HashMap<WarehouseId, String> = self
            .store
            .warehouses_by_ids(&warehouse_ids)
            .await?
            .into_iter()
            .map(|w| (w.id, w.name))
            .collect();

        for rec in recs.iter_mut() {
            let id = rec.product_id;
            let real_count = real.get(&id).copied().unwrap_or(0);
            let committed_count = committed.get(&id).copied().unwrap_or(0.0) as i64;

            rec.stock = available(real_count, committed_count);
            rec.warehouse = Some(if rec.stock > 0 {
                warehouse_label(per_warehouse.get(&id), &warehouse_names)
            } else {
                NO_STOCK_LABEL.to_string()
            });
        }

        Ok(())
    }
}

/// Pick the label for a product with available stock.
///
/// One warehouse: its name. Several: the best-stocked one's name plus how many
/// others also hold units. No detail rows at all: a generic available label.
fn warehouse_label(
    counts: Option<&HashMap<WarehouseId, i64>>,
    names: &HashMap<WarehouseId, String>,
) -> String {
    let Some(counts) = counts.filter(|c| !c.is_empty()) else {
        return AVAILABLE_LABEL.to_string();
    };

    let mut ranked: Vec<(WarehouseId, i64)> = counts.iter().map(|(w, c)| (*w, *c)).collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    let (principal, _) = ranked[0];
    if ranked.len() == 1 {
        return names
            .get(&principal)
            .cloned()
            .unwrap_or_else(|| format!("Almacén ID {principal}"));
    }

    let principal_name = names
        .get(&principal)
        .cloned()
        .unwrap_or_else(|| "Almacén".to_string());
    format!("{principal_name} (+{})", ranked.len() - 1)
}
