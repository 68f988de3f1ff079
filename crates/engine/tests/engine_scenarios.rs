//! End-to-end orchestration scenarios against the in-memory catalog.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;

use cruza_catalog::{
    CatalogStore, InMemoryCatalog, InventoryItem, Order, OrderLine, Product, StoreError,
    StoreResult, Warehouse,
};
use cruza_core::{
    ClientId, InventoryItemId, OrderId, OrderLineId, ProductId, WarehouseId,
};
use cruza_engine::argument::DEFAULT_ARGUMENT;
use cruza_engine::stock::NO_STOCK_LABEL;
use cruza_engine::RecommendationService;

fn pid(id: i64) -> ProductId {
    ProductId::new(id)
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A showroom catalog exercising every channel: a gamer mouse with curated
/// complements, a webcam with co-purchase history, December seasonality and an
/// over-committed product.
struct Showroom {
    catalog: Arc<InMemoryCatalog>,
    next_unit: i64,
    next_line: i64,
}

impl Showroom {
    fn new() -> Self {
        let mut fx = Self {
            catalog: Arc::new(InMemoryCatalog::new()),
            next_unit: 1,
            next_line: 1,
        };
        fx.catalog
            .insert_warehouse(Warehouse::new(WarehouseId::new(1), "Almacén Central"));

        fx.product(1, "MG-X500", "MOUSE GAMER RGB X500", 3_500, 0);
        fx.product(2, "SI-001", "SILLA ERGONOMICA PRO", 45_000, 2);

        // Curated complements for the gamer mouse.
        fx.product(10, "TG-01", "TECLADO GAMER X", 12_000, 2);
        fx.product(11, "TM-02", "TECLADO MECANICO Y", 9_000, 2);
        fx.product(12, "PG-03", "PAD GAMER Z", 2_000, 2);
        fx.catalog.insert_product(
            Product::new(pid(13), "TG-99", "TECLADO GAMER VIEJO")
                .with_price_cents(50_000)
                .deactivated(),
        );
        fx.stock_units(13, 2);

        // Co-purchase history for the webcam.
        fx.product(20, "WC-HD", "WEBCAM FULL HD 1080P", 8_000, 2);
        fx.product(21, "TR-01", "TRIPODE FLEXIBLE", 4_000, 2);
        fx.product(22, "AL-01", "ARO DE LUZ LED", 6_000, 2);
        fx.order(200, 100, date(2025, 7, 1), &[20, 21]);
        fx.order(201, 100, date(2025, 7, 8), &[20, 21]);
        fx.order(202, 100, date(2025, 7, 15), &[20, 21]);
        fx.order(203, 100, date(2025, 7, 22), &[20, 22]);

        // December favorites.
        fx.product(50, "NV-01", "GUIRNALDA NAVIDEÑA", 1_500, 2);
        fx.product(51, "NV-02", "ARBOL NAVIDAD MINI", 7_000, 2);
        fx.order(300, 101, date(2025, 12, 5), &[50]);
        fx.order(301, 101, date(2025, 12, 10), &[50]);
        fx.order(302, 102, date(2025, 12, 12), &[50, 51]);

        // One unit on hand, eight committed to an open order.
        fx.product(40, "TE-01", "TERMO ACERO 1L", 2_500, 1);
        fx.catalog
            .insert_order(Order::new(OrderId::new(400), 400, date(2025, 7, 30), ClientId::new(102)));
        let line = fx.line_id();
        fx.catalog.insert_line(OrderLine::new(
            OrderLineId::new(line),
            OrderId::new(400),
            pid(40),
            8.0,
        ));

        fx
    }

    fn product(&mut self, id: i64, code: &str, name: &str, price_cents: i64, units: usize) {
        self.catalog.insert_product(
            Product::new(pid(id), code, name).with_price_cents(price_cents),
        );
        self.stock_units(id, units);
    }

    fn stock_units(&mut self, product: i64, units: usize) {
        for _ in 0..units {
            let unit = InventoryItemId::new(self.next_unit);
            self.next_unit += 1;
            self.catalog
                .insert_inventory(InventoryItem::new(unit, pid(product), WarehouseId::new(1)));
        }
    }

    fn line_id(&mut self) -> i64 {
        let id = self.next_line;
        self.next_line += 1;
        id
    }

    /// Insert a fully-delivered order so history accrues without committing
    /// stock.
    fn order(&mut self, id: i64, client: i64, date: NaiveDate, products: &[i64]) {
        let order_id = OrderId::new(id);
        self.catalog
            .insert_order(Order::new(order_id, id, date, ClientId::new(client)));
        for &product in products {
            let line = self.line_id();
            self.catalog.insert_line(
                OrderLine::new(OrderLineId::new(line), order_id, pid(product), 1.0)
                    .with_delivered(1.0),
            );
        }
    }

    fn service(&self) -> RecommendationService<InMemoryCatalog> {
        RecommendationService::new(Arc::clone(&self.catalog))
    }
}

#[tokio::test]
async fn gamer_mouse_gets_curated_complements_in_rule_order() {
    let service = Showroom::new().service();

    let recs = service.get_recommendations(pid(1), 5).await;
    let ids: Vec<ProductId> = recs.iter().map(|r| r.product_id).collect();
    assert_eq!(ids, vec![pid(10), pid(11), pid(12)]);

    // Both keyboards carry the gaming reason; the pad carries its own.
    assert_eq!(
        recs[0].reason.as_deref(),
        Some("Completa tu setup gaming para mejor rendimiento")
    );
    assert_eq!(recs[1].reason, recs[0].reason);
    assert_eq!(
        recs[2].reason.as_deref(),
        Some("Superficie de control y velocidad para tu sensor")
    );
    assert!(recs.iter().all(|r| r.stock > 0));
}

#[tokio::test]
async fn inactive_products_never_surface() {
    let service = Showroom::new().service();

    let recs = service.get_recommendations(pid(1), 5).await;
    assert!(recs.iter().all(|r| r.product_id != pid(13)));

    let found = service.search("TECLADO", 10).await;
    assert!(found.iter().all(|r| r.product_id != pid(13)));
}

#[tokio::test]
async fn inactive_co_purchase_partner_never_surfaces() {
    let fx = {
        let mut fx = Showroom::new();
        // Deactivated accessory co-purchased more often than any survivor.
        fx.catalog.insert_product(
            Product::new(pid(23), "BR-99", "BRAZO ARTICULADO VIEJO")
                .with_price_cents(5_000)
                .deactivated(),
        );
        fx.stock_units(23, 2);
        for id in 220..225 {
            fx.order(id, 100, date(2025, 7, 28), &[20, 23]);
        }
        fx
    };
    let service = fx.service();

    let recs = service.get_recommendations(pid(20), 5).await;
    let ids: Vec<ProductId> = recs.iter().map(|r| r.product_id).collect();
    assert_eq!(ids, vec![pid(21), pid(22)]);
}

#[tokio::test]
async fn inactive_seasonal_favorite_never_surfaces() {
    let fx = {
        let mut fx = Showroom::new();
        fx.catalog.insert_product(
            Product::new(pid(52), "NV-99", "LUCES NAVIDAD DESCONTINUADAS")
                .with_price_cents(3_000)
                .deactivated(),
        );
        for id in 310..314 {
            fx.order(id, 102, date(2025, 12, 15), &[52]);
        }
        fx
    };
    let service = fx.service();

    let recs = service.get_seasonal_recommendations(12, 5).await;
    let ids: Vec<ProductId> = recs.iter().map(|r| r.product_id).collect();
    assert_eq!(ids, vec![pid(50), pid(51)]);
}

#[tokio::test]
async fn inactive_client_favorite_never_surfaces() {
    let fx = {
        let mut fx = Showroom::new();
        fx.catalog.insert_product(
            Product::new(pid(60), "CF-99", "CAFETERA DESCONTINUADA")
                .with_price_cents(20_000)
                .deactivated(),
        );
        for id in 320..323 {
            fx.order(id, 103, date(2025, 8, 1), &[60]);
        }
        fx.order(323, 103, date(2025, 8, 2), &[50]);
        fx
    };
    let service = fx.service();

    let recs = service.get_client_recommendations(ClientId::new(103), 5).await;
    let ids: Vec<ProductId> = recs.iter().map(|r| r.product_id).collect();
    assert_eq!(ids, vec![pid(50)]);
}

#[tokio::test]
async fn unknown_product_yields_nothing() {
    let service = Showroom::new().service();
    assert!(service.get_recommendations(pid(999_999), 5).await.is_empty());
}

#[tokio::test]
async fn no_habitat_and_no_history_yields_nothing() {
    let service = Showroom::new().service();
    assert!(service.get_recommendations(pid(2), 5).await.is_empty());
}

#[tokio::test]
async fn co_purchase_history_fills_when_no_rules_match() {
    let service = Showroom::new().service();

    let recs = service.get_recommendations(pid(20), 5).await;
    let ids: Vec<ProductId> = recs.iter().map(|r| r.product_id).collect();
    // The tripod co-occurs three times, the ring light once.
    assert_eq!(ids, vec![pid(21), pid(22)]);
    // No category pair matches a webcam and a tripod.
    assert_eq!(recs[0].reason.as_deref(), Some(DEFAULT_ARGUMENT));
}

#[tokio::test]
async fn limit_caps_the_statistical_fill() {
    let service = Showroom::new().service();
    let recs = service.get_recommendations(pid(20), 1).await;
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].product_id, pid(21));
}

#[tokio::test]
async fn recommendations_are_idempotent() {
    let service = Showroom::new().service();
    let first = service.get_recommendations(pid(1), 5).await;
    let second = service.get_recommendations(pid(1), 5).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn committed_stock_clamps_to_zero_with_no_stock_label() {
    let service = Showroom::new().service();

    let found = service.search("TERMO", 10).await;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].stock, 0);
    assert_eq!(found[0].warehouse.as_deref(), Some(NO_STOCK_LABEL));
}

#[tokio::test]
async fn search_ranks_by_stock_then_price() {
    let service = Showroom::new().service();

    let found = service.search("TECLADO", 10).await;
    let ids: Vec<ProductId> = found.iter().map(|r| r.product_id).collect();
    // Equal stock, so the pricier keyboard wins.
    assert_eq!(ids, vec![pid(10), pid(11)]);

    assert!(service.search("   ", 10).await.is_empty());
}

#[tokio::test]
async fn seasonal_ranking_orders_by_month_popularity() {
    let service = Showroom::new().service();

    let recs = service.get_seasonal_recommendations(12, 5).await;
    let ids: Vec<ProductId> = recs.iter().map(|r| r.product_id).collect();
    assert_eq!(ids, vec![pid(50), pid(51)]);

    assert!(service.get_seasonal_recommendations(0, 5).await.is_empty());
    assert!(service.get_seasonal_recommendations(13, 5).await.is_empty());
}

#[tokio::test]
async fn client_history_drives_client_recommendations() {
    let service = Showroom::new().service();

    let recs = service.get_client_recommendations(ClientId::new(101), 5).await;
    assert_eq!(recs.first().map(|r| r.product_id), Some(pid(50)));

    let none = service.get_client_recommendations(ClientId::new(999), 5).await;
    assert!(none.is_empty());
}

#[tokio::test]
async fn top_clients_rank_by_order_count() {
    let service = Showroom::new().service();
    let clients = service.get_top_clients(10).await;
    assert_eq!(
        clients,
        vec![ClientId::new(100), ClientId::new(101), ClientId::new(102)]
    );
}

#[tokio::test]
async fn similar_products_exclude_the_target() {
    let service = Showroom::new().service();
    let similar = service.similar_products(pid(20), 5).await.unwrap();
    assert!(!similar.contains(&pid(20)));
    assert!(!similar.is_empty());
}

/// A store where every query fails.
struct DownStore;

#[async_trait]
impl CatalogStore for DownStore {
    async fn product_by_id(&self, _id: ProductId) -> StoreResult<Option<Product>> {
        Err(StoreError::unavailable("down"))
    }

    async fn products_by_ids(&self, _ids: &[ProductId]) -> StoreResult<Vec<Product>> {
        Err(StoreError::unavailable("down"))
    }

    async fn search_by_name(
        &self,
        _term: &str,
        _include_services: bool,
        _limit: usize,
    ) -> StoreResult<Vec<Product>> {
        Err(StoreError::unavailable("down"))
    }

    async fn search_by_name_or_code(
        &self,
        _term: &str,
        _limit: usize,
    ) -> StoreResult<Vec<Product>> {
        Err(StoreError::unavailable("down"))
    }

    async fn candidate_product_ids(
        &self,
        _exclude: ProductId,
        _limit: usize,
    ) -> StoreResult<Vec<ProductId>> {
        Err(StoreError::unavailable("down"))
    }

    async fn inventory_for_products(
        &self,
        _ids: &[ProductId],
    ) -> StoreResult<Vec<InventoryItem>> {
        Err(StoreError::unavailable("down"))
    }

    async fn warehouses_by_ids(&self, _ids: &[WarehouseId]) -> StoreResult<Vec<Warehouse>> {
        Err(StoreError::unavailable("down"))
    }

    async fn open_lines_for_products(&self, _ids: &[ProductId]) -> StoreResult<Vec<OrderLine>> {
        Err(StoreError::unavailable("down"))
    }

    async fn recent_order_ids_with_product(
        &self,
        _product_id: ProductId,
        _limit: usize,
    ) -> StoreResult<Vec<OrderId>> {
        Err(StoreError::unavailable("down"))
    }

    async fn lines_for_orders(&self, _ids: &[OrderId]) -> StoreResult<Vec<OrderLine>> {
        Err(StoreError::unavailable("down"))
    }

    async fn top_products_in_month(
        &self,
        _month: u32,
        _limit: usize,
    ) -> StoreResult<Vec<ProductId>> {
        Err(StoreError::unavailable("down"))
    }

    async fn top_products_for_client(
        &self,
        _client_id: ClientId,
        _limit: usize,
    ) -> StoreResult<Vec<ProductId>> {
        Err(StoreError::unavailable("down"))
    }

    async fn top_clients(&self, _limit: usize) -> StoreResult<Vec<ClientId>> {
        Err(StoreError::unavailable("down"))
    }

    async fn recent_lines(&self, _limit: usize) -> StoreResult<Vec<OrderLine>> {
        Err(StoreError::unavailable("down"))
    }
}

#[tokio::test]
async fn every_list_operation_degrades_to_empty_when_the_store_is_down() {
    let service = RecommendationService::new(Arc::new(DownStore));

    assert!(service.search("MOUSE", 10).await.is_empty());
    assert!(service.get_recommendations(pid(1), 5).await.is_empty());
    assert!(service.get_seasonal_recommendations(12, 5).await.is_empty());
    assert!(
        service
            .get_client_recommendations(ClientId::new(1), 5)
            .await
            .is_empty()
    );
    assert!(service.get_top_clients(10).await.is_empty());
    // The similarity primitive surfaces the failure instead of degrading.
    assert!(service.similar_products(pid(1), 5).await.is_err());
}

#[tokio::test]
async fn rule_results_precede_statistical_fill() {
    let fx = {
        let mut fx = Showroom::new();
        // Give the gamer mouse purchase history with a product no rule finds.
        fx.product(30, "CB-01", "CABLE USB-C 2M", 1_200, 2);
        fx.order(210, 100, date(2025, 7, 25), &[1, 30]);
        fx.order(211, 100, date(2025, 7, 26), &[1, 30]);
        fx
    };
    let service = fx.service();

    let recs = service.get_recommendations(pid(1), 5).await;
    let ids: Vec<ProductId> = recs.iter().map(|r| r.product_id).collect();
    assert_eq!(ids, vec![pid(10), pid(11), pid(12), pid(30)]);
    // The statistical filler gets a generated argument, not a rule reason.
    assert!(recs[3].reason.is_some());

    let unused = HashSet::from([pid(13)]);
    assert!(recs.iter().all(|r| !unused.contains(&r.product_id)));
}
