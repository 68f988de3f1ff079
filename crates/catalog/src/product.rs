use serde::{Deserialize, Serialize};

use cruza_core::{InventoryItemId, ProductId, WarehouseId};

/// Catalog product row.
///
/// `price_cents` is the e-commerce list price in the smallest currency unit;
/// it is nullable in the backing store. `ecommerce_description` is the
/// storefront copy and is preferred over `description` when extracting display
/// features.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub ecommerce_description: Option<String>,
    pub price_cents: Option<i64>,
    pub inactive: bool,
    pub is_service: bool,
    /// Back-reference to the product this one was derived from, as a plain id.
    pub origin_product: Option<ProductId>,
}

impl Product {
    pub fn new(id: ProductId, code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id,
            code: code.into(),
            name: name.into(),
            description: None,
            ecommerce_description: None,
            price_cents: None,
            inactive: false,
            is_service: false,
            origin_product: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_ecommerce_description(mut self, description: impl Into<String>) -> Self {
        self.ecommerce_description = Some(description.into());
        self
    }

    pub fn with_price_cents(mut self, price_cents: i64) -> Self {
        self.price_cents = Some(price_cents);
        self
    }

    pub fn as_service(mut self) -> Self {
        self.is_service = true;
        self
    }

    pub fn deactivated(mut self) -> Self {
        self.inactive = true;
        self
    }

    /// Text used for feature extraction: storefront copy first, plain
    /// description as fallback.
    pub fn display_description(&self) -> &str {
        self.ecommerce_description
            .as_deref()
            .or(self.description.as_deref())
            .unwrap_or("")
    }
}

/// One physical/serialized inventory unit of a product.
///
/// A unit counts toward physical stock only while it is active **and** sits in
/// a known warehouse (units in transit have no warehouse id).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: InventoryItemId,
    pub product_id: ProductId,
    pub warehouse_id: Option<WarehouseId>,
    pub inactive: bool,
}

impl InventoryItem {
    pub fn new(id: InventoryItemId, product_id: ProductId, warehouse_id: WarehouseId) -> Self {
        Self {
            id,
            product_id,
            warehouse_id: Some(warehouse_id),
            inactive: false,
        }
    }

    pub fn in_transit(id: InventoryItemId, product_id: ProductId) -> Self {
        Self {
            id,
            product_id,
            warehouse_id: None,
            inactive: false,
        }
    }

    pub fn deactivated(mut self) -> Self {
        self.inactive = true;
        self
    }

    /// Whether this unit counts toward physical stock.
    pub fn counts_toward_stock(&self) -> bool {
        !self.inactive && self.warehouse_id.is_some()
    }
}
