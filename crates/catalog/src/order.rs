use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use cruza_core::{ClientId, OrderId, OrderLineId, ProductId};

/// Sales order note header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub number: i64,
    pub date: NaiveDate,
    /// Client delivery address, the client key all per-client grouping uses.
    pub client_id: ClientId,
    pub voided: bool,
    pub closed: bool,
    pub approved: bool,
}

impl Order {
    pub fn new(id: OrderId, number: i64, date: NaiveDate, client_id: ClientId) -> Self {
        Self {
            id,
            number,
            date,
            client_id,
            voided: false,
            closed: false,
            approved: false,
        }
    }

    pub fn voided(mut self) -> Self {
        self.voided = true;
        self
    }
}

/// Sales order note line.
///
/// `order_id` is nullable in the backing store (orphaned lines exist);
/// `quantity_delivered` may exceed `quantity` on inconsistent data, so readers
/// must clamp the open deficit at zero rather than trust the difference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub id: OrderLineId,
    pub order_id: Option<OrderId>,
    pub product_id: ProductId,
    pub quantity: f64,
    pub quantity_delivered: Option<f64>,
    pub delivery_complete: bool,
}

impl OrderLine {
    pub fn new(id: OrderLineId, order_id: OrderId, product_id: ProductId, quantity: f64) -> Self {
        Self {
            id,
            order_id: Some(order_id),
            product_id,
            quantity,
            quantity_delivered: None,
            delivery_complete: false,
        }
    }

    pub fn with_delivered(mut self, delivered: f64) -> Self {
        self.quantity_delivered = Some(delivered);
        self
    }

    pub fn delivered_in_full(mut self) -> Self {
        self.delivery_complete = true;
        self
    }

    /// Quantity still owed to the client, clamped at zero.
    pub fn open_quantity(&self) -> f64 {
        if self.delivery_complete {
            return 0.0;
        }
        (self.quantity - self.quantity_delivered.unwrap_or(0.0)).max(0.0)
    }
}
