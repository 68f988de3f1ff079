use serde::{Deserialize, Serialize};

use cruza_catalog::Product;
use cruza_core::ProductId;

use crate::features;

/// One recommended product, enriched for display.
///
/// Built fresh per request and never persisted. Carries no references back to
/// orders or other products, so serialization never meets a cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub product_id: ProductId,
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub price_cents: Option<i64>,
    /// Persuasive one-liner for the seller; set by the rule that produced the
    /// candidate or by the sales argument generator.
    pub reason: Option<String>,
    /// Net available-to-promise stock; 0 until enriched.
    pub stock: i64,
    /// Human-readable warehouse label; `None` until enriched.
    pub warehouse: Option<String>,
    pub features: Vec<String>,
}

impl Recommendation {
    /// Build the DTO from a catalog product, deriving display features from
    /// its description (mock tag when the description yields nothing).
    pub fn from_product(product: &Product) -> Self {
        let mut feats = features::extract_features(product.display_description());
        if feats.is_empty() && !product.name.is_empty() {
            feats = features::mock_features(&product.name);
        }

        Self {
            product_id: product.id,
            code: product.code.clone(),
            name: product.name.clone(),
            description: product.description.clone(),
            price_cents: product.price_cents,
            reason: None,
            stock: 0,
            warehouse: None,
            features: feats,
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_features_from_storefront_copy() {
        let product = Product::new(ProductId::new(1), "M-01", "MOUSE GAMER RGB")
            .with_ecommerce_description("Sensor 16000 DPI;RGB configurable");
        let rec = Recommendation::from_product(&product);
        assert_eq!(rec.features, vec!["Sensor 16000 DPI", "RGB configurable"]);
    }

    #[test]
    fn falls_back_to_mock_features() {
        let product = Product::new(ProductId::new(1), "M-01", "MOUSE GAMER RGB");
        let rec = Recommendation::from_product(&product);
        assert_eq!(rec.features, vec!["Sensor Óptico Gamer"]);
    }

    #[test]
    fn starts_unenriched() {
        let product = Product::new(ProductId::new(1), "M-01", "MOUSE GAMER RGB");
        let rec = Recommendation::from_product(&product);
        assert_eq!(rec.stock, 0);
        assert!(rec.warehouse.is_none());
        assert!(rec.reason.is_none());
    }
}
