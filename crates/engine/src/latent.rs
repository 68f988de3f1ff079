//! Latent-factor similarity channel.
//!
//! Wraps [`cruza_ml::FactorModel`] with lazy, process-lifetime training over
//! recent order history. Independent of the rule/statistical channels: the
//! orchestrator never calls it, callers invoke it directly for item-item
//! similarity.

use std::collections::BTreeMap;
use std::sync::Arc;

use thiserror::Error;
use tokio::sync::OnceCell;

use cruza_catalog::{CatalogStore, StoreError};
use cruza_core::{OrderId, ProductId};
use cruza_ml::{FactorConfig, FactorModel, MlError, co_occurrence_pairs};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LatentError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Model(#[from] MlError),
}

/// Lazily trained item-item similarity scorer.
///
/// The model is built at most once per process: concurrent first calls are
/// serialized through the `OnceCell`, so at most one training pass runs and
/// everyone else awaits its result.
#[derive(Debug)]
pub struct LatentFactorRecommender<S> {
    store: Arc<S>,
    config: FactorConfig,
    /// How many recent order lines to sample for training.
    training_sample: usize,
    /// Bound on the candidate set scored per request.
    candidate_window: usize,
    model: OnceCell<FactorModel>,
}

impl<S: CatalogStore> LatentFactorRecommender<S> {
    pub fn new(
        store: Arc<S>,
        config: FactorConfig,
        training_sample: usize,
        candidate_window: usize,
    ) -> Self {
        Self {
            store,
            config,
            training_sample,
            candidate_window,
            model: OnceCell::new(),
        }
    }

    async fn model(&self) -> Result<&FactorModel, LatentError> {
        self.model
            .get_or_try_init(|| self.train())
            .await
    }

    async fn train(&self) -> Result<FactorModel, LatentError> {
        let lines = self.store.recent_lines(self.training_sample).await?;

        // Group lines into baskets; BTreeMap keeps basket order stable so
        // training is reproducible.
        let mut baskets: BTreeMap<OrderId, Vec<i64>> = BTreeMap::new();
        for line in &lines {
            let Some(order_id) = line.order_id else {
                continue;
            };
            baskets
                .entry(order_id)
                .or_default()
                .push(line.product_id.as_i64());
        }

        let baskets: Vec<Vec<i64>> = baskets.into_values().collect();
        let pairs = co_occurrence_pairs(&baskets);
        tracing::debug!(
            lines = lines.len(),
            baskets = baskets.len(),
            pairs = pairs.len(),
            "training latent-factor model"
        );

        Ok(FactorModel::train(&pairs, self.config)?)
    }

    /// Top-`limit` similar products to `product_id` from a bounded candidate
    /// set of active, non-self products, best affinity first.
    ///
    /// Trains on first use.
    pub async fn similar_products(
        &self,
        product_id: ProductId,
        limit: usize,
    ) -> Result<Vec<ProductId>, LatentError> {
        let model = self.model().await?;

        let candidates = self
            .store
            .candidate_product_ids(product_id, self.candidate_window)
            .await?;
        let candidate_ids: Vec<i64> = candidates.iter().map(|id| id.as_i64()).collect();

        Ok(model
            .score_candidates(product_id.as_i64(), &candidate_ids, limit)
            .into_iter()
            .map(|(id, _score)| ProductId::new(id))
            .collect())
    }
}
