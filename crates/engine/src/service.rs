//! Recommendation orchestrator.
//!
//! Composes the habitat rules, complement search, stock aggregation,
//! co-purchase mining and latent-factor channel into the public operations.
//! Per call the flow is: resolve product, rule phase, then (if short of
//! `limit`) statistical phase. Rule-phase results always precede statistical
//! ones; final ordering is insertion order.

use std::collections::HashSet;
use std::sync::Arc;

use cruza_catalog::CatalogStore;
use cruza_core::{ClientId, ProductId};
use cruza_ml::FactorConfig;

use crate::argument::sales_argument;
use crate::dto::Recommendation;
use crate::habitat;
use crate::latent::{LatentError, LatentFactorRecommender};
use crate::miner::CoPurchaseMiner;
use crate::soft::soften;
use crate::stock::StockAggregator;

/// Engine tuning knobs. The defaults are the production values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    /// Candidates fetched per complement search term before stock filtering.
    pub candidate_window: usize,
    /// Recent orders sampled per target by the co-purchase miner.
    pub recent_order_sample: usize,
    /// Extra statistical candidates fetched to survive exclusion filtering.
    pub statistical_overfetch: usize,
    /// Order lines sampled for latent-factor training.
    pub training_sample: usize,
    /// Matrix-factorization hyperparameters.
    pub model: FactorConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            candidate_window: 200,
            recent_order_sample: 50,
            statistical_overfetch: 20,
            training_sample: 5000,
            model: FactorConfig::default(),
        }
    }
}

/// Search terms that denote a service, where service-type products are
/// legitimate candidates.
const SERVICE_TERMS: [&str; 2] = ["SERVICIO", "INSTALACION"];

/// The public recommendation surface.
///
/// Stateless across calls except for the latent-factor model, which is lazily
/// trained once per process. Every operation degrades to a shorter (possibly
/// empty) list on store failure; none of them error.
#[derive(Debug)]
pub struct RecommendationService<S> {
    store: Arc<S>,
    stock: StockAggregator<S>,
    miner: CoPurchaseMiner<S>,
    latent: LatentFactorRecommender<S>,
    config: EngineConfig,
}

impl<S: CatalogStore> RecommendationService<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self::with_config(store, EngineConfig::default())
    }

    pub fn with_config(store: Arc<S>, config: EngineConfig) -> Self {
        let stock = StockAggregator::new(Arc::clone(&store));
        let miner = CoPurchaseMiner::new(
            Arc::clone(&store),
            config.recent_order_sample,
            config.statistical_overfetch,
        );
        let latent = LatentFactorRecommender::new(
            Arc::clone(&store),
            config.model,
            config.training_sample,
            config.candidate_window,
        );
        Self {
            store,
            stock,
            miner,
            latent,
            config,
        }
    }

    /// Free-text search over name and code, stock-enriched, best-stocked
    /// first. A blank term yields nothing.
    pub async fn search(&self, term: &str, limit: usize) -> Vec<Recommendation> {
        let term = term.trim();
        if term.is_empty() {
            return Vec::new();
        }

        let products = soften("search", self.store.search_by_name_or_code(term, limit).await)
            .unwrap_or_default();
        if products.is_empty() {
            return Vec::new();
        }

        let mut recs: Vec<Recommendation> =
            products.iter().map(Recommendation::from_product).collect();
        let _ = soften("search stock enrichment", self.stock.enrich(&mut recs).await);

        recs.sort_by(|a, b| {
            b.stock
                .cmp(&a.stock)
                .then(b.price_cents.unwrap_or(i64::MIN).cmp(&a.price_cents.unwrap_or(i64::MIN)))
        });
        recs
    }

    /// Cross-sell recommendations for a target product: curated habitat rules
    /// first, statistical co-purchase fill when the rules under-produce.
    pub async fn get_recommendations(
        &self,
        product_id: ProductId,
        limit: usize,
    ) -> Vec<Recommendation> {
        let product = soften("resolve product", self.store.product_by_id(product_id).await)
            .unwrap_or_default();
        let Some(product) = product else {
            return Vec::new();
        };

        // Rule phase.
        let mut results = Vec::new();
        for rule in habitat::plan_for(&product.name) {
            let found = self
                .find_complements(rule.terms, rule.reason, rule.count)
                .await;
            results.extend(found);
        }
        tracing::debug!(
            product = %product_id,
            rule_candidates = results.len(),
            "rule phase complete"
        );

        if results.len() >= limit {
            results.truncate(limit);
            return results;
        }

        // Statistical phase: fill remaining slots, excluding the target and
        // everything already picked. Failures contribute nothing.
        let slots = limit - results.len();
        let mut exclude: HashSet<ProductId> = results.iter().map(|r| r.product_id).collect();
        exclude.insert(product_id);

        let mined = soften(
            "co-purchase mining",
            self.miner
                .statistical_complements(product_id, &exclude, slots)
                .await,
        )
        .unwrap_or_default();

        if !mined.is_empty() {
            let fill = self.resolve_enriched(&mined).await;
            results.extend(
                fill.into_iter()
                    .filter(|r| !exclude.contains(&r.product_id))
                    .map(|r| {
                        let reason = sales_argument(&product.name, &r.name).to_string();
                        r.with_reason(reason)
                    })
                    .take(slots),
            );
        }

        results.truncate(limit);
        results
    }

    /// Products most ordered in the given calendar month (1..=12).
    pub async fn get_seasonal_recommendations(
        &self,
        month: u32,
        limit: usize,
    ) -> Vec<Recommendation> {
        if !(1..=12).contains(&month) {
            return Vec::new();
        }
        let ids = soften(
            "seasonal ranking",
            self.store.top_products_in_month(month, limit).await,
        )
        .unwrap_or_default();
        self.resolve_enriched(&ids).await
    }

    /// Products the given client orders most often.
    pub async fn get_client_recommendations(
        &self,
        client_id: ClientId,
        limit: usize,
    ) -> Vec<Recommendation> {
        let ids = soften(
            "client ranking",
            self.store.top_products_for_client(client_id, limit).await,
        )
        .unwrap_or_default();
        self.resolve_enriched(&ids).await
    }

    /// Client ids ranked by order count. Raw ids, no enrichment.
    pub async fn get_top_clients(&self, limit: usize) -> Vec<ClientId> {
        soften("top clients", self.store.top_clients(limit).await).unwrap_or_default()
    }

    /// Item-item similarity from the latent-factor channel. Standalone
    /// scoring primitive; not part of the default orchestration path.
    pub async fn similar_products(
        &self,
        product_id: ProductId,
        limit: usize,
    ) -> Result<Vec<ProductId>, LatentError> {
        self.latent.similar_products(product_id, limit).await
    }

    /// Try each search term in order and keep the first `count` in-stock
    /// candidates found across them, premium-priced first within a term.
    async fn find_complements(
        &self,
        terms: &[&str],
        reason: &str,
        count: usize,
    ) -> Vec<Recommendation> {
        let mut found: Vec<Recommendation> = Vec::new();

        for term in terms {
            if found.len() >= count {
                break;
            }

            let include_services = habitat::contains_any(term, &SERVICE_TERMS);
            let batch = soften(
                "complement search",
                self.store
                    .search_by_name(term, include_services, self.config.candidate_window)
                    .await,
            )
            .unwrap_or_default();
            if batch.is_empty() {
                continue;
            }

            let mut recs: Vec<Recommendation> = batch
                .iter()
                .map(|p| Recommendation::from_product(p).with_reason(reason))
                .collect();
            if soften("complement stock enrichment", self.stock.enrich(&mut recs).await).is_err() {
                continue;
            }

            let room = count - found.len();
            found.extend(recs.into_iter().filter(|r| r.stock > 0).take(room));
        }

        found
    }

    /// Resolve ids to enriched DTOs, preserving the input ranking. Failures
    /// degrade to an empty contribution.
    async fn resolve_enriched(&self, ids: &[ProductId]) -> Vec<Recommendation> {
        if ids.is_empty() {
            return Vec::new();
        }

        let products = soften("resolve products", self.store.products_by_ids(ids).await)
            .unwrap_or_default();
        let mut recs: Vec<Recommendation> =
            products.iter().map(Recommendation::from_product).collect();
        let _ = soften("stock enrichment", self.stock.enrich(&mut recs).await);
        recs
    }
}
