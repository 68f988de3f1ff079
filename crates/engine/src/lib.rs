//! Cross-sell recommendation engine.
//!
//! Given a target product, a client, a calendar month or a free-text term,
//! this crate produces enriched [`Recommendation`] DTOs by composing four
//! channels over the read-only [`cruza_catalog::CatalogStore`]:
//!
//! 1. a hand-curated habitat rule base ([`habitat`]),
//! 2. a statistical co-purchase miner ([`miner`]) that fills remaining slots,
//! 3. a stock-aware availability filter ([`stock`]),
//! 4. a latent-factor similarity model ([`latent`]) exposed as a standalone
//!    scoring channel.
//!
//! Nothing in this crate is fatal: store failures degrade to shorter result
//! lists (see [`soft`]), never to errors at the public surface.

pub mod argument;
pub mod dto;
pub mod features;
pub mod habitat;
pub mod latent;
pub mod miner;
pub mod service;
pub mod soft;
pub mod stock;

pub use argument::sales_argument;
pub use dto::Recommendation;
pub use latent::{LatentError, LatentFactorRecommender};
pub use miner::CoPurchaseMiner;
pub use service::{EngineConfig, RecommendationService};
pub use stock::StockAggregator;
