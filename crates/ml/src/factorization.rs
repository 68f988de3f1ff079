use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::interaction::Interaction;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MlError {
    #[error("invalid model config: {0}")]
    InvalidConfig(String),
}

/// Matrix-factorization hyperparameters.
///
/// Defaults follow the one-class square-loss setup used in production:
/// learning rate 0.01, regularization 0.025. The seed only affects factor
/// initialization; training itself is a fixed-order pass over the
/// interactions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FactorConfig {
    pub factors: usize,
    pub epochs: usize,
    pub learning_rate: f32,
    pub regularization: f32,
    pub seed: u64,
}

impl Default for FactorConfig {
    fn default() -> Self {
        Self {
            factors: 8,
            epochs: 20,
            learning_rate: 0.01,
            regularization: 0.025,
            seed: 0x00c0_ffee,
        }
    }
}

impl FactorConfig {
    fn validate(&self) -> Result<(), MlError> {
        if self.factors == 0 {
            return Err(MlError::InvalidConfig(
                "factors must be >= 1".to_string(),
            ));
        }
        if self.epochs == 0 {
            return Err(MlError::InvalidConfig("epochs must be >= 1".to_string()));
        }
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(MlError::InvalidConfig(
                "learning_rate must be a finite positive number".to_string(),
            ));
        }
        if !(self.regularization.is_finite() && self.regularization >= 0.0) {
            return Err(MlError::InvalidConfig(
                "regularization must be finite and non-negative".to_string(),
            ));
        }
        Ok(())
    }
}

/// One-class matrix-factorization model over (item, co-item) pairs.
///
/// Trained by plain SGD on square loss against the implicit label. Items never
/// seen in training have no embedding and predict 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorModel {
    config: FactorConfig,
    item_factors: HashMap<i64, Vec<f32>>,
    co_factors: HashMap<i64, Vec<f32>>,
}

/// Deterministic pseudo-random init in [-0.1, 0.1], keyed by (seed, id, role).
fn init_vector(seed: u64, id: i64, role: u64, len: usize) -> Vec<f32> {
    let mut state = seed
        ^ (id as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
        ^ role.wrapping_mul(0xD1B5_4A32_D192_ED03);
    (0..len)
        .map(|_| {
            // xorshift64
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            let unit = (state >> 11) as f32 / (1u64 << 53) as f32;
            (unit - 0.5) * 0.2
        })
        .collect()
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

impl FactorModel {
    /// Train a model from scratch over the given interactions.
    ///
    /// An empty interaction set produces an empty model (every prediction 0)
    /// rather than an error; callers decide whether that is worth serving.
    pub fn train(interactions: &[Interaction], config: FactorConfig) -> Result<Self, MlError> {
        config.validate()?;

        let mut model = Self {
            config,
            item_factors: HashMap::new(),
            co_factors: HashMap::new(),
        };

        for inter in interactions {
            model
                .item_factors
                .entry(inter.item)
                .or_insert_with(|| init_vector(config.seed, inter.item, 1, config.factors));
            model
                .co_factors
                .entry(inter.co_item)
                .or_insert_with(|| init_vector(config.seed, inter.co_item, 2, config.factors));
        }

        let lr = config.learning_rate;
        let reg = config.regularization;

        for _epoch in 0..config.epochs {
            for inter in interactions {
                let p = model.item_factors.get(&inter.item).cloned().unwrap_or_default();
                let q = model.co_factors.get(&inter.co_item).cloned().unwrap_or_default();

                let err = inter.label - dot(&p, &q);

                let p_slot = model.item_factors.get_mut(&inter.item).expect("item factor");
                for k in 0..config.factors {
                    p_slot[k] += lr * (err * q[k] - reg * p[k]);
                }
                let q_slot = model.co_factors.get_mut(&inter.co_item).expect("co factor");
                for k in 0..config.factors {
                    q_slot[k] += lr * (err * p[k] - reg * q[k]);
                }
            }
        }

        Ok(model)
    }

    /// Whether training saw any interaction at all.
    pub fn is_empty(&self) -> bool {
        self.item_factors.is_empty()
    }

    /// Affinity of `co_item` being bought alongside `item`. Unknown items
    /// score 0.
    pub fn predict(&self, item: i64, co_item: i64) -> f32 {
        match (self.item_factors.get(&item), self.co_factors.get(&co_item)) {
            (Some(p), Some(q)) => dot(p, q),
            _ => 0.0,
        }
    }

    /// Score a bounded candidate set against `item` and keep the best `limit`,
    /// descending by score with ties on ascending candidate id.
    pub fn score_candidates(&self, item: i64, candidates: &[i64], limit: usize) -> Vec<(i64, f32)> {
        let mut scored: Vec<(i64, f32)> = candidates
            .iter()
            .map(|&c| (c, self.predict(item, c)))
            .collect();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal).then(a.0.cmp(&b.0)));
        scored.truncate(limit);
        scored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::co_occurrence_pairs;

    fn trained() -> FactorModel {
        // Orders where 1 and 2 always co-occur; 3 floats alone with 4.
        let baskets = vec![
            vec![1, 2],
            vec![1, 2],
            vec![1, 2],
            vec![1, 2],
            vec![3, 4],
        ];
        let pairs = co_occurrence_pairs(&baskets);
        FactorModel::train(&pairs, FactorConfig::default()).unwrap()
    }

    #[test]
    fn co_purchased_pair_outscores_unseen_pair() {
        let model = trained();
        assert!(model.predict(1, 2) > model.predict(1, 4));
    }

    #[test]
    fn unknown_items_predict_zero() {
        let model = trained();
        assert_eq!(model.predict(99, 2), 0.0);
        assert_eq!(model.predict(1, 99), 0.0);
    }

    #[test]
    fn training_is_deterministic() {
        let a = trained();
        let b = trained();
        assert_eq!(a.predict(1, 2), b.predict(1, 2));
        assert_eq!(a.predict(3, 4), b.predict(3, 4));
    }

    #[test]
    fn empty_training_set_yields_empty_model() {
        let model = FactorModel::train(&[], FactorConfig::default()).unwrap();
        assert!(model.is_empty());
        assert_eq!(model.predict(1, 2), 0.0);
    }

    #[test]
    fn rejects_degenerate_config() {
        let config = FactorConfig {
            factors: 0,
            ..FactorConfig::default()
        };
        assert!(matches!(
            FactorModel::train(&[], config),
            Err(MlError::InvalidConfig(_))
        ));

        let config = FactorConfig {
            learning_rate: f32::NAN,
            ..FactorConfig::default()
        };
        assert!(matches!(
            FactorModel::train(&[], config),
            Err(MlError::InvalidConfig(_))
        ));
    }

    #[test]
    fn score_candidates_ranks_best_first_and_caps() {
        let model = trained();
        let top = model.score_candidates(1, &[2, 3, 4], 2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].0, 2);
        assert!(top[0].1 >= top[1].1);
    }
}
