use serde::{Deserialize, Serialize};

/// One implicit "bought together" observation.
///
/// The matrix-factorization model reads `item` as the matrix row and
/// `co_item` as the column. Labels are always 1 — absence of a pair means
/// "unknown", never "negative" (one-class loss).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interaction {
    pub item: i64,
    pub co_item: i64,
    pub label: f32,
}

impl Interaction {
    pub fn bought_together(item: i64, co_item: i64) -> Self {
        Self {
            item,
            co_item,
            label: 1.0,
        }
    }
}

/// Expand baskets into ordered pairs of items at distinct positions.
///
/// Every (a, b) at positions i != j in the same basket yields one interaction,
/// in both directions, so the learned affinity is symmetric in coverage
/// (though not in value).
pub fn co_occurrence_pairs(baskets: &[Vec<i64>]) -> Vec<Interaction> {
    let mut pairs = Vec::new();
    for basket in baskets {
        for (i, &a) in basket.iter().enumerate() {
            for (j, &b) in basket.iter().enumerate() {
                if i == j {
                    continue;
                }
                pairs.push(Interaction::bought_together(a, b));
            }
        }
    }
    pairs
}
