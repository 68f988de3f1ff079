//! `cruza-ml`
//!
//! **Responsibility:** Optional ML subsystem boundary.
//!
//! This crate is intentionally **not** part of the catalog domain:
//! - It must not depend on catalog entities or the store boundary.
//! - It must not mutate domain state.
//! - It is fully deterministic: same interactions + same config = same model.
//!
//! Callers (the engine crate) turn order history into [`Interaction`] pairs
//! and hand them to [`FactorModel::train`].

pub mod factorization;
pub mod interaction;

pub use factorization::{FactorConfig, FactorModel, MlError};
pub use interaction::{Interaction, co_occurrence_pairs};
