//! Best-effort degrade-on-error modeling.
//!
//! Store failures inside a sub-step are never control flow for callers: each
//! sub-step either contributes a value or a [`SoftFailure`] marker, and the
//! orchestrator treats soft failures as empty contributions. The failure is
//! logged exactly once, at the boundary where it is converted.

use cruza_catalog::StoreError;

/// Marker for a sub-step that failed and contributed nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoftFailure;

/// Result of a sub-step that is allowed to degrade.
pub type Soft<T> = Result<T, SoftFailure>;

/// Convert a store result into a soft contribution, logging the failure.
pub fn soften<T>(step: &'static str, result: Result<T, StoreError>) -> Soft<T> {
    result.map_err(|err| {
        tracing::warn!(step, error = %err, "sub-step degraded, contributing nothing");
        SoftFailure
    })
}
