use std::sync::{Arc, OnceLock, PoisonError, RwLock};

use indexmap::IndexMap;
use sha2::{Digest, Sha256};
use tracing::trace;

use crate::Result;
use crate::model::Ad;
use crate::result::ComplianceResult;

use super::{Evaluate, Evaluator};

type Slot = Arc<OnceLock<ComplianceResult>>;

/// Entries kept by [`EvaluationCache::new`].
pub const DEFAULT_MAX_ENTRIES: usize = 4096;

/// Content-addressed memo over an [`Evaluator`].
///
/// Keys are the SHA-256 of the ad's canonical JSON together with the
/// evaluator's rule fingerprint and scoring weights, so identical snapshots
/// share one result no matter when or how often they are evaluated.
/// Concurrent callers with the same snapshot run the rules once.
///
/// At most `max_entries` results are held; inserting past that evicts the
/// oldest entry.
#[derive(Debug)]
pub struct EvaluationCache {
    evaluator: Evaluator,
    salt: String,
    max_entries: usize,
    entries: RwLock<IndexMap<String, Slot>>,
}

impl EvaluationCache {
    #[must_use]
    pub fn new(evaluator: Evaluator) -> Self {
        Self::with_max_entries(evaluator, DEFAULT_MAX_ENTRIES)
    }

    /// A cache holding at most `max_entries` results (minimum 1).
    #[must_use]
    pub fn with_max_entries(evaluator: Evaluator, max_entries: usize) -> Self {
        let weights = evaluator.weights();
        let salt = format!(
            "{}:{}:{}:{}",
            evaluator.registry().fingerprint(),
            weights.error,
            weights.warning,
            weights.info
        );
        Self {
            evaluator,
            salt,
            max_entries: max_entries.max(1),
            entries: RwLock::new(IndexMap::new()),
        }
    }

    #[must_use]
    pub const fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// Cached [`Evaluator::evaluate`].
    ///
    /// Invalid ads are rejected before touching the cache and never stored.
    ///
    /// # Errors
    /// Returns `InvalidAd` for a structurally invalid ad, or `JsonParse` if
    /// the ad cannot be serialized for hashing.
    pub fn evaluate(&self, ad: &Ad) -> Result<ComplianceResult> {
        ad.validate()?;
        let key = self.key(ad)?;

        let existing = self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
            .cloned();
        let slot = if let Some(slot) = existing {
            slot
        } else {
            let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);
            if !entries.contains_key(&key) && entries.len() >= self.max_entries {
                entries.shift_remove_index(0);
                trace!(max_entries = self.max_entries, "evaluation cache evicted oldest entry");
            }
            Arc::clone(entries.entry(key.clone()).or_default())
        };

        let mut computed = false;
        let result = slot.get_or_init(|| {
            computed = true;
            self.evaluator.evaluate_validated(ad)
        });
        trace!(key = %key, hit = !computed, "evaluation cache");
        Ok(result.clone())
    }

    #[must_use]
    pub const fn max_entries(&self) -> usize {
        self.max_entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    fn key(&self, ad: &Ad) -> Result<String> {
        let json = serde_json::to_vec(ad)?;
        let mut hasher = Sha256::new();
        hasher.update(self.salt.as_bytes());
        hasher.update([0]);
        hasher.update(&json);
        Ok(format!("{:x}", hasher.finalize()))
    }
}

impl Evaluate for EvaluationCache {
    fn evaluate(&self, ad: &Ad) -> Result<ComplianceResult> {
        Self::evaluate(self, ad)
    }
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;
