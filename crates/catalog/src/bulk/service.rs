//! Bulk service: per-item read, mutate, write with independent outcomes.

use std::collections::HashSet;
use std::sync::Arc;

use rust_decimal::Decimal;
use tracing::{info, warn};
use uuid::Uuid;

use super::types::{
    BulkAction, BulkFailure, BulkRequest, BulkResult, BulkTarget, MAX_PRICE_PERCENT, PriceOverflow,
};
use crate::error::{AppError, AppResult};
use crate::metrics::Metrics;
use crate::store::CatalogStore;

#[derive(Clone)]
pub struct BulkService {
    store: Arc<dyn CatalogStore>,
    metrics: Arc<Metrics>,
    max_batch: usize,
}

impl BulkService {
    pub fn new(store: Arc<dyn CatalogStore>, metrics: Arc<Metrics>, max_batch: usize) -> Self {
        Self {
            store,
            metrics,
            max_batch,
        }
    }

    pub async fn materials(&self, request: BulkRequest) -> AppResult<BulkResult> {
        let ids = self.validate(&request)?;
        let now = chrono::Utc::now().timestamp();
        let mut result = BulkResult {
            requested: ids.len(),
            ..Default::default()
        };

        for id in ids {
            let outcome = match self.store.get_material(id).await {
                Ok(Some(mut material)) => match material.apply(request.action, now) {
                    Ok(()) => self.store.save_material(&material).await.map(Outcome::from),
                    Err(PriceOverflow) => Ok(Outcome::PriceOverflow),
                },
                Ok(None) => Ok(Outcome::Missing),
                Err(e) => Err(e),
            };
            record(&mut result, id, outcome);
        }

        self.finish("material", request.action, &result);
        Ok(result)
    }

    pub async fn labor_categories(&self, request: BulkRequest) -> AppResult<BulkResult> {
        let ids = self.validate(&request)?;
        let now = chrono::Utc::now().timestamp();
        let mut result = BulkResult {
            requested: ids.len(),
            ..Default::default()
        };

        for id in ids {
            let outcome = match self.store.get_labor_category(id).await {
                Ok(Some(mut labor)) => match labor.apply(request.action, now) {
                    Ok(()) => self.store.save_labor_category(&labor).await.map(Outcome::from),
                    Err(PriceOverflow) => Ok(Outcome::PriceOverflow),
                },
                Ok(None) => Ok(Outcome::Missing),
                Err(e) => Err(e),
            };
            record(&mut result, id, outcome);
        }

        self.finish("labor", request.action, &result);
        Ok(result)
    }

    /// Reject malformed requests up front and de-duplicate ids, keeping order.
    fn validate(&self, request: &BulkRequest) -> AppResult<Vec<Uuid>> {
        if request.ids.is_empty() {
            return Err(AppError::invalid("ids must not be empty"));
        }
        if request.ids.len() > self.max_batch {
            return Err(AppError::invalid(format!(
                "at most {} ids may be updated at once",
                self.max_batch
            )));
        }
        if let BulkAction::AdjustPrice { percent } = request.action {
            if percent < -Decimal::ONE_HUNDRED {
                return Err(AppError::invalid("percent must not be below -100"));
            }
            if percent > Decimal::from(MAX_PRICE_PERCENT) {
                return Err(AppError::invalid(format!(
                    "percent must not be above {MAX_PRICE_PERCENT}"
                )));
            }
        }

        let mut seen = HashSet::new();
        Ok(request
            .ids
            .iter()
            .copied()
            .filter(|id| seen.insert(*id))
            .collect())
    }

    fn finish(&self, entity: &str, action: BulkAction, result: &BulkResult) {
        self.metrics.record_bulk(
            entity,
            result.succeeded as u64,
            result.failed.len() as u64,
        );
        info!(
            entity,
            action = action.name(),
            requested = result.requested,
            succeeded = result.succeeded,
            failed = result.failed.len(),
            "bulk update"
        );
    }
}

/// Per-item result before it is folded into a [`BulkResult`].
enum Outcome {
    Saved,
    Missing,
    PriceOverflow,
}

impl From<bool> for Outcome {
    fn from(saved: bool) -> Self {
        if saved { Outcome::Saved } else { Outcome::Missing }
    }
}

fn record(result: &mut BulkResult, id: Uuid, outcome: anyhow::Result<Outcome>) {
    match outcome {
        Ok(Outcome::Saved) => result.succeeded += 1,
        Ok(Outcome::Missing) => result.failed.push(BulkFailure {
            id,
            reason: "not found".to_string(),
        }),
        Ok(Outcome::PriceOverflow) => result.failed.push(BulkFailure {
            id,
            reason: PriceOverflow.to_string(),
        }),
        Err(e) => {
            warn!(%id, error = %e, "bulk item failed");
            result.failed.push(BulkFailure {
                id,
                reason: "update failed".to_string(),
            });
        }
    }
}
