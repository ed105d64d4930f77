//! Per-dispatch accounting structures.

/// Normalized result of a single remote call.
///
/// Remote faults never escape the operation layer; they arrive here as
/// `success == false` with a human-readable reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationOutcome {
    pub success: bool,
    pub reason: Option<String>,
}

impl OperationOutcome {
    pub fn ok() -> Self {
        Self {
            success: true,
            reason: None,
        }
    }

    pub fn fail(reason: impl Into<String>) -> Self {
        Self {
            success: false,
            reason: Some(reason.into()),
        }
    }
}

/// Success/failure tally for one link category.
///
/// Invariant: `success + failure` equals the number of attempted items. For
/// per-item paths `reasons.len() == failure`; the batched generic-URL path
/// records one aggregated reason for the whole batch instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryReport {
    pub success: usize,
    pub failure: usize,
    pub reasons: Vec<String>,
}

impl CategoryReport {
    /// Folds a per-item outcome into the tally. On failure the reason is
    /// prefixed with the item itself so the user can tell which link failed.
    pub fn record_item(&mut self, item: &str, outcome: OperationOutcome) {
        if outcome.success {
            self.success += 1;
        } else {
            self.failure += 1;
            let reason = outcome.reason.unwrap_or_else(|| "unknown error".to_string());
            self.reasons.push(format!("{item}: {reason}"));
        }
    }

    /// Folds a whole-batch outcome into the tally: all `count` items are
    /// credited as succeeded or failed together, with at most one reason.
    pub fn record_batch(&mut self, count: usize, outcome: OperationOutcome) {
        if outcome.success {
            self.success += count;
        } else {
            self.failure += count;
            self.reasons
                .push(outcome.reason.unwrap_or_else(|| "unknown error".to_string()));
        }
    }

    /// Absorbs another report into this one, preserving reason order.
    pub fn merge(&mut self, other: CategoryReport) {
        self.success += other.success;
        self.failure += other.failure;
        self.reasons.extend(other.reasons);
    }

    /// Number of attempted items.
    pub fn attempted(&self) -> usize {
        self.success + self.failure
    }
}

/// Root artifact of a mixed dispatch: share transfers and offline adds,
/// tallied separately so the renderer can show each category on its own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MixedReport {
    pub share: CategoryReport,
    pub offline: CategoryReport,
}
