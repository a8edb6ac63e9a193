//! Accountant: folds each step of an iteration into the session state.
//!
//! Counts designs, accumulates scores and rewards, and records the
//! network's verdict for every iteration.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::network::BroadcastReceipt;
use crate::types::{Design, MinerState, ValidationScores};

// ---------------------------------------------------------------------------
// Iteration report
// ---------------------------------------------------------------------------

/// Everything that happened in one generate→validate→broadcast iteration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IterationReport {
    pub iteration: u32,
    pub design: Design,
    pub scores: ValidationScores,
    pub reward: Decimal,
    pub accepted: bool,
    pub receipt_id: Option<String>,
    pub timestamp: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Accountant
// ---------------------------------------------------------------------------

pub struct Accountant;

impl Accountant {
    /// A design has been generated.
    pub fn record_design(state: &mut MinerState) {
        state.designs_generated += 1;
    }

    /// A design has been scored and earned `reward`.
    pub fn record_validation(state: &mut MinerState, scores: &ValidationScores, reward: Decimal) {
        state.total_score += scores.total;
        state.total_reward += reward;
    }

    /// Close out an iteration with the broadcast outcome (`None` when the
    /// broadcast itself failed).
    pub fn reconcile(
        state: &mut MinerState,
        iteration: u32,
        design: Design,
        scores: ValidationScores,
        reward: Decimal,
        receipt: Option<&BroadcastReceipt>,
    ) -> IterationReport {
        state.iterations_run += 1;

        let accepted = receipt.map(|r| r.accepted).unwrap_or(false);
        if accepted {
            state.broadcasts_accepted += 1;
        } else {
            state.broadcasts_rejected += 1;
            warn!(iteration, design_id = %design.id, "Design not accepted by network");
        }

        let report = IterationReport {
            iteration,
            design,
            scores,
            reward,
            accepted,
            receipt_id: receipt.map(|r| r.receipt_id.clone()),
            timestamp: Utc::now(),
        };

        info!(
            iteration,
            design = %report.design.name,
            score = format!("{:.3}", report.scores.total),
            reward = format!("{:.6}", report.reward.round_dp(6)),
            avg_score = format!("{:.3}", state.average_score()),
            accepted,
            "Iteration reconciled"
        );

        report
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn scores(total: f64) -> ValidationScores {
        ValidationScores {
            quantum_resistance: total,
            performance: total,
            efficiency: total,
            correctness: total,
            total,
        }
    }

    fn receipt(accepted: bool) -> BroadcastReceipt {
        BroadcastReceipt {
            receipt_id: "sim-1".to_string(),
            design_id: "d".to_string(),
            network: "testnet".to_string(),
            accepted,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_record_design_counts() {
        let mut state = MinerState::new();
        Accountant::record_design(&mut state);
        Accountant::record_design(&mut state);
        assert_eq!(state.designs_generated, 2);
    }

    #[test]
    fn test_record_validation_accumulates() {
        let mut state = MinerState::new();
        Accountant::record_design(&mut state);
        Accountant::record_validation(&mut state, &scores(0.8), dec!(0.0008));
        Accountant::record_design(&mut state);
        Accountant::record_validation(&mut state, &scores(0.9), dec!(0.0009));

        assert!((state.total_score - 1.7).abs() < 1e-12);
        assert!((state.average_score() - 0.85).abs() < 1e-12);
        assert_eq!(state.estimated_earnings(), dec!(0.0017));
    }

    #[test]
    fn test_reconcile_accepted() {
        let mut state = MinerState::new();
        let r = receipt(true);
        let report = Accountant::reconcile(
            &mut state,
            1,
            Design::sample(),
            scores(0.8),
            dec!(0.0008),
            Some(&r),
        );

        assert!(report.accepted);
        assert_eq!(report.receipt_id.as_deref(), Some("sim-1"));
        assert_eq!(state.iterations_run, 1);
        assert_eq!(state.broadcasts_accepted, 1);
        assert_eq!(state.broadcasts_rejected, 0);
    }

    #[test]
    fn test_reconcile_failed_broadcast() {
        let mut state = MinerState::new();
        let report =
            Accountant::reconcile(&mut state, 2, Design::sample(), scores(0.7), dec!(0.0007), None);

        assert!(!report.accepted);
        assert!(report.receipt_id.is_none());
        assert_eq!(state.broadcasts_rejected, 1);
        assert_eq!(state.iterations_run, 1);
    }

    #[test]
    fn test_reconcile_rejected_receipt() {
        let mut state = MinerState::new();
        let r = receipt(false);
        let report = Accountant::reconcile(
            &mut state,
            1,
            Design::sample(),
            scores(0.7),
            dec!(0.0007),
            Some(&r),
        );
        assert!(!report.accepted);
        assert_eq!(report.receipt_id.as_deref(), Some("sim-1"));
        assert_eq!(state.broadcasts_rejected, 1);
    }
}
