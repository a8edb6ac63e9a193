//! Simulated validation: sub-score sampling, weighted total, and reward.
//!
//! Each sub-score is drawn uniformly from its configured range and the
//! total is the weighted sum. With ranges inside [0, 1] and weights that
//! sum to 1 the total also lies in [0, 1].

use rand::Rng;
use rust_decimal::prelude::*;
use tracing::debug;

use crate::config::{RewardConfig, ScoreComponent, ScoringConfig};
use crate::types::{Design, ValidationScores};

pub struct Validator<R: Rng> {
    scoring: ScoringConfig,
    reward: RewardConfig,
    rng: R,
}

impl<R: Rng> Validator<R> {
    pub fn new(scoring: ScoringConfig, reward: RewardConfig, rng: R) -> Self {
        Self { scoring, reward, rng }
    }

    /// Draw the four sub-scores for a design and combine them.
    pub fn score(&mut self, design: &Design) -> ValidationScores {
        let quantum_resistance = sample(&mut self.rng, &self.scoring.quantum_resistance);
        let performance = sample(&mut self.rng, &self.scoring.performance);
        let efficiency = sample(&mut self.rng, &self.scoring.efficiency);
        let correctness = sample(&mut self.rng, &self.scoring.correctness);

        let scores = ValidationScores {
            quantum_resistance,
            performance,
            efficiency,
            correctness,
            total: weighted_total(
                &self.scoring,
                quantum_resistance,
                performance,
                efficiency,
                correctness,
            ),
        };

        debug!(design_id = %design.id, scores = %scores, "Design validated");
        scores
    }

    /// Reward in TAO for a total score.
    pub fn reward_for(&self, total: f64) -> Decimal {
        reward_for(&self.reward, total)
    }
}

fn sample<R: Rng>(rng: &mut R, component: &ScoreComponent) -> f64 {
    if component.max > component.min {
        rng.gen_range(component.min..=component.max)
    } else {
        component.min
    }
}

/// Weighted sum of the four sub-scores, clamped to [0, 1] against
/// floating-point drift at the edges.
pub fn weighted_total(
    scoring: &ScoringConfig,
    quantum_resistance: f64,
    performance: f64,
    efficiency: f64,
    correctness: f64,
) -> f64 {
    let total = quantum_resistance * scoring.quantum_resistance.weight
        + performance * scoring.performance.weight
        + efficiency * scoring.efficiency.weight
        + correctness * scoring.correctness.weight;
    total.clamp(0.0, 1.0)
}

/// `total × tao_per_point`. Non-finite totals earn nothing.
pub fn reward_for(reward: &RewardConfig, total: f64) -> Decimal {
    Decimal::from_f64(total)
        .map(|t| t * reward.tao_per_point)
        .unwrap_or(Decimal::ZERO)
}
