//! Configuration loading from TOML.
//!
//! Reads `config.toml` and deserializes into strongly-typed structs.
//! Every field has a default matching the stock miner, so a missing file
//! or a partial file is fine.

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tracing::info;

use crate::types::MinerError;

/// Top-level application configuration.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(default)]
pub struct AppConfig {
    pub miner: MinerConfig,
    pub pacing: PacingConfig,
    pub metrics: MetricRanges,
    pub scoring: ScoringConfig,
    pub reward: RewardConfig,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct MinerConfig {
    pub name: String,
    pub task: String,
    pub version: String,
    pub subnet_id: String,
    pub iterations: u32,
    /// Fixed RNG seed for reproducible sessions.
    pub seed: Option<u64>,
}

impl Default for MinerConfig {
    fn default() -> Self {
        Self {
            name: "Q-RISC Alpha".to_string(),
            task: "Quantum-Resistant RISC-V Design".to_string(),
            version: "0.0.2".to_string(),
            subnet_id: "testnet".to_string(),
            iterations: 3,
            seed: None,
        }
    }
}

/// Cosmetic delays between console steps, in milliseconds.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct PacingConfig {
    pub design_ms: u64,
    pub validation_ms: u64,
    pub broadcast_ms: u64,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            design_ms: 1000,
            validation_ms: 500,
            broadcast_ms: 1000,
        }
    }
}

impl PacingConfig {
    /// No delays at all (tests, `--no-delay`).
    pub fn instant() -> Self {
        Self {
            design_ms: 0,
            validation_ms: 0,
            broadcast_ms: 0,
        }
    }

    pub fn design(&self) -> Duration {
        Duration::from_millis(self.design_ms)
    }

    pub fn validation(&self) -> Duration {
        Duration::from_millis(self.validation_ms)
    }

    pub fn broadcast(&self) -> Duration {
        Duration::from_millis(self.broadcast_ms)
    }
}

/// Inclusive integer ranges for the fabricated performance metrics.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct MetricRanges {
    pub area_mm2: (u32, u32),
    pub power_mw: (u32, u32),
    pub throughput_ops: (u32, u32),
}

impl Default for MetricRanges {
    fn default() -> Self {
        Self {
            area_mm2: (1000, 5000),
            power_mw: (10, 100),
            throughput_ops: (100, 1000),
        }
    }
}

impl MetricRanges {
    pub fn validate(&self) -> Result<(), MinerError> {
        for (metric, (lo, hi)) in [
            ("area_mm2", self.area_mm2),
            ("power_mw", self.power_mw),
            ("throughput_ops", self.throughput_ops),
        ] {
            if lo > hi {
                return Err(MinerError::InvalidMetricRange {
                    metric: metric.to_string(),
                    lo,
                    hi,
                });
            }
        }
        Ok(())
    }
}

/// Sampling range and weight for one validation sub-score.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct ScoreComponent {
    pub min: f64,
    pub max: f64,
    pub weight: f64,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ScoringConfig {
    pub quantum_resistance: ScoreComponent,
    pub performance: ScoreComponent,
    pub efficiency: ScoreComponent,
    pub correctness: ScoreComponent,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            quantum_resistance: ScoreComponent { min: 0.7, max: 1.0, weight: 0.4 },
            performance: ScoreComponent { min: 0.6, max: 0.95, weight: 0.3 },
            efficiency: ScoreComponent { min: 0.5, max: 0.9, weight: 0.2 },
            correctness: ScoreComponent { min: 0.8, max: 1.0, weight: 0.1 },
        }
    }
}

impl ScoringConfig {
    /// Components in display order, paired with their names.
    pub fn components(&self) -> [(&'static str, ScoreComponent); 4] {
        [
            ("quantum_resistance", self.quantum_resistance),
            ("performance", self.performance),
            ("efficiency", self.efficiency),
            ("correctness", self.correctness),
        ]
    }

    /// Ranges must lie in [0, 1]; weights must be non-negative and sum to 1.
    pub fn validate(&self) -> Result<(), MinerError> {
        let mut sum = 0.0;
        for (name, c) in self.components() {
            if !(c.min.is_finite() && c.max.is_finite()) || c.min < 0.0 || c.min > c.max || c.max > 1.0 {
                return Err(MinerError::InvalidRange {
                    component: name.to_string(),
                    lo: c.min,
                    hi: c.max,
                });
            }
            if !c.weight.is_finite() || c.weight < 0.0 {
                return Err(MinerError::InvalidWeight {
                    component: name.to_string(),
                    weight: c.weight,
                });
            }
            sum += c.weight;
        }
        if (sum - 1.0).abs() > 1e-9 {
            return Err(MinerError::InvalidWeights { sum });
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct RewardConfig {
    /// TAO paid per point of total score.
    pub tao_per_point: Decimal,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            tao_per_point: dec!(0.001),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &str) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path}"))?;
        Self::from_toml(&contents).with_context(|| format!("Failed to parse config file: {path}"))
    }

    /// Load `path` if it exists, otherwise fall back to defaults.
    pub fn load_or_default(path: &str) -> Result<Self> {
        if Path::new(path).exists() {
            Self::load(path)
        } else {
            info!(path, "No config file found, using defaults");
            Ok(Self::default())
        }
    }

    /// Parse and validate a TOML document.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), MinerError> {
        if self.reward.tao_per_point < Decimal::ZERO {
            return Err(MinerError::Config(format!(
                "reward.tao_per_point must be non-negative, got {}",
                self.reward.tao_per_point
            )));
        }
        self.metrics.validate()?;
        self.scoring.validate()
    }
}
