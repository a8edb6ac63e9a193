//! Shared types for the Q-RISC miner.
//!
//! These types form the data model used across all modules so that the
//! design, validation, network and engine modules can depend on them
//! without circular references.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Cryptographic family a PQC accelerator design is built around.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DesignFamily {
    Lattice,
    Hash,
}

impl DesignFamily {
    pub const ALL: &'static [DesignFamily] = &[DesignFamily::Lattice, DesignFamily::Hash];
}

impl fmt::Display for DesignFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DesignFamily::Lattice => write!(f, "lattice"),
            DesignFamily::Hash => write!(f, "hash"),
        }
    }
}

impl std::str::FromStr for DesignFamily {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "lattice" | "lattice-based" => Ok(DesignFamily::Lattice),
            "hash" | "hash-based" => Ok(DesignFamily::Hash),
            _ => Err(anyhow::anyhow!("Unknown design family: {s}")),
        }
    }
}

/// NIST-style security strength of a design, in bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
pub enum SecurityLevel {
    Bits128,
    Bits192,
    Bits256,
}

impl SecurityLevel {
    pub const ALL: &'static [SecurityLevel] = &[
        SecurityLevel::Bits128,
        SecurityLevel::Bits192,
        SecurityLevel::Bits256,
    ];

    pub fn bits(&self) -> u16 {
        match self {
            SecurityLevel::Bits128 => 128,
            SecurityLevel::Bits192 => 192,
            SecurityLevel::Bits256 => 256,
        }
    }
}

impl From<SecurityLevel> for u16 {
    fn from(level: SecurityLevel) -> Self {
        level.bits()
    }
}

impl TryFrom<u16> for SecurityLevel {
    type Error = MinerError;

    fn try_from(bits: u16) -> Result<Self, Self::Error> {
        match bits {
            128 => Ok(SecurityLevel::Bits128),
            192 => Ok(SecurityLevel::Bits192),
            256 => Ok(SecurityLevel::Bits256),
            other => Err(MinerError::InvalidSecurityLevel(other)),
        }
    }
}

impl fmt::Display for SecurityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits())
    }
}

// ---------------------------------------------------------------------------
// Design
// ---------------------------------------------------------------------------

/// A simulated accelerator design produced by the generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Design {
    /// `qrisc_design_<YYYYmmdd_HHMMSS>`
    pub id: String,
    pub name: String,
    pub family: DesignFamily,
    pub security: SecurityLevel,
    /// Die area in mm²
    pub area_mm2: u32,
    /// Power draw in mW
    pub power_mw: u32,
    /// Throughput in ops/s
    pub throughput_ops: u32,
    pub created_at: DateTime<Utc>,
}

impl fmt::Display for Design {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}-based, {}-bit] Area={}mm², Power={}mW, Throughput={}ops/s ({})",
            self.name,
            self.family,
            self.security,
            self.area_mm2,
            self.power_mw,
            self.throughput_ops,
            self.id,
        )
    }
}

impl Design {
    /// Build the design id from a creation timestamp.
    pub fn id_for(created_at: DateTime<Utc>) -> String {
        format!("qrisc_design_{}", created_at.format("%Y%m%d_%H%M%S"))
    }

    #[cfg(test)]
    pub fn sample() -> Self {
        let created_at = Utc::now();
        Design {
            id: Design::id_for(created_at),
            name: "Kyber-768 accelerator".to_string(),
            family: DesignFamily::Lattice,
            security: SecurityLevel::Bits192,
            area_mm2: 2400,
            power_mw: 45,
            throughput_ops: 600,
            created_at,
        }
    }
}

// ---------------------------------------------------------------------------
// Validation scores
// ---------------------------------------------------------------------------

/// Sub-scores and weighted total from a simulated validation pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValidationScores {
    pub quantum_resistance: f64,
    pub performance: f64,
    pub efficiency: f64,
    pub correctness: f64,
    pub total: f64,
}

impl fmt::Display for ValidationScores {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "QR={:.3} perf={:.3} eff={:.3} corr={:.3} total={:.3}",
            self.quantum_resistance,
            self.performance,
            self.efficiency,
            self.correctness,
            self.total,
        )
    }
}

// ---------------------------------------------------------------------------
// Miner state
// ---------------------------------------------------------------------------

/// Running counters for a mining session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MinerState {
    pub designs_generated: u64,
    pub total_score: f64,
    pub total_reward: Decimal,
    pub iterations_run: u64,
    pub broadcasts_accepted: u64,
    pub broadcasts_rejected: u64,
    pub started_at: DateTime<Utc>,
}

impl Default for MinerState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MinerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "designs={} | avg_score={:.3} | earnings={:.6} TAO | accepted={} rejected={}",
            self.designs_generated,
            self.average_score(),
            self.estimated_earnings().round_dp(6),
            self.broadcasts_accepted,
            self.broadcasts_rejected,
        )
    }
}

impl MinerState {
    pub fn new() -> Self {
        Self {
            designs_generated: 0,
            total_score: 0.0,
            total_reward: Decimal::ZERO,
            iterations_run: 0,
            broadcasts_accepted: 0,
            broadcasts_rejected: 0,
            started_at: Utc::now(),
        }
    }

    /// Mean total score per design. Returns 0.0 if nothing was generated.
    pub fn average_score(&self) -> f64 {
        if self.designs_generated > 0 {
            self.total_score / self.designs_generated as f64
        } else {
            0.0
        }
    }

    /// Estimated TAO earnings over the session.
    pub fn estimated_earnings(&self) -> Decimal {
        self.total_reward
    }

    pub fn uptime(&self) -> chrono::Duration {
        Utc::now() - self.started_at
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Domain-specific error types for the miner.
#[derive(Debug, thiserror::Error)]
pub enum MinerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Scoring weights must sum to 1.0, got {sum:.6}")]
    InvalidWeights { sum: f64 },

    #[error("Invalid weight for {component}: {weight} (must be finite and non-negative)")]
    InvalidWeight { component: String, weight: f64 },

    #[error("Invalid score range for {component}: [{lo}, {hi}]")]
    InvalidRange { component: String, lo: f64, hi: f64 },

    #[error("Invalid metric range for {metric}: [{lo}, {hi}]")]
    InvalidMetricRange { metric: String, lo: u32, hi: u32 },

    #[error("Unsupported security level: {0}-bit")]
    InvalidSecurityLevel(u16),

    #[error("Design catalog is empty")]
    EmptyCatalog,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
