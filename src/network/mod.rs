//! Subnet submission.
//!
//! Defines the `SubnetClient` trait. Only a simulated client exists: it
//! waits out the configured broadcast delay and accepts every design.
//! A live subnet client would implement the same trait.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::info;

use crate::types::{Design, ValidationScores};

/// Outcome of submitting a design to the network.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BroadcastReceipt {
    pub receipt_id: String,
    pub design_id: String,
    pub network: String,
    pub accepted: bool,
    pub timestamp: DateTime<Utc>,
}

/// Abstraction over the network a miner submits designs to.
#[async_trait]
pub trait SubnetClient: Send + Sync {
    /// Submit a validated design.
    async fn broadcast(&self, design: &Design, scores: &ValidationScores)
        -> Result<BroadcastReceipt>;

    /// Network identifier for logging.
    fn network(&self) -> &str;
}

/// In-process stand-in for the subnet.
pub struct SimulatedSubnet {
    network: String,
    delay: Duration,
}

impl SimulatedSubnet {
    pub fn new(network: &str, delay: Duration) -> Self {
        Self {
            network: network.to_string(),
            delay,
        }
    }
}

#[async_trait]
impl SubnetClient for SimulatedSubnet {
    async fn broadcast(
        &self,
        design: &Design,
        scores: &ValidationScores,
    ) -> Result<BroadcastReceipt> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let receipt = BroadcastReceipt {
            receipt_id: format!("sim-{}", uuid::Uuid::new_v4()),
            design_id: design.id.clone(),
            network: self.network.clone(),
            accepted: true,
            timestamp: Utc::now(),
        };

        info!(
            network = %self.network,
            design_id = %design.id,
            score = format!("{:.3}", scores.total),
            receipt = %receipt.receipt_id,
            "[SIMULATED] Design broadcast"
        );

        Ok(receipt)
    }

    fn network(&self) -> &str {
        &self.network
    }
}
