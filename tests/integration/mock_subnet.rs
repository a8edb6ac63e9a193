//! Mock subnet for integration testing.
//!
//! Records every submission in memory and accepts or rejects according
//! to a caller-supplied verdict pattern.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::{Arc, Mutex};

use qrisc::network::{BroadcastReceipt, SubnetClient};
use qrisc::types::{Design, ValidationScores};

/// What the mock does with the n-th submission.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Verdict {
    Accept,
    Reject,
    Fail,
}

pub struct MockSubnet {
    verdicts: Vec<Verdict>,
    submissions: Arc<Mutex<Vec<(String, f64)>>>,
}

impl MockSubnet {
    /// Verdicts cycle if there are more submissions than entries.
    pub fn new(verdicts: Vec<Verdict>) -> Self {
        Self {
            verdicts,
            submissions: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Handle to the recorded `(design_id, total_score)` submissions.
    pub fn submissions(&self) -> Arc<Mutex<Vec<(String, f64)>>> {
        Arc::clone(&self.submissions)
    }
}

#[async_trait]
impl SubnetClient for MockSubnet {
    async fn broadcast(
        &self,
        design: &Design,
        scores: &ValidationScores,
    ) -> Result<BroadcastReceipt> {
        let n = {
            let mut subs = self.submissions.lock().unwrap();
            subs.push((design.id.clone(), scores.total));
            subs.len() - 1
        };
        let verdict = if self.verdicts.is_empty() {
            Verdict::Accept
        } else {
            self.verdicts[n % self.verdicts.len()]
        };

        match verdict {
            Verdict::Fail => Err(anyhow!("mock subnet unavailable")),
            v => Ok(BroadcastReceipt {
                receipt_id: format!("mock-{n}"),
                design_id: design.id.clone(),
                network: "mocknet".to_string(),
                accepted: v == Verdict::Accept,
                timestamp: Utc::now(),
            }),
        }
    }

    fn network(&self) -> &str {
        "mocknet"
    }
}
