//! The miner: runs generate → validate → broadcast iterations and
//! narrates them on the console.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::console::{self, Console};
use crate::design::DesignGenerator;
use crate::engine::accountant::{Accountant, IterationReport};
use crate::network::{SimulatedSubnet, SubnetClient};
use crate::types::{Design, MinerState, ValidationScores};
use crate::validation::Validator;

/// Offset applied to the session seed for the validator's RNG stream.
const VALIDATOR_SEED_OFFSET: u64 = 0x5eed;

// ---------------------------------------------------------------------------
// Session report
// ---------------------------------------------------------------------------

/// Outcome of a whole mining session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionReport {
    pub miner: String,
    pub network: String,
    pub iterations_requested: u32,
    pub interrupted: bool,
    pub average_score: f64,
    pub state: MinerState,
    pub iterations: Vec<IterationReport>,
    pub completed_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Miner
// ---------------------------------------------------------------------------

pub struct Miner<R: Rng> {
    config: AppConfig,
    generator: DesignGenerator<R>,
    validator: Validator<R>,
    subnet: Box<dyn SubnetClient>,
    console: Console,
    state: MinerState,
}

impl Miner<StdRng> {
    /// Wire a miner from configuration with the simulated subnet.
    ///
    /// With `miner.seed` set, designs and scores are reproducible.
    pub fn from_config(config: AppConfig, console: Console) -> Self {
        let (design_rng, score_rng) = match config.miner.seed {
            Some(seed) => (
                StdRng::seed_from_u64(seed),
                StdRng::seed_from_u64(seed.wrapping_add(VALIDATOR_SEED_OFFSET)),
            ),
            None => (StdRng::from_entropy(), StdRng::from_entropy()),
        };
        let generator = DesignGenerator::new(config.metrics.clone(), design_rng);
        let validator = Validator::new(config.scoring.clone(), config.reward.clone(), score_rng);
        let subnet = SimulatedSubnet::new(&config.miner.subnet_id, config.pacing.broadcast());
        Self::new(config, generator, validator, Box::new(subnet), console)
    }
}

impl<R: Rng> Miner<R> {
    pub fn new(
        config: AppConfig,
        generator: DesignGenerator<R>,
        validator: Validator<R>,
        subnet: Box<dyn SubnetClient>,
        console: Console,
    ) -> Self {
        Self {
            config,
            generator,
            validator,
            subnet,
            console,
            state: MinerState::new(),
        }
    }

    pub fn state(&self) -> &MinerState {
        &self.state
    }

    /// Print the miner's startup block.
    pub fn announce(&mut self) -> Result<()> {
        let block = console::init_block(&self.config.miner);
        self.emit(&block)
    }

    /// Fabricate one design and print it.
    pub async fn simulate_design(&mut self) -> Result<Design> {
        self.emit(&console::generating())?;
        pause(self.config.pacing.design()).await;

        let design = self.generator.generate()?;
        self.emit(&console::design_block(&design))?;
        Accountant::record_design(&mut self.state);
        Ok(design)
    }

    /// Score a design, print the breakdown and its TAO reward.
    ///
    /// Returns the scores together with the reward that was recorded.
    pub async fn simulate_validation(
        &mut self,
        design: &Design,
    ) -> Result<(ValidationScores, Decimal)> {
        self.emit(&console::validating(design))?;
        pause(self.config.pacing.validation()).await;

        let scores = self.validator.score(design);
        let reward = self.validator.reward_for(scores.total);
        self.emit(&console::scores_block(&scores, reward))?;
        Accountant::record_validation(&mut self.state, &scores, reward);
        Ok((scores, reward))
    }

    /// Print the session summary.
    pub fn display_summary(&mut self) -> Result<()> {
        let block = console::summary(&self.state);
        self.emit(&block)
    }

    /// One full iteration: generate, validate, broadcast.
    pub async fn run_iteration(&mut self, iteration: u32, iterations: u32) -> Result<IterationReport> {
        self.emit(&console::iteration_header(iteration, iterations))?;

        let design = self.simulate_design().await?;
        let (scores, reward) = self.simulate_validation(&design).await?;

        self.emit(&console::broadcasting())?;
        let receipt = match self.subnet.broadcast(&design, &scores).await {
            Ok(receipt) => Some(receipt),
            Err(e) => {
                warn!(
                    network = self.subnet.network(),
                    design_id = %design.id,
                    error = %e,
                    "Broadcast failed, continuing"
                );
                None
            }
        };
        self.emit(&console::broadcast_result(receipt.as_ref()))?;

        Ok(Accountant::reconcile(
            &mut self.state,
            iteration,
            design,
            scores,
            reward,
            receipt.as_ref(),
        ))
    }

    /// Run `iterations` iterations then print the summary.
    pub async fn run_mining_cycle(&mut self, iterations: u32) -> Result<SessionReport> {
        self.run_mining_cycle_until(iterations, std::future::pending::<()>())
            .await
    }

    /// Like `run_mining_cycle`, but stops early once `shutdown` resolves.
    ///
    /// An iteration that is already running is always finished, so the
    /// state never holds a half-recorded design. The summary is printed
    /// either way.
    pub async fn run_mining_cycle_until<F>(
        &mut self,
        iterations: u32,
        shutdown: F,
    ) -> Result<SessionReport>
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        info!(
            miner = %self.config.miner.name,
            network = self.subnet.network(),
            iterations,
            "Starting mining cycle"
        );
        self.emit(&console::cycle_start(iterations))?;

        let mut reports = Vec::with_capacity(iterations.min(1024) as usize);
        let mut interrupted = false;

        for i in 1..=iterations {
            // Shutdown that arrived before this iteration started.
            tokio::select! {
                biased;
                _ = &mut shutdown, if !interrupted => {
                    interrupted = true;
                }
                _ = std::future::ready(()) => {}
            }

            if !interrupted {
                let result = {
                    let iteration = self.run_iteration(i, iterations);
                    tokio::pin!(iteration);
                    loop {
                        tokio::select! {
                            biased;
                            _ = &mut shutdown, if !interrupted => {
                                info!(iteration = i, "Shutdown requested, finishing current iteration");
                                interrupted = true;
                            }
                            result = &mut iteration => break result,
                        }
                    }
                };
                reports.push(result?);
            }

            if interrupted {
                warn!(completed = reports.len(), iterations, "Mining cycle interrupted");
                let block = console::interrupted(reports.len() as u64, iterations);
                self.emit(&block)?;
                break;
            }
        }

        self.display_summary()?;

        info!(
            designs = self.state.designs_generated,
            avg_score = format!("{:.3}", self.state.average_score()),
            earnings = format!("{:.6}", self.state.estimated_earnings().round_dp(6)),
            uptime_secs = self.state.uptime().num_seconds(),
            "Mining cycle complete"
        );

        Ok(SessionReport {
            miner: self.config.miner.name.clone(),
            network: self.subnet.network().to_string(),
            iterations_requested: iterations,
            interrupted,
            average_score: self.state.average_score(),
            state: self.state.clone(),
            iterations: reports,
            completed_at: Utc::now(),
        })
    }

    fn emit(&mut self, block: &str) -> Result<()> {
        self.console.emit(block).context("Failed to write to console")
    }
}

async fn pause(duration: Duration) {
    if !duration.is_zero() {
        tokio::time::sleep(duration).await;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
