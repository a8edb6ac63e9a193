//! Console rendering for the mining show.
//!
//! Every block is built as a `String` by a pure function so the exact text
//! can be tested; `Console` writes those blocks to its sink (stdout in the
//! binary, an in-memory buffer in tests).

use chrono::{DateTime, Local};
use rust_decimal::Decimal;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use crate::config::MinerConfig;
use crate::network::BroadcastReceipt;
use crate::types::{Design, MinerState, ValidationScores};

const RULE_WIDTH: usize = 60;

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

// ---------------------------------------------------------------------------
// Blocks
// ---------------------------------------------------------------------------

pub fn banner() -> String {
    let targets = "🎯".repeat(30);
    format!(
        "\n{targets}\nQ-RISC: QUANTUM-RESISTANT INFRASTRUCTURE FOR SECURE COMPUTING\n\
         Building humanity's defense against quantum computing threats\n{targets}\n"
    )
}

pub fn init_block(miner: &MinerConfig) -> String {
    let rule = rule();
    format!(
        "{rule}\n🚀 Q-RISC MINER V2 INITIALIZING\n{rule}\n\
         📦 Version: {}\n🔧 Task: {}\n🌐 Network: {}\n{rule}",
        miner.version, miner.task, miner.subnet_id,
    )
}

pub fn cycle_start(iterations: u32) -> String {
    format!("\n🔄 Starting mining cycle with {iterations} iterations...")
}

pub fn iteration_header(iteration: u32, iterations: u32) -> String {
    let rule = rule();
    format!("\n{rule}\n⛏️  MINING ITERATION {iteration}/{iterations}\n{rule}")
}

pub fn generating() -> String {
    "\n🔨 Generating new design...".to_string()
}

pub fn design_block(design: &Design) -> String {
    format!(
        "✅ Design Generated: {}\n   Type: {}-based\n   Security Level: {}-bit\n   Design ID: {}\n   \
         Metrics: Area={}mm², Power={}mW, Throughput={}ops/s",
        design.name,
        design.family,
        design.security,
        design.id,
        design.area_mm2,
        design.power_mw,
        design.throughput_ops,
    )
}

pub fn validating(design: &Design) -> String {
    format!("\n🔍 Validating design: {}", design.id)
}

pub fn scores_block(scores: &ValidationScores, reward: Decimal) -> String {
    format!(
        "📊 Validation Scores:\n   Quantum Resistance: {:.3}\n   Performance: {:.3}\n   \
         Efficiency: {:.3}\n   Correctness: {:.3}\n   TOTAL SCORE: {:.3}\n\
         💰 Estimated TAO Reward: {:.6}",
        scores.quantum_resistance,
        scores.performance,
        scores.efficiency,
        scores.correctness,
        scores.total,
        reward.round_dp(6),
    )
}

pub fn broadcasting() -> String {
    "\n⏳ Broadcasting to network...".to_string()
}

pub fn broadcast_result(receipt: Option<&BroadcastReceipt>) -> String {
    match receipt {
        Some(r) if r.accepted => "✅ Design accepted by network".to_string(),
        Some(_) => "❌ Design rejected by network".to_string(),
        None => "⚠️  Broadcast failed, design not submitted".to_string(),
    }
}

pub fn summary(state: &MinerState) -> String {
    let rule = rule();
    format!(
        "\n{rule}\n📈 MINING SESSION SUMMARY\n{rule}\n\
         🏭 Designs Generated: {}\n⭐ Average Score: {:.3}\n💎 Estimated TAO Earnings: {:.6}\n{rule}",
        state.designs_generated,
        state.average_score(),
        state.estimated_earnings().round_dp(6),
    )
}

pub fn interrupted(completed: u64, requested: u32) -> String {
    format!("\n🛑 Interrupted after {completed}/{requested} iterations")
}

pub fn epilogue(now: DateTime<Local>) -> String {
    format!(
        "\n✨ Simulation complete!\n📝 Next steps: Connect to BitTensor testnet\n\
         🚀 'From simulation to reality - Q-RISC is inevitable'\n⏰ Timestamp: {}",
        now.format("%Y-%m-%d %H:%M:%S%.6f"),
    )
}

// ---------------------------------------------------------------------------
// Sink
// ---------------------------------------------------------------------------

/// Line-oriented writer for console blocks.
pub struct Console {
    sink: Box<dyn Write + Send>,
}

impl Console {
    pub fn new(sink: Box<dyn Write + Send>) -> Self {
        Self { sink }
    }

    pub fn stdout() -> Self {
        Self::new(Box::new(io::stdout()))
    }

    /// Console writing into a shared buffer, plus a handle to read it back.
    pub fn buffered() -> (Self, SharedBuffer) {
        let buffer = SharedBuffer::default();
        (Self::new(Box::new(buffer.clone())), buffer)
    }

    pub fn emit(&mut self, block: &str) -> io::Result<()> {
        writeln!(self.sink, "{block}")?;
        self.sink.flush()
    }
}

/// Cloneable in-memory `Write` target.
#[derive(Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        let bytes = self.0.lock().map(|b| b.clone()).unwrap_or_default();
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut inner = self
            .0
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "console buffer poisoned"))?;
        inner.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
