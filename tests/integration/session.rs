//! End-to-end mining sessions through the public API.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rust_decimal::Decimal;

use qrisc::config::{AppConfig, PacingConfig};
use qrisc::console::Console;
use qrisc::design::DesignGenerator;
use qrisc::engine::miner::Miner;
use qrisc::storage;
use qrisc::types::{DesignFamily, SecurityLevel};
use qrisc::validation::Validator;

use crate::mock_subnet::{MockSubnet, Verdict};

fn test_config(seed: u64) -> AppConfig {
    let mut cfg = AppConfig::from_toml(
        r#"
        [miner]
        iterations = 6
        "#,
    )
    .unwrap();
    cfg.pacing = PacingConfig::instant();
    cfg.miner.seed = Some(seed);
    cfg
}

fn mock_miner(cfg: AppConfig, subnet: MockSubnet) -> Miner<StdRng> {
    let generator = DesignGenerator::new(cfg.metrics.clone(), StdRng::seed_from_u64(10));
    let validator = Validator::new(
        cfg.scoring.clone(),
        cfg.reward.clone(),
        StdRng::seed_from_u64(20),
    );
    let (console, _) = Console::buffered();
    Miner::new(cfg, generator, validator, Box::new(subnet), console)
}

#[tokio::test]
async fn test_full_session_properties() {
    let cfg = test_config(2024);
    let iterations = cfg.miner.iterations;
    let (console, buffer) = Console::buffered();
    let mut miner = Miner::from_config(cfg, console);

    miner.announce().unwrap();
    let report = miner.run_mining_cycle(iterations).await.unwrap();

    assert_eq!(report.iterations.len(), 6);
    assert_eq!(report.state.designs_generated, 6);
    for it in &report.iterations {
        assert!(SecurityLevel::ALL.contains(&it.design.security));
        assert!(DesignFamily::ALL.contains(&it.design.family));
        assert!((0.0..=1.0).contains(&it.scores.total));
    }

    let expected_avg = report.state.total_score / 6.0;
    assert!((report.average_score - expected_avg).abs() < 1e-12);

    let out = buffer.contents();
    assert!(out.contains("🚀 Q-RISC MINER V2 INITIALIZING"));
    assert_eq!(out.matches("🔨 Generating new design...").count(), 6);
    assert_eq!(out.matches("📊 Validation Scores:").count(), 6);
}

#[tokio::test]
async fn test_mixed_verdicts() {
    let subnet = MockSubnet::new(vec![Verdict::Accept, Verdict::Reject, Verdict::Fail]);
    let submissions = subnet.submissions();
    let mut miner = mock_miner(test_config(1), subnet);

    let report = miner.run_mining_cycle(6).await.unwrap();

    assert_eq!(submissions.lock().unwrap().len(), 6);
    assert_eq!(report.state.broadcasts_accepted, 2);
    assert_eq!(report.state.broadcasts_rejected, 4);
    assert_eq!(report.network, "mocknet");

    // Rewards are earned at validation, regardless of the network verdict.
    let rewards: Decimal = report.iterations.iter().map(|r| r.reward).sum();
    assert_eq!(report.state.total_reward, rewards);
    assert!(report.iterations[2].receipt_id.is_none());
    assert_eq!(report.iterations[1].receipt_id.as_deref(), Some("mock-1"));
}

#[tokio::test]
async fn test_submitted_scores_match_report() {
    let subnet = MockSubnet::new(Vec::new());
    let submissions = subnet.submissions();
    let mut miner = mock_miner(test_config(3), subnet);

    let report = miner.run_mining_cycle(3).await.unwrap();
    let subs = submissions.lock().unwrap();

    for (it, (design_id, total)) in report.iterations.iter().zip(subs.iter()) {
        assert_eq!(&it.design.id, design_id);
        assert_eq!(it.scores.total, *total);
    }
}

#[test]
fn test_report_export_round_trip() {
    let report = tokio_test::block_on(async {
        let (console, _) = Console::buffered();
        let mut miner = Miner::from_config(test_config(77), console);
        miner.run_mining_cycle(2).await.unwrap()
    });

    let dir = std::env::temp_dir().join(format!("qrisc_it_{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();

    let written = storage::save_report(&report, &dir).unwrap();
    assert_eq!(written.parent(), Some(dir.as_path()));
    assert_eq!(
        written.file_name().unwrap().to_string_lossy(),
        storage::report_file_name(&report)
    );

    let loaded = storage::load_report(&written).unwrap();
    assert_eq!(loaded.iterations.len(), 2);
    assert_eq!(loaded.state.designs_generated, 2);
    assert_eq!(loaded.iterations[0].design, report.iterations[0].design);

    std::fs::remove_dir_all(&dir).unwrap();
}
