//! Batch match runner
//!
//! Loads rules and catalogs from disk, plays seeded matches through
//! `bb_core`'s autopilot and aggregates the results.

use std::ops::Range;
use std::path::Path;

use anyhow::{Context, Result};
use bb_core::config::rules_config_from_env_or_default;
use bb_core::{simulate_match, CardCatalog, RulesConfig, SimulationRequest, SimulationResponse, Stage};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Aggregate over a range of seeds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub matches: u64,
    pub completed: u64,
    pub player_wins: u64,
    pub stage2_reached: u64,
    pub win_rate: f64,
    pub stage2_rate: f64,
    pub avg_rounds: f64,
    pub avg_overtime_rounds: f64,
    /// SHA256 over every match summary in seed order
    pub checksum: String,
}

/// Rules from `config_path`, else from `BB_RULES_CONFIG_PATH`, else standard
pub fn load_rules(config_path: Option<&Path>) -> Result<RulesConfig> {
    match config_path {
        Some(path) => RulesConfig::load(path)
            .with_context(|| format!("Failed to load rules config: {}", path.display())),
        None => rules_config_from_env_or_default().context("Failed to load rules config from env"),
    }
}

pub fn load_catalog(catalog_path: Option<&Path>) -> Result<CardCatalog> {
    match catalog_path {
        Some(path) => CardCatalog::load(path)
            .with_context(|| format!("Failed to load card catalog: {}", path.display())),
        None => Ok(CardCatalog::standard()),
    }
}

/// Writes the standard catalog as pretty JSON
pub fn write_default_catalog(path: &Path) -> Result<()> {
    let json = CardCatalog::standard().to_json_pretty()?;
    write_file(path, &json)
}

/// Writes the standard rules as pretty JSON
pub fn write_default_rules(path: &Path) -> Result<()> {
    let json = RulesConfig::standard().to_json_pretty()?;
    write_file(path, &json)
}

fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }
    std::fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))
}

/// Plays one match per seed in parallel. `template` supplies everything but
/// the seed.
pub fn run_batch(seeds: Range<u64>, template: &SimulationRequest) -> Result<BatchSummary> {
    let mut results: Vec<(u64, SimulationResponse)> = seeds
        .into_par_iter()
        .map(|seed| {
            let mut request = template.clone();
            request.seed = seed;
            request.include_events = false;
            simulate_match(&request)
                .map(|response| (seed, response))
                .with_context(|| format!("Simulation failed for seed {seed}"))
        })
        .collect::<Result<_>>()?;
    results.sort_by_key(|(seed, _)| *seed);

    let responses: Vec<SimulationResponse> = results.into_iter().map(|(_, r)| r).collect();
    summarize(&responses)
}

pub fn summarize(responses: &[SimulationResponse]) -> Result<BatchSummary> {
    let matches = responses.len() as u64;
    let count = |f: fn(&SimulationResponse) -> bool| responses.iter().filter(|r| f(r)).count() as u64;
    let completed = count(|r| r.completed);
    let player_wins = count(|r| r.player_won);
    let stage2_reached = count(|r| r.final_stage == Stage::Stage2);

    let rate = |n: u64| if matches == 0 { 0.0 } else { n as f64 / matches as f64 };
    let rounds: u64 = responses.iter().map(|r| u64::from(r.rounds_played)).sum();
    let overtime: u64 = responses.iter().map(|r| u64::from(r.overtime_rounds)).sum();

    let mut hasher = Sha256::new();
    for response in responses {
        hasher.update(serde_json::to_vec(response).context("Failed to serialize match summary")?);
    }

    let summary = BatchSummary {
        matches,
        completed,
        player_wins,
        stage2_reached,
        win_rate: rate(player_wins),
        stage2_rate: rate(stage2_reached),
        avg_rounds: rate(rounds),
        avg_overtime_rounds: rate(overtime),
        checksum: format!("{:x}", hasher.finalize()),
    };
    log::info!(
        "Batch of {}: {:.1}% wins, {:.1}% reached Stage 2",
        summary.matches,
        summary.win_rate * 100.0,
        summary.stage2_rate * 100.0
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_is_deterministic() {
        let template = SimulationRequest::new(0);
        let a = run_batch(0..16, &template).unwrap();
        let b = run_batch(0..16, &template).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.matches, 16);
        assert_eq!(a.completed, 16);
        assert!(a.player_wins <= a.stage2_reached);
        assert!((0.0..=1.0).contains(&a.win_rate));
    }

    #[test]
    fn test_empty_batch() {
        let summary = run_batch(0..0, &SimulationRequest::new(0)).unwrap();
        assert_eq!(summary.matches, 0);
        assert_eq!(summary.win_rate, 0.0);
    }

    #[test]
    fn test_catalog_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("catalog.json");
        write_default_catalog(&path).unwrap();
        let loaded = load_catalog(Some(&path)).unwrap();
        assert_eq!(loaded, CardCatalog::standard());
    }

    #[test]
    fn test_rules_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rules.json");
        write_default_rules(&path).unwrap();
        assert_eq!(load_rules(Some(&path)).unwrap(), RulesConfig::standard());
    }

    #[test]
    fn test_missing_catalog_has_context() {
        let err = load_catalog(Some(Path::new("/definitely/not/here.json"))).unwrap_err();
        assert!(err.to_string().contains("Failed to load card catalog"));
    }
}
