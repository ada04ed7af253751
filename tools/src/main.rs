//! fleet-runner: headless demo runner for the TillWatch diagnosis engine.
//!
//! Usage:
//!   fleet-runner --seed 12345 --merchants 50
//!   fleet-runner --seed 12345 --merchants 200 --history 60 --json

mod generator;
mod names;
mod rng;

use anyhow::Result;
use std::env;
use tillwatch_core::{
    anomaly::{detect_anomalies, Anomaly},
    catalogue::RuleCatalogue,
    fleet::{scan_fleet, FleetBatchResult},
    propensity,
    propensity::PropensityScore,
};
use uuid::Uuid;

#[derive(serde::Serialize)]
struct BatchDocument<'a> {
    batch_id: String,
    seed: u64,
    fleet: &'a FleetBatchResult,
    anomalies: &'a [Anomaly],
    hotlist: &'a [HotlistEntry],
}

#[derive(serde::Serialize)]
struct HotlistEntry {
    merchant_id: String,
    business_name: String,
    county: String,
    calls_at_risk: u64,
    propensity: PropensityScore,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let merchants = parse_arg(&args, "--merchants", 50u32);
    let history = parse_arg(&args, "--history", 40u32);
    let json = args.iter().any(|a| a == "--json");

    let batch_id = format!("batch-{}", Uuid::new_v4());
    let catalogue = RuleCatalogue::standard();

    let fleet = generator::generate_fleet(seed, merchants);
    let result = scan_fleet(&catalogue, &fleet);

    let log = generator::generate_history(seed, history);
    let anomalies = detect_anomalies(&log);

    let hotlist = build_hotlist(&fleet, &result, 3);

    if json {
        let doc = BatchDocument {
            batch_id,
            seed,
            fleet: &result,
            anomalies: &anomalies,
            hotlist: &hotlist,
        };
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    print_summary(&batch_id, seed, &result, &anomalies, &hotlist);
    Ok(())
}

/// The merchants most worth a proactive call: highest calls-at-risk first,
/// each with its propensity breakdown.
fn build_hotlist(
    fleet: &[tillwatch_core::MerchantSnapshot],
    result: &FleetBatchResult,
    take: usize,
) -> Vec<HotlistEntry> {
    let mut ranked: Vec<(usize, u64)> = result
        .merchants
        .iter()
        .enumerate()
        .filter(|(_, m)| m.summary.failed > 0)
        .map(|(i, m)| (i, m.summary.calls_at_risk))
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    ranked
        .into_iter()
        .take(take)
        .map(|(i, calls)| {
            let snap = &fleet[i];
            HotlistEntry {
                merchant_id: snap.merchant_id.clone(),
                business_name: snap.business_name.clone(),
                county: snap.county.clone(),
                calls_at_risk: calls,
                propensity: propensity::score(snap),
            }
        })
        .collect()
}

fn print_summary(
    batch_id: &str,
    seed: u64,
    result: &FleetBatchResult,
    anomalies: &[Anomaly],
    hotlist: &[HotlistEntry],
) {
    println!("TillWatch — fleet-runner");
    println!("  batch:     {batch_id}");
    println!("  seed:      {seed}");
    println!();

    println!("=== FLEET SUMMARY ===");
    println!("  merchants:        {}", result.total_merchants);
    println!("  healthy:          {}", result.healthy_merchants);
    println!("  with failures:    {}", result.merchants_with_any_failure);
    println!("  with critical:    {}", result.merchants_with_critical);
    println!("  calls at risk:    {}", result.total_calls_at_risk);

    println!();
    println!("=== TOP FAILURES ===");
    if result.top_failures.is_empty() {
        println!("  (fleet is clean)");
    }
    for row in &result.top_failures {
        println!(
            "  {:<22} {:>4} merchant(s)  {:>3}% of fleet",
            row.code, row.merchants_affected, row.pct_of_fleet
        );
    }

    println!();
    println!("=== HOTLIST ===");
    if hotlist.is_empty() {
        println!("  (no failing merchants)");
    }
    for entry in hotlist {
        println!(
            "  {} | {} ({}) | {} calls at risk | propensity {} ({})",
            entry.merchant_id,
            entry.business_name,
            entry.county,
            entry.calls_at_risk,
            entry.propensity.score,
            entry.propensity.tier.as_str(),
        );
        for factor in &entry.propensity.factors {
            println!("      - {factor}");
        }
    }

    println!();
    println!("=== ANOMALIES ===");
    if anomalies.is_empty() {
        println!("  (none detected)");
    }
    for anomaly in anomalies {
        println!(
            "  {} [{}] z={:.2}: {}",
            anomaly.code,
            anomaly.severity.as_str(),
            anomaly.z_score,
            anomaly.description
        );
    }
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
