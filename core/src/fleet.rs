//! Fleet batch scanning — the pre-scanner and aggregator fanned out over
//! many merchants, reduced to fleet-wide statistics.
//!
//! Per-merchant work is independent (no shared state anywhere in the
//! engine), so callers may shard a large fleet across threads and merge
//! the reports; this implementation is a single pass.

use crate::{
    catalogue::RuleCatalogue,
    error::DiagResult,
    scanner::{scan_all, summarize, MerchantSummary, ScanResult},
    snapshot::MerchantSnapshot,
    types::CallVolume,
};
use serde::Serialize;
use std::collections::HashMap;

/// How many failure codes the fleet frequency table keeps.
pub const TOP_FAILURE_COUNT: usize = 5;

/// Scan plus summary for one merchant within a batch.
#[derive(Debug, Clone, Serialize)]
pub struct MerchantReport {
    pub scan: ScanResult,
    pub summary: MerchantSummary,
}

/// One row of the fleet failure-frequency table.
#[derive(Debug, Clone, Serialize)]
pub struct FailureFrequency {
    pub code: String,
    /// Merchants exhibiting this failure code at least once.
    pub merchants_affected: u32,
    /// Integer-rounded percentage of the whole fleet.
    pub pct_of_fleet: u32,
}

/// Fleet-wide reduction over per-merchant summaries.
#[derive(Debug, Clone, Serialize)]
pub struct FleetBatchResult {
    pub total_merchants: u32,
    pub merchants_with_critical: u32,
    pub merchants_with_any_failure: u32,
    pub healthy_merchants: u32,
    pub total_calls_at_risk: CallVolume,
    /// Top failure codes by merchants affected, descending; ties broken
    /// alphabetically by code so output is deterministic.
    pub top_failures: Vec<FailureFrequency>,
    pub merchants: Vec<MerchantReport>,
}

impl FleetBatchResult {
    /// Serialize the whole batch for a downstream presentation layer.
    pub fn to_json(&self) -> DiagResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Scan every snapshot and reduce to fleet statistics.
pub fn scan_fleet(catalogue: &RuleCatalogue, snapshots: &[MerchantSnapshot]) -> FleetBatchResult {
    let mut merchants = Vec::with_capacity(snapshots.len());
    let mut with_critical = 0u32;
    let mut with_any_failure = 0u32;
    let mut total_calls_at_risk: CallVolume = 0;
    let mut code_counts: HashMap<String, u32> = HashMap::new();

    for snapshot in snapshots {
        let scan = scan_all(catalogue, snapshot);
        let summary = summarize(catalogue, snapshot);

        if summary.severity.critical > 0 {
            with_critical += 1;
        }
        if summary.failed > 0 {
            with_any_failure += 1;
        }
        total_calls_at_risk += summary.calls_at_risk;

        // Count each failure code once per merchant, however many rules
        // surfaced it.
        let mut seen: Vec<&str> = Vec::new();
        for finding in scan.findings.iter().filter(|f| f.outcome.is_failure()) {
            let code = finding.outcome.code();
            if !seen.contains(&code) {
                seen.push(code);
                *code_counts.entry(code.to_string()).or_insert(0) += 1;
            }
        }

        merchants.push(MerchantReport { scan, summary });
    }

    let total = snapshots.len() as u32;
    let mut rows: Vec<FailureFrequency> = code_counts
        .into_iter()
        .map(|(code, count)| FailureFrequency {
            pct_of_fleet: pct(count, total),
            code,
            merchants_affected: count,
        })
        .collect();
    rows.sort_by(|a, b| {
        b.merchants_affected
            .cmp(&a.merchants_affected)
            .then_with(|| a.code.cmp(&b.code))
    });
    rows.truncate(TOP_FAILURE_COUNT);

    log::info!(
        "fleet scan: {total} merchants, {with_critical} critical, {with_any_failure} failing, {} calls at risk",
        total_calls_at_risk
    );

    FleetBatchResult {
        total_merchants: total,
        merchants_with_critical: with_critical,
        merchants_with_any_failure: with_any_failure,
        healthy_merchants: total - with_any_failure,
        total_calls_at_risk,
        top_failures: rows,
        merchants,
    }
}

fn pct(count: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    ((count as f64 / total as f64) * 100.0).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pct_rounds_to_nearest_integer() {
        assert_eq!(pct(1, 3), 33);
        assert_eq!(pct(2, 3), 67);
        assert_eq!(pct(0, 3), 0);
        assert_eq!(pct(3, 3), 100);
        assert_eq!(pct(1, 0), 0);
    }
}
