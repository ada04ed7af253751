//! Pre-scanner and per-merchant aggregation.
//!
//! `scan_all` runs the full catalogue against one snapshot and returns only
//! the findings a support operator needs to see, in fix-this-first order.
//! `summarize` reduces the same evaluation pass into counts and the
//! calls-at-risk estimate. Both are computed fresh on every call — sensor
//! state can change between calls, so nothing here caches.

use crate::{
    catalogue::{RuleCatalogue, RuleMeta},
    outcome::{Outcome, Severity},
    snapshot::MerchantSnapshot,
    types::{CallVolume, DemandRank, MerchantId, RuleKey},
};
use serde::Serialize;

/// One non-passing outcome enriched with its rule's metadata.
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    pub rule_key: RuleKey,
    pub rule_label: &'static str,
    pub demand_rank: DemandRank,
    pub annual_call_volume: CallVolume,
    pub outcome: Outcome,
}

/// Ordered failure/warning list for one merchant.
#[derive(Debug, Clone, Serialize)]
pub struct ScanResult {
    pub merchant_id: MerchantId,
    pub findings: Vec<Finding>,
}

impl ScanResult {
    pub fn has_critical(&self) -> bool {
        self.findings
            .iter()
            .any(|f| f.outcome.is_failure() && f.outcome.severity() == Some(Severity::Critical))
    }
}

/// Failure counts per severity. Built from hard failures only; warnings
/// are deliberately excluded.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct SeverityHistogram {
    pub critical: u32,
    pub high: u32,
    pub medium: u32,
    pub low: u32,
}

impl SeverityHistogram {
    fn record(&mut self, severity: Severity) {
        match severity {
            Severity::Critical => self.critical += 1,
            Severity::High => self.high += 1,
            Severity::Medium => self.medium += 1,
            Severity::Low => self.low += 1,
        }
    }
}

/// Aggregate health picture for one merchant.
#[derive(Debug, Clone, Serialize)]
pub struct MerchantSummary {
    pub merchant_id: MerchantId,
    pub rules_evaluated: u32,
    pub passed: u32,
    pub warnings: u32,
    pub failed: u32,
    pub severity: SeverityHistogram,
    /// Sum of historical annual call volume over currently failing rules:
    /// an estimate of support load reducible by fixing this merchant.
    pub calls_at_risk: CallVolume,
}

/// Run every cataloged rule against one snapshot and return the non-passing
/// outcomes, sorted by severity rank descending, then demand rank ascending.
/// Warnings rank 0 on severity and therefore land after every hard failure.
pub fn scan_all(catalogue: &RuleCatalogue, snapshot: &MerchantSnapshot) -> ScanResult {
    let mut findings: Vec<Finding> = catalogue
        .evaluate_all(snapshot)
        .into_iter()
        .filter(|(_, outcome)| !outcome.is_success())
        .map(|(meta, outcome)| finding(meta, outcome))
        .collect();

    findings.sort_by(|a, b| {
        b.outcome
            .sort_rank()
            .cmp(&a.outcome.sort_rank())
            .then(a.demand_rank.cmp(&b.demand_rank))
    });

    log::debug!(
        "scan {}: {} finding(s) across {} rules",
        snapshot.merchant_id,
        findings.len(),
        catalogue.len()
    );

    ScanResult {
        merchant_id: snapshot.merchant_id.clone(),
        findings,
    }
}

/// Evaluate every rule once and reduce to pass/warn/fail counts, the
/// failure severity histogram, and calls-at-risk.
pub fn summarize(catalogue: &RuleCatalogue, snapshot: &MerchantSnapshot) -> MerchantSummary {
    let mut summary = MerchantSummary {
        merchant_id: snapshot.merchant_id.clone(),
        rules_evaluated: 0,
        passed: 0,
        warnings: 0,
        failed: 0,
        severity: SeverityHistogram::default(),
        calls_at_risk: 0,
    };

    for (meta, outcome) in catalogue.evaluate_all(snapshot) {
        summary.rules_evaluated += 1;
        match &outcome {
            Outcome::Success { .. } => summary.passed += 1,
            Outcome::Warning { .. } => summary.warnings += 1,
            Outcome::Failure { severity, .. } => {
                summary.failed += 1;
                summary.severity.record(*severity);
                // Rule keys are unique in the catalogue, so each failing
                // rule contributes its volume exactly once.
                summary.calls_at_risk += meta.annual_call_volume;
            }
        }
    }

    summary
}

fn finding(meta: &RuleMeta, outcome: Outcome) -> Finding {
    Finding {
        rule_key: meta.key,
        rule_label: meta.label,
        demand_rank: meta.demand_rank,
        annual_call_volume: meta.annual_call_volume,
        outcome,
    }
}
