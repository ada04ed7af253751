//! Pre-scanner and per-merchant aggregator tests: ordering policy,
//! filtering, and calls-at-risk arithmetic.

use tillwatch_core::catalogue::RuleCatalogue;
use tillwatch_core::scanner::{scan_all, summarize};
use tillwatch_core::snapshot::{
    AccountStatus, KycStatus, MerchantSnapshot, SimStatus, StartKeyStatus,
};

/// A merchant with several live defects across severities.
fn troubled() -> MerchantSnapshot {
    let mut snap = MerchantSnapshot::healthy("m-troubled");
    snap.account_status = AccountStatus::Suspended;
    snap.kyc_status = KycStatus::Expired;
    snap.kyc_age_days = 400;
    snap.sim_status = SimStatus::Swapped;
    snap.sim_swap_days_ago = Some(3);
    snap.start_key_status = StartKeyStatus::Invalid;
    snap.notifications_enabled = false;
    snap.dormant_days = 40;
    snap
}

/// Scan results never contain a success outcome.
#[test]
fn scan_contains_no_successes() {
    let cat = RuleCatalogue::standard();
    let result = scan_all(&cat, &troubled());

    assert!(!result.findings.is_empty());
    for finding in &result.findings {
        assert!(
            !finding.outcome.is_success(),
            "success leaked into scan: {:?}",
            finding
        );
    }
}

/// Findings are non-increasing in severity rank; within a rank they are
/// non-decreasing in demand rank. Warnings (rank 0) come last.
#[test]
fn scan_ordering_invariant_holds() {
    let cat = RuleCatalogue::standard();
    let result = scan_all(&cat, &troubled());

    let ranks: Vec<(u8, u8)> = result
        .findings
        .iter()
        .map(|f| (f.outcome.sort_rank(), f.demand_rank))
        .collect();

    for pair in ranks.windows(2) {
        let (sev_a, demand_a) = pair[0];
        let (sev_b, demand_b) = pair[1];
        assert!(
            sev_a > sev_b || (sev_a == sev_b && demand_a <= demand_b),
            "ordering violated: {:?} before {:?}",
            pair[0],
            pair[1]
        );
    }
}

/// Hard failures all precede warnings regardless of the severity text a
/// warning carries.
#[test]
fn warnings_sort_after_all_failures() {
    let cat = RuleCatalogue::standard();
    let result = scan_all(&cat, &troubled());

    let first_warning = result.findings.iter().position(|f| f.outcome.is_warning());
    if let Some(idx) = first_warning {
        for finding in &result.findings[idx..] {
            assert!(
                !finding.outcome.is_failure(),
                "failure after warning: {:?}",
                finding.rule_key
            );
        }
    }
}

/// A healthy merchant scans clean.
#[test]
fn healthy_merchant_scans_clean() {
    let cat = RuleCatalogue::standard();
    let snap = MerchantSnapshot::healthy("m-ok");
    let result = scan_all(&cat, &snap);
    assert!(result.findings.is_empty());
    assert!(!result.has_critical());
}

/// Pass + warn + fail counts cover exactly the full catalogue.
#[test]
fn summary_counts_partition_the_catalogue() {
    let cat = RuleCatalogue::standard();
    let summary = summarize(&cat, &troubled());

    assert_eq!(summary.rules_evaluated, cat.len() as u32);
    assert_eq!(
        summary.passed + summary.warnings + summary.failed,
        summary.rules_evaluated
    );
    assert!(summary.failed > 0);
}

/// Calls-at-risk equals the sum of call volumes over exactly the failing
/// rules from the scan — no double counting, no omissions.
#[test]
fn calls_at_risk_matches_failing_rules() {
    let cat = RuleCatalogue::standard();
    let snap = troubled();
    let scan = scan_all(&cat, &snap);
    let summary = summarize(&cat, &snap);

    let expected: u64 = scan
        .findings
        .iter()
        .filter(|f| f.outcome.is_failure())
        .map(|f| f.annual_call_volume)
        .sum();

    assert_eq!(summary.calls_at_risk, expected);
}

/// The severity histogram counts hard failures only; warnings stay out.
#[test]
fn histogram_excludes_warnings() {
    let cat = RuleCatalogue::standard();
    let mut snap = MerchantSnapshot::healthy("m-warn");
    // Only warning-producing defects: disabled notifications and two
    // failed PIN attempts.
    snap.notifications_enabled = false;
    snap.pin_attempts = 2;

    let summary = summarize(&cat, &snap);
    assert_eq!(summary.failed, 0);
    assert!(summary.warnings >= 2);
    let hist = summary.severity;
    assert_eq!(hist.critical + hist.high + hist.medium + hist.low, 0);
}

/// The suspended merchant's top finding is the highest-demand critical
/// failure, which is what an operator fixes first.
#[test]
fn most_urgent_finding_comes_first() {
    let cat = RuleCatalogue::standard();
    let result = scan_all(&cat, &troubled());

    let first = &result.findings[0];
    assert_eq!(first.outcome.sort_rank(), 4, "first finding must be critical");
    assert_eq!(first.rule_key, "SETTLE_FUNDS");
    assert_eq!(first.outcome.code(), "ACC_SUSPENDED");
}
