//! Fleet batch scanner tests: reduction arithmetic and the failure
//! frequency table.

use tillwatch_core::catalogue::RuleCatalogue;
use tillwatch_core::fleet::{scan_fleet, TOP_FAILURE_COUNT};
use tillwatch_core::snapshot::{AccountStatus, KycStatus, MerchantSnapshot, StartKeyStatus};

fn fleet() -> Vec<MerchantSnapshot> {
    let mut snaps = Vec::new();

    // Three healthy merchants.
    for i in 0..3 {
        snaps.push(MerchantSnapshot::healthy(format!("m-healthy-{i}")));
    }

    // Two suspended (critical failures on several rules).
    for i in 0..2 {
        let mut s = MerchantSnapshot::healthy(format!("m-susp-{i}"));
        s.account_status = AccountStatus::Suspended;
        snaps.push(s);
    }

    // One with expired KYC only.
    let mut s = MerchantSnapshot::healthy("m-kyc");
    s.kyc_status = KycStatus::Expired;
    snaps.push(s);

    // One with a bad start key only.
    let mut s = MerchantSnapshot::healthy("m-key");
    s.start_key_status = StartKeyStatus::Invalid;
    snaps.push(s);

    snaps
}

/// healthy + any-failure always equals the total merchant count.
#[test]
fn healthy_plus_failing_equals_total() {
    let cat = RuleCatalogue::standard();
    let result = scan_fleet(&cat, &fleet());

    assert_eq!(result.total_merchants, 7);
    assert_eq!(
        result.healthy_merchants + result.merchants_with_any_failure,
        result.total_merchants
    );
    assert_eq!(result.healthy_merchants, 3);
}

/// Merchants-with-critical counts merchants whose histogram has at least
/// one critical failure, not critical findings.
#[test]
fn critical_merchant_count() {
    let cat = RuleCatalogue::standard();
    let result = scan_fleet(&cat, &fleet());
    assert_eq!(result.merchants_with_critical, 2);
}

/// Total calls at risk is the sum of per-merchant calls at risk.
#[test]
fn total_calls_at_risk_is_the_sum() {
    let cat = RuleCatalogue::standard();
    let result = scan_fleet(&cat, &fleet());

    let expected: u64 = result.merchants.iter().map(|m| m.summary.calls_at_risk).sum();
    assert_eq!(result.total_calls_at_risk, expected);
    assert!(expected > 0);
}

/// Failure codes count each merchant once, with integer-rounded fleet
/// percentages.
#[test]
fn frequency_table_counts_merchants_once() {
    let cat = RuleCatalogue::standard();
    let result = scan_fleet(&cat, &fleet());

    let suspended = result
        .top_failures
        .iter()
        .find(|row| row.code == "ACC_SUSPENDED")
        .expect("ACC_SUSPENDED should be in the top failures");

    // Two suspended merchants, each failing several rules with the same
    // code: still counted as 2 merchants.
    assert_eq!(suspended.merchants_affected, 2);
    assert_eq!(suspended.pct_of_fleet, 29); // 2/7 = 28.57 -> 29
}

/// The frequency table is truncated to the top five codes and sorted
/// descending by merchants affected.
#[test]
fn frequency_table_is_sorted_and_truncated() {
    let cat = RuleCatalogue::standard();
    let result = scan_fleet(&cat, &fleet());

    assert!(result.top_failures.len() <= TOP_FAILURE_COUNT);
    for pair in result.top_failures.windows(2) {
        assert!(pair[0].merchants_affected >= pair[1].merchants_affected);
    }
}

/// An empty fleet produces an empty, all-zero result.
#[test]
fn empty_fleet_is_all_zeroes() {
    let cat = RuleCatalogue::standard();
    let result = scan_fleet(&cat, &[]);

    assert_eq!(result.total_merchants, 0);
    assert_eq!(result.healthy_merchants, 0);
    assert_eq!(result.merchants_with_any_failure, 0);
    assert_eq!(result.total_calls_at_risk, 0);
    assert!(result.top_failures.is_empty());
    assert!(result.merchants.is_empty());
}

/// The batch serializes cleanly for downstream renderers.
#[test]
fn batch_result_serializes() {
    let cat = RuleCatalogue::standard();
    let result = scan_fleet(&cat, &fleet());

    let json = result.to_json().expect("batch should serialize");
    assert!(json.contains("\"total_merchants\": 7"));
    assert!(json.contains("ACC_SUSPENDED"));
}

/// Every merchant report pairs a scan with its summary for the same id.
#[test]
fn reports_pair_scan_and_summary() {
    let cat = RuleCatalogue::standard();
    let result = scan_fleet(&cat, &fleet());

    assert_eq!(result.merchants.len(), 7);
    for report in &result.merchants {
        assert_eq!(report.scan.merchant_id, report.summary.merchant_id);
    }
}
