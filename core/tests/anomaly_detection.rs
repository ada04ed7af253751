//! Anomaly detector tests: insufficient data, flat logs, and spike
//! severity tiers.

use tillwatch_core::anomaly::{detect_anomalies, EvalEvent, WINDOW_SIZE};
use tillwatch_core::outcome::Severity;

fn log_of(flags: &[bool]) -> Vec<EvalEvent> {
    flags.iter().map(|&s| EvalEvent::new(s)).collect()
}

/// Fewer than ten events is "no signal yet": an empty result, never an
/// error, whatever the events contain.
#[test]
fn short_log_yields_nothing() {
    assert!(detect_anomalies(&[]).is_empty());
    assert!(detect_anomalies(&log_of(&[false; 9])).is_empty());
    assert!(detect_anomalies(&log_of(&[true; 9])).is_empty());
}

/// Ten identical outcomes has zero variance, so z is forced to 0 and no
/// spike is reported — all-success and all-failure alike.
#[test]
fn flat_log_has_no_spike() {
    assert!(detect_anomalies(&log_of(&[true; 10])).is_empty());
    assert!(detect_anomalies(&log_of(&[false; 10])).is_empty());
}

/// A perfectly alternating log keeps every window at the same failure
/// rate: zero variance again, no spike.
#[test]
fn constant_rate_log_has_no_spike() {
    let flags: Vec<bool> = (0..20).map(|i| i % 2 == 0).collect();
    assert!(detect_anomalies(&log_of(&flags)).is_empty());
}

/// A clean run ending in two failures pushes the final window to
/// z ≈ 1.75: a spike at High severity.
#[test]
fn moderate_spike_is_high_severity() {
    let mut flags = vec![true; 12];
    flags.extend([false, false]);

    let anomalies = detect_anomalies(&log_of(&flags));
    assert_eq!(anomalies.len(), 1);
    let a = &anomalies[0];
    assert_eq!(a.code, "FAILURE_RATE_SPIKE");
    assert_eq!(a.severity, Severity::High);
    assert!(a.z_score > 1.5 && a.z_score <= 2.5, "z was {}", a.z_score);
    assert!((a.latest_rate_pct - 20.0).abs() < 1e-9);
}

/// A long clean run ending in a fully failed window crosses z > 2.5:
/// Critical severity.
#[test]
fn severe_spike_is_critical() {
    let mut flags = vec![true; 30];
    flags.extend([false; 10]);

    let anomalies = detect_anomalies(&log_of(&flags));
    assert_eq!(anomalies.len(), 1);
    let a = &anomalies[0];
    assert_eq!(a.severity, Severity::Critical);
    assert!(a.z_score > 2.5, "z was {}", a.z_score);
    assert!((a.latest_rate_pct - 100.0).abs() < 1e-9);
    assert!(a.baseline_rate_pct < a.latest_rate_pct);
    assert!(!a.description.is_empty());
}

/// Failures buried early in the log do not trip the detector: only the
/// final window is scored.
#[test]
fn old_failures_are_baseline_not_spike() {
    let mut flags = vec![false; 10];
    flags.extend([true; 30]);

    assert!(detect_anomalies(&log_of(&flags)).is_empty());
}

/// The detector reads exactly `WINDOW_SIZE`-event windows.
#[test]
fn window_size_is_ten() {
    assert_eq!(WINDOW_SIZE, 10);
}
