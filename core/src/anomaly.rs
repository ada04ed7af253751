//! Statistical anomaly detection over a rolling evaluation log.
//!
//! The caller supplies a chronological log of past evaluation outcomes
//! (most recent last). The detector slides a fixed 10-event window across
//! the log, computes each window's failure rate, and z-scores the final
//! window against the population of all window rates. A final window
//! sitting more than 1.5 standard deviations above the mean is a failure
//! spike. Fewer than 10 events means no signal yet — an empty result, not
//! an error.

use crate::outcome::Severity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sliding window length, in events.
pub const WINDOW_SIZE: usize = 10;
/// Z-score above which the final window is a spike.
pub const SPIKE_Z_THRESHOLD: f64 = 1.5;
/// Z-score above which the spike is critical rather than high.
pub const CRITICAL_Z_THRESHOLD: f64 = 2.5;

/// One historical evaluation outcome.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EvalEvent {
    pub success: bool,
    #[serde(default)]
    pub at: Option<DateTime<Utc>>,
}

impl EvalEvent {
    pub fn new(success: bool) -> Self {
        Self { success, at: None }
    }
}

/// A statistically abnormal pattern in the evaluation log.
#[derive(Debug, Clone, Serialize)]
pub struct Anomaly {
    pub code: String,
    pub severity: Severity,
    pub z_score: f64,
    /// Failure rate of the final window, in percent.
    pub latest_rate_pct: f64,
    /// Mean failure rate across all windows, in percent.
    pub baseline_rate_pct: f64,
    pub description: String,
}

/// Detect failure-rate spikes in a chronological evaluation log.
///
/// Returns at most one `FAILURE_RATE_SPIKE` per call; repeated calls over
/// an unchanged log will re-report it, so callers needing debounce must
/// track what they have already surfaced.
pub fn detect_anomalies(log: &[EvalEvent]) -> Vec<Anomaly> {
    if log.len() < WINDOW_SIZE {
        return Vec::new();
    }

    let rates: Vec<f64> = log
        .windows(WINDOW_SIZE)
        .map(|w| w.iter().filter(|e| !e.success).count() as f64 / WINDOW_SIZE as f64)
        .collect();

    let n = rates.len() as f64;
    let mean = rates.iter().sum::<f64>() / n;
    let variance = rates.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n;
    let stddev = variance.sqrt();

    let latest = *rates.last().unwrap_or(&0.0);
    let z = if stddev > 0.0 { (latest - mean) / stddev } else { 0.0 };

    if z <= SPIKE_Z_THRESHOLD {
        return Vec::new();
    }

    let severity = if z > CRITICAL_Z_THRESHOLD {
        Severity::Critical
    } else {
        Severity::High
    };

    let anomaly = Anomaly {
        code: "FAILURE_RATE_SPIKE".to_string(),
        severity,
        z_score: z,
        latest_rate_pct: latest * 100.0,
        baseline_rate_pct: mean * 100.0,
        description: format!(
            "Failure rate in the last {WINDOW_SIZE} evaluations is {:.0}% against a baseline of {:.0}% (z={z:.2})",
            latest * 100.0,
            mean * 100.0,
        ),
    };

    log::warn!(
        "anomaly: {} severity={} z={:.2} latest={:.0}% baseline={:.0}%",
        anomaly.code,
        anomaly.severity.as_str(),
        z,
        anomaly.latest_rate_pct,
        anomaly.baseline_rate_pct,
    );

    vec![anomaly]
}
