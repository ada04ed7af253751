//! Rule evaluation outcomes.
//!
//! An `Outcome` is the typed result of running one rule against one
//! snapshot. Success, warning, and failure are distinct variants rather than
//! a tri-state flag so that "warnings count as passes but are reported"
//! is enforced by the type, not by convention. Warnings carry a severity for
//! display, but sort after every hard failure and stay out of the severity
//! histogram.

use serde::{Deserialize, Serialize};

/// Synthetic code carried by every success outcome.
pub const CODE_OK: &str = "OK";

/// Code returned when a rule implementation panics during evaluation.
pub const CODE_RULE_ERROR: &str = "RULE_ERROR";

/// Severity of a non-passing outcome. Ordering is part of the contract:
/// the pre-scanner sorts findings critical-first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    /// Fixed sort rank: critical(4) > high(3) > medium(2) > low(1).
    pub fn rank(self) -> u8 {
        match self {
            Severity::Critical => 4,
            Severity::High => 3,
            Severity::Medium => 2,
            Severity::Low => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::High => "high",
            Severity::Medium => "medium",
            Severity::Low => "low",
        }
    }
}

/// The result of one rule evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Outcome {
    /// All guards passed. The message echoes the sensor values the rule
    /// inspected, so a channel can show *why* the check passed.
    Success { code: String, message: String },

    /// A soft condition: counts as a pass, but carries remediation text and
    /// is surfaced in scan results behind the hard failures.
    Warning {
        code: String,
        severity: Severity,
        message: String,
        reason: String,
        fix: String,
        escalation: String,
    },

    /// A hard failure: the service action this rule models would not
    /// complete for the merchant right now.
    Failure {
        code: String,
        severity: Severity,
        message: String,
        reason: String,
        fix: String,
        escalation: String,
    },
}

impl Outcome {
    pub fn ok(message: impl Into<String>) -> Self {
        Outcome::Success {
            code: CODE_OK.to_string(),
            message: message.into(),
        }
    }

    pub fn warning(
        code: impl Into<String>,
        severity: Severity,
        message: impl Into<String>,
        reason: impl Into<String>,
        fix: impl Into<String>,
        escalation: impl Into<String>,
    ) -> Self {
        Outcome::Warning {
            code: code.into(),
            severity,
            message: message.into(),
            reason: reason.into(),
            fix: fix.into(),
            escalation: escalation.into(),
        }
    }

    pub fn failure(
        code: impl Into<String>,
        severity: Severity,
        message: impl Into<String>,
        reason: impl Into<String>,
        fix: impl Into<String>,
        escalation: impl Into<String>,
    ) -> Self {
        Outcome::Failure {
            code: code.into(),
            severity,
            message: message.into(),
            reason: reason.into(),
            fix: fix.into(),
            escalation: escalation.into(),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            Outcome::Success { code, .. }
            | Outcome::Warning { code, .. }
            | Outcome::Failure { code, .. } => code,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Outcome::Success { message, .. }
            | Outcome::Warning { message, .. }
            | Outcome::Failure { message, .. } => message,
        }
    }

    /// Severity carried by the outcome; `None` for successes.
    pub fn severity(&self) -> Option<Severity> {
        match self {
            Outcome::Success { .. } => None,
            Outcome::Warning { severity, .. } | Outcome::Failure { severity, .. } => {
                Some(*severity)
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }

    pub fn is_warning(&self) -> bool {
        matches!(self, Outcome::Warning { .. })
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::Failure { .. })
    }

    /// Sort rank for the pre-scanner: hard failures rank by severity,
    /// warnings rank 0 so they land after every failure.
    pub fn sort_rank(&self) -> u8 {
        match self {
            Outcome::Failure { severity, .. } => severity.rank(),
            Outcome::Warning { .. } | Outcome::Success { .. } => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_ranks_are_ordered() {
        assert!(Severity::Critical.rank() > Severity::High.rank());
        assert!(Severity::High.rank() > Severity::Medium.rank());
        assert!(Severity::Medium.rank() > Severity::Low.rank());
        assert!(Severity::Critical > Severity::Low);
    }

    #[test]
    fn warnings_sort_below_low_failures() {
        let warn = Outcome::warning("W", Severity::Critical, "m", "r", "f", "e");
        let fail = Outcome::failure("F", Severity::Low, "m", "r", "f", "e");
        assert!(warn.sort_rank() < fail.sort_rank());
    }
}
