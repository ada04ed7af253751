//! The rule catalogue and evaluator.
//!
//! The catalogue is an explicit value built once at startup and passed to
//! every scanner entry point — no global registry. Demand ranks, historical
//! call volumes, and menu paths live in the `STANDARD_RULES` table so that
//! sort order and calls-at-risk can be retuned without touching any guard
//! logic.
//!
//! `evaluate` is the single containment point of the crate:
//!   - an unknown rule key returns a synthetic success (permissive no-op,
//!     kept for compatibility with menu-driven callers);
//!   - a panicking rule is caught and reported as a `RULE_ERROR` failure.
//! Nothing a rule does can abort a fleet scan.

use crate::{
    outcome::{Outcome, Severity, CODE_RULE_ERROR},
    rules,
    snapshot::MerchantSnapshot,
    types::{CallVolume, DemandRank, RuleKey},
};
use serde::Serialize;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Stable rule keys. Callers and channel simulators address rules by these.
pub mod keys {
    use crate::types::RuleKey;

    pub const SETTLE_FUNDS: RuleKey = "SETTLE_FUNDS";
    pub const RESET_PIN: RuleKey = "RESET_PIN";
    pub const SIM_SWAP: RuleKey = "SIM_SWAP";
    pub const ACCOUNT_STATUS: RuleKey = "ACCOUNT_STATUS";
    pub const START_KEY_RESET: RuleKey = "START_KEY_RESET";
    pub const STATEMENT: RuleKey = "STATEMENT";
    pub const KYC_UPDATE: RuleKey = "KYC_UPDATE";
    pub const NOTIFICATIONS: RuleKey = "NOTIFICATIONS";
    pub const BALANCE: RuleKey = "BALANCE";
    pub const OPERATOR_DORMANCY: RuleKey = "OPERATOR_DORMANCY";
    pub const PIN_UNLOCK: RuleKey = "PIN_UNLOCK";
    pub const NEW_APPLICATION: RuleKey = "NEW_APPLICATION";
}

/// A rule implementation: pure function from snapshot to outcome.
pub type RuleFn = fn(&MerchantSnapshot) -> Outcome;

/// Presentation and prioritisation metadata for one rule.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RuleMeta {
    pub key: RuleKey,
    pub label: &'static str,
    /// 1 = highest historical call-center volume.
    pub demand_rank: DemandRank,
    /// Annual support calls historically attributed to this issue.
    pub annual_call_volume: CallVolume,
    /// USSD menu path for the matching service action. Presentation only.
    pub menu_path: &'static str,
}

struct RuleEntry {
    meta: RuleMeta,
    check: RuleFn,
}

/// The standard catalogue table. Order matches demand rank; evaluation
/// order is irrelevant to results (the pre-scanner re-sorts), but a stable
/// table keeps scan output deterministic.
#[rustfmt::skip]
const STANDARD_RULES: &[(RuleMeta, RuleFn)] = &[
    (RuleMeta { key: keys::SETTLE_FUNDS,      label: "Settle funds to bank",     demand_rank: 1,  annual_call_volume: 18_400, menu_path: "1*1" }, rules::check_settle_funds),
    (RuleMeta { key: keys::RESET_PIN,         label: "Reset operator PIN",       demand_rank: 2,  annual_call_volume: 15_200, menu_path: "2*1" }, rules::check_reset_pin),
    (RuleMeta { key: keys::SIM_SWAP,          label: "SIM swap request",         demand_rank: 3,  annual_call_volume: 11_900, menu_path: "2*2" }, rules::check_sim_swap),
    (RuleMeta { key: keys::ACCOUNT_STATUS,    label: "Account status check",     demand_rank: 4,  annual_call_volume: 9_700,  menu_path: "3*1" }, rules::check_account_status),
    (RuleMeta { key: keys::START_KEY_RESET,   label: "Start key reset",          demand_rank: 5,  annual_call_volume: 8_300,  menu_path: "2*3" }, rules::check_start_key_reset),
    (RuleMeta { key: keys::STATEMENT,         label: "Account statement",        demand_rank: 6,  annual_call_volume: 6_800,  menu_path: "3*2" }, rules::check_statement),
    (RuleMeta { key: keys::KYC_UPDATE,        label: "KYC document update",      demand_rank: 7,  annual_call_volume: 5_400,  menu_path: "4*1" }, rules::check_kyc_update),
    (RuleMeta { key: keys::NOTIFICATIONS,     label: "Notification settings",    demand_rank: 8,  annual_call_volume: 4_100,  menu_path: "4*2" }, rules::check_notifications),
    (RuleMeta { key: keys::BALANCE,           label: "Balance enquiry",          demand_rank: 9,  annual_call_volume: 3_600,  menu_path: "1*2" }, rules::check_balance),
    (RuleMeta { key: keys::OPERATOR_DORMANCY, label: "Operator dormancy review", demand_rank: 10, annual_call_volume: 2_900,  menu_path: "3*3" }, rules::check_operator_dormancy),
    (RuleMeta { key: keys::PIN_UNLOCK,        label: "PIN unlock",               demand_rank: 11, annual_call_volume: 2_200,  menu_path: "2*4" }, rules::check_pin_unlock),
    (RuleMeta { key: keys::NEW_APPLICATION,   label: "New till application",     demand_rank: 12, annual_call_volume: 1_500,  menu_path: "5*1" }, rules::check_new_application),
];

/// The full set of diagnostic rules plus their metadata.
pub struct RuleCatalogue {
    entries: Vec<RuleEntry>,
}

impl RuleCatalogue {
    /// Build the standard 12-rule catalogue.
    pub fn standard() -> Self {
        Self::from_entries(STANDARD_RULES.iter().copied())
    }

    /// Build a catalogue from an explicit rule table. The standard table is
    /// the normal path; this exists for harnesses that need a reduced or
    /// deliberately broken rule set.
    pub fn from_entries(entries: impl IntoIterator<Item = (RuleMeta, RuleFn)>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|(meta, check)| RuleEntry { meta, check })
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Metadata for every rule, in table order.
    pub fn metas(&self) -> impl Iterator<Item = &RuleMeta> {
        self.entries.iter().map(|e| &e.meta)
    }

    pub fn meta(&self, key: &str) -> Option<&RuleMeta> {
        self.entries
            .iter()
            .find(|e| e.meta.key == key)
            .map(|e| &e.meta)
    }

    /// Evaluate one rule against a snapshot.
    ///
    /// Unknown keys return a synthetic success; a panicking rule returns a
    /// `RULE_ERROR` failure carrying the panic text. Neither case propagates.
    pub fn evaluate(&self, snapshot: &MerchantSnapshot, key: &str) -> Outcome {
        let entry = match self.entries.iter().find(|e| e.meta.key == key) {
            Some(entry) => entry,
            None => {
                log::debug!("evaluate: unknown rule key '{key}', treating as no-op");
                return Outcome::ok(format!("No check registered for '{key}'"));
            }
        };

        match catch_unwind(AssertUnwindSafe(|| (entry.check)(snapshot))) {
            Ok(outcome) => outcome,
            Err(payload) => {
                let detail = panic_text(payload.as_ref());
                log::error!("rule {key} panicked during evaluation: {detail}");
                Outcome::failure(
                    CODE_RULE_ERROR,
                    Severity::High,
                    format!("Diagnostic check '{key}' could not run"),
                    format!("Rule implementation fault: {detail}"),
                    "Report the rule key to the engineering team",
                    "engineering",
                )
            }
        }
    }

    /// Evaluate every rule in table order, pairing each outcome with its
    /// metadata. Shared by the pre-scanner and the aggregator.
    pub fn evaluate_all<'a>(
        &'a self,
        snapshot: &MerchantSnapshot,
    ) -> Vec<(&'a RuleMeta, Outcome)> {
        self.entries
            .iter()
            .map(|e| (&e.meta, self.evaluate(snapshot, e.meta.key)))
            .collect()
    }
}

fn panic_text(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unidentified panic".to_string()
    }
}
