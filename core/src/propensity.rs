//! Contact-propensity scoring — how likely is this merchant to call
//! support soon?
//!
//! A static additive point model, not a trained one. Each adverse sensor
//! condition contributes a fixed number of points and one human-readable
//! factor line; the total is capped at 100. Conditions are checked in a
//! fixed order so the factor list reads the same way for every merchant.
//! All weights and thresholds live in `PropensityWeights`, which callers
//! can override without touching the scoring pass.

use crate::snapshot::{AccountStatus, KycStatus, MerchantSnapshot, SimStatus, StartKeyStatus};
use serde::{Deserialize, Serialize};

/// Point weights and thresholds for the scorer. `Default` is the standard
/// table; every field is data so a deployment can retune without code.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropensityWeights {
    pub suspended: u32,
    pub frozen: u32,
    pub kyc_expired: u32,
    pub kyc_age_over_300: u32,
    pub kyc_age_over_240: u32,
    pub pin_locked: u32,
    pub pin_two_attempts: u32,
    pub sim_swap_within_7d: u32,
    pub sim_swap_within_30d: u32,
    pub start_key_expired: u32,
    pub start_key_invalid: u32,
    pub dormant_60d: u32,
    pub dormant_45d: u32,
    pub dormant_30d: u32,
    pub notifications_disabled: u32,
    pub settlement_on_hold: u32,
    pub operator_dormant_60d: u32,
}

impl Default for PropensityWeights {
    fn default() -> Self {
        Self {
            suspended: 30,
            frozen: 35,
            kyc_expired: 25,
            kyc_age_over_300: 15,
            kyc_age_over_240: 8,
            pin_locked: 20,
            pin_two_attempts: 12,
            sim_swap_within_7d: 18,
            sim_swap_within_30d: 10,
            start_key_expired: 22,
            start_key_invalid: 18,
            dormant_60d: 20,
            dormant_45d: 12,
            dormant_30d: 6,
            notifications_disabled: 8,
            settlement_on_hold: 10,
            operator_dormant_60d: 10,
        }
    }
}

/// Score tier for at-a-glance triage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PropensityTier {
    #[serde(rename = "VERY HIGH")]
    VeryHigh,
    #[serde(rename = "HIGH")]
    High,
    #[serde(rename = "MEDIUM")]
    Medium,
    #[serde(rename = "LOW")]
    Low,
}

impl PropensityTier {
    fn from_score(score: u32) -> Self {
        match score {
            70.. => PropensityTier::VeryHigh,
            50..=69 => PropensityTier::High,
            30..=49 => PropensityTier::Medium,
            _ => PropensityTier::Low,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PropensityTier::VeryHigh => "VERY HIGH",
            PropensityTier::High => "HIGH",
            PropensityTier::Medium => "MEDIUM",
            PropensityTier::Low => "LOW",
        }
    }
}

/// The scored result with its factor breakdown.
#[derive(Debug, Clone, Serialize)]
pub struct PropensityScore {
    /// 0–100, capped.
    pub score: u32,
    pub tier: PropensityTier,
    /// One line per condition that fired, in evaluation order.
    pub factors: Vec<String>,
}

/// Score a snapshot with the standard weight table.
pub fn score(snapshot: &MerchantSnapshot) -> PropensityScore {
    score_with(&PropensityWeights::default(), snapshot)
}

/// Score a snapshot with an explicit weight table.
pub fn score_with(w: &PropensityWeights, s: &MerchantSnapshot) -> PropensityScore {
    let mut total: u32 = 0;
    let mut factors: Vec<String> = Vec::new();
    fn add(points: u32, factor: String, total: &mut u32, factors: &mut Vec<String>) {
        *total += points;
        factors.push(format!("{factor} (+{points})"));
    }

    // 1. Account lifecycle.
    match s.account_status {
        AccountStatus::Suspended => {
            add(w.suspended, "Account suspended".into(), &mut total, &mut factors)
        }
        AccountStatus::Frozen => add(w.frozen, "Account frozen".into(), &mut total, &mut factors),
        AccountStatus::Active => {}
    }

    // 2. KYC — most severe condition wins.
    if s.kyc_status == KycStatus::Expired {
        add(w.kyc_expired, "KYC expired".into(), &mut total, &mut factors);
    } else if s.kyc_age_days > 300 {
        add(
            w.kyc_age_over_300,
            format!("KYC {} days old", s.kyc_age_days),
            &mut total,
            &mut factors,
        );
    } else if s.kyc_age_days > 240 {
        add(
            w.kyc_age_over_240,
            format!("KYC ageing at {} days", s.kyc_age_days),
            &mut total,
            &mut factors,
        );
    }

    // 3. PIN state.
    if s.pin_locked {
        add(w.pin_locked, "PIN locked".into(), &mut total, &mut factors);
    } else if s.pin_attempts == 2 {
        add(
            w.pin_two_attempts,
            "Two failed PIN attempts".into(),
            &mut total,
            &mut factors,
        );
    }

    // 4. SIM swap recency.
    if s.sim_status == SimStatus::Swapped {
        if let Some(days) = s.sim_swap_days_ago {
            if days < 7 {
                add(
                    w.sim_swap_within_7d,
                    format!("SIM swapped {days} day(s) ago"),
                    &mut total,
                    &mut factors,
                );
            } else if days < 30 {
                add(
                    w.sim_swap_within_30d,
                    format!("SIM swapped {days} day(s) ago"),
                    &mut total,
                    &mut factors,
                );
            }
        }
    }

    // 5. Start key.
    match s.start_key_status {
        StartKeyStatus::Expired => {
            add(w.start_key_expired, "Start key expired".into(), &mut total, &mut factors)
        }
        StartKeyStatus::Invalid => {
            add(w.start_key_invalid, "Start key invalid".into(), &mut total, &mut factors)
        }
        StartKeyStatus::Valid => {}
    }

    // 6. Customer-transaction dormancy — highest tier wins.
    if s.dormant_days >= 60 {
        add(
            w.dormant_60d,
            format!("Dormant {} days", s.dormant_days),
            &mut total,
            &mut factors,
        );
    } else if s.dormant_days >= 45 {
        add(
            w.dormant_45d,
            format!("Dormant {} days", s.dormant_days),
            &mut total,
            &mut factors,
        );
    } else if s.dormant_days >= 30 {
        add(
            w.dormant_30d,
            format!("Dormant {} days", s.dormant_days),
            &mut total,
            &mut factors,
        );
    }

    // 7. Notifications.
    if !s.notifications_enabled {
        add(
            w.notifications_disabled,
            "Notifications disabled".into(),
            &mut total,
            &mut factors,
        );
    }

    // 8. Settlement hold.
    if s.settlement_on_hold {
        add(
            w.settlement_on_hold,
            "Settlement on hold".into(),
            &mut total,
            &mut factors,
        );
    }

    // 9. Operator dormancy.
    if s.operator_dormant_days >= 60 {
        add(
            w.operator_dormant_60d,
            format!("Operator inactive {} days", s.operator_dormant_days),
            &mut total,
            &mut factors,
        );
    }

    let score = total.min(100);
    PropensityScore {
        score,
        tier: PropensityTier::from_score(score),
        factors,
    }
}
