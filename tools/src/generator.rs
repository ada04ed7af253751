//! Demo fleet generation — the stand-in for the external merchant registry.
//!
//! Produces a deterministic fleet of merchant snapshots with a controlled
//! defect mix, plus a synthetic evaluation history for the anomaly
//! detector. The diagnosis core never depends on any of this; snapshots are
//! handed to it fully formed, and all mutation (SIM swaps, PIN attempts)
//! happens here, before evaluation.

use crate::{
    names,
    rng::{DemoRng, StreamSlot},
};
use chrono::Utc;
use tillwatch_core::anomaly::EvalEvent;
use tillwatch_core::snapshot::{
    AccountStatus, KycStatus, MerchantSnapshot, SimStatus, StartKeyStatus,
};

// Defect mix for the demo fleet. Probabilities are per merchant and
// independent, so compound-cause merchants occur naturally.
const P_SUSPENDED: f64 = 0.05;
const P_FROZEN: f64 = 0.02;
const P_KYC_EXPIRED: f64 = 0.10;
const P_KYC_MISSING: f64 = 0.02;
const P_SIM_SWAPPED: f64 = 0.08;
const P_SIM_UNREGISTERED: f64 = 0.02;
const P_PIN_LOCKED: f64 = 0.04;
const P_START_KEY_BAD: f64 = 0.06;
const P_DORMANT: f64 = 0.12;
const P_NOTIFY_OFF: f64 = 0.15;
const P_SETTLE_HOLD: f64 = 0.05;
const P_OPERATOR_DORMANT: f64 = 0.07;

/// Generate `count` snapshots for the given master seed.
pub fn generate_fleet(master_seed: u64, count: u32) -> Vec<MerchantSnapshot> {
    let mut rng = DemoRng::for_stream(master_seed, StreamSlot::Merchants);
    (0..count).map(|i| generate_merchant(&mut rng, i)).collect()
}

fn generate_merchant(rng: &mut DemoRng, index: u32) -> MerchantSnapshot {
    let mut snap = MerchantSnapshot::healthy(format!("m-{index:06}"));
    snap.business_name = names::business_name(rng);
    snap.paybill = format!("{}", 500_000 + rng.next_u64_below(400_000));
    snap.phone = format!("+2547{:08}", rng.next_u64_below(100_000_000));
    snap.county = names::county(rng).to_string();
    snap.bank_name = names::bank(rng).to_string();
    snap.bank_account = format!("{:010}", rng.next_u64_below(10_000_000_000));
    snap.captured_at = Some(Utc::now());

    snap.balance = (rng.next_f64() * 180_000.0).round();
    snap.kyc_age_days = rng.range_u32(10, 365);

    if rng.chance(P_FROZEN) {
        snap.account_status = AccountStatus::Frozen;
    } else if rng.chance(P_SUSPENDED) {
        snap.account_status = AccountStatus::Suspended;
    }

    if rng.chance(P_KYC_MISSING) {
        snap.kyc_status = KycStatus::Missing;
    } else if rng.chance(P_KYC_EXPIRED) {
        snap.kyc_status = KycStatus::Expired;
        snap.kyc_age_days = rng.range_u32(366, 500);
    }

    if rng.chance(P_SIM_UNREGISTERED) {
        snap.sim_status = SimStatus::Unregistered;
    } else if rng.chance(P_SIM_SWAPPED) {
        snap.sim_status = SimStatus::Swapped;
        snap.sim_swap_days_ago = Some(rng.range_u32(0, 45));
    }

    if rng.chance(P_PIN_LOCKED) {
        snap.pin_locked = true;
        snap.pin_attempts = 3;
    } else {
        snap.pin_attempts = rng.next_u64_below(3) as u8;
    }

    if rng.chance(P_START_KEY_BAD) {
        snap.start_key_status = if rng.chance(0.5) {
            StartKeyStatus::Expired
        } else {
            StartKeyStatus::Invalid
        };
    }

    if rng.chance(P_DORMANT) {
        snap.dormant_days = rng.range_u32(30, 140);
    } else {
        snap.dormant_days = rng.range_u32(0, 20);
    }

    if rng.chance(P_OPERATOR_DORMANT) {
        snap.operator_dormant_days = rng.range_u32(30, 120);
    } else {
        snap.operator_dormant_days = rng.range_u32(0, 14);
    }

    snap.notifications_enabled = !rng.chance(P_NOTIFY_OFF);
    snap.settlement_on_hold = rng.chance(P_SETTLE_HOLD);

    snap
}

/// Synthetic evaluation history: a mostly-clean log whose tail degrades,
/// giving the anomaly detector something to find on most seeds.
pub fn generate_history(master_seed: u64, length: u32) -> Vec<EvalEvent> {
    let mut rng = DemoRng::for_stream(master_seed, StreamSlot::History);
    let length = length as usize;
    let tail = length.min(8);

    (0..length)
        .map(|i| {
            let p_fail = if i >= length - tail { 0.55 } else { 0.08 };
            EvalEvent::new(!rng.chance(p_fail))
        })
        .collect()
}
