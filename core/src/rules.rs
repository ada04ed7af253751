//! The diagnostic rule set — one rule per customer-facing service action.
//!
//! Each rule is a pure, total function from a snapshot to one `Outcome`.
//! A rule is an ordered guard chain: the first matching guard returns its
//! outcome and no later guard is consulted. Guard order is normative — a
//! snapshot can satisfy several guards at once, and the declared order
//! decides which single cause is surfaced (most blocking condition first).
//! When no guard matches, the rule returns a success outcome that echoes
//! the sensor values it inspected.
//!
//! Rules never panic for expected business conditions. A panic here is a
//! programming fault and is contained by the evaluator in `catalogue.rs`.

use crate::{
    outcome::{Outcome, Severity},
    snapshot::{AccountStatus, KycStatus, MerchantSnapshot, SimStatus, StartKeyStatus},
};

// ── Thresholds ───────────────────────────────────────────────────────────────

/// Days a fresh SIM swap blocks PIN, start-key, and settlement actions.
pub const SIM_SWAP_HOLD_DAYS: u32 = 7;
/// Days between permitted SIM swaps.
pub const SIM_SWAP_COOLDOWN_DAYS: u32 = 30;
/// Customer-transaction dormancy tiers.
pub const FULL_DORMANCY_DAYS: u32 = 90;
pub const DORMANCY_DAYS: u32 = 60;
pub const PRE_DORMANCY_DAYS: u32 = 30;
/// KYC documents older than this are flagged ahead of the 365-day expiry.
pub const KYC_EXPIRING_AGE_DAYS: u32 = 300;
/// Operator-login dormancy tiers.
pub const OPERATOR_DORMANT_DAYS: u32 = 60;
pub const OPERATOR_IDLE_DAYS: u32 = 30;
/// Failed PIN entries at which the next failure locks the till.
pub const PIN_FINAL_ATTEMPT: u8 = 2;

// ── Shared guard fragments ───────────────────────────────────────────────────

/// Days of SIM-swap hold still remaining, if the SIM was swapped inside
/// the window. `None` when no hold applies.
fn sim_swap_hold_remaining(s: &MerchantSnapshot, window_days: u32) -> Option<u32> {
    if s.sim_status != SimStatus::Swapped {
        return None;
    }
    match s.sim_swap_days_ago {
        Some(days) if days < window_days => Some(window_days - days),
        _ => None,
    }
}

fn acc_suspended() -> Outcome {
    Outcome::failure(
        "ACC_SUSPENDED",
        Severity::Critical,
        "Account is suspended",
        "The merchant account has been suspended by compliance",
        "Contact the merchant care line to begin reinstatement",
        "merchant_care_line",
    )
}

fn acc_frozen() -> Outcome {
    Outcome::failure(
        "ACC_FROZEN",
        Severity::Critical,
        "Account is frozen",
        "A fraud or court hold has frozen the merchant account",
        "Visit a branch with the business registration documents",
        "fraud_desk",
    )
}

// ── Rules ────────────────────────────────────────────────────────────────────

/// Settle funds to the linked bank account.
///
/// Guard order: suspension and freezes block everything, then the explicit
/// settlement hold, then KYC, then the SIM-swap hold, then an empty float.
pub fn check_settle_funds(s: &MerchantSnapshot) -> Outcome {
    if s.account_status == AccountStatus::Suspended {
        return acc_suspended();
    }
    if s.account_status == AccountStatus::Frozen {
        return acc_frozen();
    }
    if s.settlement_on_hold {
        return Outcome::failure(
            "SETTLEMENT_HOLD",
            Severity::High,
            "Settlement to bank is on hold",
            "A back-office review has paused settlement for this till",
            "Ask the settlement team to release the hold",
            "settlement_team",
        );
    }
    if s.kyc_status == KycStatus::Expired {
        return Outcome::failure(
            "KYC_EXPIRED",
            Severity::High,
            "KYC documents have expired",
            "Settlement is blocked until the owner's KYC is renewed",
            "Submit renewed KYC documents at any agent outlet",
            "kyc_desk",
        );
    }
    if let Some(remaining) = sim_swap_hold_remaining(s, SIM_SWAP_HOLD_DAYS) {
        return Outcome::failure(
            "SIM_SWAP_SETTLE_HOLD",
            Severity::High,
            format!("Settlement held for {remaining} more day(s) after SIM swap"),
            "Recent SIM swaps pause outward settlement as an account-takeover control",
            "Wait out the hold or verify identity at a branch to lift it early",
            "fraud_desk",
        );
    }
    if s.balance <= 0.0 {
        return Outcome::failure(
            "ZERO_BALANCE",
            Severity::Medium,
            "No funds available to settle",
            "The till balance is zero",
            "Settlement will succeed once customer payments are received",
            "self_service",
        );
    }
    Outcome::ok(format!(
        "Settlement available: balance {:.2}, KYC {:?}, no holds",
        s.balance, s.kyc_status
    ))
}

/// Reset the operator PIN.
pub fn check_reset_pin(s: &MerchantSnapshot) -> Outcome {
    if s.account_status == AccountStatus::Suspended {
        return acc_suspended();
    }
    if s.account_status == AccountStatus::Frozen {
        return acc_frozen();
    }
    if s.sim_status == SimStatus::Unregistered {
        return Outcome::failure(
            "SIM_UNREGISTERED",
            Severity::High,
            "Operator SIM is not registered",
            "PIN resets are delivered to the operator line, which is unregistered",
            "Register the SIM with the mobile operator, then retry",
            "sim_registration_desk",
        );
    }
    if let Some(remaining) = sim_swap_hold_remaining(s, SIM_SWAP_HOLD_DAYS) {
        return Outcome::failure(
            "SIM_SWAP_HOLD",
            Severity::High,
            format!("PIN reset held for {remaining} more day(s) after SIM swap"),
            "PIN resets are held for 7 days after a SIM swap to stop account takeover",
            "Wait out the hold or verify identity at a branch",
            "fraud_desk",
        );
    }
    if !s.pin_locked && s.pin_attempts == PIN_FINAL_ATTEMPT {
        return Outcome::warning(
            "PIN_FINAL_ATTEMPT",
            Severity::Medium,
            "One PIN attempt remaining before lock",
            "Two consecutive failed PIN entries have been recorded",
            "Reset the PIN now to avoid a till lock on the next failure",
            "self_service",
        );
    }
    Outcome::ok(format!(
        "PIN reset available: {} failed attempt(s), SIM {:?}",
        s.pin_attempts, s.sim_status
    ))
}

/// Request a SIM swap for the operator line.
pub fn check_sim_swap(s: &MerchantSnapshot) -> Outcome {
    if s.account_status == AccountStatus::Frozen {
        return acc_frozen();
    }
    if s.account_status == AccountStatus::Suspended {
        return acc_suspended();
    }
    if s.kyc_status != KycStatus::Valid {
        return Outcome::failure(
            "KYC_UNVERIFIED",
            Severity::High,
            "KYC must be valid before a SIM swap",
            "SIM swaps require a verified owner identity on file",
            "Update KYC documents, then request the swap again",
            "kyc_desk",
        );
    }
    if let Some(remaining) = sim_swap_hold_remaining(s, SIM_SWAP_COOLDOWN_DAYS) {
        return Outcome::failure(
            "SWAP_COOLDOWN",
            Severity::Medium,
            format!("Next SIM swap allowed in {remaining} day(s)"),
            "Only one SIM swap is permitted per 30-day window",
            "Wait for the cooldown to lapse or escalate with proof of loss",
            "sim_registration_desk",
        );
    }
    Outcome::ok(format!(
        "SIM swap available: SIM {:?}, KYC {:?}",
        s.sim_status, s.kyc_status
    ))
}

/// Account status check, including customer-transaction dormancy tiers.
///
/// The 90-day tier must be tested before the lower tiers: a merchant at 95
/// dormant days is fully dormant, not merely idle.
pub fn check_account_status(s: &MerchantSnapshot) -> Outcome {
    if s.account_status == AccountStatus::Suspended {
        return acc_suspended();
    }
    if s.account_status == AccountStatus::Frozen {
        return acc_frozen();
    }
    if s.dormant_days >= FULL_DORMANCY_DAYS {
        return Outcome::failure(
            "FULLY_DORMANT",
            Severity::Critical,
            format!("Till fully dormant: {} days without a customer payment", s.dormant_days),
            "90+ days without customer transactions triggers deactivation review",
            "Transact on the till immediately and contact merchant care to halt deactivation",
            "merchant_care_line",
        );
    }
    if s.dormant_days >= DORMANCY_DAYS {
        return Outcome::failure(
            "DORMANT",
            Severity::High,
            format!("Till dormant: {} days without a customer payment", s.dormant_days),
            "60+ days of inactivity puts the till on the dormancy watchlist",
            "Resume transacting; dormancy clears after the first customer payment",
            "merchant_care_line",
        );
    }
    if s.dormant_days >= PRE_DORMANCY_DAYS {
        return Outcome::warning(
            "PRE_DORMANT",
            Severity::Medium,
            format!("{} days without a customer payment", s.dormant_days),
            "30+ idle days is the first dormancy tier",
            "A single customer payment resets the dormancy clock",
            "self_service",
        );
    }
    Outcome::ok(format!(
        "Account active: last customer payment {} day(s) ago",
        s.dormant_days
    ))
}

/// Reset the cryptographic start key for the till device.
pub fn check_start_key_reset(s: &MerchantSnapshot) -> Outcome {
    if s.account_status == AccountStatus::Suspended {
        return acc_suspended();
    }
    if s.start_key_status == StartKeyStatus::Expired {
        return Outcome::failure(
            "START_KEY_EXPIRED",
            Severity::High,
            "Start key has expired",
            "The till cannot initialise with an expired start key",
            "Request a new start key; it is delivered to the operator line",
            "technical_support",
        );
    }
    if s.start_key_status == StartKeyStatus::Invalid {
        return Outcome::failure(
            "START_KEY_INVALID",
            Severity::High,
            "Start key is invalid",
            "The stored start key failed verification, often after a device change",
            "Re-issue the start key from the merchant portal",
            "technical_support",
        );
    }
    if let Some(remaining) = sim_swap_hold_remaining(s, SIM_SWAP_HOLD_DAYS) {
        return Outcome::failure(
            "SIM_SWAP_HOLD",
            Severity::High,
            format!("Start key delivery held for {remaining} more day(s) after SIM swap"),
            "Key material is not delivered to a freshly swapped SIM",
            "Wait out the hold or verify identity at a branch",
            "fraud_desk",
        );
    }
    Outcome::ok(format!("Start key {:?}: no reset needed", s.start_key_status))
}

/// Request an account statement.
pub fn check_statement(s: &MerchantSnapshot) -> Outcome {
    if s.account_status == AccountStatus::Frozen {
        return acc_frozen();
    }
    if s.account_status == AccountStatus::Suspended {
        return acc_suspended();
    }
    if s.dormant_days >= FULL_DORMANCY_DAYS {
        return Outcome::warning(
            "NO_RECENT_ACTIVITY",
            Severity::Low,
            "Statement will show no recent activity",
            format!("No customer transactions in the last {} days", s.dormant_days),
            "Statements remain available; note the period will be empty",
            "self_service",
        );
    }
    Outcome::ok(format!(
        "Statement available: account {:?}",
        s.account_status
    ))
}

/// Update KYC documents for the business owner.
pub fn check_kyc_update(s: &MerchantSnapshot) -> Outcome {
    if s.account_status == AccountStatus::Frozen {
        return acc_frozen();
    }
    if s.kyc_status == KycStatus::Missing {
        return Outcome::failure(
            "KYC_MISSING",
            Severity::Critical,
            "No KYC documents on file",
            "The account has no owner identity documents at all",
            "Submit the owner's ID and business permit at an agent outlet",
            "kyc_desk",
        );
    }
    if s.kyc_status == KycStatus::Expired {
        return Outcome::failure(
            "KYC_EXPIRED",
            Severity::High,
            "KYC documents have expired",
            format!("Documents are {} days old, past the 365-day validity", s.kyc_age_days),
            "Submit renewed KYC documents at any agent outlet",
            "kyc_desk",
        );
    }
    if s.kyc_age_days > KYC_EXPIRING_AGE_DAYS {
        return Outcome::warning(
            "KYC_EXPIRING",
            Severity::Medium,
            format!("KYC documents expire in {} days", 365u32.saturating_sub(s.kyc_age_days)),
            "Documents older than 300 days are close to the annual expiry",
            "Renew the documents early to avoid settlement blocks",
            "self_service",
        );
    }
    Outcome::ok(format!(
        "KYC {:?}, {} days old: no update required",
        s.kyc_status, s.kyc_age_days
    ))
}

/// Change payment-notification settings.
pub fn check_notifications(s: &MerchantSnapshot) -> Outcome {
    if s.sim_status == SimStatus::Unregistered {
        return Outcome::failure(
            "SIM_UNREGISTERED",
            Severity::High,
            "Notifications cannot be delivered",
            "The operator SIM is unregistered, so SMS delivery fails",
            "Register the SIM with the mobile operator",
            "sim_registration_desk",
        );
    }
    if let Some(remaining) = sim_swap_hold_remaining(s, SIM_SWAP_HOLD_DAYS) {
        return Outcome::failure(
            "SIM_SWAP_HOLD",
            Severity::Medium,
            format!("Notification changes held for {remaining} more day(s) after SIM swap"),
            "Notification targets are frozen after a SIM swap",
            "Wait out the hold or verify identity at a branch",
            "fraud_desk",
        );
    }
    if !s.notifications_enabled {
        return Outcome::warning(
            "NOTIFY_DISABLED",
            Severity::Low,
            "Payment notifications are switched off",
            "The operator has disabled per-payment SMS notifications",
            "Re-enable notifications from the till menu to spot missed payments",
            "self_service",
        );
    }
    Outcome::ok("Notifications enabled and deliverable".to_string())
}

/// Balance enquiry on the till float.
pub fn check_balance(s: &MerchantSnapshot) -> Outcome {
    if s.pin_locked {
        return Outcome::failure(
            "PIN_LOCKED",
            Severity::High,
            "Till is PIN-locked",
            "Three failed PIN entries have locked the till",
            "Unlock the PIN via merchant care before any enquiry",
            "merchant_care_line",
        );
    }
    if s.start_key_status == StartKeyStatus::Expired {
        return Outcome::failure(
            "START_KEY_EXPIRED",
            Severity::High,
            "Start key has expired",
            "The till cannot authenticate an enquiry with an expired start key",
            "Request a new start key",
            "technical_support",
        );
    }
    if s.start_key_status == StartKeyStatus::Invalid {
        return Outcome::failure(
            "START_KEY_INVALID",
            Severity::High,
            "Start key is invalid",
            "The stored start key failed verification",
            "Re-issue the start key from the merchant portal",
            "technical_support",
        );
    }
    if s.balance <= 0.0 {
        return Outcome::warning(
            "ZERO_BALANCE",
            Severity::Low,
            "Till balance is zero",
            "No customer payments are currently held on the till",
            "No action needed; the enquiry itself will succeed",
            "self_service",
        );
    }
    Outcome::ok(format!("Balance enquiry available: {:.2} on the till", s.balance))
}

/// Operator dormancy review — days since the operator last logged in.
pub fn check_operator_dormancy(s: &MerchantSnapshot) -> Outcome {
    if s.operator_dormant_days >= OPERATOR_DORMANT_DAYS {
        return Outcome::failure(
            "OPERATOR_DORMANT",
            Severity::High,
            format!("Operator inactive for {} days", s.operator_dormant_days),
            "60+ days without an operator login suggests an abandoned or staff-less till",
            "Have the operator log in, or nominate a new operator via merchant care",
            "merchant_care_line",
        );
    }
    if s.operator_dormant_days >= OPERATOR_IDLE_DAYS {
        return Outcome::warning(
            "OPERATOR_IDLE",
            Severity::Medium,
            format!("Operator idle for {} days", s.operator_dormant_days),
            "30+ days without a login is the first operator-dormancy tier",
            "Any operator login resets the clock",
            "self_service",
        );
    }
    Outcome::ok(format!(
        "Operator active: last login {} day(s) ago",
        s.operator_dormant_days
    ))
}

/// Unlock a PIN-locked till.
///
/// The SIM-swap guard runs before the lock check: an unlock delivered to a
/// freshly swapped SIM is the classic account-takeover path.
pub fn check_pin_unlock(s: &MerchantSnapshot) -> Outcome {
    if let Some(remaining) = sim_swap_hold_remaining(s, SIM_SWAP_HOLD_DAYS) {
        return Outcome::failure(
            "SIM_SWAP_HOLD",
            Severity::High,
            format!("PIN unlock held for {remaining} more day(s) after SIM swap"),
            "Unlocks are withheld for 7 days after a SIM swap",
            "Verify identity at a branch to unlock early",
            "fraud_desk",
        );
    }
    if s.pin_locked {
        return Outcome::failure(
            "PIN_LOCKED",
            Severity::High,
            "Till is PIN-locked",
            "Three failed PIN entries have locked the till",
            "Merchant care can unlock after owner verification",
            "merchant_care_line",
        );
    }
    if s.pin_attempts == PIN_FINAL_ATTEMPT {
        return Outcome::warning(
            "PIN_FINAL_ATTEMPT",
            Severity::Medium,
            "One PIN attempt remaining before lock",
            "Two consecutive failed PIN entries have been recorded",
            "A successful entry resets the counter",
            "self_service",
        );
    }
    Outcome::ok(format!(
        "No unlock needed: {} failed attempt(s), not locked",
        s.pin_attempts
    ))
}

/// Apply for an additional till or store number.
pub fn check_new_application(s: &MerchantSnapshot) -> Outcome {
    if s.kyc_status == KycStatus::Missing {
        return Outcome::failure(
            "KYC_MISSING",
            Severity::Critical,
            "No KYC documents on file",
            "New applications require the owner's identity documents",
            "Submit the owner's ID and business permit, then reapply",
            "kyc_desk",
        );
    }
    if s.kyc_status == KycStatus::Expired {
        return Outcome::failure(
            "KYC_EXPIRED",
            Severity::High,
            "KYC documents have expired",
            "New applications are rejected while KYC is out of date",
            "Renew the KYC documents, then reapply",
            "kyc_desk",
        );
    }
    if s.account_status == AccountStatus::Suspended {
        return Outcome::failure(
            "ACC_SUSPENDED",
            Severity::High,
            "Existing account is suspended",
            "New tills are not issued while an existing account is suspended",
            "Resolve the suspension with merchant care first",
            "merchant_care_line",
        );
    }
    Outcome::ok(format!(
        "Application possible: account {:?}, KYC {:?}",
        s.account_status, s.kyc_status
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::MerchantSnapshot;

    #[test]
    fn sim_swap_hold_arithmetic_is_exact() {
        let mut s = MerchantSnapshot::healthy("m-1");
        s.sim_status = SimStatus::Swapped;
        s.sim_swap_days_ago = Some(5);
        assert_eq!(sim_swap_hold_remaining(&s, SIM_SWAP_HOLD_DAYS), Some(2));

        s.sim_swap_days_ago = Some(7);
        assert_eq!(sim_swap_hold_remaining(&s, SIM_SWAP_HOLD_DAYS), None);
    }

    #[test]
    fn swapped_sim_without_age_has_no_hold() {
        let mut s = MerchantSnapshot::healthy("m-1");
        s.sim_status = SimStatus::Swapped;
        s.sim_swap_days_ago = None;
        assert_eq!(sim_swap_hold_remaining(&s, SIM_SWAP_HOLD_DAYS), None);
    }
}
