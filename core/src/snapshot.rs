//! Merchant sensor snapshot — the frozen input every rule evaluates against.
//!
//! A snapshot is produced by the external merchant registry and is read-only
//! for the duration of one evaluation. Simulated state changes (SIM swaps,
//! PIN attempts) happen upstream, before a snapshot is cut. Identity and
//! contact fields exist for message formatting only; rule logic reads the
//! monitored sensors exclusively.

use crate::types::MerchantId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of the merchant account itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    Active,
    Suspended,
    Frozen,
}

/// KYC verification state for the business owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KycStatus {
    Valid,
    Expired,
    Missing,
}

/// State of the SIM registered to the operator line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimStatus {
    Active,
    Swapped,
    Unregistered,
}

/// State of the cryptographic start key used to initialise the till.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartKeyStatus {
    Valid,
    Invalid,
    Expired,
}

/// One merchant at one instant. Every rule, scorer, and scanner entry point
/// takes `&MerchantSnapshot`; nothing in this crate mutates one.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MerchantSnapshot {
    // Identity / contact — presentation only, never rule input.
    pub merchant_id: MerchantId,
    pub business_name: String,
    pub paybill: String,
    pub phone: String,
    pub county: String,
    pub bank_name: String,
    pub bank_account: String,
    #[serde(default)]
    pub captured_at: Option<DateTime<Utc>>,

    // Monitored sensors.
    pub account_status: AccountStatus,
    pub kyc_status: KycStatus,
    pub kyc_age_days: u32,
    pub sim_status: SimStatus,
    /// Days since the last SIM swap; `None` when the SIM was never swapped.
    pub sim_swap_days_ago: Option<u32>,
    /// Consecutive failed PIN entries (0–3).
    pub pin_attempts: u8,
    pub pin_locked: bool,
    pub start_key_status: StartKeyStatus,
    pub balance: f64,
    /// Days since the last customer transaction.
    pub dormant_days: u32,
    /// Days since the operator last logged in.
    pub operator_dormant_days: u32,
    pub notifications_enabled: bool,
    pub settlement_on_hold: bool,
}

impl MerchantSnapshot {
    /// A healthy active merchant with every sensor in its nominal state.
    /// Tests and the demo generator start from this and flip sensors.
    pub fn healthy(merchant_id: impl Into<MerchantId>) -> Self {
        Self {
            merchant_id: merchant_id.into(),
            business_name: String::new(),
            paybill: String::new(),
            phone: String::new(),
            county: String::new(),
            bank_name: String::new(),
            bank_account: String::new(),
            captured_at: None,
            account_status: AccountStatus::Active,
            kyc_status: KycStatus::Valid,
            kyc_age_days: 30,
            sim_status: SimStatus::Active,
            sim_swap_days_ago: None,
            pin_attempts: 0,
            pin_locked: false,
            start_key_status: StartKeyStatus::Valid,
            balance: 25_000.0,
            dormant_days: 0,
            operator_dormant_days: 0,
            notifications_enabled: true,
            settlement_on_hold: false,
        }
    }
}
