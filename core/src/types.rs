//! Shared primitive types used across the diagnosis engine.

/// Stable key identifying one rule in the catalogue (e.g. `SETTLE_FUNDS`).
pub type RuleKey = &'static str;

/// Fixed call-center priority for a rule. 1 = highest historical volume.
pub type DemandRank = u8;

/// Historical annual support-call volume attributed to a rule's issue.
pub type CallVolume = u64;

/// A stable, unique identifier for a merchant.
pub type MerchantId = String;
