//! tillwatch-core — failure diagnosis and risk scoring for simulated
//! mobile-money merchant accounts.
//!
//! The crate is a pure library: it takes a frozen sensor snapshot of one
//! merchant (or a fleet of them) and diagnoses which support-relevant
//! failures are live or imminent. No persistence, no I/O, no shared state;
//! every entry point is a pure function over its inputs, so fleet scans can
//! be parallelised by the caller without synchronisation.
//!
//! Component map:
//!   - `snapshot`:   the sensor snapshot rules evaluate against
//!   - `outcome`:    success / warning / failure results with remediation text
//!   - `rules`:      the twelve guard-chain diagnostic rules
//!   - `catalogue`:  rule metadata table and the containing evaluator
//!   - `scanner`:    per-merchant pre-scan and summary aggregation
//!   - `fleet`:      batch scanning and fleet-wide statistics
//!   - `anomaly`:    sliding-window z-score spike detection
//!   - `propensity`: 0–100 contact-propensity heuristic

pub mod anomaly;
pub mod catalogue;
pub mod error;
pub mod fleet;
pub mod outcome;
pub mod propensity;
pub mod rules;
pub mod scanner;
pub mod snapshot;
pub mod types;

pub use catalogue::RuleCatalogue;
pub use outcome::{Outcome, Severity};
pub use snapshot::MerchantSnapshot;
