use thiserror::Error;

/// Faults at the library boundary. Expected business conditions (suspended
/// account, expired KYC, ...) are never errors; they are `Outcome` values.
/// A broken rule implementation is contained inside the evaluator and
/// surfaced as a `RULE_ERROR` outcome, so no scan path returns `DiagError`
/// — this enum exists for serialization faults and tooling.
#[derive(Error, Debug)]
pub enum DiagError {
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub type DiagResult<T> = Result<T, DiagError>;
