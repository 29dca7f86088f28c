use thiserror::Error;
use uuid::Uuid;

pub type EngineResult<T> = Result<T, EngineError>;

/// Error kinds surfaced by the core, per spec.md §7.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("client {0} not found")]
    ClientNotFound(Uuid),

    #[error("advertiser {0} not found")]
    AdvertiserNotFound(Uuid),

    #[error("campaign {0} not found")]
    CampaignNotFound(Uuid),

    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    #[error("no eligible campaign available")]
    NoAdAvailable,

    #[error("recorder refused the write")]
    RecorderRefused,

    #[error("conflicting primary key: {0}")]
    Conflict(Uuid),
}
