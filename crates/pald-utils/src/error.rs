//! Error types shared across the PALD crates.
//!
//! ## Error categories
//!
//! | Variant | Raised to caller? | Origin |
//! |---|---|---|
//! | `ConfigurationInvalid` | yes, startup only | `pald-config` validation |
//! | `SchemaUnavailable` | no — caught internally, fallback schema used | `pald-schema` |
//! | `JobNotFound` | yes | `pald-bias` |
//! | `JobNotCompleted` | yes | `pald-bias` |
//! | `Io` | yes | schema/config file access |
//!
//! Every other failure named in the specification (extraction, diff, analysis,
//! persistence, checker failures) is represented as data inside an already-`Ok`
//! result rather than as a `PaldError` variant, per the fallbacks-over-exceptions
//! design: components never propagate those as errors, they downgrade to a
//! well-typed degraded result and keep going.
//!
//! ```
//! use pald_utils::error::PaldError;
//!
//! let err = PaldError::JobNotFound { job_id: "abc123".into() };
//! assert_eq!(err.to_string(), "bias job not found: abc123");
//! ```

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PaldError {
    #[error("configuration invalid: {reason}")]
    ConfigurationInvalid { reason: String },

    #[error("schema unavailable: {reason}")]
    SchemaUnavailable { reason: String },

    #[error("bias job not found: {job_id}")]
    JobNotFound { job_id: String },

    #[error("bias job not completed: {job_id}")]
    JobNotCompleted { job_id: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type PaldResult<T> = Result<T, PaldError>;
