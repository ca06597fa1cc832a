//! Prerequisite Validator (C6), ported from
//! `PrerequisiteValidationService` and `prerequisite_checker.py` in
//! `original_source/src/services/` and `original_source/src/logic/`: named
//! checkers, a TTL result cache, an operation-policy registry, and a
//! bounded-parallel runner that degrades individual check failures into
//! typed results rather than propagating them.

pub mod cache;
pub mod checker;
pub mod checkers;
pub mod policy;
pub mod recommendation;
pub mod types;
pub mod validator;

pub use checker::Checker;
pub use checkers::{
    ConsentChecker, ConsentStore, DatabaseChecker, DatabaseProbe, DatabaseProbeError, DependentServiceChecker, ExternalServiceChecker,
    SystemHealthChecker, TablePresence, REQUIRED_CONSENT_SLUGS,
};
pub use policy::{default_policy, OperationPolicy};
pub use recommendation::synthesize_recommendations;
pub use types::{
    CacheEntryStatus, CacheStatus, CheckStatus, CheckSuite, CheckerKind, OperationReadiness, Priority, PrerequisiteResult, Recommendation,
};
pub use validator::PrerequisiteValidator;
