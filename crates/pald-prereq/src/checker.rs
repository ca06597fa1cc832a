//! The `Checker` contract, ported from `PrerequisiteChecker` (ABC) in
//! `original_source/src/services/prerequisite_checker.py`.

use crate::types::{CheckerKind, PrerequisiteResult};
use async_trait::async_trait;

#[async_trait]
pub trait Checker: Send + Sync {
    /// Canonical short name, used in operation policies, the cache, and
    /// recommendation lookups — distinct from the original's free-text
    /// display names, which each checker keeps as [`Checker::description`].
    fn name(&self) -> &str;

    fn kind(&self) -> CheckerKind;

    /// Human-readable description, never used as a lookup key.
    fn description(&self) -> &str {
        self.name()
    }

    async fn check(&self) -> PrerequisiteResult;
}
