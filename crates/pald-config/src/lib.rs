//! PALD pipeline configuration.
//!
//! Grounded on `crates/xchecker-config/src/config/model.rs` for the serde-derive
//! conventions (defaults via functions, explicit field docs) and on
//! `original_source/config/pald_enhancement.py`'s `PALDEnhancementConfig` for the
//! field set and the exact environment variable names, which are kept verbatim
//! since they are already a stable external contract.
//!
//! Unlike the original's `getenv(...).lower() == "true"` pattern (which silently
//! treats a typo as `false` forever), an env var present but unparsable is a hard
//! [`pald_utils::PaldError::ConfigurationInvalid`] raised at startup — see
//! `SPEC_FULL.md` §6 for the rationale.

use camino::Utf8PathBuf;
use pald_utils::error::{PaldError, PaldResult};
use serde::{Deserialize, Serialize};
use std::env;

fn default_schema_file_path() -> Utf8PathBuf {
    Utf8PathBuf::from("schema/pald_schema.json")
}
fn default_schema_cache_ttl() -> u64 {
    300
}
fn default_true() -> bool {
    true
}
fn default_bias_job_batch_size() -> usize {
    10
}
fn default_bias_analysis_timeout() -> u64 {
    30
}
fn default_max_concurrent_bias_jobs() -> usize {
    5
}
fn default_queue_processing_interval() -> u64 {
    60
}
fn default_data_retention_days() -> u32 {
    90
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PaldConfig {
    #[serde(default = "default_schema_file_path")]
    pub schema_file_path: Utf8PathBuf,
    #[serde(default = "default_schema_cache_ttl")]
    pub schema_cache_ttl: u64,
    #[serde(default = "default_true")]
    pub enable_schema_evolution: bool,
    /// Invariant: must be `true`. Cleared only by a misconfigured deployment;
    /// `validate()` rejects `false`.
    #[serde(default = "default_true")]
    pub mandatory_pald_extraction: bool,
    #[serde(default = "default_true")]
    pub pald_analysis_deferred: bool,
    #[serde(default = "default_true")]
    pub enable_bias_analysis: bool,
    #[serde(default = "default_true")]
    pub enable_age_shift_analysis: bool,
    #[serde(default = "default_true")]
    pub enable_gender_conformity_analysis: bool,
    #[serde(default = "default_true")]
    pub enable_ethnicity_analysis: bool,
    #[serde(default = "default_true")]
    pub enable_occupational_stereotype_analysis: bool,
    #[serde(default = "default_true")]
    pub enable_ambivalent_stereotype_analysis: bool,
    #[serde(default = "default_true")]
    pub enable_multiple_stereotyping_analysis: bool,
    #[serde(default = "default_bias_job_batch_size")]
    pub bias_job_batch_size: usize,
    #[serde(default = "default_bias_analysis_timeout")]
    pub bias_analysis_timeout: u64,
    #[serde(default = "default_max_concurrent_bias_jobs")]
    pub max_concurrent_bias_jobs: usize,
    #[serde(default = "default_queue_processing_interval")]
    pub queue_processing_interval: u64,
    #[serde(default = "default_data_retention_days")]
    pub data_retention_days: u32,
    #[serde(default = "default_true")]
    pub enable_pseudonymization: bool,
}

impl Default for PaldConfig {
    fn default() -> Self {
        Self {
            schema_file_path: default_schema_file_path(),
            schema_cache_ttl: default_schema_cache_ttl(),
            enable_schema_evolution: true,
            mandatory_pald_extraction: true,
            pald_analysis_deferred: true,
            enable_bias_analysis: true,
            enable_age_shift_analysis: true,
            enable_gender_conformity_analysis: true,
            enable_ethnicity_analysis: true,
            enable_occupational_stereotype_analysis: true,
            enable_ambivalent_stereotype_analysis: true,
            enable_multiple_stereotyping_analysis: true,
            bias_job_batch_size: default_bias_job_batch_size(),
            bias_analysis_timeout: default_bias_analysis_timeout(),
            max_concurrent_bias_jobs: default_max_concurrent_bias_jobs(),
            queue_processing_interval: default_queue_processing_interval(),
            data_retention_days: default_data_retention_days(),
            enable_pseudonymization: true,
        }
    }
}

macro_rules! override_bool_env {
    ($cfg_field:expr, $var:expr) => {
        if let Ok(raw) = env::var($var) {
            $cfg_field = raw.trim().eq_ignore_ascii_case("true");
        }
    };
}

macro_rules! override_numeric_env {
    ($cfg_field:expr, $var:expr, $ty:ty) => {
        if let Ok(raw) = env::var($var) {
            $cfg_field = raw.trim().parse::<$ty>().map_err(|_| PaldError::ConfigurationInvalid {
                reason: format!("{} must be a valid {}: got {raw:?}", $var, stringify!($ty)),
            })?;
        }
    };
}

impl PaldConfig {
    /// Build a config starting from defaults, then applying environment
    /// overrides. Returns `ConfigurationInvalid` if an override is malformed.
    pub fn from_env() -> PaldResult<Self> {
        let mut cfg = Self::default();
        cfg.apply_env_overrides()?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Build a config from a TOML file, then layer environment overrides on
    /// top (same precedence as the teacher's config discovery: file, then
    /// env). Fields absent from the file keep their [`Default`].
    pub fn from_file_and_env(path: impl AsRef<std::path::Path>) -> PaldResult<Self> {
        let contents = std::fs::read_to_string(path.as_ref())?;
        let mut cfg: Self = toml::from_str(&contents).map_err(|err| PaldError::ConfigurationInvalid {
            reason: format!("invalid config file {}: {err}", path.as_ref().display()),
        })?;
        cfg.apply_env_overrides()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn apply_env_overrides(&mut self) -> PaldResult<()> {
        let cfg = self;

        if let Ok(raw) = env::var("PALD_SCHEMA_FILE_PATH") {
            cfg.schema_file_path = Utf8PathBuf::from(raw);
        }
        override_numeric_env!(cfg.schema_cache_ttl, "PALD_SCHEMA_CACHE_TTL", u64);
        override_bool_env!(cfg.enable_schema_evolution, "PALD_ENABLE_SCHEMA_EVOLUTION");
        override_bool_env!(cfg.pald_analysis_deferred, "PALD_ANALYSIS_DEFERRED");
        override_bool_env!(cfg.enable_bias_analysis, "ENABLE_BIAS_ANALYSIS");
        override_numeric_env!(cfg.bias_job_batch_size, "BIAS_JOB_BATCH_SIZE", usize);
        override_numeric_env!(cfg.bias_analysis_timeout, "BIAS_ANALYSIS_TIMEOUT", u64);
        override_bool_env!(cfg.enable_age_shift_analysis, "ENABLE_AGE_SHIFT_ANALYSIS");
        override_bool_env!(
            cfg.enable_gender_conformity_analysis,
            "ENABLE_GENDER_CONFORMITY_ANALYSIS"
        );
        override_bool_env!(cfg.enable_ethnicity_analysis, "ENABLE_ETHNICITY_ANALYSIS");
        override_bool_env!(
            cfg.enable_occupational_stereotype_analysis,
            "ENABLE_OCCUPATIONAL_STEREOTYPE_ANALYSIS"
        );
        override_bool_env!(
            cfg.enable_ambivalent_stereotype_analysis,
            "ENABLE_AMBIVALENT_STEREOTYPE_ANALYSIS"
        );
        override_bool_env!(
            cfg.enable_multiple_stereotyping_analysis,
            "ENABLE_MULTIPLE_STEREOTYPING_ANALYSIS"
        );
        override_numeric_env!(cfg.max_concurrent_bias_jobs, "MAX_CONCURRENT_BIAS_JOBS", usize);
        override_numeric_env!(
            cfg.queue_processing_interval,
            "QUEUE_PROCESSING_INTERVAL",
            u64
        );
        override_numeric_env!(cfg.data_retention_days, "DATA_RETENTION_DAYS", u32);
        override_bool_env!(cfg.enable_pseudonymization, "ENABLE_PSEUDONYMIZATION");

        Ok(())
    }

    /// Validate invariants, returning every violation found (not just the first).
    pub fn validate(&self) -> PaldResult<()> {
        let mut errors = Vec::new();

        if !self.mandatory_pald_extraction {
            errors.push("mandatory_pald_extraction must be true".to_string());
        }
        if self.bias_job_batch_size == 0 {
            errors.push("bias_job_batch_size must be positive".to_string());
        }
        if self.bias_analysis_timeout == 0 {
            errors.push("bias_analysis_timeout must be positive".to_string());
        }
        if self.max_concurrent_bias_jobs == 0 {
            errors.push("max_concurrent_bias_jobs must be positive".to_string());
        }
        if self.queue_processing_interval == 0 {
            errors.push("queue_processing_interval must be positive".to_string());
        }
        if self.data_retention_days == 0 {
            errors.push("data_retention_days must be positive".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(PaldError::ConfigurationInvalid {
                reason: errors.join("; "),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(PaldConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_batch_size_rejected() {
        let mut cfg = PaldConfig::default();
        cfg.bias_job_batch_size = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn mandatory_extraction_false_rejected() {
        let mut cfg = PaldConfig::default();
        cfg.mandatory_pald_extraction = false;
        assert!(cfg.validate().is_err());
    }
}
