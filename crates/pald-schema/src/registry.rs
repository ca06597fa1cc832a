//! The Schema Registry (C1): read-mostly cache with serialized reload, grounded
//! on `PALDSchemaLoader` (`original_source/config/pald_enhancement.py`) for the
//! reload-on-mtime-or-TTL policy and on `xchecker-utils::cache::InsightCache` for
//! the shared-state shape (an `RwLock`-guarded cache struct with an explicit
//! "has the source changed" check).

use crate::default_schema::default_schema;
use crate::model::Schema;
use crate::parse::parse_schema;
use serde_json::Value as Json;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use std::time::{Instant, SystemTime};
use tracing::warn;

struct CacheState {
    schema: Schema,
    content_hash: String,
    loaded_at: Instant,
    source_mtime: Option<SystemTime>,
}

/// Process-wide, thread-safe schema cache. Reads never block on each other;
/// reloads take the write lock for the duration of the (re)parse.
pub struct SchemaRegistry {
    path: PathBuf,
    ttl_seconds: RwLock<u64>,
    state: RwLock<Option<CacheState>>,
}

impl SchemaRegistry {
    pub fn new(path: impl Into<PathBuf>, ttl_seconds: u64) -> Self {
        Self {
            path: path.into(),
            ttl_seconds: RwLock::new(ttl_seconds),
            state: RwLock::new(None),
        }
    }

    pub fn set_ttl(&self, seconds: u64) {
        *self.ttl_seconds.write().unwrap() = seconds;
    }

    /// Load the schema, reloading from disk if the cache is stale or absent.
    /// Never fails: any read/parse/validation error falls back to the built-in
    /// default schema and is logged, per "the registry never throws to callers".
    pub fn load(&self) -> Schema {
        if self.should_reload() {
            self.reload();
        }
        self.state
            .read()
            .unwrap()
            .as_ref()
            .map(|s| s.schema.clone())
            .unwrap_or_else(default_schema)
    }

    pub fn current_version(&self) -> String {
        if self.should_reload() {
            self.reload();
        }
        self.state
            .read()
            .unwrap()
            .as_ref()
            .map(|s| s.content_hash.clone())
            .unwrap_or_else(|| content_hash(&default_schema()))
    }

    /// Whether the source file's mtime has advanced past what's cached, without
    /// forcing a reload (a pure observation, per the C1 contract).
    pub fn detect_changes(&self) -> bool {
        let current_mtime = file_mtime(&self.path);
        let cached_mtime = self
            .state
            .read()
            .unwrap()
            .as_ref()
            .and_then(|s| s.source_mtime);
        match (current_mtime, cached_mtime) {
            (Some(current), Some(cached)) => current > cached,
            (Some(_), None) => true,
            _ => false,
        }
    }

    fn should_reload(&self) -> bool {
        let guard = self.state.read().unwrap();
        let Some(cached) = guard.as_ref() else {
            return true;
        };
        let ttl = *self.ttl_seconds.read().unwrap();
        if cached.loaded_at.elapsed().as_secs() >= ttl {
            return true;
        }
        let current_mtime = file_mtime(&self.path);
        matches!((current_mtime, cached.source_mtime), (Some(c), Some(cached_m)) if c > cached_m)
    }

    fn reload(&self) {
        let mut guard = self.state.write().unwrap();

        let schema = match load_from_disk(&self.path) {
            Ok(schema) => schema,
            Err(reason) => {
                warn!(path = %self.path.display(), %reason, "schema load failed, falling back to default schema");
                default_schema()
            }
        };
        let hash = content_hash(&schema);
        let mtime = file_mtime(&self.path);

        *guard = Some(CacheState {
            schema,
            content_hash: hash,
            loaded_at: Instant::now(),
            source_mtime: mtime,
        });
    }
}

fn load_from_disk(path: &Path) -> Result<Schema, String> {
    let text = std::fs::read_to_string(path).map_err(|e| e.to_string())?;
    let raw: Json = serde_json::from_str(&text).map_err(|e| e.to_string())?;
    parse_schema(&raw).map_err(|e| e.to_string())
}

fn file_mtime(path: &Path) -> Option<SystemTime> {
    std::fs::metadata(path).ok()?.modified().ok()
}

fn content_hash(schema: &Schema) -> String {
    let json = serde_json::to_value(schema).unwrap_or(Json::Null);
    let canonical =
        serde_json_canonicalizer::to_string(&json).unwrap_or_else(|_| json.to_string());
    blake3::hash(canonical.as_bytes()).to_hex()[..16].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_falls_back_to_default() {
        let registry = SchemaRegistry::new("/nonexistent/path/schema.json", 300);
        let schema = registry.load();
        assert!(schema.global_design_level.contains_key("type"));
    }

    #[test]
    fn loads_and_reloads_on_mtime_change() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("schema.json");
        std::fs::write(
            &path,
            r#"{"global_design_level": {}, "middle_design_level": {}, "detailed_level": {}}"#,
        )
        .unwrap();

        let registry = SchemaRegistry::new(&path, 300);
        let v1 = registry.current_version();

        std::thread::sleep(std::time::Duration::from_millis(10));
        let mut f = std::fs::OpenOptions::new().append(true).open(&path).unwrap();
        writeln!(f).unwrap();
        std::fs::write(
            &path,
            r#"{"global_design_level": {"x": {"type": "string"}}, "middle_design_level": {}, "detailed_level": {}}"#,
        )
        .unwrap();
        // force a distinguishable mtime on filesystems with coarse resolution
        let future = SystemTime::now() + std::time::Duration::from_secs(5);
        let _ = filetime_touch(&path, future);

        assert!(registry.detect_changes());
        let v2 = registry.current_version();
        assert_ne!(v1, v2);
    }

    fn filetime_touch(path: &Path, time: SystemTime) -> std::io::Result<()> {
        let f = std::fs::OpenOptions::new().write(true).open(path)?;
        f.set_modified(time)
    }
}
