//! Content hashing and pseudonymisation, ported from
//! `PALDPersistenceManager._hash_text` / `_generate_pseudonym`
//! (`original_source/src/logic/pald_diff_calculation.py`). The original uses
//! truncated SHA-256 hex; this crate uses BLAKE3 (already a teacher dependency)
//! at the same 16-hex-char truncation length, which preserves the "short content
//! hash" contract without re-deriving SHA-256 behaviour the spec never pins down
//! bit-for-bit.

/// A short, deterministic, non-reversible content hash (first 16 hex chars of
/// a BLAKE3 digest).
pub fn content_hash(text: &str) -> String {
    let digest = blake3::hash(text.as_bytes());
    digest.to_hex()[..16].to_string()
}

/// Deterministic non-reversible derivation of a raw user identifier, used as
/// `Artifact.user_pseudonym`. Mirrors the original's `"user_" + hash[:16]` shape.
pub fn pseudonymize_user(user_id: &str) -> String {
    format!("user_{}", content_hash(&format!("pald_user_{user_id}")))
}

/// A fresh random-ish identifier for artifacts/jobs, built the same way the hash
/// helpers are (content-addressed, not time-addressed, so it stays deterministic
/// under test) — callers that need true randomness should salt `seed` themselves
/// (e.g. with a counter or session id) before calling.
pub fn derive_id(prefix: &str, seed: &str) -> String {
    format!("{prefix}_{}", content_hash(seed))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_deterministic_and_truncated() {
        let h1 = content_hash("hello world");
        let h2 = content_hash("hello world");
        assert_eq!(h1, h2);
        assert_eq!(h1.len(), 16);
    }

    #[test]
    fn pseudonym_has_stable_prefix() {
        let p = pseudonymize_user("user-42");
        assert!(p.starts_with("user_"));
        assert_eq!(p, pseudonymize_user("user-42"));
        assert_ne!(p, pseudonymize_user("user-43"));
    }
}
