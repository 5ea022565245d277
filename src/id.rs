//! ID generation for tasks.

use chrono::{DateTime, Utc};
use rand::Rng;
use sha2::{Digest, Sha256};

/// Generate a unique top-level task ID from content + entropy.
/// Format: "pt-" + 10 hex chars of SHA256(title + timestamp + random)
pub fn generate_id(title: &str, created_at: DateTime<Utc>) -> String {
    let mut hasher = Sha256::new();
    hasher.update(title.as_bytes());
    hasher.update(created_at.timestamp_nanos_opt().unwrap_or(0).to_le_bytes());
    // Add 8 bytes of randomness to prevent collisions
    hasher.update(rand::rng().random::<[u8; 8]>());
    let hash = hasher.finalize();
    // 10 hex chars = 40 bits = ~1 trillion values
    format!(
        "pt-{:010x}",
        u64::from_be_bytes([hash[0], hash[1], hash[2], hash[3], hash[4], 0, 0, 0]) >> 24
    )
}

/// Derive a hierarchical subtask ID from the parent's id and its existing
/// children's ids. The suffix is one past the highest suffix already in use,
/// so ids stay unique even after siblings are deleted.
pub fn child_id<'a>(parent_id: &str, sibling_ids: impl Iterator<Item = &'a str>) -> String {
    let prefix = format!("{}.", parent_id);
    let max_suffix = sibling_ids
        .filter_map(|id| id.strip_prefix(&prefix))
        .filter_map(|suffix| suffix.parse::<u64>().ok())
        .max()
        .unwrap_or(0);
    format!("{}{}", prefix, max_suffix + 1)
}
