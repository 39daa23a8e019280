/// Query fingerprint: stable cache key and correlation id.
///
/// Hashes `{query, normalized context, task}` as canonical JSON, so requests
/// that differ only in call-time metadata share a fingerprint.
use serde_json::json;
use sha2::{Digest, Sha256};
use triton_core::{QueryContext, TaskCategory};

pub fn fingerprint(query: &str, context: &QueryContext, task: &TaskCategory) -> String {
    // serde_json maps are ordered by key, so this serialization is canonical.
    let canonical = json!({
        "query": query.trim(),
        "context": context.normalized(),
        "task": task.as_str(),
    });
    let digest = Sha256::digest(canonical.to_string().as_bytes());
    hex::encode(&digest[..16])
}
