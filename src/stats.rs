// Optional pre-fetched stats cache. When an entry carries a framebook we
// can skip the per-mob detail fetch entirely.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::Value;
use tracing::info;

use crate::catalog::as_mob_id;

/// Animation name mapped to its frame count, for one mob.
pub type Framebook = BTreeMap<String, u32>;

/// Extract a framebook from a JSON `framebooks` field. Counts may arrive as
/// numbers or numeric strings; entries that do not coerce are dropped.
pub fn framebook_from_value(value: Option<&Value>) -> Framebook {
    let mut book = Framebook::new();
    if let Some(Value::Object(map)) = value {
        for (anim, count) in map {
            if let Some(n) = coerce_count(count) {
                book.insert(anim.clone(), n);
            }
        }
    }
    book
}

fn coerce_count(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Load the stats cache file into a per-mob framebook map. A missing file
/// is not an error, the cache is simply empty; a malformed file is, since
/// it was explicitly supplied.
pub fn load_stats_cache(path: &Path) -> Result<HashMap<u32, Framebook>> {
    if !path.exists() {
        return Ok(HashMap::new());
    }

    let text = fs::read_to_string(path)
        .with_context(|| format!("read stats cache {}", path.display()))?;
    let entries: Vec<Value> = serde_json::from_str(&text)
        .with_context(|| format!("parse stats cache {}", path.display()))?;

    let mut map = HashMap::new();
    for entry in &entries {
        let Some(id) = entry.get("id").and_then(as_mob_id) else {
            continue;
        };
        map.insert(id, framebook_from_value(entry.get("framebooks")));
    }

    info!("stats cache loaded: {} mobs from {}", map.len(), path.display());
    Ok(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_framebook_coercion() {
        let value = json!({"stand": 3, "move": "4", "hit1": null, "die1": 2.5});
        let book = framebook_from_value(Some(&value));
        assert_eq!(book.get("stand"), Some(&3));
        assert_eq!(book.get("move"), Some(&4));
        assert!(!book.contains_key("hit1"));
        assert!(!book.contains_key("die1"));
    }

    #[test]
    fn test_framebook_absent_or_wrong_type() {
        assert!(framebook_from_value(None).is_empty());
        assert!(framebook_from_value(Some(&json!("not a map"))).is_empty());
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let map = load_stats_cache(&dir.path().join("nope.json")).unwrap();
        assert!(map.is_empty());
    }

    #[test]
    fn test_load_cache_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mobs_stats.json");
        fs::write(
            &path,
            r#"[
                {"id": 100100, "framebooks": {"stand": 1, "move": 2}},
                {"id": 100101},
                {"no_id": true}
            ]"#,
        )
        .unwrap();

        let map = load_stats_cache(&path).unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map[&100100].get("move"), Some(&2));
        assert!(map[&100101].is_empty());
    }

    #[test]
    fn test_load_malformed_cache_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mobs_stats.json");
        fs::write(&path, "{not json").unwrap();
        assert!(load_stats_cache(&path).is_err());
    }
}
