// Mob list shape normalizer. The listing endpoint has shipped several
// shapes over time; reduce any recognized one to a flat ordered id list.

use anyhow::{bail, Result};
use serde_json::Value;

/// Wrapper keys tried, in priority order, when the listing is an object.
const WRAPPER_KEYS: [&str; 4] = ["data", "results", "items", "mobs"];

/// Coerce one JSON value into a mob id. Numeric strings are accepted
/// alongside plain integers.
pub(crate) fn as_mob_id(value: &Value) -> Option<u32> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Normalize a mob listing of unknown shape into an ordered id sequence.
///
/// Rules, first match wins:
/// - a list of integers is used directly;
/// - a list of objects yields each object's `id` field, objects without an
///   `id` are dropped;
/// - an object containing one of `data`, `results`, `items`, `mobs` is
///   normalized recursively through that key;
/// - anything else is an error. An empty list yields zero ids.
pub fn normalize_mob_list(data: &Value) -> Result<Vec<u32>> {
    match data {
        Value::Array(entries) => {
            let Some(first) = entries.first() else {
                return Ok(Vec::new());
            };
            if first.is_number() {
                let mut ids = Vec::with_capacity(entries.len());
                for entry in entries {
                    let Some(id) = as_mob_id(entry) else {
                        bail!("non-integer entry in mob id list: {}", entry);
                    };
                    ids.push(id);
                }
                return Ok(ids);
            }
            if first.is_object() {
                let mut ids = Vec::with_capacity(entries.len());
                for entry in entries {
                    let Some(id_value) = entry.get("id") else {
                        continue;
                    };
                    let Some(id) = as_mob_id(id_value) else {
                        bail!("mob record has non-integer id: {}", id_value);
                    };
                    ids.push(id);
                }
                return Ok(ids);
            }
            bail!("unrecognized mob list schema: list of {}", kind(first));
        }
        Value::Object(map) => {
            for key in WRAPPER_KEYS {
                if let Some(inner) = map.get(key) {
                    return normalize_mob_list(inner);
                }
            }
            bail!("unrecognized mob list schema: object without a known list key");
        }
        other => bail!("unrecognized mob list schema: {}", kind(other)),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
