//! The settings merge algorithm.
//!
//! Later sources overwrite earlier scalars and merge into earlier objects.
//! Arrays combine **by index position**: each overlay element merges into
//! the element at the same index, and surplus base elements survive. This is
//! deliberately not concatenation and not wholesale replacement - per-macro
//! overlays routinely adjust "the second column" of a list default without
//! restating the rest.

use serde_json::Value;

/// Merges `overlay` into `target` in place.
pub fn merge_into(target: &mut Value, overlay: &Value) {
    match (target, overlay) {
        (Value::Object(target), Value::Object(overlay)) => {
            for (key, value) in overlay {
                match target.get_mut(key) {
                    Some(existing) => merge_into(existing, value),
                    None => {
                        target.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (Value::Array(target), Value::Array(overlay)) => {
            for (index, value) in overlay.iter().enumerate() {
                match target.get_mut(index) {
                    Some(existing) => merge_into(existing, value),
                    None => target.push(value.clone()),
                }
            }
        }
        (target, overlay) => {
            *target = overlay.clone();
        }
    }
}

/// Deep-merges an ordered list of partial settings, least specific first.
pub fn deep_merge<'a>(layers: impl IntoIterator<Item = &'a Value>) -> Value {
    let mut merged = Value::Object(serde_json::Map::new());
    for layer in layers {
        merge_into(&mut merged, layer);
    }
    merged
}
