//! Dotted-path access into free-form property trees.

use serde_json::Value;

/// Looks up `path` ("export.settings.default") in a nested object tree.
///
/// Returns `None` when any segment is missing or the tree runs into a
/// non-object before the path is exhausted. An empty path returns the value
/// itself.
pub fn value_at_path<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    if path.is_empty() {
        return Some(value);
    }
    let mut current = value;
    for segment in path.split('.') {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}
