use serde_json::Value;

/// Looks up a dot-separated path within a JSON document.
///
/// Each segment selects an object key; when the current value is an array,
/// the segment is read as a zero-based index instead (so
/// `Body.Result.utilitiesDevices.0.meterLoadCurves` walks into the first
/// device). Returns `None` as soon as any segment fails to resolve.
pub fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    let mut current = value;
    for segment in path.split('.') {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}
