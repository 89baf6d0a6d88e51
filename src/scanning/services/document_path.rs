use serde_json::Value;

/// One step of a path expression over a schema-less JSON document:
/// either descend into a named field or fan out over array elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathStep {
    Field(&'static str),
    Each,
}

/// Walks `doc` along `path` and collects every value the path reaches.
///
/// A missing field, a non-object where a field access was expected, or
/// a non-array where a descent was expected all simply yield no
/// matches. Malformed documents contribute zero rows, never an error.
pub fn extract<'a>(doc: &'a Value, path: &[PathStep]) -> Vec<&'a Value> {
    let mut current = vec![doc];
    for step in path {
        let mut next = Vec::new();
        match step {
            PathStep::Field(name) => {
                for value in current {
                    if let Some(child) = value.get(name) {
                        next.push(child);
                    }
                }
            }
            PathStep::Each => {
                for value in current {
                    if let Some(items) = value.as_array() {
                        next.extend(items.iter());
                    }
                }
            }
        }
        current = next;
        if current.is_empty() {
            break;
        }
    }
    current
}

/// Reads a string field off a JSON object, treating any non-string
/// value (including null) as absent.
pub fn string_field(value: &Value, name: &str) -> Option<String> {
    value.get(name).and_then(Value::as_str).map(str::to_string)
}
