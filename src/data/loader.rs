use std::path::Path;

use serde_json::{Map, Value as JsonValue};

use super::model::Index;
use crate::error::LoadError;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a clustering index from a JSON file.
///
/// Expected schema (the format written by the IVF-flat index builder):
///
/// ```json
/// {
///   "centroids": [[0.12, -0.40, ...], ...],
///   "clusters":  [[17, 204, 9], [3], ...]
/// }
/// ```
///
/// Only the presence and array shape of the two fields is checked. Whether
/// both lists have the same length is left to the caller.
pub fn load_index(path: &Path) -> Result<Index, LoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let index = load_index_from_str(&text)?;

    log::info!(
        "Loaded index {} with {} centroids and {} clusters",
        path.display(),
        index.centroids.len(),
        index.clusters.len()
    );
    Ok(index)
}

/// Parse an index from an in-memory JSON document.
pub fn load_index_from_str(text: &str) -> Result<Index, LoadError> {
    let root: JsonValue = serde_json::from_str(text)?;
    let obj = root.as_object().ok_or(LoadError::NotAnObject)?;

    let centroids = required_array(obj, "centroids")?.clone();

    let clusters = required_array(obj, "clusters")?
        .iter()
        .enumerate()
        .map(|(i, cluster)| {
            cluster
                .as_array()
                .cloned()
                .ok_or_else(|| LoadError::InvalidField {
                    field: "clusters",
                    reason: format!("entry {i} is not an array"),
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Index {
        centroids,
        clusters,
    })
}

// -- helpers --

fn required_array<'a>(
    obj: &'a Map<String, JsonValue>,
    field: &'static str,
) -> Result<&'a Vec<JsonValue>, LoadError> {
    let value = obj.get(field).ok_or(LoadError::MissingField(field))?;
    value.as_array().ok_or_else(|| LoadError::InvalidField {
        field,
        reason: format!("expected an array, got {}", json_type_name(value)),
    })
}

fn json_type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}
