use std::collections::HashSet;

use crate::error::RefError;

/// Follows a chain of local `$ref`s starting at `value` until a non-reference object is reached.
pub(crate) fn deref<'a>(
    doc: &'a serde_json::Value,
    value: &'a serde_json::Value,
) -> Result<&'a serde_json::Value, RefError> {
    let mut visited = HashSet::new();
    let mut current = value;
    while let Some(r) = current.get("$ref").and_then(|v| v.as_str()) {
        current = resolve_ref(doc, r, &mut visited)?;
    }
    Ok(current)
}

pub(crate) fn resolve_ref<'a>(
    doc: &'a serde_json::Value,
    ref_str: &str,
    visited: &mut HashSet<String>,
) -> Result<&'a serde_json::Value, RefError> {
    // Only local refs: "#/..."
    if !ref_str.starts_with('#') {
        return Err(RefError::ExternalRef(ref_str.to_string()));
    }

    let pointer = ref_str.trim_start_matches('#');
    if !visited.insert(ref_str.to_string()) {
        return Err(RefError::Cycle(ref_str.to_string()));
    }

    doc.pointer(pointer)
        .ok_or_else(|| RefError::NotFound(ref_str.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn follows_chained_refs() {
        let doc = json!({
            "components": {
                "parameters": {
                    "a": { "$ref": "#/components/parameters/b" },
                    "b": { "name": "id", "in": "path" }
                }
            }
        });
        let start = json!({ "$ref": "#/components/parameters/a" });
        let v = deref(&doc, &start).unwrap();
        assert_eq!(v["name"], "id");
    }

    #[test]
    fn detects_cycles() {
        let doc = json!({ "x": { "$ref": "#/y" }, "y": { "$ref": "#/x" } });
        let start = json!({ "$ref": "#/x" });
        assert!(matches!(deref(&doc, &start), Err(RefError::Cycle(_))));
    }

    #[test]
    fn rejects_external_refs() {
        let doc = json!({});
        let start = json!({ "$ref": "other.yaml#/x" });
        assert!(matches!(deref(&doc, &start), Err(RefError::ExternalRef(_))));
    }
}
