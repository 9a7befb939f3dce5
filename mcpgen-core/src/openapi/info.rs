use crate::error::LoadError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SpecFlavor {
    Swagger,
    Openapi,
}

/// Document-level facts about a loaded API description.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct SpecInfo {
    pub flavor: SpecFlavor,
    /// Value of the `swagger` / `openapi` field.
    pub spec_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    pub path_count: usize,
    pub schema_count: usize,
}

pub(crate) fn detect_flavor(doc: &serde_json::Value) -> Result<(SpecFlavor, String), LoadError> {
    if let Some(v) = version_field(doc, "swagger") {
        if v.starts_with("2.") || v == "2" {
            return Ok((SpecFlavor::Swagger, v));
        }
        return Err(LoadError::UnsupportedSpec(format!("swagger {v}")));
    }
    if let Some(v) = version_field(doc, "openapi") {
        if v.starts_with("3.") {
            return Ok((SpecFlavor::Openapi, v));
        }
        return Err(LoadError::UnsupportedSpec(format!("openapi {v}")));
    }
    Err(LoadError::UnsupportedSpec(
        "document declares neither `swagger` nor `openapi`".to_string(),
    ))
}

// YAML authors often write `swagger: 2.0` unquoted, which arrives as a number.
fn version_field(doc: &serde_json::Value, key: &str) -> Option<String> {
    match doc.get(key)? {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

pub(crate) fn spec_info(doc: &serde_json::Value, flavor: SpecFlavor, spec_version: String) -> SpecInfo {
    let info = doc.get("info");
    let text = |key: &str| {
        info.and_then(|i| i.get(key))
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
    };
    let schemas = match flavor {
        SpecFlavor::Swagger => doc.get("definitions"),
        SpecFlavor::Openapi => doc.get("components").and_then(|c| c.get("schemas")),
    };

    SpecInfo {
        flavor,
        spec_version,
        title: text("title"),
        api_version: text("version"),
        path_count: doc
            .get("paths")
            .and_then(|p| p.as_object())
            .map_or(0, |p| p.len()),
        schema_count: schemas.and_then(|s| s.as_object()).map_or(0, |s| s.len()),
    }
}
