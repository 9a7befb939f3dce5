use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::LoadError;
use crate::openapi::info::SpecFlavor;
use crate::openapi::refs::deref;
use crate::types::{Endpoint, Parameter, ParameterLocation, Response};

pub(crate) fn method_keys() -> &'static [&'static str] {
    &[
        "get", "put", "post", "delete", "options", "head", "patch", "trace",
    ]
}

/// Walks `paths` and builds one endpoint per (path, method) pair.
///
/// Iteration follows the JSON object's key order (sorted), then `method_keys()` order,
/// so the same document always yields the same catalog order.
pub(crate) fn collect_endpoints(doc: &Value, flavor: SpecFlavor) -> Result<Vec<Endpoint>, LoadError> {
    let paths = doc
        .get("paths")
        .ok_or_else(|| LoadError::malformed("paths", "document has no paths object"))?
        .as_object()
        .ok_or_else(|| LoadError::malformed("paths", "must be an object"))?;

    let mut out = Vec::new();
    for (path, item) in paths {
        let ctx = format!("paths.{path}");
        let item = deref(doc, item).map_err(|source| LoadError::Ref {
            context: ctx.clone(),
            source,
        })?;
        let Some(item) = item.as_object() else {
            return Err(LoadError::malformed(ctx, "path item must be an object"));
        };

        let shared = match item.get("parameters") {
            Some(p) => extract_parameters(doc, &format!("{ctx}.parameters"), p)?,
            None => Vec::new(),
        };

        for method in method_keys() {
            let Some(op) = item.get(*method) else {
                continue;
            };
            let op_ctx = format!("{ctx}.{method}");
            if !op.is_object() {
                return Err(LoadError::malformed(op_ctx, "operation must be an object"));
            }
            out.push(build_endpoint(doc, flavor, path, method, op, &shared, &op_ctx)?);
        }
    }
    Ok(out)
}

fn build_endpoint(
    doc: &Value,
    flavor: SpecFlavor,
    path: &str,
    method: &str,
    op: &Value,
    shared: &[Parameter],
    ctx: &str,
) -> Result<Endpoint, LoadError> {
    let method = method.to_uppercase();
    let id = op
        .get("operationId")
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .unwrap_or_else(|| format!("{method} {path}"));

    let own = match op.get("parameters") {
        Some(p) => extract_parameters(doc, &format!("{ctx}.parameters"), p)?,
        None => Vec::new(),
    };
    let mut parameters = merge_parameters(shared, own);

    if flavor == SpecFlavor::Openapi {
        if let Some(rb) = op.get("requestBody") {
            parameters.push(request_body_parameter(doc, &format!("{ctx}.requestBody"), rb)?);
        }
    }

    Ok(Endpoint {
        id,
        path: path.to_string(),
        method,
        summary: op.get("summary").and_then(|v| v.as_str()).map(String::from),
        parameters,
        responses: extract_responses(doc, flavor, ctx, op)?,
    })
}

fn extract_parameters(doc: &Value, ctx: &str, parameters: &Value) -> Result<Vec<Parameter>, LoadError> {
    let arr = parameters
        .as_array()
        .ok_or_else(|| LoadError::malformed(ctx, "must be an array"))?;

    let mut out = Vec::with_capacity(arr.len());
    for (idx, p) in arr.iter().enumerate() {
        let pctx = format!("{ctx}[{idx}]");
        let p = deref(doc, p).map_err(|source| LoadError::Ref {
            context: pctx.clone(),
            source,
        })?;
        let name = p
            .get("name")
            .and_then(|v| v.as_str())
            .ok_or_else(|| LoadError::malformed(&pctx, "parameter has no name"))?;
        let raw_loc = p
            .get("in")
            .and_then(|v| v.as_str())
            .ok_or_else(|| LoadError::malformed(&pctx, "parameter has no `in`"))?;
        let location = ParameterLocation::from_openapi(raw_loc)
            .ok_or_else(|| LoadError::malformed(&pctx, format!("unknown parameter location '{raw_loc}'")))?;

        let mut required = p.get("required").and_then(|v| v.as_bool()).unwrap_or(false);
        if location == ParameterLocation::Path {
            required = true;
        }

        out.push(Parameter {
            name: name.to_string(),
            location,
            required,
            schema: parameter_schema(p),
        });
    }
    Ok(out)
}

// OpenAPI 3 and Swagger `in: body` carry `schema`; other Swagger 2 parameters inline their type.
fn parameter_schema(p: &Value) -> Value {
    if let Some(s) = p.get("schema") {
        return s.clone();
    }
    let mut inline = serde_json::Map::new();
    for key in ["type", "format", "items", "enum", "default", "collectionFormat"] {
        if let Some(v) = p.get(key) {
            inline.insert(key.to_string(), v.clone());
        }
    }
    if inline.is_empty() {
        Value::Null
    } else {
        Value::Object(inline)
    }
}

/// Operation-level parameters override path-level ones with the same (location, name).
fn merge_parameters(shared: &[Parameter], own: Vec<Parameter>) -> Vec<Parameter> {
    let mut merged = shared.to_vec();
    for p in own {
        match merged
            .iter_mut()
            .find(|m| m.location == p.location && m.name == p.name)
        {
            Some(existing) => *existing = p,
            None => merged.push(p),
        }
    }
    merged
}

fn request_body_parameter(doc: &Value, ctx: &str, rb: &Value) -> Result<Parameter, LoadError> {
    let rb = deref(doc, rb).map_err(|source| LoadError::Ref {
        context: ctx.to_string(),
        source,
    })?;
    Ok(Parameter {
        name: "body".to_string(),
        location: ParameterLocation::Body,
        required: rb.get("required").and_then(|v| v.as_bool()).unwrap_or(false),
        schema: rb.get("content").and_then(media_schema).unwrap_or(Value::Null),
    })
}

fn media_schema(content: &Value) -> Option<Value> {
    let content = content.as_object()?;
    let media = content
        .get("application/json")
        .or_else(|| content.values().next())?;
    media.get("schema").cloned()
}

fn extract_responses(
    doc: &Value,
    flavor: SpecFlavor,
    ctx: &str,
    op: &Value,
) -> Result<BTreeMap<String, Response>, LoadError> {
    let mut out = BTreeMap::new();
    let Some(responses) = op.get("responses") else {
        return Ok(out);
    };
    let responses = responses
        .as_object()
        .ok_or_else(|| LoadError::malformed(format!("{ctx}.responses"), "must be an object"))?;

    for (code, r) in responses {
        let rctx = format!("{ctx}.responses.{code}");
        let r = deref(doc, r).map_err(|source| LoadError::Ref {
            context: rctx,
            source,
        })?;
        let schema = match flavor {
            SpecFlavor::Swagger => r.get("schema").cloned(),
            SpecFlavor::Openapi => r.get("content").and_then(media_schema),
        };
        out.insert(
            code.clone(),
            Response {
                description: r.get("description").and_then(|v| v.as_str()).map(String::from),
                schema,
            },
        );
    }
    Ok(out)
}
