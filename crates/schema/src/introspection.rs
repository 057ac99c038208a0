use crate::error::{Result, SchemaError};
use crate::snapshot::{RootTypes, SchemaSnapshot};
use crate::types::{
    EnumValue, FieldDefinition, InputValue, TypeDefinition, TypeKind, TypeReference,
    INTROSPECTION_PREFIX,
};
use serde::Deserialize;
use serde_json::Value;
use std::time::SystemTime;

/// Wrapper levels accepted around a named type before the reference is rejected.
///
/// The standard introspection `TypeRef` fragment nests 7 levels.
pub const MAX_TYPE_REF_DEPTH: usize = 16;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawType {
    kind: Option<String>,
    name: Option<String>,
    description: Option<String>,
    fields: Option<Vec<RawField>>,
    input_fields: Option<Vec<RawInputValue>>,
    interfaces: Option<Vec<RawNamedRef>>,
    enum_values: Option<Vec<RawEnumValue>>,
    possible_types: Option<Vec<RawNamedRef>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawField {
    name: Option<String>,
    description: Option<String>,
    #[serde(rename = "type")]
    ty: Option<Value>,
    args: Option<Vec<RawInputValue>>,
    is_deprecated: Option<bool>,
    deprecation_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawInputValue {
    name: Option<String>,
    description: Option<String>,
    #[serde(rename = "type")]
    ty: Option<Value>,
    default_value: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawEnumValue {
    name: Option<String>,
    description: Option<String>,
    is_deprecated: Option<bool>,
    deprecation_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawNamedRef {
    name: Option<String>,
}

#[derive(Clone, Copy)]
enum Wrapper {
    NonNull,
    List,
}

/// Parse the `data` of an introspection response into a snapshot.
///
/// Accepts either the `data` object itself (`{"__schema": ...}`) or a full response envelope
/// (`{"data": {"__schema": ...}}`). A payload without `__schema` or without a type list yields
/// an empty snapshot. Individual types that fail to parse are skipped.
pub fn parse_introspection(payload: &Value) -> Result<SchemaSnapshot> {
    let loaded_at = SystemTime::now();

    let mut root = payload
        .as_object()
        .ok_or_else(|| SchemaError::InvalidPayload("expected a JSON object".to_string()))?;
    if !root.contains_key("__schema") {
        if let Some(Value::Object(inner)) = root.get("data") {
            root = inner;
        }
    }

    let Some(schema) = root.get("__schema").and_then(Value::as_object) else {
        log::warn!("__schema not found in introspection result");
        return Ok(SchemaSnapshot::empty(loaded_at));
    };

    let Some(raw_types) = schema.get("types").and_then(Value::as_array) else {
        log::warn!("No types found in schema");
        return Ok(SchemaSnapshot::empty(loaded_at));
    };

    let root_name = |key: &str| {
        schema
            .get(key)
            .and_then(|v| v.get("name"))
            .and_then(Value::as_str)
            .map(str::to_string)
    };
    let roots = RootTypes {
        query: root_name("queryType"),
        mutation: root_name("mutationType"),
        subscription: root_name("subscriptionType"),
    };

    let mut types = Vec::with_capacity(raw_types.len());
    let mut skipped = 0usize;
    for raw in raw_types {
        match parse_type(raw) {
            Ok(Some(ty)) => types.push(ty),
            Ok(None) => {}
            Err(e) => {
                skipped += 1;
                let name = raw.get("name").and_then(Value::as_str).unwrap_or("<unnamed>");
                log::warn!("Skipping type '{name}': {e}");
            }
        }
    }

    if skipped > 0 {
        log::warn!("Skipped {skipped} malformed type definitions");
    }
    log::info!("Parsed {} types from schema", types.len());

    Ok(SchemaSnapshot::new(types, roots, loaded_at))
}

/// `Ok(None)` for meta types and nameless entries
fn parse_type(raw: &Value) -> Result<Option<TypeDefinition>> {
    let raw = RawType::deserialize(raw).map_err(|e| SchemaError::InvalidPayload(e.to_string()))?;

    let Some(name) = raw
        .name
        .filter(|n| !n.is_empty() && !n.starts_with(INTROSPECTION_PREFIX))
    else {
        return Ok(None);
    };

    let kind: TypeKind = raw
        .kind
        .as_deref()
        .ok_or_else(|| SchemaError::InvalidPayload(format!("type '{name}' has no kind")))?
        .parse()?;

    let fields = raw
        .fields
        .unwrap_or_default()
        .into_iter()
        .filter_map(|f| parse_field(f).transpose())
        .collect::<Result<Vec<_>>>()?;

    let input_fields = parse_input_values(raw.input_fields)?;

    let enum_values = raw
        .enum_values
        .unwrap_or_default()
        .into_iter()
        .filter_map(|v| {
            v.name.map(|name| EnumValue {
                name,
                description: v.description,
                is_deprecated: v.is_deprecated.unwrap_or(false),
                deprecation_reason: v.deprecation_reason,
            })
        })
        .collect();

    Ok(Some(TypeDefinition {
        name,
        kind,
        description: raw.description,
        fields,
        input_fields,
        interfaces: named_refs(raw.interfaces),
        enum_values,
        possible_types: named_refs(raw.possible_types),
    }))
}

fn parse_field(raw: RawField) -> Result<Option<FieldDefinition>> {
    let Some(name) = raw.name else {
        return Ok(None);
    };
    let ty = raw
        .ty
        .as_ref()
        .ok_or_else(|| SchemaError::MalformedTypeRef(format!("field '{name}' has no type")))?;

    Ok(Some(FieldDefinition {
        ty: parse_type_ref(ty)?,
        args: parse_input_values(raw.args)?,
        name,
        description: raw.description,
        is_deprecated: raw.is_deprecated.unwrap_or(false),
        deprecation_reason: raw.deprecation_reason,
    }))
}

fn parse_input_values(raw: Option<Vec<RawInputValue>>) -> Result<Vec<InputValue>> {
    let mut values = Vec::new();
    for value in raw.unwrap_or_default() {
        let Some(name) = value.name else {
            continue;
        };
        let ty = value.ty.as_ref().ok_or_else(|| {
            SchemaError::MalformedTypeRef(format!("input value '{name}' has no type"))
        })?;
        values.push(InputValue {
            ty: parse_type_ref(ty)?,
            name,
            description: value.description,
            default_value: value.default_value,
        });
    }
    Ok(values)
}

fn named_refs(raw: Option<Vec<RawNamedRef>>) -> Vec<String> {
    raw.unwrap_or_default()
        .into_iter()
        .filter_map(|r| r.name)
        .collect()
}

/// Walk `ofType` links iteratively so hostile nesting cannot exhaust the stack.
pub(crate) fn parse_type_ref(value: &Value) -> Result<TypeReference> {
    let mut wrappers = Vec::new();
    let mut current = value;

    let named = loop {
        let kind = current
            .get("kind")
            .and_then(Value::as_str)
            .ok_or_else(|| SchemaError::MalformedTypeRef("missing kind".to_string()))?;

        match kind {
            "NON_NULL" | "LIST" => {
                if wrappers.len() >= MAX_TYPE_REF_DEPTH {
                    return Err(SchemaError::TypeRefTooDeep {
                        max: MAX_TYPE_REF_DEPTH,
                    });
                }
                wrappers.push(if kind == "LIST" {
                    Wrapper::List
                } else {
                    Wrapper::NonNull
                });
                current = current
                    .get("ofType")
                    .filter(|v| !v.is_null())
                    .ok_or_else(|| {
                        SchemaError::MalformedTypeRef(format!("{kind} wrapper without ofType"))
                    })?;
            }
            concrete => {
                let name = current.get("name").and_then(Value::as_str).ok_or_else(|| {
                    SchemaError::MalformedTypeRef(format!("{concrete} reference without name"))
                })?;
                break TypeReference::named(concrete.parse()?, name);
            }
        }
    };

    Ok(wrappers
        .into_iter()
        .rev()
        .fold(named, |inner, wrapper| match wrapper {
            Wrapper::NonNull => TypeReference::non_null(inner),
            Wrapper::List => TypeReference::list(inner),
        }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn nested_ref(wrappers: usize) -> Value {
        let mut value = json!({ "kind": "SCALAR", "name": "String", "ofType": null });
        for level in 0..wrappers {
            let kind = if level % 2 == 0 { "LIST" } else { "NON_NULL" };
            value = json!({ "kind": kind, "name": null, "ofType": value });
        }
        value
    }

    #[test]
    fn test_type_ref_seven_levels() {
        let ty = parse_type_ref(&nested_ref(7)).expect("seven levels must parse");
        assert_eq!(ty.depth(), 7);
        assert_eq!(ty.named_type(), "String");
    }

    #[test]
    fn test_type_ref_too_deep_is_an_error() {
        let err = parse_type_ref(&nested_ref(MAX_TYPE_REF_DEPTH + 1)).unwrap_err();
        assert!(matches!(err, SchemaError::TypeRefTooDeep { .. }));
    }

    #[test]
    fn test_wrapper_without_of_type_is_malformed() {
        let err = parse_type_ref(&json!({ "kind": "LIST", "name": null, "ofType": null }))
            .unwrap_err();
        assert!(matches!(err, SchemaError::MalformedTypeRef(_)));
    }

    #[test]
    fn test_non_object_payload_is_rejected() {
        assert!(parse_introspection(&json!([1, 2, 3])).is_err());
    }

    #[test]
    fn test_missing_schema_yields_empty_snapshot() {
        let snapshot = parse_introspection(&json!({ "other": {} })).expect("empty snapshot");
        assert!(snapshot.is_empty());
    }
}
