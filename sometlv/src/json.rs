//! Parsing of JSON payload descriptions into node trees.
//!
//! A description is a single JSON object with a mandatory `type` field. Scalar and composite
//! elements additionally require `dataID` (which may be `null` to omit the tag) and `value`;
//! pre-serialized elements require only `value`, a hex string. The optional `wiretype`,
//! `length`, `lengthfield_len` and `name` fields map onto [`Meta`], and strings accept the
//! `terminate`, `bom` and `padding` flags.
//!
//! Struct values are objects whose members are parsed in declaration order, each member key
//! doubling as the default element name. Array values either hold full element descriptions
//! (objects), or plain values together with an `elementtype` field naming their common type.

use serde_json::{Map, Value};

use crate::node::{
    ArrayNode, Meta, Node, PreserializedNode, Scalar, ScalarNode, StringFlags, StringNode,
    StructNode,
};
use crate::types::TlvType;
use crate::{Error, Result};


/// Name given to the topmost element when the caller does not provide one.
pub const DEFAULT_ROOT_NAME: &str = "Message Payload";

/// Parses a JSON description string into a node tree.
///
/// The topmost element is named [`DEFAULT_ROOT_NAME`] unless the description itself carries a
/// `name` field.
///
/// # Errors
///
/// Returns [`Error::InvalidDescription`] if the string is not valid JSON, and the parse
/// errors documented on [`from_value_named`] otherwise.
pub fn from_str(description: &str) -> Result<Node> {
    from_str_named(description, DEFAULT_ROOT_NAME)
}

/// Parses a JSON description string into a node tree, naming the topmost element `name`.
///
/// # Errors
///
/// See [`from_str`].
pub fn from_str_named(description: &str, name: &str) -> Result<Node> {
    let value = serde_json::from_str(description)
        .map_err(|err| Error::InvalidDescription(format!("parsing error: {err}")))?;
    from_value_named(&value, name)
}

/// Parses an in-memory JSON description into a node tree.
///
/// # Errors
///
/// See [`from_value_named`].
pub fn from_value(description: &Value) -> Result<Node> {
    from_value_named(description, DEFAULT_ROOT_NAME)
}

/// Parses an in-memory JSON description into a node tree, naming the topmost element `name`.
///
/// # Errors
///
/// Returns [`Error::InvalidDescription`] for descriptions that are not objects of the
/// documented shape, [`Error::MissingField`] when a mandatory field is absent, and the node
/// constructor errors for values that fail validation.
pub fn from_value_named(description: &Value, name: &str) -> Result<Node> {
    parse_element(Some(name), description)
}

fn parse_element(key: Option<&str>, element: &Value) -> Result<Node> {
    let object = as_object(key, element)?;
    let type_name = object
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::MissingField {
            element: element_label(key),
            field: "type",
        })?
        .to_lowercase();
    let tlv_type = TlvType::from_name(&type_name)?;
    tracing::debug!(element = %element_label(key), %tlv_type, "parsing element");
    parse_typed(key, object, tlv_type)
}

fn parse_typed(key: Option<&str>, object: &Map<String, Value>, tlv_type: TlvType) -> Result<Node> {
    match tlv_type {
        TlvType::Array => parse_array(key, object),
        TlvType::String => parse_string(key, object),
        TlvType::Struct => parse_struct(key, object),
        TlvType::Preserialized => parse_preserialized(key, object),
        scalar_kind if scalar_kind.is_scalar() => parse_scalar(key, object, scalar_kind),
        other => Err(Error::UnknownType(other.name().to_lowercase())),
    }
}

fn parse_scalar(key: Option<&str>, object: &Map<String, Value>, kind: TlvType) -> Result<Node> {
    let meta = parse_meta(key, object)?;
    let value = require_field(key, object, "value")?;
    let scalar = scalar_from_value(key, kind, value)?;
    Ok(ScalarNode::new(scalar, meta)?.into())
}

fn parse_string(key: Option<&str>, object: &Map<String, Value>) -> Result<Node> {
    let meta = parse_meta(key, object)?;
    let text = require_field(key, object, "value")?
        .as_str()
        .ok_or_else(|| {
            Error::InvalidDescription(format!(
                "element \"{}\" of type \"string\" must have a text value",
                element_label(key)
            ))
        })?;
    let flags = StringFlags {
        terminate: parse_flag(key, object, "terminate")?.unwrap_or(true),
        bom: parse_flag(key, object, "bom")?.unwrap_or(true),
        padding: parse_flag(key, object, "padding")?.unwrap_or(false),
    };
    Ok(StringNode::new(text, flags, meta)?.into())
}

fn parse_struct(key: Option<&str>, object: &Map<String, Value>) -> Result<Node> {
    let meta = parse_meta(key, object)?;
    let members = require_field(key, object, "value")?
        .as_object()
        .ok_or_else(|| {
            Error::InvalidDescription(format!(
                "element \"{}\" of type \"struct\" must have an object value",
                element_label(key)
            ))
        })?;
    let mut items = Vec::with_capacity(members.len());
    for (member_key, member) in members {
        items.push(parse_element(Some(member_key), member)?);
    }
    Ok(StructNode::new(items, meta)?.into())
}

fn parse_array(key: Option<&str>, object: &Map<String, Value>) -> Result<Node> {
    let meta = parse_meta(key, object)?;
    let entries = require_field(key, object, "value")?
        .as_array()
        .ok_or_else(|| {
            Error::InvalidDescription(format!(
                "element \"{}\" of type \"array\" must have an array value",
                element_label(key)
            ))
        })?;
    if entries.iter().any(Value::is_object) {
        return parse_array_of_elements(key, entries, meta);
    }
    let element_type_name = object
        .get("elementtype")
        .and_then(Value::as_str)
        .ok_or_else(|| Error::MissingField {
            element: element_label(key),
            field: "elementtype",
        })?
        .to_lowercase();
    let element_type = TlvType::from_name(&element_type_name)?;
    parse_array_of_values(key, entries, element_type, meta)
}

/// Parses an array whose entries are full element descriptions.
///
/// Mixing descriptions with plain values is rejected; plain-value arrays go through the
/// `elementtype` path instead.
fn parse_array_of_elements(key: Option<&str>, entries: &[Value], meta: Meta) -> Result<Node> {
    let mut items = Vec::with_capacity(entries.len());
    for entry in entries {
        if !entry.is_object() {
            return Err(Error::InvalidDescription(format!(
                "array \"{}\" mixes element descriptions with plain values",
                element_label(key)
            )));
        }
        items.push(parse_element(None, entry)?);
    }
    Ok(ArrayNode::new(items, None, meta)?.into())
}

/// Parses an array of plain values sharing one declared element type.
///
/// Scalar entries become untagged leaf nodes; pre-serialized entries are hex strings spliced
/// in verbatim. Composite element types need full descriptions and are rejected here.
fn parse_array_of_values(
    key: Option<&str>,
    entries: &[Value],
    element_type: TlvType,
    meta: Meta,
) -> Result<Node> {
    let mut items: Vec<Node> = Vec::with_capacity(entries.len());
    for entry in entries {
        if element_type.is_scalar() {
            let scalar = scalar_from_value(key, element_type, entry)?;
            items.push(ScalarNode::new(scalar, Meta::default())?.into());
        } else if element_type.is_preserialized() {
            let data = entry.as_str().ok_or_else(|| {
                Error::InvalidDescription(format!(
                    "array \"{}\" of pre-serialized data must hold hex strings",
                    element_label(key)
                ))
            })?;
            items.push(PreserializedNode::from_hex(data, None)?.into());
        } else {
            return Err(Error::UnsupportedElementType(element_type));
        }
    }
    Ok(ArrayNode::new(items, Some(element_type), meta)?.into())
}

fn parse_preserialized(key: Option<&str>, object: &Map<String, Value>) -> Result<Node> {
    let data = require_field(key, object, "value")?
        .as_str()
        .ok_or_else(|| {
            Error::InvalidDescription(format!(
                "element \"{}\" of type \"serialized\" must have a hex string value",
                element_label(key)
            ))
        })?;
    let name = object
        .get("name")
        .and_then(Value::as_str)
        .map(str::to_owned)
        .or_else(|| key.map(str::to_owned));
    Ok(PreserializedNode::from_hex(data, name)?.into())
}

/// Extracts the [`Meta`] attributes common to scalar and composite elements.
///
/// `dataID` is mandatory but may be JSON `null` to omit the tag; the remaining attributes
/// are optional. The element name falls back to the member key.
fn parse_meta(key: Option<&str>, object: &Map<String, Value>) -> Result<Meta> {
    Ok(Meta {
        data_id: parse_data_id(key, object)?,
        wiretype: parse_wiretype(key, object)?,
        name: object
            .get("name")
            .and_then(Value::as_str)
            .map(str::to_owned)
            .or_else(|| key.map(str::to_owned)),
        length: parse_width(key, object, "length")?,
        lengthfield_len: parse_width(key, object, "lengthfield_len")?,
    })
}

fn parse_data_id(key: Option<&str>, object: &Map<String, Value>) -> Result<Option<u16>> {
    match require_field(key, object, "dataID")? {
        Value::Null => Ok(None),
        field => {
            let raw = field.as_i64().ok_or_else(|| {
                Error::InvalidDescription(format!(
                    "element \"{}\" has a non-integer dataID: {field}",
                    element_label(key)
                ))
            })?;
            u16::try_from(raw)
                .map(Some)
                .map_err(|_| Error::InvalidDataId(raw))
        }
    }
}

fn parse_wiretype(key: Option<&str>, object: &Map<String, Value>) -> Result<Option<u8>> {
    match object.get("wiretype") {
        None | Some(Value::Null) => Ok(None),
        Some(field) => {
            let raw = field.as_i64().ok_or_else(|| {
                Error::InvalidDescription(format!(
                    "element \"{}\" has a non-integer wiretype: {field}",
                    element_label(key)
                ))
            })?;
            u8::try_from(raw)
                .map(Some)
                .map_err(|_| Error::InvalidWiretype(raw))
        }
    }
}

fn parse_width(
    key: Option<&str>,
    object: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<usize>> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_u64()
            .and_then(|raw| usize::try_from(raw).ok())
            .map(Some)
            .ok_or_else(|| {
                Error::InvalidDescription(format!(
                    "element \"{}\" has a non-integer {field}: {value}",
                    element_label(key)
                ))
            }),
    }
}

fn parse_flag(
    key: Option<&str>,
    object: &Map<String, Value>,
    field: &'static str,
) -> Result<Option<bool>> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value.as_bool().map(Some).ok_or_else(|| {
            Error::InvalidDescription(format!(
                "element \"{}\" has a non-boolean {field}: {value}",
                element_label(key)
            ))
        }),
    }
}

fn scalar_from_value(key: Option<&str>, kind: TlvType, value: &Value) -> Result<Scalar> {
    match value {
        Value::Bool(flag) => Scalar::from_bool(kind, *flag),
        Value::Number(number) => {
            if let Some(integer) = number.as_i64() {
                Scalar::from_integer(kind, i128::from(integer))
            } else if let Some(integer) = number.as_u64() {
                Scalar::from_integer(kind, i128::from(integer))
            } else if let Some(float) = number.as_f64() {
                Scalar::from_f64(kind, float)
            } else {
                Err(Error::InvalidDescription(format!(
                    "element \"{}\" has an unrepresentable value: {number}",
                    element_label(key)
                )))
            }
        }
        other => Err(Error::InvalidDescription(format!(
            "element \"{}\" of type \"{kind}\" has a non-numeric value: {other}",
            element_label(key)
        ))),
    }
}

fn require_field<'a>(
    key: Option<&str>,
    object: &'a Map<String, Value>,
    field: &'static str,
) -> Result<&'a Value> {
    object.get(field).ok_or_else(|| Error::MissingField {
        element: element_label(key),
        field,
    })
}

fn as_object<'a>(key: Option<&str>, element: &'a Value) -> Result<&'a Map<String, Value>> {
    element.as_object().ok_or_else(|| {
        Error::InvalidDescription(format!(
            "element \"{}\" must be an object",
            element_label(key)
        ))
    })
}

fn element_label(key: Option<&str>) -> String {
    key.unwrap_or("<anonymous>").to_owned()
}
