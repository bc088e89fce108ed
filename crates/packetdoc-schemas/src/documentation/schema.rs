//! Typed view of packet JSON Schemas and their wire-level extensions
//!
//! Copyright (c) 2025 Packetdoc Team
//! Licensed under the Apache-2.0 license

use crate::loader::enums::enum_value_text;
use crate::loader::parser::json_kind;
use serde_json::{Map, Value};
use std::collections::{HashMap, HashSet};
use std::fmt;
use thiserror::Error;

/// Ordinal of fields without `x-ordinal-index`; sorts after every explicit ordinal
pub const UNORDERED_ORDINAL: i64 = 9999;

/// Discriminant type of a union when `x-control-value-type` is absent
pub const DEFAULT_CONTROL_VALUE_TYPE: &str = "varuint32";

/// Title suffix of definitions that are never expanded in place
pub const PAYLOAD_SUFFIX: &str = "Payload";

/// Packet id used when a document does not declare one
pub const UNKNOWN_PACKET_ID: i64 = -1;

/// Object holding packet metadata
pub const METADATA_KEY: &str = "$metaProperties";
/// Metadata key of the numeric packet id
pub const PACKET_ID_KEY: &str = "[cereal:packet]";
/// Metadata key of the free-text packet details
pub const PACKET_DETAILS_KEY: &str = "[cereal:packet_details]";

/// Serialization option that turns a fixed-width type into its varint form
pub const COMPRESSION_OPTION: &str = "Compression";

/// Errors raised while building the typed view of a document
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("expected an object at '{location}', found {found}")]
    UnexpectedShape { location: String, found: &'static str },
}

impl SchemaError {
    fn unexpected(location: impl Into<String>, value: &Value) -> Self {
        Self::UnexpectedShape {
            location: location.into(),
            found: json_kind(value),
        }
    }
}

/// Whether a definition title falls under the Payload suffix rule
pub fn is_payload_title(title: &str) -> bool {
    title.ends_with(PAYLOAD_SUFFIX)
}

/// Free-form `x-serialization-options` annotation
#[derive(Debug, Clone, PartialEq)]
pub struct SerializationOptions(Value);

impl SerializationOptions {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Whether the annotation names `option`.
    ///
    /// Strings match by substring, arrays by element and objects by key.
    pub fn mentions(&self, option: &str) -> bool {
        match &self.0 {
            Value::String(s) => s.contains(option),
            Value::Array(items) => items.iter().any(|item| item.as_str() == Some(option)),
            Value::Object(map) => map.contains_key(option),
            _ => false,
        }
    }

    pub fn is_compressed(&self) -> bool {
        self.mentions(COMPRESSION_OPTION)
    }
}

impl fmt::Display for SerializationOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(s) => f.write_str(s),
            Value::Array(items) => {
                let parts: Vec<String> = items.iter().map(enum_value_text).collect();
                f.write_str(&parts.join(", "))
            }
            other => write!(f, "{}", other),
        }
    }
}

/// One field of an object schema, or a nested item/member schema
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldSchema {
    pub type_name: Option<String>,
    pub items: Option<Box<FieldSchema>>,
    pub reference: Option<String>,
    pub one_of: Option<Vec<FieldSchema>>,
    pub enum_values: Option<Vec<String>>,
    pub underlying_type: Option<String>,
    pub ordinal: Option<i64>,
    pub control_value_type: Option<String>,
    pub serialization_options: Option<SerializationOptions>,
    pub title: Option<String>,
    pub description: Option<String>,
}

impl FieldSchema {
    /// Build a field from its schema value.
    ///
    /// Keys with an unexpected JSON type are treated as absent.
    pub fn from_value(value: &Value) -> Self {
        let Some(obj) = value.as_object() else {
            return Self::default();
        };

        Self {
            type_name: type_name(obj),
            items: obj
                .get("items")
                .filter(|items| items.is_object())
                .map(|items| Box::new(Self::from_value(items))),
            reference: string_field(obj, "$ref"),
            one_of: obj
                .get("oneOf")
                .and_then(Value::as_array)
                .map(|members| members.iter().map(Self::from_value).collect()),
            enum_values: obj
                .get("enum")
                .and_then(Value::as_array)
                .map(|values| values.iter().map(enum_value_text).collect()),
            underlying_type: string_field(obj, "x-underlying-type"),
            ordinal: obj.get("x-ordinal-index").and_then(Value::as_i64),
            control_value_type: string_field(obj, "x-control-value-type"),
            serialization_options: obj
                .get("x-serialization-options")
                .filter(|options| !options.is_null())
                .cloned()
                .map(SerializationOptions::new),
            title: string_field(obj, "title"),
            description: string_field(obj, "description"),
        }
    }

    /// Declared ordinal, or [`UNORDERED_ORDINAL`]
    pub fn ordinal(&self) -> i64 {
        self.ordinal.unwrap_or(UNORDERED_ORDINAL)
    }

    /// Discriminant type of a union field
    pub fn control_value_type(&self) -> &str {
        self.control_value_type
            .as_deref()
            .unwrap_or(DEFAULT_CONTROL_VALUE_TYPE)
    }

    pub fn is_array(&self) -> bool {
        self.type_name.as_deref() == Some("array")
    }

    /// Classify this field once; see [`FieldShape::classify`]
    pub fn shape(&self) -> FieldShape<'_> {
        FieldShape::classify(self)
    }
}

/// Structural kind of a field, in label precedence order
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldShape<'a> {
    /// A wire type from `x-underlying-type`, or a plain JSON type
    Scalar,
    /// `type: "array"`; the item schema may be missing
    ArrayOf(Option<&'a FieldSchema>),
    /// `oneOf` members in discriminant order
    Union(&'a [FieldSchema]),
    /// `$ref` into the definitions pool
    Reference(&'a str),
    /// Inline `enum` values
    Enum(&'a [String]),
    /// `type: "object"` declared inline
    Object,
}

impl<'a> FieldShape<'a> {
    /// Classify a field. The first matching rule wins:
    /// `x-underlying-type`, array, `oneOf`, `$ref`, `enum`, object, anything else.
    pub fn classify(field: &'a FieldSchema) -> Self {
        if field.underlying_type.is_some() {
            return Self::Scalar;
        }
        if field.is_array() {
            return Self::ArrayOf(field.items.as_deref());
        }
        if let Some(members) = &field.one_of {
            return Self::Union(members);
        }
        if let Some(reference) = &field.reference {
            return Self::Reference(reference);
        }
        if let Some(values) = &field.enum_values {
            return Self::Enum(values);
        }
        if field.type_name.as_deref() == Some("object") {
            return Self::Object;
        }
        Self::Scalar
    }
}

/// An object schema: a packet document root or a definition
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    pub type_name: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    /// Properties in declaration order
    pub properties: Vec<(String, FieldSchema)>,
    pub required: HashSet<String>,
}

impl Schema {
    /// Build a schema from its value; `location` is used in error messages
    pub fn from_value(value: &Value, location: &str) -> Result<Self, SchemaError> {
        let obj = value
            .as_object()
            .ok_or_else(|| SchemaError::unexpected(location, value))?;

        let properties = match obj.get("properties") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Object(props)) => props
                .iter()
                .map(|(name, field)| {
                    if field.is_object() {
                        Ok((name.clone(), FieldSchema::from_value(field)))
                    } else {
                        Err(SchemaError::unexpected(
                            format!("{}.properties.{}", location, name),
                            field,
                        ))
                    }
                })
                .collect::<Result<_, _>>()?,
            Some(other) => {
                return Err(SchemaError::unexpected(format!("{}.properties", location), other));
            }
        };

        let required = obj
            .get("required")
            .and_then(Value::as_array)
            .map(|names| {
                names
                    .iter()
                    .filter_map(Value::as_str)
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            type_name: type_name(obj),
            title: string_field(obj, "title"),
            description: string_field(obj, "description"),
            properties,
            required,
        })
    }

    pub fn is_object(&self) -> bool {
        self.type_name.as_deref() == Some("object")
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required.contains(name)
    }
}

/// A definition reached through a `$ref`
#[derive(Debug, Clone, Copy)]
pub struct ResolvedRef<'a> {
    pub id: &'a str,
    pub schema: &'a Schema,
}

impl<'a> ResolvedRef<'a> {
    /// Declared title, falling back to the definition id
    pub fn title(&self) -> &'a str {
        self.schema.title.as_deref().unwrap_or(self.id)
    }

    pub fn is_payload(&self) -> bool {
        is_payload_title(self.title())
    }
}

/// The shared, read-only definitions pool of one document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Definitions {
    schemas: HashMap<String, Schema>,
}

impl Definitions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the pool from a document's `definitions` object.
    ///
    /// Malformed entries are left out with a warning, so references to them
    /// fall back to unresolved labels.
    pub fn from_value(value: Option<&Value>) -> Result<Self, SchemaError> {
        let map = match value {
            None | Some(Value::Null) => return Ok(Self::new()),
            Some(Value::Object(map)) => map,
            Some(other) => return Err(SchemaError::unexpected("definitions", other)),
        };

        let schemas = map
            .iter()
            .filter_map(|(id, def)| {
                let location = format!("definitions.{}", id);
                match Schema::from_value(def, &location) {
                    Ok(schema) => Some((id.clone(), schema)),
                    Err(e) => {
                        tracing::warn!(location = %location, error = %e, "Skipping malformed definition");
                        None
                    }
                }
            })
            .collect();

        Ok(Self { schemas })
    }

    /// Add a definition; used when assembling pools by hand
    pub fn with(mut self, id: impl Into<String>, schema: Schema) -> Self {
        self.schemas.insert(id.into(), schema);
        self
    }

    /// Resolve a `$ref` such as `#/definitions/Foo` by its last segment
    pub fn resolve<'a>(&'a self, reference: &'a str) -> Option<ResolvedRef<'a>> {
        let id = reference_id(reference);
        self.schemas
            .get_key_value(id)
            .map(|(id, schema)| ResolvedRef { id, schema })
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

/// Last `/`-separated segment of a reference
pub fn reference_id(reference: &str) -> &str {
    reference.rsplit('/').next().unwrap_or(reference)
}

/// Packet metadata from `$metaProperties`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PacketMetadata {
    pub packet_id: Option<i64>,
    pub details: Option<String>,
}

impl PacketMetadata {
    pub fn from_value(value: Option<&Value>) -> Self {
        let Some(obj) = value.and_then(Value::as_object) else {
            return Self::default();
        };

        let details = match obj.get(PACKET_DETAILS_KEY) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) if s.is_empty() => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
        };

        Self {
            packet_id: obj.get(PACKET_ID_KEY).and_then(Value::as_i64),
            details,
        }
    }

    /// Declared packet id, or [`UNKNOWN_PACKET_ID`]
    pub fn packet_id(&self) -> i64 {
        self.packet_id.unwrap_or(UNKNOWN_PACKET_ID)
    }
}

/// A parsed packet document
#[derive(Debug, Clone, PartialEq)]
pub struct PacketDocument {
    pub schema: Schema,
    pub definitions: Definitions,
    pub metadata: PacketMetadata,
}

impl PacketDocument {
    /// Build a document from its root value.
    ///
    /// `fallback_title` stands in for a missing `title`, usually the file stem.
    pub fn from_value(value: &Value, fallback_title: &str) -> Result<Self, SchemaError> {
        let obj = value
            .as_object()
            .ok_or_else(|| SchemaError::unexpected("$", value))?;

        let mut schema = Schema::from_value(value, "$")?;
        if schema.title.is_none() {
            schema.title = Some(fallback_title.to_string());
        }

        Ok(Self {
            schema,
            definitions: Definitions::from_value(obj.get("definitions"))?,
            metadata: PacketMetadata::from_value(obj.get(METADATA_KEY)),
        })
    }

    pub fn title(&self) -> &str {
        self.schema.title.as_deref().unwrap_or_default()
    }
}

fn string_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(String::from)
}

/// `type` as a string; for `["string", "null"]` style arrays, the first non-null entry
fn type_name(obj: &Map<String, Value>) -> Option<String> {
    match obj.get("type")? {
        Value::String(s) => Some(s.clone()),
        Value::Array(types) => types
            .iter()
            .filter_map(Value::as_str)
            .find(|t| *t != "null")
            .map(String::from),
        _ => None,
    }
}
