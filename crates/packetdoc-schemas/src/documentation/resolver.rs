//! Display labels for field types
//!
//! Copyright (c) 2025 Packetdoc Team
//! Licensed under the Apache-2.0 license

use crate::documentation::schema::{reference_id, Definitions, FieldSchema, FieldShape};

/// Derives the short type label shown in the "Type" column
pub struct TypeResolver;

impl TypeResolver {
    /// Label for a field, resolved against the document's definitions.
    ///
    /// Wire types from `x-underlying-type` win over everything else and get a
    /// `var` prefix when the field is serialized with compression.
    pub fn resolve(field: &FieldSchema, definitions: &Definitions) -> String {
        if let Some(underlying) = &field.underlying_type {
            let compressed = field
                .serialization_options
                .as_ref()
                .is_some_and(|options| options.is_compressed());

            return if compressed {
                format!("var{}", underlying)
            } else {
                underlying.clone()
            };
        }

        match field.shape() {
            FieldShape::ArrayOf(items) => format!("array<{}>", Self::item_label(items, definitions)),
            FieldShape::Union(_) => "oneOf".to_string(),
            FieldShape::Reference(reference) => Self::reference_label(reference, definitions),
            FieldShape::Enum(_) => field.title.clone().unwrap_or_else(|| "enum".to_string()),
            FieldShape::Scalar | FieldShape::Object => field
                .type_name
                .clone()
                .unwrap_or_else(|| "unknown".to_string()),
        }
    }

    fn item_label(items: Option<&FieldSchema>, definitions: &Definitions) -> String {
        let Some(items) = items else {
            return "unknown".to_string();
        };

        if let Some(reference) = &items.reference {
            return Self::reference_label(reference, definitions);
        }
        if let Some(underlying) = &items.underlying_type {
            return underlying.clone();
        }
        items.type_name.clone().unwrap_or_else(|| "unknown".to_string())
    }

    /// Title of the referenced definition, or the raw reference id when unresolved
    pub fn reference_label(reference: &str, definitions: &Definitions) -> String {
        match definitions.resolve(reference) {
            Some(resolved) => resolved.title().to_string(),
            None => {
                let id = reference_id(reference);
                tracing::trace!(reference = %reference, "Unresolved reference, using its id as label");
                id.to_string()
            }
        }
    }

    /// Ordinal used for sorting; see [`FieldSchema::ordinal`]
    pub fn ordinal(field: &FieldSchema) -> i64 {
        field.ordinal()
    }
}
