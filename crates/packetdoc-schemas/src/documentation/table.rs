//! Recursive expansion of object schemas into field tables
//!
//! Copyright (c) 2025 Packetdoc Team
//! Licensed under the Apache-2.0 license

use crate::documentation::model::{EnumTable, FieldRow, Nested, Table};
use crate::documentation::resolver::TypeResolver;
use crate::documentation::schema::{Definitions, FieldSchema, ResolvedRef, Schema};
use crate::documentation::union::UnionRenderer;
use crate::loader::EnumRegistry;

/// Where a field's nested block comes from, if it has one.
///
/// Selection order: union, inline enum, registered enum (matched by the
/// field's title), resolvable reference, array of resolvable references.
#[derive(Debug, Clone, Copy)]
pub enum NestedSource<'a> {
    Union,
    InlineEnum(&'a [String]),
    RegisteredEnum(&'a [String]),
    Reference(ResolvedRef<'a>),
    ArrayItem(ResolvedRef<'a>),
    Leaf,
}

impl<'a> NestedSource<'a> {
    pub fn select(
        field: &'a FieldSchema,
        definitions: &'a Definitions,
        registry: &'a EnumRegistry,
    ) -> Self {
        if field.one_of.is_some() {
            return Self::Union;
        }
        if let Some(values) = &field.enum_values {
            return Self::InlineEnum(values);
        }
        if let Some(values) = field.title.as_deref().and_then(|title| registry.get(title)) {
            return Self::RegisteredEnum(values);
        }
        if let Some(target) = field
            .reference
            .as_deref()
            .and_then(|reference| definitions.resolve(reference))
        {
            return Self::Reference(target);
        }
        if field.is_array() {
            if let Some(target) = field
                .items
                .as_ref()
                .and_then(|items| items.reference.as_deref())
                .and_then(|reference| definitions.resolve(reference))
            {
                return Self::ArrayItem(target);
            }
        }
        Self::Leaf
    }
}

/// Definition ids being expanded on the current recursion path
#[derive(Debug, Default)]
pub(crate) struct ExpansionPath(Vec<String>);

impl ExpansionPath {
    fn contains(&self, id: &str) -> bool {
        self.0.iter().any(|active| active == id)
    }
}

/// Renders object schemas into [`Table`]s
#[derive(Debug, Clone, Copy)]
pub struct TableRenderer<'a> {
    definitions: &'a Definitions,
    registry: &'a EnumRegistry,
}

impl<'a> TableRenderer<'a> {
    pub fn new(definitions: &'a Definitions, registry: &'a EnumRegistry) -> Self {
        Self {
            definitions,
            registry,
        }
    }

    pub fn definitions(&self) -> &'a Definitions {
        self.definitions
    }

    /// Render `schema` as a table, or `None` unless it is an object with
    /// at least one property.
    pub fn render(&self, schema: &Schema, title: &str, depth: usize) -> Option<Table> {
        self.render_on_path(schema, title, depth, &mut ExpansionPath::default())
    }

    /// Render a definition as a standalone table, Payload definitions
    /// included. `target` stays on the expansion path, so references back
    /// to it render as leaves.
    pub fn render_definition(&self, target: ResolvedRef<'_>, title: &str, depth: usize) -> Option<Table> {
        let mut path = ExpansionPath(vec![target.id.to_string()]);
        self.render_on_path(target.schema, title, depth, &mut path)
    }

    pub(crate) fn render_on_path(
        &self,
        schema: &Schema,
        title: &str,
        depth: usize,
        path: &mut ExpansionPath,
    ) -> Option<Table> {
        if !schema.is_object() || schema.properties.is_empty() {
            return None;
        }

        // sort_by_key is stable: equal ordinals keep declaration order
        let mut fields: Vec<&(String, FieldSchema)> = schema.properties.iter().collect();
        fields.sort_by_key(|(_, field)| TypeResolver::ordinal(field));

        let rows = fields
            .into_iter()
            .map(|(name, field)| FieldRow {
                name: name.clone(),
                required: schema.is_required(name),
                label: TypeResolver::resolve(field, self.definitions),
                ordinal: TypeResolver::ordinal(field),
                description: field.description.clone().unwrap_or_default(),
                nested: self.nested_block(field, depth, path),
            })
            .collect();

        Some(Table {
            title: title.to_string(),
            depth,
            rows,
        })
    }

    fn nested_block(&self, field: &FieldSchema, depth: usize, path: &mut ExpansionPath) -> Option<Nested> {
        match NestedSource::select(field, self.definitions, self.registry) {
            NestedSource::Union => UnionRenderer::new(self)
                .render_on_path(field, depth, path)
                .map(Nested::Union),
            NestedSource::InlineEnum(values) | NestedSource::RegisteredEnum(values) => {
                enum_table(values, depth).map(Nested::Enum)
            }
            NestedSource::Reference(target) => self
                .expand(target, target.title(), depth + 1, path)
                .map(|table| Nested::Object(Box::new(table))),
            NestedSource::ArrayItem(target) => {
                let title = match &field.serialization_options {
                    Some(options) => format!("{} ({}) (Array Item)", target.title(), options),
                    None => format!("{} (Array Item)", target.title()),
                };
                self.expand(target, &title, depth + 1, path)
                    .map(|table| Nested::Object(Box::new(table)))
            }
            NestedSource::Leaf => None,
        }
    }

    /// Expand a referenced definition unless the Payload suffix rule or the
    /// cycle guard keeps it a leaf.
    pub(crate) fn expand(
        &self,
        target: ResolvedRef<'_>,
        title: &str,
        depth: usize,
        path: &mut ExpansionPath,
    ) -> Option<Table> {
        if target.is_payload() {
            return None;
        }
        if path.contains(target.id) {
            tracing::debug!(definition = %target.id, "Reference cycle, rendering as leaf");
            return None;
        }

        path.0.push(target.id.to_string());
        let table = self.render_on_path(target.schema, title, depth, path);
        path.0.pop();
        table
    }
}

/// Index/value table for enum members; `None` when there are no members
pub fn enum_table(values: &[String], depth: usize) -> Option<EnumTable> {
    if values.is_empty() {
        return None;
    }
    Some(EnumTable {
        depth,
        values: values.to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documentation::schema::UNORDERED_ORDINAL;
    use serde_json::{json, Value};

    fn schema(value: Value) -> Schema {
        Schema::from_value(&value, "$").unwrap()
    }

    fn definitions(value: Value) -> Definitions {
        Definitions::from_value(Some(&value)).unwrap()
    }

    fn names(table: &Table) -> Vec<&str> {
        table.rows.iter().map(|row| row.name.as_str()).collect()
    }

    #[test]
    fn test_non_object_or_empty_renders_nothing() {
        let defs = Definitions::new();
        let registry = EnumRegistry::new();
        let renderer = TableRenderer::new(&defs, &registry);

        assert!(renderer.render(&schema(json!({"type": "string"})), "", 0).is_none());
        assert!(renderer.render(&schema(json!({"type": "object"})), "", 0).is_none());
        assert!(renderer
            .render(&schema(json!({"type": "object", "properties": {}})), "", 0)
            .is_none());
    }

    #[test]
    fn test_rows_sorted_by_ordinal_with_stable_ties() {
        let defs = Definitions::new();
        let registry = EnumRegistry::new();
        let renderer = TableRenderer::new(&defs, &registry);

        let table = renderer
            .render(
                &schema(json!({
                    "type": "object",
                    "properties": {
                        "unorderedA": {"type": "string"},
                        "second": {"type": "string", "x-ordinal-index": 1},
                        "tieFirst": {"type": "string", "x-ordinal-index": 0},
                        "unorderedB": {"type": "string"},
                        "tieSecond": {"type": "string", "x-ordinal-index": 0}
                    },
                    "required": ["second"]
                })),
                "",
                0,
            )
            .unwrap();

        assert_eq!(
            names(&table),
            vec!["tieFirst", "tieSecond", "second", "unorderedA", "unorderedB"]
        );
        assert!(table.rows[2].required);
        assert_eq!(table.rows[2].display_name(), "second (Required)");
        assert_eq!(table.rows[3].ordinal, UNORDERED_ORDINAL);
        assert_eq!(table.rows[3].ordinal_display(), "");
    }

    #[test]
    fn test_inline_enum_table() {
        let defs = Definitions::new();
        let registry = EnumRegistry::new();
        let renderer = TableRenderer::new(&defs, &registry);

        let table = renderer
            .render(
                &schema(json!({
                    "type": "object",
                    "properties": {"mMode": {"type": "string", "enum": ["A", "B", "C"]}}
                })),
                "",
                0,
            )
            .unwrap();

        let Some(Nested::Enum(enum_table)) = &table.rows[0].nested else {
            panic!("expected an enum table");
        };
        let entries: Vec<_> = enum_table.entries().collect();
        assert_eq!(entries, vec![(0, "A"), (1, "B"), (2, "C")]);
    }

    #[test]
    fn test_registry_enum_matched_by_title() {
        let defs = Definitions::new();
        let mut registry = EnumRegistry::new();
        registry.insert("Color", vec!["Red".to_string(), "Green".to_string()]);
        let renderer = TableRenderer::new(&defs, &registry);

        let table = renderer
            .render(
                &schema(json!({
                    "type": "object",
                    "properties": {
                        "mColor": {"type": "integer", "title": "Color", "x-underlying-type": "uint8"},
                        "mOther": {"type": "integer", "title": "Shade"}
                    }
                })),
                "",
                0,
            )
            .unwrap();

        assert_eq!(table.rows[0].label, "uint8");
        assert!(matches!(&table.rows[0].nested, Some(Nested::Enum(e)) if e.values == ["Red", "Green"]));
        assert!(table.rows[1].nested.is_none());
    }

    #[test]
    fn test_reference_expands_nested_table() {
        let defs = definitions(json!({
            "Vec3": {
                "type": "object",
                "title": "Vector3",
                "properties": {
                    "x": {"type": "number", "x-ordinal-index": 0},
                    "y": {"type": "number", "x-ordinal-index": 1}
                }
            }
        }));
        let registry = EnumRegistry::new();
        let renderer = TableRenderer::new(&defs, &registry);

        let table = renderer
            .render(
                &schema(json!({
                    "type": "object",
                    "properties": {"mPosition": {"$ref": "#/definitions/Vec3"}}
                })),
                "",
                0,
            )
            .unwrap();

        assert_eq!(table.rows[0].label, "Vector3");
        let Some(Nested::Object(nested)) = &table.rows[0].nested else {
            panic!("expected a nested table");
        };
        assert_eq!(nested.title, "Vector3");
        assert_eq!(nested.depth, 1);
        assert_eq!(names(nested), vec!["x", "y"]);
    }

    #[test]
    fn test_payload_definitions_are_never_expanded() {
        let defs = definitions(json!({
            "Move": {
                "type": "object",
                "title": "MovePayload",
                "properties": {"dx": {"type": "number"}}
            }
        }));
        let registry = EnumRegistry::new();
        let renderer = TableRenderer::new(&defs, &registry);

        let table = renderer
            .render(
                &schema(json!({
                    "type": "object",
                    "properties": {
                        "mDirect": {"$ref": "#/definitions/Move"},
                        "mList": {"type": "array", "items": {"$ref": "#/definitions/Move"}},
                        "mCompressedList": {
                            "type": "array",
                            "items": {"$ref": "#/definitions/Move"},
                            "x-serialization-options": "Compression"
                        }
                    }
                })),
                "",
                0,
            )
            .unwrap();

        assert_eq!(table.rows[0].label, "MovePayload");
        assert_eq!(table.rows[1].label, "array<MovePayload>");
        assert!(table.rows.iter().all(|row| row.nested.is_none()));
    }

    #[test]
    fn test_array_item_title_carries_serialization_options() {
        let defs = definitions(json!({
            "Item": {
                "type": "object",
                "title": "InventoryItem",
                "properties": {"mCount": {"type": "integer"}}
            }
        }));
        let registry = EnumRegistry::new();
        let renderer = TableRenderer::new(&defs, &registry);

        let table = renderer
            .render(
                &schema(json!({
                    "type": "object",
                    "properties": {
                        "mItems": {
                            "type": "array",
                            "items": {"$ref": "#/definitions/Item"},
                            "x-serialization-options": "Compression"
                        },
                        "mSpare": {"type": "array", "items": {"$ref": "#/definitions/Item"}}
                    }
                })),
                "",
                2,
            )
            .unwrap();

        let Some(Nested::Object(items)) = &table.rows[0].nested else {
            panic!("expected an array item table");
        };
        assert_eq!(items.title, "InventoryItem (Compression) (Array Item)");
        assert_eq!(items.depth, 3);

        let Some(Nested::Object(spare)) = &table.rows[1].nested else {
            panic!("expected an array item table");
        };
        assert_eq!(spare.title, "InventoryItem (Array Item)");
    }

    #[test]
    fn test_unresolved_reference_is_leaf() {
        let defs = Definitions::new();
        let registry = EnumRegistry::new();
        let renderer = TableRenderer::new(&defs, &registry);

        let table = renderer
            .render(
                &schema(json!({
                    "type": "object",
                    "properties": {"mGhost": {"$ref": "#/definitions/Ghost"}}
                })),
                "",
                0,
            )
            .unwrap();

        assert_eq!(table.rows[0].label, "Ghost");
        assert!(table.rows[0].nested.is_none());
    }

    #[test]
    fn test_reference_cycle_terminates() {
        let defs = definitions(json!({
            "Node": {
                "type": "object",
                "title": "TreeNode",
                "properties": {
                    "mValue": {"type": "integer", "x-ordinal-index": 0},
                    "mChildren": {"type": "array", "items": {"$ref": "#/definitions/Node"}, "x-ordinal-index": 1},
                    "mParent": {"$ref": "#/definitions/Node", "x-ordinal-index": 2}
                }
            }
        }));
        let registry = EnumRegistry::new();
        let renderer = TableRenderer::new(&defs, &registry);

        let table = renderer
            .render(
                &schema(json!({
                    "type": "object",
                    "properties": {"mRoot": {"$ref": "#/definitions/Node"}}
                })),
                "",
                0,
            )
            .unwrap();

        let Some(Nested::Object(node)) = &table.rows[0].nested else {
            panic!("expected the first level to expand");
        };
        assert_eq!(node.rows[1].label, "array<TreeNode>");
        assert!(node.rows[1].nested.is_none());
        assert!(node.rows[2].nested.is_none());
    }

    #[test]
    fn test_nested_source_precedence() {
        let defs = definitions(json!({"A": {"type": "object", "title": "Alpha"}}));
        let mut registry = EnumRegistry::new();
        registry.insert("Alpha", vec!["X".to_string()]);

        let union_and_enum = FieldSchema::from_value(&json!({"oneOf": [], "enum": ["A"]}));
        assert!(matches!(
            NestedSource::select(&union_and_enum, &defs, &registry),
            NestedSource::Union
        ));

        let titled_ref = FieldSchema::from_value(&json!({"$ref": "#/definitions/A", "title": "Alpha"}));
        assert!(matches!(
            NestedSource::select(&titled_ref, &defs, &registry),
            NestedSource::RegisteredEnum(_)
        ));

        let plain_ref = FieldSchema::from_value(&json!({"$ref": "#/definitions/A"}));
        assert!(matches!(
            NestedSource::select(&plain_ref, &defs, &registry),
            NestedSource::Reference(target) if target.id == "A"
        ));

        let scalar = FieldSchema::from_value(&json!({"type": "integer"}));
        assert!(matches!(NestedSource::select(&scalar, &defs, &registry), NestedSource::Leaf));
    }
}
