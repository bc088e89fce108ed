//! Rendered table tree
//!
//! The renderers produce this structure; [`crate::documentation::templates`]
//! turns it into HTML. Keeping markup out of the engine lets the tree be
//! inspected directly and serialized for machine consumers.
//!
//! Copyright (c) 2025 Packetdoc Team
//! Licensed under the Apache-2.0 license

use crate::documentation::schema::UNORDERED_ORDINAL;
use serde::Serialize;

/// A field table for one object schema
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    /// Heading above the table; empty for top-level and variant tables
    pub title: String,
    /// Nesting depth, used only for indentation
    pub depth: usize,
    pub rows: Vec<FieldRow>,
}

/// One field of a [`Table`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldRow {
    pub name: String,
    pub required: bool,
    /// Type label from the type resolver
    pub label: String,
    pub ordinal: i64,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nested: Option<Nested>,
}

impl FieldRow {
    /// Field name with the `(Required)` marker
    pub fn display_name(&self) -> String {
        if self.required {
            format!("{} (Required)", self.name)
        } else {
            self.name.clone()
        }
    }

    /// Ordinal as shown in the table; blank for unordered fields
    pub fn ordinal_display(&self) -> String {
        if self.ordinal == UNORDERED_ORDINAL {
            String::new()
        } else {
            self.ordinal.to_string()
        }
    }
}

/// The single nested block a field may carry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Nested {
    Union(UnionTable),
    Enum(EnumTable),
    Object(Box<Table>),
}

/// Index/value listing of enum members
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnumTable {
    pub depth: usize,
    pub values: Vec<String>,
}

impl EnumTable {
    /// `(index, value)` pairs, 0-based
    pub fn entries(&self) -> impl Iterator<Item = (usize, &str)> {
        self.values.iter().map(String::as_str).enumerate()
    }
}

/// Discriminated-union summary plus expanded variants
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnionTable {
    pub depth: usize,
    /// Wire type of the discriminant
    pub control_value_type: String,
    pub rows: Vec<UnionRow>,
    /// Expanded variant definitions, in member order
    pub variants: Vec<VariantBlock>,
}

impl UnionTable {
    /// `oneOf<A, B, ...>` heading built from the member labels
    pub fn signature(&self) -> String {
        let labels: Vec<&str> = self.rows.iter().map(|row| row.label.as_str()).collect();
        format!("oneOf<{}>", labels.join(", "))
    }
}

/// Summary row of one union member
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnionRow {
    /// Control value selecting this member
    pub discriminant: usize,
    pub label: String,
    /// Comma-separated annotations, or `-`
    pub details: String,
}

/// Collapsed disclosure holding an expanded variant definition
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariantBlock {
    /// `<title> (Variant <index>)`
    pub summary: String,
    pub discriminant: usize,
    pub table: Table,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(ordinal: i64, required: bool) -> FieldRow {
        FieldRow {
            name: "mFlags".to_string(),
            required,
            label: "uint8".to_string(),
            ordinal,
            description: String::new(),
            nested: None,
        }
    }

    #[test]
    fn test_display_name() {
        assert_eq!(row(0, true).display_name(), "mFlags (Required)");
        assert_eq!(row(0, false).display_name(), "mFlags");
    }

    #[test]
    fn test_ordinal_display() {
        assert_eq!(row(4, false).ordinal_display(), "4");
        assert_eq!(row(UNORDERED_ORDINAL, false).ordinal_display(), "");
    }

    #[test]
    fn test_union_signature() {
        let union = UnionTable {
            depth: 0,
            control_value_type: "varuint32".to_string(),
            rows: vec![
                UnionRow { discriminant: 0, label: "Move".to_string(), details: "-".to_string() },
                UnionRow { discriminant: 1, label: "uint8".to_string(), details: "-".to_string() },
            ],
            variants: Vec::new(),
        };
        assert_eq!(union.signature(), "oneOf<Move, uint8>");
    }

    #[test]
    fn test_nested_serializes_with_kind_tag() {
        let nested = Nested::Enum(EnumTable { depth: 0, values: vec!["A".to_string()] });
        let value = serde_json::to_value(&nested).unwrap();
        assert_eq!(value["kind"], "enum");
        assert_eq!(value["values"][0], "A");
    }
}
