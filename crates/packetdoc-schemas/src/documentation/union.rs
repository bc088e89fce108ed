//! Discriminated union (`oneOf`) rendering
//!
//! Copyright (c) 2025 Packetdoc Team
//! Licensed under the Apache-2.0 license

use crate::documentation::model::{UnionRow, UnionTable, VariantBlock};
use crate::documentation::resolver::TypeResolver;
use crate::documentation::schema::FieldSchema;
use crate::documentation::table::{ExpansionPath, TableRenderer};

/// Renders a `oneOf` field as a control-value table plus expanded variants
pub struct UnionRenderer<'r, 'a> {
    tables: &'r TableRenderer<'a>,
}

impl<'r, 'a> UnionRenderer<'r, 'a> {
    pub fn new(tables: &'r TableRenderer<'a>) -> Self {
        Self { tables }
    }

    /// Render `field.oneOf`; `None` when the field is not a union
    pub fn render(&self, field: &FieldSchema, depth: usize) -> Option<UnionTable> {
        self.render_on_path(field, depth, &mut ExpansionPath::default())
    }

    pub(crate) fn render_on_path(
        &self,
        field: &FieldSchema,
        depth: usize,
        path: &mut ExpansionPath,
    ) -> Option<UnionTable> {
        let members = field.one_of.as_deref()?;
        let definitions = self.tables.definitions();

        let mut rows = Vec::with_capacity(members.len());
        let mut variants = Vec::new();

        // Member position is the control value
        for (discriminant, member) in members.iter().enumerate() {
            rows.push(UnionRow {
                discriminant,
                label: TypeResolver::resolve(member, definitions),
                details: Self::details(member),
            });

            let Some(target) = member
                .reference
                .as_deref()
                .and_then(|reference| definitions.resolve(reference))
            else {
                continue;
            };

            if let Some(table) = self.tables.expand(target, "", depth + 2, path) {
                variants.push(VariantBlock {
                    summary: format!("{} (Variant {})", target.title(), discriminant),
                    discriminant,
                    table,
                });
            }
        }

        Some(UnionTable {
            depth,
            control_value_type: field.control_value_type().to_string(),
            rows,
            variants,
        })
    }

    /// Underlying type, serialization options and title of a member, or `-`
    pub fn details(member: &FieldSchema) -> String {
        let mut details = Vec::new();

        if let Some(underlying) = &member.underlying_type {
            details.push(format!("Underlying: {}", underlying));
        }
        if let Some(options) = &member.serialization_options {
            details.push(format!("Serialization: {}", options));
        }
        if let Some(title) = &member.title {
            details.push(format!("Title: {}", title));
        }

        if details.is_empty() {
            "-".to_string()
        } else {
            details.join(", ")
        }
    }
}
