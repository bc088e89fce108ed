//! HTML templates for documentation generation
//!
//! Copyright (c) 2025 Packetdoc Team
//! Licensed under the Apache-2.0 license

use crate::documentation::model::{EnumTable, FieldRow, Nested, Table, UnionTable, VariantBlock};
use crate::documentation::packet::RenderedPacket;

/// Pixels of indentation per nesting level
pub const INDENT_STEP: usize = 20;

const STYLESHEET: &str = r#"        body {
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            margin: 0;
            padding: 20px;
            background-color: #f5f5f5;
            line-height: 1.6;
        }
        .container {
            max-width: 1200px;
            margin: 0 auto;
            background-color: white;
            padding: 30px;
            box-shadow: 0 2px 4px rgba(0,0,0,0.1);
        }
        h1 {
            color: #2c3e50;
            border-bottom: 3px solid #3498db;
            padding-bottom: 10px;
            margin-top: 0;
        }
        h2 {
            color: #34495e;
            border-bottom: 2px solid #3498db;
            padding-bottom: 5px;
            margin-top: 30px;
        }
        h3 {
            color: #555;
            margin-top: 20px;
            margin-bottom: 10px;
        }
        table {
            background-color: white;
            font-size: 14px;
            margin-bottom: 10px;
        }
        th {
            font-weight: bold;
            text-align: left;
            padding: 8px !important;
        }
        td {
            padding: 8px !important;
        }
        tr:nth-child(even) {
            background-color: #f9f9f9;
        }
        tr:hover {
            background-color: #e8f4f8;
        }
        .description {
            color: #555;
            font-style: italic;
            margin: 10px 0 20px 0;
            padding: 10px;
            background-color: #f8f9fa;
            border-left: 4px solid #3498db;
        }
        a {
            color: #3498db;
            text-decoration: none;
        }
        a:hover {
            text-decoration: underline;
        }
        .packet-list {
            columns: 3;
            column-gap: 20px;
        }
        .packet-list li {
            margin-bottom: 8px;
            break-inside: avoid;
        }
        details {
            margin: 10px 0;
        }
        summary {
            cursor: pointer;
            font-weight: bold;
            padding: 8px;
            background-color: #f0f0f0;
            border: 1px solid #ddd;
            border-radius: 4px;
            user-select: none;
        }
        summary:hover {
            background-color: #e8e8e8;
        }
        details[open] summary {
            background-color: #d4edff;
            border-color: #3498db;
            border-left: 4px solid #3498db;
        }
        @media (max-width: 900px) {
            .packet-list {
                columns: 2;
            }
        }
        @media (max-width: 600px) {
            .packet-list {
                columns: 1;
            }
        }
"#;

/// One entry of the index page
#[derive(Debug, Clone, PartialEq)]
pub struct IndexLink<'a> {
    pub title: &'a str,
    /// Already truncated description; empty hides the line
    pub description: &'a str,
    pub file_name: &'a str,
}

/// Builds HTML fragments and pages from the rendered table tree
pub struct HtmlTemplate;

impl HtmlTemplate {
    /// Escape text for use in element content and attribute values
    pub fn escape(text: &str) -> String {
        let mut escaped = String::with_capacity(text.len());
        for c in text.chars() {
            match c {
                '&' => escaped.push_str("&amp;"),
                '<' => escaped.push_str("&lt;"),
                '>' => escaped.push_str("&gt;"),
                '"' => escaped.push_str("&quot;"),
                '\'' => escaped.push_str("&#x27;"),
                _ => escaped.push(c),
            }
        }
        escaped
    }

    /// Field table with its nested blocks
    pub fn table(table: &Table) -> String {
        let mut html = vec![format!(
            r#"<div style="margin-left: {}px; margin-top: 10px;">"#,
            table.depth * INDENT_STEP
        )];

        if !table.title.is_empty() {
            html.push(format!("<h3>{}</h3>", Self::escape(&table.title)));
        }

        html.push(r#"<table border="1" cellpadding="5" cellspacing="0" style="border-collapse: collapse; width: 100%; max-width: 800px;">"#.to_string());
        html.push("<thead>".to_string());
        html.push(r#"<tr style="background-color: #f0f0f0;">"#.to_string());
        html.push("<th>Field Name</th>".to_string());
        html.push("<th>Type</th>".to_string());
        html.push("<th>Field Index</th>".to_string());
        html.push("<th>Description</th>".to_string());
        html.push("</tr>".to_string());
        html.push("</thead>".to_string());
        html.push("<tbody>".to_string());

        for row in &table.rows {
            Self::field_rows(row, &mut html);
        }

        html.push("</tbody>".to_string());
        html.push("</table>".to_string());
        html.push("</div>".to_string());
        html.join("\n")
    }

    fn field_rows(row: &FieldRow, html: &mut Vec<String>) {
        let name = Self::escape(&row.display_name());

        html.push("<tr>".to_string());
        if row.nested.is_some() {
            html.push(format!(r#"<td rowspan="2"><strong>{}</strong></td>"#, name));
        } else {
            html.push(format!("<td><strong>{}</strong></td>", name));
        }
        html.push(format!("<td>{}</td>", Self::escape(&row.label)));
        html.push(format!("<td>{}</td>", row.ordinal_display()));
        html.push(format!("<td>{}</td>", Self::escape(&row.description)));
        html.push("</tr>".to_string());

        match &row.nested {
            Some(Nested::Union(union)) => {
                html.push("<tr>".to_string());
                html.push(format!(
                    r#"<td colspan="3" style="padding: 0;">{}</td>"#,
                    Self::union_table(union)
                ));
                html.push("</tr>".to_string());
            }
            Some(Nested::Enum(values)) => {
                html.push("<tr>".to_string());
                html.push(format!(r#"<td colspan="3">{}</td>"#, Self::enum_table(values)));
                html.push("</tr>".to_string());
            }
            Some(Nested::Object(table)) => {
                html.push("<tr>".to_string());
                html.push(format!(r#"<td colspan="3">{}</td>"#, Self::table(table)));
                html.push("</tr>".to_string());
            }
            None => {}
        }
    }

    /// Index/value listing of enum members
    pub fn enum_table(table: &EnumTable) -> String {
        let mut html = vec![
            format!(
                r#"<div style="margin-left: {}px; margin-top: 5px; margin-bottom: 5px;">"#,
                (table.depth + 1) * INDENT_STEP
            ),
            "<strong>Enum Values:</strong>".to_string(),
            r#"<table border="1" cellpadding="3" cellspacing="0" style="border-collapse: collapse; width: 100%; max-width: 760px; font-size: 12px;">"#.to_string(),
            "<thead>".to_string(),
            r#"<tr style="background-color: #e8e8e8;">"#.to_string(),
            r#"<th style="width: 40px;">Index</th>"#.to_string(),
            "<th>Value</th>".to_string(),
            "</tr>".to_string(),
            "</thead>".to_string(),
            "<tbody>".to_string(),
        ];

        for (index, value) in table.entries() {
            html.push("<tr>".to_string());
            html.push(format!(r#"<td style="text-align: center;">{}</td>"#, index));
            html.push(format!("<td><code>{}</code></td>", Self::escape(value)));
            html.push("</tr>".to_string());
        }

        html.push("</tbody>".to_string());
        html.push("</table>".to_string());
        html.push("</div>".to_string());
        html.join("\n")
    }

    /// Control value summary followed by the collapsed variant expansions
    pub fn union_table(union: &UnionTable) -> String {
        let mut html = vec![
            format!(
                r#"<div style="margin-left: {}px; margin-top: 0px; margin-bottom: 0px;">"#,
                (union.depth + 1) * INDENT_STEP
            ),
            format!("<strong>{}:</strong>", Self::escape(&union.signature())),
            r#"<table border="1" cellpadding="5" cellspacing="0" style="border-collapse: collapse; width: 100%; max-width: 760px; margin-top: 5px;">"#.to_string(),
            "<thead>".to_string(),
            r#"<tr style="background-color: #e8e8e8;">"#.to_string(),
            format!(
                "<th>Control Value [{}]</th>",
                Self::escape(&union.control_value_type)
            ),
            "<th>Type</th>".to_string(),
            "<th>Details</th>".to_string(),
            "</tr>".to_string(),
            "</thead>".to_string(),
            "<tbody>".to_string(),
        ];

        for row in &union.rows {
            html.push("<tr>".to_string());
            html.push(format!("<td>{}</td>", row.discriminant));
            html.push(format!("<td><strong>{}</strong></td>", Self::escape(&row.label)));
            html.push(format!("<td>{}</td>", Self::escape(&row.details)));
            html.push("</tr>".to_string());
        }

        html.push("</tbody>".to_string());
        html.push("</table>".to_string());

        for variant in &union.variants {
            html.push(Self::variant(variant, union.depth));
        }

        html.push("</div>".to_string());
        html.join("\n")
    }

    fn variant(variant: &VariantBlock, depth: usize) -> String {
        [
            format!(
                r#"<details style="margin-left: {}px; margin-top: 10px;">"#,
                (depth + 1) * INDENT_STEP
            ),
            format!(
                r#"<summary style="cursor: pointer; font-weight: bold; padding: 5px; background-color: #f0f0f0; border: 1px solid #ddd;"><strong>{}</strong></summary>"#,
                Self::escape(&variant.summary)
            ),
            Self::table(&variant.table),
            "</details>".to_string(),
        ]
        .join("\n")
    }

    /// Body of a packet page: heading, annotations and the field table
    pub fn packet_body(packet: &RenderedPacket) -> String {
        let mut html = vec![format!("<h1>{}</h1>", Self::escape(&packet.title))];

        if !packet.description.is_empty() {
            html.push(format!(
                r#"<div class="description">{}</div>"#,
                Self::escape(&packet.description)
            ));
        }
        if let Some(details) = &packet.details {
            html.push(format!(r#"<div class="description">{}</div>"#, Self::escape(details)));
        }
        if let Some(table) = &packet.table {
            html.push(Self::table(table));
        }

        html.join("\n")
    }

    /// Complete page for one packet, linking back to the index
    pub fn packet_page(packet: &RenderedPacket) -> String {
        Self::page(&packet.title, &Self::packet_body(packet), true)
    }

    /// Index page listing every rendered packet in the given order
    pub fn index_page(title: &str, links: &[IndexLink<'_>]) -> String {
        let mut html = vec![
            format!("<h1>{}</h1>", Self::escape(title)),
            format!("<p>Documentation for {} protocol packets.</p>", links.len()),
            "<h2>Packet List</h2>".to_string(),
            r#"<ul class="packet-list">"#.to_string(),
        ];

        for link in links {
            html.push("<li>".to_string());
            html.push(format!(
                r#"<a href="{}"><strong>{}</strong></a>"#,
                Self::escape(link.file_name),
                Self::escape(link.title)
            ));
            if !link.description.is_empty() {
                html.push(format!(
                    r#"<br><span style="color: #666; font-size: 0.9em;">{}</span>"#,
                    Self::escape(link.description)
                ));
            }
            html.push("</li>".to_string());
        }

        html.push("</ul>".to_string());
        Self::page(title, &html.join("\n"), false)
    }

    /// Shared page chrome
    pub fn page(title: &str, content: &str, back_link: bool) -> String {
        let back = if back_link {
            r#"<p><a href="index.html">← Back to Index</a></p>"#
        } else {
            ""
        };

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{}</title>
    <style>
{}    </style>
</head>
<body>
    <div class="container">
        {}
        {}
    </div>
</body>
</html>"#,
            Self::escape(title),
            STYLESHEET,
            back,
            content
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::documentation::model::UnionRow;

    fn leaf(name: &str, ordinal: i64) -> FieldRow {
        FieldRow {
            name: name.to_string(),
            required: false,
            label: "uint8".to_string(),
            ordinal,
            description: String::new(),
            nested: None,
        }
    }

    #[test]
    fn test_escape() {
        assert_eq!(
            HtmlTemplate::escape(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#x27;s&lt;/a&gt;"
        );
        assert_eq!(HtmlTemplate::escape("plain"), "plain");
    }

    #[test]
    fn test_table_rows_and_headings() {
        let mut required = leaf("mId", 0);
        required.required = true;
        required.label = "array<Vec3>".to_string();

        let table = Table {
            title: "Position".to_string(),
            depth: 2,
            rows: vec![required, leaf("mLoose", 9999)],
        };
        let html = HtmlTemplate::table(&table);

        assert!(html.contains(r#"margin-left: 40px"#));
        assert!(html.contains("<h3>Position</h3>"));
        assert!(html.contains("<td><strong>mId (Required)</strong></td>"));
        assert!(html.contains("<td>array&lt;Vec3&gt;</td>"));
        assert!(html.contains("<td>0</td>"));
        assert!(html.contains("<td></td>"));
        assert!(!html.contains("9999"));
    }

    #[test]
    fn test_untitled_table_has_no_heading() {
        let table = Table {
            title: String::new(),
            depth: 0,
            rows: vec![leaf("mId", 0)],
        };
        assert!(!HtmlTemplate::table(&table).contains("<h3>"));
    }

    #[test]
    fn test_nested_block_spans_rows() {
        let mut row = leaf("mColor", 1);
        row.nested = Some(Nested::Enum(EnumTable {
            depth: 0,
            values: vec!["Red".to_string(), "<Blue>".to_string()],
        }));

        let table = Table {
            title: String::new(),
            depth: 0,
            rows: vec![row],
        };
        let html = HtmlTemplate::table(&table);

        assert!(html.contains(r#"<td rowspan="2"><strong>mColor</strong></td>"#));
        assert!(html.contains(r#"<td colspan="3"><div style="margin-left: 20px;"#));
        assert!(html.contains(r#"<td style="text-align: center;">1</td>"#));
        assert!(html.contains("<td><code>&lt;Blue&gt;</code></td>"));
    }

    #[test]
    fn test_union_table_markup() {
        let union = UnionTable {
            depth: 0,
            control_value_type: "uint8".to_string(),
            rows: vec![
                UnionRow { discriminant: 0, label: "Chat".to_string(), details: "-".to_string() },
                UnionRow { discriminant: 1, label: "uint32".to_string(), details: "Title: Ping".to_string() },
            ],
            variants: vec![VariantBlock {
                summary: "Chat (Variant 0)".to_string(),
                discriminant: 0,
                table: Table {
                    title: String::new(),
                    depth: 2,
                    rows: vec![leaf("mText", 0)],
                },
            }],
        };
        let html = HtmlTemplate::union_table(&union);

        assert!(html.contains("<strong>oneOf&lt;Chat, uint32&gt;:</strong>"));
        assert!(html.contains("<th>Control Value [uint8]</th>"));
        assert!(html.contains("<td><strong>uint32</strong></td>"));
        assert!(html.contains(r#"<details style="margin-left: 20px; margin-top: 10px;">"#));
        assert!(html.contains("<strong>Chat (Variant 0)</strong></summary>"));
        assert!(!html.contains("<details open"));
    }

    #[test]
    fn test_packet_page() {
        let packet = RenderedPacket {
            packet_id: 3,
            title: "Login (3)".to_string(),
            description: "Client hello".to_string(),
            details: Some("Sent once".to_string()),
            table: None,
        };
        let html = HtmlTemplate::packet_page(&packet);

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Login (3)</title>"));
        assert!(html.contains(r#"<a href="index.html">"#));
        assert!(html.contains(r#"<div class="description">Client hello</div>"#));
        assert!(html.contains(r#"<div class="description">Sent once</div>"#));
        assert!(!html.contains("<table"));
    }

    #[test]
    fn test_index_page() {
        let links = [
            IndexLink { title: "B (1)", description: "", file_name: "b.html" },
            IndexLink { title: "A (2)", description: "First & last", file_name: "a.html" },
        ];
        let html = HtmlTemplate::index_page("Protocol", &links);

        assert!(html.contains("<p>Documentation for 2 protocol packets.</p>"));
        assert!(!html.contains("index.html"));
        let b = html.find("b.html").unwrap();
        let a = html.find("a.html").unwrap();
        assert!(b < a);
        assert!(html.contains("First &amp; last"));
        assert_eq!(html.matches("<span").count(), 1);
    }
}
