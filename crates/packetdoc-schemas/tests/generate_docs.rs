//! End-to-end tests for documentation runs
//!
//! Each test lays out a schema directory in a temporary location, runs the
//! generator over it and inspects the report and the written pages.

use packetdoc_schemas::documentation::{DocumentOutcome, SkipReason};
use packetdoc_schemas::{DocGenerator, GeneratorConfig, LoaderError, SourceSet};
use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_json(dir: &Path, name: &str, value: Value) {
    fs::write(dir.join(name), serde_json::to_string_pretty(&value).unwrap()).unwrap();
}

fn packet(title: &str, id: Option<i64>) -> Value {
    let mut doc = json!({
        "title": title,
        "type": "object",
        "properties": {
            "mId": {"type": "integer", "x-underlying-type": "uint32", "x-ordinal-index": 0}
        }
    });
    if let Some(id) = id {
        doc["$metaProperties"] = json!({"[cereal:packet]": id});
    }
    doc
}

struct Run {
    _input: TempDir,
    output: TempDir,
    report: packetdoc_schemas::BatchReport,
}

impl Run {
    fn page(&self, name: &str) -> String {
        fs::read_to_string(self.output.path().join(name)).unwrap()
    }

    fn has_page(&self, name: &str) -> bool {
        self.output.path().join(name).exists()
    }
}

fn run(setup: impl FnOnce(&Path)) -> Run {
    let input = TempDir::new().unwrap();
    let output = TempDir::new().unwrap();
    setup(input.path());

    let sources = SourceSet::discover(input.path()).unwrap();
    let generator = DocGenerator::new(GeneratorConfig::default().with_output_dir(output.path()));
    let report = generator.generate(&sources).unwrap();

    Run {
        _input: input,
        output,
        report,
    }
}

#[cfg(test)]
mod listing {
    use super::*;

    #[test]
    fn test_listing_orders_by_packet_id() {
        let run = run(|dir| {
            write_json(dir, "packetA.json", packet("PacketA", Some(2)));
            write_json(dir, "packetB.json", packet("PacketB", Some(1)));
            write_json(dir, "enum_Color.json", json!({"title": "Color", "enum": ["Red"]}));
        });

        assert_eq!(run.report.rendered, 2);
        assert_eq!(run.report.enums_loaded, 1);
        assert!(run.has_page("packetA.html"));
        assert!(run.has_page("packetB.html"));
        assert!(!run.has_page("enum_Color.html"));

        let index = run.page("index.html");
        let b = index.find("packetB.html").unwrap();
        let a = index.find("packetA.html").unwrap();
        assert!(b < a);
        assert!(index.contains("PacketB (1)"));
        assert!(index.contains("<p>Documentation for 2 protocol packets.</p>"));
    }

    #[test]
    fn test_unknown_ids_sort_first_in_scan_order() {
        let run = run(|dir| {
            write_json(dir, "a_first.json", packet("Zeta", None));
            write_json(dir, "b_second.json", packet("Alpha", None));
            write_json(dir, "c_third.json", packet("Known", Some(0)));
        });

        let index = run.page("index.html");
        let positions: Vec<usize> = ["a_first.html", "b_second.html", "c_third.html"]
            .iter()
            .map(|name| index.find(name).unwrap())
            .collect();
        assert!(positions[0] < positions[1]);
        assert!(positions[1] < positions[2]);

        let pages: Vec<_> = run.report.entries.iter().filter_map(|e| e.page()).collect();
        assert_eq!(pages[0].packet_id, -1);
        assert_eq!(pages[0].title, "Zeta");
        assert_eq!(pages[1].packet_id, -1);
    }

    #[test]
    fn test_long_descriptions_are_truncated() {
        let long = "x".repeat(150);
        let run = run(|dir| {
            let mut doc = packet("Chatty", Some(3));
            doc["description"] = json!(long);
            write_json(dir, "chatty.json", doc);
        });

        let index = run.page("index.html");
        assert!(index.contains(&format!("{}...", "x".repeat(100))));
        assert!(!index.contains(&"x".repeat(101)));
        // The packet page keeps the full text
        assert!(run.page("chatty.html").contains(&long));
    }
}

#[cfg(test)]
mod pages {
    use super::*;

    #[test]
    fn test_payload_fragments_get_no_page() {
        let run = run(|dir| {
            write_json(dir, "MovePayload.json", packet("MovePayload", None));
            write_json(dir, "move.json", packet("Move", Some(5)));
        });

        assert_eq!(run.report.rendered, 1);
        assert_eq!(run.report.skipped, 1);
        assert!(!run.has_page("MovePayload.html"));
        assert!(matches!(
            run.report.entries[0].outcome,
            DocumentOutcome::Skipped(SkipReason::PayloadFragment { .. })
        ));
    }

    #[test]
    fn test_payload_wrapper_renders_payload_fields() {
        let run = run(|dir| {
            write_json(
                dir,
                "move.json",
                json!({
                    "title": "Move",
                    "type": "object",
                    "properties": {"mPayload": {"$ref": "#/definitions/MovePayload"}},
                    "definitions": {
                        "MovePayload": {
                            "title": "MovePayload",
                            "type": "object",
                            "required": ["mDx"],
                            "properties": {
                                "mDx": {"type": "number", "x-underlying-type": "float32", "x-ordinal-index": 0}
                            }
                        }
                    }
                }),
            );
        });

        let html = run.page("move.html");
        assert!(html.contains("<strong>mDx (Required)</strong>"));
        assert!(html.contains("<td>float32</td>"));
        assert!(!html.contains("mPayload"));
    }

    #[test]
    fn test_union_and_enum_tables() {
        let run = run(|dir| {
            write_json(dir, "enum_Color.json", json!({"title": "Color", "enum": ["Red", "Green"]}));
            write_json(
                dir,
                "action.json",
                json!({
                    "title": "Action",
                    "type": "object",
                    "$metaProperties": {
                        "[cereal:packet]": 9,
                        "[cereal:packet_details]": "Server to client"
                    },
                    "properties": {
                        "mKind": {"type": "string", "enum": ["A", "B", "C"], "x-ordinal-index": 0},
                        "mTint": {"type": "integer", "title": "Color", "x-ordinal-index": 1},
                        "mBody": {
                            "x-ordinal-index": 2,
                            "x-control-value-type": "uint8",
                            "oneOf": [
                                {"$ref": "#/definitions/Walk"},
                                {"x-underlying-type": "uint32", "x-serialization-options": ["Compression"]}
                            ]
                        }
                    },
                    "definitions": {
                        "Walk": {
                            "title": "Walk",
                            "type": "object",
                            "properties": {"mSpeed": {"type": "number"}}
                        }
                    }
                }),
            );
        });

        let html = run.page("action.html");
        assert!(html.contains("<title>Action (9)</title>"));
        assert!(html.contains(r#"<div class="description">Server to client</div>"#));

        for (index, value) in ["A", "B", "C"].iter().enumerate() {
            assert!(html.contains(&format!(
                "<td style=\"text-align: center;\">{}</td>\n<td><code>{}</code></td>",
                index, value
            )));
        }
        assert!(html.contains("<td><code>Green</code></td>"));

        assert!(html.contains("<th>Control Value [uint8]</th>"));
        assert!(html.contains("oneOf&lt;Walk, varuint32&gt;"));
        assert!(html.contains("<strong>Walk (Variant 0)</strong>"));
        assert!(html.contains("<strong>mSpeed</strong>"));
    }

    #[test]
    fn test_self_referencing_definition_terminates() {
        let run = run(|dir| {
            write_json(
                dir,
                "tree.json",
                json!({
                    "title": "Tree",
                    "type": "object",
                    "properties": {"mRoot": {"$ref": "#/definitions/Node"}},
                    "definitions": {
                        "Node": {
                            "title": "Node",
                            "type": "object",
                            "properties": {
                                "mChildren": {"type": "array", "items": {"$ref": "#/definitions/Node"}}
                            }
                        }
                    }
                }),
            );
        });

        assert_eq!(run.report.rendered, 1);
        let html = run.page("tree.html");
        assert_eq!(html.matches("<h3>Node</h3>").count(), 1);
        assert!(html.contains("<td>array&lt;Node&gt;</td>"));
    }
}

#[cfg(test)]
mod failures {
    use super::*;

    #[test]
    fn test_malformed_document_does_not_abort_run() {
        let run = run(|dir| {
            fs::write(dir.join("broken.json"), "{ not json").unwrap();
            write_json(dir, "ok.json", packet("Ok", Some(1)));
        });

        assert_eq!(run.report.failed, 1);
        assert_eq!(run.report.rendered, 1);
        assert!(run.report.has_failures());
        assert!(run.has_page("ok.html"));
        assert!(!run.has_page("broken.html"));
        assert_eq!(run.report.failures().next().unwrap().name(), "broken.json");
    }

    #[test]
    fn test_malformed_enum_source_is_omitted() {
        let run = run(|dir| {
            fs::write(dir.join("enum_Bad.json"), "[").unwrap();
            write_json(dir, "ok.json", packet("Ok", Some(1)));
        });

        assert_eq!(run.report.enums_loaded, 0);
        assert_eq!(run.report.rendered, 1);
        assert_eq!(run.report.failed, 0);
    }

    #[test]
    fn test_missing_input_directory() {
        let dir = TempDir::new().unwrap();
        let err = SourceSet::discover(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, LoaderError::InputNotFound { .. }));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_input_is_a_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("file.json");
        fs::write(&file, "{}").unwrap();

        let err = SourceSet::discover(&file).unwrap_err();
        assert!(matches!(err, LoaderError::NotADirectory { .. }));
    }

    #[test]
    fn test_only_enum_sources_is_empty() {
        let dir = TempDir::new().unwrap();
        write_json(dir.path(), "enum_Color.json", json!({"title": "Color", "enum": ["Red"]}));

        let sources = SourceSet::discover(dir.path()).unwrap();
        assert!(sources.is_empty());
        assert_eq!(sources.enum_sources.len(), 1);
    }
}
