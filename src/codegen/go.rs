//! Go structs with `json:"..."` tags.
use std::collections::BTreeSet;

use serde::Serialize;
use serde_json::Value;
use tracing::warn;

use super::{Emitter, root_fields};
use crate::error::Result;
use crate::format;
use crate::inference::Nesting;
use crate::naming;
use crate::schema::{Field, NamedObjectRegistry, ObjectNode, ScalarKind, SchemaNode};
use crate::template::{self, GO_PREAMBLE, GO_STRUCT_OPEN};

#[derive(Debug, Clone)]
pub struct GoEmitter {
    /// Emit a `package` clause and the imports the field types need.
    pub package: Option<String>,
    /// Trailing `// <value>` comment with the sampled value.
    pub with_examples: bool,
    /// Run the formatting pass (falls back to raw text on failure).
    pub format: bool,
}

impl Default for GoEmitter {
    fn default() -> Self {
        Self { package: None, with_examples: true, format: true }
    }
}

#[derive(Serialize)]
struct Preamble<'a> {
    package: &'a str,
    imports: Vec<&'static str>,
}

#[derive(Serialize)]
struct StructOpen<'a> {
    name: &'a str,
    is_array: bool,
}

impl Emitter for GoEmitter {
    fn name(&self) -> &'static str {
        "go"
    }

    fn extension(&self) -> &'static str {
        "go"
    }

    fn nesting(&self) -> Nesting {
        Nesting::Inline
    }

    fn emit(&self, root: &SchemaNode, registry: &NamedObjectRegistry, root_name: &str) -> Result<String> {
        let (fields, is_array) = root_fields(root)?;
        let mut out = String::new();

        if let Some(package) = &self.package {
            let mut imports = BTreeSet::new();
            collect_imports(fields, &mut imports);
            for entry in registry.iter() {
                collect_imports(&entry.fields, &mut imports);
            }
            let imports = imports.into_iter().collect();
            out.push_str(&template::render(GO_PREAMBLE, &Preamble { package, imports })?);
        }

        out.push_str(&template::render(GO_STRUCT_OPEN, &StructOpen { name: root_name, is_array })?);
        self.write_fields(&mut out, fields);
        out.push_str("}\n");

        for entry in registry.iter() {
            out.push('\n');
            out.push_str(&template::render(
                GO_STRUCT_OPEN,
                &StructOpen { name: &entry.type_name, is_array: false },
            )?);
            self.write_fields(&mut out, &entry.fields);
            out.push_str("}\n");
        }

        if !self.format {
            return Ok(out);
        }
        match format::format_go(&out) {
            Ok(formatted) => Ok(formatted),
            Err(err) => {
                warn!(%err, "formatting failed, keeping unformatted Go source");
                Ok(out)
            }
        }
    }
}

impl GoEmitter {
    fn write_fields(&self, out: &mut String, fields: &[Field]) {
        for field in fields {
            out.push_str(&naming::normalize(&field.key));
            out.push(' ');
            self.write_type(out, &field.node);
            out.push(' ');
            out.push_str(&struct_tag(field));
            if self.with_examples {
                if let Some(example) = example_text(field) {
                    out.push_str(" // ");
                    out.push_str(&example);
                }
            }
            out.push('\n');
        }
    }

    fn write_type(&self, out: &mut String, node: &SchemaNode) {
        match node {
            SchemaNode::Scalar { scalar } => out.push_str(scalar_type(*scalar)),
            SchemaNode::Array { element } => {
                out.push_str("[]");
                self.write_type(out, element);
            }
            SchemaNode::Object(ObjectNode { name: Some(name), .. }) => out.push_str(name),
            SchemaNode::Object(ObjectNode { name: None, fields }) => {
                out.push_str("struct {\n");
                self.write_fields(out, fields);
                out.push('}');
            }
        }
    }
}

pub fn scalar_type(kind: ScalarKind) -> &'static str {
    match kind {
        ScalarKind::String => "string",
        ScalarKind::Int64 => "int64",
        ScalarKind::Float64 => "float64",
        ScalarKind::Bool => "bool",
        ScalarKind::Timestamp => "time.Time",
        ScalarKind::IpAddr => "net.IP",
        ScalarKind::Any => "interface{}",
    }
}

/// `json:"<key>"`, with `,string` when the value is a quoted number/bool.
///
/// The key is escaped so `reflect.StructTag` unquotes it back. A key holding a
/// backtick cannot sit in a raw string, so that tag becomes an interpreted
/// literal.
fn struct_tag(field: &Field) -> String {
    let opt = if field.quoted { ",string" } else { "" };
    let tag = format!("json:\"{}{opt}\"", go_escape(&field.key));
    if tag.contains('`') {
        format!("\"{}\"", go_escape(&tag))
    } else {
        format!("`{tag}`")
    }
}

/// Body of a Go interpreted string literal.
fn go_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

/// The sampled scalar, or the first element for arrays.
fn example_text(field: &Field) -> Option<String> {
    let value = match field.example.as_ref()? {
        Value::Array(xs) => xs.first()?,
        other => other,
    };
    match value {
        Value::String(s) if !s.is_empty() => Some(s.replace('\r', "\\r").replace('\n', "\\n")),
        Value::Number(_) | Value::Bool(_) => Some(value.to_string()),
        _ => None,
    }
}

fn collect_imports(fields: &[Field], imports: &mut BTreeSet<&'static str>) {
    fn walk(node: &SchemaNode, imports: &mut BTreeSet<&'static str>) {
        match node {
            SchemaNode::Scalar { scalar: ScalarKind::Timestamp } => {
                imports.insert("time");
            }
            SchemaNode::Scalar { scalar: ScalarKind::IpAddr } => {
                imports.insert("net");
            }
            SchemaNode::Scalar { .. } => {}
            SchemaNode::Array { element } => walk(element, imports),
            // named shapes are visited through their registry entry
            SchemaNode::Object(ObjectNode { name: Some(_), .. }) => {}
            SchemaNode::Object(ObjectNode { name: None, fields }) => collect_imports(fields, imports),
        }
    }
    for field in fields {
        walk(&field.node, imports);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::{InferOptions, infer};
    use serde_json::json;

    fn emit_with(emitter: &GoEmitter, v: Value) -> String {
        let (root, reg) = infer(&v, "Config", InferOptions::default()).unwrap();
        emitter.emit(&root, &reg, "Config").unwrap()
    }

    fn raw() -> GoEmitter {
        GoEmitter { package: None, with_examples: true, format: false }
    }

    #[test]
    fn basic_struct_in_key_order() {
        let out = emit_with(&raw(), json!({"tags": ["x", "y"], "name": "a", "id": 1}));
        assert_eq!(
            out,
            "type Config struct {\n\
             ID int64 `json:\"id\"` // 1\n\
             Name string `json:\"name\"` // a\n\
             Tags []string `json:\"tags\"` // x\n\
             }\n"
        );
    }

    #[test]
    fn formatted_output_is_aligned() {
        let out = emit_with(&GoEmitter::default(), json!({"id": 1, "name": "a", "tags": ["x", "y"]}));
        assert_eq!(
            out,
            "type Config struct {\n\
             \tID   int64    `json:\"id\"`   // 1\n\
             \tName string   `json:\"name\"` // a\n\
             \tTags []string `json:\"tags\"` // x\n\
             }\n"
        );
    }

    #[test]
    fn quoted_numbers_keep_string_option() {
        let out = emit_with(&raw(), json!({"port": "8080", "debug": "true", "ratio": "0.5"}));
        assert!(out.contains("Port int64 `json:\"port,string\"` // 8080\n"), "{out}");
        assert!(out.contains("Debug bool `json:\"debug,string\"` // true\n"), "{out}");
        assert!(out.contains("Ratio float64 `json:\"ratio,string\"` // 0.5\n"), "{out}");
    }

    #[test]
    fn refined_kinds_and_package_imports() {
        let emitter = GoEmitter { package: Some("configd".into()), ..raw() };
        let out = emit_with(&emitter, json!({"at": "2023-05-01T00:00:00Z", "dns": "8.8.8.8"}));
        assert!(out.starts_with(
            "// Code generated by configd. DO NOT EDIT.\n\npackage configd\n\nimport (\n\t\"net\"\n\t\"time\"\n)\n\n"
        ), "{out}");
        assert!(out.contains("At time.Time `json:\"at\"`"));
        assert!(out.contains("Dns net.IP `json:\"dns\"`"));
    }

    #[test]
    fn nested_objects_are_inline() {
        let out = emit_with(&raw(), json!({"db": {"host": "h", "pool": {"max": 4}}}));
        assert_eq!(
            out,
            "type Config struct {\n\
             Db struct {\n\
             Host string `json:\"host\"` // h\n\
             Pool struct {\n\
             Max int64 `json:\"max\"` // 4\n\
             } `json:\"pool\"`\n\
             } `json:\"db\"`\n\
             }\n"
        );
    }

    #[test]
    fn arrays_of_objects_become_named_types_after_root() {
        let out = emit_with(&raw(), json!({"servers": [{"id": 7, "host": "a"}], "name": "n"}));
        assert_eq!(
            out,
            "type Config struct {\n\
             Name string `json:\"name\"` // n\n\
             Servers []Servers `json:\"servers\"`\n\
             }\n\
             \n\
             type Servers struct {\n\
             ID int64 `json:\"id\"` // 7\n\
             Host string `json:\"host\"` // a\n\
             }\n"
        );
    }

    #[test]
    fn empty_and_null_fields() {
        let out = emit_with(&raw(), json!({"items": [], "nothing": null}));
        assert!(out.contains("Items []interface{} `json:\"items\"`\n"), "{out}");
        assert!(out.contains("Nothing interface{} `json:\"nothing\"`\n"), "{out}");
    }

    #[test]
    fn root_array_uses_slice_of_struct() {
        let out = emit_with(&raw(), json!([{"a": 1}]));
        assert!(out.starts_with("type Config []struct {\n"), "{out}");
    }

    #[test]
    fn examples_can_be_disabled() {
        let emitter = GoEmitter { with_examples: false, ..raw() };
        let out = emit_with(&emitter, json!({"a": 1}));
        assert_eq!(out, "type Config struct {\nA int64 `json:\"a\"`\n}\n");
    }

    #[test]
    fn raw_key_survives_in_tag() {
        let out = emit_with(&raw(), json!({"user-id": 1, "2fa_code": "x"}));
        assert!(out.contains("_2faCode string `json:\"2fa_code\"` // x\n"), "{out}");
        assert!(out.contains("UserID int64 `json:\"user-id\"` // 1\n"), "{out}");
    }

    #[test]
    fn awkward_keys_are_escaped_in_tags() {
        let out = emit_with(&raw(), json!({"a\tb": 1, "line\nbreak": 2, "q\"x": 3}));
        assert!(out.contains("AB int64 `json:\"a\\tb\"` // 1\n"), "{out}");
        assert!(out.contains("`json:\"line\\nbreak\"` // 2\n"), "{out}");
        assert!(out.contains("`json:\"q\\\"x\"` // 3\n"), "{out}");
        assert!(!out.contains("line\nbreak"), "{out}");
    }

    #[test]
    fn backtick_key_uses_interpreted_tag() {
        let out = emit_with(&raw(), json!({"a`b": 1}));
        assert!(out.contains("AB int64 \"json:\\\"a`b\\\"\" // 1\n"), "{out}");
    }

    #[test]
    fn go_escape_control_characters() {
        assert_eq!(go_escape("a\u{1}b"), "a\\u0001b");
        assert_eq!(go_escape("x\\y"), "x\\\\y");
    }

    #[test]
    fn multiline_examples_stay_on_one_line() {
        let out = emit_with(&raw(), json!({"motd": "hello\nworld"}));
        assert!(out.contains("// hello\\nworld\n"), "{out}");
    }
}
