//! Boilerplate templates shared by the emitters.
//!
//! All templates are program constants, registered once into a process-wide
//! registry on first use. Escaping is off (the output is source code, not
//! HTML) and strict mode is on, so a payload missing a field is an error
//! instead of an empty substitution.
use handlebars::Handlebars;
use once_cell::sync::Lazy;
use serde::Serialize;

use crate::error::{Error, Result};

// ————————————————————————————————————————————————————————————————————————————
// GO
// ————————————————————————————————————————————————————————————————————————————

pub const GO_PREAMBLE: &str = "go.preamble";
pub const GO_STRUCT_OPEN: &str = "go.struct_open";

// Block tags never sit alone on a line, so no standalone-whitespace rules apply.
const GO_PREAMBLE_SRC: &str = "// Code generated by configd. DO NOT EDIT.\n\npackage {{package}}\n\n\
{{#if imports}}import (\n{{#each imports}}\t\"{{this}}\"\n{{/each}})\n\n{{/if}}";

const GO_STRUCT_OPEN_SRC: &str = "type {{name}} {{#if is_array}}[]{{/if}}struct {\n";

// ————————————————————————————————————————————————————————————————————————————
// JAVA
// ————————————————————————————————————————————————————————————————————————————

pub const JAVA_HEADER: &str = "java.header";
pub const JAVA_CLASS_OPEN: &str = "java.class_open";
pub const JAVA_ACCESSORS: &str = "java.accessors";
pub const JAVA_ARRAY_ACCESSORS: &str = "java.array_accessors";

const JAVA_HEADER_SRC: &str = r#"// File generated by configd.
package {{package}};

{{#if is_array}}// NOTE: use as an array
{{/if}}public class {{name}} {
"#;

const JAVA_CLASS_OPEN_SRC: &str = "\nclass {{name}} {\n";

const JAVA_ACCESSORS_SRC: &str = r#"
    private {{type}} {{field}}{{#if value}} = {{value}}{{/if}};

    public {{type}} get{{name}}() {
        return {{field}};
    }

    public void set{{name}}({{type}} {{field}}) {
        this.{{field}} = {{field}};
    }
"#;

const JAVA_ARRAY_ACCESSORS_SRC: &str = r#"
    private {{type}} {{field}} = generate{{name}}Array();

    public {{type}} get{{name}}() {
        return {{field}};
    }

    public void set{{name}}({{type}} {{field}}) {
        this.{{field}} = {{field}};
    }

    private static {{type}} generate{{name}}Array() {
        {{type}} v = {{init}};
{{#each statements}}        {{this}}
{{/each}}        return v;
    }
"#;

// ————————————————————————————————————————————————————————————————————————————
// TYPESCRIPT
// ————————————————————————————————————————————————————————————————————————————

pub const TS_HEADER: &str = "typescript.header";
pub const TS_CLASS_OPEN: &str = "typescript.class_open";
pub const TS_ACCESSORS: &str = "typescript.accessors";
pub const TS_ARRAY_ACCESSORS: &str = "typescript.array_accessors";

const TS_HEADER_SRC: &str = r#"// File generated by configd.

{{#if is_array}}// NOTE: use as an array
{{/if}}export class {{name}} {
"#;

const TS_CLASS_OPEN_SRC: &str = "\nexport class {{name}} {\n";

const TS_ACCESSORS_SRC: &str = r#"
    private {{field}}: {{type}}{{#if value}} = {{value}}{{/if}};

    public get{{name}}(): {{type}} {
        return this.{{field}};
    }

    public set{{name}}({{field}}: {{type}}) {
        this.{{field}} = {{field}};
    }
"#;

const TS_ARRAY_ACCESSORS_SRC: &str = r#"
    private {{field}}: {{type}} = this.generate{{name}}Array();

    public get{{name}}(): {{type}} {
        return this.{{field}};
    }

    public set{{name}}({{field}}: {{type}}) {
        this.{{field}} = {{field}};
    }

    private generate{{name}}Array(): {{type}} {
        const v: {{type}} = {{init}};
{{#each statements}}        {{this}}
{{/each}}        return v;
    }
"#;

// ————————————————————————————————————————————————————————————————————————————
// REGISTRY
// ————————————————————————————————————————————————————————————————————————————

const TEMPLATES: &[(&str, &str)] = &[
    (GO_PREAMBLE, GO_PREAMBLE_SRC),
    (GO_STRUCT_OPEN, GO_STRUCT_OPEN_SRC),
    (JAVA_HEADER, JAVA_HEADER_SRC),
    (JAVA_CLASS_OPEN, JAVA_CLASS_OPEN_SRC),
    (JAVA_ACCESSORS, JAVA_ACCESSORS_SRC),
    (JAVA_ARRAY_ACCESSORS, JAVA_ARRAY_ACCESSORS_SRC),
    (TS_HEADER, TS_HEADER_SRC),
    (TS_CLASS_OPEN, TS_CLASS_OPEN_SRC),
    (TS_ACCESSORS, TS_ACCESSORS_SRC),
    (TS_ARRAY_ACCESSORS, TS_ARRAY_ACCESSORS_SRC),
];

static REGISTRY: Lazy<Handlebars<'static>> = Lazy::new(|| {
    let mut hb = Handlebars::new();
    hb.register_escape_fn(handlebars::no_escape);
    hb.set_strict_mode(true);
    for (name, src) in TEMPLATES {
        hb.register_template_string(name, src)
            .unwrap_or_else(|err| panic!("built-in template `{name}` does not parse: {err}"));
    }
    hb
});

/// Render a built-in template.
pub fn render<T: Serialize>(name: &'static str, payload: &T) -> Result<String> {
    REGISTRY
        .render(name, payload)
        .map_err(|source| Error::Template { name, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn all_templates_register() {
        for (name, _) in TEMPLATES {
            assert!(REGISTRY.get_template(name).is_some(), "{name}");
        }
    }

    #[test]
    fn go_struct_open() {
        let s = render(GO_STRUCT_OPEN, &json!({"name": "Config", "is_array": false})).unwrap();
        assert_eq!(s, "type Config struct {\n");
        let s = render(GO_STRUCT_OPEN, &json!({"name": "Config", "is_array": true})).unwrap();
        assert_eq!(s, "type Config []struct {\n");
    }

    #[test]
    fn go_preamble_imports_only_when_needed() {
        let s = render(GO_PREAMBLE, &json!({"package": "configd", "imports": []})).unwrap();
        assert_eq!(s, "// Code generated by configd. DO NOT EDIT.\n\npackage configd\n\n");
        let s = render(GO_PREAMBLE, &json!({"package": "configd", "imports": ["net", "time"]})).unwrap();
        assert_eq!(
            s,
            "// Code generated by configd. DO NOT EDIT.\n\npackage configd\n\nimport (\n\t\"net\"\n\t\"time\"\n)\n\n"
        );
    }

    #[test]
    fn values_are_not_html_escaped() {
        let s = render(
            TS_ACCESSORS,
            &json!({"type": "string", "field": "name", "name": "Name", "value": "\"a<b>&c\""}),
        )
        .unwrap();
        assert!(s.contains("private name: string = \"a<b>&c\";"), "{s}");
    }

    #[test]
    fn missing_value_omits_initializer() {
        let s = render(
            JAVA_ACCESSORS,
            &json!({"type": "Db", "field": "db", "name": "Db", "value": null}),
        )
        .unwrap();
        assert!(s.contains("    private Db db;\n"), "{s}");
        assert!(s.contains("public void setDb(Db db) {"));
    }

    #[test]
    fn array_statements_are_indented() {
        let s = render(
            TS_ARRAY_ACCESSORS,
            &json!({
                "type": "Item[]", "field": "items", "name": "Items", "init": "[]",
                "statements": ["const obj0 = new Item();", "v.push(obj0);"]
            }),
        )
        .unwrap();
        assert!(s.contains(
            "        const v: Item[] = [];\n        const obj0 = new Item();\n        v.push(obj0);\n        return v;\n"
        ), "{s}");
    }

    #[test]
    fn strict_mode_rejects_missing_fields() {
        let err = render(GO_STRUCT_OPEN, &json!({"is_array": false})).unwrap_err();
        assert!(matches!(err, Error::Template { name: GO_STRUCT_OPEN, .. }));
    }
}
