use super::class::{ClassDialect, ClassEmitter, ClassTemplates};
use crate::schema::ScalarKind;
use crate::template::{TS_ACCESSORS, TS_ARRAY_ACCESSORS, TS_CLASS_OPEN, TS_HEADER};

pub type TypeScriptEmitter = ClassEmitter<TypeScript>;

// strict-mode reserved words; members double as setter parameters
const TS_RESERVED: &[&str] = &[
    "arguments", "break", "case", "catch", "class", "const", "continue", "debugger", "default",
    "delete", "do", "else", "enum", "eval", "export", "extends", "false", "finally", "for",
    "function", "if", "implements", "import", "in", "instanceof", "interface", "let", "new",
    "null", "package", "private", "protected", "public", "return", "static", "super", "switch",
    "this", "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield",
];

/// TypeScript module of exported classes. Every member gets a default value.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeScript;

impl ClassDialect for TypeScript {
    fn name(&self) -> &'static str {
        "typescript"
    }

    fn extension(&self) -> &'static str {
        "ts"
    }

    fn templates(&self) -> ClassTemplates {
        ClassTemplates {
            header: TS_HEADER,
            class_open: TS_CLASS_OPEN,
            accessors: TS_ACCESSORS,
            array_accessors: TS_ARRAY_ACCESSORS,
        }
    }

    fn scalar_type(&self, kind: ScalarKind) -> &'static str {
        match kind {
            ScalarKind::String | ScalarKind::Timestamp | ScalarKind::IpAddr => "string",
            ScalarKind::Int64 | ScalarKind::Float64 => "number",
            ScalarKind::Bool => "boolean",
            ScalarKind::Any => "any",
        }
    }

    fn array_literal(&self, items: &[String]) -> String {
        format!("[{}]", items.join(", "))
    }

    fn non_finite_literal(&self, f: f64) -> String {
        if f.is_nan() {
            "NaN"
        } else if f.is_sign_positive() {
            "Infinity"
        } else {
            "-Infinity"
        }
        .to_string()
    }

    fn reserved_words(&self) -> &'static [&'static str] {
        TS_RESERVED
    }

    fn nested_default(&self, type_name: &str) -> Option<String> {
        Some(format!("new {type_name}()"))
    }

    fn array_init(&self, _element: &str, _len: usize) -> String {
        "[]".to_string()
    }

    fn new_object(&self, type_name: &str, var: &str) -> String {
        format!("const {var} = new {type_name}();")
    }

    fn store(&self, var: &str, _index: usize) -> String {
        format!("v.push({var});")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codegen::Emitter;
    use crate::inference::{InferOptions, Nesting, infer};
    use serde_json::{Value, json};

    fn emit(v: Value) -> String {
        let opts = InferOptions { nesting: Nesting::Named, ..InferOptions::default() };
        let (root, reg) = infer(&v, "Config", opts).unwrap();
        TypeScriptEmitter::default().emit(&root, &reg, "Config").unwrap()
    }

    #[test]
    fn header_has_no_package() {
        let out = emit(json!({"name": "svc"}));
        assert!(out.starts_with("// File generated by configd.\n\nexport class Config {\n"), "{out}");
        assert!(!out.contains("package"));
    }

    #[test]
    fn scalar_members() {
        let out = emit(json!({"id": 7, "ratio": 0.5, "on": false, "port": "8080", "any": null}));
        assert!(out.contains("    private iD: number = 7;\n"), "{out}");
        assert!(out.contains("    public getID(): number {\n        return this.iD;\n    }\n"), "{out}");
        assert!(out.contains("    public setID(iD: number) {\n        this.iD = iD;\n    }\n"), "{out}");
        assert!(out.contains("    private ratio: number = 0.5;\n"), "{out}");
        assert!(out.contains("    private on: boolean = false;\n"), "{out}");
        assert!(out.contains("    private port: number = 8080;\n"), "{out}");
        assert!(out.contains("    private any: any = null;\n"), "{out}");
    }

    #[test]
    fn arrays_and_nested_objects_have_defaults() {
        let out = emit(json!({"tags": ["x"], "db": {"host": "h"}}));
        assert!(out.contains("    private tags: string[] = [\"x\"];\n"), "{out}");
        assert!(out.contains("    private db: Db = new Db();\n"), "{out}");
        assert!(out.contains("\nexport class Db {\n"), "{out}");
    }

    #[test]
    fn object_arrays_get_generator() {
        let out = emit(json!({"servers": [{"host": "a"}]}));
        assert!(out.contains("    private servers: Servers[] = this.generateServersArray();\n"), "{out}");
        assert!(out.contains(
            "    private generateServersArray(): Servers[] {\n\
             \x20       const v: Servers[] = [];\n\
             \x20       const obj0 = new Servers();\n\
             \x20       obj0.setHost(\"a\");\n\
             \x20       v.push(obj0);\n\
             \x20       return v;\n\
             \x20   }\n"
        ), "{out}");
    }

    #[test]
    fn registry_classes_follow_root_in_order() {
        let out = emit(json!({"b": {"x": 1}, "a": [{"y": 2}]}));
        let root = out.find("export class Config").unwrap();
        let a = out.find("export class A {").unwrap();
        let b = out.find("export class B {").unwrap();
        assert!(root < a && a < b, "{out}");
    }
}
