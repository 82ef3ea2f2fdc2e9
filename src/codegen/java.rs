use super::class::{ClassDialect, ClassEmitter, ClassTemplates};
use crate::schema::ScalarKind;
use crate::template::{JAVA_ACCESSORS, JAVA_ARRAY_ACCESSORS, JAVA_CLASS_OPEN, JAVA_HEADER};

pub type JavaEmitter = ClassEmitter<Java>;

const JAVA_RESERVED: &[&str] = &[
    "_", "abstract", "assert", "boolean", "break", "byte", "case", "catch", "char", "class", "const",
    "continue", "default", "do", "double", "else", "enum", "extends", "false", "final", "finally",
    "float", "for", "goto", "if", "implements", "import", "instanceof", "int", "interface", "long",
    "native", "new", "null", "package", "private", "protected", "public", "return", "short",
    "static", "strictfp", "super", "switch", "synchronized", "this", "throw", "throws",
    "transient", "true", "try", "void", "volatile", "while",
];

/// Java source: `public class <Root>` plus package-private classes for every
/// registered shape, all in one compilation unit.
#[derive(Debug, Clone)]
pub struct Java {
    pub package: String,
}

impl Default for Java {
    fn default() -> Self {
        Self { package: "app.settings".to_string() }
    }
}

impl ClassDialect for Java {
    fn name(&self) -> &'static str {
        "java"
    }

    fn extension(&self) -> &'static str {
        "java"
    }

    fn templates(&self) -> ClassTemplates {
        ClassTemplates {
            header: JAVA_HEADER,
            class_open: JAVA_CLASS_OPEN,
            accessors: JAVA_ACCESSORS,
            array_accessors: JAVA_ARRAY_ACCESSORS,
        }
    }

    fn package(&self) -> Option<&str> {
        Some(&self.package)
    }

    fn scalar_type(&self, kind: ScalarKind) -> &'static str {
        match kind {
            ScalarKind::String | ScalarKind::Timestamp | ScalarKind::IpAddr => "String",
            ScalarKind::Int64 => "long",
            ScalarKind::Float64 => "double",
            ScalarKind::Bool => "boolean",
            ScalarKind::Any => "Object",
        }
    }

    fn array_literal(&self, items: &[String]) -> String {
        format!("{{{}}}", items.join(", "))
    }

    fn int_literal(&self, n: i64) -> String {
        format!("{n}L")
    }

    fn non_finite_literal(&self, f: f64) -> String {
        if f.is_nan() {
            "Double.NaN"
        } else if f.is_sign_positive() {
            "Double.POSITIVE_INFINITY"
        } else {
            "Double.NEGATIVE_INFINITY"
        }
        .to_string()
    }

    fn reserved_words(&self) -> &'static [&'static str] {
        JAVA_RESERVED
    }

    fn nested_default(&self, _type_name: &str) -> Option<String> {
        None
    }

    fn array_init(&self, element: &str, len: usize) -> String {
        format!("new {element}[{len}]")
    }

    fn new_object(&self, type_name: &str, var: &str) -> String {
        format!("{type_name} {var} = new {type_name}();")
    }

    fn store(&self, var: &str, index: usize) -> String {
        format!("v[{index}] = {var};")
    }
}
