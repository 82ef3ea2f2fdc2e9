//! Shared driver for class-with-accessors targets.
//!
//! Each field becomes a private member with a public getter/setter pair and,
//! where the sampled value allows, a literal initializer. Arrays of named
//! objects are filled by a generated `generate<Name>Array()` method that
//! replays the raw array through the setters. A [`ClassDialect`] supplies the
//! language-specific tokens.
//!
//! Member names that collide with a reserved word get a trailing `_`; the
//! accessor names keep the plain `get<Name>`/`set<Name>` form.
use serde::Serialize;
use serde_json::{Number, Value};
use tracing::debug;

use super::{Emitter, root_fields};
use crate::error::{Error, Result};
use crate::inference::{Nesting, num, str::parse_bool};
use crate::naming;
use crate::schema::{Field, NamedObjectRegistry, ObjectNode, ScalarKind, SchemaNode};
use crate::template;

/// Emitted instead of an assignment for object/array members of array elements.
pub const NESTED_PLACEHOLDER: &str = "// nested maps are not supported";

#[derive(Debug, Clone, Copy)]
pub struct ClassTemplates {
    pub header: &'static str,
    pub class_open: &'static str,
    pub accessors: &'static str,
    pub array_accessors: &'static str,
}

pub trait ClassDialect {
    fn name(&self) -> &'static str;
    fn extension(&self) -> &'static str;
    fn templates(&self) -> ClassTemplates;

    /// Package clause for the header, if the language has one.
    fn package(&self) -> Option<&str> {
        None
    }

    fn scalar_type(&self, kind: ScalarKind) -> &'static str;

    fn array_type(&self, element: &str) -> String {
        format!("{element}[]")
    }

    fn array_literal(&self, items: &[String]) -> String;

    fn int_literal(&self, n: i64) -> String {
        n.to_string()
    }

    /// Spelling of NaN and the infinities.
    fn non_finite_literal(&self, f: f64) -> String;

    /// Words that cannot name a member or a parameter.
    fn reserved_words(&self) -> &'static [&'static str];

    /// Initializer for a member holding a named object, if any.
    fn nested_default(&self, type_name: &str) -> Option<String>;

    /// Right-hand side of `v = ...` in an array generator.
    fn array_init(&self, element: &str, len: usize) -> String;

    /// Statement declaring `var` as a fresh `type_name`.
    fn new_object(&self, type_name: &str, var: &str) -> String;

    /// Statement storing `var` at `index` of the generated array `v`.
    fn store(&self, var: &str, index: usize) -> String;
}

#[derive(Debug, Clone, Default)]
pub struct ClassEmitter<D> {
    pub dialect: D,
}

impl<D: ClassDialect> ClassEmitter<D> {
    pub fn new(dialect: D) -> Self {
        Self { dialect }
    }
}

#[derive(Serialize)]
struct Header<'a> {
    name: &'a str,
    is_array: bool,
    package: Option<&'a str>,
}

#[derive(Serialize)]
struct ClassOpen<'a> {
    name: &'a str,
}

#[derive(Serialize)]
struct Accessors<'a> {
    #[serde(rename = "type")]
    ty: &'a str,
    field: &'a str,
    name: &'a str,
    value: Option<String>,
}

#[derive(Serialize)]
struct ArrayAccessors<'a> {
    #[serde(rename = "type")]
    ty: &'a str,
    field: &'a str,
    name: &'a str,
    init: String,
    statements: Vec<String>,
}

impl<D: ClassDialect> Emitter for ClassEmitter<D> {
    fn name(&self) -> &'static str {
        self.dialect.name()
    }

    fn extension(&self) -> &'static str {
        self.dialect.extension()
    }

    fn nesting(&self) -> Nesting {
        Nesting::Named
    }

    fn emit(&self, root: &SchemaNode, registry: &NamedObjectRegistry, root_name: &str) -> Result<String> {
        let templates = self.dialect.templates();
        let (fields, is_array) = root_fields(root)?;

        let mut out = template::render(
            templates.header,
            &Header { name: root_name, is_array, package: self.dialect.package() },
        )?;
        self.write_members(&mut out, fields)?;
        out.push_str("}\n");

        for entry in registry.iter() {
            out.push_str(&template::render(templates.class_open, &ClassOpen { name: &entry.type_name })?);
            self.write_members(&mut out, &entry.fields)?;
            out.push_str("}\n");
        }
        debug!(target_lang = self.dialect.name(), classes = registry.len() + 1, "emitted classes");
        Ok(out)
    }
}

impl<D: ClassDialect> ClassEmitter<D> {
    fn write_members(&self, out: &mut String, fields: &[Field]) -> Result<()> {
        let templates = self.dialect.templates();
        for field in fields {
            let name = naming::normalize(&field.key);
            let member = self.member_name(&name);
            let example = field.example.as_ref().unwrap_or(&Value::Null);

            match &field.node {
                SchemaNode::Scalar { scalar } => {
                    let value = self.literal(*scalar, example, &field.key, field.quoted)?;
                    out.push_str(&template::render(
                        templates.accessors,
                        &Accessors { ty: self.dialect.scalar_type(*scalar), field: &member, name: &name, value: Some(value) },
                    )?);
                }
                SchemaNode::Array { element } => {
                    let items = example.as_array().map(Vec::as_slice).unwrap_or_default();
                    match element.as_ref() {
                        SchemaNode::Scalar { scalar } => {
                            let ty = self.dialect.array_type(self.dialect.scalar_type(*scalar));
                            let literals = items
                                .iter()
                                .map(|x| self.literal(*scalar, x, &field.key, false))
                                .collect::<Result<Vec<_>>>()?;
                            out.push_str(&template::render(
                                templates.accessors,
                                &Accessors {
                                    ty: &ty,
                                    field: &member,
                                    name: &name,
                                    value: Some(self.dialect.array_literal(&literals)),
                                },
                            )?);
                        }
                        SchemaNode::Object(ObjectNode { name: Some(type_name), fields: element_fields }) => {
                            let ty = self.dialect.array_type(type_name);
                            out.push_str(&template::render(
                                templates.array_accessors,
                                &ArrayAccessors {
                                    ty: &ty,
                                    field: &member,
                                    name: &name,
                                    init: self.dialect.array_init(type_name, items.len()),
                                    statements: self.array_statements(type_name, &field.key, items, element_fields)?,
                                },
                            )?);
                        }
                        SchemaNode::Object(ObjectNode { name: None, .. }) => {
                            return Err(Error::ShapeMismatch {
                                key: field.key.clone(),
                                expected: "array of named objects",
                                found: "array of anonymous objects",
                            });
                        }
                        SchemaNode::Array { .. } => {
                            return Err(Error::ShapeMismatch {
                                key: field.key.clone(),
                                expected: "array of scalars or objects",
                                found: "nested array",
                            });
                        }
                    }
                }
                SchemaNode::Object(ObjectNode { name: Some(type_name), .. }) => {
                    out.push_str(&template::render(
                        templates.accessors,
                        &Accessors {
                            ty: type_name,
                            field: &member,
                            name: &name,
                            value: self.dialect.nested_default(type_name),
                        },
                    )?);
                }
                SchemaNode::Object(ObjectNode { name: None, .. }) => {
                    return Err(Error::ShapeMismatch {
                        key: field.key.clone(),
                        expected: "named object",
                        found: "anonymous object",
                    });
                }
            }
        }
        Ok(())
    }

    fn member_name(&self, name: &str) -> String {
        let mut member = naming::lower_first(name);
        if self.dialect.reserved_words().contains(&member.as_str()) {
            member.push('_');
        }
        member
    }

    /// One block per raw element: construct, assign each scalar member present
    /// through its setter, store.
    fn array_statements(
        &self,
        type_name: &str,
        key: &str,
        items: &[Value],
        fields: &[Field],
    ) -> Result<Vec<String>> {
        let mut statements = Vec::new();
        for (i, item) in items.iter().enumerate() {
            let Value::Object(map) = item else {
                return Err(Error::mismatch(key, "object", item));
            };
            let var = format!("obj{i}");
            statements.push(self.dialect.new_object(type_name, &var));

            for field in fields {
                let Some(value) = map.get(&field.key) else {
                    continue;
                };
                match &field.node {
                    SchemaNode::Scalar { scalar } => {
                        if value.is_null() && !is_reference(*scalar) {
                            debug!(key, member = %field.key, index = i, "null for primitive member skipped");
                            continue;
                        }
                        let literal = self.literal(*scalar, value, &field.key, field.quoted)?;
                        statements.push(format!("{var}.set{}({literal});", naming::normalize(&field.key)));
                    }
                    _ => statements.push(NESTED_PLACEHOLDER.to_string()),
                }
            }
            for extra in map.keys().filter(|k| !fields.iter().any(|f| &f.key == *k)) {
                debug!(key, member = %extra, index = i, "member absent from first element skipped");
            }

            statements.push(self.dialect.store(&var, i));
        }
        Ok(statements)
    }

    /// Source literal for `value` as a `kind`. `quoted` accepts the string
    /// spelling of numbers and booleans.
    fn literal(&self, kind: ScalarKind, value: &Value, key: &str, quoted: bool) -> Result<String> {
        let mismatch = || Error::mismatch(key, kind.describe(), value);
        match (kind, value) {
            (_, Value::Null) if is_reference(kind) => Ok("null".to_string()),

            (ScalarKind::Int64, Value::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| num::is_whole_i64(*f)).map(|f| f as i64))
                .map(|i| self.dialect.int_literal(i))
                .ok_or_else(mismatch),
            (ScalarKind::Int64, Value::String(s)) if quoted => {
                s.parse::<i64>().map(|i| self.dialect.int_literal(i)).map_err(|_| mismatch())
            }

            (ScalarKind::Float64, Value::Number(n)) => Ok(float_literal(n)),
            (ScalarKind::Float64, Value::String(s)) if quoted => match s.parse::<f64>() {
                Ok(f) if f.is_finite() => Ok(format!("{f:?}")),
                Ok(f) => Ok(self.dialect.non_finite_literal(f)),
                Err(_) => Err(mismatch()),
            },

            (ScalarKind::Bool, Value::Bool(b)) => Ok(b.to_string()),
            (ScalarKind::Bool, Value::String(s)) if quoted => {
                parse_bool(s).map(|b| b.to_string()).ok_or_else(mismatch)
            }

            (ScalarKind::String | ScalarKind::Timestamp | ScalarKind::IpAddr | ScalarKind::Any, Value::String(_)) => {
                Ok(value.to_string())
            }
            (ScalarKind::Any, Value::Number(_) | Value::Bool(_)) => Ok(value.to_string()),

            _ => Err(mismatch()),
        }
    }
}

/// Kinds whose target type is nullable.
fn is_reference(kind: ScalarKind) -> bool {
    matches!(
        kind,
        ScalarKind::String | ScalarKind::Timestamp | ScalarKind::IpAddr | ScalarKind::Any
    )
}

/// JSON number as a floating point literal; always carries a `.` or exponent.
fn float_literal(n: &Number) -> String {
    let text = n.to_string();
    if text.contains(['.', 'e', 'E']) {
        text
    } else {
        format!("{text}.0")
    }
}
