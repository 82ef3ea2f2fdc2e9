//! Single-document schema inference.
//!
//! Walk one JSON value and build a [`SchemaNode`] tree plus the
//! [`NamedObjectRegistry`] of shapes that become standalone declarations.
//!
//! Rules that matter for the emitted code:
//! - Object keys are sorted byte-wise with `"id"` pinned first, at every level.
//! - Arrays are typed from their first element only. Mixed arrays are not
//!   reconciled.
//! - `[[x, ..], ..]` is typed as if the field held `x` directly (one ad hoc
//!   unwrap).
//! - String leaves are refined (timestamp, IP, quoted numbers/bools) unless
//!   refinement is switched off.
pub mod num;
pub mod str;

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{Error, Result, kind_name};
use crate::naming;
use crate::schema::{Field, NamedObjectRegistry, ObjectNode, ScalarKind, SchemaNode};

// ------------------------------- Policy ---------------------------------- //

/// How objects nested directly under a field are represented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nesting {
    /// Anonymous structure declared in place (struct-tag targets).
    Inline,
    /// Registered as its own declaration, named after the field (class targets).
    Named,
}

#[derive(Debug, Clone, Copy)]
pub struct InferOptions {
    pub nesting: Nesting,
    pub refine_strings: bool,
}

impl Default for InferOptions {
    fn default() -> Self {
        Self { nesting: Nesting::Inline, refine_strings: true }
    }
}

// ------------------------------ Ordering --------------------------------- //

/// Keys in emission order: byte-wise, except `"id"` always comes first.
pub fn sorted_keys(map: &Map<String, Value>) -> Vec<&str> {
    let mut keys: Vec<&str> = map.keys().map(String::as_str).collect();
    keys.sort_by(|a, b| match (*a == "id", *b == "id") {
        (true, false) => std::cmp::Ordering::Less,
        (false, true) => std::cmp::Ordering::Greater,
        _ => a.cmp(b),
    });
    keys
}

// ------------------------------ Front API -------------------------------- //

/// Infer the root shape of `value`. The root must be an object or an array
/// whose first element is an object; it is never added to the registry.
pub fn infer(
    value: &Value,
    root_name: &str,
    options: InferOptions,
) -> Result<(SchemaNode, NamedObjectRegistry)> {
    let mut inf = Inference::new(options);
    let root = inf.infer_root(value)?;
    debug!(
        root = root_name,
        named = inf.registry.len(),
        "inferred schema"
    );
    Ok((root, inf.registry))
}

pub struct Inference {
    options: InferOptions,
    registry: NamedObjectRegistry,
}

impl Inference {
    pub fn new(options: InferOptions) -> Self {
        Self { options, registry: NamedObjectRegistry::new() }
    }

    fn infer_root(&mut self, value: &Value) -> Result<SchemaNode> {
        match value {
            Value::Object(map) => Ok(SchemaNode::Object(ObjectNode {
                name: None,
                fields: self.infer_fields(map)?,
            })),
            Value::Array(xs) => match xs.first() {
                Some(Value::Object(map)) => Ok(SchemaNode::array_of(SchemaNode::Object(ObjectNode {
                    name: None,
                    fields: self.infer_fields(map)?,
                }))),
                Some(other) => Err(Error::RootShape { found: kind_name(other) }),
                None => Err(Error::RootShape { found: "empty array" }),
            },
            other => Err(Error::RootShape { found: kind_name(other) }),
        }
    }

    // ------------------------------ Observe ------------------------------ //

    fn infer_fields(&mut self, map: &Map<String, Value>) -> Result<Vec<Field>> {
        sorted_keys(map)
            .into_iter()
            .map(|key| self.infer_field(key, &map[key]))
            .collect()
    }

    fn infer_field(&mut self, key: &str, value: &Value) -> Result<Field> {
        let mut field = Field {
            key: key.to_string(),
            node: SchemaNode::scalar(ScalarKind::Any),
            example: Some(value.clone()),
            quoted: false,
        };
        match value {
            Value::Null => {}
            Value::Bool(_) => field.node = SchemaNode::scalar(ScalarKind::Bool),
            Value::Number(n) => field.node = SchemaNode::scalar(num::classify(n)),
            Value::String(s) => {
                let refined = if self.options.refine_strings {
                    str::refine(s)
                } else {
                    str::Refined { kind: ScalarKind::String, quoted: false }
                };
                field.node = SchemaNode::scalar(refined.kind);
                field.quoted = refined.quoted;
            }
            Value::Array(xs) => return self.infer_array_field(key, xs),
            Value::Object(map) => {
                field.node = match self.options.nesting {
                    Nesting::Inline => SchemaNode::Object(ObjectNode {
                        name: None,
                        fields: self.infer_fields(map)?,
                    }),
                    Nesting::Named => self.register(key, map)?,
                };
                field.example = None;
            }
        }
        Ok(field)
    }

    fn infer_array_field(&mut self, key: &str, xs: &[Value]) -> Result<Field> {
        let element = match xs.first() {
            None | Some(Value::Null) => SchemaNode::scalar(ScalarKind::Any),
            Some(Value::Bool(_)) => SchemaNode::scalar(ScalarKind::Bool),
            Some(Value::Number(n)) => SchemaNode::scalar(num::classify(n)),
            // slice elements can't carry the quoted marker, so no refinement
            Some(Value::String(_)) => SchemaNode::scalar(ScalarKind::String),
            Some(Value::Object(map)) => self.register(key, map)?,
            Some(Value::Array(inner)) => {
                let first = inner
                    .first()
                    .ok_or_else(|| Error::ShapeMismatch {
                        key: key.to_string(),
                        expected: "non-empty nested array",
                        found: "empty array",
                    })?;
                return self.infer_field(key, first);
            }
        };
        Ok(Field {
            key: key.to_string(),
            node: SchemaNode::array_of(element),
            example: Some(Value::Array(xs.to_vec())),
            quoted: false,
        })
    }

    /// Reserve the registry slot before descending so parents precede children.
    fn register(&mut self, key: &str, map: &Map<String, Value>) -> Result<SchemaNode> {
        let type_name = naming::normalize(key);
        let slot = self.registry.reserve(type_name.clone());
        debug!(key, type_name = %type_name, slot, "registered named object");
        let fields = self.infer_fields(map)?;
        self.registry.fill(slot, fields.clone());
        Ok(SchemaNode::Object(ObjectNode { name: Some(type_name), fields }))
    }
}

// ------------------------------- Tests ------------------------------------ //
