// Typed shape model shared by inference and every emitter. No codegen concerns here.
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScalarKind {
    String,
    Int64,
    Float64,
    Bool,
    Timestamp,
    #[serde(rename = "ip-address")]
    IpAddr,
    /// Nothing to go on (null leaf, empty array).
    #[serde(rename = "untyped-any")]
    Any,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SchemaNode {
    Scalar { scalar: ScalarKind },
    Array { element: Box<SchemaNode> },
    Object(ObjectNode),
}

/// An object shape. `name` is set when the shape is also a registry entry;
/// emitters then refer to it by name instead of inlining it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObjectNode {
    pub name: Option<String>,
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Field {
    /// Key exactly as it appeared in the document.
    pub key: String,
    pub node: SchemaNode,
    /// Raw value the shape was taken from. Whole array for array fields.
    pub example: Option<Value>,
    /// String leaf refined to int/float/bool; the wire form stays quoted.
    pub quoted: bool,
}

impl ScalarKind {
    pub fn describe(self) -> &'static str {
        match self {
            ScalarKind::String => "string",
            ScalarKind::Int64 => "int64",
            ScalarKind::Float64 => "float64",
            ScalarKind::Bool => "bool",
            ScalarKind::Timestamp => "timestamp",
            ScalarKind::IpAddr => "ip-address",
            ScalarKind::Any => "untyped-any",
        }
    }
}

impl SchemaNode {
    pub fn scalar(kind: ScalarKind) -> Self {
        SchemaNode::Scalar { scalar: kind }
    }

    pub fn array_of(element: SchemaNode) -> Self {
        SchemaNode::Array { element: Box::new(element) }
    }

    pub fn as_object(&self) -> Option<&ObjectNode> {
        match self {
            SchemaNode::Object(o) => Some(o),
            _ => None,
        }
    }
}

// ------------------------------ Registry ---------------------------------- //

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedObject {
    pub type_name: String,
    pub fields: Vec<Field>,
}

/// Object shapes promoted to standalone declarations, in discovery order.
///
/// A parent is [`reserve`](Self::reserve)d before its children are inferred and
/// [`fill`](Self::fill)ed afterwards, which keeps the order pre-order
/// depth-first. Entries are never reordered or deduplicated.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct NamedObjectRegistry {
    entries: Vec<NamedObject>,
}

impl NamedObjectRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn reserve(&mut self, type_name: String) -> usize {
        self.entries.push(NamedObject { type_name, fields: Vec::new() });
        self.entries.len() - 1
    }

    pub(crate) fn fill(&mut self, slot: usize, fields: Vec<Field>) {
        self.entries[slot].fields = fields;
    }

    pub fn iter(&self) -> impl Iterator<Item = &NamedObject> {
        self.entries.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.type_name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
