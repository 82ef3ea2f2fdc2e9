//! Emitters: schema tree + registry → declaration source text.
//!
//! Every emitter renders the root declaration first and then each registry
//! entry in discovery order. Parents may reference children declared later in
//! the file; all targets resolve type names at file scope.
pub mod class;
pub mod go;
pub mod java;
pub mod typescript;

use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::inference::Nesting;
use crate::schema::{Field, NamedObjectRegistry, SchemaNode};

pub use class::{ClassDialect, ClassEmitter};
pub use go::GoEmitter;
pub use java::{Java, JavaEmitter};
pub use typescript::{TypeScript, TypeScriptEmitter};

/// A code generation backend.
pub trait Emitter {
    /// Short identifier, e.g. "go".
    fn name(&self) -> &'static str;

    /// File extension of the generated source.
    fn extension(&self) -> &'static str;

    /// How nested objects must be inferred for this target.
    fn nesting(&self) -> Nesting;

    fn emit(&self, root: &SchemaNode, registry: &NamedObjectRegistry, root_name: &str) -> Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Go,
    Java,
    TypeScript,
}

impl Target {
    pub const ALL: [Target; 3] = [Target::Go, Target::Java, Target::TypeScript];

    pub fn emitter(self, options: &crate::GenerateOptions) -> Box<dyn Emitter> {
        match self {
            Target::Go => Box::new(GoEmitter {
                package: options.go_package.clone(),
                with_examples: options.with_examples,
                format: options.format,
            }),
            Target::Java => Box::new(JavaEmitter::default()),
            Target::TypeScript => Box::new(TypeScriptEmitter::default()),
        }
    }

    /// Where the generated file conventionally lives inside a project.
    pub fn default_destination(self, root_name: &str) -> PathBuf {
        match self {
            Target::Go => PathBuf::from("vendor/configd/structs.go"),
            Target::Java => PathBuf::from(format!("app/settings/{root_name}.java")),
            Target::TypeScript => PathBuf::from("configd/c.ts"),
        }
    }
}

/// Fields of the root declaration and whether the document root is an array.
pub(crate) fn root_fields(root: &SchemaNode) -> Result<(&[Field], bool)> {
    match root {
        SchemaNode::Object(obj) => Ok((&obj.fields, false)),
        SchemaNode::Array { element } => match element.as_ref() {
            SchemaNode::Object(obj) => Ok((&obj.fields, true)),
            _ => Err(Error::RootShape { found: "array of non-objects" }),
        },
        SchemaNode::Scalar { .. } => Err(Error::RootShape { found: "scalar" }),
    }
}
