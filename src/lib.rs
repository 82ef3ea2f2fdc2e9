//! Generate typed configuration declarations from a sample JSON document.
//!
//! ```text
//! bytes ─ parse ─ select ─ infer ─┬─ Go struct tags
//!                                 ├─ Java classes
//!                                 └─ TypeScript classes
//! ```
pub mod cli;
pub mod codegen;
pub mod document;
pub mod error;
pub mod format;
pub mod inference;
pub mod naming;
pub mod schema;
pub mod template;

use serde::Serialize;
use serde_json::Value;
use tracing::debug;

pub use codegen::{Emitter, Target};
pub use error::{Error, Result};
use inference::{InferOptions, Nesting};
use schema::{NamedObjectRegistry, SchemaNode};

/// Knobs shared by every target. Go-only settings are ignored elsewhere.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Root declaration name; normalized, `"Config"` when absent.
    pub root_name: Option<String>,
    /// RFC 6901 pointer to the sub-document to model.
    pub json_pointer: Option<String>,
    /// Refine string leaves into timestamps, IPs and quoted numbers/bools.
    pub refine_strings: bool,
    pub with_examples: bool,
    pub format: bool,
    pub go_package: Option<String>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            root_name: None,
            json_pointer: None,
            refine_strings: true,
            with_examples: true,
            format: true,
            go_package: None,
        }
    }
}

/// Parse `bytes` and render declarations for `target`.
pub fn generate(bytes: &[u8], target: Target, options: &GenerateOptions) -> Result<String> {
    let value = load(bytes, options)?;
    generate_from_value(&value, target, options)
}

/// Same as [`generate`] for an already decoded (and selected) document.
pub fn generate_from_value(value: &Value, target: Target, options: &GenerateOptions) -> Result<String> {
    let emitter = target.emitter(options);
    let root_name = naming::root_name(options.root_name.as_deref());
    let (root, registry) = inference::infer(value, &root_name, infer_options(emitter.nesting(), options))?;
    let source = emitter.emit(&root, &registry, &root_name)?;
    debug!(target_lang = emitter.name(), len = source.len(), "generated source");
    Ok(source)
}

/// Inferred model, serialized by the `schema` command for debugging.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaView {
    pub root_name: String,
    pub root: SchemaNode,
    pub registry: NamedObjectRegistry,
}

pub fn infer_schema(bytes: &[u8], nesting: Nesting, options: &GenerateOptions) -> Result<SchemaView> {
    let value = load(bytes, options)?;
    let root_name = naming::root_name(options.root_name.as_deref());
    let (root, registry) = inference::infer(&value, &root_name, infer_options(nesting, options))?;
    Ok(SchemaView { root_name, root, registry })
}

fn load(bytes: &[u8], options: &GenerateOptions) -> Result<Value> {
    let document = document::parse_document(bytes)?;
    document::select(document, options.json_pointer.as_deref())
}

fn infer_options(nesting: Nesting, options: &GenerateOptions) -> InferOptions {
    InferOptions { nesting, refine_strings: options.refine_strings }
}
