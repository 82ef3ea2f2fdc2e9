use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Everything that aborts a generation run.
#[derive(Debug, Error)]
pub enum Error {
    #[error("malformed JSON input at {path}: {message}")]
    Malformed { path: String, message: String },

    #[error("JSON pointer `{0}` does not select a value")]
    PointerNotFound(String),

    #[error("unsupported document root: expected an object or an array of objects, found {found}")]
    RootShape { found: &'static str },

    #[error("unexpected shape for `{key}`: expected {expected}, found {found}")]
    ShapeMismatch {
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    /// Built-in templates are constants, so this is always an internal bug.
    #[error("internal template `{name}` failed to render")]
    Template {
        name: &'static str,
        #[source]
        source: handlebars::RenderError,
    },
}

impl Error {
    pub(crate) fn mismatch(key: &str, expected: &'static str, found: &serde_json::Value) -> Self {
        Error::ShapeMismatch {
            key: key.to_string(),
            expected,
            found: kind_name(found),
        }
    }
}

/// Human name of a JSON value's kind, for diagnostics.
pub fn kind_name(value: &serde_json::Value) -> &'static str {
    use serde_json::Value;
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(xs) if xs.is_empty() => "empty array",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
