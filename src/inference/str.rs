use std::net::IpAddr;

use chrono::DateTime;

use crate::schema::ScalarKind;

/// Outcome of refining one string leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Refined {
    pub kind: ScalarKind,
    /// The value is a number/bool written as a string.
    pub quoted: bool,
}

impl Refined {
    const fn plain(kind: ScalarKind) -> Self {
        Self { kind, quoted: false }
    }
    const fn quoted(kind: ScalarKind) -> Self {
        Self { kind, quoted: true }
    }
}

/// Upgrade a string to a more specific kind. First match wins:
/// timestamp → IP → integer → float → bool → string.
///
/// "42" therefore never reaches the bool check, and "1"/"0" are integers.
pub fn refine(s: &str) -> Refined {
    if looks_like_timestamp(s) {
        Refined::plain(ScalarKind::Timestamp)
    } else if s.parse::<IpAddr>().is_ok() {
        Refined::plain(ScalarKind::IpAddr)
    } else if s.parse::<i64>().is_ok() {
        Refined::quoted(ScalarKind::Int64)
    } else if s.parse::<f64>().is_ok() {
        Refined::quoted(ScalarKind::Float64)
    } else if parse_bool(s).is_some() {
        Refined::quoted(ScalarKind::Bool)
    } else {
        Refined::plain(ScalarKind::String)
    }
}

/// RFC3339 with an upper-case `T` separator and `Z` zone, the form Go's
/// `time.Time` decodes. chrono alone also takes a space or lower case.
pub fn looks_like_timestamp(s: &str) -> bool {
    s.as_bytes().get(10) == Some(&b'T') && !s.ends_with('z') && DateTime::parse_from_rfc3339(s).is_ok()
}

/// The spellings config services emit for booleans, including the
/// single-letter and upper-case forms.
pub fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}
