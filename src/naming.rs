//! JSON keys → declaration identifiers.
//!
//! | raw key      | [`normalize`]  | [`lower_first`] |
//! |--------------|----------------|-----------------|
//! | `user_id`    | `UserID`       | `userID`        |
//! | `avatar-url` | `AvatarURL`    | `avatarURL`     |
//! | `2fa_code`   | `_2faCode`     | `_2faCode`      |
//!
//! The acronym pass is a plain substring replacement, so `identity` becomes
//! `IDentity`. Existing generated code depends on these names.
use once_cell::sync::Lazy;
use regex::Regex;

/// Name used for the root declaration when the caller supplies none.
pub const DEFAULT_ROOT_NAME: &str = "Config";

static NOT_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\p{L}\p{N}]+").expect("static regex"));
static STARTS_LIKE_IDENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\p{L}_]").expect("static regex"));

const ACRONYMS: [(&str, &str); 3] = [("Url", "URL"), ("Uri", "URI"), ("Id", "ID")];

/// Map an arbitrary JSON key to a CamelCase identifier.
pub fn normalize(raw: &str) -> String {
    let mut out: String = NOT_WORD
        .split(raw)
        .filter(|segment| !segment.is_empty())
        .map(upper_first)
        .collect();

    for (from, to) in ACRONYMS {
        out = out.replace(from, to);
    }

    if !STARTS_LIKE_IDENT.is_match(raw) {
        out.insert(0, '_');
    }
    out
}

/// Root declaration name: normalized, defaulting to [`DEFAULT_ROOT_NAME`].
pub fn root_name(requested: Option<&str>) -> String {
    match requested.map(str::trim) {
        Some(name) if !name.is_empty() => normalize(name),
        _ => DEFAULT_ROOT_NAME.to_string(),
    }
}

/// Lower-first variant used for private fields and locals.
pub fn lower_first(ident: &str) -> String {
    let mut chars = ident.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_lowercase().chain(chars).collect(),
    }
}

fn upper_first(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

#[cfg(test)]
mod tests {
    #![allow(non_snake_case)]

    use super::*;

    #[test]
    fn normalize___snake_and_kebab_keys() {
        assert_eq!(normalize("user_id"), "UserID");
        assert_eq!(normalize("first-name"), "FirstName");
        assert_eq!(normalize("a.b c"), "ABC");
    }

    #[test]
    fn normalize___keeps_inner_case() {
        assert_eq!(normalize("userName"), "UserName");
        assert_eq!(normalize("HTTPServer"), "HTTPServer");
    }

    #[test]
    fn normalize___acronyms_in_order() {
        assert_eq!(normalize("avatar_url"), "AvatarURL");
        assert_eq!(normalize("redirect_uri"), "RedirectURI");
        assert_eq!(normalize("id"), "ID");
    }

    #[test]
    fn normalize___acronym_replacement_is_not_boundary_aware() {
        assert_eq!(normalize("identity"), "IDentity");
        assert_eq!(normalize("uri_list"), "URIList");
    }

    #[test]
    fn normalize___digit_start_gets_underscore() {
        assert_eq!(normalize("2fa_code"), "_2faCode");
        assert_eq!(normalize("404"), "_404");
    }

    #[test]
    fn normalize___underscore_and_symbol_starts() {
        // '_' is a separator, but it is a legal first character
        assert_eq!(normalize("_private"), "Private");
        assert_eq!(normalize("$ref"), "_Ref");
        assert_eq!(normalize(""), "_");
    }

    #[test]
    fn normalize___unicode_letters_survive() {
        assert_eq!(normalize("größe"), "Größe");
        assert_eq!(normalize("ünits_total"), "ÜnitsTotal");
    }

    #[test]
    fn lower_first___only_first_char() {
        assert_eq!(lower_first("UserID"), "userID");
        assert_eq!(lower_first("_2faCode"), "_2faCode");
        assert_eq!(lower_first(""), "");
    }

    #[test]
    fn root_name___defaults_and_normalizes() {
        assert_eq!(root_name(None), "Config");
        assert_eq!(root_name(Some("  ")), "Config");
        assert_eq!(root_name(Some("app settings")), "AppSettings");
    }
}
