//! TypeScript syntax helpers shared by declaration and request emission.

use std::collections::HashSet;
use std::sync::LazyLock;

use super::naming::to_camel_case;

/// TypeScript reserved words that cannot be used as identifiers.
pub static TS_RESERVED_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "break",
        "case",
        "catch",
        "class",
        "const",
        "continue",
        "debugger",
        "default",
        "delete",
        "do",
        "else",
        "enum",
        "export",
        "extends",
        "false",
        "finally",
        "for",
        "function",
        "if",
        "import",
        "in",
        "instanceof",
        "new",
        "null",
        "return",
        "super",
        "switch",
        "this",
        "throw",
        "true",
        "try",
        "typeof",
        "var",
        "void",
        "while",
        "with",
        "yield",
        "let",
        "static",
        "implements",
        "interface",
        "package",
        "private",
        "protected",
        "public",
        "await",
        "async",
    ]
    .into_iter()
    .collect()
});

/// Whether a property key has to be quoted.
///
/// True when the name is empty, starts with anything but a letter, `_` or
/// `$`, or contains characters outside `[A-Za-z0-9_$]`.
pub fn needs_quoting(name: &str) -> bool {
    name.chars()
        .next()
        .is_none_or(|c| !(c.is_ascii_alphabetic() || c == '_' || c == '$'))
        || !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Escape backslashes and double quotes for a double-quoted literal.
pub fn escape_js_string(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Quote a property key when it is not a plain identifier.
pub fn quote_if_needed(name: &str) -> String {
    if needs_quoting(name) {
        format!("\"{}\"", escape_js_string(name))
    } else {
        name.to_string()
    }
}

/// Turn a parameter name into a usable local binding.
///
/// Camel-cases the name, prefixes `_` when it starts with a digit or
/// collides with a reserved word.
pub fn sanitize_ts_identifier(name: &str) -> String {
    let mut result = to_camel_case(name);

    if result.is_empty() {
        return "_empty".to_string();
    }

    if result.starts_with(|c: char| c.is_ascii_digit()) || TS_RESERVED_WORDS.contains(result.as_str())
    {
        result.insert(0, '_');
    }

    result
}

/// `key: binding` entry for an object literal, shortened to `key` when both match.
pub fn object_entry(key: &str, binding: &str) -> String {
    if key == binding {
        binding.to_string()
    } else {
        format!("{}: {binding}", quote_if_needed(key))
    }
}
