//! Deterministic name synthesis.
//!
//! Every generated identifier goes through [`to_title_case`] or
//! [`to_camel_case`], so the rules here decide how schema names, enum names
//! and request function names line up with each other.

/// Suffix that marks a registry key as an enum entry.
pub const ENUM_MARKER: &str = "#EnumTypeSuffix";

/// Prefix applied to declared interfaces and type aliases.
pub const INTERFACE_PREFIX: &str = "I";

/// Split an identifier-ish string into words.
///
/// Boundaries: any non-alphanumeric character, a lower-to-upper case change,
/// the last capital of an acronym that starts a new word (`URLStream`), and
/// letter/digit changes.
pub fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();

    for chunk in input.split(|c: char| !c.is_alphanumeric()) {
        let chars: Vec<char> = chunk.chars().collect();
        let mut start = 0;

        for i in 1..chars.len() {
            let prev = chars[i - 1];
            let cur = chars[i];
            let next = chars.get(i + 1).copied();

            let case_change = prev.is_lowercase() && cur.is_uppercase();
            let acronym_end = prev.is_uppercase()
                && cur.is_uppercase()
                && next.is_some_and(char::is_lowercase);
            let digit_change = prev.is_ascii_digit() != cur.is_ascii_digit();

            if case_change || acronym_end || digit_change {
                words.push(chars[start..i].iter().collect());
                start = i;
            }
        }

        if start < chars.len() {
            words.push(chars[start..].iter().collect());
        }
    }

    words
}

/// `upload_attachment-usingPOST` -> `uploadAttachmentUsingPost`.
pub fn to_camel_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for (i, word) in split_words(input).iter().enumerate() {
        let lower = word.to_lowercase();
        if i == 0 {
            out.push_str(&lower);
        } else {
            out.push_str(&upper_first(&lower));
        }
    }
    out
}

/// Camel case with the first letter upper-cased: `BookDetailVO` -> `BookDetailVo`.
pub fn to_title_case(input: &str) -> String {
    upper_first(&to_camel_case(input))
}

fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Declared name of a schema, request body or parameter interface.
pub fn interface_name(name: &str) -> String {
    format!("{INTERFACE_PREFIX}{}", to_title_case(name))
}

/// Registry key for an anonymous enum found at `key` under `parent_key`.
pub fn enum_registry_name(parent_key: &str, key: &str) -> String {
    format!(
        "{}{}{ENUM_MARKER}",
        to_title_case(parent_key),
        to_title_case(key)
    )
}

pub fn is_enum_key(key: &str) -> bool {
    key.contains(ENUM_MARKER)
}

/// Declared name of an enum registry entry.
pub fn strip_enum_marker(key: &str) -> String {
    key.replace(ENUM_MARKER, "")
}

/// Registry key of an operation's request body.
pub fn request_body_name(operation_name: &str) -> String {
    format!("{operation_name}Request")
}

/// Resolution key used for an operation's response schema.
pub fn response_key(operation_name: &str) -> String {
    format!("{operation_name}Response")
}

/// `getPetById` -> `useGetPetByIdRequest`.
pub fn request_function_name(operation_name: &str) -> String {
    format!("use{}Request", to_title_case(operation_name))
}

/// `getPetById` -> `IGetPetByIdParams`.
pub fn params_interface_name(operation_name: &str) -> String {
    format!("{}Params", interface_name(operation_name))
}

/// Last segment of a JSON pointer: `#/components/schemas/Pet` -> `Pet`.
pub fn ref_name(ref_path: &str) -> &str {
    ref_path.rsplit('/').next().unwrap_or(ref_path)
}
