//! Property key → type identifier normalization.

/// Identifier used for an object that has no key (the document root).
pub const ROOT_IDENTIFIER: &str = "Root";

/// Turn a property key into a type identifier.
///
/// - `""` becomes `Root`
/// - keys containing `_` or `-` are split on those separators and each segment
///   is capitalized: `user_name` → `UserName`, `my-type-id` → `MyTypeId`
/// - any other key only gets its first character upper-cased: `name` → `Name`,
///   `ID` → `ID`
///
/// ```
/// use typeagen_core::normalize;
///
/// assert_eq!(normalize("user_name"), "UserName");
/// assert_eq!(normalize("geo"), "Geo");
/// ```
pub fn normalize(key: &str) -> String {
    if key.is_empty() {
        return ROOT_IDENTIFIER.to_string();
    }

    if key.contains(is_separator) {
        key.split(is_separator).map(capitalize).collect()
    } else {
        capitalize(key)
    }
}

fn is_separator(c: char) -> bool {
    c == '_' || c == '-'
}

/// Upper-case the first character, leaving the rest untouched.
fn capitalize(segment: &str) -> String {
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Whether `name` can be written as a bare TypeScript member name.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn separators_only_collapse_to_empty() {
        assert_eq!(normalize("__"), "");
        assert_eq!(normalize("-"), "");
    }

    #[test]
    fn doubled_and_trailing_separators_are_dropped() {
        assert_eq!(normalize("a__b"), "AB");
        assert_eq!(normalize("trailing_"), "Trailing");
        assert_eq!(normalize("_leading"), "Leading");
    }

    #[test]
    fn non_ascii_first_character_is_upper_cased() {
        assert_eq!(normalize("élan"), "Élan");
    }

    #[test]
    fn identifier_check() {
        assert!(is_identifier("name"));
        assert!(is_identifier("_private"));
        assert!(is_identifier("$ref"));
        assert!(is_identifier("a1"));
        assert!(!is_identifier(""));
        assert!(!is_identifier("1a"));
        assert!(!is_identifier("content-type"));
        assert!(!is_identifier("with space"));
    }
}
