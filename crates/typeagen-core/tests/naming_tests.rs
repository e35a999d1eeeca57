use typeagen_core::naming::{is_identifier, ROOT_IDENTIFIER};
use typeagen_core::normalize;

#[test]
fn empty_key_is_root() {
    assert_eq!(normalize(""), "Root");
    assert_eq!(normalize(""), ROOT_IDENTIFIER);
}

#[test]
fn snake_case_becomes_pascal_case() {
    assert_eq!(normalize("user_name"), "UserName");
    assert_eq!(normalize("created_at_utc"), "CreatedAtUtc");
}

#[test]
fn kebab_case_becomes_pascal_case() {
    assert_eq!(normalize("my-type-id"), "MyTypeId");
}

#[test]
fn mixed_separators() {
    assert_eq!(normalize("a_b-c"), "ABC");
}

#[test]
fn plain_keys_only_capitalize_first_letter() {
    assert_eq!(normalize("name"), "Name");
    assert_eq!(normalize("catchPhrase"), "CatchPhrase");
    assert_eq!(normalize("ID"), "ID");
}

#[test]
fn segments_keep_their_inner_case() {
    assert_eq!(normalize("html_URL"), "HtmlURL");
}

#[test]
fn digits_are_left_alone() {
    assert_eq!(normalize("2fa"), "2fa");
    assert_eq!(normalize("v_2"), "V2");
}

#[test]
fn normalized_names_of_simple_keys_are_identifiers() {
    for key in ["user_name", "geo", "my-type-id", "address"] {
        assert!(is_identifier(&normalize(key)), "{key}");
    }
}
