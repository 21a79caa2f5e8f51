//! End-to-end tests from XML text to converted mappings.

use oxflib::formats::{json, xml};
use oxflib::{GroupedValue, Value, convert, load};
use pretty_assertions::assert_eq;
use serde_json::json;

fn convert_str(input: &str) -> serde_json::Value {
    let root = xml::parse_str(input).expect("valid XML");
    convert(&root).to_json()
}

#[test]
fn test_config_like_document() {
    let input = r#"<?xml version="1.0" encoding="UTF-8"?>
<config version="2">
    <!-- server settings -->
    <server host="localhost" port="8080">
        <tls/>
    </server>
    <user>alice</user>
    <user>bob</user>
    <retries>3</retries>
</config>"#;

    assert_eq!(
        convert_str(input),
        json!({
            "config": {
                "server": {"tls": null, "@host": "localhost", "@port": "8080"},
                "user": ["alice", "bob"],
                "retries": "3",
                "@version": "2"
            }
        })
    );
}

#[test]
fn test_key_order_in_rendered_json() {
    let root = xml::parse_str(r#"<r a="1">text<z/><y/><z/></r>"#).unwrap();
    let rendered = json::to_string(&convert(&root), false).unwrap();

    assert_eq!(
        rendered,
        r##"{"r":{"z":[null,null],"y":null,"@a":"1","#text":"text"}}"##
    );
}

#[test]
fn test_cardinality_depends_on_data() {
    let one = xml::parse_str("<order><line>a</line></order>").unwrap();
    let two = xml::parse_str("<order><line>a</line><line>b</line></order>").unwrap();

    let one = convert(&one);
    let two = convert(&two);
    let one_group = one.value().as_mapping().unwrap().get("line").unwrap();
    let two_group = two.value().as_mapping().unwrap().get("line").unwrap();

    assert!(matches!(one_group, GroupedValue::Single(_)));
    assert!(matches!(two_group, GroupedValue::Many(_)));

    let lines: Vec<&str> = two_group.values().filter_map(Value::as_str).collect();
    assert_eq!(lines, vec!["a", "b"]);
}

#[test]
fn test_whitespace_only_text_everywhere() {
    let input = "<root>\n   <a>  </a>\n   <b k=\"v\">\n\t</b>\n</root>";
    assert_eq!(
        convert_str(input),
        json!({"root": {"a": null, "b": {"@k": "v"}}})
    );
}

#[test]
fn test_mixed_content_keeps_leading_text_only() {
    assert_eq!(
        convert_str("<p>  Hello <b>big</b> world </p>"),
        json!({"p": {"b": "big", "#text": "Hello"}})
    );
}

#[test]
fn test_cdata_and_entities() {
    assert_eq!(
        convert_str(r#"<code lang="c&amp;c"><![CDATA[ if (a < b) ]]></code>"#),
        json!({"code": {"@lang": "c&c", "#text": "if (a < b)"}})
    );
}

#[test]
fn test_load_alias_matches_convert() {
    let root = xml::parse_str("<a><b>1</b></a>").unwrap();
    assert_eq!(load(&root), convert(&root));
}

#[test]
fn test_malformed_input_is_rejected() {
    let err = xml::parse_str("<a><b></a>").unwrap_err();
    assert!(err.to_string().starts_with("Parse Error"));
}
