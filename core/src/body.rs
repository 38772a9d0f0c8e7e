//! # Example Bodies
//!
//! Turns an inline OpenAPI example into a Mockoon response body.
//!
//! Bodies may hold Handlebars placeholders (`{{faker 'name'}}`, `{{body "id"}}`).
//! JSON serialization escapes quotes inside them, which breaks the template, so
//! after serializing every `{{...}}` span gets its `\"` turned back into `"`.
//! The repair pass only exists for compatibility with already authored examples.

use crate::error::AppResult;
use crate::oas::Response;
use regex::{Captures, Regex};
use serde_json::Value;
use std::sync::OnceLock;

/// First non-null inline example across the response's media types, in document order.
pub fn first_example(response: &Response) -> Option<&Value> {
    response
        .content
        .as_ref()?
        .values()
        .find_map(|media| media.example.as_ref())
}

/// Serializes `example` into a body string.
///
/// When `schema` is given and the example is an object, it is attached under a
/// `schema` key first.
pub fn render_body(example: &Value, schema: Option<&Value>) -> AppResult<String> {
    let serialized = match (schema, example) {
        (Some(schema), Value::Object(fields)) => {
            let mut enriched = fields.clone();
            enriched.insert("schema".to_string(), schema.clone());
            serde_json::to_string(&enriched)?
        }
        _ => serde_json::to_string(example)?,
    };
    Ok(unescape_templates(&serialized))
}

/// Unescapes `\"` inside every `{{...}}` span, leaving the rest untouched.
pub fn unescape_templates(serialized: &str) -> String {
    static TEMPLATE_RE: OnceLock<Regex> = OnceLock::new();
    let template_re =
        TEMPLATE_RE.get_or_init(|| Regex::new(r"(?s)\{\{(.*?)\}\}").expect("Invalid regex"));

    template_re
        .replace_all(serialized, |caps: &Captures| {
            format!("{{{{{}}}}}", caps[1].replace("\\\"", "\""))
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oas::MediaType;
    use indexmap::IndexMap;
    use serde_json::json;

    fn response(media: Vec<(&str, Option<Value>)>) -> Response {
        let content: IndexMap<String, MediaType> = media
            .into_iter()
            .map(|(name, example)| {
                (
                    name.to_string(),
                    MediaType {
                        schema: None,
                        example,
                    },
                )
            })
            .collect();
        Response {
            content: Some(content),
        }
    }

    #[test]
    fn test_first_example_skips_media_without_example() {
        let r = response(vec![
            ("application/xml", None),
            ("application/json", Some(json!({ "id": 1 }))),
            ("text/plain", Some(json!("second"))),
        ]);
        assert_eq!(first_example(&r), Some(&json!({ "id": 1 })));
    }

    #[test]
    fn test_first_example_none() {
        assert!(first_example(&Response::default()).is_none());
        assert!(first_example(&response(vec![("application/json", None)])).is_none());
    }

    #[test]
    fn test_falsy_examples_still_count() {
        let r = response(vec![("application/json", Some(json!(0)))]);
        assert_eq!(first_example(&r), Some(&json!(0)));
    }

    #[test]
    fn test_render_plain_example() {
        let body = render_body(&json!({ "id": 1, "name": "Rex" }), None).unwrap();
        assert_eq!(body, r#"{"id":1,"name":"Rex"}"#);
    }

    #[test]
    fn test_render_attaches_schema_to_objects() {
        let schema = json!({ "type": "object", "required": ["name"] });
        let body = render_body(&json!({ "error": "invalid" }), Some(&schema)).unwrap();
        assert_eq!(
            body,
            r#"{"error":"invalid","schema":{"type":"object","required":["name"]}}"#
        );
    }

    #[test]
    fn test_render_does_not_attach_schema_to_non_objects() {
        let schema = json!({ "type": "object" });
        let body = render_body(&json!(["a"]), Some(&schema)).unwrap();
        assert_eq!(body, r#"["a"]"#);
    }

    #[test]
    fn test_render_keeps_single_quoted_template() {
        let body = render_body(&json!({ "name": "{{faker 'name'}}" }), None).unwrap();
        assert!(body.contains("{{faker 'name'}}"));
    }

    #[test]
    fn test_render_unescapes_double_quotes_inside_templates() {
        let example = json!({ "id": "{{urlParam \"id\"}}", "quote": "say \"hi\"" });
        let body = render_body(&example, None).unwrap();
        assert_eq!(body, r#"{"id":"{{urlParam "id"}}","quote":"say \"hi\""}"#);
    }

    #[test]
    fn test_unescape_spans_multiple_lines() {
        let serialized = "{{#repeat 2}}\n{\\\"a\\\": 1}\n{{/repeat}} \\\"x\\\"";
        assert_eq!(
            unescape_templates(serialized),
            "{{#repeat 2}}\n{\\\"a\\\": 1}\n{{/repeat}} \\\"x\\\""
        );
        assert_eq!(
            unescape_templates("{{a \\\"\nb\\\"}}"),
            "{{a \"\nb\"}}"
        );
    }
}
