use agrodoc_json_token::{Emitter, Scanner, Token};
use serde_json::json;

/// Walks every token of `input` and re-emits it canonically.
fn reencode(input: &[u8]) -> Vec<u8> {
    let mut scanner = Scanner::new(input);
    let mut out = Emitter::with_capacity(input.len());
    let mut first: Vec<bool> = Vec::new();
    let mut after_name = false;

    fn sep(out: &mut Emitter, first: &mut [bool], after_name: &mut bool) {
        if *after_name {
            *after_name = false;
            return;
        }
        if let Some(f) = first.last_mut() {
            if *f {
                *f = false;
            } else {
                out.comma();
            }
        }
    }

    while let Some(token) = scanner.next().unwrap() {
        match token {
            Token::ObjectStart => {
                sep(&mut out, &mut first, &mut after_name);
                out.begin_object();
                first.push(true);
            }
            Token::ObjectEnd => {
                first.pop();
                out.end_object();
            }
            Token::ArrayStart => {
                sep(&mut out, &mut first, &mut after_name);
                out.begin_array();
                first.push(true);
            }
            Token::ArrayEnd => {
                first.pop();
                out.end_array();
            }
            Token::FieldName { text, .. } => {
                sep(&mut out, &mut first, &mut after_name);
                out.field_name(&text);
                after_name = true;
            }
            Token::Str { text, .. } => {
                sep(&mut out, &mut first, &mut after_name);
                out.string(&text);
            }
            Token::Num { raw } => {
                sep(&mut out, &mut first, &mut after_name);
                out.raw(raw);
            }
            Token::Bool(b) => {
                sep(&mut out, &mut first, &mut after_name);
                out.raw(if b { b"true" } else { b"false" });
            }
            Token::Null => {
                sep(&mut out, &mut first, &mut after_name);
                out.raw(b"null");
            }
        }
    }
    out.finish()
}

#[test]
fn scan_reencode_fixed_point() {
    let docs = vec![
        json!({}),
        json!({"a": 1}),
        json!({"exname": "Maize trial", "weather": {"wst_id": "UFGA"}}),
        json!({"events": [{"event": "planting", "date": "1982-02-25"}, {"event": "harvest"}]}),
        json!({"mixed": [1, -2.5, true, null, "s", [], {}]}),
        json!({"deep": {"a": {"b": {"c": [0]}}}}),
    ];
    for doc in docs {
        let mut canonical = Emitter::new();
        canonical.value(&doc);
        let bytes = canonical.finish();
        assert_eq!(reencode(&bytes), bytes, "doc: {doc}");
    }
}

#[test]
fn whitespace_is_insignificant_to_token_content() {
    let padded = b"{\n  \"a\" : 1 ,\n  \"b\" : [ \"x\" , true ]\n}";
    let minimal = br#"{"a":1,"b":["x",true]}"#;
    assert_eq!(reencode(padded), minimal.to_vec());
}

#[test]
fn spans_index_into_the_source_buffer() {
    let input = br#"{ "name" : "Rothamsted \"plot\" 2" , "lat" : 51.8 }"#;
    let mut scanner = Scanner::new(input);
    scanner.next().unwrap(); // {
    match scanner.next().unwrap().unwrap() {
        Token::FieldName { raw, text } => {
            assert_eq!(raw, br#""name""#);
            assert_eq!(text, "name");
        }
        other => panic!("unexpected {other:?}"),
    }
    match scanner.next().unwrap().unwrap() {
        Token::Str { raw, text } => {
            assert_eq!(raw, br#""Rothamsted \"plot\" 2""#);
            assert_eq!(text, "Rothamsted \"plot\" 2");
        }
        other => panic!("unexpected {other:?}"),
    }
    scanner.next().unwrap(); // "lat"
    match scanner.next().unwrap().unwrap() {
        Token::Num { raw } => assert_eq!(raw, b"51.8"),
        other => panic!("unexpected {other:?}"),
    }
}
