//! End-to-end parse coverage for the operation-string pipeline.

use serde_json::json;

use super::{Method, OperationParser};
use crate::error::{MongoqError, ParseError};

#[test]
fn test_zero_argument_call() {
    let call = OperationParser::parse("coll.find()").unwrap();
    assert_eq!(call.collection, "coll");
    assert_eq!(call.method, Method::Find);
    assert!(call.arguments.is_empty());
}

#[test]
fn test_outer_quotes_are_stripped() {
    let call = OperationParser::parse("'coll.find()'").unwrap();
    assert_eq!(call.collection, "coll");

    let call = OperationParser::parse("\"coll.find()\"").unwrap();
    assert_eq!(call.collection, "coll");

    let call = OperationParser::parse("`coll.find()`").unwrap();
    assert_eq!(call.collection, "coll");
}

#[test]
fn test_find_with_filter() {
    let call = OperationParser::parse(r#"users.find({"age": {"$gt": 18}})"#).unwrap();
    assert_eq!(call.method, Method::Find);
    assert_eq!(call.arguments.len(), 1);
    assert_eq!(call.arguments[0], json!({"age": {"$gt": 18}}));
}

#[test]
fn test_find_with_filter_and_projection() {
    let call =
        OperationParser::parse(r#"users.find({"active": true}, {"name": 1, "_id": 0})"#).unwrap();
    assert_eq!(call.arguments.len(), 2);
    assert_eq!(call.arguments[1], json!({"name": 1, "_id": 0}));
}

#[test]
fn test_comma_in_string_is_one_argument() {
    let call = OperationParser::parse(r#"coll.find({"title": "Hello, World"})"#).unwrap();
    assert_eq!(call.arguments.len(), 1);
    assert_eq!(call.arguments[0]["title"], json!("Hello, World"));
}

#[test]
fn test_nested_structure_keeps_two_arguments() {
    let call =
        OperationParser::parse(r#"coll.updateOne({"id":1},{"$set":{"a":{"b":2}}})"#).unwrap();
    assert_eq!(call.method, Method::UpdateOne);
    assert_eq!(call.arguments.len(), 2);
    assert_eq!(call.arguments[1], json!({"$set": {"a": {"b": 2}}}));
}

#[test]
fn test_escaped_quotes_decode() {
    let call = OperationParser::parse(r#"coll.find({"msg": "He said \"Hi\""})"#).unwrap();
    assert_eq!(call.arguments[0]["msg"], json!(r#"He said "Hi""#));
}

#[test]
fn test_insert_many_with_array() {
    let call =
        OperationParser::parse(r#"users.insertMany([{"name": "Alice"}, {"name": "Bob"}])"#)
            .unwrap();
    assert_eq!(call.method, Method::InsertMany);
    assert_eq!(call.arguments.len(), 1);
    assert_eq!(call.arguments[0].as_array().unwrap().len(), 2);
}

#[test]
fn test_dotted_collection_name() {
    let call = OperationParser::parse(r#"logs.2024-06.countDocuments()"#);
    // `logs.2024-06.countDocuments()` tokenizes to eight tokens, which is
    // a structural error: the dotted path has exactly one dot.
    assert!(call.is_err());

    let call = OperationParser::parse("my-app_logs.drop()").unwrap();
    assert_eq!(call.collection, "my-app_logs");
    assert_eq!(call.method, Method::Drop);
}

#[test]
fn test_arity_error_for_missing_filter() {
    let err = OperationParser::parse("coll.deleteOne()").unwrap_err();
    match err {
        MongoqError::Parse(ParseError::Arity {
            method,
            min,
            actual,
            ..
        }) => {
            assert_eq!(method, "deleteOne");
            assert_eq!(min, 1);
            assert_eq!(actual, 0);
        }
        other => panic!("expected Arity error, got {other:?}"),
    }
}

#[test]
fn test_unsupported_method() {
    let err = OperationParser::parse("coll.frobnicate({})").unwrap_err();
    match err {
        MongoqError::Parse(ParseError::UnsupportedMethod { method, .. }) => {
            assert_eq!(method, "frobnicate");
        }
        other => panic!("expected UnsupportedMethod, got {other:?}"),
    }
}

#[test]
fn test_invalid_collection_name() {
    let err = OperationParser::parse("123bad.find({})").unwrap_err();
    match err {
        MongoqError::Parse(ParseError::InvalidIdentifier(name)) => assert_eq!(name, "123bad"),
        other => panic!("expected InvalidIdentifier, got {other:?}"),
    }
}

#[test]
fn test_unbalanced_braces() {
    let err = OperationParser::parse(r#"coll.find({"a": 1)"#).unwrap_err();
    // The blob never closes its brace, so the splitter reports it.
    assert!(matches!(
        err,
        MongoqError::Parse(ParseError::Structural { .. })
            | MongoqError::Parse(ParseError::UnbalancedStructure { .. })
    ));
}

#[test]
fn test_invalid_json_argument() {
    let err = OperationParser::parse("coll.find({name: unquoted})").unwrap_err();
    match err {
        MongoqError::Parse(ParseError::ArgumentDecode { segment, .. }) => {
            assert_eq!(segment, "{name: unquoted}");
        }
        other => panic!("expected ArgumentDecode, got {other:?}"),
    }
}

#[test]
fn test_chained_calls_rejected() {
    let err = OperationParser::parse("coll.find().limit(5)").unwrap_err();
    assert!(matches!(
        err,
        MongoqError::Parse(ParseError::Structural { .. })
    ));
}

#[test]
fn test_empty_input_rejected() {
    assert!(OperationParser::parse("").is_err());
    assert!(OperationParser::parse("   ").is_err());
    assert!(OperationParser::parse("''").is_err());
}

#[test]
fn test_round_trip_tokenization() {
    // For identifier-grammar collections, known methods, and
    // JSON-encodable argument lists, encode-then-parse recovers the call.
    let cases: Vec<(&str, Method, Vec<serde_json::Value>)> = vec![
        ("users", Method::Find, vec![]),
        ("app.events", Method::FindOne, vec![json!({"k": "v"})]),
        (
            "orders",
            Method::UpdateMany,
            vec![json!({"paid": false}), json!({"$set": {"flagged": true}})],
        ),
        ("metrics-raw", Method::CountDocuments, vec![json!({})]),
    ];

    for (collection, method, args) in cases {
        let encoded_args: Vec<String> = args
            .iter()
            .map(|a| serde_json::to_string(a).unwrap())
            .collect();
        let input = format!("{collection}.{}({})", method.name(), encoded_args.join(","));

        let call = OperationParser::parse(&input).unwrap();
        assert_eq!(call.collection, collection);
        assert_eq!(call.method, method);
        assert_eq!(call.arguments, args);
    }
}

#[test]
fn test_update_with_options() {
    let call = OperationParser::parse(
        r#"users.updateOne({"name": "Alice"}, {"$inc": {"age": 1}}, {"upsert": true})"#,
    )
    .unwrap();
    assert_eq!(call.arguments.len(), 3);
    assert_eq!(call.arguments[2], json!({"upsert": true}));
}

#[test]
fn test_count_documents_with_filter() {
    let call = OperationParser::parse(r#"users.countDocuments({"active": true})"#).unwrap();
    assert_eq!(call.method, Method::CountDocuments);
    assert_eq!(call.arguments.len(), 1);
}

#[test]
fn test_argument_order_is_positional() {
    let call = OperationParser::parse(r#"c.updateOne({"first": 1}, {"second": 2})"#).unwrap();
    assert_eq!(call.arguments[0], json!({"first": 1}));
    assert_eq!(call.arguments[1], json!({"second": 2}));
}
