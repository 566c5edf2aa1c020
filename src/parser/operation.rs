//! Parsed operation types.
//!
//! [`ParsedCall`] is the final artifact of a successful parse: the
//! collection name, the resolved method, and the decoded positional
//! arguments. It is constructed once per invocation, consumed by the
//! executor, and never mutated.

use std::fmt;

use serde::Serialize;
use serde_json::Value;

/// The closed set of supported collection methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Method {
    Find,
    FindOne,
    InsertOne,
    InsertMany,
    UpdateOne,
    UpdateMany,
    DeleteOne,
    DeleteMany,
    CountDocuments,
    Drop,
}

/// Wire names of every supported method, in display order.
pub const SUPPORTED_METHODS: &[&str] = &[
    "find",
    "findOne",
    "insertOne",
    "insertMany",
    "updateOne",
    "updateMany",
    "deleteOne",
    "deleteMany",
    "countDocuments",
    "drop",
];

impl Method {
    /// Resolve a method name from its wire form.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "find" => Some(Method::Find),
            "findOne" => Some(Method::FindOne),
            "insertOne" => Some(Method::InsertOne),
            "insertMany" => Some(Method::InsertMany),
            "updateOne" => Some(Method::UpdateOne),
            "updateMany" => Some(Method::UpdateMany),
            "deleteOne" => Some(Method::DeleteOne),
            "deleteMany" => Some(Method::DeleteMany),
            "countDocuments" => Some(Method::CountDocuments),
            "drop" => Some(Method::Drop),
            _ => None,
        }
    }

    /// The method's wire name.
    pub fn name(&self) -> &'static str {
        match self {
            Method::Find => "find",
            Method::FindOne => "findOne",
            Method::InsertOne => "insertOne",
            Method::InsertMany => "insertMany",
            Method::UpdateOne => "updateOne",
            Method::UpdateMany => "updateMany",
            Method::DeleteOne => "deleteOne",
            Method::DeleteMany => "deleteMany",
            Method::CountDocuments => "countDocuments",
            Method::Drop => "drop",
        }
    }

    /// Allowed argument count as an inclusive `(min, max)` range.
    pub fn arity(&self) -> (usize, usize) {
        match self {
            Method::Find | Method::FindOne => (0, 2),
            Method::InsertOne | Method::InsertMany => (1, 1),
            Method::UpdateOne | Method::UpdateMany => (2, 3),
            Method::DeleteOne | Method::DeleteMany => (1, 1),
            Method::CountDocuments => (0, 1),
            Method::Drop => (0, 0),
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A fully parsed and validated operation call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedCall {
    /// Target collection name.
    pub collection: String,

    /// Resolved method.
    pub method: Method,

    /// Decoded positional arguments, in source order.
    pub arguments: Vec<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_round_trip() {
        for name in SUPPORTED_METHODS {
            let method = Method::from_name(name).expect("listed method must resolve");
            assert_eq!(method.name(), *name);
        }
    }

    #[test]
    fn test_unknown_name() {
        assert_eq!(Method::from_name("frobnicate"), None);
        assert_eq!(Method::from_name("FIND"), None);
        assert_eq!(Method::from_name(""), None);
    }

    #[test]
    fn test_arity_table() {
        assert_eq!(Method::Find.arity(), (0, 2));
        assert_eq!(Method::FindOne.arity(), (0, 2));
        assert_eq!(Method::InsertOne.arity(), (1, 1));
        assert_eq!(Method::InsertMany.arity(), (1, 1));
        assert_eq!(Method::UpdateOne.arity(), (2, 3));
        assert_eq!(Method::UpdateMany.arity(), (2, 3));
        assert_eq!(Method::DeleteOne.arity(), (1, 1));
        assert_eq!(Method::DeleteMany.arity(), (1, 1));
        assert_eq!(Method::CountDocuments.arity(), (0, 1));
        assert_eq!(Method::Drop.arity(), (0, 0));
    }

    #[test]
    fn test_parsed_call_serializes_wire_name() {
        let call = ParsedCall {
            collection: "users".to_string(),
            method: Method::InsertOne,
            arguments: vec![serde_json::json!({"name": "Alice"})],
        };
        let json = serde_json::to_string(&call).unwrap();
        assert!(json.contains("\"insertOne\""));
        assert!(json.contains("\"users\""));
    }
}
