//! Validation issues as reported by a prior schema-validation step.
//!
//! The wire format is the JSON serialization of a zod-style error: an
//! ordered issue array, each issue tagged by `code` with a structural
//! `path` and a human-readable `message`. Extra fields are tolerated so
//! newer validator output still loads.

use serde::Deserialize;

use crate::path::Path;
use crate::value::Value;

/// A single problem reported against one location in the data.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ValidationIssue {
    pub path: Path,
    #[serde(default)]
    pub message: String,
    #[serde(flatten)]
    pub kind: IssueKind,
}

/// The issue taxonomy, tagged on the wire by the validator's `code`.
///
/// Struct-variant fields beyond `code` are the parts of the validator
/// payload the viewer actually reads; everything else is ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "code", rename_all = "snake_case")]
pub enum IssueKind {
    /// Wrong type at the path. `received == "undefined"` doubles as
    /// missing-key evidence for the parent object.
    InvalidType {
        expected: String,
        received: String,
    },
    /// Wrong literal value. An absent `received` field (as opposed to an
    /// explicit JSON `null`) means the key was missing entirely.
    InvalidLiteral {
        #[serde(default)]
        expected: Option<Value>,
        #[serde(default, deserialize_with = "present_value")]
        received: Option<Value>,
    },
    /// Synthesized by the issue resolver for required keys the data
    /// lacks. Validators never emit this code themselves.
    MissingRequired,
    UnrecognizedKeys {
        #[serde(default)]
        keys: Vec<String>,
    },
    InvalidEnumValue {
        #[serde(default)]
        options: Vec<Value>,
    },
    InvalidString {
        #[serde(default)]
        validation: Option<String>,
    },
    TooSmall {
        #[serde(default)]
        minimum: Option<f64>,
    },
    TooBig {
        #[serde(default)]
        maximum: Option<f64>,
    },
    NotMultipleOf {
        #[serde(default, rename = "multipleOf")]
        multiple_of: Option<f64>,
    },
    Custom {},
    /// The data matched none of a union's branches; one rejected
    /// interpretation per branch, in the validator's order.
    InvalidUnion {
        #[serde(rename = "unionErrors")]
        union_errors: Vec<ValidationError>,
    },
    InvalidUnionDiscriminator {
        #[serde(default)]
        options: Vec<Value>,
    },
}

/// An ordered collection of issues. Discovery order is meaningful: it
/// decides the primary issue per node and numbers union alternatives.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(from = "ErrorWire")]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

impl ValidationError {
    pub fn new(issues: Vec<ValidationIssue>) -> Self {
        ValidationError { issues }
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Accepts both the bare issue array and the `{"issues": [...]}` object
/// form a serialized validator error comes in.
#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorWire {
    Wrapped { issues: Vec<ValidationIssue> },
    Bare(Vec<ValidationIssue>),
}

impl From<ErrorWire> for ValidationError {
    fn from(wire: ErrorWire) -> Self {
        match wire {
            ErrorWire::Wrapped { issues } => ValidationError { issues },
            ErrorWire::Bare(issues) => ValidationError { issues },
        }
    }
}

/// Maps an explicit JSON `null` to `Some(Value::Null)` so it stays
/// distinguishable from the field being absent.
fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Some(Value::deserialize(deserializer)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_deserialize_invalid_type() {
        let error: ValidationError = serde_json::from_value(json!([{
            "code": "invalid_type",
            "expected": "number",
            "received": "string",
            "path": ["person", "age"],
            "message": "Expected number, received string"
        }]))
        .unwrap();

        assert_eq!(error.issues.len(), 1);
        let issue = &error.issues[0];
        assert_eq!(issue.path, Path::root().key("person").key("age"));
        assert_eq!(issue.message, "Expected number, received string");
        assert_eq!(
            issue.kind,
            IssueKind::InvalidType {
                expected: String::from("number"),
                received: String::from("string"),
            }
        );
    }

    #[test]
    fn test_deserialize_wrapped_error() {
        let error: ValidationError = serde_json::from_value(json!({
            "issues": [{
                "code": "custom",
                "path": ["background"],
                "message": "Only one of image or color can be provided"
            }],
            "name": "ZodError"
        }))
        .unwrap();

        assert_eq!(error.issues.len(), 1);
        assert_eq!(error.issues[0].kind, IssueKind::Custom {});
    }

    #[test]
    fn test_deserialize_union_with_nested_errors() {
        let error: ValidationError = serde_json::from_value(json!([{
            "code": "invalid_union",
            "path": [],
            "message": "Invalid input",
            "unionErrors": [
                {"issues": [{
                    "code": "invalid_type",
                    "expected": "string",
                    "received": "object",
                    "path": [],
                    "message": "Expected string, received object"
                }]},
                {"issues": [{
                    "code": "invalid_type",
                    "expected": "number",
                    "received": "string",
                    "path": ["person", "age"],
                    "message": "Expected number, received string"
                }]}
            ]
        }]))
        .unwrap();

        let IssueKind::InvalidUnion { union_errors } = &error.issues[0].kind else {
            panic!("Expected an invalid_union issue");
        };
        assert_eq!(union_errors.len(), 2);
        assert_eq!(union_errors[1].issues[0].path, Path::root().key("person").key("age"));
    }

    #[test]
    fn test_invalid_literal_received_absent_vs_null() {
        let absent: ValidationIssue = serde_json::from_value(json!({
            "code": "invalid_literal",
            "expected": true,
            "path": ["shotFirst"],
            "message": "Invalid literal value, expected true"
        }))
        .unwrap();
        let IssueKind::InvalidLiteral { received, .. } = &absent.kind else {
            panic!("Expected an invalid_literal issue");
        };
        assert_eq!(received, &None);

        let null: ValidationIssue = serde_json::from_value(json!({
            "code": "invalid_literal",
            "expected": true,
            "received": null,
            "path": ["shotFirst"],
            "message": "Invalid literal value, expected true"
        }))
        .unwrap();
        let IssueKind::InvalidLiteral { received, .. } = &null.kind else {
            panic!("Expected an invalid_literal issue");
        };
        assert_eq!(received, &Some(Value::Null));
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let error: ValidationError = serde_json::from_value(json!([{
            "code": "invalid_enum_value",
            "options": ["brown", "black"],
            "received": "blue",
            "path": ["hairColor"],
            "message": "Invalid enum value. Expected 'brown' | 'black', received 'blue'"
        }]))
        .unwrap();

        let IssueKind::InvalidEnumValue { options } = &error.issues[0].kind else {
            panic!("Expected an invalid_enum_value issue");
        };
        assert_eq!(options.len(), 2);
    }

    #[test]
    fn test_deserialize_discriminator_issue() {
        let error: ValidationError = serde_json::from_value(json!([{
            "code": "invalid_union_discriminator",
            "options": ["square", "circle"],
            "path": ["type"],
            "message": "Invalid discriminator value. Expected 'square' | 'circle'"
        }]))
        .unwrap();

        assert!(matches!(
            error.issues[0].kind,
            IssueKind::InvalidUnionDiscriminator { .. }
        ));
    }
}
