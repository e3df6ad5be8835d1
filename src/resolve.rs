//! Matching issues to nodes and deriving missing-key diagnostics.
//!
//! A node's direct issues are the ones reported at exactly its path.
//! On top of those, issues reported at child paths that prove a required
//! key absent are folded into one synthesized missing-keys issue for the
//! parent object.

use crate::issue::{IssueKind, ValidationError, ValidationIssue};
use crate::path::Path;
use crate::value::Value;

/// Issues attached at exactly `path`, in discovery order.
pub fn direct_issues<'a>(error: &'a ValidationError, path: &Path) -> Vec<&'a ValidationIssue> {
    error
        .issues
        .iter()
        .filter(|issue| issue.path == *path)
        .collect()
}

/// Direct issues at `path` followed by the synthesized missing-keys
/// issue, if the error proves any child key absent.
pub fn relevant_issues(error: &ValidationError, path: &Path, root: &Value) -> Vec<ValidationIssue> {
    let mut issues: Vec<ValidationIssue> =
        direct_issues(error, path).into_iter().cloned().collect();
    if let Some(synthesized) = missing_keys_issue(error, path, root) {
        issues.push(synthesized);
    }
    issues
}

/// The synthesized missing-required-keys issue for the object at `path`,
/// or `None` when no issue is evidence of an absent child key.
pub fn missing_keys_issue(
    error: &ValidationError,
    path: &Path,
    root: &Value,
) -> Option<ValidationIssue> {
    let names = missing_key_names(error, path, root);
    if names.is_empty() {
        return None;
    }

    let message = if names.len() == 1 {
        format!("Object missing required key: '{}'", names[0])
    } else {
        let quoted: Vec<String> = names.iter().map(|name| format!("'{}'", name)).collect();
        format!("Object missing required keys: {}", quoted.join(", "))
    };

    Some(ValidationIssue {
        path: path.clone(),
        message,
        kind: IssueKind::MissingRequired,
    })
}

/// Names of required keys proven absent from the object at `path`,
/// deduplicated in discovery order.
fn missing_key_names(error: &ValidationError, path: &Path, root: &Value) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();

    for issue in &error.issues {
        let evidence = match &issue.kind {
            // A union is missing-key evidence only when every rejected
            // branch independently reports the key absent.
            IssueKind::InvalidUnion { union_errors } => {
                !union_errors.is_empty()
                    && union_errors.iter().all(|alternative| {
                        alternative
                            .issues
                            .iter()
                            .any(|inner| is_missing(inner, path, root))
                    })
            }
            _ => is_missing(issue, path, root),
        };

        if evidence && let Some(segment) = issue.path.last() {
            let name = segment.to_string();
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }

    names
}

/// Is `issue` evidence that a direct child key of `obj_path` is absent?
fn is_missing(issue: &ValidationIssue, obj_path: &Path, root: &Value) -> bool {
    if !issue.path.is_child_of(obj_path) {
        return false;
    }
    match &issue.kind {
        IssueKind::InvalidType { received, .. } => received == "undefined",
        IssueKind::InvalidLiteral { received, .. } => received.is_none(),
        IssueKind::InvalidUnionDiscriminator { .. } => root.is_absent_at(&issue.path),
        _ => false,
    }
}

/// The sub-error of the union alternative at `index`, for the first
/// invalid-union issue reported at exactly `path`. Callers clamp the
/// index; out of range resolves to `None`.
pub fn union_alternative<'a>(
    error: &'a ValidationError,
    path: &Path,
    index: usize,
) -> Option<&'a ValidationError> {
    error.issues.iter().find_map(|issue| match &issue.kind {
        IssueKind::InvalidUnion { union_errors } if issue.path == *path => union_errors.get(index),
        _ => None,
    })
}
