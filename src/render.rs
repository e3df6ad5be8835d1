//! The recursive data→view transformation.
//!
//! A render session walks the value tree depth-first and produces one
//! precomputed `RenderedLine` per visual row, with line numbers assigned
//! so that every row's number equals 1 + the lines consumed by everything
//! before it in document order. Collapsed array spans consume the lines
//! they stand in for, so numbering is identical whether a span is open
//! or closed.
//!
//! All interaction state (union alternative selection, truncation
//! toggles, logical focus) lives here, addressed by node path, and is
//! discarded with the session when the inputs change.

use std::collections::HashMap;

use crate::issue::{IssueKind, ValidationError, ValidationIssue};
use crate::lines::LineCounter;
use crate::path::{Path, PathSeg};
use crate::resolve;
use crate::value::Value;
use crate::window::{self, ArrayWindow};

/// Which end of an array a truncation control affects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpanEnd {
    Start,
    End,
}

/// Identity of an interactive control, for logical focus tracking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlId {
    Truncation(Path, SpanEnd),
    UnionPrev(Path),
    UnionNext(Path),
}

/// Per-node interaction state. Containers start with both ends
/// collapsed and the first union alternative selected.
#[derive(Debug, Clone)]
struct NodeState {
    union_index: usize,
    union_max: usize,
    start_collapsed: bool,
    end_collapsed: bool,
}

impl Default for NodeState {
    fn default() -> Self {
        NodeState {
            union_index: 0,
            union_max: 0,
            start_collapsed: true,
            end_collapsed: true,
        }
    }
}

/// A scalar ready for type-keyed coloring.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Str(String),
    Num(f64),
    Bool(bool),
    Null,
    Undefined,
}

impl Literal {
    /// The literal for a scalar value; containers have none.
    fn of(value: &Value) -> Option<Literal> {
        match value {
            Value::Null => Some(Literal::Null),
            Value::Undefined => Some(Literal::Undefined),
            Value::Bool(b) => Some(Literal::Bool(*b)),
            Value::Number(n) => Some(Literal::Num(*n)),
            Value::String(s) => Some(Literal::Str(s.clone())),
            Value::Array(_) | Value::Object(_) => None,
        }
    }
}

/// Prev/next switcher attached to an invalid-union badge.
#[derive(Debug, Clone, PartialEq)]
pub struct UnionSwitcher {
    /// Path of the node carrying the union issue; addresses the state.
    pub path: Path,
    pub index: usize,
    pub max: usize,
    /// First resolved issue message at the same path inside the selected
    /// alternative; empty when the alternative has no issue there.
    pub nested_message: String,
}

impl UnionSwitcher {
    pub fn prev_enabled(&self) -> bool {
        self.index > 0
    }

    pub fn next_enabled(&self) -> bool {
        self.index + 1 < self.max
    }
}

/// The error badge for one line.
#[derive(Debug, Clone, PartialEq)]
pub struct LineIssue {
    pub message: String,
    pub switcher: Option<UnionSwitcher>,
}

/// Truncation toggle affordance. On a collapsed span this sits on the
/// ellipsis line; on an expanded span, on the first line of the span's
/// first item.
#[derive(Debug, Clone, PartialEq)]
pub struct TruncationControl {
    /// Path of the array node owning the span.
    pub path: Path,
    pub end: SpanEnd,
    pub expanded: bool,
}

impl TruncationControl {
    pub fn accessible_name(&self) -> &'static str {
        if self.expanded { "Collapse" } else { "Expand" }
    }
}

/// One visual row, fully precomputed for a dumb line view.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedLine {
    pub number: usize,
    pub indent: usize,
    pub key: Option<String>,
    pub literal: Option<Literal>,
    pub bracket: Option<char>,
    pub comma: bool,
    pub issue: Option<LineIssue>,
    pub truncation: Option<TruncationControl>,
}

impl RenderedLine {
    fn new(number: usize, indent: usize) -> Self {
        RenderedLine {
            number,
            indent,
            key: None,
            literal: None,
            bracket: None,
            comma: false,
            issue: None,
            truncation: None,
        }
    }

    /// An ellipsis row standing in for a collapsed span.
    pub fn is_ellipsis(&self) -> bool {
        self.truncation.as_ref().is_some_and(|t| !t.expanded)
    }
}

/// One rendering session over a fixed (value, error) pair. Create a new
/// session whenever either input changes; line counts and interaction
/// state are only meaningful against the inputs they were built from.
#[derive(Debug, Default)]
pub struct RenderSession {
    state: HashMap<Path, NodeState>,
    counter: LineCounter,
    focused: Option<ControlId>,
}

impl RenderSession {
    pub fn new() -> Self {
        RenderSession {
            state: HashMap::new(),
            counter: LineCounter::new(),
            focused: None,
        }
    }

    /// Render the value with its error into ordered display lines.
    /// Deterministic for a given (value, error, state) snapshot.
    pub fn render(&mut self, data: &Value, error: &ValidationError) -> Vec<RenderedLine> {
        let mut out = Vec::new();
        let mut next = 1;
        self.walk(
            &mut out,
            &mut next,
            data,
            error,
            data,
            &Path::root(),
            None,
            0,
            false,
            None,
        );
        out
    }

    /// Expand or collapse the leading span of the array at `path`. The
    /// toggled control keeps logical focus.
    pub fn toggle_start(&mut self, path: &Path) {
        let state = self.state.entry(path.clone()).or_default();
        state.start_collapsed = !state.start_collapsed;
        self.focused = Some(ControlId::Truncation(path.clone(), SpanEnd::Start));
    }

    /// Expand or collapse the trailing span of the array at `path`.
    pub fn toggle_end(&mut self, path: &Path) {
        let state = self.state.entry(path.clone()).or_default();
        state.end_collapsed = !state.end_collapsed;
        self.focused = Some(ControlId::Truncation(path.clone(), SpanEnd::End));
    }

    /// Select the union alternative shown for the node at `path`. The
    /// index is clamped to the alternatives seen at the last render;
    /// requests against unknown paths or beyond the edges are no-ops.
    pub fn select_union(&mut self, path: &Path, index: usize) {
        let Some(state) = self.state.get_mut(path) else {
            return;
        };
        if state.union_max == 0 {
            return;
        }
        let clamped = index.min(state.union_max - 1);
        if clamped == state.union_index {
            return;
        }
        let control = if clamped > state.union_index {
            ControlId::UnionNext(path.clone())
        } else {
            ControlId::UnionPrev(path.clone())
        };
        state.union_index = clamped;
        self.focused = Some(control);
    }

    /// The control that triggered the most recent state change, if any.
    pub fn focused_control(&self) -> Option<&ControlId> {
        self.focused.as_ref()
    }

    #[allow(clippy::too_many_arguments)]
    fn walk(
        &mut self,
        out: &mut Vec<RenderedLine>,
        next: &mut usize,
        value: &Value,
        error: &ValidationError,
        root: &Value,
        path: &Path,
        key: Option<&str>,
        indent: usize,
        comma: bool,
        truncation: Option<TruncationControl>,
    ) {
        match value {
            Value::Array(items) => {
                self.walk_array(out, next, items, error, root, path, key, indent, comma, truncation)
            }
            Value::Object(entries) => self.walk_object(
                out, next, entries, error, root, path, key, indent, comma, truncation,
            ),
            scalar => {
                let issues = resolve::relevant_issues(error, path, root);
                let mut line = RenderedLine::new(*next, indent);
                line.key = key.map(str::to_string);
                line.literal = Literal::of(scalar);
                line.comma = comma;
                line.issue = self.line_issue(&issues, path, root);
                line.truncation = truncation;
                out.push(line);
                *next += 1;
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn walk_array(
        &mut self,
        out: &mut Vec<RenderedLine>,
        next: &mut usize,
        items: &[Value],
        error: &ValidationError,
        root: &Value,
        path: &Path,
        key: Option<&str>,
        indent: usize,
        comma: bool,
        truncation: Option<TruncationControl>,
    ) {
        let direct: Vec<ValidationIssue> =
            resolve::direct_issues(error, path).into_iter().cloned().collect();

        let mut open = RenderedLine::new(*next, indent);
        open.key = key.map(str::to_string);
        open.bracket = Some('[');
        open.issue = self.line_issue(&direct, path, root);
        open.truncation = truncation;
        out.push(open);
        *next += 1;

        // The selected alternative's sub-error replaces the incoming
        // error for everything beneath this node.
        let effective = self.effective_error(error, path);

        // Flagged items are found against the incoming error: the union
        // issue itself sits at the array's own path, not at item paths.
        let window = ArrayWindow::compute(items.len(), |i| {
            let item_path = path.child(PathSeg::Index(i));
            error
                .issues
                .iter()
                .any(|issue| issue.path.starts_with(&item_path))
        });

        let state = self.state.entry(path.clone()).or_default();
        let (start_collapsed, end_collapsed) = (state.start_collapsed, state.end_collapsed);

        self.emit_span(
            out,
            next,
            items,
            effective,
            root,
            path,
            indent,
            window.leading.clone(),
            SpanEnd::Start,
            start_collapsed,
        );
        for i in window.middle.clone() {
            let item_path = path.child(PathSeg::Index(i));
            self.walk(
                out,
                next,
                &items[i],
                effective,
                root,
                &item_path,
                None,
                indent + 1,
                i != items.len() - 1,
                None,
            );
        }
        self.emit_span(
            out,
            next,
            items,
            effective,
            root,
            path,
            indent,
            window.trailing.clone(),
            SpanEnd::End,
            end_collapsed,
        );

        let mut close = RenderedLine::new(*next, indent);
        close.bracket = Some(']');
        close.comma = comma;
        out.push(close);
        *next += 1;
    }

    /// Emit a leading/trailing span: either one ellipsis line consuming
    /// the span's true line count, or every item with the collapse
    /// control on the first one.
    #[allow(clippy::too_many_arguments)]
    fn emit_span(
        &mut self,
        out: &mut Vec<RenderedLine>,
        next: &mut usize,
        items: &[Value],
        error: &ValidationError,
        root: &Value,
        array_path: &Path,
        indent: usize,
        span: std::ops::Range<usize>,
        end: SpanEnd,
        collapsed: bool,
    ) {
        if span.is_empty() {
            return;
        }

        if window::collapses(&span, collapsed) {
            let consumed = self.counter.count_span(items, array_path, span.clone());
            let mut line = RenderedLine::new(*next, indent + 1);
            line.truncation = Some(TruncationControl {
                path: array_path.clone(),
                end,
                expanded: false,
            });
            out.push(line);
            *next += consumed;
            return;
        }

        let collapsible = span.len() > window::COLLAPSE_THRESHOLD;
        for (position, i) in span.clone().enumerate() {
            let control = (collapsible && position == 0).then(|| TruncationControl {
                path: array_path.clone(),
                end,
                expanded: true,
            });
            let item_path = array_path.child(PathSeg::Index(i));
            self.walk(
                out,
                next,
                &items[i],
                error,
                root,
                &item_path,
                None,
                indent + 1,
                i != items.len() - 1,
                control,
            );
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn walk_object(
        &mut self,
        out: &mut Vec<RenderedLine>,
        next: &mut usize,
        entries: &[(String, Value)],
        error: &ValidationError,
        root: &Value,
        path: &Path,
        key: Option<&str>,
        indent: usize,
        comma: bool,
        truncation: Option<TruncationControl>,
    ) {
        let direct: Vec<ValidationIssue> =
            resolve::direct_issues(error, path).into_iter().cloned().collect();

        let mut open = RenderedLine::new(*next, indent);
        open.key = key.map(str::to_string);
        open.bracket = Some('{');
        open.issue = self.line_issue(&direct, path, root);
        open.truncation = truncation;
        out.push(open);
        *next += 1;

        let effective = self.effective_error(error, path);
        for (i, (entry_key, entry_value)) in entries.iter().enumerate() {
            let child_path = path.child(PathSeg::Key(entry_key.clone()));
            self.walk(
                out,
                next,
                entry_value,
                effective,
                root,
                &child_path,
                Some(entry_key),
                indent + 1,
                i != entries.len() - 1,
                None,
            );
        }

        // The missing-key scan runs against the incoming error, not the
        // selected alternative: it walks the full issue tree, union
        // branches included.
        let mut close = RenderedLine::new(*next, indent);
        close.bracket = Some('}');
        close.comma = comma;
        close.issue = resolve::missing_keys_issue(error, path, root).map(|issue| LineIssue {
            message: issue.message,
            switcher: None,
        });
        out.push(close);
        *next += 1;
    }

    /// The badge for a line, from its resolved issues. The first issue
    /// wins; an invalid-union issue gets the alternative switcher and
    /// registers/clamps this node's selection state.
    fn line_issue(
        &mut self,
        issues: &[ValidationIssue],
        path: &Path,
        root: &Value,
    ) -> Option<LineIssue> {
        let first = issues.first()?;

        if let IssueKind::InvalidUnion { union_errors } = &first.kind
            && !union_errors.is_empty()
        {
            let state = self.state.entry(path.clone()).or_default();
            state.union_max = union_errors.len();
            state.union_index = state.union_index.min(union_errors.len() - 1);
            let index = state.union_index;

            let nested_message = resolve::relevant_issues(&union_errors[index], path, root)
                .into_iter()
                .next()
                .map(|issue| issue.message)
                .unwrap_or_default();

            return Some(LineIssue {
                message: String::from("Invalid union entry"),
                switcher: Some(UnionSwitcher {
                    path: path.clone(),
                    index,
                    max: union_errors.len(),
                    nested_message,
                }),
            });
        }

        Some(LineIssue {
            message: first.message.clone(),
            switcher: None,
        })
    }

    /// The error tree a node's descendants see: the selected union
    /// alternative when this node carries an invalid-union issue, else
    /// the incoming error unchanged.
    fn effective_error<'a>(&self, error: &'a ValidationError, path: &Path) -> &'a ValidationError {
        let index = self
            .state
            .get(path)
            .map(|state| state.union_index)
            .unwrap_or(0);
        resolve::union_alternative(error, path, index).unwrap_or(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn value(json: serde_json::Value) -> Value {
        Value::from(json)
    }

    fn err(issues: serde_json::Value) -> ValidationError {
        serde_json::from_value(issues).unwrap()
    }

    /// 26 strings with a lone number at index 14.
    fn letters_with_bad_item() -> Value {
        let mut items: Vec<serde_json::Value> =
            ('a'..='n').map(|c| json!(c.to_string())).collect();
        items.push(json!(0));
        for c in 'p'..='z' {
            items.push(json!(c.to_string()));
        }
        value(json!(items))
    }

    fn wrong_type_at_14() -> ValidationError {
        err(json!([{
            "code": "invalid_type", "expected": "string", "received": "number",
            "path": [14], "message": "Expected string, received number"
        }]))
    }

    #[test]
    fn test_basic_scenario() {
        let data = value(json!({
            "person": {
                "name": "Han Solo",
                "age": "35",
                "shotFirst": false
            }
        }));
        let error = err(json!([
            {"code": "invalid_type", "expected": "number", "received": "string",
             "path": ["person", "age"], "message": "Expected number, received string"},
            {"code": "invalid_literal", "expected": true, "received": false,
             "path": ["person", "shotFirst"], "message": "Invalid literal value, expected true"}
        ]));

        let mut session = RenderSession::new();
        let rows = session.render(&data, &error);

        assert_eq!(rows.len(), 7);
        assert_eq!(
            rows.iter().map(|r| r.number).collect::<Vec<_>>(),
            vec![1, 2, 3, 4, 5, 6, 7]
        );

        assert_eq!(rows[0].bracket, Some('{'));
        assert_eq!(rows[1].key.as_deref(), Some("person"));
        assert_eq!(rows[1].bracket, Some('{'));
        assert_eq!(rows[1].indent, 1);

        assert_eq!(rows[2].key.as_deref(), Some("name"));
        assert!(rows[2].issue.is_none());
        assert!(rows[2].comma);

        assert_eq!(rows[3].key.as_deref(), Some("age"));
        assert_eq!(rows[3].literal, Some(Literal::Str(String::from("35"))));
        assert_eq!(
            rows[3].issue.as_ref().unwrap().message,
            "Expected number, received string"
        );
        assert!(rows[3].comma);

        assert_eq!(rows[4].key.as_deref(), Some("shotFirst"));
        assert_eq!(rows[4].literal, Some(Literal::Bool(false)));
        assert_eq!(
            rows[4].issue.as_ref().unwrap().message,
            "Invalid literal value, expected true"
        );
        assert!(!rows[4].comma);

        assert_eq!(rows[5].bracket, Some('}'));
        assert!(rows[5].issue.is_none());
        assert_eq!(rows[6].bracket, Some('}'));
        assert_eq!(rows[6].indent, 0);
    }

    #[test]
    fn test_row_count_matches_line_counter() {
        let data = value(json!({
            "name": "Faultline",
            "tags": ["a", "b", ["nested"]],
            "meta": {"empty": {}, "null": null}
        }));

        let mut session = RenderSession::new();
        let rows = session.render(&data, &ValidationError::default());

        let expected = LineCounter::new().count(&data, &Path::root());
        assert_eq!(rows.len(), expected);
        assert_eq!(rows.last().unwrap().number, expected);

        // Strictly increasing document order
        for pair in rows.windows(2) {
            assert!(pair[0].number < pair[1].number);
        }
    }

    #[test]
    fn test_render_is_idempotent() {
        let data = letters_with_bad_item();
        let error = wrong_type_at_14();

        let mut session = RenderSession::new();
        let first = session.render(&data, &error);
        let second = session.render(&data, &error);
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_keys_on_close_bracket() {
        let data = value(json!({"person": {"name": "Han Solo"}}));
        let error = err(json!([
            {"code": "invalid_type", "expected": "number", "received": "undefined",
             "path": ["person", "height"], "message": "Required"},
            {"code": "invalid_type", "expected": "number", "received": "undefined",
             "path": ["person", "age"], "message": "Required"},
            {"code": "invalid_type", "expected": "string", "received": "undefined",
             "path": ["person", "sideKick"], "message": "Required"},
            {"code": "invalid_type", "expected": "string", "received": "undefined",
             "path": ["person", "hairColor"], "message": "Required"}
        ]));

        let mut session = RenderSession::new();
        let rows = session.render(&data, &error);

        // 1 {  2 "person": {  3 "name"  4 }  5 }
        assert_eq!(rows.len(), 5);
        assert!(rows[1].issue.is_none());
        assert_eq!(rows[3].bracket, Some('}'));
        assert_eq!(
            rows[3].issue.as_ref().unwrap().message,
            "Object missing required keys: 'height', 'age', 'sideKick', 'hairColor'"
        );
        assert!(rows[4].issue.is_none());
    }

    #[test]
    fn test_missing_discriminator_key() {
        let data = value(json!({}));
        let error = err(json!([
            {"code": "invalid_union_discriminator", "options": ["square", "circle"],
             "path": ["type"], "message": "Invalid discriminator value"}
        ]));

        let mut session = RenderSession::new();
        let rows = session.render(&data, &error);

        assert_eq!(rows.len(), 2);
        assert!(rows[0].issue.is_none());
        assert_eq!(
            rows[1].issue.as_ref().unwrap().message,
            "Object missing required key: 'type'"
        );
    }

    #[test]
    fn test_union_navigation() {
        let data = value(json!({"person": {"name": "Han Solo", "age": "35"}}));
        let error = err(json!([
            {"code": "invalid_union", "path": [], "message": "Invalid input",
             "unionErrors": [
                {"issues": [{"code": "invalid_type", "expected": "string", "received": "object",
                             "path": [], "message": "Expected string, received object"}]},
                {"issues": [{"code": "invalid_type", "expected": "number", "received": "string",
                             "path": ["person", "age"], "message": "Expected number, received string"}]}
             ]}
        ]));

        let mut session = RenderSession::new();
        let rows = session.render(&data, &error);

        let badge = rows[0].issue.as_ref().unwrap();
        assert_eq!(badge.message, "Invalid union entry");
        let switcher = badge.switcher.as_ref().unwrap();
        assert_eq!((switcher.index, switcher.max), (0, 2));
        assert!(!switcher.prev_enabled());
        assert!(switcher.next_enabled());
        assert_eq!(switcher.nested_message, "Expected string, received object");

        // First alternative has no issue inside the tree
        assert!(rows[3].issue.is_none(), "age should be clean under 1/2");

        session.select_union(&Path::root(), 1);
        let rows = session.render(&data, &error);

        let switcher = rows[0].issue.as_ref().unwrap().switcher.as_ref().unwrap();
        assert_eq!((switcher.index, switcher.max), (1, 2));
        assert!(switcher.prev_enabled());
        assert!(!switcher.next_enabled());
        assert_eq!(switcher.nested_message, "");
        assert_eq!(
            rows[3].issue.as_ref().unwrap().message,
            "Expected number, received string"
        );

        // Edges are inert, not wrapping
        session.select_union(&Path::root(), 5);
        let rows = session.render(&data, &error);
        let switcher = rows[0].issue.as_ref().unwrap().switcher.as_ref().unwrap();
        assert_eq!(switcher.index, 1);
    }

    #[test]
    fn test_union_on_nested_object() {
        let data = value(json!({"person": {"name": "Han Solo", "age": true}}));
        let error = err(json!([
            {"code": "invalid_union", "path": ["person"], "message": "Invalid input",
             "unionErrors": [
                {"issues": [{"code": "invalid_type", "expected": "number", "received": "boolean",
                             "path": ["person", "age"], "message": "Expected number, received boolean"}]},
                {"issues": [{"code": "invalid_type", "expected": "string", "received": "boolean",
                             "path": ["person", "age"], "message": "Expected string, received boolean"}]}
             ]}
        ]));

        let mut session = RenderSession::new();
        let rows = session.render(&data, &error);

        let badge = rows[1].issue.as_ref().unwrap();
        assert_eq!(badge.message, "Invalid union entry");
        // Neither alternative has an issue at the person path itself
        assert_eq!(badge.switcher.as_ref().unwrap().nested_message, "");
        assert_eq!(
            rows[3].issue.as_ref().unwrap().message,
            "Expected number, received boolean"
        );

        session.select_union(&Path::root().key("person"), 1);
        let rows = session.render(&data, &error);
        assert_eq!(
            rows[3].issue.as_ref().unwrap().message,
            "Expected string, received boolean"
        );
    }

    #[test]
    fn test_union_missing_keys_in_nested_message() {
        let data = value(json!({"name": "Han Solo"}));
        let error = err(json!([
            {"code": "invalid_union", "path": [], "message": "Invalid input",
             "unionErrors": [
                {"issues": [
                    {"code": "invalid_type", "expected": "number", "received": "undefined",
                     "path": ["age"], "message": "Required"},
                    {"code": "invalid_type", "expected": "number", "received": "undefined",
                     "path": ["height"], "message": "Required"}
                ]},
                {"issues": [{"code": "invalid_type", "expected": "string", "received": "object",
                             "path": [], "message": "Expected string, received object"}]}
             ]}
        ]));

        let mut session = RenderSession::new();
        let rows = session.render(&data, &error);

        let switcher = rows[0].issue.as_ref().unwrap().switcher.as_ref().unwrap();
        assert_eq!(
            switcher.nested_message,
            "Object missing required keys: 'age', 'height'"
        );
        // One branch rejects the object shape outright, so the root
        // object is not reported as missing the keys itself
        assert!(rows[2].issue.is_none());
    }

    #[test]
    fn test_truncated_array_numbering() {
        let data = letters_with_bad_item();
        let error = wrong_type_at_14();

        let mut session = RenderSession::new();
        let rows = session.render(&data, &error);

        assert_eq!(rows.len(), 5);
        assert_eq!(
            rows.iter().map(|r| r.number).collect::<Vec<_>>(),
            vec![1, 2, 16, 17, 28]
        );

        assert_eq!(rows[0].bracket, Some('['));
        assert!(rows[1].is_ellipsis());
        let leading = rows[1].truncation.as_ref().unwrap();
        assert_eq!(leading.end, SpanEnd::Start);
        assert_eq!(leading.accessible_name(), "Expand");

        assert_eq!(rows[2].literal, Some(Literal::Num(0.0)));
        assert_eq!(
            rows[2].issue.as_ref().unwrap().message,
            "Expected string, received number"
        );
        assert!(rows[2].comma);

        assert!(rows[3].is_ellipsis());
        assert_eq!(rows[3].truncation.as_ref().unwrap().end, SpanEnd::End);
        assert_eq!(rows[4].bracket, Some(']'));
    }

    #[test]
    fn test_expand_and_collapse_leading_span() {
        let data = letters_with_bad_item();
        let error = wrong_type_at_14();

        let mut session = RenderSession::new();
        let collapsed = session.render(&data, &error);

        session.toggle_start(&Path::root());
        assert_eq!(
            session.focused_control(),
            Some(&ControlId::Truncation(Path::root(), SpanEnd::Start))
        );

        let rows = session.render(&data, &error);
        // [ + 14 items + flagged item + trailing ellipsis + ]
        assert_eq!(rows.len(), 18);
        assert_eq!(rows[1].number, 2);
        assert_eq!(rows[1].literal, Some(Literal::Str(String::from("a"))));
        assert!(rows[1].comma);

        // The collapse control moves onto the first item of the span
        let control = rows[1].truncation.as_ref().unwrap();
        assert_eq!(control.end, SpanEnd::Start);
        assert_eq!(control.accessible_name(), "Collapse");
        assert!(rows[2].truncation.is_none());

        // Trailing span is untouched and numbering still lines up
        assert_eq!(rows[15].number, 16);
        assert!(rows[16].is_ellipsis());
        assert_eq!(rows[16].number, 17);
        assert_eq!(rows[17].number, 28);

        // Collapsing again restores the original rendering
        session.toggle_start(&Path::root());
        assert_eq!(session.render(&data, &error), collapsed);
    }

    #[test]
    fn test_independent_span_toggles() {
        let data = letters_with_bad_item();
        let error = wrong_type_at_14();

        let mut session = RenderSession::new();
        session.render(&data, &error);

        session.toggle_end(&Path::root());
        let rows = session.render(&data, &error);

        // Leading stays collapsed while the trailing span is open
        assert!(rows[1].is_ellipsis());
        assert_eq!(rows[3].literal, Some(Literal::Str(String::from("p"))));
        assert_eq!(rows[3].number, 17);
        let control = rows[3].truncation.as_ref().unwrap();
        assert_eq!(control.end, SpanEnd::End);
        assert!(control.expanded);
        // "z" has no trailing comma
        assert!(!rows[13].comma);
        assert_eq!(rows[13].literal, Some(Literal::Str(String::from("z"))));
    }

    #[test]
    fn test_no_comma_when_flagged_item_ends_array() {
        let mut items: Vec<serde_json::Value> =
            (0..6).map(|i| json!(i.to_string())).collect();
        items.push(json!(0));
        let data = value(json!(items));
        let error = err(json!([{
            "code": "invalid_type", "expected": "string", "received": "number",
            "path": [6], "message": "Expected string, received number"
        }]));

        let mut session = RenderSession::new();
        let rows = session.render(&data, &error);

        // [ + leading ellipsis + flagged last item + ]
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[2].number, 8);
        assert!(!rows[2].comma, "last item must not carry a comma");
    }

    #[test]
    fn test_short_spans_never_collapse() {
        let data = value(json!(["a", "b", "c", 0, "d"]));
        let error = err(json!([{
            "code": "invalid_type", "expected": "string", "received": "number",
            "path": [3], "message": "Expected string, received number"
        }]));

        let mut session = RenderSession::new();
        let rows = session.render(&data, &error);

        // Everything renders; spans of five or fewer have no controls
        assert_eq!(rows.len(), 7);
        assert!(rows.iter().all(|r| r.truncation.is_none()));
    }

    #[test]
    fn test_enum_message_passthrough() {
        let data = value(json!({"hairColor": "blue"}));
        let error = err(json!([{
            "code": "invalid_enum_value", "options": ["brown", "black"],
            "path": ["hairColor"],
            "message": "Invalid enum value. Expected 'brown' | 'black', received 'blue'"
        }]));

        let mut session = RenderSession::new();
        let rows = session.render(&data, &error);
        assert_eq!(
            rows[1].issue.as_ref().unwrap().message,
            "Invalid enum value. Expected 'brown' | 'black', received 'blue'"
        );
    }

    #[test]
    fn test_undefined_renders_as_literal() {
        let mut session = RenderSession::new();
        let rows = session.render(&Value::Undefined, &ValidationError::default());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].literal, Some(Literal::Undefined));

        let data = Value::Object(vec![(String::from("gone"), Value::Undefined)]);
        let rows = session.render(&data, &ValidationError::default());
        assert_eq!(rows[1].literal, Some(Literal::Undefined));
    }

    #[test]
    fn test_empty_containers() {
        let mut session = RenderSession::new();
        let rows = session.render(&value(json!({"a": {}, "b": []})), &ValidationError::default());

        assert_eq!(
            rows.iter().map(|r| r.number).collect::<Vec<_>>(),
            vec![1, 2, 3, 4, 5, 6]
        );
        // "a": {} close bracket carries the comma, "b": [] does not
        assert!(rows[2].comma);
        assert!(!rows[4].comma);
    }

    #[test]
    fn test_select_union_without_state_is_a_noop() {
        let mut session = RenderSession::new();
        session.select_union(&Path::root().key("nowhere"), 3);
        assert_eq!(session.focused_control(), None);
    }
}
