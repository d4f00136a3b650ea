//! Line-oriented parser for Irony source.
//!
//! Each non-blank, non-comment line is one statement. Block statements
//! (`def`, `if`, `for`) open a new body that collects lines until the
//! matching `end`.

use crate::ast::Node;
use crate::context::CompileContext;
use crate::error::ParseError;
use crate::options::Dialect;

/// A recognized source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Line<'s> {
    Def { name: &'s str, arg: &'s str },
    If { cond: &'s str },
    For { var: &'s str, from: &'s str, to: &'s str },
    Return { expr: &'s str },
    Print { expr: &'s str },
    Assign { var: &'s str, expr: &'s str },
    End,
}

/// Classify one stripped line, trying the statement forms in priority order.
pub(crate) fn classify(line: &str, dialect: Dialect) -> Option<Line<'_>> {
    if let Some(rest) = line.strip_prefix("def ") {
        if let Some((name, arg)) = rest.split_once(' ') {
            if is_word(name) && is_word(arg) {
                return Some(Line::Def { name, arg });
            }
        }
    }

    if let Some(cond) = line.strip_prefix("if ") {
        return Some(Line::If { cond });
    }

    if dialect == Dialect::Full {
        if let Some(header) = parse_for(line) {
            return Some(header);
        }
    }

    if let Some(expr) = line.strip_prefix("return ") {
        return Some(Line::Return { expr });
    }

    if let Some(expr) = line.strip_prefix("print ") {
        return Some(Line::Print { expr });
    }

    if let Some((var, expr)) = line.split_once('=') {
        let var = var.trim_end();
        let expr = expr.trim_start();
        if is_word(var) && !expr.is_empty() {
            return Some(Line::Assign { var, expr });
        }
    }

    (line == "end").then_some(Line::End)
}

/// `for <var> from <expr> to <expr>`. The bound is split at the last ` to `.
fn parse_for(line: &str) -> Option<Line<'_>> {
    let rest = line.strip_prefix("for ")?;
    let (var, rest) = rest.split_once(' ')?;
    let range = rest.strip_prefix("from ")?;
    let (from, to) = range.rsplit_once(" to ")?;
    (is_word(var) && !from.is_empty() && !to.is_empty()).then_some(Line::For { var, from, to })
}

fn is_word(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_alphanumeric() || c == '_')
}

/// A block whose `end` has not been seen yet.
struct OpenBlock {
    /// Source line of the header, for error reporting.
    line: usize,
    text: String,
    node: Node,
    body: Vec<Node>,
}

/// Parser position and open-block stack for one parse.
struct ParserState {
    /// Index of the next raw line to read.
    pos: usize,
    open: Vec<OpenBlock>,
    top_level: Vec<Node>,
}

impl ParserState {
    fn new() -> Self {
        Self {
            pos: 0,
            open: Vec::new(),
            top_level: Vec::new(),
        }
    }

    /// The body currently collecting statements.
    fn current_body(&mut self) -> &mut Vec<Node> {
        match self.open.last_mut() {
            Some(block) => &mut block.body,
            None => &mut self.top_level,
        }
    }

    fn open(&mut self, line: usize, text: &str, node: Node) {
        self.open.push(OpenBlock {
            line,
            text: text.to_string(),
            node,
            body: Vec::new(),
        });
    }

    fn close(&mut self, line: usize) -> Result<(), ParseError> {
        let block = self.open.pop().ok_or(ParseError::UnmatchedEnd { line })?;
        let node = with_body(block.node, block.body);
        self.current_body().push(node);
        Ok(())
    }

    fn finish(mut self) -> Result<Vec<Node>, ParseError> {
        match self.open.pop() {
            Some(block) => Err(ParseError::UnclosedBlock {
                line: block.line,
                text: block.text,
            }),
            None => Ok(self.top_level),
        }
    }
}

fn with_body(node: Node, body: Vec<Node>) -> Node {
    match node {
        Node::Def { name, arg, .. } => Node::Def { name, arg, body },
        Node::If { cond, .. } => Node::If { cond, body },
        Node::For { var, from, to, .. } => Node::For {
            var,
            from,
            to,
            body,
        },
        simple => simple,
    }
}

/// Parse source lines into top-level statements.
///
/// Blank lines and lines starting with `#` (after trimming) are skipped.
/// Every function name seen in a `def` is declared in `ctx`, so calls can be
/// recognized later regardless of definition order.
pub fn parse<S: AsRef<str>>(
    lines: &[S],
    dialect: Dialect,
    ctx: &mut CompileContext,
) -> Result<Vec<Node>, ParseError> {
    let mut state = ParserState::new();

    while let Some(raw) = lines.get(state.pos) {
        let line_num = state.pos + 1;
        state.pos += 1;

        let text = raw.as_ref().trim();
        if text.is_empty() || text.starts_with('#') {
            continue;
        }

        let line = classify(text, dialect).ok_or_else(|| ParseError::UnrecognizedLine {
            line: line_num,
            text: text.to_string(),
        })?;

        match line {
            Line::Def { name, arg } => {
                ctx.declare_function(name);
                let node = Node::Def {
                    name: name.to_string(),
                    arg: arg.to_string(),
                    body: Vec::new(),
                };
                state.open(line_num, text, node);
            }
            Line::If { cond } => {
                let node = Node::If {
                    cond: cond.to_string(),
                    body: Vec::new(),
                };
                state.open(line_num, text, node);
            }
            Line::For { var, from, to } => {
                let node = Node::For {
                    var: var.to_string(),
                    from: from.to_string(),
                    to: to.to_string(),
                    body: Vec::new(),
                };
                state.open(line_num, text, node);
            }
            Line::Return { expr } => state.current_body().push(Node::Return {
                expr: expr.to_string(),
            }),
            Line::Print { expr } => state.current_body().push(Node::Print {
                expr: expr.to_string(),
            }),
            Line::Assign { var, expr } => state.current_body().push(Node::Assign {
                var: var.to_string(),
                expr: expr.to_string(),
            }),
            Line::End => state.close(line_num)?,
        }
    }

    state.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full(line: &str) -> Option<Line<'_>> {
        classify(line, Dialect::Full)
    }

    fn parse_full(lines: &[&str]) -> Result<Vec<Node>, ParseError> {
        parse(lines, Dialect::Full, &mut CompileContext::new())
    }

    #[test]
    fn classify_def() {
        assert_eq!(full("def fib n"), Some(Line::Def { name: "fib", arg: "n" }));
    }

    #[test]
    fn def_with_two_args_is_unrecognized() {
        assert_eq!(full("def f a b"), None);
    }

    #[test]
    fn classify_if_keeps_condition_text() {
        assert_eq!(full("if n < 2"), Some(Line::If { cond: "n < 2" }));
    }

    #[test]
    fn classify_for() {
        assert_eq!(
            full("for i from 1 to n - 1"),
            Some(Line::For {
                var: "i",
                from: "1",
                to: "n - 1"
            })
        );
    }

    #[test]
    fn for_bound_splits_at_last_to() {
        assert_eq!(
            full("for i from a to b to c"),
            Some(Line::For {
                var: "i",
                from: "a to b",
                to: "c"
            })
        );
    }

    #[test]
    fn teaching_dialect_has_no_for() {
        assert_eq!(classify("for i from 1 to 5", Dialect::Teaching), None);
    }

    #[test]
    fn classify_assign_with_and_without_spaces() {
        assert_eq!(full("x = 1"), Some(Line::Assign { var: "x", expr: "1" }));
        assert_eq!(full("x=a+b"), Some(Line::Assign { var: "x", expr: "a+b" }));
    }

    #[test]
    fn keyword_prefix_is_not_a_keyword() {
        assert_eq!(
            full("iffy = 3"),
            Some(Line::Assign {
                var: "iffy",
                expr: "3"
            })
        );
    }

    #[test]
    fn classify_end_exactly() {
        assert_eq!(full("end"), Some(Line::End));
        assert_eq!(full("endx"), None);
    }

    #[test]
    fn nested_blocks() {
        let ast = parse_full(&["def f n", "if n < 2", "return n", "end", "return 0", "end"]).unwrap();
        assert_eq!(
            ast,
            vec![Node::Def {
                name: "f".to_string(),
                arg: "n".to_string(),
                body: vec![
                    Node::If {
                        cond: "n < 2".to_string(),
                        body: vec![Node::Return {
                            expr: "n".to_string()
                        }],
                    },
                    Node::Return {
                        expr: "0".to_string()
                    },
                ],
            }]
        );
    }

    #[test]
    fn blank_and_comment_lines_are_skipped() {
        let ast = parse_full(&["", "   # a comment", "  print 1  "]).unwrap();
        assert_eq!(
            ast,
            vec![Node::Print {
                expr: "1".to_string()
            }]
        );
    }

    #[test]
    fn def_names_are_recorded() {
        let mut ctx = CompileContext::new();
        parse(&["def a x", "end", "def b y", "end"], Dialect::Full, &mut ctx).unwrap();
        assert!(ctx.is_function("a"));
        assert!(ctx.is_function("b"));
    }

    #[test]
    fn unrecognized_line_reports_raw_position() {
        let err = parse_full(&["x = 1", "", "while x"]).unwrap_err();
        assert_eq!(
            err,
            ParseError::UnrecognizedLine {
                line: 3,
                text: "while x".to_string()
            }
        );
    }

    #[test]
    fn stray_end() {
        let err = parse_full(&["print 1", "end"]).unwrap_err();
        assert_eq!(err, ParseError::UnmatchedEnd { line: 2 });
    }

    #[test]
    fn unclosed_block_reports_innermost_header() {
        let err = parse_full(&["def f n", "if n < 2", "return n"]).unwrap_err();
        assert_eq!(
            err,
            ParseError::UnclosedBlock {
                line: 2,
                text: "if n < 2".to_string()
            }
        );
    }
}
