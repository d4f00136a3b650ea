//! Abstract syntax tree for Irony source.
//!
//! Expression and condition text is kept verbatim; nothing is evaluated
//! or simplified until code generation.

/// A single statement. Blocks own their bodies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// `def <name> <arg>` … `end`
    Def {
        name: String,
        arg: String,
        body: Vec<Node>,
    },
    /// `if <cond>` … `end`
    If { cond: String, body: Vec<Node> },
    /// `for <var> from <from> to <to>` … `end`
    For {
        var: String,
        from: String,
        to: String,
        body: Vec<Node>,
    },
    /// `return <expr>`
    Return { expr: String },
    /// `print <expr>`
    Print { expr: String },
    /// `<var> = <expr>`
    Assign { var: String, expr: String },
}
