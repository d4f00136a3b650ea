//! Per-compilation state.

use std::collections::BTreeSet;

use irony_common::Place;

/// State threaded through one compile call: the temp/label counter and the
/// set of known function names.
///
/// A fresh context is built for every call to [`compile`](crate::compile),
/// so compilations never influence each other.
#[derive(Debug, Default)]
pub struct CompileContext {
    counter: u64,
    functions: BTreeSet<String>,
}

impl CompileContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a function name seen in a `def`.
    pub fn declare_function(&mut self, name: &str) {
        self.functions.insert(name.to_string());
    }

    /// Returns true if `name` was declared by a `def` anywhere in the source.
    pub fn is_function(&self, name: &str) -> bool {
        self.functions.contains(name)
    }

    /// A temp never handed out before in this compilation.
    pub fn fresh_temp(&mut self) -> Place {
        Place::Temp(self.next())
    }

    /// A label stem never handed out before in this compilation. Labels and
    /// temps share one counter.
    pub fn fresh_label(&mut self) -> String {
        format!("L{}", self.next())
    }

    fn next(&mut self) -> u64 {
        self.counter += 1;
        self.counter
    }
}

/// Returns true if `name` has the shape of a generated block label,
/// `L<n>_start` or `L<n>_end`.
pub(crate) fn is_generated_label(name: &str) -> bool {
    let Some(rest) = name.strip_prefix('L') else {
        return false;
    };
    rest.strip_suffix("_start")
        .or_else(|| rest.strip_suffix("_end"))
        .is_some_and(|n| !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()))
}
