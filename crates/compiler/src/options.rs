//! Compile-time choices between the language's variants.

/// Which statement forms the parser accepts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Dialect {
    /// All seven statement forms, including `for`.
    #[default]
    Full,
    /// The teaching variant without `for`; a `for` line is unrecognized.
    Teaching,
}

/// What an `if a < b` compares `a` against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConditionLowering {
    /// `JGE a 2 L_end`: the threshold is always the literal 2, whatever `b`
    /// is. Only conditions of the form `x < 2` mean what they say.
    #[default]
    ConstantTwo,
    /// `JGE a b L_end`: the threshold is the compiled right-hand side.
    RightOperand,
}

/// Options for [`compile_with`](crate::compile_with).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompileOptions {
    pub dialect: Dialect,
    pub condition: ConditionLowering,
}

impl CompileOptions {
    /// Options for the teaching variant.
    pub fn teaching() -> Self {
        Self {
            dialect: Dialect::Teaching,
            ..Self::default()
        }
    }

    /// Compare `if` conditions against their right-hand side.
    pub fn with_condition(mut self, condition: ConditionLowering) -> Self {
        self.condition = condition;
        self
    }
}
