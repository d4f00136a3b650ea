//! Lowering from the AST to three-address assembly.
//!
//! Expressions compile to a location (literal, temp or variable) plus the
//! instructions that fill it. Splitting rules, in order:
//! ```text
//! fib n - 1   first word is a known function → call with the rest as argument
//! a - b + c   any '+' → split at the first '+', giving (a - b) + c
//! a - b - c   any '-' → split at the first '-', giving a - (b - c)
//! n, 42       terminal
//! ```
//! Repeated subtraction therefore nests to the right.

use irony_common::{Instruction, Operand, Place, Program, RETVAL};

use crate::ast::Node;
use crate::context::{is_generated_label, CompileContext};
use crate::error::CompileError;
use crate::options::ConditionLowering;

/// Label of the program entry point.
pub const MAIN_LABEL: &str = "main";

/// The threshold `if` uses under [`ConditionLowering::ConstantTwo`].
const CONSTANT_THRESHOLD: i64 = 2;

/// Code generator for one compilation.
pub struct CodeGen {
    ctx: CompileContext,
    condition: ConditionLowering,
}

impl CodeGen {
    /// Wrap a context that already knows every function name.
    pub fn new(ctx: CompileContext, condition: ConditionLowering) -> Self {
        Self { ctx, condition }
    }

    /// Compile an expression. Returns where its value ends up and the
    /// instructions that put it there.
    pub fn compile_expr(&mut self, text: &str) -> Result<(Operand, Vec<Instruction>), CompileError> {
        let text = text.trim();

        let mut words = text.split_whitespace();
        if let Some(name) = words.next().filter(|w| self.ctx.is_function(w)) {
            let arg = words.collect::<Vec<_>>().join(" ");
            if !arg.is_empty() {
                let (arg_loc, mut code) = self.compile_expr(&arg)?;
                let result = self.ctx.fresh_temp();
                code.push(Instruction::Push(arg_loc));
                code.push(Instruction::Call(name.to_string()));
                code.push(Instruction::Mov(Operand::var(RETVAL), result.clone()));
                return Ok((result.into(), code));
            }
        }

        if let Some((left, right)) = text.split_once('+') {
            return self.compile_binary(left, right, Instruction::Add);
        }
        if let Some((left, right)) = text.split_once('-') {
            return self.compile_binary(left, right, Instruction::Sub);
        }

        let operand = Operand::parse(text).map_err(|_| CompileError::InvalidExpression {
            expr: text.to_string(),
        })?;
        Ok((operand, Vec::new()))
    }

    fn compile_binary(
        &mut self,
        left: &str,
        right: &str,
        make: fn(Operand, Operand, Place) -> Instruction,
    ) -> Result<(Operand, Vec<Instruction>), CompileError> {
        let (left_loc, mut code) = self.compile_expr(left)?;
        let (right_loc, right_code) = self.compile_expr(right)?;
        code.extend(right_code);
        let result = self.ctx.fresh_temp();
        code.push(make(left_loc, right_loc, result.clone()));
        Ok((result.into(), code))
    }

    /// Compile one statement, appending to `out`.
    pub fn compile_stmt(&mut self, node: &Node, out: &mut Vec<Instruction>) -> Result<(), CompileError> {
        match node {
            Node::Assign { var, expr } => {
                let target = target(var)?;
                let (loc, code) = self.compile_expr(expr)?;
                out.extend(code);
                out.push(Instruction::Mov(loc, target));
            }
            Node::Return { expr } => {
                let (loc, code) = self.compile_expr(expr)?;
                out.extend(code);
                out.push(Instruction::Ret(loc));
            }
            Node::Print { expr } => {
                let (loc, code) = self.compile_expr(expr)?;
                out.extend(code);
                out.push(Instruction::Print(loc));
            }
            Node::If { cond, body } => self.compile_if(cond, body, out)?,
            Node::For {
                var,
                from,
                to,
                body,
            } => self.compile_for(var, from, to, body, out)?,
            Node::Def { name, .. } => {
                return Err(CompileError::NestedFunction { name: name.clone() });
            }
        }
        Ok(())
    }

    /// `if a < b`: skip the body when `a >= threshold`.
    fn compile_if(&mut self, cond: &str, body: &[Node], out: &mut Vec<Instruction>) -> Result<(), CompileError> {
        let (left, right) = cond
            .split_once('<')
            .ok_or_else(|| CompileError::UnsupportedCondition {
                cond: cond.to_string(),
            })?;

        let (left_loc, left_code) = self.compile_expr(left)?;
        let (right_loc, right_code) = self.compile_expr(right)?;
        let end = format!("{}_end", self.ctx.fresh_label());

        let threshold = match self.condition {
            ConditionLowering::ConstantTwo => Operand::Literal(CONSTANT_THRESHOLD),
            ConditionLowering::RightOperand => right_loc,
        };

        out.extend(left_code);
        out.extend(right_code);
        out.push(Instruction::Jge(left_loc, threshold, end.clone()));
        for stmt in body {
            self.compile_stmt(stmt, out)?;
        }
        out.push(Instruction::Label(end));
        Ok(())
    }

    /// Inclusive pre-test loop. The bound is evaluated once, after the loop
    /// variable is initialised, and held in a temp.
    fn compile_for(
        &mut self,
        var: &str,
        from: &str,
        to: &str,
        body: &[Node],
        out: &mut Vec<Instruction>,
    ) -> Result<(), CompileError> {
        let counter = target(var)?;
        let (from_loc, from_code) = self.compile_expr(from)?;
        let (to_loc, to_code) = self.compile_expr(to)?;
        let stem = self.ctx.fresh_label();
        let start = format!("{stem}_start");
        let end = format!("{stem}_end");

        out.extend(from_code);
        out.push(Instruction::Mov(from_loc, counter.clone()));
        out.extend(to_code);
        let bound = self.ctx.fresh_temp();
        out.push(Instruction::Mov(to_loc, bound.clone()));

        out.push(Instruction::Label(start.clone()));
        out.push(Instruction::Jgt(counter.clone().into(), bound.into(), end.clone()));
        for stmt in body {
            self.compile_stmt(stmt, out)?;
        }

        let next = self.ctx.fresh_temp();
        out.push(Instruction::Add(
            counter.clone().into(),
            Operand::Literal(1),
            next.clone(),
        ));
        out.push(Instruction::Mov(next.into(), counter));
        out.push(Instruction::Jmp(start));
        out.push(Instruction::Label(end));
        Ok(())
    }

    /// `LABEL name`, `PARAM arg`, then the body. The name becomes a label, so
    /// it must not clash with `main` or a generated block label.
    pub fn compile_fn(&mut self, name: &str, arg: &str, body: &[Node]) -> Result<Vec<Instruction>, CompileError> {
        if name == MAIN_LABEL || is_generated_label(name) {
            return Err(CompileError::ReservedName {
                name: name.to_string(),
            });
        }
        let mut out = vec![
            Instruction::Label(name.to_string()),
            Instruction::Param(target(arg)?),
        ];
        for stmt in body {
            self.compile_stmt(stmt, &mut out)?;
        }
        Ok(out)
    }

    /// Lay out a whole program:
    /// ```text
    /// JMP main
    /// <every def, in source order>
    /// LABEL main
    /// <every other top-level statement, in source order>
    /// HALT
    /// ```
    pub fn compile_all(mut self, ast: &[Node]) -> Result<Program, CompileError> {
        let mut functions = Vec::new();
        let mut main = Vec::new();

        for node in ast {
            match node {
                Node::Def { name, arg, body } => {
                    functions.extend(self.compile_fn(name, arg, body)?);
                }
                stmt => self.compile_stmt(stmt, &mut main)?,
            }
        }

        let mut instructions = Vec::with_capacity(functions.len() + main.len() + 3);
        instructions.push(Instruction::Jmp(MAIN_LABEL.to_string()));
        instructions.extend(functions);
        instructions.push(Instruction::Label(MAIN_LABEL.to_string()));
        instructions.extend(main);
        instructions.push(Instruction::Halt);
        Ok(Program::new(instructions))
    }
}

/// A variable a statement writes to.
fn target(name: &str) -> Result<Place, CompileError> {
    Place::parse(name).map_err(|_| CompileError::InvalidTarget {
        name: name.to_string(),
    })
}
