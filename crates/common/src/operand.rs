//! Operand classification for Irony assembly.
//!
//! At the text boundary every operand is a single token. The token's shape
//! decides how the VM resolves it:
//! ```text
//! 42, -7     integer literal
//! tmp3       temp, backed by register 3 % 16
//! n, _retval ordinary variable, backed by a scoped memory cell
//! ```

use std::fmt;

use crate::error::OperandError;

/// The variable that carries a function's return value back to its caller.
/// It always lives in the global scope.
pub const RETVAL: &str = "_retval";

/// A value source: anything an instruction can read.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Operand {
    /// An integer literal.
    Literal(i64),
    /// A compiler temp `tmpN`.
    Temp(u64),
    /// An ordinary named variable.
    Var(String),
}

/// A storage location: anything an instruction can write.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Place {
    /// A compiler temp `tmpN`.
    Temp(u64),
    /// An ordinary named variable.
    Var(String),
}

impl Operand {
    /// Classify a single token.
    pub fn parse(token: &str) -> Result<Self, OperandError> {
        if token.is_empty() {
            return Err(OperandError::Empty);
        }

        let digits = token.strip_prefix('-').unwrap_or(token);
        if is_digits(digits) {
            return token
                .parse()
                .map(Operand::Literal)
                .map_err(|_| OperandError::LiteralOutOfRange(token.to_string()));
        }

        if let Some(index) = token.strip_prefix("tmp") {
            if is_digits(index) {
                return index
                    .parse()
                    .map(Operand::Temp)
                    .map_err(|_| OperandError::TempOutOfRange(token.to_string()));
            }
        }

        if token.chars().all(|c| c.is_alphanumeric() || c == '_') {
            Ok(Operand::Var(token.to_string()))
        } else {
            Err(OperandError::Malformed(token.to_string()))
        }
    }

    /// Shorthand for a named variable operand.
    pub fn var(name: impl Into<String>) -> Self {
        Operand::Var(name.into())
    }
}

impl Place {
    /// Classify a single token as a storage location. Literals are rejected.
    pub fn parse(token: &str) -> Result<Self, OperandError> {
        match Operand::parse(token)? {
            Operand::Literal(_) => Err(OperandError::NotAPlace(token.to_string())),
            Operand::Temp(n) => Ok(Place::Temp(n)),
            Operand::Var(name) => Ok(Place::Var(name)),
        }
    }

    /// Shorthand for a named variable place.
    pub fn var(name: impl Into<String>) -> Self {
        Place::Var(name.into())
    }
}

impl From<Place> for Operand {
    fn from(place: Place) -> Self {
        match place {
            Place::Temp(n) => Operand::Temp(n),
            Place::Var(name) => Operand::Var(name),
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Literal(n) => write!(f, "{n}"),
            Operand::Temp(n) => write!(f, "tmp{n}"),
            Operand::Var(name) => f.write_str(name),
        }
    }
}

impl fmt::Display for Place {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Place::Temp(n) => write!(f, "tmp{n}"),
            Place::Var(name) => f.write_str(name),
        }
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_positive() {
        assert_eq!(Operand::parse("42"), Ok(Operand::Literal(42)));
    }

    #[test]
    fn literal_negative() {
        assert_eq!(Operand::parse("-7"), Ok(Operand::Literal(-7)));
    }

    #[test]
    fn literal_out_of_range() {
        assert_eq!(
            Operand::parse("99999999999999999999"),
            Err(OperandError::LiteralOutOfRange(
                "99999999999999999999".to_string()
            ))
        );
    }

    #[test]
    fn temp_token() {
        assert_eq!(Operand::parse("tmp17"), Ok(Operand::Temp(17)));
    }

    #[test]
    fn bare_tmp_is_a_variable() {
        assert_eq!(Operand::parse("tmp"), Ok(Operand::var("tmp")));
    }

    #[test]
    fn tmp_prefix_with_letters_is_a_variable() {
        assert_eq!(Operand::parse("tmpx"), Ok(Operand::var("tmpx")));
    }

    #[test]
    fn retval_is_a_variable() {
        assert_eq!(Operand::parse(RETVAL), Ok(Operand::var("_retval")));
    }

    #[test]
    fn lone_minus_is_malformed() {
        assert_eq!(
            Operand::parse("-"),
            Err(OperandError::Malformed("-".to_string()))
        );
    }

    #[test]
    fn punctuation_is_malformed() {
        assert!(matches!(
            Operand::parse("a+b"),
            Err(OperandError::Malformed(_))
        ));
    }

    #[test]
    fn empty_token() {
        assert_eq!(Operand::parse(""), Err(OperandError::Empty));
    }

    #[test]
    fn place_rejects_literal() {
        assert_eq!(
            Place::parse("5"),
            Err(OperandError::NotAPlace("5".to_string()))
        );
    }

    #[test]
    fn place_accepts_temp_and_var() {
        assert_eq!(Place::parse("tmp2"), Ok(Place::Temp(2)));
        assert_eq!(Place::parse("sum"), Ok(Place::var("sum")));
    }

    #[test]
    fn display_matches_token_form() {
        assert_eq!(Operand::Literal(-3).to_string(), "-3");
        assert_eq!(Operand::Temp(9).to_string(), "tmp9");
        assert_eq!(Place::var("n").to_string(), "n");
    }

    #[test]
    fn place_into_operand() {
        assert_eq!(Operand::from(Place::Temp(4)), Operand::Temp(4));
    }
}
