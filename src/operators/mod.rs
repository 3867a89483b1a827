//! Operator definitions for the expression engine
//!
//! An operator definition carries the metadata the front end needs: which
//! fixities the name may appear in, its precedence, and its associativity.
//! Evaluation semantics live behind the engine's evaluator interface and are
//! not part of this crate's front end.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Where an operator appears relative to its operand(s)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Fixity {
    /// Before its operand: `-x`
    Prefix,
    /// After its operand: `x!`
    Postfix,
    /// Between two operands: `x + y`
    Infix,
}

impl Fixity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Fixity::Prefix => "prefix",
            Fixity::Postfix => "postfix",
            Fixity::Infix => "infix",
        }
    }
}

impl fmt::Display for Fixity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Grouping direction for operators of equal precedence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Associativity {
    Left,
    Right,
}

/// The standard precedence ladder.
///
/// Higher values bind tighter. The gaps leave room for user-registered
/// operators between the standard levels.
pub mod precedence {
    /// Or operator `||`
    pub const OPERATOR_PRECEDENCE_OR: i32 = 2;

    /// And operator `&&`
    pub const OPERATOR_PRECEDENCE_AND: i32 = 4;

    /// Equality operators `=`, `==`, `!=`, `<>`
    pub const OPERATOR_PRECEDENCE_EQUALITY: i32 = 7;

    /// Comparison operators `<`, `<=`, `>`, `>=`
    pub const OPERATOR_PRECEDENCE_COMPARISON: i32 = 10;

    /// Additive operators `+`, `-`
    pub const OPERATOR_PRECEDENCE_ADDITIVE: i32 = 12;

    /// Multiplicative operators `*`, `/`, `%`
    pub const OPERATOR_PRECEDENCE_MULTIPLICATIVE: i32 = 14;

    /// Power operator `^`
    pub const OPERATOR_PRECEDENCE_POWER: i32 = 16;

    /// Unary operators, e.g. prefix `-` and `!`
    pub const OPERATOR_PRECEDENCE_UNARY: i32 = 60;

    /// Alternative power precedence: binds tighter than unary minus, so that
    /// `-2^2` parses as `-(2^2)`
    pub const OPERATOR_PRECEDENCE_POWER_HIGHER: i32 = 80;
}

/// Metadata describing one operator.
///
/// A single definition may declare several fixities; the operator dictionary
/// indexes it under each of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatorDefinition {
    fixities: Vec<Fixity>,
    precedence: i32,
    associativity: Associativity,
}

impl OperatorDefinition {
    pub fn new(fixities: Vec<Fixity>, precedence: i32, associativity: Associativity) -> Self {
        debug_assert!(!fixities.is_empty(), "operator must declare a fixity");
        Self {
            fixities,
            precedence,
            associativity,
        }
    }

    /// A prefix-only operator
    pub fn prefix(precedence: i32) -> Self {
        Self::new(vec![Fixity::Prefix], precedence, Associativity::Right)
    }

    /// A postfix-only operator
    pub fn postfix(precedence: i32) -> Self {
        Self::new(vec![Fixity::Postfix], precedence, Associativity::Left)
    }

    /// An infix operator
    pub fn infix(precedence: i32, associativity: Associativity) -> Self {
        Self::new(vec![Fixity::Infix], precedence, associativity)
    }

    pub fn has_fixity(&self, fixity: Fixity) -> bool {
        self.fixities.contains(&fixity)
    }

    pub fn is_prefix(&self) -> bool {
        self.has_fixity(Fixity::Prefix)
    }

    pub fn is_postfix(&self) -> bool {
        self.has_fixity(Fixity::Postfix)
    }

    pub fn is_infix(&self) -> bool {
        self.has_fixity(Fixity::Infix)
    }

    pub fn fixities(&self) -> &[Fixity] {
        &self.fixities
    }

    pub fn precedence(&self) -> i32 {
        self.precedence
    }

    pub fn associativity(&self) -> Associativity {
        self.associativity
    }

    pub fn is_left_associative(&self) -> bool {
        self.associativity == Associativity::Left
    }
}

/// The standard operator set seeded into every default configuration.
///
/// `+` and `-` appear twice: once as prefix sign operators and once as infix
/// arithmetic; the dictionary keeps them in separate fixity partitions.
pub fn standard_operators() -> Vec<(&'static str, Arc<OperatorDefinition>)> {
    use precedence::*;

    vec![
        // arithmetic
        ("+", Arc::new(OperatorDefinition::prefix(OPERATOR_PRECEDENCE_UNARY))),
        ("-", Arc::new(OperatorDefinition::prefix(OPERATOR_PRECEDENCE_UNARY))),
        (
            "+",
            Arc::new(OperatorDefinition::infix(
                OPERATOR_PRECEDENCE_ADDITIVE,
                Associativity::Left,
            )),
        ),
        (
            "-",
            Arc::new(OperatorDefinition::infix(
                OPERATOR_PRECEDENCE_ADDITIVE,
                Associativity::Left,
            )),
        ),
        (
            "*",
            Arc::new(OperatorDefinition::infix(
                OPERATOR_PRECEDENCE_MULTIPLICATIVE,
                Associativity::Left,
            )),
        ),
        (
            "/",
            Arc::new(OperatorDefinition::infix(
                OPERATOR_PRECEDENCE_MULTIPLICATIVE,
                Associativity::Left,
            )),
        ),
        (
            "^",
            Arc::new(OperatorDefinition::infix(
                OPERATOR_PRECEDENCE_POWER,
                Associativity::Right,
            )),
        ),
        (
            "%",
            Arc::new(OperatorDefinition::infix(
                OPERATOR_PRECEDENCE_MULTIPLICATIVE,
                Associativity::Left,
            )),
        ),
        // comparison
        (
            "=",
            Arc::new(OperatorDefinition::infix(
                OPERATOR_PRECEDENCE_EQUALITY,
                Associativity::Left,
            )),
        ),
        (
            "==",
            Arc::new(OperatorDefinition::infix(
                OPERATOR_PRECEDENCE_EQUALITY,
                Associativity::Left,
            )),
        ),
        (
            "!=",
            Arc::new(OperatorDefinition::infix(
                OPERATOR_PRECEDENCE_EQUALITY,
                Associativity::Left,
            )),
        ),
        (
            "<>",
            Arc::new(OperatorDefinition::infix(
                OPERATOR_PRECEDENCE_EQUALITY,
                Associativity::Left,
            )),
        ),
        (
            ">",
            Arc::new(OperatorDefinition::infix(
                OPERATOR_PRECEDENCE_COMPARISON,
                Associativity::Left,
            )),
        ),
        (
            ">=",
            Arc::new(OperatorDefinition::infix(
                OPERATOR_PRECEDENCE_COMPARISON,
                Associativity::Left,
            )),
        ),
        (
            "<",
            Arc::new(OperatorDefinition::infix(
                OPERATOR_PRECEDENCE_COMPARISON,
                Associativity::Left,
            )),
        ),
        (
            "<=",
            Arc::new(OperatorDefinition::infix(
                OPERATOR_PRECEDENCE_COMPARISON,
                Associativity::Left,
            )),
        ),
        // logical
        (
            "&&",
            Arc::new(OperatorDefinition::infix(
                OPERATOR_PRECEDENCE_AND,
                Associativity::Left,
            )),
        ),
        (
            "||",
            Arc::new(OperatorDefinition::infix(
                OPERATOR_PRECEDENCE_OR,
                Associativity::Left,
            )),
        ),
        ("!", Arc::new(OperatorDefinition::prefix(OPERATOR_PRECEDENCE_UNARY))),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixity_predicates() {
        let plus = OperatorDefinition::infix(precedence::OPERATOR_PRECEDENCE_ADDITIVE, Associativity::Left);
        assert!(plus.is_infix());
        assert!(!plus.is_prefix());
        assert!(!plus.is_postfix());
        assert!(plus.is_left_associative());
    }

    #[test]
    fn test_multi_fixity_definition() {
        let increment = OperatorDefinition::new(
            vec![Fixity::Prefix, Fixity::Postfix],
            precedence::OPERATOR_PRECEDENCE_UNARY,
            Associativity::Right,
        );
        assert!(increment.is_prefix());
        assert!(increment.is_postfix());
        assert!(!increment.is_infix());
    }

    #[test]
    fn test_standard_set_shape() {
        let operators = standard_operators();
        assert_eq!(operators.len(), 19);

        let prefix_names: Vec<&str> = operators
            .iter()
            .filter(|(_, definition)| definition.is_prefix())
            .map(|(name, _)| *name)
            .collect();
        assert_eq!(prefix_names, vec!["+", "-", "!"]);

        let infix_count = operators
            .iter()
            .filter(|(_, definition)| definition.is_infix())
            .count();
        assert_eq!(infix_count, 16);
    }

    #[test]
    fn test_power_is_right_associative() {
        let operators = standard_operators();
        let (_, power) = operators
            .iter()
            .find(|(name, definition)| *name == "^" && definition.is_infix())
            .unwrap();
        assert_eq!(power.associativity(), Associativity::Right);
        assert_eq!(power.precedence(), precedence::OPERATOR_PRECEDENCE_POWER);
    }
}
