//! Token record and type tags
//!
//! Tokens follow the infix notation of the source expression, in source
//! order. Operator and function tokens carry the dictionary definition that
//! resolved them; every other token type carries none.

use crate::functions::FunctionDefinition;
use crate::operators::OperatorDefinition;
use crate::utils::Span;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// The closed set of token type tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TokenType {
    BraceOpen,
    BraceClose,
    ArrayOpen,
    ArrayClose,
    Comma,
    NumberLiteral,
    StringLiteral,
    VariableOrConstant,
    Function,
    PrefixOperator,
    InfixOperator,
    PostfixOperator,
}

impl TokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::BraceOpen => "BRACE_OPEN",
            TokenType::BraceClose => "BRACE_CLOSE",
            TokenType::ArrayOpen => "ARRAY_OPEN",
            TokenType::ArrayClose => "ARRAY_CLOSE",
            TokenType::Comma => "COMMA",
            TokenType::NumberLiteral => "NUMBER_LITERAL",
            TokenType::StringLiteral => "STRING_LITERAL",
            TokenType::VariableOrConstant => "VARIABLE_OR_CONSTANT",
            TokenType::Function => "FUNCTION",
            TokenType::PrefixOperator => "PREFIX_OPERATOR",
            TokenType::InfixOperator => "INFIX_OPERATOR",
            TokenType::PostfixOperator => "POSTFIX_OPERATOR",
        }
    }

    /// Token types that must carry a dictionary definition
    pub fn requires_definition(&self) -> bool {
        matches!(
            self,
            TokenType::PrefixOperator
                | TokenType::InfixOperator
                | TokenType::PostfixOperator
                | TokenType::Function
        )
    }

    pub fn is_operator(&self) -> bool {
        matches!(
            self,
            TokenType::PrefixOperator | TokenType::InfixOperator | TokenType::PostfixOperator
        )
    }
}

impl fmt::Display for TokenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The dictionary definition attached to operator and function tokens
#[derive(Debug, Clone, PartialEq)]
pub enum TokenDefinition {
    Operator(Arc<OperatorDefinition>),
    Function(Arc<FunctionDefinition>),
}

/// One token of a tokenized expression.
///
/// `value` holds the literal source text of the lexeme; for string literals
/// the escape sequences are already resolved. Invariant: `definition` is
/// present exactly when `token_type.requires_definition()`.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    start_column: usize,
    value: String,
    token_type: TokenType,
    definition: Option<TokenDefinition>,
}

impl Token {
    /// Create a token without a definition
    pub fn new(start_column: usize, value: impl Into<String>, token_type: TokenType) -> Self {
        debug_assert!(
            !token_type.requires_definition(),
            "{} tokens must carry a definition",
            token_type
        );
        Self {
            start_column,
            value: value.into(),
            token_type,
            definition: None,
        }
    }

    /// Create an operator token carrying its dictionary definition
    pub fn operator(
        start_column: usize,
        value: impl Into<String>,
        token_type: TokenType,
        definition: Arc<OperatorDefinition>,
    ) -> Self {
        debug_assert!(token_type.is_operator(), "{} is not an operator type", token_type);
        Self {
            start_column,
            value: value.into(),
            token_type,
            definition: Some(TokenDefinition::Operator(definition)),
        }
    }

    /// Create a function token carrying its dictionary definition
    pub fn function(
        start_column: usize,
        value: impl Into<String>,
        definition: Arc<FunctionDefinition>,
    ) -> Self {
        Self {
            start_column,
            value: value.into(),
            token_type: TokenType::Function,
            definition: Some(TokenDefinition::Function(definition)),
        }
    }

    /// 1-based column of the token's first character
    pub fn start_column(&self) -> usize {
        self.start_column
    }

    /// The lexeme text (escape-resolved for string literals)
    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn token_type(&self) -> TokenType {
        self.token_type
    }

    pub fn definition(&self) -> Option<&TokenDefinition> {
        self.definition.as_ref()
    }

    pub fn operator_definition(&self) -> Option<&Arc<OperatorDefinition>> {
        match &self.definition {
            Some(TokenDefinition::Operator(definition)) => Some(definition),
            _ => None,
        }
    }

    pub fn function_definition(&self) -> Option<&Arc<FunctionDefinition>> {
        match &self.definition {
            Some(TokenDefinition::Function(definition)) => Some(definition),
            _ => None,
        }
    }

    /// Columns covered by this token's lexeme
    pub fn span(&self) -> Span {
        Span::of_lexeme(self.start_column, self.value.chars().count())
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operators::{precedence, OperatorDefinition};

    #[test]
    fn test_definition_presence_invariant() {
        let number = Token::new(1, "42", TokenType::NumberLiteral);
        assert!(number.definition().is_none());

        let minus = Token::operator(
            3,
            "-",
            TokenType::InfixOperator,
            Arc::new(OperatorDefinition::infix(
                precedence::OPERATOR_PRECEDENCE_ADDITIVE,
                crate::operators::Associativity::Left,
            )),
        );
        assert!(minus.definition().is_some());
        assert!(minus.operator_definition().is_some());
        assert!(minus.function_definition().is_none());
    }

    #[test]
    fn test_requires_definition_partition() {
        let with_definition = [
            TokenType::PrefixOperator,
            TokenType::InfixOperator,
            TokenType::PostfixOperator,
            TokenType::Function,
        ];
        let without_definition = [
            TokenType::BraceOpen,
            TokenType::BraceClose,
            TokenType::ArrayOpen,
            TokenType::ArrayClose,
            TokenType::Comma,
            TokenType::NumberLiteral,
            TokenType::StringLiteral,
            TokenType::VariableOrConstant,
        ];
        for token_type in with_definition {
            assert!(token_type.requires_definition());
        }
        for token_type in without_definition {
            assert!(!token_type.requires_definition());
        }
    }

    #[test]
    fn test_span_covers_lexeme() {
        let token = Token::new(5, "1.5e+3", TokenType::NumberLiteral);
        assert_eq!(token.span(), Span::new(5, 10));
    }

    #[test]
    fn test_type_tags_render_like_the_wire_names() {
        assert_eq!(TokenType::VariableOrConstant.as_str(), "VARIABLE_OR_CONSTANT");
        assert_eq!(TokenType::BraceOpen.to_string(), "BRACE_OPEN");
    }
}
