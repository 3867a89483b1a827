//! The context-sensitive expression tokenizer
//!
//! Reads the expression left to right and emits tokens in infix order,
//! skipping blanks. Tokenization is not regular: whether a lexeme is a
//! prefix, postfix, or infix operator, and whether an identifier is a
//! function or a variable, depends on the previously emitted token and on
//! the dictionaries held by the configuration.

use crate::config::ExpressionConfiguration;
use crate::lexical::error::{messages, ParseError};
use crate::logging::codes;
use crate::tokens::{Token, TokenType};
use crate::{log_debug, log_error, log_success};

/// Three-state scan cursor: before the first read, at a character, or past
/// the end of input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scan {
    NotStarted,
    At(char),
    End,
}

/// Tokenizer for one expression string.
///
/// Bound to one configuration and consumed by exactly one [`parse`] call;
/// the produced tokens outlive the tokenizer.
///
/// [`parse`]: Tokenizer::parse
pub struct Tokenizer<'a> {
    source: &'a str,
    chars: Vec<char>,
    /// Index of the next character to consume; doubles as the 1-based
    /// column of the current character
    cursor: usize,
    current: Scan,
    tokens: Vec<Token>,
    brace_balance: i32,
    array_balance: i32,
    /// Reserved for a `${…}`-style variable syntax; no current lexeme
    /// increments it, but the end-of-input check stays in place
    var_balance: i32,
    configuration: &'a ExpressionConfiguration,
}

impl<'a> Tokenizer<'a> {
    pub fn new(expression: &'a str, configuration: &'a ExpressionConfiguration) -> Self {
        Self {
            source: expression,
            chars: expression.chars().collect(),
            cursor: 0,
            current: Scan::NotStarted,
            tokens: Vec::new(),
            brace_balance: 0,
            array_balance: 0,
            var_balance: 0,
            configuration,
        }
    }

    /// Parse the expression and return its tokens, in source order.
    ///
    /// The first detected error aborts the parse; there is no recovery.
    pub fn parse(mut self) -> Result<Vec<Token>, ParseError> {
        log_debug!("Starting tokenization", "expression_length" => self.chars.len());

        match self.run() {
            Ok(tokens) => {
                log_success!(
                    codes::success::TOKENIZATION_COMPLETE,
                    "Expression tokenized",
                    "expression_length" => self.chars.len(),
                    "token_count" => tokens.len()
                );
                Ok(tokens)
            }
            Err(error) => {
                log_error!(
                    codes::lexical::TOKENIZATION_FAILED,
                    &error.message,
                    span = error.span(),
                    "lexeme" => error.lexeme
                );
                Err(error)
            }
        }
    }

    fn run(&mut self) -> Result<Vec<Token>, ParseError> {
        while let Some(token) = self.next_token()? {
            self.validate_token(&token)?;
            self.tokens.push(token);
        }

        if self.brace_balance > 0 {
            return Err(ParseError::of_expression(
                self.source,
                messages::CLOSING_BRACE_NOT_FOUND,
            ));
        }

        if self.array_balance > 0 {
            return Err(ParseError::of_expression(
                self.source,
                messages::CLOSING_ARRAY_NOT_FOUND,
            ));
        }

        if self.var_balance > 0 {
            return Err(ParseError::of_expression(
                self.source,
                messages::CLOSING_VAR_NOT_FOUND,
            ));
        }

        Ok(std::mem::take(&mut self.tokens))
    }

    fn validate_token(&self, current: &Token) -> Result<(), ParseError> {
        let after_infix = self
            .previous_token()
            .map(|previous| previous.token_type() == TokenType::InfixOperator)
            .unwrap_or(false);

        if after_infix && Self::invalid_after_infix_operator(current.token_type()) {
            return Err(ParseError::at_token(
                current,
                messages::UNEXPECTED_TOKEN_AFTER_INFIX_OPERATOR,
            ));
        }
        Ok(())
    }

    fn invalid_after_infix_operator(token_type: TokenType) -> bool {
        matches!(
            token_type,
            TokenType::InfixOperator | TokenType::BraceClose | TokenType::Comma
        )
    }

    fn next_token(&mut self) -> Result<Option<Token>, ParseError> {
        // blanks are always skipped
        self.skip_blanks();

        let current = match self.current {
            // NotStarted cannot survive skip_blanks
            Scan::NotStarted | Scan::End => return Ok(None),
            Scan::At(current) => current,
        };

        if current == '"' {
            self.parse_string_literal().map(Some)
        } else if current == '(' {
            Ok(Some(self.parse_brace_open()))
        } else if current == ')' {
            self.parse_brace_close().map(Some)
        } else if current == '[' && self.configuration.is_arrays_allowed() {
            Ok(Some(self.parse_array_open()))
        } else if current == ']' && self.configuration.is_arrays_allowed() {
            self.parse_array_close().map(Some)
        } else if current == ',' {
            let token = Token::new(self.cursor, ",", TokenType::Comma);
            self.consume_char();
            Ok(Some(token))
        } else if self.is_at_identifier_start() {
            self.parse_identifier().map(Some)
        } else if self.is_at_number_start() {
            self.parse_number_literal().map(Some)
        } else {
            self.parse_operator().map(Some)
        }
    }

    // ========================================================================
    // Braces, arrays, commas
    // ========================================================================

    fn parse_brace_open(&mut self) -> Token {
        let token = Token::new(self.cursor, "(", TokenType::BraceOpen);
        self.consume_char();
        self.brace_balance += 1;
        token
    }

    fn parse_brace_close(&mut self) -> Result<Token, ParseError> {
        let token = Token::new(self.cursor, ")", TokenType::BraceClose);
        self.consume_char();
        self.brace_balance -= 1;
        if self.brace_balance < 0 {
            return Err(ParseError::at_token(&token, messages::UNEXPECTED_CLOSING_BRACE));
        }
        Ok(token)
    }

    fn parse_array_open(&mut self) -> Token {
        let token = Token::new(self.cursor, "[", TokenType::ArrayOpen);
        self.consume_char();
        self.array_balance += 1;
        token
    }

    fn parse_array_close(&mut self) -> Result<Token, ParseError> {
        let token = Token::new(self.cursor, "]", TokenType::ArrayClose);
        if !self.array_close_allowed() {
            return Err(ParseError::at_token(
                &token,
                messages::ARRAY_CLOSE_NOT_ALLOWED_HERE,
            ));
        }
        self.consume_char();
        self.array_balance -= 1;
        if self.array_balance < 0 {
            return Err(ParseError::at_token(&token, messages::UNEXPECTED_CLOSING_ARRAY));
        }
        Ok(token)
    }

    // ========================================================================
    // Context predicates; all read only the previously emitted token
    // ========================================================================

    fn previous_token(&self) -> Option<&Token> {
        self.tokens.last()
    }

    fn prefix_operator_allowed(&self) -> bool {
        match self.previous_token() {
            None => true,
            Some(previous) => matches!(
                previous.token_type(),
                TokenType::BraceOpen
                    | TokenType::InfixOperator
                    | TokenType::Comma
                    | TokenType::PrefixOperator
            ),
        }
    }

    fn postfix_operator_allowed(&self) -> bool {
        match self.previous_token() {
            None => false,
            Some(previous) => matches!(
                previous.token_type(),
                TokenType::BraceClose
                    | TokenType::NumberLiteral
                    | TokenType::VariableOrConstant
                    | TokenType::StringLiteral
            ),
        }
    }

    fn infix_operator_allowed(&self) -> bool {
        match self.previous_token() {
            None => false,
            Some(previous) => matches!(
                previous.token_type(),
                TokenType::BraceClose
                    | TokenType::VariableOrConstant
                    | TokenType::StringLiteral
                    | TokenType::PostfixOperator
                    | TokenType::NumberLiteral
            ),
        }
    }

    fn array_close_allowed(&self) -> bool {
        match self.previous_token() {
            None => false,
            Some(previous) => !matches!(
                previous.token_type(),
                TokenType::BraceOpen
                    | TokenType::InfixOperator
                    | TokenType::PrefixOperator
                    | TokenType::Function
                    | TokenType::Comma
                    | TokenType::ArrayOpen
            ),
        }
    }

    // ========================================================================
    // Operators
    // ========================================================================

    /// Greedy maximal munch: keep extending the lexeme while the extension
    /// is still a candidate in a fixity partition reachable from this
    /// context.
    fn parse_operator(&mut self) -> Result<Token, ParseError> {
        let start_column = self.cursor;
        let prefix_allowed = self.prefix_operator_allowed();
        let postfix_allowed = self.postfix_operator_allowed();
        let infix_allowed = self.infix_operator_allowed();
        let dictionary = self.configuration.operator_dictionary();

        let mut value = String::new();
        while let Scan::At(current) = self.current {
            value.push(current);
            let extension_found = match self.peek_next_char() {
                Some(next) => {
                    let mut candidate = value.clone();
                    candidate.push(next);
                    (prefix_allowed && dictionary.has_prefix_operator(&candidate))
                        || (postfix_allowed && dictionary.has_postfix_operator(&candidate))
                        || (infix_allowed && dictionary.has_infix_operator(&candidate))
                }
                None => false,
            };
            self.consume_char();
            if !extension_found {
                break;
            }
        }

        if prefix_allowed {
            if let Some(definition) = dictionary.get_prefix_operator(&value) {
                return Ok(Token::operator(
                    start_column,
                    value,
                    TokenType::PrefixOperator,
                    definition,
                ));
            }
        }
        if postfix_allowed {
            if let Some(definition) = dictionary.get_postfix_operator(&value) {
                return Ok(Token::operator(
                    start_column,
                    value,
                    TokenType::PostfixOperator,
                    definition,
                ));
            }
        }
        if let Some(definition) = dictionary.get_infix_operator(&value) {
            return Ok(Token::operator(
                start_column,
                value,
                TokenType::InfixOperator,
                definition,
            ));
        }

        let end_column = start_column + value.chars().count() - 1;
        let message = messages::undefined_operator(&value);
        Err(ParseError::new(start_column, end_column, value, message))
    }

    // ========================================================================
    // Identifiers: operator words, functions, variables
    // ========================================================================

    fn parse_identifier(&mut self) -> Result<Token, ParseError> {
        let start_column = self.cursor;
        let mut name = String::new();
        while let Scan::At(current) = self.current {
            if !Self::is_identifier_char(current) {
                break;
            }
            name.push(current);
            self.consume_char();
        }

        // identifier names may shadow word operators ("mod", "not", ...)
        let dictionary = self.configuration.operator_dictionary();
        if self.prefix_operator_allowed() {
            if let Some(definition) = dictionary.get_prefix_operator(&name) {
                return Ok(Token::operator(
                    start_column,
                    name,
                    TokenType::PrefixOperator,
                    definition,
                ));
            }
        }
        if self.postfix_operator_allowed() {
            if let Some(definition) = dictionary.get_postfix_operator(&name) {
                return Ok(Token::operator(
                    start_column,
                    name,
                    TokenType::PostfixOperator,
                    definition,
                ));
            }
        }
        if let Some(definition) = dictionary.get_infix_operator(&name) {
            return Ok(Token::operator(
                start_column,
                name,
                TokenType::InfixOperator,
                definition,
            ));
        }

        // a following "(" makes this a function call; the brace itself is
        // left for the next dispatch cycle
        self.skip_blanks();
        if self.current == Scan::At('(') {
            let Some(definition) = self.configuration.function_dictionary().get_function(&name)
            else {
                let message = messages::undefined_function(&name);
                return Err(ParseError::new(start_column, self.cursor, name, message));
            };
            return Ok(Token::function(start_column, name, definition));
        }

        Ok(Token::new(start_column, name, TokenType::VariableOrConstant))
    }

    // ========================================================================
    // Number literals
    // ========================================================================

    fn parse_number_literal(&mut self) -> Result<Token, ParseError> {
        if self.current == Scan::At('0') && matches!(self.peek_next_char(), Some('x') | Some('X')) {
            Ok(self.parse_hex_number_literal())
        } else {
            self.parse_decimal_number_literal()
        }
    }

    fn parse_hex_number_literal(&mut self) -> Token {
        let start_column = self.cursor;
        let mut value = String::new();

        // hexadecimal number, consume "0x"
        if let Scan::At(current) = self.current {
            value.push(current);
        }
        self.consume_char();
        if let Scan::At(current) = self.current {
            value.push(current);
        }
        self.consume_char();

        while let Scan::At(current) = self.current {
            if !current.is_ascii_hexdigit() {
                break;
            }
            value.push(current);
            self.consume_char();
        }
        Token::new(start_column, value, TokenType::NumberLiteral)
    }

    fn parse_decimal_number_literal(&mut self) -> Result<Token, ParseError> {
        let start_column = self.cursor;
        let mut value = String::new();
        let mut last_char = None;
        let mut scientific_notation = false;

        while let Scan::At(current) = self.current {
            if !self.is_at_number_char() {
                break;
            }
            if current == 'e' || current == 'E' {
                scientific_notation = true;
            }
            value.push(current);
            last_char = Some(current);
            self.consume_char();
        }

        // a trailing exponent marker, sign, or separator means the exponent
        // was never completed
        if scientific_notation && matches!(last_char, Some('e' | 'E' | '+' | '-' | '.')) {
            let token = Token::new(start_column, value, TokenType::NumberLiteral);
            return Err(ParseError::at_token(&token, messages::ILLEGAL_SCIENTIFIC_FORMAT));
        }

        Ok(Token::new(start_column, value, TokenType::NumberLiteral))
    }

    // ========================================================================
    // String literals
    // ========================================================================

    fn parse_string_literal(&mut self) -> Result<Token, ParseError> {
        let start_column = self.cursor;
        let mut value = String::new();

        // skip starting quote
        self.consume_char();
        let mut in_quote = true;
        while in_quote {
            match self.current {
                Scan::At('\\') => {
                    self.consume_char();
                    match self.current {
                        Scan::At(escaped) => value.push(self.escape_character(escaped)?),
                        // backslash at end of input: the closing quote is
                        // missing either way
                        _ => break,
                    }
                }
                Scan::At('"') => in_quote = false,
                Scan::At(current) => value.push(current),
                Scan::NotStarted | Scan::End => break,
            }
            self.consume_char();
        }

        if in_quote {
            return Err(ParseError::new(
                start_column,
                self.cursor,
                value,
                messages::CLOSING_QUOTE_NOT_FOUND,
            ));
        }
        Ok(Token::new(start_column, value, TokenType::StringLiteral))
    }

    fn escape_character(&self, character: char) -> Result<char, ParseError> {
        match character {
            '\'' => Ok('\''),
            '"' => Ok('"'),
            '\\' => Ok('\\'),
            'n' => Ok('\n'),
            'r' => Ok('\r'),
            't' => Ok('\t'),
            'b' => Ok('\u{0008}'),
            'f' => Ok('\u{000C}'),
            _ => Err(ParseError::new(
                self.cursor,
                self.cursor,
                format!("\\{}", character),
                messages::UNKNOWN_ESCAPE_CHARACTER,
            )),
        }
    }

    // ========================================================================
    // Character classes and cursor movement
    // ========================================================================

    fn is_at_identifier_start(&self) -> bool {
        matches!(
            self.current,
            Scan::At(current) if current.is_alphabetic() || current == '_' || current == '{' || current == '}'
        )
    }

    // `-` is a legal identifier continuation; at an identifier boundary the
    // operator dispatch still sees infix minus, so `a-b` is one identifier
    // but `a - b` is a subtraction
    fn is_identifier_char(character: char) -> bool {
        character.is_alphanumeric()
            || character == '_'
            || character == '-'
            || character == '{'
            || character == '}'
    }

    fn is_at_number_start(&self) -> bool {
        match self.current {
            Scan::At(current) if current.is_ascii_digit() => true,
            Scan::At('.') => self
                .peek_next_char()
                .map(|next| next.is_ascii_digit())
                .unwrap_or(false),
            _ => false,
        }
    }

    fn is_at_number_char(&self) -> bool {
        let Scan::At(current) = self.current else {
            return false;
        };
        let previous = self.peek_previous_char();

        if matches!(previous, Some('e' | 'E')) && current != '.' {
            return current.is_ascii_digit() || current == '+' || current == '-';
        }

        if previous == Some('.') {
            return current.is_ascii_digit() || current == 'e' || current == 'E';
        }

        current.is_ascii_digit() || current == '.' || current == 'e' || current == 'E'
    }

    fn skip_blanks(&mut self) {
        if self.current == Scan::NotStarted {
            // consume first character of expression
            self.consume_char();
        }
        while let Scan::At(current) = self.current {
            if !current.is_whitespace() {
                break;
            }
            self.consume_char();
        }
    }

    fn peek_next_char(&self) -> Option<char> {
        self.chars.get(self.cursor).copied()
    }

    fn peek_previous_char(&self) -> Option<char> {
        if self.cursor >= 2 {
            Some(self.chars[self.cursor - 2])
        } else {
            None
        }
    }

    fn consume_char(&mut self) {
        if self.cursor == self.chars.len() {
            self.current = Scan::End;
        } else {
            self.current = Scan::At(self.chars[self.cursor]);
            self.cursor += 1;
        }
    }
}
