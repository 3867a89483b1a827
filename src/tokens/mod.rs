//! Token model for the expression front end

pub mod token;

pub use token::{Token, TokenDefinition, TokenType};
