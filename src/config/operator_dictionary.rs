//! Operator dictionary: name to definition, partitioned by fixity
//!
//! A single name may exist in several partitions at once (`+` is both a
//! prefix sign and infix addition). Name matching is exact and
//! case-sensitive.

use crate::operators::{Fixity, OperatorDefinition};
use std::collections::HashMap;
use std::sync::Arc;

/// Lookup interface the tokenizer consults while classifying lexemes
pub trait OperatorDictionary {
    /// Register a definition under the name, in every fixity partition the
    /// definition declares. Registering an existing `(name, fixity)` pair
    /// replaces the earlier definition.
    fn add_operator(&mut self, name: &str, definition: Arc<OperatorDefinition>);

    fn get_prefix_operator(&self, name: &str) -> Option<Arc<OperatorDefinition>>;

    fn get_postfix_operator(&self, name: &str) -> Option<Arc<OperatorDefinition>>;

    fn get_infix_operator(&self, name: &str) -> Option<Arc<OperatorDefinition>>;

    fn has_prefix_operator(&self, name: &str) -> bool {
        self.get_prefix_operator(name).is_some()
    }

    fn has_postfix_operator(&self, name: &str) -> bool {
        self.get_postfix_operator(name).is_some()
    }

    fn has_infix_operator(&self, name: &str) -> bool {
        self.get_infix_operator(name).is_some()
    }
}

/// Map-backed dictionary with one map per fixity partition
#[derive(Default)]
pub struct MapBasedOperatorDictionary {
    prefix_operators: HashMap<String, Arc<OperatorDefinition>>,
    postfix_operators: HashMap<String, Arc<OperatorDefinition>>,
    infix_operators: HashMap<String, Arc<OperatorDefinition>>,
}

impl MapBasedOperatorDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dictionary from `(name, definition)` pairs, in order
    pub fn of_operators(operators: Vec<(&str, Arc<OperatorDefinition>)>) -> Self {
        let mut dictionary = Self::new();
        for (name, definition) in operators {
            dictionary.add_operator(name, definition);
        }
        dictionary
    }
}

impl OperatorDictionary for MapBasedOperatorDictionary {
    fn add_operator(&mut self, name: &str, definition: Arc<OperatorDefinition>) {
        if definition.has_fixity(Fixity::Prefix) {
            self.prefix_operators.insert(name.to_string(), definition.clone());
        }
        if definition.has_fixity(Fixity::Postfix) {
            self.postfix_operators.insert(name.to_string(), definition.clone());
        }
        if definition.has_fixity(Fixity::Infix) {
            self.infix_operators.insert(name.to_string(), definition);
        }
    }

    fn get_prefix_operator(&self, name: &str) -> Option<Arc<OperatorDefinition>> {
        self.prefix_operators.get(name).cloned()
    }

    fn get_postfix_operator(&self, name: &str) -> Option<Arc<OperatorDefinition>> {
        self.postfix_operators.get(name).cloned()
    }

    fn get_infix_operator(&self, name: &str) -> Option<Arc<OperatorDefinition>> {
        self.infix_operators.get(name).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operators::{precedence, standard_operators, Associativity};

    #[test]
    fn test_fixity_partitions_are_independent() {
        let dictionary = MapBasedOperatorDictionary::of_operators(standard_operators());

        // "+" lives in both the prefix and infix partitions
        assert!(dictionary.has_prefix_operator("+"));
        assert!(dictionary.has_infix_operator("+"));
        assert!(!dictionary.has_postfix_operator("+"));

        // "*" only in infix
        assert!(dictionary.has_infix_operator("*"));
        assert!(!dictionary.has_prefix_operator("*"));
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let mut dictionary = MapBasedOperatorDictionary::new();
        dictionary.add_operator(
            "not",
            Arc::new(OperatorDefinition::prefix(precedence::OPERATOR_PRECEDENCE_UNARY)),
        );

        assert!(dictionary.has_prefix_operator("not"));
        assert!(!dictionary.has_prefix_operator("NOT"));
        assert!(!dictionary.has_prefix_operator("Not"));
    }

    #[test]
    fn test_last_write_wins() {
        let mut dictionary = MapBasedOperatorDictionary::new();
        dictionary.add_operator(
            "**",
            Arc::new(OperatorDefinition::infix(
                precedence::OPERATOR_PRECEDENCE_MULTIPLICATIVE,
                Associativity::Left,
            )),
        );
        dictionary.add_operator(
            "**",
            Arc::new(OperatorDefinition::infix(
                precedence::OPERATOR_PRECEDENCE_POWER,
                Associativity::Right,
            )),
        );

        let definition = dictionary.get_infix_operator("**").unwrap();
        assert_eq!(definition.precedence(), precedence::OPERATOR_PRECEDENCE_POWER);
    }

    #[test]
    fn test_multi_fixity_definition_is_indexed_in_each_partition() {
        let mut dictionary = MapBasedOperatorDictionary::new();
        let increment = Arc::new(OperatorDefinition::new(
            vec![Fixity::Prefix, Fixity::Postfix],
            precedence::OPERATOR_PRECEDENCE_UNARY,
            Associativity::Right,
        ));
        dictionary.add_operator("++", increment);

        assert!(dictionary.has_prefix_operator("++"));
        assert!(dictionary.has_postfix_operator("++"));
        assert!(!dictionary.has_infix_operator("++"));
    }
}
