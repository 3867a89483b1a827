//! Function dictionary with case-insensitive name lookup
//!
//! Keys are normalized on both insert and query, so `sum`, `Sum` and `SUM`
//! all resolve to the same definition.

use crate::functions::FunctionDefinition;
use std::collections::HashMap;
use std::sync::Arc;

/// Lookup interface the tokenizer consults for `name(` resolution
pub trait FunctionDictionary {
    /// Register a definition under the (case-insensitive) name, replacing
    /// any earlier definition with the same name
    fn add_function(&mut self, name: &str, definition: Arc<FunctionDefinition>);

    fn get_function(&self, name: &str) -> Option<Arc<FunctionDefinition>>;

    fn has_function(&self, name: &str) -> bool {
        self.get_function(name).is_some()
    }
}

/// Map-backed dictionary with uppercase-normalized keys
#[derive(Default)]
pub struct MapBasedFunctionDictionary {
    functions: HashMap<String, Arc<FunctionDefinition>>,
}

impl MapBasedFunctionDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dictionary from `(name, definition)` pairs, in order
    pub fn of_functions(functions: Vec<(&str, Arc<FunctionDefinition>)>) -> Self {
        let mut dictionary = Self::new();
        for (name, definition) in functions {
            dictionary.add_function(name, definition);
        }
        dictionary
    }

    fn normalize(name: &str) -> String {
        name.to_uppercase()
    }
}

impl FunctionDictionary for MapBasedFunctionDictionary {
    fn add_function(&mut self, name: &str, definition: Arc<FunctionDefinition>) {
        self.functions.insert(Self::normalize(name), definition);
    }

    fn get_function(&self, name: &str) -> Option<Arc<FunctionDefinition>> {
        self.functions.get(&Self::normalize(name)).cloned()
    }
}
