use super::Recognizer;
use crate::error::GrammarError;
use std::collections::BTreeMap;
use std::fmt;

/// Builds a fresh recognizer bound to an input buffer
pub type Constructor = fn(&str) -> Box<dyn Recognizer>;

/// A registered grammar
#[derive(Clone)]
pub struct GrammarDescriptor {
    pub name: String,
    pub description: String,
    build: Constructor,
}

impl fmt::Debug for GrammarDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GrammarDescriptor")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

impl GrammarDescriptor {
    /// Construct a new recognizer over `input`
    pub fn build(&self, input: &str) -> Box<dyn Recognizer> {
        (self.build)(input)
    }
}

/// Name -> constructor table for grammar recognizers
///
/// Iteration is in lexicographic name order so scans over every grammar are
/// reproducible.
pub struct GrammarRegistry {
    grammars: BTreeMap<String, GrammarDescriptor>,
}

impl GrammarRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            grammars: BTreeMap::new(),
        }
    }

    /// Create a registry holding every built-in grammar
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        crate::grammars::register_defaults(&mut registry);
        registry
    }

    /// Register a grammar under `name`
    ///
    /// Replaces any grammar previously registered under the same name.
    ///
    /// # Example
    /// ```ignore
    /// registry.register("passwd", "passwd(5) entries", GrammarParser::<Passwd>::boxed);
    /// ```
    pub fn register(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        build: Constructor,
    ) {
        let name = name.into();
        self.grammars.insert(
            name.clone(),
            GrammarDescriptor {
                name,
                description: description.into(),
                build,
            },
        );
    }

    /// Look up a grammar by name
    pub fn resolve(&self, name: &str) -> Result<&GrammarDescriptor, GrammarError> {
        self.grammars
            .get(name)
            .ok_or_else(|| GrammarError::UnknownGrammar(name.to_string()))
    }

    pub fn get(&self, name: &str) -> Option<&GrammarDescriptor> {
        self.grammars.get(name)
    }

    /// Registered grammars in name order
    pub fn iter(&self) -> impl Iterator<Item = &GrammarDescriptor> {
        self.grammars.values()
    }

    pub fn names(&self) -> Vec<&str> {
        self.grammars.keys().map(|s| s.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.grammars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grammars.is_empty()
    }
}

impl Default for GrammarRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
