//! Parser configuration
//!
//! [`ParserConfig::default`] gives the stock behaviour: the built-in list of
//! type names recognised by the cast heuristic and a nesting limit of
//! [`DEFAULT_MAX_DEPTH`].

use rustc_hash::FxHashSet;

/// Words that, directly after `(`, make the parenthesized tokens a type name.
pub const BUILTIN_TYPE_NAMES: [&str; 13] = [
    "bool",
    "char",
    "double",
    "float",
    "int",
    "long",
    "off_t",
    "ptrdiff_t",
    "signed",
    "short",
    "size_t",
    "time_t",
    "unsigned",
];

/// Default bound on grammar nesting and on parse tree height.
pub const DEFAULT_MAX_DEPTH: usize = 256;

#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Deepest allowed nesting of recursive grammar rules, and tallest allowed
    /// parse tree. Deeper input fails with an ordinary parse error.
    pub max_depth: usize,
    /// Type-name starters for the cast heuristic.
    pub type_names: FxHashSet<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            type_names: BUILTIN_TYPE_NAMES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ParserConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Treat `name` as a type-name starter, e.g. a typedef known to the caller.
    pub fn with_type_name(mut self, name: impl Into<String>) -> Self {
        self.type_names.insert(name.into());
        self
    }

    pub fn is_type_name(&self, word: &str) -> bool {
        self.type_names.contains(word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_type_names() {
        let config = ParserConfig::default();
        for name in BUILTIN_TYPE_NAMES {
            assert!(config.is_type_name(name), "{name} should be a type name");
        }
        assert!(!config.is_type_name("y"));
        assert!(!config.is_type_name("void"));
        assert!(!config.is_type_name("struct"));
    }

    #[test]
    fn test_builder() {
        let config = ParserConfig::new()
            .with_max_depth(8)
            .with_type_name("uint32_t");
        assert_eq!(config.max_depth, 8);
        assert!(config.is_type_name("uint32_t"));
        assert!(config.is_type_name("int"));
    }
}
