//! Identifier spelling.
//!
//! Variables and labels without a source name get one generated from their
//! type; any name colliding with a reserved word is written with an `@`
//! prefix.

use std::borrow::Cow;

use readex_repr::TypeRef;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::type_names::variable_base_name;

/// Reserved words that cannot be used as bare identifiers
const RESERVED_WORDS: &[&str] = &[
    "abstract", "as", "base", "bool", "break", "byte", "case", "catch", "char", "checked",
    "class", "const", "continue", "decimal", "default", "delegate", "do", "double", "else",
    "enum", "event", "explicit", "extern", "false", "finally", "fixed", "float", "for",
    "foreach", "goto", "if", "implicit", "in", "int", "interface", "internal", "is", "lock",
    "long", "namespace", "new", "null", "object", "operator", "out", "override", "params",
    "private", "protected", "public", "readonly", "ref", "return", "sbyte", "sealed", "short",
    "sizeof", "stackalloc", "static", "string", "struct", "switch", "this", "throw", "true",
    "try", "typeof", "uint", "ulong", "unchecked", "unsafe", "ushort", "using", "virtual",
    "void", "volatile", "while",
];

/// Is `name` a reserved word?
pub fn is_reserved_word(name: &str) -> bool {
    RESERVED_WORDS.binary_search(&name).is_ok()
}

/// Spell `name` as a valid identifier
pub fn escape_identifier(name: &str) -> Cow<'_, str> {
    if is_reserved_word(name) {
        Cow::Owned(format!("@{name}"))
    } else {
        Cow::Borrowed(name)
    }
}

/// Hands out generated names that never collide with source names
#[derive(Debug, Default)]
pub(crate) struct NameGenerator {
    taken: FxHashSet<String>,
    counters: FxHashMap<String, usize>,
}

impl NameGenerator {
    /// Reserve a name that appears in the source tree
    pub fn reserve(&mut self, name: &str) {
        self.taken.insert(name.to_owned());
    }

    /// Next free name for a variable of type `ty` (`int1`, `int2`, ...)
    pub fn variable(&mut self, ty: &TypeRef) -> String {
        let base = variable_base_name(ty);
        self.next(&base)
    }

    /// Next free label name
    pub fn label(&mut self) -> String {
        self.next("label")
    }

    fn next(&mut self, base: &str) -> String {
        let counter = self.counters.entry(base.to_owned()).or_insert(0);
        loop {
            *counter += 1;
            let candidate = format!("{base}{counter}");
            if !self.taken.contains(&candidate) {
                self.taken.insert(candidate.clone());
                return candidate;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reserved_words_sorted() {
        let mut sorted = RESERVED_WORDS.to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, RESERVED_WORDS);
    }

    #[test]
    fn test_escape_identifier() {
        assert_eq!(escape_identifier("class"), "@class");
        assert_eq!(escape_identifier("value"), "value");
        assert!(matches!(escape_identifier("count"), Cow::Borrowed(_)));
    }

    #[test]
    fn test_generated_names_skip_taken() {
        let mut names = NameGenerator::default();
        names.reserve("int1");
        assert_eq!(names.variable(&TypeRef::INT), "int2");
        assert_eq!(names.variable(&TypeRef::INT), "int3");
        assert_eq!(names.variable(&TypeRef::STRING), "string1");
        assert_eq!(names.label(), "label1");
    }
}
