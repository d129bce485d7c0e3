//! Conditional class-name merging
//!
//! Display code builds class lists out of plain strings, strings guarded by a
//! condition, and nested lists or maps of those. A `ClassMerger` flattens
//! them into one space-separated string. The supplied `LastWriteMerger`
//! resolves duplicates by keeping the last occurrence; richer styling-aware
//! conflict resolution belongs to an external implementation of the trait.

use std::collections::HashSet;

/// A class-name token, possibly conditional or nested
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassToken {
    /// Always included; may hold several whitespace-separated classes
    Text(String),
    /// Included only when the flag is set
    Conditional(String, bool),
    /// Nested tokens
    List(Vec<ClassToken>),
    /// Class name to inclusion flag, in insertion order
    Map(Vec<(String, bool)>),
}

impl From<&str> for ClassToken {
    fn from(s: &str) -> Self {
        ClassToken::Text(s.to_string())
    }
}

impl From<String> for ClassToken {
    fn from(s: String) -> Self {
        ClassToken::Text(s)
    }
}

impl<T: Into<ClassToken>> From<Option<T>> for ClassToken {
    fn from(token: Option<T>) -> Self {
        match token {
            Some(t) => t.into(),
            None => ClassToken::List(Vec::new()),
        }
    }
}

impl<T: Into<ClassToken>> From<Vec<T>> for ClassToken {
    fn from(tokens: Vec<T>) -> Self {
        ClassToken::List(tokens.into_iter().map(Into::into).collect())
    }
}

impl ClassToken {
    /// Collect every enabled class name, in order, duplicates included
    fn collect_into<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            ClassToken::Text(text) => out.extend(text.split_whitespace()),
            ClassToken::Conditional(text, enabled) => {
                if *enabled {
                    out.extend(text.split_whitespace());
                }
            }
            ClassToken::List(tokens) => {
                for token in tokens {
                    token.collect_into(out);
                }
            }
            ClassToken::Map(entries) => {
                for (text, enabled) in entries {
                    if *enabled {
                        out.extend(text.split_whitespace());
                    }
                }
            }
        }
    }
}

/// Combines class-name tokens into a single string
pub trait ClassMerger {
    /// Flatten and merge tokens into a space-separated class string
    fn merge(&self, tokens: &[ClassToken]) -> String;
}

/// Deduplicating merger where the last occurrence of a class wins
#[derive(Debug, Clone, Copy, Default)]
pub struct LastWriteMerger;

impl ClassMerger for LastWriteMerger {
    fn merge(&self, tokens: &[ClassToken]) -> String {
        let mut classes = Vec::new();
        for token in tokens {
            token.collect_into(&mut classes);
        }

        // Walk backwards so the last occurrence claims the slot
        let mut seen = HashSet::new();
        let mut kept: Vec<&str> = classes.into_iter().rev().filter(|c| seen.insert(*c)).collect();
        kept.reverse();
        kept.join(" ")
    }
}

/// Merge tokens with the given merger
pub fn cn<M: ClassMerger + ?Sized>(merger: &M, tokens: &[ClassToken]) -> String {
    merger.merge(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_strings() {
        let merged = cn(&LastWriteMerger, &["px-2 py-1".into(), "text-sm".into()]);
        assert_eq!(merged, "px-2 py-1 text-sm");
    }

    #[test]
    fn test_conditionals_and_maps() {
        let tokens = [
            ClassToken::from("btn"),
            ClassToken::Conditional("btn-active".to_string(), false),
            ClassToken::Conditional("btn-disabled".to_string(), true),
            ClassToken::Map(vec![("hidden".to_string(), false), ("rounded".to_string(), true)]),
        ];
        assert_eq!(cn(&LastWriteMerger, &tokens), "btn btn-disabled rounded");
    }

    #[test]
    fn test_last_occurrence_wins() {
        let tokens = [ClassToken::from("a b c"), ClassToken::from("a")];
        assert_eq!(cn(&LastWriteMerger, &tokens), "b c a");
    }

    #[test]
    fn test_nested_lists_and_options() {
        let tokens = [
            ClassToken::from(vec!["flex", "  gap-2 "]),
            ClassToken::from(None::<&str>),
            ClassToken::from(Some("grow")),
            ClassToken::from(""),
        ];
        assert_eq!(cn(&LastWriteMerger, &tokens), "flex gap-2 grow");
    }

    #[test]
    fn test_empty() {
        assert_eq!(cn(&LastWriteMerger, &[]), "");
    }

    #[test]
    fn test_dyn_merger() {
        let merger: &dyn ClassMerger = &LastWriteMerger;
        assert_eq!(cn(merger, &["x".into(), "x".into()]), "x");
    }
}
