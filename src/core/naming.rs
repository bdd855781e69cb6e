//! Naming conventions that derive a relation name from a field identifier
//!
//! A convention is only consulted when a field carries no explicit relation
//! override.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Derives the default wire name for a field identifier
pub trait NamingConvention: Send + Sync {
    fn relation_name(&self, identifier: &str) -> String;
}

impl<F> NamingConvention for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn relation_name(&self, identifier: &str) -> String {
        self(identifier)
    }
}

/// Built-in naming conventions
///
/// # Examples
///
/// ```
/// use halite::core::naming::{NamingConvention, NamingStrategy};
///
/// assert_eq!(NamingStrategy::Identity.relation_name("next_page"), "next_page");
/// assert_eq!(NamingStrategy::CamelCase.relation_name("next_page"), "nextPage");
/// assert_eq!(NamingStrategy::KebabCase.relation_name("NextPage"), "next-page");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingStrategy {
    /// Use the identifier unchanged
    #[default]
    Identity,
    CamelCase,
    SnakeCase,
    KebabCase,
    /// Lowercase the identifier without splitting words
    LowerCase,
}

impl NamingConvention for NamingStrategy {
    fn relation_name(&self, identifier: &str) -> String {
        match self {
            NamingStrategy::Identity => identifier.to_string(),
            NamingStrategy::LowerCase => identifier.to_lowercase(),
            NamingStrategy::CamelCase => {
                let mut out = String::with_capacity(identifier.len());
                for (i, word) in split_words(identifier).iter().enumerate() {
                    if i == 0 {
                        out.push_str(&word.to_lowercase());
                    } else {
                        out.push_str(&capitalize(word));
                    }
                }
                out
            }
            NamingStrategy::SnakeCase => join_lowercase(identifier, "_"),
            NamingStrategy::KebabCase => join_lowercase(identifier, "-"),
        }
    }
}

/// Split an identifier into words on separators and lower-to-upper boundaries
///
/// Runs of capitals stay in one word (`HTTPServer` is a single word).
fn split_words(identifier: &str) -> Vec<&str> {
    static WORD_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = WORD_REGEX.get_or_init(|| {
        Regex::new(r"[A-Z]+[a-z0-9]*|[a-z0-9]+").expect("word pattern is valid")
    });
    regex.find_iter(identifier).map(|m| m.as_str()).collect()
}

fn join_lowercase(identifier: &str, separator: &str) -> String {
    split_words(identifier)
        .iter()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join(separator)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
