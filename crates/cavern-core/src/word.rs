use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// A recognized word and every spelling that counts as the same word.
///
/// Synonyms are stored uppercased and always include the word's own name.
/// Two named words are equal when their names are equal, ignoring case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedWord {
    name: String,
    synonyms: BTreeSet<String>,
}

impl NamedWord {
    /// Create a word whose only synonym is its own name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let mut synonyms = BTreeSet::new();
        synonyms.insert(name.to_uppercase());
        Self { name, synonyms }
    }

    /// Create a word with additional synonyms.
    pub fn with_synonyms<I, S>(name: impl Into<String>, synonyms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut word = Self::new(name);
        for synonym in synonyms {
            word.add_synonym(synonym.as_ref());
        }
        word
    }

    /// Register another spelling for this word.
    pub fn add_synonym(&mut self, synonym: &str) {
        let synonym = synonym.trim();
        if !synonym.is_empty() {
            self.synonyms.insert(synonym.to_uppercase());
        }
    }

    /// Absorb every synonym of `other` into this word.
    pub fn merge(&mut self, other: &NamedWord) {
        self.synonyms.extend(other.synonyms.iter().cloned());
    }

    /// The word's declared name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All uppercased spellings, including the name.
    pub fn synonyms(&self) -> &BTreeSet<String> {
        &self.synonyms
    }

    /// Whether a raw token is one of this word's spellings (case-insensitive).
    pub fn accepts(&self, token: &str) -> bool {
        self.synonyms.contains(&token.to_uppercase())
    }

    /// Whether two words share at least one spelling.
    pub fn overlaps(&self, other: &NamedWord) -> bool {
        !self.synonyms.is_disjoint(&other.synonyms)
    }
}

impl PartialEq for NamedWord {
    fn eq(&self, other: &Self) -> bool {
        self.name.eq_ignore_ascii_case(&other.name)
    }
}

impl Eq for NamedWord {}

impl Hash for NamedWord {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.to_uppercase().hash(state);
    }
}

/// A word in a command or a pattern.
///
/// Besides named words there are three sentinels with fixed matching rules:
/// `None` marks the absence of a word, `Any` is a wildcard for any present
/// word, and `Unrecognized` stands for a token the vocabulary does not know.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Word {
    /// No word at this position.
    None,
    /// Wildcard matching every word except `None`.
    Any,
    /// A token that is not in the vocabulary.
    Unrecognized,
    /// A recognized word with synonyms.
    Named(NamedWord),
}

impl Word {
    /// Shorthand for a named word with no extra synonyms.
    pub fn named(name: impl Into<String>) -> Self {
        Self::Named(NamedWord::new(name))
    }

    /// Shorthand for a named word with synonyms.
    pub fn with_synonyms<I, S>(name: impl Into<String>, synonyms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::Named(NamedWord::with_synonyms(name, synonyms))
    }

    /// The symmetric matching relation used wherever words are compared.
    ///
    /// `None` only matches `None`; `Any` matches everything but `None`;
    /// `Unrecognized` matches itself and `Any`; named words match when their
    /// synonym sets intersect.
    pub fn matches(&self, other: &Word) -> bool {
        match (self, other) {
            (Word::None, Word::None) => true,
            (Word::None, _) | (_, Word::None) => false,
            (Word::Any, _) | (_, Word::Any) => true,
            (Word::Unrecognized, Word::Unrecognized) => true,
            (Word::Named(a), Word::Named(b)) => a.overlaps(b),
            (Word::Unrecognized, Word::Named(_)) | (Word::Named(_), Word::Unrecognized) => false,
        }
    }

    /// Whether this is one of the three sentinel values.
    pub fn is_sentinel(&self) -> bool {
        !matches!(self, Word::Named(_))
    }

    /// The named word behind this value, if it is not a sentinel.
    pub fn as_named(&self) -> Option<&NamedWord> {
        match self {
            Word::Named(w) => Some(w),
            _ => None,
        }
    }

    /// Display name: the declared name, or the sentinel's uppercase label.
    pub fn name(&self) -> &str {
        match self {
            Word::None => "NONE",
            Word::Any => "ANY",
            Word::Unrecognized => "UNRECOGNIZED",
            Word::Named(w) => w.name(),
        }
    }
}

impl From<NamedWord> for Word {
    fn from(word: NamedWord) -> Self {
        Word::Named(word)
    }
}

impl fmt::Display for Word {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
