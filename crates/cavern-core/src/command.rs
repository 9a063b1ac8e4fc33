use std::fmt;

use serde::{Deserialize, Serialize};

use crate::word::Word;

static NO_WORD: Word = Word::None;

/// One parsed line of player input.
///
/// Position 1 is the verb, position 2 the noun, and later positions are
/// trailing modifiers. Equality compares the words position by position; the
/// raw tokens the player typed are kept only for message substitution.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Command {
    words: Vec<Word>,
    tokens: Vec<String>,
}

impl Command {
    /// The zero-word command, used when no player input is involved.
    pub const NONE: Command = Command {
        words: Vec::new(),
        tokens: Vec::new(),
    };

    /// Build a command from words; tokens default to the word names.
    pub fn new(words: Vec<Word>) -> Self {
        let tokens = words.iter().map(|w| w.name().to_lowercase()).collect();
        Self { words, tokens }
    }

    /// Build a command from resolved words and the raw tokens they came from.
    pub fn from_parts(words: Vec<Word>, tokens: Vec<String>) -> Self {
        Self { words, tokens }
    }

    /// The word at a 1-based position, or [`Word::None`] past the end.
    pub fn word(&self, position: usize) -> &Word {
        position
            .checked_sub(1)
            .and_then(|i| self.words.get(i))
            .unwrap_or(&NO_WORD)
    }

    /// The raw token at a 1-based position, if any.
    pub fn token(&self, position: usize) -> Option<&str> {
        position
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .map(String::as_str)
    }

    /// All words in order.
    pub fn words(&self) -> &[Word] {
        &self.words
    }

    /// Number of words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether the command has no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Whether every pattern word matches the word at the same position.
    ///
    /// Positions beyond the pattern are not constrained.
    pub fn matches(&self, pattern: &[Word]) -> bool {
        pattern
            .iter()
            .enumerate()
            .all(|(i, p)| self.word(i + 1).matches(p))
    }
}

impl PartialEq for Command {
    fn eq(&self, other: &Self) -> bool {
        self.words == other.words
    }
}

impl Eq for Command {}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.tokens.join(" "))
    }
}
