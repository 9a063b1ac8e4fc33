use serde::{Deserialize, Serialize};

use crate::command::Command;
use crate::word::{NamedWord, Word};

/// The set of words an adventure recognizes.
///
/// Words keep their registration order: [`Vocabulary::find_match`] returns the
/// first word that accepts a token. Sentinels are never stored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Vocabulary {
    words: Vec<NamedWord>,
}

impl Vocabulary {
    /// Create an empty vocabulary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a word. A word with the same name gains the new synonyms.
    pub fn insert(&mut self, word: NamedWord) {
        match self.words.iter_mut().find(|w| **w == word) {
            Some(existing) => existing.merge(&word),
            None => self.words.push(word),
        }
    }

    /// Register a word unless it is a sentinel.
    pub fn insert_word(&mut self, word: &Word) {
        if let Word::Named(named) = word {
            self.insert(named.clone());
        }
    }

    /// Find the first registered word that accepts `token`, ignoring case.
    pub fn find_match(&self, token: &str) -> Option<&NamedWord> {
        self.words.iter().find(|w| w.accepts(token))
    }

    /// Look up a word by its declared name.
    pub fn get(&self, name: &str) -> Option<&NamedWord> {
        self.words.iter().find(|w| w.name().eq_ignore_ascii_case(name))
    }

    /// Resolve a raw token, substituting [`Word::Unrecognized`] for unknown tokens.
    pub fn resolve(&self, token: &str) -> Word {
        self.find_match(token)
            .map(|w| Word::Named(w.clone()))
            .unwrap_or(Word::Unrecognized)
    }

    /// Union another vocabulary into this one.
    pub fn merge(&mut self, other: &Vocabulary) {
        for word in &other.words {
            self.insert(word.clone());
        }
    }

    /// Consume both vocabularies and return their union.
    pub fn merged(mut self, other: &Vocabulary) -> Self {
        self.merge(other);
        self
    }

    /// Tokenize a line of player input into a [`Command`].
    ///
    /// Tokens are split on whitespace and stripped of surrounding punctuation;
    /// empty tokens are dropped. Each token is resolved with [`Vocabulary::resolve`].
    pub fn parse(&self, input: &str) -> Command {
        let tokens: Vec<String> = input
            .split_whitespace()
            .map(|t| t.trim_matches(|c: char| !c.is_alphanumeric()))
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();
        let words = tokens.iter().map(|t| self.resolve(t)).collect();
        Command::from_parts(words, tokens)
    }

    /// Iterate over registered words in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &NamedWord> {
        self.words.iter()
    }

    /// Number of registered words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Whether no words are registered.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl FromIterator<NamedWord> for Vocabulary {
    fn from_iter<T: IntoIterator<Item = NamedWord>>(iter: T) -> Self {
        let mut vocabulary = Vocabulary::new();
        for word in iter {
            vocabulary.insert(word);
        }
        vocabulary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vocabulary {
        [
            NamedWord::with_synonyms("get", ["take", "grab"]),
            NamedWord::new("lamp"),
            NamedWord::with_synonyms("north", ["n"]),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn find_match_is_case_insensitive() {
        let vocab = sample();
        assert_eq!(vocab.find_match("TAKE").unwrap().name(), "get");
        assert_eq!(vocab.find_match("Lamp").unwrap().name(), "lamp");
        assert!(vocab.find_match("xyzzy").is_none());
    }

    #[test]
    fn resolve_substitutes_unrecognized() {
        let vocab = sample();
        assert_eq!(vocab.resolve("xyzzy"), Word::Unrecognized);
        assert_eq!(vocab.resolve("n"), Word::named("north"));
    }

    #[test]
    fn sentinels_are_never_stored() {
        let mut vocab = Vocabulary::new();
        vocab.insert_word(&Word::Any);
        vocab.insert_word(&Word::None);
        vocab.insert_word(&Word::Unrecognized);
        assert!(vocab.is_empty());
    }

    #[test]
    fn insert_merges_same_name() {
        let mut vocab = Vocabulary::new();
        vocab.insert(NamedWord::new("lamp"));
        vocab.insert(NamedWord::with_synonyms("lamp", ["lantern"]));
        assert_eq!(vocab.len(), 1);
        assert!(vocab.find_match("lantern").is_some());
    }

    #[test]
    fn merge_is_union() {
        let mut a = sample();
        let b: Vocabulary = [NamedWord::new("drop"), NamedWord::new("lamp")]
            .into_iter()
            .collect();
        a.merge(&b);
        assert_eq!(a.len(), 4);
        assert!(a.find_match("drop").is_some());
    }

    #[test]
    fn parse_strips_punctuation_and_keeps_tokens() {
        let vocab = sample();
        let command = vocab.parse("  Take the lamp!  ");
        assert_eq!(command.len(), 3);
        assert_eq!(command.word(1), &Word::named("get"));
        assert_eq!(command.word(2), &Word::Unrecognized);
        assert_eq!(command.word(3), &Word::named("lamp"));
        assert_eq!(command.token(2), Some("the"));
    }

    #[test]
    fn parse_empty_line_is_none_command() {
        let vocab = sample();
        assert_eq!(vocab.parse("   "), Command::NONE);
    }
}
