use logos::Logos;
use std::fmt;

/// Token type for the Cavern script language.
///
/// Keywords are plain [`Token::Word`]s; the parser decides from context
/// whether `in` or `word` is a keyword. Whitespace, newlines, and `--`
/// comments never reach the parser.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    /// Left bracket `[`.
    LBracket,
    /// Right bracket `]`.
    RBracket,
    /// Left parenthesis `(`.
    LParen,
    /// Right parenthesis `)`.
    RParen,
    /// Comma separator `,`.
    Comma,
    /// Exit arrow `->`.
    Arrow,
    /// `=`
    Eq,
    /// `!=`
    NotEq,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
    /// Double-quoted string literal, escapes already processed.
    Str(String),
    /// Integer literal.
    Integer(i64),
    /// Bare word (identifier or keyword).
    Word(String),
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::LBracket => write!(f, "["),
            Token::RBracket => write!(f, "]"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Comma => write!(f, ","),
            Token::Arrow => write!(f, "->"),
            Token::Eq => write!(f, "="),
            Token::NotEq => write!(f, "!="),
            Token::Lt => write!(f, "<"),
            Token::Le => write!(f, "<="),
            Token::Gt => write!(f, ">"),
            Token::Ge => write!(f, ">="),
            Token::Str(s) => write!(f, "\"{s}\""),
            Token::Integer(n) => write!(f, "{n}"),
            Token::Word(w) => write!(f, "{w}"),
        }
    }
}

/// Internal logos token; converted to an owned [`Token`] after lexing.
#[derive(Logos, Debug)]
#[logos(skip r"[ \t\r\n]+")]
#[logos(skip r"--[^\n]*")]
enum RawToken {
    #[token("[")]
    LBracket,

    #[token("]")]
    RBracket,

    #[token("(")]
    LParen,

    #[token(")")]
    RParen,

    #[token(",")]
    Comma,

    #[token("->")]
    Arrow,

    #[token("=")]
    Eq,

    #[token("!=")]
    NotEq,

    #[token("<")]
    Lt,

    #[token("<=")]
    Le,

    #[token(">")]
    Gt,

    #[token(">=")]
    Ge,

    #[regex(r#""([^"\\]|\\.)*""#)]
    Str,

    #[regex(r"-?[0-9]+")]
    Integer,

    #[regex(r"[a-zA-Z_][a-zA-Z0-9_']*")]
    Word,
}

/// A lexer error with source location.
#[derive(Debug, Clone)]
pub struct LexError {
    /// Byte range of the offending input.
    pub span: std::ops::Range<usize>,
    /// Human-readable description.
    pub message: String,
}

/// Lex source text into `(Token, Span)` pairs.
///
/// Lexing continues past errors so every bad character is reported.
pub fn lex(source: &str) -> (Vec<(Token, std::ops::Range<usize>)>, Vec<LexError>) {
    let mut tokens = Vec::new();
    let mut errors = Vec::new();
    let mut lexer = RawToken::lexer(source);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        let raw = match result {
            Ok(raw) => raw,
            Err(()) => {
                let message = if source[span.clone()].starts_with('"') {
                    "unterminated string".to_string()
                } else {
                    format!("unexpected character: {:?}", &source[span.clone()])
                };
                errors.push(LexError { span, message });
                continue;
            }
        };
        let token = match raw {
            RawToken::LBracket => Token::LBracket,
            RawToken::RBracket => Token::RBracket,
            RawToken::LParen => Token::LParen,
            RawToken::RParen => Token::RParen,
            RawToken::Comma => Token::Comma,
            RawToken::Arrow => Token::Arrow,
            RawToken::Eq => Token::Eq,
            RawToken::NotEq => Token::NotEq,
            RawToken::Lt => Token::Lt,
            RawToken::Le => Token::Le,
            RawToken::Gt => Token::Gt,
            RawToken::Ge => Token::Ge,
            RawToken::Str => {
                let slice = lexer.slice();
                Token::Str(unescape(&slice[1..slice.len() - 1]))
            }
            RawToken::Integer => match lexer.slice().parse::<i64>() {
                Ok(n) => Token::Integer(n),
                Err(_) => {
                    errors.push(LexError {
                        span,
                        message: format!("invalid integer literal: {}", lexer.slice()),
                    });
                    continue;
                }
            },
            RawToken::Word => Token::Word(lexer.slice().to_string()),
        };
        tokens.push((token, span));
    }

    (tokens, errors)
}

/// Process escape sequences in a string literal.
///
/// Supports `\\`, `\n`, `\t`, `\"`. Unknown sequences are kept as-is.
fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some('\\') => out.push('\\'),
                Some('"') => out.push('"'),
                Some(other) => {
                    out.push('\\');
                    out.push(other);
                }
                None => out.push('\\'),
            }
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(source: &str) -> Vec<String> {
        let (tokens, errors) = lex(source);
        assert!(errors.is_empty(), "errors: {errors:?}");
        tokens.iter().map(|(t, _)| t.to_string()).collect()
    }

    #[test]
    fn lex_room_declaration() {
        assert_eq!(
            rendered("room hall \"A long hall.\"\n  exit north -> yard"),
            vec!["room", "hall", "\"A long hall.\"", "exit", "north", "->", "yard"]
        );
    }

    #[test]
    fn lex_comparisons() {
        assert_eq!(
            rendered("= != < <= > >="),
            vec!["=", "!=", "<", "<=", ">", ">="]
        );
    }

    #[test]
    fn lex_comments_and_newlines_are_skipped() {
        assert_eq!(rendered("-- a comment\nstart\n-- another"), vec!["start"]);
    }

    #[test]
    fn lex_negative_integer() {
        let (tokens, errors) = lex("counter set score -5");
        assert!(errors.is_empty());
        assert_eq!(tokens[3].0, Token::Integer(-5));
    }

    #[test]
    fn lex_pattern_list() {
        assert_eq!(
            rendered("[get, take]"),
            vec!["[", "get", ",", "take", "]"]
        );
    }

    #[test]
    fn lex_words_with_apostrophes() {
        assert_eq!(rendered("can't"), vec!["can't"]);
    }

    #[test]
    fn lex_preserves_spans() {
        let (tokens, _) = lex("look  inventory");
        assert_eq!(tokens[0].1, 0..4);
        assert_eq!(tokens[1].1, 6..15);
    }

    #[test]
    fn lex_string_with_escapes() {
        let (tokens, errors) = lex(r#""say \"hi\"\n""#);
        assert!(errors.is_empty());
        assert_eq!(tokens[0].0, Token::Str("say \"hi\"\n".into()));
    }

    #[test]
    fn lex_multiline_string() {
        let (tokens, errors) = lex("\"one\ntwo\"");
        assert!(errors.is_empty());
        assert_eq!(tokens[0].0, Token::Str("one\ntwo".into()));
    }

    #[test]
    fn lex_reports_bad_characters() {
        let (tokens, errors) = lex("look $ quit");
        assert_eq!(tokens.len(), 2);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].span, 5..6);
    }

    #[test]
    fn lex_reports_unterminated_string() {
        let (_, errors) = lex("print \"oops");
        assert!(!errors.is_empty());
    }

    #[test]
    fn unescape_unknown_kept() {
        assert_eq!(unescape(r"\x"), "\\x");
        assert_eq!(unescape("trail\\"), "trail\\");
    }
}
