use std::iter::once;

use cavern_engine::Comparison;
use chumsky::input::{Stream, ValueInput};
use chumsky::prelude::*;

use crate::ast::*;
use crate::lexer::Token;

type Span = SimpleSpan;

/// Parse error with source span.
#[derive(Debug, Clone)]
pub struct ParseError {
    /// Byte range of the offending token.
    pub span: std::ops::Range<usize>,
    /// Human-readable description.
    pub message: String,
}

fn spanned<T>(node: T, span: Span) -> Spanned<T> {
    Spanned {
        node,
        span: span.into_range(),
    }
}

/// Words that cannot be used as bare room or item names.
fn is_reserved(w: &str) -> bool {
    matches!(
        w,
        "room"
            | "item"
            | "word"
            | "action"
            | "occurs"
            | "start"
            | "when"
            | "then"
            | "and"
            | "or"
            | "not"
            | "any"
            | "none"
            | "self"
            | "here"
            | "nowhere"
            | "inventory"
    )
}

/// Words that cannot appear as a bare word in an action pattern.
fn is_pattern_stop(w: &str) -> bool {
    matches!(
        w,
        "room" | "item" | "word" | "action" | "occurs" | "start" | "when" | "then" | "any" | "none"
    )
}

/// Build the script parser.
///
/// All sub-parsers are defined inline so chumsky can infer the generic input type.
fn script_parser<'a, I>() -> impl Parser<'a, I, Script, extra::Err<Rich<'a, Token>>> + Clone
where
    I: ValueInput<'a, Token = Token, Span = Span>,
{
    // -- Helpers --

    let kw = |k: &'static str| select! { Token::Word(ref w) if w.as_str() == k => () }.labelled(k);
    let ident = select! { Token::Word(w) => w }.labelled("identifier");
    let string_lit = select! { Token::Str(s) => s }.labelled("string");
    let integer = select! { Token::Integer(n) => n }.labelled("integer");
    let position = integer.map_with(|n, e| spanned(n, e.span()));

    let name = choice((
        select! { Token::Word(ref w) if !is_reserved(w) => w.clone() },
        string_lit,
    ))
    .map_with(|n, e| spanned(n, e.span()))
    .labelled("name");

    let comparison = select! {
        Token::Eq => Comparison::Eq,
        Token::NotEq => Comparison::Ne,
        Token::Lt => Comparison::Lt,
        Token::Le => Comparison::Le,
        Token::Gt => Comparison::Gt,
        Token::Ge => Comparison::Ge,
    }
    .labelled("comparison");

    let place = choice((
        kw("nowhere").to(Place::Nowhere),
        kw("inventory").to(Place::Inventory),
        name.clone().map(Place::Room),
    ))
    .labelled("location");

    // -- Patterns --

    let pattern_word =
        select! { Token::Word(ref w) if !is_pattern_stop(w) => w.clone() }.labelled("word");

    let pattern = choice((
        kw("any").to(Pattern::Any),
        kw("none").to(Pattern::None),
        pattern_word
            .clone()
            .separated_by(just(Token::Comma))
            .at_least(1)
            .collect::<Vec<String>>()
            .delimited_by(just(Token::LBracket), just(Token::RBracket))
            .map(Pattern::List),
        pattern_word.map(Pattern::Word),
    ))
    .map_with(|p, e| spanned(p, e.span()))
    .labelled("pattern");

    // -- Conditions --

    let condition = recursive(|cond| {
        let primitive = choice((
            kw("word")
                .ignore_then(position.clone())
                .then(pattern.clone())
                .map(|(position, pattern)| CondExpr::Word { position, pattern }),
            kw("unrecognized")
                .ignore_then(position.clone())
                .map(CondExpr::Unrecognized),
            kw("here").ignore_then(name.clone()).map(CondExpr::Here),
            kw("carrying").ignore_then(name.clone()).map(CondExpr::Carrying),
            kw("present").ignore_then(name.clone()).map(CondExpr::Present),
            kw("in").ignore_then(name.clone()).map(CondExpr::In),
            kw("exit")
                .ignore_then(kw("word"))
                .ignore_then(position.clone())
                .map(CondExpr::ExitWord),
            kw("exit").ignore_then(ident).map(CondExpr::Exit),
            kw("random").ignore_then(position.clone()).map(CondExpr::Random),
            kw("moved").ignore_then(name.clone()).map(CondExpr::Moved),
            kw("exists").ignore_then(name.clone()).map(CondExpr::Exists),
            kw("flag").ignore_then(ident).map(CondExpr::Flag),
            kw("counter")
                .ignore_then(ident)
                .then(comparison)
                .then(integer)
                .map(|((name, comparison), value)| CondExpr::Counter {
                    name,
                    comparison,
                    value,
                }),
            kw("string")
                .ignore_then(ident)
                .then_ignore(just(Token::Eq))
                .then(string_lit)
                .map(|(name, value)| CondExpr::StringEq { name, value }),
            kw("times").ignore_then(position.clone()).map(CondExpr::Times),
            kw("always").to(CondExpr::Always),
        ))
        .map_with(|c, e| spanned(c, e.span()))
        .labelled("condition");

        let unary = recursive(|unary| {
            let negated = kw("not")
                .ignore_then(unary)
                .map_with(|inner, e| spanned(CondExpr::Not(Box::new(inner)), e.span()));

            let group = cond
                .clone()
                .then(
                    kw("and")
                        .ignore_then(cond.clone())
                        .repeated()
                        .collect::<Vec<_>>(),
                )
                .delimited_by(just(Token::LParen), just(Token::RParen))
                .map_with(|(first, rest): (Spanned<CondExpr>, Vec<_>), e| {
                    if rest.is_empty() {
                        spanned(first.node, e.span())
                    } else {
                        spanned(CondExpr::And(once(first).chain(rest).collect()), e.span())
                    }
                });

            choice((negated, group, primitive))
        });

        unary
            .clone()
            .then(kw("or").ignore_then(unary).repeated().collect::<Vec<_>>())
            .map_with(|(first, rest): (Spanned<CondExpr>, Vec<_>), e| {
                if rest.is_empty() {
                    first
                } else {
                    spanned(CondExpr::Or(once(first).chain(rest).collect()), e.span())
                }
            })
    });

    let when = kw("when").ignore_then(
        condition
            .clone()
            .then(
                kw("and")
                    .or_not()
                    .ignore_then(condition)
                    .repeated()
                    .collect::<Vec<_>>(),
            )
            .map(|(first, rest)| once(first).chain(rest).collect::<Vec<_>>()),
    );

    // -- Effects --

    let output_effect = choice((
        kw("print").ignore_then(string_lit).map(EffectStmt::Print),
        kw("println").ignore_then(string_lit).map(EffectStmt::Println),
        kw("look").to(EffectStmt::Look),
        kw("inventory").to(EffectStmt::Inventory),
        kw("quit").to(EffectStmt::Quit),
    ));

    let movement_effect = choice((
        kw("go")
            .ignore_then(kw("word"))
            .ignore_then(position.clone())
            .map(EffectStmt::GoWord),
        kw("go").ignore_then(ident).map(EffectStmt::Go),
        kw("goto").ignore_then(name.clone()).map(EffectStmt::Goto),
        kw("get").ignore_then(name.clone()).map(EffectStmt::Get),
        kw("drop").ignore_then(name.clone()).map(EffectStmt::Drop),
        kw("put")
            .ignore_then(name.clone())
            .then_ignore(kw("here"))
            .map(EffectStmt::PutHere),
        kw("put")
            .ignore_then(name.clone())
            .then_ignore(kw("in"))
            .then(place.clone())
            .map(|(item, place)| EffectStmt::PutIn { item, place }),
        kw("swap")
            .ignore_then(name.clone())
            .then(name.clone())
            .map(|(a, b)| EffectStmt::Swap(a, b)),
        kw("destroy").ignore_then(name.clone()).map(EffectStmt::Destroy),
    ));

    let variable_effect = choice((
        kw("flag")
            .ignore_then(kw("set"))
            .ignore_then(ident)
            .map(EffectStmt::FlagSet),
        kw("flag")
            .ignore_then(kw("reset"))
            .ignore_then(ident)
            .map(EffectStmt::FlagReset),
        kw("counter")
            .ignore_then(kw("set"))
            .ignore_then(ident)
            .then(integer)
            .map(|(name, value)| EffectStmt::CounterSet { name, value }),
        kw("counter")
            .ignore_then(kw("increment"))
            .ignore_then(ident)
            .map(EffectStmt::CounterIncrement),
        kw("counter")
            .ignore_then(kw("decrement"))
            .ignore_then(ident)
            .map(EffectStmt::CounterDecrement),
        kw("counter")
            .ignore_then(kw("reset"))
            .ignore_then(ident)
            .map(EffectStmt::CounterReset),
        kw("string")
            .ignore_then(kw("set"))
            .ignore_then(ident)
            .then(string_lit)
            .map(|(name, value)| EffectStmt::StringSet { name, value }),
    ));

    let effect = choice((output_effect, movement_effect, variable_effect))
        .map_with(|fx, e| spanned(fx, e.span()))
        .labelled("effect");

    let thens = kw("then")
        .ignore_then(effect.repeated().at_least(1).collect::<Vec<_>>())
        .repeated()
        .at_least(1)
        .collect::<Vec<_>>();

    // -- Declarations --

    let exit = kw("exit")
        .ignore_then(ident.map_with(|d, e| spanned(d, e.span())))
        .then(
            just(Token::Arrow)
                .ignore_then(choice((kw("self").to(None), name.clone().map(Some))))
                .or_not(),
        )
        .map(|(direction, target)| ExitDecl {
            direction,
            target: target.flatten(),
        })
        .labelled("exit");

    let room_decl = kw("room")
        .ignore_then(name.clone())
        .then(string_lit.or_not())
        .then(exit.repeated().collect::<Vec<_>>())
        .map(|((name, description), exits)| {
            Declaration::Room(RoomDecl {
                name,
                description,
                exits,
            })
        })
        .labelled("room declaration");

    let item_clause = choice((
        kw("alias").ignore_then(string_lit).map(ItemClause::Alias),
        kw("portable").to(ItemClause::Portable),
        kw("in").ignore_then(place).map(ItemClause::In),
    ))
    .map_with(|c, e| spanned(c, e.span()));

    let item_decl = kw("item")
        .ignore_then(name.clone())
        .then(string_lit.or_not())
        .then(item_clause.repeated().collect::<Vec<_>>())
        .map(|((name, description), clauses)| {
            Declaration::Item(ItemDecl {
                name,
                description,
                clauses,
            })
        })
        .labelled("item declaration");

    let word_decl = kw("word")
        .ignore_then(ident.map_with(|w, e| spanned(w, e.span())))
        .then(string_lit.repeated().collect::<Vec<_>>())
        .map(|(name, synonyms)| Declaration::Word(WordDecl { name, synonyms }))
        .labelled("word declaration");

    let action_decl = kw("action")
        .ignore_then(pattern.clone())
        .then(pattern.or_not())
        .then(when.clone().or_not())
        .then(thens.clone())
        .map(|(((verb, noun), conditions), thens)| {
            Declaration::Action(ActionDecl {
                verb,
                noun,
                conditions: conditions.unwrap_or_default(),
                thens,
            })
        })
        .labelled("action declaration");

    let occurs_decl = kw("occurs")
        .ignore_then(when.or_not())
        .then(thens)
        .map(|(conditions, thens)| {
            Declaration::Occurs(OccursDecl {
                conditions: conditions.unwrap_or_default(),
                thens,
            })
        })
        .labelled("occurs declaration");

    let start_decl = kw("start")
        .ignore_then(name)
        .map(Declaration::Start)
        .labelled("start declaration");

    let declaration = choice((
        room_decl,
        item_decl,
        word_decl,
        action_decl,
        occurs_decl,
        start_decl,
    ))
    .map_with(|decl, e| spanned(decl, e.span()));

    // -- Script --
    declaration
        .repeated()
        .collect::<Vec<_>>()
        .then_ignore(end())
        .map(|declarations| Script { declarations })
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Parse a token stream into a script AST.
pub fn parse(tokens: &[(Token, std::ops::Range<usize>)]) -> Result<Script, Vec<ParseError>> {
    let token_iter = tokens
        .iter()
        .map(|(tok, span)| (tok.clone(), Span::from(span.clone())));

    let len = tokens.last().map_or(0, |(_, s)| s.end);
    let eoi: Span = (len..len).into();
    let stream = Stream::from_iter(token_iter).map(eoi, |(t, s): (_, _)| (t, s));

    let (output, errors) = script_parser().parse(stream).into_output_errors();

    match output {
        Some(script) if errors.is_empty() => Ok(script),
        _ => Err(errors
            .into_iter()
            .map(|e| ParseError {
                span: e.span().into_range(),
                message: e.to_string(),
            })
            .collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer;

    fn parse_source(source: &str) -> Result<Script, Vec<ParseError>> {
        let (tokens, lex_errors) = lexer::lex(source);
        assert!(lex_errors.is_empty(), "lex errors: {lex_errors:?}");
        parse(&tokens)
    }

    fn only_action(source: &str) -> ActionDecl {
        let script = parse_source(source).unwrap();
        match &script.declarations[0].node {
            Declaration::Action(a) => a.clone(),
            other => panic!("expected action, got {other:?}"),
        }
    }

    // -- Rooms and items --

    #[test]
    fn parse_room_with_exits() {
        let script = parse_source(
            "room hall \"A long hall.\"\n  exit north -> yard\n  exit up -> self\n  exit down",
        )
        .unwrap();
        match &script.declarations[0].node {
            Declaration::Room(r) => {
                assert_eq!(r.name.node, "hall");
                assert_eq!(r.description.as_deref(), Some("A long hall."));
                assert_eq!(r.exits.len(), 3);
                assert_eq!(r.exits[0].target.as_ref().unwrap().node, "yard");
                assert!(r.exits[1].target.is_none());
                assert!(r.exits[2].target.is_none());
            }
            other => panic!("expected room, got {other:?}"),
        }
    }

    #[test]
    fn parse_room_with_quoted_name() {
        let script = parse_source("room \"Great Hall\" \"Vast.\"").unwrap();
        match &script.declarations[0].node {
            Declaration::Room(r) => assert_eq!(r.name.node, "Great Hall"),
            other => panic!("expected room, got {other:?}"),
        }
    }

    #[test]
    fn parse_item_clauses() {
        let script =
            parse_source("item lamp \"A brass lamp.\" alias \"lantern\" portable in inventory")
                .unwrap();
        match &script.declarations[0].node {
            Declaration::Item(i) => {
                let clauses: Vec<_> = i.clauses.iter().map(|c| c.node.clone()).collect();
                assert_eq!(
                    clauses,
                    vec![
                        ItemClause::Alias("lantern".into()),
                        ItemClause::Portable,
                        ItemClause::In(Place::Inventory),
                    ]
                );
            }
            other => panic!("expected item, got {other:?}"),
        }
    }

    #[test]
    fn parse_item_without_description() {
        let script = parse_source("item rock in nowhere").unwrap();
        match &script.declarations[0].node {
            Declaration::Item(i) => assert!(i.description.is_none()),
            other => panic!("expected item, got {other:?}"),
        }
    }

    #[test]
    fn parse_word_group() {
        let script = parse_source("word get \"take\" \"grab\"").unwrap();
        match &script.declarations[0].node {
            Declaration::Word(w) => {
                assert_eq!(w.name.node, "get");
                assert_eq!(w.synonyms, vec!["take", "grab"]);
            }
            other => panic!("expected word, got {other:?}"),
        }
    }

    // -- Actions --

    #[test]
    fn parse_action_patterns() {
        let action = only_action("action [get, take] any then print \"ok\"");
        assert_eq!(
            action.verb.node,
            Pattern::List(vec!["get".into(), "take".into()])
        );
        assert_eq!(action.noun.unwrap().node, Pattern::Any);
        assert!(action.conditions.is_empty());
    }

    #[test]
    fn parse_action_without_noun() {
        let action = only_action("action inventory then inventory");
        assert_eq!(action.verb.node, Pattern::Word("inventory".into()));
        assert!(action.noun.is_none());
        assert_eq!(action.thens[0][0].node, EffectStmt::Inventory);
    }

    #[test]
    fn parse_juxtaposed_and_joined_conditions() {
        let action = only_action(
            "action get lamp when here lamp and not carrying lamp flag lit then get lamp",
        );
        assert_eq!(action.conditions.len(), 3);
        assert!(matches!(action.conditions[1].node, CondExpr::Not(_)));
        assert_eq!(action.conditions[2].node, CondExpr::Flag("lit".into()));
    }

    #[test]
    fn parse_or_binds_tighter_than_juxtaposition() {
        let action = only_action(
            "action wave when in hall or in yard counter waves < 3 then counter increment waves",
        );
        assert_eq!(action.conditions.len(), 2);
        match &action.conditions[0].node {
            CondExpr::Or(parts) => assert_eq!(parts.len(), 2),
            other => panic!("expected or, got {other:?}"),
        }
        assert_eq!(
            action.conditions[1].node,
            CondExpr::Counter {
                name: "waves".into(),
                comparison: Comparison::Lt,
                value: 3
            }
        );
    }

    #[test]
    fn parse_parenthesized_group() {
        let action =
            only_action("action x when not (flag a and flag b) or always then quit");
        match &action.conditions[0].node {
            CondExpr::Or(parts) => match &parts[0].node {
                CondExpr::Not(inner) => assert!(matches!(inner.node, CondExpr::And(_))),
                other => panic!("expected not, got {other:?}"),
            },
            other => panic!("expected or, got {other:?}"),
        }
    }

    #[test]
    fn parse_every_effect() {
        let action = only_action(
            "action x then print \"a\" println \"b\" look inventory go word 2 go north \
             goto hall get lamp drop lamp put lamp here put lamp in nowhere \
             swap lamp \"broken lamp\" destroy lamp flag set f flag reset f \
             counter set c 3 counter increment c counter decrement c counter reset c \
             string set s \"v\" quit",
        );
        assert_eq!(action.thens.len(), 1);
        assert_eq!(action.thens[0].len(), 21);
        match &action.thens[0][10].node {
            EffectStmt::PutIn { item, place } => {
                assert_eq!(item.node, "lamp");
                assert_eq!(*place, Place::Nowhere);
            }
            other => panic!("expected put-in, got {other:?}"),
        }
    }

    #[test]
    fn parse_repeated_then_clauses() {
        let action = only_action("action x then print \"a\" then print \"b\" quit");
        assert_eq!(action.thens.len(), 2);
        assert_eq!(action.thens[1].len(), 2);
    }

    #[test]
    fn parse_occurs_and_start() {
        let script = parse_source(
            "occurs when random 30 then println \"A bat flutters by.\"\nstart hall",
        )
        .unwrap();
        assert_eq!(script.declarations.len(), 2);
        assert!(matches!(script.declarations[0].node, Declaration::Occurs(_)));
        match &script.declarations[1].node {
            Declaration::Start(name) => assert_eq!(name.node, "hall"),
            other => panic!("expected start, got {other:?}"),
        }
    }

    // -- Errors --

    #[test]
    fn action_without_then_is_an_error() {
        assert!(parse_source("action look when always").is_err());
    }

    #[test]
    fn reserved_word_is_not_a_name() {
        assert!(parse_source("room then \"x\"").is_err());
    }

    #[test]
    fn error_points_at_offending_token() {
        let errors = parse_source("room hall \"H\"\nitem lamp \"L\" in 42").unwrap_err();
        assert!(errors[0].span.start >= 28, "span: {:?}", errors[0].span);
    }
}
