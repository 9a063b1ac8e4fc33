//! Conditions: pure predicates over the current command and game state.

use std::fmt;

use cavern_core::{GameState, Word};

use crate::context::TurnContext;

/// How a counter is compared with a constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparison {
    /// `=`
    Eq,
    /// `!=`
    Ne,
    /// `<`
    Lt,
    /// `<=`
    Le,
    /// `>`
    Gt,
    /// `>=`
    Ge,
}

impl Comparison {
    /// Apply the comparison as `lhs OP rhs`.
    pub fn compare(self, lhs: i64, rhs: i64) -> bool {
        match self {
            Comparison::Eq => lhs == rhs,
            Comparison::Ne => lhs != rhs,
            Comparison::Lt => lhs < rhs,
            Comparison::Le => lhs <= rhs,
            Comparison::Gt => lhs > rhs,
            Comparison::Ge => lhs >= rhs,
        }
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let op = match self {
            Comparison::Eq => "=",
            Comparison::Ne => "!=",
            Comparison::Lt => "<",
            Comparison::Le => "<=",
            Comparison::Gt => ">",
            Comparison::Ge => ">=",
        };
        f.write_str(op)
    }
}

/// A predicate evaluated against a turn.
///
/// Only [`Condition::Random`] draws from the random source; every other
/// variant depends solely on the command, the world, and the game state.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// The command word at `position` (1-based) matches `word`.
    WordMatches {
        /// 1-based word position.
        position: usize,
        /// Pattern word, possibly a sentinel.
        word: Word,
    },
    /// The command word at `position` is not in the vocabulary.
    WordUnrecognized {
        /// 1-based word position.
        position: usize,
    },
    /// The item lies in the current room.
    Here(String),
    /// The player carries the item.
    Carrying(String),
    /// The item is here or carried.
    Present(String),
    /// The player is in the named room.
    In(String),
    /// The current room has an exit in this direction.
    HasExit(Word),
    /// The current room has an exit matching the command word at `position`.
    HasExitForWord {
        /// 1-based word position.
        position: usize,
    },
    /// Holds with the given percentage chance.
    Random(u8),
    /// The item has left its starting location.
    HasMoved(String),
    /// The item is anywhere but nowhere.
    Exists(String),
    /// The named flag is set.
    FlagSet(String),
    /// A counter compared with a constant.
    Counter {
        /// Counter name.
        name: String,
        /// Comparison operator.
        comparison: Comparison,
        /// Right-hand side.
        value: i64,
    },
    /// A named string equals a constant.
    StringEquals {
        /// String variable name.
        name: String,
        /// Expected value.
        value: String,
    },
    /// Holds during the first `n` turns of the game.
    Times(u64),
    /// Logical NOT.
    Not(Box<Condition>),
    /// Logical AND.
    All(Vec<Condition>),
    /// Logical OR.
    Any(Vec<Condition>),
    /// Always true.
    Always,
}

impl Condition {
    /// Condition on the word at a 1-based position.
    pub fn word(position: usize, word: Word) -> Self {
        Condition::WordMatches { position, word }
    }

    /// Counter comparison.
    pub fn counter(name: impl Into<String>, comparison: Comparison, value: i64) -> Self {
        Condition::Counter {
            name: name.into(),
            comparison,
            value,
        }
    }

    /// Negate a condition.
    pub fn negate(condition: Condition) -> Self {
        Condition::Not(Box::new(condition))
    }

    /// Whether evaluating the condition may draw from the random source.
    pub fn draws(&self) -> bool {
        match self {
            Condition::Random(percent) => (1..100).contains(percent),
            Condition::Not(inner) => inner.draws(),
            Condition::All(conditions) | Condition::Any(conditions) => {
                conditions.iter().any(Condition::draws)
            }
            _ => false,
        }
    }

    /// Evaluate the condition.
    ///
    /// `Random(0)` never holds and `Random(100)` always holds; neither draws.
    pub fn holds(&self, ctx: &mut TurnContext<'_>, state: &GameState) -> bool {
        match self {
            Condition::WordMatches { position, word } => ctx.command.word(*position).matches(word),
            Condition::WordUnrecognized { position } => {
                *ctx.command.word(*position) == Word::Unrecognized
            }
            Condition::Here(item) => state.is_here(item),
            Condition::Carrying(item) => state.is_carried(item),
            Condition::Present(item) => state.is_here(item) || state.is_carried(item),
            Condition::In(room) => state.current_room().eq_ignore_ascii_case(room),
            Condition::HasExit(direction) => ctx
                .room(state.current_room())
                .is_some_and(|r| r.has_exit(direction)),
            Condition::HasExitForWord { position } => {
                let direction = ctx.command.word(*position);
                ctx.room(state.current_room())
                    .is_some_and(|r| r.has_exit(direction))
            }
            Condition::Random(percent) => match *percent {
                0 => false,
                p if p >= 100 => true,
                p => ctx.rng.percent() < p,
            },
            Condition::HasMoved(item) => state.has_moved(ctx.world, item),
            Condition::Exists(item) => state.exists(item),
            Condition::FlagSet(name) => state.flag(name),
            Condition::Counter {
                name,
                comparison,
                value,
            } => comparison.compare(state.counter(name), *value),
            Condition::StringEquals { name, value } => state.string(name) == Some(value.as_str()),
            Condition::Times(n) => state.turns() <= *n,
            Condition::Not(inner) => !inner.holds(ctx, state),
            Condition::All(conditions) => conditions.iter().all(|c| c.holds(ctx, state)),
            Condition::Any(conditions) => conditions.iter().any(|c| c.holds(ctx, state)),
            Condition::Always => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cavern_core::{Command, Item, Location, Room, World};
    use proptest::prelude::*;

    fn test_world() -> World {
        let mut world = World::new();
        world
            .add_room(Room::new("hall", "A hall.").with_exit(Word::with_synonyms("north", ["n"]), "yard"))
            .unwrap();
        world.add_room(Room::new("yard", "A yard.")).unwrap();
        world
            .add_item(Item::new("lamp", "A lamp.").portable().at(Location::room("hall")))
            .unwrap();
        world
            .add_item(Item::new("key", "A key.").portable().at(Location::Inventory))
            .unwrap();
        world
            .add_item(Item::new("ghost", "A ghost.").at(Location::room("yard")))
            .unwrap();
        world
    }

    fn eval(condition: &Condition, command: &Command, world: &World, state: &GameState) -> bool {
        let mut rng = || 50u8;
        let mut ctx = TurnContext::new(command, world, &mut rng);
        condition.holds(&mut ctx, state)
    }

    // -----------------------------------------------------------------------
    // Words
    // -----------------------------------------------------------------------

    #[test]
    fn word_matches_by_position() {
        let world = test_world();
        let state = GameState::new(&world, "hall");
        let command = Command::new(vec![Word::named("get"), Word::named("lamp")]);

        assert!(eval(&Condition::word(1, Word::named("get")), &command, &world, &state));
        assert!(eval(&Condition::word(2, Word::Any), &command, &world, &state));
        assert!(eval(&Condition::word(3, Word::None), &command, &world, &state));
        assert!(!eval(&Condition::word(3, Word::Any), &command, &world, &state));
    }

    #[test]
    fn unrecognized_word() {
        let world = test_world();
        let state = GameState::new(&world, "hall");
        let command = Command::new(vec![Word::named("get"), Word::Unrecognized]);
        let cond = Condition::WordUnrecognized { position: 2 };
        assert!(eval(&cond, &command, &world, &state));
        assert!(!eval(&Condition::WordUnrecognized { position: 1 }, &command, &world, &state));
    }

    // -----------------------------------------------------------------------
    // World and state
    // -----------------------------------------------------------------------

    #[test]
    fn item_placement() {
        let world = test_world();
        let state = GameState::new(&world, "hall");
        let none = Command::NONE;

        assert!(eval(&Condition::Here("lamp".into()), &none, &world, &state));
        assert!(eval(&Condition::Carrying("key".into()), &none, &world, &state));
        assert!(eval(&Condition::Present("key".into()), &none, &world, &state));
        assert!(!eval(&Condition::Present("ghost".into()), &none, &world, &state));
        assert!(eval(&Condition::Exists("ghost".into()), &none, &world, &state));
        assert!(!eval(&Condition::HasMoved("lamp".into()), &none, &world, &state));
    }

    #[test]
    fn exits_from_current_room() {
        let world = test_world();
        let state = GameState::new(&world, "hall");
        let command = Command::new(vec![Word::named("go"), Word::named("n")]);

        assert!(eval(&Condition::In("HALL".into()), &command, &world, &state));
        assert!(eval(&Condition::HasExit(Word::named("north")), &command, &world, &state));
        assert!(eval(&Condition::HasExitForWord { position: 2 }, &command, &world, &state));
        assert!(!eval(&Condition::HasExitForWord { position: 1 }, &command, &world, &state));
        assert!(!eval(&Condition::HasExitForWord { position: 3 }, &command, &world, &state));
    }

    #[test]
    fn counters_flags_and_strings() {
        let world = test_world();
        let mut state = GameState::new(&world, "hall");
        state.set_counter("score", 5);
        state.set_flag("lit", true);
        state.set_string("mood", "calm");
        let none = Command::NONE;

        assert!(eval(&Condition::counter("score", Comparison::Ge, 5), &none, &world, &state));
        assert!(!eval(&Condition::counter("score", Comparison::Lt, 5), &none, &world, &state));
        assert!(eval(&Condition::counter("other", Comparison::Eq, 0), &none, &world, &state));
        assert!(eval(&Condition::FlagSet("lit".into()), &none, &world, &state));
        assert!(!eval(&Condition::FlagSet("dark".into()), &none, &world, &state));
        let mood = Condition::StringEquals {
            name: "mood".into(),
            value: "calm".into(),
        };
        assert!(eval(&mood, &none, &world, &state));
    }

    #[test]
    fn times_counts_from_turn_one() {
        let world = test_world();
        let mut state = GameState::new(&world, "hall");
        let none = Command::NONE;
        let once = Condition::Times(1);

        state.begin_turn();
        assert!(eval(&once, &none, &world, &state));
        state.begin_turn();
        assert!(!eval(&once, &none, &world, &state));
    }

    // -----------------------------------------------------------------------
    // Randomness
    // -----------------------------------------------------------------------

    #[test]
    fn random_extremes_do_not_draw() {
        let world = test_world();
        let state = GameState::new(&world, "hall");
        let none = Command::NONE;
        let mut draws = 0;
        let mut rng = || {
            draws += 1;
            0u8
        };
        let mut ctx = TurnContext::new(&none, &world, &mut rng);
        assert!(!Condition::Random(0).holds(&mut ctx, &state));
        assert!(Condition::Random(100).holds(&mut ctx, &state));
        assert!(Condition::Random(1).holds(&mut ctx, &state));
        assert_eq!(draws, 1);
    }

    #[test]
    fn random_compares_draw_with_percentage() {
        let world = test_world();
        let state = GameState::new(&world, "hall");
        let none = Command::NONE;
        let mut rng = || 30u8;
        let mut ctx = TurnContext::new(&none, &world, &mut rng);
        assert!(!Condition::Random(30).holds(&mut ctx, &state));
        assert!(Condition::Random(31).holds(&mut ctx, &state));
    }

    // -----------------------------------------------------------------------
    // Combinators
    // -----------------------------------------------------------------------

    #[test]
    fn logical_combinators() {
        let world = test_world();
        let state = GameState::new(&world, "hall");
        let none = Command::NONE;
        let here = Condition::Here("lamp".into());
        let gone = Condition::Here("ghost".into());

        assert!(eval(&Condition::All(vec![here.clone(), Condition::Always]), &none, &world, &state));
        assert!(!eval(&Condition::All(vec![here.clone(), gone.clone()]), &none, &world, &state));
        assert!(eval(&Condition::Any(vec![gone.clone(), here]), &none, &world, &state));
        assert!(eval(&Condition::negate(gone), &none, &world, &state));
        assert!(eval(&Condition::All(vec![]), &none, &world, &state));
        assert!(!eval(&Condition::Any(vec![]), &none, &world, &state));
    }

    proptest! {
        #[test]
        fn random_extremes_ignore_the_source(draw in any::<u8>()) {
            let world = test_world();
            let state = GameState::new(&world, "hall");
            let none = Command::NONE;
            let mut rng = move || draw;
            let mut ctx = TurnContext::new(&none, &world, &mut rng);
            prop_assert!(!Condition::Random(0).holds(&mut ctx, &state));
            prop_assert!(Condition::Random(100).holds(&mut ctx, &state));
        }
    }
}
