//! The per-turn dispatcher.
//!
//! A turn advances the turn counter, runs every occurs against the empty
//! command, and then, if the game is still running, scans the player actions
//! in declaration order until one matches. An unmatched command is a quiet
//! no-op; scripts end their action list with catch-all fallbacks.

use cavern_core::{Command, GameState};
use tracing::{debug, trace};

use crate::adventure::Adventure;
use crate::context::TurnContext;
use crate::display::Display;
use crate::error::{EngineError, EngineResult};
use crate::random::RandomSource;

/// What happened during one turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnOutcome {
    /// Turn number (1 for the first turn).
    pub turn: u64,
    /// How many occurs matched.
    pub occurs_fired: usize,
    /// Index of the player action that matched, if any.
    pub matched_action: Option<usize>,
    /// Whether the game is still running after the turn.
    pub running: bool,
}

/// Play one turn of `adventure` for `command`.
///
/// Fails with [`EngineError::GameOver`] once the game has ended. Errors from
/// effects propagate immediately and leave the state as far as it got.
pub fn take_turn(
    adventure: &Adventure,
    state: &mut GameState,
    command: &Command,
    display: &mut dyn Display,
    rng: &mut dyn RandomSource,
) -> EngineResult<TurnOutcome> {
    if !state.is_running() {
        return Err(EngineError::GameOver);
    }
    let turn = state.begin_turn();
    debug!(turn, command = %command, "taking turn");

    let none = Command::NONE;
    let mut occurs_fired = 0;
    {
        let mut ctx = TurnContext::new(&none, adventure.world(), &mut *rng);
        for (index, occurs) in adventure.occurs().iter().enumerate() {
            if occurs.run(&mut ctx, state, display)? {
                trace!(turn, index, "occurs fired");
                occurs_fired += 1;
            }
        }
    }

    let mut matched_action = None;
    if state.is_running() {
        let mut ctx = TurnContext::new(command, adventure.world(), rng);
        for (index, action) in adventure.actions().iter().enumerate() {
            if action.run(&mut ctx, state, display)? {
                matched_action = Some(index);
                break;
            }
        }
    }

    debug!(turn, matched = ?matched_action, occurs_fired, "turn complete");
    Ok(TurnOutcome {
        turn,
        occurs_fired,
        matched_action,
        running: state.is_running(),
    })
}

impl Adventure {
    /// Play one turn. See [`take_turn`].
    pub fn take_turn(
        &self,
        state: &mut GameState,
        command: &Command,
        display: &mut dyn Display,
        rng: &mut dyn RandomSource,
    ) -> EngineResult<TurnOutcome> {
        take_turn(self, state, command, display, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;
    use crate::condition::{Comparison, Condition};
    use crate::display::TextDisplay;
    use crate::effect::Effect;
    use cavern_core::{Room, Vocabulary, Word, World};

    fn hall() -> World {
        let mut world = World::new();
        world.add_room(Room::new("hall", "A hall.")).unwrap();
        world
    }

    fn adventure(occurs: Vec<Action>, actions: Vec<Action>) -> Adventure {
        Adventure::new(hall(), Vocabulary::new(), "hall")
            .unwrap()
            .with_occurs(occurs)
            .with_actions(actions)
    }

    fn play(adventure: &Adventure, state: &mut GameState, words: &[&str]) -> (TurnOutcome, String) {
        let command = Command::new(words.iter().map(|w| Word::named(*w)).collect());
        let mut display = TextDisplay::new();
        let mut rng = || 0u8;
        let outcome = adventure
            .take_turn(state, &command, &mut display, &mut rng)
            .unwrap();
        (outcome, display.take_output())
    }

    /// Occurs that sets `tag` to `value` when the tag already equals `value - 1`.
    fn tagger(value: i64) -> Action {
        Action::builder()
            .when(Condition::counter("tag", Comparison::Eq, value - 1))
            .then(Effect::SetCounter {
                name: "tag".into(),
                value,
            })
            .and_then(Effect::SetCounter {
                name: format!("seen{value}"),
                value,
            })
            .build()
    }

    #[test]
    fn occurs_all_run_in_order() {
        let adventure = adventure(vec![tagger(1), tagger(2), tagger(3)], vec![]);
        let mut state = adventure.new_state();
        let (outcome, _) = play(&adventure, &mut state, &["wait"]);

        assert_eq!(outcome.occurs_fired, 3);
        assert_eq!(state.counter("seen1"), 1);
        assert_eq!(state.counter("seen2"), 2);
        assert_eq!(state.counter("seen3"), 3);
    }

    #[test]
    fn occurs_run_even_when_earlier_ones_do_not_match() {
        let never = Action::builder()
            .when(Condition::negate(Condition::Always))
            .then(Effect::Quit)
            .build();
        let count = Action::builder().then(Effect::Increment("ticks".into())).build();
        let adventure = adventure(vec![never, count], vec![]);
        let mut state = adventure.new_state();
        play(&adventure, &mut state, &["wait"]);
        play(&adventure, &mut state, &["wait"]);
        assert_eq!(state.counter("ticks"), 2);
        assert!(state.is_running());
    }

    #[test]
    fn first_match_wins() {
        let first = Action::on([Word::named("xyzzy")])
            .then(Effect::Println("first".into()))
            .build();
        let second = Action::on([Word::Any])
            .then(Effect::Println("second".into()))
            .build();
        let adventure = adventure(vec![], vec![first, second]);
        let mut state = adventure.new_state();

        let (outcome, out) = play(&adventure, &mut state, &["xyzzy"]);
        assert_eq!(outcome.matched_action, Some(0));
        assert_eq!(out, "first\n");

        let (outcome, out) = play(&adventure, &mut state, &["plugh"]);
        assert_eq!(outcome.matched_action, Some(1));
        assert_eq!(out, "second\n");
    }

    #[test]
    fn quitting_occurs_skips_actions() {
        let doom = Action::builder()
            .when(Condition::Times(0))
            .then(Effect::Println("never".into()))
            .build();
        let end = Action::builder()
            .when(Condition::counter("ticks", Comparison::Ge, 0))
            .then(Effect::Println("The roof falls in.".into()))
            .and_then(Effect::Quit)
            .build();
        let catch_all = Action::builder().then(Effect::Println("unreachable".into())).build();
        let adventure = adventure(vec![doom, end], vec![catch_all]);
        let mut state = adventure.new_state();

        let (outcome, out) = play(&adventure, &mut state, &["look"]);
        assert_eq!(outcome.matched_action, None);
        assert!(!outcome.running);
        assert_eq!(out, "The roof falls in.\n");
    }

    #[test]
    fn turns_after_quit_are_rejected() {
        let quit = Action::builder().then(Effect::Quit).build();
        let adventure = adventure(vec![], vec![quit]);
        let mut state = adventure.new_state();
        play(&adventure, &mut state, &["quit"]);

        let mut display = TextDisplay::new();
        let mut rng = || 0u8;
        let err = adventure
            .take_turn(&mut state, &Command::NONE, &mut display, &mut rng)
            .unwrap_err();
        assert!(matches!(err, EngineError::GameOver));
        assert_eq!(state.turns(), 1);
    }

    #[test]
    fn empty_adventure_only_counts_turns() {
        let adventure = adventure(vec![], vec![]);
        let mut state = adventure.new_state();
        let before = state.clone();

        let (outcome, out) = play(&adventure, &mut state, &["anything", "at", "all"]);
        assert_eq!(outcome.matched_action, None);
        assert!(out.is_empty());
        assert_eq!(state.turns(), 1);

        let mut expected = before;
        expected.begin_turn();
        assert_eq!(state, expected);
    }

    #[test]
    fn occurs_see_the_empty_command() {
        let echo = Action::builder()
            .when(Condition::word(1, Word::None))
            .then(Effect::Print("[{word:1}]".into()))
            .build();
        let adventure = adventure(vec![echo], vec![]);
        let mut state = adventure.new_state();
        let (outcome, out) = play(&adventure, &mut state, &["shout"]);
        assert_eq!(outcome.occurs_fired, 1);
        assert_eq!(out, "[]");
    }

    #[test]
    fn times_limits_an_occurs_to_early_turns() {
        let intro = Action::builder()
            .when(Condition::Times(2))
            .then(Effect::Increment("intro".into()))
            .build();
        let adventure = adventure(vec![intro], vec![]);
        let mut state = adventure.new_state();
        for _ in 0..5 {
            play(&adventure, &mut state, &["wait"]);
        }
        assert_eq!(state.counter("intro"), 2);
    }
}
