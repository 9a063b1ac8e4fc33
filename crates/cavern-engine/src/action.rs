//! Actions: a conjunction of conditions guarding an ordered list of effects.

use cavern_core::{GameState, Word};

use crate::condition::Condition;
use crate::context::TurnContext;
use crate::display::Display;
use crate::effect::Effect;
use crate::error::EngineResult;

/// A rule: when every condition holds, run every effect in order.
///
/// Built once through [`ActionBuilder`] and immutable afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    conditions: Vec<Condition>,
    effects: Vec<Effect>,
}

impl Action {
    /// Start an action with no conditions and no effects.
    pub fn builder() -> ActionBuilder {
        ActionBuilder::default()
    }

    /// Start an action matching a command pattern.
    ///
    /// Each pattern word becomes a word-match condition on its 1-based
    /// position; a [`Word::None`] entry requires the command to end there.
    pub fn on<I>(pattern: I) -> ActionBuilder
    where
        I: IntoIterator<Item = Word>,
    {
        pattern
            .into_iter()
            .enumerate()
            .fold(ActionBuilder::default(), |builder, (i, word)| {
                builder.when(Condition::word(i + 1, word))
            })
    }

    /// Conditions in declaration order.
    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Effects in declaration order.
    pub fn effects(&self) -> &[Effect] {
        &self.effects
    }

    /// Whether every condition holds. Stops at the first one that does not.
    pub fn is_satisfied(&self, ctx: &mut TurnContext<'_>, state: &GameState) -> bool {
        self.conditions.iter().all(|c| c.holds(ctx, state))
    }

    /// Run the action, returning whether it matched.
    ///
    /// There is no rollback: if an effect fails, the effects before it have
    /// already changed the state.
    pub fn run(
        &self,
        ctx: &mut TurnContext<'_>,
        state: &mut GameState,
        display: &mut dyn Display,
    ) -> EngineResult<bool> {
        if !self.is_satisfied(ctx, state) {
            return Ok(false);
        }
        for effect in &self.effects {
            effect.apply(ctx, state, display)?;
        }
        Ok(true)
    }
}

/// Staged builder for [`Action`].
///
/// `when` and `and` append to one conjunction; a repeated condition is kept
/// once, at its first position, unless it draws from the random source:
/// `random 50` twice is two independent draws. `and_then` appends an effect, while `then`
/// discards every effect added so far and starts over. Code that chains
/// `then(a).and_then(b).then(c)` ends up with just `c`.
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct ActionBuilder {
    conditions: Vec<Condition>,
    effects: Vec<Effect>,
}

impl ActionBuilder {
    /// Add a condition.
    pub fn when(mut self, condition: Condition) -> Self {
        if condition.draws() || !self.conditions.contains(&condition) {
            self.conditions.push(condition);
        }
        self
    }

    /// Add a condition (reads better after `when`).
    pub fn and(self, condition: Condition) -> Self {
        self.when(condition)
    }

    /// Replace the effect list with a single effect.
    pub fn then(mut self, effect: Effect) -> Self {
        self.effects.clear();
        self.effects.push(effect);
        self
    }

    /// Append an effect.
    pub fn and_then(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Finish the action.
    pub fn build(self) -> Action {
        Action {
            conditions: self.conditions,
            effects: self.effects,
        }
    }
}
