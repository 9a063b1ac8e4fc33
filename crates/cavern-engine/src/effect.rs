//! Effects: the steps an action performs once its conditions hold.

use cavern_core::{Command, GameState, Location, Word};

use crate::context::TurnContext;
use crate::display::Display;
use crate::error::{EngineError, EngineResult};

/// One step of an action's result list.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Print a message template.
    Print(String),
    /// Print a message template followed by a newline.
    Println(String),
    /// Describe the current room.
    Look,
    /// List carried items.
    Inventory,
    /// Leave through the exit matching a direction word.
    Go(Word),
    /// Leave through the exit matching the command word at `position`.
    GoWord {
        /// 1-based word position.
        position: usize,
    },
    /// Move the player to a room without using an exit.
    Goto(String),
    /// Move an item into the inventory.
    Get(String),
    /// Move an item into the current room.
    Drop(String),
    /// Move an item into the current room.
    PutHere(String),
    /// Move an item to a location.
    Put {
        /// Item name.
        item: String,
        /// Destination.
        to: Location,
    },
    /// Take the first item out of play and put the second where it was.
    Swap(String, String),
    /// Move an item to nowhere.
    Destroy(String),
    /// Set a flag.
    SetFlag(String),
    /// Clear a flag.
    ResetFlag(String),
    /// Set a counter to a value.
    SetCounter {
        /// Counter name.
        name: String,
        /// New value.
        value: i64,
    },
    /// Add one to a counter.
    Increment(String),
    /// Subtract one from a counter.
    Decrement(String),
    /// Set a counter back to zero.
    ResetCounter(String),
    /// Set a named string.
    SetString {
        /// String variable name.
        name: String,
        /// New value.
        value: String,
    },
    /// End the game.
    Quit,
}

impl Effect {
    /// Perform the effect.
    ///
    /// Fails when asked to leave through an exit the room lacks or to carry a
    /// fixed item. Earlier effects of the same action are not undone.
    pub fn apply(
        &self,
        ctx: &TurnContext<'_>,
        state: &mut GameState,
        display: &mut dyn Display,
    ) -> EngineResult<()> {
        let world = ctx.world;
        match self {
            Effect::Print(template) => display.print(&substitute(template, ctx.command)),
            Effect::Println(template) => {
                let mut message = substitute(template, ctx.command);
                message.push('\n');
                display.print(&message);
            }
            Effect::Look => {
                let room = world.require_room(state.current_room())?;
                display.look(room, &state.items_here(world));
            }
            Effect::Inventory => {
                display.inventory(&state.items_at(world, &Location::Inventory));
            }
            Effect::Go(direction) => travel(ctx, state, direction)?,
            Effect::GoWord { position } => travel(ctx, state, ctx.command.word(*position))?,
            Effect::Goto(room) => {
                let room = world.require_room(room)?;
                state.set_current_room(room.name.clone());
            }
            Effect::Get(item) => state.move_item(world, item, Location::Inventory)?,
            Effect::Drop(item) | Effect::PutHere(item) => {
                let here = Location::room(state.current_room());
                state.move_item(world, item, here)?;
            }
            Effect::Put { item, to } => state.move_item(world, item, to.clone())?,
            Effect::Swap(a, b) => state.swap_items(world, a, b)?,
            Effect::Destroy(item) => state.move_item(world, item, Location::Nowhere)?,
            Effect::SetFlag(name) => state.set_flag(name.as_str(), true),
            Effect::ResetFlag(name) => state.set_flag(name.as_str(), false),
            Effect::SetCounter { name, value } => state.set_counter(name.as_str(), *value),
            Effect::Increment(name) => state.increment(name),
            Effect::Decrement(name) => state.decrement(name),
            Effect::ResetCounter(name) => state.set_counter(name.as_str(), 0),
            Effect::SetString { name, value } => state.set_string(name.as_str(), value.as_str()),
            Effect::Quit => state.quit(),
        }
        Ok(())
    }
}

fn travel(ctx: &TurnContext<'_>, state: &mut GameState, direction: &Word) -> EngineResult<()> {
    let room = ctx.world.require_room(state.current_room())?;
    let exit = room
        .exit_towards(direction)
        .ok_or_else(|| EngineError::NoExit {
            room: room.name.clone(),
            direction: direction.name().to_lowercase(),
        })?;
    state.set_current_room(exit.target.clone());
    Ok(())
}

/// Replace `{word:N}` placeholders with the raw token at position N.
///
/// Placeholders past the end of the command become empty; anything that is
/// not a well-formed placeholder is copied through unchanged.
pub fn substitute(template: &str, command: &Command) -> String {
    const OPEN: &str = "{word:";
    let mut out = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find(OPEN) {
        out.push_str(&rest[..start]);
        let after = &rest[start + OPEN.len()..];
        let placeholder = after
            .find('}')
            .and_then(|end| after[..end].parse::<usize>().ok().map(|n| (n, end)));
        match placeholder {
            Some((position, end)) => {
                out.push_str(command.token(position).unwrap_or(""));
                rest = &after[end + 1..];
            }
            None => {
                out.push_str(OPEN);
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}
