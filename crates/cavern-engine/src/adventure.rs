use cavern_core::{GameState, Vocabulary, World};

use crate::action::Action;
use crate::error::{EngineError, EngineResult};

/// A compiled adventure: world, vocabulary, and rules.
///
/// Never changes after construction. Each game session gets its own
/// [`GameState`] from [`Adventure::new_state`].
#[derive(Debug, Clone)]
pub struct Adventure {
    world: World,
    vocabulary: Vocabulary,
    occurs: Vec<Action>,
    actions: Vec<Action>,
    start_room: String,
}

impl Adventure {
    /// Bundle a world and vocabulary, starting in `start_room`.
    pub fn new(world: World, vocabulary: Vocabulary, start_room: &str) -> EngineResult<Self> {
        let start_room = world
            .room(start_room)
            .map(|r| r.name.clone())
            .ok_or_else(|| EngineError::UnknownStartRoom(start_room.to_string()))?;
        Ok(Self {
            world,
            vocabulary,
            occurs: Vec::new(),
            actions: Vec::new(),
            start_room,
        })
    }

    /// Set the occurs list, in evaluation order.
    pub fn with_occurs(mut self, occurs: Vec<Action>) -> Self {
        self.occurs = occurs;
        self
    }

    /// Set the player action list, in priority order.
    pub fn with_actions(mut self, actions: Vec<Action>) -> Self {
        self.actions = actions;
        self
    }

    /// The static world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Words the adventure recognizes in player input.
    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Actions evaluated every turn.
    pub fn occurs(&self) -> &[Action] {
        &self.occurs
    }

    /// Player actions in priority order.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Name of the room a new game starts in.
    pub fn start_room(&self) -> &str {
        &self.start_room
    }

    /// A fresh state for a new game session.
    pub fn new_state(&self) -> GameState {
        GameState::new(&self.world, self.start_room.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cavern_core::Room;

    #[test]
    fn start_room_is_canonicalized() {
        let mut world = World::new();
        world.add_room(Room::new("Hall", "A hall.")).unwrap();
        let adventure = Adventure::new(world, Vocabulary::new(), "hall").unwrap();
        assert_eq!(adventure.start_room(), "Hall");
        assert_eq!(adventure.new_state().current_room(), "Hall");
    }

    #[test]
    fn unknown_start_room() {
        let err = Adventure::new(World::new(), Vocabulary::new(), "void").unwrap_err();
        assert!(matches!(err, EngineError::UnknownStartRoom(name) if name == "void"));
    }
}
