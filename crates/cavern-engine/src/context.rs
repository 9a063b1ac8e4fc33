use cavern_core::{Command, Room, World};

use crate::random::RandomSource;

/// Everything a rule can see of the turn being played, apart from the state.
pub struct TurnContext<'a> {
    /// The command being dispatched ([`Command::NONE`] for occurs).
    pub command: &'a Command,
    /// The static world.
    pub world: &'a World,
    /// Source for `random` conditions.
    pub rng: &'a mut dyn RandomSource,
}

impl<'a> TurnContext<'a> {
    /// Bundle a command, the world, and a random source.
    pub fn new(command: &'a Command, world: &'a World, rng: &'a mut dyn RandomSource) -> Self {
        Self {
            command,
            world,
            rng,
        }
    }

    /// The room with the given name, if the world has one.
    pub fn room(&self, name: &str) -> Option<&'a Room> {
        self.world.room(name)
    }
}
