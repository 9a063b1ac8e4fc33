//! Configuration for a game session.

/// Configuration for a game session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// RNG seed for reproducible `random` conditions. `None` seeds from the OS.
    pub seed: Option<u64>,
    /// Stop the turn loop after this many turns.
    pub max_turns: Option<u64>,
    /// Describe the start room before the first command.
    pub look_on_start: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: None,
            max_turns: None,
            look_on_start: true,
        }
    }
}

impl GameConfig {
    /// Set the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Limit the number of turns the loop will play.
    pub fn with_max_turns(mut self, max_turns: u64) -> Self {
        self.max_turns = Some(max_turns);
        self
    }

    /// Enable or disable the opening room description.
    pub fn with_look_on_start(mut self, look: bool) -> Self {
        self.look_on_start = look;
        self
    }
}
