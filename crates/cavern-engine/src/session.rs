//! Game sessions: one adventure, one state, one transcript.

use std::sync::Arc;

use cavern_core::{Command, GameState, Item, Room};
use tracing::{debug, info, warn};

use crate::adventure::Adventure;
use crate::config::GameConfig;
use crate::dispatch::TurnOutcome;
use crate::display::{Display, render_inventory, render_room};
use crate::error::{EngineError, EngineResult};
use crate::interpreter::CommandInterpreter;
use crate::random::{RandomSource, SeededRandom};
use crate::transcript::{GameId, TurnRecord};

/// A running game.
///
/// Owns the mutable [`GameState`]; the [`Adventure`] is shared and may back
/// any number of sessions.
pub struct Game {
    id: GameId,
    adventure: Arc<Adventure>,
    state: GameState,
    rng: Box<dyn RandomSource>,
    config: GameConfig,
    transcript: Vec<TurnRecord>,
}

impl Game {
    /// Start a new game of `adventure`.
    pub fn new(adventure: Arc<Adventure>, config: GameConfig) -> Self {
        let state = adventure.new_state();
        Self::with_state(adventure, state, config)
    }

    /// Continue a game from a stored state.
    ///
    /// Fails when the state's room is not part of the adventure.
    pub fn resume(
        adventure: Arc<Adventure>,
        state: GameState,
        config: GameConfig,
    ) -> EngineResult<Self> {
        adventure.world().require_room(state.current_room())?;
        Ok(Self::with_state(adventure, state, config))
    }

    fn with_state(adventure: Arc<Adventure>, state: GameState, config: GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => SeededRandom::new(seed),
            None => SeededRandom::from_entropy(),
        };
        Self {
            id: GameId::new(),
            adventure,
            state,
            rng: Box::new(rng),
            config,
            transcript: Vec::new(),
        }
    }

    /// Keep an existing session id, e.g. when resuming a stored game.
    pub fn with_id(mut self, id: GameId) -> Self {
        self.id = id;
        self
    }

    /// Replace the random source.
    pub fn with_random(mut self, rng: impl RandomSource + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    /// Session id.
    pub fn id(&self) -> GameId {
        self.id
    }

    /// The adventure being played.
    pub fn adventure(&self) -> &Arc<Adventure> {
        &self.adventure
    }

    /// Current state.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Session configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Turns played so far in this session.
    pub fn transcript(&self) -> &[TurnRecord] {
        &self.transcript
    }

    /// Whether the game is still running.
    pub fn is_running(&self) -> bool {
        self.state.is_running()
    }

    /// Serialize the current state to JSON.
    pub fn snapshot(&self) -> EngineResult<String> {
        Ok(self.state.to_json()?)
    }

    /// Describe the start room if configured to.
    pub fn start(&self, display: &mut dyn Display) -> EngineResult<()> {
        info!(game = %self.id, room = self.state.current_room(), "game started");
        if self.config.look_on_start {
            let world = self.adventure.world();
            let room = world.require_room(self.state.current_room())?;
            display.look(room, &self.state.items_here(world));
        }
        Ok(())
    }

    /// Play one turn and record it in the transcript.
    ///
    /// A turn that fails part way is still recorded with whatever it displayed
    /// and the error, since its effects on the state stay applied. A finished
    /// game starts no turn and records nothing.
    pub fn take_turn(
        &mut self,
        command: &Command,
        display: &mut dyn Display,
    ) -> EngineResult<TurnOutcome> {
        let mut recording = Recording::new(display);
        let result = self.adventure.take_turn(
            &mut self.state,
            command,
            &mut recording,
            self.rng.as_mut(),
        );
        if matches!(result, Err(EngineError::GameOver)) {
            return result;
        }
        let (turn, matched, error) = match &result {
            Ok(outcome) => (outcome.turn, outcome.matched_action, None),
            Err(e) => {
                warn!(game = %self.id, turn = self.state.turns(), error = %e, "turn failed");
                (self.state.turns(), None, Some(e.to_string()))
            }
        };
        self.transcript.push(TurnRecord {
            turn,
            input: command.to_string(),
            matched,
            output: recording.buffer,
            error,
            at: chrono::Utc::now(),
        });
        result
    }

    /// Play until the game ends, input runs out, or the turn limit is reached.
    ///
    /// Returns the number of turns played by this call.
    pub fn run(
        &mut self,
        input: &mut dyn CommandInterpreter,
        display: &mut dyn Display,
    ) -> EngineResult<u64> {
        let mut played = 0;
        while self.is_running() {
            if self.config.max_turns.is_some_and(|max| played >= max) {
                debug!(played, "turn limit reached");
                break;
            }
            let Some(command) = input.next_command()? else {
                debug!(played, "input exhausted");
                break;
            };
            match self.take_turn(&command, display) {
                Ok(_) => played += 1,
                Err(EngineError::GameOver) => break,
                Err(e) => return Err(e),
            }
        }
        info!(game = %self.id, played, running = self.is_running(), "game loop finished");
        Ok(played)
    }
}

/// Forwards to another display while keeping a text copy of everything shown.
struct Recording<'d> {
    inner: &'d mut dyn Display,
    buffer: String,
}

impl<'d> Recording<'d> {
    fn new(inner: &'d mut dyn Display) -> Self {
        Self {
            inner,
            buffer: String::new(),
        }
    }
}

impl Display for Recording<'_> {
    fn print(&mut self, message: &str) {
        self.buffer.push_str(message);
        self.inner.print(message);
    }

    fn look(&mut self, room: &Room, items: &[&Item]) {
        self.buffer.push_str(&render_room(room, items));
        self.inner.look(room, items);
    }

    fn inventory(&mut self, items: &[&Item]) {
        self.buffer.push_str(&render_inventory(items));
        self.inner.inventory(items);
    }
}
