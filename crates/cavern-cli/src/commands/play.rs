use std::fs::File;
use std::io::{self, BufReader};
use std::path::Path;
use std::sync::Arc;

use colored::Colorize;

use cavern_engine::{Game, GameConfig};

use crate::console::{ConsoleDisplay, ConsoleInput};

pub fn run(path: &Path, script: Option<&Path>, config: GameConfig) -> Result<(), String> {
    let adventure = Arc::new(super::compile_file(path)?);
    let vocabulary = adventure.vocabulary();

    let mut game = Game::new(Arc::clone(&adventure), config);
    let mut display = ConsoleDisplay;
    game.start(&mut display).map_err(|e| e.to_string())?;

    let played = match script {
        Some(script) => {
            let file = File::open(script)
                .map_err(|e| format!("cannot read {}: {e}", script.display()))?;
            let mut input = ConsoleInput::replay(BufReader::new(file), vocabulary);
            game.run(&mut input, &mut display)
        }
        None => {
            let stdin = io::stdin();
            let mut input = ConsoleInput::interactive(stdin.lock(), vocabulary);
            game.run(&mut input, &mut display)
        }
    }
    .map_err(|e| e.to_string())?;

    if !game.is_running() {
        println!("\n  {} after {played} turns.", "Game over".bold());
    }

    Ok(())
}
