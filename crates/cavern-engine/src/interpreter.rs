use std::collections::VecDeque;
use std::io::BufRead;

use cavern_core::{Command, Vocabulary};

use crate::error::EngineResult;

/// Input boundary of the engine: the source of player commands.
pub trait CommandInterpreter {
    /// The next command, or `None` when input is exhausted.
    fn next_command(&mut self) -> EngineResult<Option<Command>>;
}

/// Reads one command per line from a buffered reader.
///
/// Blank lines are skipped.
pub struct LineInterpreter<'v, R> {
    reader: R,
    vocabulary: &'v Vocabulary,
}

impl<'v, R: BufRead> LineInterpreter<'v, R> {
    /// Parse lines from `reader` against `vocabulary`.
    pub fn new(reader: R, vocabulary: &'v Vocabulary) -> Self {
        Self { reader, vocabulary }
    }
}

impl<R: BufRead> CommandInterpreter for LineInterpreter<'_, R> {
    fn next_command(&mut self) -> EngineResult<Option<Command>> {
        let mut line = String::new();
        loop {
            line.clear();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            let command = self.vocabulary.parse(&line);
            if !command.is_empty() {
                return Ok(Some(command));
            }
        }
    }
}

/// Replays a fixed list of input lines.
///
/// Blank lines are skipped.
#[derive(Debug, Clone)]
pub struct ScriptedInterpreter {
    lines: VecDeque<String>,
    vocabulary: Vocabulary,
}

impl ScriptedInterpreter {
    /// Queue `lines` to be parsed against `vocabulary`.
    pub fn new<I, S>(vocabulary: &Vocabulary, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
            vocabulary: vocabulary.clone(),
        }
    }

    /// Lines not yet consumed.
    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl CommandInterpreter for ScriptedInterpreter {
    fn next_command(&mut self) -> EngineResult<Option<Command>> {
        while let Some(line) = self.lines.pop_front() {
            let command = self.vocabulary.parse(&line);
            if !command.is_empty() {
                return Ok(Some(command));
            }
        }
        Ok(None)
    }
}
