//! Terminal display and input for `cavern play`.

use std::io::{self, BufRead, Write};

use colored::Colorize;

use cavern_core::{Command, Item, Room, Vocabulary};
use cavern_engine::{CommandInterpreter, Display, EngineResult, render_inventory, render_room};

/// Writes game output to stdout with a highlighted room heading.
pub struct ConsoleDisplay;

impl Display for ConsoleDisplay {
    fn print(&mut self, message: &str) {
        print!("{message}");
    }

    fn look(&mut self, room: &Room, items: &[&Item]) {
        let text = render_room(room, items);
        let mut lines = text.lines();
        if let Some(heading) = lines.next() {
            println!("{}", heading.bold().cyan());
        }
        for line in lines {
            println!("{line}");
        }
    }

    fn inventory(&mut self, items: &[&Item]) {
        print!("{}", render_inventory(items));
    }
}

/// Reads one command per line, prompting when interactive and echoing when
/// replaying a command file.
pub struct ConsoleInput<'v, R> {
    reader: R,
    vocabulary: &'v Vocabulary,
    echo: bool,
}

impl<'v, R: BufRead> ConsoleInput<'v, R> {
    /// Prompt with `> ` before each line.
    pub fn interactive(reader: R, vocabulary: &'v Vocabulary) -> Self {
        Self {
            reader,
            vocabulary,
            echo: false,
        }
    }

    /// Print each line after the prompt as if it had been typed.
    pub fn replay(reader: R, vocabulary: &'v Vocabulary) -> Self {
        Self {
            reader,
            vocabulary,
            echo: true,
        }
    }
}

impl<R: BufRead> CommandInterpreter for ConsoleInput<'_, R> {
    fn next_command(&mut self) -> EngineResult<Option<Command>> {
        let mut line = String::new();
        loop {
            let mut stdout = io::stdout();
            if !self.echo {
                write!(stdout, "> ")?;
                stdout.flush()?;
            }

            line.clear();
            if self.reader.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            let input = line.trim();
            if input.is_empty() {
                continue;
            }
            if self.echo {
                writeln!(stdout, "> {input}")?;
            }
            return Ok(Some(self.vocabulary.parse(input)));
        }
    }
}
