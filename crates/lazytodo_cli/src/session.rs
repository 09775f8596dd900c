//! Interactive read-eval-render loop.
//!
//! # Responsibility
//! - Feed parsed commands to the list view, let the controller process the
//!   resulting intents, and render the list after every command.

use crate::command::{apply_command, parse_command, Command, HELP};
use lazytodo_core::{StateStore, TaskList, TodoApp};
use log::debug;
use std::io::{self, BufRead, Write};

/// Runs commands from `input` until `quit` or end of input.
pub fn run_session<S, R, W>(
    app: &TodoApp<S, TaskList>,
    input: R,
    mut output: W,
) -> io::Result<()>
where
    S: StateStore + 'static,
    R: BufRead,
    W: Write,
{
    writeln!(output, "{}", app.view().borrow().render())?;

    for line in input.lines() {
        let line = line?;
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(message) => {
                writeln!(output, "error: {message}")?;
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => {
                writeln!(output, "{HELP}")?;
                continue;
            }
            other => {
                let applied = apply_command(&mut app.view().borrow_mut(), other);
                if let Err(message) = applied {
                    writeln!(output, "error: {message}")?;
                    continue;
                }
            }
        }

        let dispatched = app.process_view_events();
        debug!("event=command module=cli status=ok dispatched={dispatched}");
        writeln!(output, "{}", app.view().borrow().render())?;
    }

    output.flush()
}
