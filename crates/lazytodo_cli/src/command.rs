//! Line commands of the interactive front-end.
//!
//! # Responsibility
//! - Parse one input line into a `Command`.
//! - Translate a command into interactions on the headless list view.
//!
//! # Invariants
//! - Commands only interact with the view; they never touch the store.
//!   The controller turns the resulting intent events into actions.

use lazytodo_core::{ElementKey, ItemMode, ItemView, ListView, TaskItem, TaskList};

pub const HELP: &str = "\
commands:
  add <text>        add a task
  toggle <n>        toggle task n completed
  delete <n>        delete task n
  edit <n>          start editing task n
  set <text>        commit the edit in progress with <text>
  cancel            abandon the edit in progress
  filter <name>     show all | active | completed
  clear             remove completed tasks
  show              print the list
  help              print this help
  quit              exit";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(String),
    Toggle(usize),
    Delete(usize),
    Edit(usize),
    Set(String),
    Cancel,
    Filter(String),
    Clear,
    Show,
    Help,
    Quit,
}

/// Parses one line. Positions are 1-based as displayed.
pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    match verb.to_ascii_lowercase().as_str() {
        "add" | "a" => non_empty(rest, "add").map(Command::Add),
        "toggle" | "t" => parse_position(rest).map(Command::Toggle),
        "delete" | "rm" => parse_position(rest).map(Command::Delete),
        "edit" | "e" => parse_position(rest).map(Command::Edit),
        "set" => Ok(Command::Set(rest.to_string())),
        "cancel" => Ok(Command::Cancel),
        "filter" | "f" => non_empty(rest, "filter").map(Command::Filter),
        "clear" => Ok(Command::Clear),
        "show" | "ls" | "" => Ok(Command::Show),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        other => Err(format!("unknown command `{other}`; type `help`")),
    }
}

/// Applies a view command to `list`.
///
/// `Show`, `Help` and `Quit` are handled by the session and ignored here.
pub fn apply_command(list: &mut TaskList, command: Command) -> Result<(), String> {
    match command {
        Command::Add(text) => {
            list.type_new_todo(text);
            list.submit_new_todo();
        }
        Command::Toggle(position) => {
            let key = key_at(list, position)?;
            list.with_child(key, TaskItem::toggle_completed);
        }
        Command::Delete(position) => {
            let key = key_at(list, position)?;
            list.with_child(key, TaskItem::activate_delete);
        }
        Command::Edit(position) => {
            if editing_key(list).is_some() {
                return Err("an edit is already in progress; `set` or `cancel` it".to_string());
            }
            let key = key_at(list, position)?;
            list.with_child(key, TaskItem::activate_description);
        }
        Command::Set(text) => {
            let key = editing_key(list).ok_or("no edit in progress; use `edit <n>`")?;
            list.with_child(key, |item| {
                item.type_edit(text);
                item.commit_edit();
            });
        }
        Command::Cancel => {
            let key = editing_key(list).ok_or("no edit in progress")?;
            list.with_child(key, TaskItem::press_escape);
        }
        Command::Filter(name) => list.select_filter(name),
        Command::Clear => list.clear_completed(),
        Command::Show | Command::Help | Command::Quit => {}
    }
    Ok(())
}

fn non_empty(value: &str, verb: &str) -> Result<String, String> {
    if value.is_empty() {
        Err(format!("`{verb}` needs an argument"))
    } else {
        Ok(value.to_string())
    }
}

fn parse_position(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(position) if position > 0 => Ok(position),
        _ => Err(format!("expected a task number, got `{value}`")),
    }
}

fn key_at(list: &TaskList, position: usize) -> Result<ElementKey, String> {
    list.child_key_at(position - 1)
        .ok_or_else(|| format!("no task number {position}"))
}

fn editing_key(list: &TaskList) -> Option<ElementKey> {
    list.children()
        .iter()
        .find(|child| child.mode() == ItemMode::Editing)
        .map(|child| child.key())
}
