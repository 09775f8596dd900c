//! Interactive terminal front-end for LazyTodo.
//!
//! # Responsibility
//! - Compose store, controller, view and persistence explicitly.
//! - Drive the headless views from stdin commands and render to stdout.

mod command;
mod session;

use clap::Parser;
use lazytodo_core::{
    default_log_level, init_logging, persist_changes, restore_state, SqliteKeyValueStore,
    StorageResult, TaskList, TodoApp, TodoStore,
};
use log::info;
use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;

const IN_MEMORY_DB: &str = lazytodo_core::db::MEMORY_TARGET;

#[derive(Debug, Parser)]
#[command(name = "lazytodo", version, about = "Keyboard-driven task list")]
struct CliArgs {
    /// SQLite file holding the saved list (`:memory:` for a throwaway session).
    #[arg(long, default_value = "lazytodo.sqlite3")]
    db: String,

    /// Absolute directory for rolling log files. Logging is off when absent.
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Log level: trace, debug, info, warn or error.
    #[arg(long)]
    log_level: Option<String>,
}

fn main() -> ExitCode {
    let args = CliArgs::parse();

    if let Some(log_dir) = &args.log_dir {
        let level = args.log_level.as_deref().unwrap_or(default_log_level());
        if let Err(err) = init_logging(level, &log_dir.to_string_lossy()) {
            eprintln!("lazytodo: {err}");
            return ExitCode::FAILURE;
        }
    }

    let kv = match open_storage(&args.db) {
        Ok(kv) => Rc::new(kv),
        Err(err) => {
            eprintln!("lazytodo: {err}");
            return ExitCode::FAILURE;
        }
    };

    let store = Rc::new(TodoStore::new());
    let app = TodoApp::new(Rc::clone(&store), Rc::new(RefCell::new(TaskList::new())));
    restore_state(&*store, &*kv);
    persist_changes(&store, kv);
    info!("event=session_start module=cli status=ok db={}", args.db);

    let stdin = io::stdin();
    match session::run_session(&app, stdin.lock(), io::stdout().lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("lazytodo: {err}");
            ExitCode::FAILURE
        }
    }
}

fn open_storage(db: &str) -> StorageResult<SqliteKeyValueStore> {
    if db == IN_MEMORY_DB {
        SqliteKeyValueStore::open_in_memory()
    } else {
        SqliteKeyValueStore::open(db)
    }
}

#[cfg(test)]
mod tests {
    use super::{open_storage, CliArgs, IN_MEMORY_DB};
    use clap::Parser;
    use lazytodo_core::KeyValueStore;

    #[test]
    fn args_default_to_local_db_without_logging() {
        let args = CliArgs::try_parse_from(["lazytodo"]).unwrap();
        assert_eq!(args.db, "lazytodo.sqlite3");
        assert!(args.log_dir.is_none());
        assert!(args.log_level.is_none());
    }

    #[test]
    fn args_accept_db_and_log_options() {
        let args = CliArgs::try_parse_from([
            "lazytodo",
            "--db",
            IN_MEMORY_DB,
            "--log-dir",
            "/tmp/lazytodo-logs",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(args.db, IN_MEMORY_DB);
        assert_eq!(args.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn in_memory_storage_starts_empty() {
        let kv = open_storage(IN_MEMORY_DB).unwrap();
        assert_eq!(kv.get_item("todo-app-state").unwrap(), None);
    }
}
