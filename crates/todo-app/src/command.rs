//! Line commands understood by the terminal front end

use todo_core::TaskId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(String),
    Remove(TaskId),
    List,
    Json,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  add <text>     add a task
  rm <id>        delete a task (alias: delete)
  ls             show the list (alias: list)
  json           print the list as JSON
  help           show this help
  quit           leave (alias: exit)";

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim_start();
    if trimmed.trim().is_empty() {
        return Ok(None);
    }

    let (word, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest),
        None => (trimmed, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "add" => Command::Add(rest.to_string()),
        "rm" | "delete" => {
            let id = rest
                .trim()
                .parse::<TaskId>()
                .map_err(|_| format!("Invalid task id: {:?}", rest.trim()))?;
            Command::Remove(id)
        }
        "ls" | "list" => Command::List,
        "json" => Command::Json,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(format!("Unknown command: {}", other)),
    };

    Ok(Some(command))
}
