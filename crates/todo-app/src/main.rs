//! Terminal front end for the to-do list
//!
//! Reads commands from stdin and drives a [`TaskListSession`] backed by
//! the SQLite store.

mod command;

use anyhow::Context;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use todo_core::{
    SessionState, SqliteTaskStore, Task, TaskListSession, TaskRepository, TodoConfig,
};

use crate::command::Command;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing on stderr so the list output stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "todo_app=info,todo_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = TodoConfig::from_env();
    tracing::info!("Using database: {:?}", config.db_path);

    let store = SqliteTaskStore::open(&config.db_path)
        .with_context(|| format!("Failed to open {}", config.db_path.display()))?;
    let mut session = TaskListSession::new(store);

    if let Some(placeholder) = placeholder(session.state()) {
        println!("{}", placeholder);
    }
    session.load().await.context("Failed to load tasks")?;
    render(&session.tasks_for_display());

    run_loop(&mut session, BufReader::new(tokio::io::stdin())).await
}

/// Text shown instead of the list until the session is ready
fn placeholder(state: SessionState) -> Option<&'static str> {
    match state {
        SessionState::Ready => None,
        SessionState::Uninitialized | SessionState::Loading => Some("Loading todos..."),
    }
}

/// Read commands until EOF or `quit`
///
/// Lines are decoded lossily so stray bytes never end the session.
async fn run_loop<R, I>(session: &mut TaskListSession<R>, mut input: I) -> anyhow::Result<()>
where
    R: TaskRepository,
    I: AsyncBufRead + Unpin,
{
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if input.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }

        let line = String::from_utf8_lossy(&buf);
        let command = match command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(msg) => {
                eprintln!("{}", msg);
                continue;
            }
        };

        if !run(session, command).await? {
            break;
        }
    }

    Ok(())
}

/// Execute one command. Returns `false` when the loop should stop.
async fn run<R: TaskRepository>(
    session: &mut TaskListSession<R>,
    command: Command,
) -> anyhow::Result<bool> {
    match command {
        Command::Add(text) => {
            session.set_input(Some(text));
            match session.submit_input().await {
                Ok(_) => render(&session.tasks_for_display()),
                Err(e) => eprintln!("Could not add task: {}", e),
            }
        }
        Command::Remove(id) => match session.remove_task(id).await {
            Ok(true) => render(&session.tasks_for_display()),
            Ok(false) => eprintln!("No task with id {}", id),
            Err(e) => eprintln!("Could not delete task: {}", e),
        },
        Command::List => render(&session.tasks_for_display()),
        Command::Json => {
            let json = serde_json::to_string_pretty(&session.tasks_for_display())?;
            println!("{}", json);
        }
        Command::Help => println!("{}", command::HELP),
        Command::Quit => return Ok(false),
    }

    Ok(true)
}

fn render(tasks: &[Task]) {
    println!("Today's tasks");
    if tasks.is_empty() {
        println!("  (nothing yet)");
    }
    for task in tasks {
        println!("  [{}] {}", task.id, task.text);
    }
}
