//! Task subcommands operating directly on the task file

use std::sync::Arc;

use super::Commands;
use crate::error::Result;
use crate::operations::tasks::{NewTask, TaskPatch, TaskService};
use crate::quote::NoopNotifier;
use crate::storage::config::Config;
use crate::storage::tasks::Task;
use crate::storage::JsonFileStore;

/// One line per task: `[x] #3 Report (due 2024-02-10) [Work]`
pub fn format_task(task: &Task) -> String {
    let mark = if task.completed { "x" } else { " " };
    format!(
        "[{}] #{} {} (due {}) [{}]",
        mark, task.id, task.description, task.due_date, task.tag
    )
}

/// Render the list command output
pub fn render_list(service: &TaskService, by_tag: bool) -> String {
    let mut out = String::new();
    if by_tag {
        for (tag, tasks) in service.list_grouped() {
            out.push_str(&format!("{}:\n", tag));
            for task in &tasks {
                out.push_str(&format!("  {}\n", format_task(task)));
            }
        }
    } else {
        for task in service.list() {
            out.push_str(&format_task(&task));
            out.push('\n');
        }
    }
    if out.is_empty() {
        out.push_str("No tasks.\n");
    }
    out
}

/// Run a task subcommand and return what should be printed
pub fn run(service: &TaskService, command: Commands) -> Result<String> {
    let output = match command {
        Commands::List { by_tag } => return Ok(render_list(service, by_tag)),
        Commands::Add {
            tag,
            description,
            due,
        } => {
            let task = service.create(NewTask {
                tag: Some(tag),
                description: Some(description),
                due_date: Some(due),
            })?;
            format!("Added {}", format_task(&task))
        }
        Commands::Update {
            id,
            tag,
            description,
            due,
            completed,
        } => {
            let patch = TaskPatch {
                tag,
                description,
                due_date: due,
                completed,
            };
            if patch.is_empty() {
                service.get(id)?;
                return Ok(format!("Nothing to update for task #{}\n", id));
            }
            format!("Updated {}", format_task(&service.update(id, patch)?))
        }
        Commands::Complete { id } => format!("Completed {}", format_task(&service.complete(id)?)),
        Commands::Toggle { id } => format!("Toggled {}", format_task(&service.toggle(id)?)),
        Commands::Delete { id } => format!("Deleted {}", format_task(&service.delete(id)?)),
        Commands::Serve { .. } => String::new(),
    };
    Ok(format!("{}\n", output))
}

/// Execute a task subcommand against the configured task file
pub fn execute(config: &Config, command: Commands) -> Result<()> {
    let store = Arc::new(JsonFileStore::new(&config.storage.path));
    let service = TaskService::new(store, Arc::new(NoopNotifier));
    print!("{}", run(&service, command)?);
    Ok(())
}
