use crate::error::AppError;
use crate::model::{Task, TaskList};

mod file_store;
mod memory_store;

pub use file_store::{FileStore, default_store_path, env_store_path};
pub use memory_store::MemoryStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStatus {
    Loaded,
    /// No save file existed; an empty one was created.
    FirstRun,
}

#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub tasks: TaskList,
    pub status: LoadStatus,
    pub skipped: Vec<AppError>,
}

pub trait TaskStore {
    fn load(&self) -> Result<LoadOutcome, AppError>;

    fn save(&self, tasks: &TaskList) -> Result<(), AppError>;
}

pub fn encode_tasks(tasks: &TaskList) -> Result<String, AppError> {
    let records = tasks
        .iter()
        .map(Task::to_record)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(records.join("\n"))
}

/// Blank lines are ignored; malformed ones are skipped and reported.
pub fn decode_tasks<'a, I>(lines: I, status: LoadStatus) -> LoadOutcome
where
    I: IntoIterator<Item = &'a str>,
{
    let mut tasks = TaskList::new();
    let mut skipped = Vec::new();

    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        match Task::from_record(line) {
            Ok(task) => tasks.add(task),
            Err(err) => {
                tracing::warn!(error = %err, "skipping unreadable save record");
                skipped.push(err);
            }
        }
    }

    LoadOutcome {
        tasks,
        status,
        skipped,
    }
}
