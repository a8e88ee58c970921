use crate::error::AppError;
use crate::model::TaskList;
use crate::storage::{LoadOutcome, LoadStatus, TaskStore, decode_tasks, encode_tasks};
use std::cell::{Cell, RefCell};

/// Store that keeps the encoded save file in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    content: RefCell<Option<String>>,
    saves: Cell<usize>,
    fail_saves: Cell<bool>,
    fail_loads: Cell<bool>,
}

impl MemoryStore {
    /// An empty store; the first load reports a first run.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content<C: Into<String>>(content: C) -> Self {
        Self {
            content: RefCell::new(Some(content.into())),
            ..Self::default()
        }
    }

    pub fn content(&self) -> Option<String> {
        self.content.borrow().clone()
    }

    pub fn save_count(&self) -> usize {
        self.saves.get()
    }

    pub fn set_fail_saves(&self, fail: bool) {
        self.fail_saves.set(fail);
    }

    pub fn set_fail_loads(&self, fail: bool) {
        self.fail_loads.set(fail);
    }
}

impl TaskStore for MemoryStore {
    fn load(&self) -> Result<LoadOutcome, AppError> {
        if self.fail_loads.get() {
            return Err(AppError::persistence("memory store is unreadable"));
        }
        if let Some(text) = self.content.borrow().as_deref() {
            return Ok(decode_tasks(text.lines(), LoadStatus::Loaded));
        }

        *self.content.borrow_mut() = Some(String::new());
        Ok(LoadOutcome {
            tasks: TaskList::new(),
            status: LoadStatus::FirstRun,
            skipped: Vec::new(),
        })
    }

    fn save(&self, tasks: &TaskList) -> Result<(), AppError> {
        if self.fail_saves.get() {
            return Err(AppError::persistence("memory store is read-only"));
        }
        let encoded = encode_tasks(tasks)?;
        *self.content.borrow_mut() = Some(encoded);
        self.saves.set(self.saves.get() + 1);
        Ok(())
    }
}
