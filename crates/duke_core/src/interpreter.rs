use crate::command::{CommandRegistry, Effect, Outcome, UNKNOWN_COMMAND};
use crate::error::AppError;
use crate::model::TaskList;
use crate::storage::{LoadStatus, TaskStore};

/// What happened while restoring the task list at startup.
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub status: LoadStatus,
    pub loaded: usize,
    pub skipped: Vec<AppError>,
    /// Set when the save file could not be read at all; the list starts empty.
    pub error: Option<AppError>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Execution {
    pub outcome: Outcome,
    /// A failed save after a successful mutation; the in-memory list is kept.
    pub save_error: Option<AppError>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub message: String,
    pub exit: bool,
    pub error: Option<AppError>,
    pub save_error: Option<AppError>,
}

impl Response {
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

pub struct Interpreter<S: TaskStore> {
    tasks: TaskList,
    store: S,
    registry: CommandRegistry,
    /// Cleared when the saved list could not be read, so it is never overwritten.
    writable: bool,
}

impl<S: TaskStore> Interpreter<S> {
    pub fn new(tasks: TaskList, store: S, registry: CommandRegistry) -> Self {
        Self {
            tasks,
            store,
            registry,
            writable: true,
        }
    }

    /// Restores the list from `store`. A store that cannot be read yields an
    /// empty, read-only session and the error in the report rather than a
    /// failure. Changes made in that session are refused at save time.
    pub fn load(store: S, registry: CommandRegistry) -> (Self, LoadReport) {
        match store.load() {
            Ok(outcome) => {
                let report = LoadReport {
                    status: outcome.status,
                    loaded: outcome.tasks.len(),
                    skipped: outcome.skipped,
                    error: None,
                };
                (Self::new(outcome.tasks, store, registry), report)
            }
            Err(err) => {
                tracing::warn!(error = %err, "could not load tasks, starting empty");
                let report = LoadReport {
                    status: LoadStatus::Loaded,
                    loaded: 0,
                    skipped: Vec::new(),
                    error: Some(err),
                };
                let mut interpreter = Self::new(TaskList::new(), store, registry);
                interpreter.writable = false;
                (interpreter, report)
            }
        }
    }

    pub fn tasks(&self) -> &TaskList {
        &self.tasks
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn is_writable(&self) -> bool {
        self.writable
    }

    pub fn execute(&mut self, tokens: &[String]) -> Result<Execution, AppError> {
        let (name, args) = tokens
            .split_first()
            .ok_or_else(|| AppError::unknown_command(UNKNOWN_COMMAND))?;
        let command = self.registry.lookup(name)?;
        tracing::debug!(command = command.name(), args = args.len(), "dispatching");

        let outcome = command.apply(&mut self.tasks, args)?;
        let save_error = match outcome.effect {
            Effect::Mutated => self.persist().err(),
            Effect::None | Effect::Exit => None,
        };

        Ok(Execution {
            outcome,
            save_error,
        })
    }

    /// Runs one command and converts any failure into a user-facing response.
    pub fn handle(&mut self, tokens: &[String]) -> Response {
        match self.execute(tokens) {
            Ok(execution) => Response {
                message: execution.outcome.message,
                exit: execution.outcome.effect == Effect::Exit,
                error: None,
                save_error: execution.save_error,
            },
            Err(err) => {
                tracing::debug!(code = err.code(), "command rejected");
                Response {
                    message: err.message().to_string(),
                    exit: false,
                    error: Some(err),
                    save_error: None,
                }
            }
        }
    }

    fn persist(&self) -> Result<(), AppError> {
        if !self.writable {
            return Err(AppError::persistence(
                "saving is disabled because the save file could not be read",
            ));
        }
        self.store.save(&self.tasks).inspect_err(|err| {
            tracing::warn!(error = %err, "could not save tasks");
        })
    }
}
