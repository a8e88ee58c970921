use crate::command::{Command, Outcome, count_line, join_tokens};
use crate::error::AppError;
use crate::model::{Task, TaskList};

pub struct TodoCommand;

impl Command for TodoCommand {
    fn name(&self) -> &'static str {
        "todo"
    }

    fn apply(&self, tasks: &mut TaskList, args: &[String]) -> Result<Outcome, AppError> {
        let task = Task::todo(&join_tokens(args))?;
        let message = added_after_push(tasks, task);
        Ok(Outcome::mutated(message))
    }
}

/// `deadline <desc...> /by <time...>` and `event <desc...> /at <time...>`.
pub struct TimedCommand {
    keyword: &'static str,
    marker: &'static str,
    article: &'static str,
    build: fn(&str, &str) -> Result<Task, AppError>,
}

impl TimedCommand {
    pub fn deadline() -> Self {
        Self {
            keyword: "deadline",
            marker: "/by",
            article: "A",
            build: Task::deadline,
        }
    }

    pub fn event() -> Self {
        Self {
            keyword: "event",
            marker: "/at",
            article: "An",
            build: Task::event,
        }
    }

    fn split(&self, args: &[String]) -> Result<(String, String), AppError> {
        if args.is_empty() {
            return Err(AppError::validation(format!(
                "{} {} requires a description and a time!",
                self.article, self.keyword
            )));
        }

        let marker_at = args
            .iter()
            .position(|token| token == self.marker)
            .ok_or_else(|| {
                AppError::marker_missing(format!(
                    "{} requires the use of \"{}\"!",
                    self.keyword, self.marker
                ))
            })?;

        let description = join_tokens(&args[..marker_at]);
        if description.is_empty() {
            return Err(AppError::validation(format!(
                "The description of {} {} cannot be empty!",
                self.article.to_lowercase(),
                self.keyword
            )));
        }

        let time = join_tokens(&args[marker_at + 1..]);
        if time.is_empty() {
            return Err(AppError::validation(format!(
                "The time of {} {} cannot be empty!",
                self.article.to_lowercase(),
                self.keyword
            )));
        }

        Ok((description, time))
    }
}

impl Command for TimedCommand {
    fn name(&self) -> &'static str {
        self.keyword
    }

    fn apply(&self, tasks: &mut TaskList, args: &[String]) -> Result<Outcome, AppError> {
        let (description, time) = self.split(args)?;
        let task = (self.build)(&description, &time)?;
        let message = added_after_push(tasks, task);
        Ok(Outcome::mutated(message))
    }
}

fn added_after_push(tasks: &mut TaskList, task: Task) -> String {
    let rendered = task.to_string();
    tasks.add(task);
    format!(
        "Got it. I've added this task:\n  {rendered}\n{}",
        count_line(tasks.len())
    )
}
