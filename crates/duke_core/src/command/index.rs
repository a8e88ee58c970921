use crate::command::{Command, Outcome, count_line};
use crate::error::AppError;
use crate::model::TaskList;

/// Missing → not an integer → not positive. The upper bound is left to
/// the task list, which owns the size.
fn parse_index(args: &[String], missing: &str) -> Result<usize, AppError> {
    let raw = args.first().ok_or_else(|| AppError::validation(missing))?;
    let index: i64 = raw
        .parse()
        .map_err(|_| AppError::not_an_integer("Please choose an integer value!"))?;
    if index <= 0 {
        return Err(AppError::index_out_of_range(
            "Please choose an integer greater than 0!",
        ));
    }
    usize::try_from(index)
        .map_err(|_| AppError::index_out_of_range("Your task list is not that long yet!"))
}

pub struct DoneCommand;

impl Command for DoneCommand {
    fn name(&self) -> &'static str {
        "done"
    }

    fn apply(&self, tasks: &mut TaskList, args: &[String]) -> Result<Outcome, AppError> {
        let index = parse_index(args, "Please select a task to mark as completed!")?;
        let task = tasks.mark_done(index)?;
        Ok(Outcome::mutated(format!(
            "Nice! I've marked this task as done:\n  {task}"
        )))
    }
}

pub struct DeleteCommand;

impl Command for DeleteCommand {
    fn name(&self) -> &'static str {
        "delete"
    }

    fn apply(&self, tasks: &mut TaskList, args: &[String]) -> Result<Outcome, AppError> {
        let index = parse_index(args, "Please select a task to delete!")?;
        let removed = tasks.remove(index)?;
        Ok(Outcome::mutated(format!(
            "Noted. I've removed this task:\n  {removed}\n{}",
            count_line(tasks.len())
        )))
    }
}
