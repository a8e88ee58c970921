use crate::command::{Command, Outcome, numbered};
use crate::error::AppError;
use crate::model::TaskList;

pub struct ListCommand;

impl Command for ListCommand {
    fn name(&self) -> &'static str {
        "list"
    }

    fn apply(&self, tasks: &mut TaskList, _args: &[String]) -> Result<Outcome, AppError> {
        if tasks.is_empty() {
            return Ok(Outcome::read("Your task list is empty!".to_string()));
        }
        Ok(Outcome::read(numbered(
            "Here are the tasks in your list:",
            tasks.iter(),
        )))
    }
}

pub struct FindCommand;

impl Command for FindCommand {
    fn name(&self) -> &'static str {
        "find"
    }

    fn apply(&self, tasks: &mut TaskList, args: &[String]) -> Result<Outcome, AppError> {
        let keyword = match args {
            [] => {
                return Err(AppError::validation(
                    "Please use a keyword you'd like to search with!",
                ));
            }
            [keyword] => keyword,
            _ => return Err(AppError::validation("Please use only one keyword!")),
        };

        let matches = tasks.search(keyword);
        if matches.is_empty() {
            return Ok(Outcome::read("No matching tasks found!".to_string()));
        }
        Ok(Outcome::read(numbered(
            "Here are the matching tasks in your list:",
            matches,
        )))
    }
}
