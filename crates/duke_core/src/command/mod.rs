//! One command object per keyword, looked up by the first input token.

use crate::error::AppError;
use crate::model::{Task, TaskList};
use std::collections::{BTreeMap, HashMap};

mod add;
mod index;
mod view;

pub use add::{TimedCommand, TodoCommand};
pub use index::{DeleteCommand, DoneCommand};
pub use view::{FindCommand, ListCommand};

pub const UNKNOWN_COMMAND: &str = "I'm sorry, but I don't know what that means :-(";

/// Words an interactive session answers itself before dispatch.
pub const SESSION_WORDS: [&str; 2] = ["help", "?"];

/// What the interpreter must do after a command succeeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Mutated,
    Exit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub message: String,
    pub effect: Effect,
}

impl Outcome {
    pub fn read(message: String) -> Self {
        Self {
            message,
            effect: Effect::None,
        }
    }

    pub fn mutated(message: String) -> Self {
        Self {
            message,
            effect: Effect::Mutated,
        }
    }
}

pub trait Command {
    fn name(&self) -> &'static str;

    /// Validates `args` completely before touching `tasks`.
    fn apply(&self, tasks: &mut TaskList, args: &[String]) -> Result<Outcome, AppError>;
}

pub struct ByeCommand;

impl Command for ByeCommand {
    fn name(&self) -> &'static str {
        "bye"
    }

    fn apply(&self, _tasks: &mut TaskList, _args: &[String]) -> Result<Outcome, AppError> {
        Ok(Outcome {
            message: "Bye. Hope to see you again soon!".to_string(),
            effect: Effect::Exit,
        })
    }
}

#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<&'static str, Box<dyn Command>>,
    aliases: BTreeMap<String, &'static str>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn standard() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(ByeCommand));
        registry.register(Box::new(ListCommand));
        registry.register(Box::new(DoneCommand));
        registry.register(Box::new(DeleteCommand));
        registry.register(Box::new(FindCommand));
        registry.register(Box::new(TimedCommand::deadline()));
        registry.register(Box::new(TimedCommand::event()));
        registry.register(Box::new(TodoCommand));
        registry
    }

    pub fn register(&mut self, command: Box<dyn Command>) {
        self.commands.insert(command.name(), command);
    }

    /// Aliases may only point at a registered command and never shadow one.
    pub fn add_alias(&mut self, alias: &str, target: &str) -> Result<(), AppError> {
        let alias = alias.trim();
        if alias.is_empty() || alias.contains(char::is_whitespace) {
            return Err(AppError::config(format!("invalid alias name '{alias}'")));
        }
        if SESSION_WORDS.contains(&alias) {
            return Err(AppError::config(format!(
                "alias '{alias}' is reserved by the interactive session"
            )));
        }
        if self.commands.contains_key(alias) {
            return Err(AppError::config(format!(
                "alias '{alias}' would shadow a built-in command"
            )));
        }
        let (name, _) = self
            .commands
            .get_key_value(target.trim())
            .ok_or_else(|| {
                AppError::config(format!("alias '{alias}' points at unknown command '{target}'"))
            })?;
        self.aliases.insert(alias.to_string(), *name);
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Result<&dyn Command, AppError> {
        let resolved = self.aliases.get(name).copied().unwrap_or(name);
        self.commands
            .get(resolved)
            .map(|command| command.as_ref())
            .ok_or_else(|| AppError::unknown_command(UNKNOWN_COMMAND))
    }

    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.commands.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn aliases(&self) -> impl Iterator<Item = (&str, &'static str)> {
        self.aliases
            .iter()
            .map(|(alias, target)| (alias.as_str(), *target))
    }
}

fn join_tokens(tokens: &[String]) -> String {
    tokens.join(" ").trim().to_string()
}

fn count_line(count: usize) -> String {
    let noun = if count == 1 { "task" } else { "tasks" };
    format!("Now you have {count} {noun} in the list.")
}

fn numbered<'a, I>(header: &str, tasks: I) -> String
where
    I: IntoIterator<Item = &'a Task>,
{
    let mut message = header.to_string();
    for (position, task) in tasks.into_iter().enumerate() {
        message.push_str(&format!("\n{}.{}", position + 1, task));
    }
    message
}
