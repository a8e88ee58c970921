pub mod command;
pub mod config;
pub mod error;
pub mod interpreter;
pub mod model;
pub mod storage;

pub use interpreter::{Interpreter, LoadReport, Response};

#[cfg(test)]
mod tests {
    use crate::command::CommandRegistry;
    use crate::interpreter::Interpreter;
    use crate::storage::MemoryStore;

    fn run(interpreter: &mut Interpreter<MemoryStore>, line: &str) -> String {
        let tokens: Vec<String> = line.split_whitespace().map(str::to_string).collect();
        interpreter.handle(&tokens).message
    }

    #[test]
    fn session_walkthrough() {
        let (mut interpreter, _) =
            Interpreter::load(MemoryStore::new(), CommandRegistry::standard());

        run(&mut interpreter, "todo borrow book");
        run(&mut interpreter, "deadline submit report /by 02-12-2023 1800");
        run(&mut interpreter, "event book fair /at 10-12-2023 1000");
        run(&mut interpreter, "done 1");
        run(&mut interpreter, "delete 2");

        assert_eq!(
            run(&mut interpreter, "list"),
            "Here are the tasks in your list:\n\
             1.[T][X] borrow book\n\
             2.[E][ ] book fair (at: 10-12-2023 1000)"
        );
        assert_eq!(
            run(&mut interpreter, "find fair"),
            "Here are the matching tasks in your list:\n1.[E][ ] book fair (at: 10-12-2023 1000)"
        );
        assert_eq!(
            interpreter.store().content().as_deref(),
            Some("T|1|borrow book\nE|0|book fair|10-12-2023 1000")
        );
        assert_eq!(run(&mut interpreter, "bye"), "Bye. Hope to see you again soon!");
    }
}
