use crate::error::AppError;
use crate::model::Task;

const INDEX_TOO_LARGE: &str = "Your task list is not that long yet!";

/// Ordered tasks addressed with 1-based indices.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskList {
    tasks: Vec<Task>,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, task: Task) {
        self.tasks.push(task);
    }

    pub fn get(&self, index: usize) -> Result<&Task, AppError> {
        let position = self.position(index)?;
        Ok(&self.tasks[position])
    }

    pub fn remove(&mut self, index: usize) -> Result<Task, AppError> {
        let position = self.position(index)?;
        Ok(self.tasks.remove(position))
    }

    pub fn mark_done(&mut self, index: usize) -> Result<&Task, AppError> {
        let position = self.position(index)?;
        let task = &mut self.tasks[position];
        task.mark_done();
        Ok(task)
    }

    pub fn search(&self, keyword: &str) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| task.description().contains(keyword))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Task> {
        self.tasks.iter()
    }

    fn position(&self, index: usize) -> Result<usize, AppError> {
        if index == 0 {
            return Err(AppError::index_out_of_range(
                "Please choose an integer greater than 0!",
            ));
        }
        if index > self.tasks.len() {
            return Err(AppError::index_out_of_range(INDEX_TOO_LARGE));
        }
        Ok(index - 1)
    }
}

impl From<Vec<Task>> for TaskList {
    fn from(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }
}

impl<'a> IntoIterator for &'a TaskList {
    type Item = &'a Task;
    type IntoIter = std::slice::Iter<'a, Task>;

    fn into_iter(self) -> Self::IntoIter {
        self.tasks.iter()
    }
}
