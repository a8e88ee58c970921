mod task;
mod task_list;

pub use task::{DATE_TIME_PATTERN, Task, TaskKind, format_date_time, parse_date_time};
pub use task_list::TaskList;
