use crate::error::AppError;
use std::fmt;
use time::PrimitiveDateTime;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

/// Human-readable form of the only accepted date-time layout.
pub const DATE_TIME_PATTERN: &str = "dd-MM-yyyy HHmm";

const DATE_TIME_FORMAT: &[BorrowedFormatItem<'_>] =
    format_description!("[day]-[month]-[year] [hour][minute]");

const RECORD_SEPARATOR: char = '|';

pub fn parse_date_time(text: &str) -> Result<PrimitiveDateTime, AppError> {
    PrimitiveDateTime::parse(text, DATE_TIME_FORMAT)
        .map_err(|_| {
            AppError::date_format(format!(
                "Please use the following format instead: {DATE_TIME_PATTERN}"
            ))
        })
}

pub fn format_date_time(value: &PrimitiveDateTime) -> Result<String, AppError> {
    value
        .format(DATE_TIME_FORMAT)
        .map_err(|err| AppError::date_format(err.to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    ToDo,
    Deadline { by: PrimitiveDateTime },
    Event { at: PrimitiveDateTime },
}

impl TaskKind {
    /// Single-letter tag shared by the save record and the display marker.
    pub fn flag(&self) -> char {
        match self {
            Self::ToDo => 'T',
            Self::Deadline { .. } => 'D',
            Self::Event { .. } => 'E',
        }
    }

    pub fn time(&self) -> Option<&PrimitiveDateTime> {
        match self {
            Self::ToDo => None,
            Self::Deadline { by } => Some(by),
            Self::Event { at } => Some(at),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    description: String,
    done: bool,
    kind: TaskKind,
}

impl Task {
    pub fn todo(description: &str) -> Result<Self, AppError> {
        ensure_description(description, "todo")?;
        Ok(Self::new(description, TaskKind::ToDo))
    }

    /// The description is checked before the time is parsed.
    pub fn deadline(description: &str, by: &str) -> Result<Self, AppError> {
        ensure_description(description, "deadline")?;
        let by = parse_date_time(by)?;
        Ok(Self::new(description, TaskKind::Deadline { by }))
    }

    pub fn event(description: &str, at: &str) -> Result<Self, AppError> {
        ensure_description(description, "event")?;
        let at = parse_date_time(at)?;
        Ok(Self::new(description, TaskKind::Event { at }))
    }

    fn new(description: &str, kind: TaskKind) -> Self {
        Self {
            description: description.to_string(),
            done: false,
            kind,
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn kind(&self) -> &TaskKind {
        &self.kind
    }

    pub fn mark_done(&mut self) {
        self.done = true;
    }

    pub fn to_record(&self) -> Result<String, AppError> {
        let done = if self.done { '1' } else { '0' };
        let mut record = format!(
            "{flag}{sep}{done}{sep}{description}",
            flag = self.kind.flag(),
            sep = RECORD_SEPARATOR,
            description = self.description,
        );
        if let Some(time) = self.kind.time() {
            record.push(RECORD_SEPARATOR);
            record.push_str(&format_date_time(time)?);
        }
        Ok(record)
    }

    /// Descriptions may themselves contain the separator: the flags are the
    /// first two fields and, for timed tasks, the time is the last one.
    pub fn from_record(line: &str) -> Result<Self, AppError> {
        let mut fields = line.splitn(3, RECORD_SEPARATOR);
        let (Some(flag), Some(done), Some(rest)) = (fields.next(), fields.next(), fields.next())
        else {
            return Err(corrupt(line, "expected at least 3 fields"));
        };

        let done = match done {
            "0" => false,
            "1" => true,
            other => return Err(corrupt(line, &format!("invalid done flag '{other}'"))),
        };

        let (description, kind) = match flag {
            "T" => (rest, TaskKind::ToDo),
            "D" | "E" => {
                let (description, time) = rest
                    .rsplit_once(RECORD_SEPARATOR)
                    .ok_or_else(|| corrupt(line, "missing time field"))?;
                let time = parse_date_time(time)
                    .map_err(|_| corrupt(line, &format!("invalid time '{time}'")))?;
                let kind = if flag == "D" {
                    TaskKind::Deadline { by: time }
                } else {
                    TaskKind::Event { at: time }
                };
                (description, kind)
            }
            other => return Err(corrupt(line, &format!("unknown task type '{other}'"))),
        };

        if description.trim().is_empty() {
            return Err(corrupt(line, "empty description"));
        }

        Ok(Self {
            description: description.to_string(),
            done,
            kind,
        })
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.done { 'X' } else { ' ' };
        write!(f, "[{}][{}] {}", self.kind.flag(), status, self.description)?;
        match &self.kind {
            TaskKind::ToDo => Ok(()),
            TaskKind::Deadline { by } => {
                let by = format_date_time(by).map_err(|_| fmt::Error)?;
                write!(f, " (by: {by})")
            }
            TaskKind::Event { at } => {
                let at = format_date_time(at).map_err(|_| fmt::Error)?;
                write!(f, " (at: {at})")
            }
        }
    }
}

fn ensure_description(description: &str, label: &str) -> Result<(), AppError> {
    if description.trim().is_empty() {
        let article = if label.starts_with(['a', 'e', 'i', 'o', 'u']) {
            "an"
        } else {
            "a"
        };
        return Err(AppError::validation(format!(
            "The description of {article} {label} cannot be empty!"
        )));
    }
    Ok(())
}

fn corrupt(line: &str, reason: &str) -> AppError {
    AppError::corrupt_record(format!("skipping record '{line}': {reason}"))
}
