use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AppError {
    #[error("validation_error - {0}")]
    Validation(String),
    #[error("index_out_of_range - {0}")]
    IndexOutOfRange(String),
    #[error("not_an_integer - {0}")]
    NotAnInteger(String),
    #[error("marker_missing - {0}")]
    MarkerMissing(String),
    #[error("date_format - {0}")]
    DateFormat(String),
    #[error("unknown_command - {0}")]
    UnknownCommand(String),
    #[error("corrupt_record - {0}")]
    CorruptRecord(String),
    #[error("persistence_error - {0}")]
    Persistence(String),
    #[error("config_error - {0}")]
    Config(String),
    #[error("io_error - {0}")]
    Io(String),
}

impl AppError {
    pub fn validation<M: Into<String>>(message: M) -> Self {
        Self::Validation(message.into())
    }

    pub fn index_out_of_range<M: Into<String>>(message: M) -> Self {
        Self::IndexOutOfRange(message.into())
    }

    pub fn not_an_integer<M: Into<String>>(message: M) -> Self {
        Self::NotAnInteger(message.into())
    }

    pub fn marker_missing<M: Into<String>>(message: M) -> Self {
        Self::MarkerMissing(message.into())
    }

    pub fn date_format<M: Into<String>>(message: M) -> Self {
        Self::DateFormat(message.into())
    }

    pub fn unknown_command<M: Into<String>>(message: M) -> Self {
        Self::UnknownCommand(message.into())
    }

    pub fn corrupt_record<M: Into<String>>(message: M) -> Self {
        Self::CorruptRecord(message.into())
    }

    pub fn persistence<M: Into<String>>(message: M) -> Self {
        Self::Persistence(message.into())
    }

    pub fn config<M: Into<String>>(message: M) -> Self {
        Self::Config(message.into())
    }

    pub fn io<M: Into<String>>(message: M) -> Self {
        Self::Io(message.into())
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_error",
            Self::IndexOutOfRange(_) => "index_out_of_range",
            Self::NotAnInteger(_) => "not_an_integer",
            Self::MarkerMissing(_) => "marker_missing",
            Self::DateFormat(_) => "date_format",
            Self::UnknownCommand(_) => "unknown_command",
            Self::CorruptRecord(_) => "corrupt_record",
            Self::Persistence(_) => "persistence_error",
            Self::Config(_) => "config_error",
            Self::Io(_) => "io_error",
        }
    }

    /// The text shown to the user, without the code prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::Validation(message)
            | Self::IndexOutOfRange(message)
            | Self::NotAnInteger(message)
            | Self::MarkerMissing(message)
            | Self::DateFormat(message)
            | Self::UnknownCommand(message)
            | Self::CorruptRecord(message)
            | Self::Persistence(message)
            | Self::Config(message)
            | Self::Io(message) => message,
        }
    }
}
