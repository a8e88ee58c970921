use crate::error::AppError;
use crate::model::TaskList;
use crate::storage::{LoadOutcome, LoadStatus, TaskStore, decode_tasks, encode_tasks};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

const STORE_FILE_NAME: &str = "duke.txt";
const STORE_ENV_VAR: &str = "DUKE_STORE_PATH";

pub fn env_store_path() -> Option<PathBuf> {
    std::env::var(STORE_ENV_VAR)
        .ok()
        .filter(|path| !path.trim().is_empty())
        .map(PathBuf::from)
}

pub fn default_store_path() -> Result<PathBuf, AppError> {
    if cfg!(windows) {
        let appdata =
            std::env::var("APPDATA").map_err(|_| AppError::config("APPDATA is not set"))?;
        Ok(PathBuf::from(appdata).join("duke").join(STORE_FILE_NAME))
    } else {
        let home = std::env::var("HOME").map_err(|_| AppError::config("HOME is not set"))?;
        Ok(PathBuf::from(home)
            .join(".config")
            .join("duke")
            .join(STORE_FILE_NAME))
    }
}

/// Flat-file store: one save record per line.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn create_empty(&self) -> Result<(), AppError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|err| io_error(parent, err))?;
        }
        std::fs::write(&self.path, "").map_err(|err| io_error(&self.path, err))?;
        restrict_permissions(&self.path)
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl TaskStore for FileStore {
    fn load(&self) -> Result<LoadOutcome, AppError> {
        if !self.path.exists() {
            tracing::info!(path = %self.path.display(), "no save file found, creating one");
            self.create_empty()?;
            return Ok(LoadOutcome {
                tasks: TaskList::new(),
                status: LoadStatus::FirstRun,
                skipped: Vec::new(),
            });
        }

        let bytes = std::fs::read(&self.path).map_err(|err| io_error(&self.path, err))?;
        let (lines, mut skipped) = split_lines(&bytes);
        let mut outcome = decode_tasks(lines, LoadStatus::Loaded);
        skipped.append(&mut outcome.skipped);
        outcome.skipped = skipped;
        tracing::info!(
            path = %self.path.display(),
            loaded = outcome.tasks.len(),
            skipped = outcome.skipped.len(),
            "loaded save file"
        );
        Ok(outcome)
    }

    fn save(&self, tasks: &TaskList) -> Result<(), AppError> {
        let content = encode_tasks(tasks)?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|err| io_error(parent, err))?;
        }

        // Write beside the target and rename so a reader never sees half a file.
        let temp = self.temp_path();
        std::fs::write(&temp, content).map_err(|err| io_error(&temp, err))?;
        restrict_permissions(&temp)?;
        if let Err(err) = std::fs::rename(&temp, &self.path) {
            std::fs::remove_file(&temp).ok();
            return Err(io_error(&self.path, err));
        }

        tracing::debug!(path = %self.path.display(), tasks = tasks.len(), "saved tasks");
        Ok(())
    }
}

/// A line that is not valid UTF-8 is reported like any other corrupt record.
fn split_lines(bytes: &[u8]) -> (Vec<&str>, Vec<AppError>) {
    let mut lines = Vec::new();
    let mut skipped = Vec::new();

    for (index, raw) in bytes.split(|byte| *byte == b'\n').enumerate() {
        let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
        match std::str::from_utf8(raw) {
            Ok(line) => lines.push(line),
            Err(err) => {
                let err = AppError::corrupt_record(format!(
                    "skipping line {}: not valid UTF-8 ({err})",
                    index + 1
                ));
                tracing::warn!(error = %err, "skipping unreadable save record");
                skipped.push(err);
            }
        }
    }

    (lines, skipped)
}

fn io_error(path: &Path, err: std::io::Error) -> AppError {
    AppError::persistence(format!("{}: {}", path.display(), err))
}

fn restrict_permissions(path: &Path) -> Result<(), AppError> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let permissions = std::fs::Permissions::from_mode(0o600);
        std::fs::set_permissions(path, permissions).map_err(|err| io_error(path, err))?;
    }
    #[cfg(not(unix))]
    let _ = path;

    Ok(())
}
