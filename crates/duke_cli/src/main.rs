use clap::Parser;
use duke_cli::cli::{Cli, SESSION_HELP, collect_overrides, tokenize};
use duke_core::command::{CommandRegistry, SESSION_WORDS};
use duke_core::config::{self, Config};
use duke_core::error::AppError;
use duke_core::storage::{FileStore, LoadStatus};
use duke_core::{Interpreter, LoadReport, Response};
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;

const LOG_ENV_VAR: &str = "DUKE_LOG";

fn init_logging() {
    if let Ok(filter) = std::env::var(LOG_ENV_VAR) {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::new(filter))
            .with_writer(io::stderr)
            .init();
    }
}

fn normalize_parse_error(err: clap::Error) -> AppError {
    let rendered = err.to_string();
    let first_line = rendered.lines().next().unwrap_or("invalid command").trim();
    let message = first_line
        .strip_prefix("error: ")
        .unwrap_or(first_line)
        .to_string();
    AppError::validation(message)
}

fn resolve_config(cli: &Cli) -> Result<Config, AppError> {
    let loaded = config::load_config_with_fallback();
    if let Some(err) = loaded.error {
        eprintln!("WARNING: {err}");
    }
    let overrides = collect_overrides(&cli.config_override).map_err(AppError::config)?;
    Ok(config::merge_overrides(&loaded.config, &overrides))
}

fn start(cli: &Cli) -> Result<(Interpreter<FileStore>, LoadReport), AppError> {
    let settings = resolve_config(cli)?;
    let path = config::resolve_store_path(cli.store.as_deref(), &settings)?;

    let mut registry = CommandRegistry::standard();
    for err in config::install_aliases(&settings, &mut registry) {
        eprintln!("WARNING: {err}");
    }

    let store = FileStore::new(path);
    Ok(Interpreter::load(store, registry))
}

fn print_load_report(report: &LoadReport, store: &FileStore) {
    if let Some(err) = report.error.as_ref() {
        eprintln!("WARNING: could not read saved tasks, starting empty and read-only: {err}");
    }
    if report.status == LoadStatus::FirstRun {
        eprintln!(
            "NOTE: no save file found, created {}",
            store.path().display()
        );
    }
    for err in &report.skipped {
        eprintln!("WARNING: {err}");
    }
}

fn print_response(response: &Response, json: bool) {
    if json {
        let payload = serde_json::json!({
            "ok": response.is_ok(),
            "code": response.error.as_ref().map(AppError::code),
            "message": response.message,
            "exit": response.exit,
            "save_error": response.save_error.as_ref().map(AppError::message),
        });
        println!("{payload}");
        return;
    }

    match response.error.as_ref() {
        Some(err) => eprintln!("ERROR: {err}"),
        None => println!("{}", response.message),
    }
    if let Some(err) = response.save_error.as_ref() {
        eprintln!("WARNING: change kept in memory but not saved: {err}");
    }
}

fn run_once(interpreter: &mut Interpreter<FileStore>, tokens: &[String], json: bool) -> bool {
    let response = interpreter.handle(tokens);
    print_response(&response, json);
    response.is_ok() && response.save_error.is_none()
}

fn run_interactive(interpreter: &mut Interpreter<FileStore>, json: bool) -> Result<(), AppError> {
    let mut input = String::new();
    let stdin = io::stdin();
    let mut stdin_lock = stdin.lock();

    if !json {
        println!("Hello! I'm Duke\nWhat can I do for you?");
    }

    loop {
        io::stdout()
            .flush()
            .map_err(|err| AppError::io(err.to_string()))?;
        input.clear();
        let bytes = stdin_lock
            .read_line(&mut input)
            .map_err(|err| AppError::io(err.to_string()))?;

        if bytes == 0 {
            break;
        }

        let line = input.trim();
        if line.is_empty() {
            continue;
        }

        if SESSION_WORDS.contains(&line) {
            println!("{SESSION_HELP}");
            for (alias, target) in interpreter.registry().aliases() {
                println!("  alias {alias} -> {target}");
            }
            continue;
        }

        let response = interpreter.handle(&tokenize(line));
        print_response(&response, json);
        if response.exit {
            break;
        }
    }

    Ok(())
}

fn main() {
    init_logging();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if !err.use_stderr() => err.exit(),
        Err(err) => {
            eprintln!("ERROR: {}", normalize_parse_error(err));
            std::process::exit(1);
        }
    };

    let (mut interpreter, report) = match start(&cli) {
        Ok(started) => started,
        Err(err) => {
            eprintln!("ERROR: {err}");
            std::process::exit(1);
        }
    };
    print_load_report(&report, interpreter.store());

    if !cli.command.is_empty() {
        if !run_once(&mut interpreter, &cli.command, cli.json) {
            std::process::exit(1);
        }
        return;
    }

    if let Err(err) = run_interactive(&mut interpreter, cli.json) {
        eprintln!("ERROR: {err}");
        std::process::exit(1);
    }
}
