// dailydoku - solve today's 3x3 category grid from the command line

mod exit_codes;
mod fetch;

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Parser};

use dailydoku_config::{Settings, SettingsError};
use dailydoku_engine::{
    aggregate, aggregate_parallel, render, Catalog, CellResolver, DisplayCount, KindTable,
};

use exit_codes::{
    EXIT_CATALOG_MISSING, EXIT_CATALOG_PARSE, EXIT_CATALOG_READ, EXIT_ERROR, EXIT_SETTINGS,
    EXIT_SUCCESS, EXIT_USAGE,
};
use fetch::PuzzleClient;

const LOG_ENV: &str = "DAILYDOKU_LOG";

#[derive(Parser)]
#[command(name = "dailydoku")]
#[command(about = "Solve today's 3x3 category grid puzzle")]
#[command(long_version = long_version())]
#[command(version)]
#[command(after_help = "\
Examples:
  dailydoku --catalog pokedex.json
  dailydoku --catalog pokedex.json -n 5
  dailydoku --catalog pokedex.json --parallel -v
  DAILYDOKU_CATALOG=pokedex.json dailydoku --url http://localhost:8080/puzzle")]
struct Cli {
    /// Candidates to show per cell (1 prints the grid as a table)
    #[arg(short = 'n', long = "count", default_value_t = 1, allow_negative_numbers = true)]
    count: i64,

    /// Puzzle endpoint (default: settings, then the public daily puzzle)
    #[arg(long, env = "DAILYDOKU_PUZZLE_URL")]
    url: Option<String>,

    /// Entity catalog JSON file (default: settings [catalog] path)
    #[arg(long, env = "DAILYDOKU_CATALOG")]
    catalog: Option<PathBuf>,

    /// Resolve the nine cells concurrently
    #[arg(long)]
    parallel: bool,

    /// Settings file (default: <config dir>/dailydoku/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// More log output (-v info, -vv debug); DAILYDOKU_LOG overrides
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn long_version() -> &'static str {
    if cfg!(debug_assertions) {
        concat!(
            env!("CARGO_PKG_VERSION"),
            " (", env!("GIT_COMMIT_HASH"), ")",
            "\nengine:  dailydoku-engine ", env!("CARGO_PKG_VERSION"),
            "\nbuild:   debug",
            "\ntarget:  ", env!("TARGET"),
        )
    } else {
        concat!(
            env!("CARGO_PKG_VERSION"),
            " (", env!("GIT_COMMIT_HASH"), ")",
            "\nengine:  dailydoku-engine ", env!("CARGO_PKG_VERSION"),
            "\nbuild:   release",
            "\ntarget:  ", env!("TARGET"),
        )
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::new().filter_or(LOG_ENV, default))
        .format_timestamp(None)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cmd_solve(cli) {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn usage(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn settings(err: SettingsError) -> Self {
        Self {
            code: EXIT_SETTINGS,
            message: err.to_string(),
            hint: Some("fix the file or point --config at another one".to_string()),
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

fn cmd_solve(cli: Cli) -> Result<(), CliError> {
    // The count is checked before any other work.
    let count = DisplayCount::new(cli.count)
        .map_err(|e| CliError::usage(e.to_string()).with_hint("-n must be at least 1"))?;

    let mut settings = Settings::load(cli.config.as_deref()).map_err(CliError::settings)?;
    if let Some(url) = cli.url {
        settings.puzzle.url = url;
    }
    let parallel = cli.parallel || settings.solve.parallel;

    let kinds = settings
        .kinds
        .iter()
        .fold(KindTable::default(), |table, (raw, canonical)| table.with_alias(raw, canonical));

    let catalog_path = cli
        .catalog
        .or_else(|| settings.catalog.path.as_deref().map(expand_home))
        .ok_or_else(|| CliError {
            code: EXIT_CATALOG_MISSING,
            message: "no entity catalog configured".to_string(),
            hint: Some(
                "pass --catalog <file> or set [catalog] path in the settings file".to_string(),
            ),
        })?;
    let catalog = load_catalog(&catalog_path)?;

    let grid = PuzzleClient::new(&settings.puzzle)?.fetch_grid(&kinds)?;
    log::info!("solving puzzle {}", if grid.date().is_empty() { "(undated)" } else { grid.date() });

    let resolver = CellResolver::new(&catalog);
    let solution = if parallel {
        aggregate_parallel(&grid, |key, query| resolver.resolve(key, query))
    } else {
        aggregate(&grid, |key, query| resolver.resolve(key, query))
    };
    if solution.absent_count() > 0 {
        log::info!("{} of {} cells without candidates", solution.absent_count(), solution.len());
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    render(&mut out, &grid, &solution, count)
        .and_then(|()| out.flush())
        .map_err(|e| CliError {
            code: EXIT_ERROR,
            message: format!("failed to write output: {e}"),
            hint: None,
        })
}

/// `~/…` in settings paths refers to the home directory.
fn expand_home(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}

fn load_catalog(path: &Path) -> Result<Catalog, CliError> {
    let text = fs::read_to_string(path).map_err(|e| CliError {
        code: EXIT_CATALOG_READ,
        message: format!("cannot read catalog '{}': {e}", path.display()),
        hint: None,
    })?;
    let catalog = Catalog::from_json(&text).map_err(|e| CliError {
        code: EXIT_CATALOG_PARSE,
        message: format!("invalid catalog '{}': {e}", path.display()),
        hint: None,
    })?;
    log::info!("catalog '{}': {} entities", path.display(), catalog.len());
    Ok(catalog)
}
