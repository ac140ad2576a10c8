//! linesel - Entry Point

use clap::Parser;
use linesel::config::{self, CliOverrides, ResolvedConfig};
use linesel::model::{AppError, Selection};
use linesel::search::SubstringMatcher;
use linesel::source::{self, LoadOptions};
use linesel::state::{Controller, ControllerOptions};
use linesel::view::{self, ColorConfig, Palette, RunOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;

/// Interactive line selector: filter stdin lines as you type and print the chosen one
#[derive(Parser, Debug)]
#[command(name = "linesel")]
#[command(version)]
#[command(about = "Filter lines from stdin interactively and print the selected one")]
pub struct Args {
    /// Initial query (words are joined with single spaces)
    pub query: Vec<String>,

    /// Allow Tab to finish the selection
    #[arg(long)]
    pub tab: bool,

    /// Print the name of the finishing action before the result
    #[arg(long)]
    pub action: bool,

    /// Rendering backend
    #[arg(long, value_parser = ["fullscreen", "inline"])]
    pub backend: Option<String>,

    /// Count all matches for the status line
    #[arg(short, long)]
    pub extended_status: bool,

    /// Strip colour escape sequences from the input
    #[arg(long)]
    pub strip_ansi: bool,

    /// Input encoding (utf-8, us-ascii, latin-1)
    #[arg(long)]
    pub encoding: Option<String>,

    /// Disable colors
    #[arg(long)]
    pub no_color: bool,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Args {
    fn initial_query(&self) -> String {
        self.query.join(" ")
    }

    fn cli_overrides(&self) -> CliOverrides {
        CliOverrides {
            encoding: self.encoding.clone(),
            backend: self.backend.clone(),
            tab_exits: self.tab,
            extended_status: self.extended_status,
            strip_ansi: self.strip_ansi,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    match run(&args) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("linesel: {}", err);
            ExitCode::from(2)
        }
    }
}

fn run(args: &Args) -> Result<ExitCode, AppError> {
    // Defaults → Config File → Env Vars → CLI Args
    let config = resolve_config(args)?;

    // Logging is best effort; the selector still works without it.
    if let Err(err) = linesel::logging::init(&config.log_file_path) {
        eprintln!("linesel: {}", AppError::from(err));
    }

    info!(config = ?config, "Configuration loaded and resolved");

    let store = source::read_stdin_lines(LoadOptions {
        encoding: config.encoding,
        strip_ansi: config.strip_ansi,
    })?;
    info!(lines = store.count(), "Input loaded");

    let mut controller = Controller::new(
        store,
        SubstringMatcher,
        args.initial_query(),
        ControllerOptions {
            tab_exits: config.tab_exits,
            extended_status: config.extended_status,
        },
    );

    let run_options = RunOptions {
        backend: config.backend,
        inline_height: config.inline_height,
        palette: Palette::for_color_config(
            config.theme.palette(),
            ColorConfig::from_env_and_args(args.no_color),
        ),
    };
    let selection = view::run_interactive(&mut controller, &run_options)?;

    write_selection(&mut io::stdout().lock(), &selection, args.action)
        .map_err(AppError::Output)?;

    Ok(if selection.is_abort() {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    })
}

fn resolve_config(args: &Args) -> Result<ResolvedConfig, AppError> {
    let config_file = config::load_config_with_precedence(args.config.clone())?;
    let merged = config::merge_config(config_file)?;
    let with_env = config::apply_env_overrides(merged)?;
    Ok(config::apply_cli_overrides(with_env, &args.cli_overrides())?)
}

/// Print the action name (in action mode) and, unless aborted, the text.
fn write_selection<W: Write>(
    out: &mut W,
    selection: &Selection,
    with_action: bool,
) -> io::Result<()> {
    if with_action {
        writeln!(out, "{}", selection.action.name)?;
    }
    if !selection.is_abort() {
        writeln!(out, "{}", selection.text)?;
    }
    out.flush()
}
