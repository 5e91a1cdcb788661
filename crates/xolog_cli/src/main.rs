//! xolog: Scan Xolog scripts and print their tokens.
//!
//! Usage:
//!   xolog [options] [script]
//!
//! With a script, the whole file is scanned and its tokens printed. Without
//! one, an interactive prompt scans each line as it is entered.

mod error;

use clap::Parser as ClapParser;
use error::{CliError, EX_DATAERR, EX_USAGE};
use miette::Diagnostic as _;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;
use xolog_diagnostics::{ConsoleReporter, ErrorReporter};
use xolog_scanner::Token;

#[derive(ClapParser, Debug)]
#[command(name = "xolog", about = "Xolog - scan scripts into tokens", version)]
struct Cli {
    /// Script to scan. Starts the interactive prompt when omitted.
    #[arg(value_name = "SCRIPT")]
    scripts: Vec<PathBuf>,

    /// Print tokens as JSON, one object per line.
    #[arg(long)]
    json: bool,

    /// Enable debug logging.
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Disable colored error output.
    #[arg(long = "no-color")]
    no_color: bool,
}

/// Environment variable holding a `tracing` filter directive.
const LOG_ENV: &str = "XOLOG_LOG";

/// Settings shared by the file runner and the prompt.
#[derive(Debug, Clone, Copy, Default)]
struct RunOptions {
    json: bool,
    use_color: bool,
}

impl RunOptions {
    fn from_cli(cli: &Cli) -> Self {
        Self {
            json: cli.json,
            use_color: !cli.no_color && atty_is_terminal(),
        }
    }
}

// ANSI color codes
const RED: &str = "\x1b[31m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.scripts.len() > 1 {
        println!("Usage: xolog [script]");
        process::exit(EX_USAGE);
    }

    let options = RunOptions::from_cli(&cli);
    let result = match cli.scripts.first() {
        Some(path) => run_file(path, options),
        None => {
            let stdin = io::stdin();
            let stdout = io::stdout();
            let stderr = io::stderr();
            run_prompt(stdin.lock(), &mut stdout.lock(), &mut stderr.lock(), options)
        }
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            print_error(&e, options.use_color);
            process::exit(e.exit_code());
        }
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "xolog_cli=debug,xolog_scanner=debug"
    } else {
        "xolog_cli=warn,xolog_scanner=warn"
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

/// Scan a whole script. Exits with `EX_DATAERR` when it had lexical errors.
fn run_file(path: &Path, options: RunOptions) -> Result<i32, CliError> {
    tracing::debug!(path = %path.display(), "running script");

    let source = std::fs::read_to_string(path).map_err(|source| CliError::ReadScript {
        path: path.display().to_string(),
        source,
    })?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut reporter = ConsoleReporter::stderr(options.use_color);
    let had_error = run(&source, &mut out, &mut reporter, options)?;
    if let Some(e) = reporter.take_write_error() {
        return Err(CliError::Output(e));
    }

    Ok(if had_error { EX_DATAERR } else { 0 })
}

/// Read lines from `input`, scanning each one on its own.
///
/// Errors on one line are reported and the session continues. End of input
/// ends the session successfully.
fn run_prompt<I, W, E>(
    input: I,
    out: &mut W,
    err: &mut E,
    options: RunOptions,
) -> Result<i32, CliError>
where
    I: BufRead,
    W: Write,
    E: Write,
{
    writeln!(out, "Xolog REPL").map_err(CliError::Output)?;
    writeln!(out, "------------------").map_err(CliError::Output)?;
    prompt(out)?;

    for line in input.lines() {
        let line = line.map_err(CliError::Stdin)?;
        let mut reporter = ConsoleReporter::new(&mut *err, options.use_color);
        let had_error = run(&line, out, &mut reporter, options)?;
        if let Some(e) = reporter.take_write_error() {
            return Err(CliError::Output(e));
        }
        tracing::debug!(had_error, "scanned prompt line");
        prompt(out)?;
    }

    writeln!(out).map_err(CliError::Output)?;
    Ok(0)
}

fn prompt<W: Write>(out: &mut W) -> Result<(), CliError> {
    write!(out, "> ").map_err(CliError::Output)?;
    out.flush().map_err(CliError::Output)
}

/// Scan `source`, print its tokens to `out` and report errors to `reporter`.
fn run<W: Write, R: ErrorReporter>(
    source: &str,
    out: &mut W,
    reporter: R,
    options: RunOptions,
) -> Result<bool, CliError> {
    let (tokens, had_error) = xolog_scanner::scan_with(source, reporter);
    print_tokens(&tokens, out, options)?;
    Ok(had_error)
}

fn print_tokens<W: Write>(
    tokens: &[Token],
    out: &mut W,
    options: RunOptions,
) -> Result<(), CliError> {
    for token in tokens {
        if options.json {
            serde_json::to_writer(&mut *out, token)?;
            writeln!(out).map_err(CliError::Output)?;
        } else {
            writeln!(out, "{}", token).map_err(CliError::Output)?;
        }
    }
    Ok(())
}

fn print_error(err: &CliError, use_color: bool) {
    let code = err.code().map(|c| c.to_string()).unwrap_or_default();
    if use_color {
        eprintln!("{}{}error[{}]{}: {}", BOLD, RED, code, RESET, err);
    } else {
        eprintln!("error[{}]: {}", code, err);
    }
}

fn atty_is_terminal() -> bool {
    // Simple check - on Unix, check if stderr is a terminal
    #[cfg(unix)]
    {
        unsafe { libc::isatty(2) != 0 }
    }
    #[cfg(not(unix))]
    {
        true // Assume terminal on other platforms
    }
}
