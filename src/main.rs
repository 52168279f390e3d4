use std::fmt;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser as CliParser;
use log::Level;

use pebble_lang::evaluator::{eval_program, Environment};
use pebble_lang::parser::Parser;
use pebble_lang::repl;

#[derive(CliParser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Source file to run. Omit to start an interactive REPL instead.
    #[arg(index = 1)]
    file: Option<PathBuf>,

    /// Increase log verbosity; repeat for more (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug)]
enum AppError {
    Io(PathBuf, std::io::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Io(path, err) => write!(f, "could not read '{}': {err}", path.display()),
        }
    }
}

impl std::error::Error for AppError {}

fn log_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::Warn,
        1 => Level::Info,
        2 => Level::Debug,
        _ => Level::Trace,
    }
}

fn run_file(path: &PathBuf) -> Result<ExitCode, AppError> {
    let source = std::fs::read_to_string(path).map_err(|err| AppError::Io(path.clone(), err))?;

    let mut parser = Parser::from_source(&source);
    let program = parser.parse_program();

    if !parser.errors().is_empty() {
        eprintln!("Error while parsing:");
        for error in parser.errors() {
            eprintln!("\t{error}");
        }
        return Ok(ExitCode::FAILURE);
    }

    let env = Environment::new();
    let result = eval_program(&program, &env);
    println!("{result}");

    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let args = Cli::parse();
    simple_logger::init_with_level(log_level(args.verbose)).unwrap();

    match &args.file {
        Some(path) => match run_file(path) {
            Ok(code) => code,
            Err(err) => {
                log::error!("{err}");
                ExitCode::FAILURE
            }
        },
        None => {
            let stdin = std::io::stdin();
            let stdout = std::io::stdout();
            repl::start(stdin.lock(), stdout.lock()).unwrap();
            ExitCode::SUCCESS
        }
    }
}
