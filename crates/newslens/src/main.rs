#![forbid(unsafe_code)]

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use clap::error::ErrorKind;
use newslens::cli::app::{Cli, Command, RuntimeArgs};
use newslens::cli::commands;
use newslens::cli::commands::report::ReportArgs;
use newslens::report::AnalyticsEngine;

const EXIT_SUCCESS: i32 = 0;
const EXIT_RUNTIME_FAILURE: i32 = 1;
const EXIT_USAGE_ERROR: i32 = 64;

fn main() {
    std::process::exit(run());
}

fn run() -> i32 {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) => return exit_code_for_parse_error(error),
    };
    let command_name = command_name(cli.command.as_ref());

    match execute(cli) {
        Ok(()) => EXIT_SUCCESS,
        Err(error) => {
            eprintln!("newslens: failed `{command_name}` (exit_code={EXIT_RUNTIME_FAILURE})");
            eprintln!("{error:#}");
            EXIT_RUNTIME_FAILURE
        }
    }
}

fn execute(cli: Cli) -> Result<()> {
    let database_path = resolve_database_path(&cli.runtime)?;
    let engine = AnalyticsEngine::new(database_path);

    match cli.command {
        None => commands::report::run(&ReportArgs::default(), &engine),
        Some(Command::Report(args)) => commands::report::run(&args, &engine),
        Some(Command::TopArticles(args)) => commands::top_articles::run(&args, &engine),
        Some(Command::Authors(args)) => commands::authors::run(&args, &engine),
        Some(Command::ErrorDays(args)) => commands::error_days::run(&args, &engine),
    }
}

fn exit_code_for_parse_error(error: clap::Error) -> i32 {
    match error.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = error.print();
            EXIT_SUCCESS
        }
        _ => {
            let _ = error.print();
            EXIT_USAGE_ERROR
        }
    }
}

fn command_name(command: Option<&Command>) -> &'static str {
    match command {
        None | Some(Command::Report(_)) => "report",
        Some(Command::TopArticles(_)) => "top-articles",
        Some(Command::Authors(_)) => "authors",
        Some(Command::ErrorDays(_)) => "error-days",
    }
}

fn resolve_database_path(args: &RuntimeArgs) -> Result<PathBuf> {
    let home_dir = std::env::var_os("HOME").map(PathBuf::from);
    let cwd = std::env::current_dir()?;
    newslens::config::resolve_database_path(home_dir.as_deref(), &cwd, args.database.as_deref())
}
