use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use super::commands::{
    authors::AuthorsArgs, error_days::ErrorDaysArgs, report::ReportArgs,
    top_articles::TopArticlesArgs,
};

#[derive(Debug, Parser)]
#[command(
    name = "newslens",
    version,
    about = "News-site traffic analytics over a request-log database"
)]
pub struct Cli {
    #[command(flatten)]
    pub runtime: RuntimeArgs,

    /// Without a subcommand, runs the full three-section report.
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, Args)]
pub struct RuntimeArgs {
    /// SQLite database holding the articles, authors, and log relations.
    #[arg(long, global = true, value_name = "PATH")]
    pub database: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    Report(ReportArgs),
    TopArticles(TopArticlesArgs),
    Authors(AuthorsArgs),
    ErrorDays(ErrorDaysArgs),
}
