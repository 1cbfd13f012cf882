#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod db;
pub mod models;
pub mod report;
pub mod utils;

pub use cli::app::{Cli, Command};
pub use report::AnalyticsEngine;
