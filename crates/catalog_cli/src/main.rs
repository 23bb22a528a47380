//! Command-line front end for the catalog.
//!
//! # Responsibility
//! - Resolve configuration, start logging and open the store.
//! - Dispatch one subcommand to the request handlers.
//! - Print the response envelope as JSON and exit non-zero on failure.

use catalog_api::{ApiResponse, CatalogApi};
use catalog_core::{flush_logging, CatalogConfig};
use clap::{ArgMatches, Command};
use log::info;
use std::process::ExitCode;

mod args;
mod author;
mod book;
mod product;
mod todo;

fn cli() -> Command {
    Command::new("catalog")
        .about("todos, authors, books and products over one SQLite store")
        .version(catalog_core::core_version())
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(todo::args())
        .subcommand(author::args())
        .subcommand(book::args())
        .subcommand(product::args())
}

fn main() -> anyhow::Result<ExitCode> {
    let result = run();
    flush_logging();
    result
}

fn run() -> anyhow::Result<ExitCode> {
    let matches = cli().get_matches();

    let config = CatalogConfig::from_env()?;
    config.init_logging()?;
    let conn = config.open_db()?;
    let api = CatalogApi::new(&conn);

    let response = dispatch(&matches, &api)?;
    info!(
        "event=cli_command module=cli status={} command={} http_status={}",
        if response.is_success() { "ok" } else { "error" },
        matches.subcommand_name().unwrap_or("none"),
        response.status
    );
    println!("{}", serde_json::to_string_pretty(&response)?);

    if response.status >= 400 {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn dispatch(matches: &ArgMatches, api: &CatalogApi<'_>) -> anyhow::Result<ApiResponse> {
    match matches.subcommand() {
        Some(("todo", submatches)) => todo::handlers(submatches, api),
        Some(("author", submatches)) => author::handlers(submatches, api),
        Some(("book", submatches)) => book::handlers(submatches, api),
        Some(("product", submatches)) => product::handlers(submatches, api),
        Some((other, _)) => anyhow::bail!("unknown command `{other}`"),
        None => anyhow::bail!("missing command"),
    }
}
