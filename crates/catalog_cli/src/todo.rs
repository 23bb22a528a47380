use crate::args::{get, positional_id, required};
use anyhow::Context as _;
use catalog_api::dto::{TodoRequest, TodoStatusRequest};
use catalog_api::{ApiResponse, CatalogApi};
use clap::{ArgMatches, Command};

pub fn args() -> Command {
    Command::new("todo")
        .about("Manage todos")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("create")
                .about("create a todo with a unique description")
                .arg(required("description", "todo description")),
        )
        .subcommand(
            Command::new("status")
                .about("mark a todo completed or not completed")
                .arg(positional_id("todo id"))
                .arg(required("completed", "true or false")),
        )
        .subcommand(
            Command::new("get")
                .about("show one todo")
                .arg(positional_id("todo id")),
        )
}

pub fn handlers(matches: &ArgMatches, api: &CatalogApi<'_>) -> anyhow::Result<ApiResponse> {
    match matches.subcommand() {
        Some(("create", create_match)) => Ok(api.create_todo(&TodoRequest {
            description: get(create_match, "description")?.to_string(),
        })),
        Some(("status", status_match)) => {
            let completed = get(status_match, "completed")?
                .parse::<bool>()
                .context("--completed must be true or false")?;
            Ok(api.update_todo_status(
                get(status_match, "id")?,
                TodoStatusRequest { completed },
            ))
        }
        Some(("get", get_match)) => Ok(api.get_todo(get(get_match, "id")?)),
        _ => anyhow::bail!("unknown todo command"),
    }
}
