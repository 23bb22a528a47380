use crate::args::{date, get, get_opt, optional, positional_id, required};
use catalog_api::dto::AuthorRequest;
use catalog_api::{ApiResponse, CatalogApi};
use clap::{ArgMatches, Command};

fn author_fields(command: Command) -> Command {
    command
        .arg(required("name", "author name"))
        .arg(required("birth-date", "birth date, YYYY-MM-DD"))
        .arg(required("nationality", "author nationality"))
}

pub fn args() -> Command {
    Command::new("author")
        .about("Manage authors")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(author_fields(
            Command::new("create").about("register an author"),
        ))
        .subcommand(author_fields(
            Command::new("update")
                .about("replace an author's fields")
                .arg(positional_id("author id")),
        ))
        .subcommand(
            Command::new("get")
                .about("show one author")
                .arg(positional_id("author id")),
        )
        .subcommand(
            Command::new("search")
                .about("list authors by name and/or nationality")
                .arg(optional("name", "exact name"))
                .arg(optional("nationality", "exact nationality")),
        )
        .subcommand(
            Command::new("delete")
                .about("delete an author without books")
                .arg(positional_id("author id")),
        )
}

pub fn handlers(matches: &ArgMatches, api: &CatalogApi<'_>) -> anyhow::Result<ApiResponse> {
    match matches.subcommand() {
        Some(("create", create_match)) => Ok(api.create_author(&request(create_match)?)),
        Some(("update", update_match)) => Ok(api.update_author(
            get(update_match, "id")?,
            &request(update_match)?,
        )),
        Some(("get", get_match)) => Ok(api.get_author(get(get_match, "id")?)),
        Some(("search", search_match)) => Ok(api.search_authors(
            get_opt(search_match, "name"),
            get_opt(search_match, "nationality"),
        )),
        Some(("delete", delete_match)) => Ok(api.delete_author(get(delete_match, "id")?)),
        _ => anyhow::bail!("unknown author command"),
    }
}

fn request(matches: &ArgMatches) -> anyhow::Result<AuthorRequest> {
    Ok(AuthorRequest {
        name: get(matches, "name")?.to_string(),
        birth_date: date(get(matches, "birth-date")?, "birth-date")?,
        nationality: get(matches, "nationality")?.to_string(),
        user_id: None,
    })
}
