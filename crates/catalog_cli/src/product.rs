use crate::args::{get, get_opt, optional, positional_id, required};
use anyhow::Context as _;
use catalog_api::{ApiResponse, CatalogApi};
use catalog_core::ProductInput;
use clap::{ArgMatches, Command};

fn product_fields(command: Command) -> Command {
    command
        .arg(required("name", "product name"))
        .arg(optional("description", "free-form description"))
        .arg(optional("price", "non-negative price"))
}

pub fn args() -> Command {
    Command::new("product")
        .about("Manage products")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(product_fields(
            Command::new("create").about("create a product with a fresh id"),
        ))
        .subcommand(product_fields(
            Command::new("replace")
                .about("store a product under an id, creating it when absent")
                .arg(positional_id("product id")),
        ))
        .subcommand(
            Command::new("get")
                .about("show one product")
                .arg(positional_id("product id")),
        )
        .subcommand(
            Command::new("delete")
                .about("delete a product")
                .arg(positional_id("product id")),
        )
        .subcommand(
            Command::new("search")
                .about("list products with an exact name")
                .arg(required("name", "product name")),
        )
}

pub fn handlers(matches: &ArgMatches, api: &CatalogApi<'_>) -> anyhow::Result<ApiResponse> {
    match matches.subcommand() {
        Some(("create", create_match)) => Ok(api.create_product(input(create_match)?)),
        Some(("replace", replace_match)) => Ok(api.replace_product(
            get(replace_match, "id")?,
            input(replace_match)?,
        )),
        Some(("get", get_match)) => Ok(api.get_product(get(get_match, "id")?)),
        Some(("delete", delete_match)) => Ok(api.delete_product(get(delete_match, "id")?)),
        Some(("search", search_match)) => Ok(api.search_products(get(search_match, "name")?)),
        _ => anyhow::bail!("unknown product command"),
    }
}

fn input(matches: &ArgMatches) -> anyhow::Result<ProductInput> {
    let price = get_opt(matches, "price")
        .map(|raw| {
            raw.parse::<f64>()
                .with_context(|| format!("--price must be a number, got `{raw}`"))
        })
        .transpose()?;

    Ok(ProductInput {
        name: get(matches, "name")?.to_string(),
        description: get_opt(matches, "description").map(str::to_string),
        price,
    })
}
