//! Shared argument helpers.

use anyhow::Context as _;
use clap::{Arg, ArgAction, ArgMatches};
use chrono::NaiveDate;

pub fn required(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .help(help)
        .required(true)
        .action(ArgAction::Set)
}

pub fn optional(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name).long(name).help(help).action(ArgAction::Set)
}

pub fn positional_id(help: &'static str) -> Arg {
    Arg::new("id").help(help).required(true).action(ArgAction::Set)
}

pub fn get<'a>(matches: &'a ArgMatches, name: &str) -> anyhow::Result<&'a str> {
    matches
        .get_one::<String>(name)
        .map(String::as_str)
        .with_context(|| format!("missing --{name}"))
}

pub fn get_opt<'a>(matches: &'a ArgMatches, name: &str) -> Option<&'a str> {
    matches.get_one::<String>(name).map(String::as_str)
}

pub fn date(raw: &str, name: &str) -> anyhow::Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .with_context(|| format!("--{name} must be a YYYY-MM-DD date, got `{raw}`"))
}

pub fn opt_date(matches: &ArgMatches, name: &str) -> anyhow::Result<Option<NaiveDate>> {
    get_opt(matches, name).map(|raw| date(raw, name)).transpose()
}
