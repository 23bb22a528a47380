use crate::args::{date, get, get_opt, opt_date, optional, positional_id, required};
use anyhow::Context as _;
use catalog_api::dto::{BookRequest, BookSearchRequest};
use catalog_api::{ApiResponse, CatalogApi};
use catalog_core::{AuthorId, Genre, Price};
use clap::{ArgMatches, Command};

fn book_fields(command: Command) -> Command {
    command
        .arg(required("isbn", "ISBN, digits and hyphens"))
        .arg(required("title", "book title"))
        .arg(required("genre", "fiction|fantasy|mystery|romance|biography|science"))
        .arg(optional("published", "publication date, YYYY-MM-DD"))
        .arg(optional("price", "price with up to two decimals"))
        .arg(optional("author", "author id"))
}

pub fn args() -> Command {
    Command::new("book")
        .about("Manage books")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(book_fields(Command::new("create").about("register a book")))
        .subcommand(book_fields(
            Command::new("update")
                .about("replace a book's fields")
                .arg(positional_id("book id")),
        ))
        .subcommand(
            Command::new("get")
                .about("show one book")
                .arg(positional_id("book id")),
        )
        .subcommand(
            Command::new("delete")
                .about("delete one book")
                .arg(positional_id("book id")),
        )
        .subcommand(
            Command::new("search")
                .about("search books; supported: title+price, title+isbn, title, isbn, date range, nothing")
                .arg(optional("title", "exact title"))
                .arg(optional("isbn", "exact isbn"))
                .arg(optional("price", "exact price"))
                .arg(optional("from", "publication range start, YYYY-MM-DD"))
                .arg(optional("to", "publication range end, YYYY-MM-DD")),
        )
        .subcommand(
            Command::new("by-genre")
                .about("list books of a genre")
                .arg(required("genre", "genre to list"))
                .arg(optional("order", "title|publication_date|price|isbn")),
        )
        .subcommand(
            Command::new("by-author")
                .about("list books of an author")
                .arg(positional_id("author id")),
        )
        .subcommand(Command::new("titles").about("list distinct titles"))
        .subcommand(Command::new("authors").about("list authors that have books"))
        .subcommand(
            Command::new("genres")
                .about("list genres written by authors of a nationality")
                .arg(required("nationality", "author nationality")),
        )
        .subcommand(
            Command::new("delete-genre")
                .about("delete every book of a genre")
                .arg(required("genre", "genre to delete")),
        )
        .subcommand(
            Command::new("set-published")
                .about("set the publication date of every book")
                .arg(required("date", "publication date, YYYY-MM-DD")),
        )
}

pub fn handlers(matches: &ArgMatches, api: &CatalogApi<'_>) -> anyhow::Result<ApiResponse> {
    match matches.subcommand() {
        Some(("create", create_match)) => Ok(api.create_book(&request(create_match)?)),
        Some(("update", update_match)) => {
            Ok(api.update_book(get(update_match, "id")?, &request(update_match)?))
        }
        Some(("get", get_match)) => Ok(api.get_book(get(get_match, "id")?)),
        Some(("delete", delete_match)) => Ok(api.delete_book(get(delete_match, "id")?)),
        Some(("search", search_match)) => Ok(api.search_books(&BookSearchRequest {
            title: get_opt(search_match, "title").map(str::to_string),
            isbn: get_opt(search_match, "isbn").map(str::to_string),
            price: price(search_match)?,
            published_from: opt_date(search_match, "from")?,
            published_to: opt_date(search_match, "to")?,
        })),
        Some(("by-genre", genre_match)) => Ok(api.books_by_genre(
            get(genre_match, "genre")?,
            get_opt(genre_match, "order"),
        )),
        Some(("by-author", author_match)) => Ok(api.books_by_author(get(author_match, "id")?)),
        Some(("titles", _)) => Ok(api.distinct_book_titles()),
        Some(("authors", _)) => Ok(api.authors_with_books()),
        Some(("genres", genres_match)) => {
            Ok(api.genres_by_author_nationality(get(genres_match, "nationality")?))
        }
        Some(("delete-genre", genre_match)) => {
            Ok(api.delete_books_by_genre(get(genre_match, "genre")?))
        }
        Some(("set-published", date_match)) => {
            Ok(api.set_publication_dates(date(get(date_match, "date")?, "date")?))
        }
        _ => anyhow::bail!("unknown book command"),
    }
}

fn request(matches: &ArgMatches) -> anyhow::Result<BookRequest> {
    let genre: Genre = get(matches, "genre")?.parse()?;
    let author_id = get_opt(matches, "author")
        .map(|raw| {
            raw.parse::<AuthorId>()
                .with_context(|| format!("invalid author id `{raw}`"))
        })
        .transpose()?;

    Ok(BookRequest {
        isbn: get(matches, "isbn")?.to_string(),
        title: get(matches, "title")?.to_string(),
        publication_date: opt_date(matches, "published")?,
        genre,
        price: price(matches)?,
        author_id,
    })
}

fn price(matches: &ArgMatches) -> anyhow::Result<Option<Price>> {
    Ok(get_opt(matches, "price").map(str::parse::<Price>).transpose()?)
}
