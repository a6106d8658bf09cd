#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::perf,
    clippy::style,
    clippy::missing_safety_doc,
    clippy::missing_const_for_fn
)]
#![allow(clippy::as_conversions, clippy::mod_module_files)]

use std::process;

mod display;
mod interact;

use shelf::{Book, Catalog, Client, Config, DEFAULT_MAX_RESULTS};

use clap::{AppSettings, Parser, Subcommand};
use eyre::Result;
use log::{error, trace, warn};

fn main() {
    if let Err(err) = try_main() {
        error!("{:#}", err);
        process::exit(2);
    }
}

fn try_main() -> Result<()> {
    let cli = Cli::parse();

    // if quiet then ignore verbosity but still show errors
    let verbosity = if cli.quiet {
        1
    } else {
        cli.verbosity as usize + 1
    };

    stderrlog::new().verbosity(verbosity).init()?;

    let config = Config::default()
        .with_catalog_url(cli.catalog_url)
        .with_max_results(cli.max_results)
        .with_open_library(cli.open_library)
        .with_nytimes_api_key(cli.nytimes_api_key);
    let catalog = Catalog::new(config);

    let output = cli.command.execute(&catalog, cli.json)?;
    if !cli.quiet && !output.is_empty() {
        println!("{output}");
    }

    Ok(())
}

#[derive(Parser)]
#[clap(name = "shelf")]
#[clap(about = "Search a public book catalog and look up ratings and reviews in the terminal")]
#[clap(version, author)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,

    /// Base url of the Google Books compatible catalog
    #[clap(long, default_value = "https://www.googleapis.com/books/v1")]
    catalog_url: String,

    /// Maximum number of search results
    #[clap(long, default_value_t = DEFAULT_MAX_RESULTS)]
    max_results: u32,

    /// Also consult Open Library for ratings
    #[clap(long)]
    open_library: bool,

    /// API key for New York Times book reviews
    #[clap(long, env = "SHELF_NYTIMES_API_KEY", hide_env_values = true)]
    nytimes_api_key: Option<String>,

    /// Print results as JSON
    #[clap(long)]
    json: bool,

    /// How chatty the program is when performing commands
    ///
    /// The number of times this flag is used will increase how chatty
    /// the program is.
    #[clap(short, long, parse(from_occurrences))]
    verbosity: u8,

    /// Prevents the program from writing to stdout, errors will still be printed to stderr.
    #[clap(short, long)]
    quiet: bool,
}

#[derive(Subcommand)]
#[non_exhaustive]
enum Commands {
    /// Search the catalog by free text
    #[clap(setting(AppSettings::ArgRequiredElseHelp))]
    Search {
        /// The text to search for
        query: String,

        /// Pick one of the results and show its details
        #[clap(short, long)]
        select: bool,
    },
    /// Show the details of a book by its catalog id
    #[clap(setting(AppSettings::ArgRequiredElseHelp))]
    Show {
        /// The catalog id of the book
        id: String,
    },
    /// Look up ratings for an ISBN
    #[clap(setting(AppSettings::ArgRequiredElseHelp))]
    Ratings {
        /// The ISBN to look up
        isbn: String,

        /// Show the rating of every source instead of the first found
        #[clap(short, long)]
        all: bool,
    },
    /// Look up New York Times reviews for an ISBN
    #[clap(setting(AppSettings::ArgRequiredElseHelp))]
    Reviews {
        /// The ISBN to look up
        isbn: String,
    },
}

impl Commands {
    fn execute<C: Client>(self, catalog: &Catalog<C>, json: bool) -> Result<String> {
        match self {
            Commands::Search { query, select } => {
                trace!("search subcommand called with the value of '{query}'");
                let books = catalog.search(&query)?;

                if select && !books.is_empty() {
                    let book = interact::user_select_book(books)?;
                    let details = catalog.lookup(&book.id)?;
                    return show_details(catalog, &details, json);
                }

                if json {
                    Ok(serde_json::to_string_pretty(&books)?)
                } else {
                    Ok(display::book_list(&books))
                }
            }
            Commands::Show { id } => {
                trace!("show subcommand called with the value of '{id}'");
                let book = catalog.lookup(&id)?;
                show_details(catalog, &book, json)
            }
            Commands::Ratings { isbn, all } => {
                trace!("ratings subcommand called with the value of '{isbn}'");
                let ratings = if all {
                    catalog.all_ratings(&isbn)
                } else {
                    catalog.ratings(&isbn).into_iter().collect()
                };

                if json {
                    Ok(serde_json::to_string_pretty(&ratings)?)
                } else if ratings.is_empty() {
                    Ok(display::NO_RATINGS.to_owned())
                } else {
                    Ok(ratings
                        .iter()
                        .map(display::rating)
                        .collect::<Vec<_>>()
                        .join("\n\n"))
                }
            }
            Commands::Reviews { isbn } => {
                trace!("reviews subcommand called with the value of '{isbn}'");
                if !catalog.has_reviews() {
                    warn!("New York Times api key not configured");
                }
                let reviews = catalog.reviews(&isbn);

                if json {
                    Ok(serde_json::to_string_pretty(&reviews)?)
                } else {
                    Ok(display::reviews(&reviews))
                }
            }
        }
    }
}

fn show_details<C: Client>(catalog: &Catalog<C>, book: &Book, json: bool) -> Result<String> {
    let rating = book.isbn.as_deref().and_then(|isbn| catalog.ratings(isbn));

    if json {
        let value = serde_json::json!({ "book": book, "rating": rating });
        Ok(serde_json::to_string_pretty(&value)?)
    } else {
        Ok(display::book_details(book, rating.as_ref()))
    }
}
