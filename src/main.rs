use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{
    ArgAction, CommandFactory, Parser, Subcommand,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use movielog::{
    cli,
    config::{self, Backend},
    error,
    management::MovieStore,
    utils::{self, SortKey},
};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    /// Use the REST backend instead of the local CSV file
    #[clap(long, global = true)]
    remote: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// List, search and sort movies
    List(ListOptions),

    /// Add a movie dated today
    Add(AddOptions),

    /// Replace a movie's fields, keeping its date
    Update(UpdateOptions),

    /// Delete a movie
    Delete(TargetOptions),

    /// Import a CSV file into the REST backend
    Import(ImportOptions),

    /// Run the REST backend over the CSV file
    Serve,

    /// Get shell completions
    Completions(CompletionsOption),
}

#[derive(Parser, Debug, Clone)]
pub struct ListOptions {
    /// Movie name (exact on the CSV file, substring on the backend)
    #[clap(long)]
    pub name: Option<String>,

    /// Part of the director's name
    #[clap(long)]
    pub director: Option<String>,

    /// Earliest date added (YYYY-MM-DD)
    #[clap(long, value_parser = utils::parse_date)]
    pub from: Option<NaiveDate>,

    /// Latest date added (YYYY-MM-DD)
    #[clap(long, value_parser = utils::parse_date)]
    pub to: Option<NaiveDate>,

    /// Only favorites
    #[clap(long)]
    pub favorites: bool,

    /// Sort by name, year, director, date or favorite
    #[clap(long, value_parser = utils::parse_sort_key)]
    pub sort: Option<SortKey>,

    /// Reverse the sort order
    #[clap(long, requires = "sort")]
    pub desc: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct AddOptions {
    #[clap(long, value_parser = utils::validate_name)]
    pub name: String,

    #[clap(long, value_parser = parse_year)]
    pub year: i32,

    #[clap(long, default_value = "")]
    pub director: String,

    #[clap(long, default_value = "")]
    pub notes: String,

    #[clap(long)]
    pub favorite: bool,
}

#[derive(Parser, Debug, Clone)]
pub struct TargetOptions {
    /// Name of the movie to change
    #[clap(long)]
    pub name: String,

    #[clap(long)]
    pub year: i32,

    /// Date added (YYYY-MM-DD); needed when name and year are ambiguous
    #[clap(long, value_parser = utils::parse_date)]
    pub date: Option<NaiveDate>,
}

#[derive(Parser, Debug, Clone)]
pub struct UpdateOptions {
    #[clap(flatten)]
    pub target: TargetOptions,

    #[clap(long, value_parser = utils::validate_name)]
    pub new_name: Option<String>,

    #[clap(long, value_parser = parse_year)]
    pub new_year: Option<i32>,

    #[clap(long)]
    pub director: Option<String>,

    #[clap(long)]
    pub notes: Option<String>,

    #[clap(long, action = ArgAction::Set)]
    pub favorite: Option<bool>,
}

#[derive(Parser, Debug, Clone)]
pub struct ImportOptions {
    /// CSV file to import; defaults to the configured CSV path
    pub path: Option<PathBuf>,
}

#[derive(Parser, Debug, Clone)]
pub struct CompletionsOption {
    shell: Shell,
}

fn parse_year(s: &str) -> Result<i32, String> {
    let year = s
        .trim()
        .parse::<i32>()
        .map_err(|e| format!("invalid year '{}': {}", s, e))?;
    utils::validate_year(year)
}

#[tokio::main]
async fn main() {
    if let Err(e) = config::load_env().await {
        error!("Cannot load environment. Err: {}", e);
    }

    let cli = Cli::parse();

    let backend = if cli.remote {
        Backend::Remote
    } else {
        match config::backend() {
            Ok(backend) => backend,
            Err(e) => error!("{}", e),
        }
    };

    match cli.command {
        Command::Serve => cli::serve().await,
        Command::Import(opt) => cli::import(opt.path).await,
        Command::Completions(opt) => {
            let mut cmd = Cli::command();
            let name = cmd.get_name().to_string();
            generate(opt.shell, &mut cmd, name, &mut std::io::stdout())
        }
        command => match backend {
            Backend::Csv => run(cli::open_csv_store().await, command, false).await,
            Backend::Remote => run(cli::open_remote_store().await, command, true).await,
        },
    }
}

async fn run<S: MovieStore>(mut store: S, command: Command, reject_duplicates: bool) {
    match command {
        Command::List(opt) => cli::list(
            &store,
            &cli::ListArgs {
                name: opt.name,
                director: opt.director,
                from: opt.from,
                to: opt.to,
                favorites: opt.favorites,
                sort: opt.sort,
                descending: opt.desc,
            },
        ),
        Command::Add(opt) => {
            cli::add(
                &mut store,
                cli::AddArgs {
                    name: opt.name,
                    year: opt.year,
                    director: opt.director,
                    notes: opt.notes,
                    favorite: opt.favorite,
                },
                reject_duplicates,
            )
            .await
        }
        Command::Update(opt) => {
            cli::update(
                &mut store,
                &opt.target.name,
                opt.target.year,
                opt.target.date,
                cli::UpdateArgs {
                    new_name: opt.new_name,
                    new_year: opt.new_year,
                    director: opt.director,
                    notes: opt.notes,
                    favorite: opt.favorite,
                },
            )
            .await
        }
        Command::Delete(opt) => cli::delete(&mut store, &opt.name, opt.year, opt.date).await,
        Command::Serve | Command::Import(_) | Command::Completions(_) => {}
    }
}
