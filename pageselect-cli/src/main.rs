mod paths;

use std::fs;
use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use clap::Subcommand;
use pageselect_lib::ListingView;
use pageselect_lib::SelectionConfig;
use pageselect_lib::SelectionStore;
use pageselect_lib::client::ListingClient;
use pageselect_lib::error::FetchError;
use pageselect_lib::error::RangeError;
use pageselect_lib::error::StorageError;
use pageselect_lib::model::RecordId;
use pageselect_lib::storage::SqliteStorage;
use simplelog::{Config, LevelFilter, WriteLogger};
use thiserror::Error;

const DEFAULT_URL: &str = "https://api.artic.edu/api/v1/artworks?page=";

#[derive(Parser)]
#[command(name = "pageselect", about = "Select records across pages of a remote listing")]
struct Cli {
    /// Listing URL the page number is appended to.
    #[arg(long, env = "PAGESELECT_URL", default_value = DEFAULT_URL)]
    url: String,

    /// Selection database (defaults to the platform data directory).
    #[arg(long, env = "PAGESELECT_DB")]
    db: Option<PathBuf>,

    /// Log at debug level.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show a page with selection markers.
    Show { page: u32 },
    /// Flip the selection of one record.
    Toggle { id: RecordId },
    /// Select (or with --clear, deselect) every record on a page.
    SelectPage {
        page: u32,
        #[arg(long)]
        clear: bool,
    },
    /// Select the first N records, counting from the first record of PAGE.
    SelectFirst { page: u32, n: u32 },
    /// List selected record ids.
    Selected,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("could not determine a data directory; pass --db")]
    NoDataDir,
    #[error("failed to create {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Range(#[from] RangeError),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let Some(path) = paths::prepare_log_file() else { return };
    if let Ok(file) = File::create(&path) {
        let _ = WriteLogger::init(level, Config::default(), file);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = SelectionConfig::default();

    let db = match cli.db {
        Some(db) => db,
        None => paths::selection_db().ok_or(CliError::NoDataDir)?,
    };
    if let Some(dir) = db.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir).map_err(|source| CliError::CreateDir {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let storage = Arc::new(SqliteStorage::open(&db).await?);
    let store = Arc::new(SelectionStore::open(storage, config.storage_key.clone()).await);
    let client = ListingClient::builder()
        .url(cli.url)
        .timeout(Duration::from_secs(20))
        .build()?;
    let mut view = ListingView::new(store.clone(), config);

    match cli.command {
        Command::Show { page } => {
            view.load_page(page, &client).await?;
            print_page(&view);
        }
        Command::Toggle { id } => {
            let selected = !store.is_selected(id);
            view.toggle_row(id, selected).await;
            println!("{} {}", if selected { "selected" } else { "deselected" }, id);
        }
        Command::SelectPage { page, clear } => {
            view.load_page(page, &client).await?;
            view.toggle_select_all(!clear).await;
            print_page(&view);
        }
        Command::SelectFirst { page, n } => {
            view.load_page(page, &client).await?;

            let token = view.selector().cancellation_token().clone();
            let watcher = tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    token.cancel();
                }
            });
            let result = view.select_first(n, &client).await;
            watcher.abort();

            let outcome = result?;
            println!(
                "selected {} records ({} extra pages fetched)",
                outcome.selected.len(),
                outcome.pages_fetched
            );
            if outcome.exhausted {
                println!("the listing ended before {} records were found", n);
            }
        }
        Command::Selected => {
            let selection = store.selection();
            for id in selection.iter() {
                println!("{}", id);
            }
            println!("{} selected", selection.len());
        }
    }

    Ok(())
}

fn print_page(view: &ListingView) {
    for (record, selected) in view.rows() {
        println!(
            "[{}] {:>8}  {:<40}  {}",
            if selected { "x" } else { " " },
            record.id,
            truncate(record.title.as_deref().unwrap_or("-"), 40),
            truncate(record.artist_display.as_deref().unwrap_or("-"), 40),
        );
    }

    let pagination = view.pagination();
    println!(
        "page {} of {} ({} records, {} selected){}",
        pagination.current_page(),
        pagination.page_count(),
        pagination.total_records(),
        view.store().len(),
        if view.select_all_state().is_checked() {
            ", all on page selected"
        } else {
            ""
        }
    );
}

fn truncate(text: &str, width: usize) -> String {
    let first_line = text.lines().next().unwrap_or("");
    if first_line.chars().count() <= width {
        return first_line.to_string();
    }
    let mut out: String = first_line.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}
