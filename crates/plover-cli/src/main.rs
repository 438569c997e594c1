use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use plover_cli::{BrowserArgs, commands, positive_count};
use plover_core::table::{DEFAULT_CATEGORIES_FILE, DEFAULT_CHUNK_PREFIX};
use plover_core::wait::Wait;
use plover_crawler::{DEFAULT_START_URL, ScrapeOptions};
use std::path::PathBuf;
use std::time::Duration;

// Poll interval for every bounded wait
const POLL_INTERVAL: Duration = Duration::from_millis(250);

const LOG_TARGETS: &[&str] = &[
    "plover",
    "plover_cli",
    "plover_core",
    "plover_browser",
    "plover_crawler",
];

#[derive(Parser)]
#[command(name = "plover")]
#[command(author, version)]
#[command(
    about = "Scrape business leads from review-site category listings",
    long_about = "Plover drives a headless Chrome over a review site's category pages. \
                  Run `categories` once to collect subcategory links, then `leads` to \
                  page through each subcategory and write contact details to CSV chunks."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Collect category and subcategory links into a CSV file
    Categories {
        /// Categories index page to start from
        #[arg(long, env = "PLOVER_START_URL", default_value = DEFAULT_START_URL)]
        start_url: String,

        /// CSV file to write the links to
        #[arg(short, long, default_value = DEFAULT_CATEGORIES_FILE)]
        output: PathBuf,

        /// How long to wait for the category cards to render (ms)
        #[arg(long, default_value_t = 5000)]
        page_load_timeout_ms: u64,

        #[command(flatten)]
        browser: BrowserArgs,
    },

    /// Scrape leads for each subcategory into numbered CSV chunks
    Leads {
        /// CSV file of category links written by `categories`
        #[arg(short, long, default_value = DEFAULT_CATEGORIES_FILE)]
        input: PathBuf,

        /// Directory the chunk files are written to
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,

        /// File name prefix for chunk files
        #[arg(long, default_value = DEFAULT_CHUNK_PREFIX)]
        prefix: String,

        /// Leads per chunk file
        #[arg(
            long,
            env = "PLOVER_CHUNK_SIZE",
            default_value = "20",
            value_parser = positive_count
        )]
        chunk_size: usize,

        /// Stop after this many leads
        #[arg(
            long,
            env = "PLOVER_TARGET",
            default_value = "30000",
            value_parser = positive_count
        )]
        target: usize,

        /// Stop each subcategory after this many pages
        #[arg(long, value_parser = positive_count)]
        max_pages: Option<usize>,

        /// How long to wait for listing cards to render (ms)
        #[arg(long, default_value_t = 5000)]
        page_load_timeout_ms: u64,

        /// How long to wait for a contact tooltip (ms)
        #[arg(long, default_value_t = 5000)]
        tooltip_timeout_ms: u64,

        #[command(flatten)]
        browser: BrowserArgs,
    },

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match cli.command {
        Commands::Categories {
            start_url,
            output,
            page_load_timeout_ms,
            browser,
        } => commands::categories::execute(
            &start_url,
            &output,
            bounded(page_load_timeout_ms),
            &browser,
        ),
        Commands::Leads {
            input,
            output_dir,
            prefix,
            chunk_size,
            target,
            max_pages,
            page_load_timeout_ms,
            tooltip_timeout_ms,
            browser,
        } => {
            let options = ScrapeOptions {
                target,
                chunk_size,
                max_pages,
                page_load: bounded(page_load_timeout_ms),
                tooltip: bounded(tooltip_timeout_ms),
            };
            commands::leads::execute(&input, &output_dir, &prefix, options, &browser)
        }
        Commands::Completion { shell } => {
            commands::completion::execute(shell, &mut Cli::command())
        }
    }
}

fn bounded(timeout_ms: u64) -> Wait {
    Wait::new(Duration::from_millis(timeout_ms), POLL_INTERVAL)
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let level = if verbose { "debug" } else { "info" };
    let directives = LOG_TARGETS
        .iter()
        .map(|target| format!("{}={}", target, level))
        .collect::<Vec<_>>()
        .join(",");
    let filter = EnvFilter::new(directives);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();
}
