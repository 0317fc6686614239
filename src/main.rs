//! page-extract: scrape a results page and print or save the records

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::info;

use page_extract::arxiv::{scrape_arxiv_search, ALLOWED_SIZES};
use page_extract::output::{arxiv_summary, quotes_summary, write_json};
use page_extract::quotes::{scrape_quotes, QUOTES_URL};
use page_extract::FetchConfig;

const DEFAULT_QUERY: &str = "retrieval augmented generation";
const DEFAULT_OUTPUT: &str = "arxiv_results.json";

#[derive(Parser)]
#[command(
    name = "page-extract",
    about = "Fetch a results page and extract structured records with CSS selectors",
    version
)]
struct Cli {
    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search arXiv and save the results as JSON (default).
    Arxiv(ArxivArgs),

    /// List quotes from quotes.toscrape.com.
    Quotes {
        /// Page to scrape.
        #[arg(long, default_value = QUOTES_URL)]
        url: String,

        /// Number of quotes to print.
        #[arg(long, default_value_t = 5)]
        show: usize,
    },
}

#[derive(Args)]
struct ArxivArgs {
    /// Search terms.
    #[arg(short, long, default_value = DEFAULT_QUERY)]
    query: String,

    /// Results per page (25, 50, 100 or 200).
    #[arg(short, long, default_value_t = 25)]
    size: u32,

    /// Where to write the full result set.
    #[arg(short, long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Number of results to summarize on stdout.
    #[arg(long, default_value_t = 5)]
    show: usize,
}

impl Default for ArxivArgs {
    fn default() -> Self {
        Self {
            query: DEFAULT_QUERY.to_string(),
            size: ALLOWED_SIZES[0],
            output: PathBuf::from(DEFAULT_OUTPUT),
            show: 5,
        }
    }
}

fn run_arxiv(args: ArxivArgs, config: &FetchConfig) -> anyhow::Result<()> {
    let papers = scrape_arxiv_search(&args.query, args.size, config)
        .with_context(|| format!("arXiv search for `{}` failed", args.query))?;

    println!("\nFound {} results for: {}\n", papers.len(), args.query);
    print!("{}", arxiv_summary(&papers, args.show));

    write_json(&args.output, &papers)
        .with_context(|| format!("failed to write {}", args.output.display()))?;
    info!(path = %args.output.display(), records = papers.len(), "saved results");
    println!("Saved: {}", args.output.display());
    Ok(())
}

fn run_quotes(url: &str, show: usize, config: &FetchConfig) -> anyhow::Result<()> {
    let quotes =
        scrape_quotes(url, config).with_context(|| format!("failed to scrape {}", url))?;

    println!("Quotes found:\n");
    print!("{}", quotes_summary(&quotes, show));
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let config = FetchConfig::default();

    match cli.command {
        None => run_arxiv(ArxivArgs::default(), &config),
        Some(Commands::Arxiv(args)) => run_arxiv(args, &config),
        Some(Commands::Quotes { url, show }) => {
            let config = config.with_header("Referer", format!("{}/", QUOTES_URL));
            run_quotes(&url, show, &config)
        }
    }
}
