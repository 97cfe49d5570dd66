use clap::Parser;
use job_search_scraper::core::search::{load_postings, search, SearchField, SearchQuery};
use job_search_scraper::domain::ports::Storage;
use job_search_scraper::utils::logger;
use job_search_scraper::LocalStorage;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "search_jobs")]
#[command(about = "Search a stored job postings CSV")]
struct Args {
    /// Keywords; every keyword must match
    query: Vec<String>,

    /// CSV dataset produced by scrape_jobs
    #[arg(short, long, default_value = "fake_jobs.csv")]
    input: PathBuf,

    /// Restrict matching to one field (any, title, company, location)
    #[arg(short, long, default_value = "any")]
    field: SearchField,

    #[arg(short, long)]
    limit: Option<usize>,

    /// Print matches as JSON instead of a table
    #[arg(long)]
    json: bool,

    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let dir = args
        .input
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let name = args
        .input
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow::anyhow!("invalid dataset path '{}'", args.input.display()))?;

    let storage = LocalStorage::new(dir);
    let postings = load_postings(&storage, name).await.map_err(|e| {
        anyhow::anyhow!("cannot open dataset '{}': {}", storage.display_path(name), e)
    })?;
    tracing::debug!("Loaded {} postings from {}", postings.len(), storage.display_path(name));

    let query = SearchQuery::new(&args.query.join(" "))
        .with_field(args.field)
        .with_limit(args.limit);
    let hits = search(&postings, &query);
    tracing::info!("🔎 {} of {} postings matched", hits.len(), postings.len());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&hits)?);
        return Ok(());
    }

    for posting in &hits {
        println!(
            "{} | {} | {} | {}",
            posting.title, posting.company, posting.location, posting.date_posted
        );
    }
    println!("{} match(es)", hits.len());

    Ok(())
}
