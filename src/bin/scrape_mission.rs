use clap::Parser;
use job_search_scraper::core::mission::{
    write_report, MissionScraper, DEFAULT_OTHER_URL, DEFAULT_XULA_URL,
};
use job_search_scraper::utils::logger;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "scrape_mission")]
#[command(about = "Scrape mission statements")]
struct Args {
    /// Other university URL to scrape
    #[arg(short, long, default_value = DEFAULT_OTHER_URL)]
    other: String,

    /// Scrape only this single URL (skips defaults)
    #[arg(short, long)]
    single: Option<String>,

    /// Seconds to wait between requests
    #[arg(long, default_value_t = 1.0, allow_negative_numbers = true)]
    delay: f64,

    #[arg(short, long)]
    verbose: bool,
}

impl Args {
    fn urls(&self) -> Vec<String> {
        match &self.single {
            Some(url) => vec![url.clone()],
            None => vec![DEFAULT_XULA_URL.to_string(), self.other.clone()],
        }
    }

    fn delay(&self) -> Duration {
        // 負數、非數值或超出範圍一律視為 0
        if self.delay > 0.0 {
            Duration::try_from_secs_f64(self.delay).unwrap_or(Duration::ZERO)
        } else {
            Duration::ZERO
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init_cli_logger(args.verbose);

    let scraper = MissionScraper::new()?;
    let mut results = Vec::new();

    for url in args.urls() {
        println!("Scraping: {}", url);
        let result = scraper.scrape(&url).await;
        if result.is_error() {
            tracing::debug!("No mission extracted for {}", url);
        }
        results.push(result);
        tokio::time::sleep(args.delay()).await;
    }

    let stdout = std::io::stdout();
    write_report(&mut stdout.lock(), &results)?;

    Ok(())
}
