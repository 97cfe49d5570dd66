use crate::config::toml_config::{CompressionConfig, ScraperConfig, SourceConfig};
use crate::utils::error::Result;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "scrape_jobs")]
#[command(about = "Scrape job postings, normalize and deduplicate them, and store the dataset")]
pub struct ScrapeJobsArgs {
    /// Path to TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Scrape these URLs instead of the configured sources (default selectors)
    #[arg(long = "source", value_name = "URL")]
    pub sources: Vec<String>,

    #[arg(short, long)]
    pub output_path: Option<String>,

    /// Output formats, comma separated (csv, json)
    #[arg(long, value_delimiter = ',')]
    pub formats: Vec<String>,

    #[arg(long)]
    pub max_records: Option<usize>,

    #[arg(long)]
    pub concurrent_requests: Option<usize>,

    /// Bundle all outputs into a single ZIP archive
    #[arg(long)]
    pub compress: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long)]
    pub json_logs: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    pub monitor: Option<bool>,

    /// Dry run - show what would be scraped without fetching
    #[arg(long)]
    pub dry_run: bool,
}

impl ScrapeJobsArgs {
    /// 載入設定檔（若有）再套用命令列覆蓋
    pub fn load_config(&self) -> Result<ScraperConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path.display());
                ScraperConfig::from_file(path)?
            }
            None => ScraperConfig::default(),
        };
        self.apply_overrides(&mut config);
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut ScraperConfig) {
        if !self.sources.is_empty() {
            config.sources = self
                .sources
                .iter()
                .enumerate()
                .map(|(i, url)| SourceConfig::new(format!("cli-{}", i + 1), url.clone()))
                .collect();
        }
        if let Some(path) = &self.output_path {
            config.load.output_path = path.clone();
        }
        if !self.formats.is_empty() {
            config.load.output_formats = self.formats.clone();
        }
        if self.max_records.is_some() {
            config.extract.max_records = self.max_records;
        }
        if self.concurrent_requests.is_some() {
            config.extract.concurrent_requests = self.concurrent_requests;
        }
        if self.compress {
            let filename = config
                .load
                .compression
                .as_ref()
                .map(|c| c.filename.clone())
                .unwrap_or_else(crate::config::toml_config::default_archive_name);
            config.load.compression = Some(CompressionConfig {
                enabled: true,
                filename,
            });
        }
    }

    pub fn monitor_enabled(&self, config: &ScraperConfig) -> bool {
        self.monitor.unwrap_or_else(|| config.monitoring_enabled())
    }
}
