use clap::Parser;
use job_search_scraper::domain::ports::ConfigProvider;
use job_search_scraper::utils::{logger, validation::Validate};
use job_search_scraper::{EtlEngine, JobsPipeline, LocalStorage, ScrapeJobsArgs, ScraperConfig};

#[tokio::main]
async fn main() {
    let args = ScrapeJobsArgs::parse();

    logger::init_logger(args.verbose, args.json_logs);
    tracing::info!("🚀 Starting job scraper");

    let config = match args.load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load configuration: {}", e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");
    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No requests will be made");
        perform_dry_run(&config);
        return;
    }

    let monitor_enabled = args.monitor_enabled(&config);
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let storage = LocalStorage::new(config.output_path());
    let pipeline = match JobsPipeline::new(storage, config) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(e.severity().exit_code().max(1));
        }
    };

    let engine = EtlEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(output_path) => {
            println!("Success! Job data saved to {}", output_path);
        }
        Err(e) => {
            tracing::error!(
                "❌ Scrape failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = e.severity().exit_code();
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }
}

fn display_config_summary(config: &ScraperConfig, args: &ScrapeJobsArgs) {
    println!("📋 Configuration Summary:");
    println!(
        "  Scraper: {} v{}",
        config.scraper.name, config.scraper.version
    );
    for source in config.enabled_sources() {
        println!("  Source: {} ({})", source.name, source.url);
    }
    println!("  Output: {}", config.output_path());
    println!("  Formats: {}", config.output_formats().join(", "));
    if let Some(max_records) = config.max_records() {
        println!("  Max Records: {}", max_records);
    }
    println!("  Concurrent Requests: {}", config.concurrent_requests());
    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }
    println!();
}

fn perform_dry_run(config: &ScraperConfig) {
    println!("🔍 Dry Run Analysis:");
    println!();

    println!("📡 Sources:");
    for source in &config.sources {
        let state = if source.enabled { "enabled" } else { "disabled" };
        println!("  {} [{}] {}", source.name, state, source.url);
        println!("    card: {}", source.selectors.card);
        println!("    title: {}", source.selectors.title.join(" | "));
        println!("    company: {}", source.selectors.company.join(" | "));
        println!("    location: {}", source.selectors.location.join(" | "));
        println!("    date posted: {}", source.selectors.date_posted);
    }

    println!();
    println!("🌐 Requests:");
    println!("  Timeout: {}s", config.request.timeout_seconds);
    println!(
        "  Retries: {} (delay {}ms)",
        config.request.retry_attempts, config.request.retry_delay_ms
    );
    if !config.request.headers.is_empty() {
        println!("  Headers: {} custom headers", config.request.headers.len());
    }

    println!();
    println!("💾 Output Configuration:");
    for format in config.output_formats() {
        println!("  {}", config.output_filename(format));
    }
    if let Some(archive) = config.archive_filename() {
        println!("  Compression: {} (ZIP)", archive);
    }

    println!();
    println!("✅ Dry run analysis complete. Use --verbose for more details during actual run.");
}
