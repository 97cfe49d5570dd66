pub mod adapters;
pub mod app;
pub mod banner;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::{http::HttpFetcher, storage::LocalStorage};
pub use app::pipelines::jobs_pipeline::JobsPipeline;
pub use config::toml_config::ScraperConfig;
pub use core::etl::EtlEngine;
pub use domain::model::{JobPosting, MissionResult};
pub use utils::error::{Result, ScraperError};

#[cfg(feature = "cli")]
pub use config::cli::ScrapeJobsArgs;
