use crate::adapters::http::HttpFetcher;
use crate::config::toml_config::SourceConfig;
use crate::core::normalize::normalize_and_dedup;
use crate::core::parser::JobCardParser;
use crate::core::{ConfigProvider, JobPosting, Pipeline, ScrapeBatch, Storage, TransformResult};
use crate::domain::model::CSV_HEADERS;
use crate::utils::error::{Result, ScraperError};
use futures::stream::{self, StreamExt};
use std::io::Write;
use zip::write::{SimpleFileOptions, ZipWriter};

/// 從設定的來源抓取職缺卡片，正規化、去重後存成 CSV / JSON
pub struct JobsPipeline<S: Storage, C: ConfigProvider> {
    pub(crate) storage: S,
    pub(crate) config: C,
    pub(crate) fetcher: HttpFetcher,
}

impl<S: Storage, C: ConfigProvider> JobsPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Result<Self> {
        let fetcher = HttpFetcher::new(&config.request())?;
        Ok(Self {
            storage,
            config,
            fetcher,
        })
    }

    async fn scrape_source(&self, source: &SourceConfig) -> Result<ScrapeBatch> {
        tracing::info!("📡 Fetching job postings from {} ({})", source.name, source.url);
        let parser = JobCardParser::new(&source.selectors)?;
        let html = self.fetcher.fetch_html(&source.url).await?;
        let postings = parser.parse(&html);
        tracing::info!("Found {} job postings at {}", postings.len(), source.name);

        Ok(ScrapeBatch {
            source: source.name.clone(),
            postings,
        })
    }

    fn render(format: &str, postings: &[JobPosting]) -> Result<Vec<u8>> {
        match format {
            "csv" => {
                let mut writer = csv::WriterBuilder::new()
                    .has_headers(false)
                    .from_writer(Vec::new());
                // 沒有資料時也要寫入標題列
                writer.write_record(CSV_HEADERS)?;
                for posting in postings {
                    writer.serialize(posting)?;
                }
                writer.into_inner().map_err(|e| ScraperError::IoError(e.into_error()))
            }
            "json" => Ok(serde_json::to_vec_pretty(postings)?),
            other => Err(ScraperError::InvalidConfigValueError {
                field: "load.output_formats".to_string(),
                value: other.to_string(),
                reason: "Unsupported format".to_string(),
            }),
        }
    }

    fn archive(files: &[(String, Vec<u8>)]) -> Result<Vec<u8>> {
        let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
        for (name, data) in files {
            zip.start_file(name.as_str(), SimpleFileOptions::default())?;
            zip.write_all(data)?;
        }
        Ok(zip.finish()?.into_inner())
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider> Pipeline for JobsPipeline<S, C> {
    async fn extract(&self) -> Result<Vec<ScrapeBatch>> {
        let sources = self.config.sources();
        let source_count = sources.len();
        let concurrency = self.config.concurrent_requests().max(1);

        tracing::debug!(
            "Scraping {} source(s) with concurrency {}",
            source_count,
            concurrency
        );

        // buffered 保留來源順序，去重結果才會穩定
        let pending: Vec<_> = sources.iter().map(|source| self.scrape_source(source)).collect();
        let results: Vec<Result<ScrapeBatch>> = stream::iter(pending)
            .buffered(concurrency)
            .collect()
            .await;

        let mut batches = Vec::new();
        let mut last_error = None;
        for (source, result) in sources.iter().zip(results) {
            match result {
                Ok(batch) => batches.push(batch),
                Err(e) => {
                    tracing::error!("❌ Source {} failed: {}", source.name, e);
                    last_error = Some(e);
                }
            }
        }

        if batches.is_empty() {
            if let Some(e) = last_error {
                return Err(e);
            }
        }

        if batches.iter().all(|b| b.postings.is_empty()) {
            tracing::warn!("⚠️ No jobs found on the page.");
            return Err(ScraperError::NoRecordsFound {
                sources: source_count,
            });
        }

        Ok(batches)
    }

    async fn transform(&self, batches: Vec<ScrapeBatch>) -> Result<TransformResult> {
        let postings = batches.into_iter().flat_map(|b| b.postings);
        Ok(normalize_and_dedup(postings, self.config.max_records()))
    }

    async fn load(&self, result: TransformResult) -> Result<String> {
        let mut files = Vec::new();
        for format in self.config.output_formats() {
            let name = self.config.output_filename(format);
            let data = Self::render(format, &result.postings)?;
            tracing::debug!("Rendered {} ({} bytes)", name, data.len());
            files.push((name, data));
        }

        if let Some(archive_name) = self.config.archive_filename() {
            tracing::debug!("Creating ZIP file with {} files", files.len());
            let zip_data = Self::archive(&files)?;
            self.storage.write_file(&archive_name, &zip_data).await?;
            return Ok(self.storage.display_path(&archive_name));
        }

        for (name, data) in &files {
            tracing::info!("Writing to {}...", self.storage.display_path(name));
            self.storage.write_file(name, data).await?;
        }

        let primary = files
            .first()
            .map(|(name, _)| name.clone())
            .ok_or_else(|| ScraperError::MissingConfigError {
                field: "load.output_formats".to_string(),
            })?;
        Ok(self.storage.display_path(&primary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::toml_config::ScraperConfig;
    use httpmock::prelude::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            self.files.lock().await.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                ScraperError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            self.files.lock().await.insert(path.to_string(), data.to_vec());
            Ok(())
        }

        fn display_path(&self, path: &str) -> String {
            format!("mock://{}", path)
        }
    }

    fn card(title: &str, company: &str, location: &str, date: &str) -> String {
        format!(
            r#"<div class="card-content"><h2 class="title">{}</h2><h3 class="company">{}</h3><p class="location">{}</p><time datetime="{}">{}</time></div>"#,
            title, company, location, date, date
        )
    }

    fn config_for(urls: &[String], extra: &str) -> ScraperConfig {
        let mut toml_content = String::from("[request]\nretry_attempts = 0\n\n");
        for (i, url) in urls.iter().enumerate() {
            toml_content.push_str(&format!("[[sources]]\nname = \"board{}\"\nurl = \"{}\"\n\n", i, url));
        }
        toml_content.push_str(extra);
        ScraperConfig::from_toml_str(&toml_content).unwrap()
    }

    #[tokio::test]
    async fn test_extract_keeps_source_order_and_skips_failures() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/a");
            then.status(200).body(card("Role A", "Acme", "Remote", "2024-01-01"));
        });
        server.mock(|when, then| {
            when.method(GET).path("/down");
            then.status(404);
        });
        server.mock(|when, then| {
            when.method(GET).path("/b");
            then.status(200).body(card("Role B", "Beta", "Paris", "2024-01-02"));
        });

        let config = config_for(&[server.url("/a"), server.url("/down"), server.url("/b")], "");
        let pipeline = JobsPipeline::new(MockStorage::default(), config).unwrap();

        let batches = pipeline.extract().await.unwrap();
        let names: Vec<_> = batches.iter().map(|b| b.source.as_str()).collect();
        assert_eq!(names, vec!["board0", "board2"]);
        assert_eq!(batches[1].postings[0].title, "Role B");
    }

    #[tokio::test]
    async fn test_extract_all_sources_failing_returns_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/gone");
            then.status(410);
        });

        let config = config_for(&[server.url("/gone")], "");
        let pipeline = JobsPipeline::new(MockStorage::default(), config).unwrap();

        let err = pipeline.extract().await.unwrap_err();
        assert!(matches!(err, ScraperError::HttpStatusError { status: 410, .. }));
    }

    #[tokio::test]
    async fn test_extract_without_cards_is_no_records() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/empty");
            then.status(200).body("<html><body><p>No openings</p></body></html>");
        });

        let config = config_for(&[server.url("/empty")], "");
        let pipeline = JobsPipeline::new(MockStorage::default(), config).unwrap();

        let err = pipeline.extract().await.unwrap_err();
        assert!(matches!(err, ScraperError::NoRecordsFound { sources: 1 }));
    }

    #[tokio::test]
    async fn test_transform_dedups_across_sources() {
        let config = config_for(&["https://jobs.example.com/".to_string()], "");
        let pipeline = JobsPipeline::new(MockStorage::default(), config).unwrap();

        let batches = vec![
            ScrapeBatch {
                source: "a".to_string(),
                postings: vec![JobPosting::new("Role A", "Acme", "Remote", "2024-01-01")],
            },
            ScrapeBatch {
                source: "b".to_string(),
                postings: vec![
                    JobPosting::new("role a", "ACME", "Remote", "2024-02-01"),
                    JobPosting::new("Role B", "Beta", "Paris", ""),
                ],
            },
        ];

        let result = pipeline.transform(batches).await.unwrap();
        assert_eq!(result.postings.len(), 2);
        assert_eq!(result.postings[0].date_posted, "2024-01-01");
        assert_eq!(result.duplicates_removed, 1);
    }

    #[tokio::test]
    async fn test_load_writes_csv_and_json() {
        let config = config_for(
            &["https://jobs.example.com/".to_string()],
            "[load]\noutput_formats = [\"csv\", \"json\"]\n",
        );
        let storage = MockStorage::default();
        let pipeline = JobsPipeline::new(storage.clone(), config).unwrap();

        let result = TransformResult {
            postings: vec![JobPosting::new("Senior Python Developer", "Payne, Roberts and Davis", "Stewartbury, AA", "2021-04-08")],
            ..TransformResult::default()
        };
        let output = pipeline.load(result).await.unwrap();
        assert_eq!(output, "mock://fake_jobs.csv");

        let csv = String::from_utf8(storage.get_file("fake_jobs.csv").await.unwrap()).unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("Job Title,Company,Location,Date Posted"));
        assert_eq!(
            lines.next(),
            Some("Senior Python Developer,\"Payne, Roberts and Davis\",\"Stewartbury, AA\",2021-04-08")
        );

        let json: serde_json::Value =
            serde_json::from_slice(&storage.get_file("fake_jobs.json").await.unwrap()).unwrap();
        assert_eq!(json[0]["Job Title"], "Senior Python Developer");
    }

    #[tokio::test]
    async fn test_load_empty_result_still_writes_header() {
        let config = config_for(&["https://jobs.example.com/".to_string()], "");
        let storage = MockStorage::default();
        let pipeline = JobsPipeline::new(storage.clone(), config).unwrap();

        pipeline.load(TransformResult::default()).await.unwrap();

        let csv = storage.get_file("fake_jobs.csv").await.unwrap();
        assert_eq!(csv, b"Job Title,Company,Location,Date Posted\n");
    }

    #[tokio::test]
    async fn test_load_with_compression_writes_archive_only() {
        let config = config_for(
            &["https://jobs.example.com/".to_string()],
            "[load]\noutput_formats = [\"csv\", \"json\"]\n\n[load.compression]\nenabled = true\nfilename = \"jobs.zip\"\n",
        );
        let storage = MockStorage::default();
        let pipeline = JobsPipeline::new(storage.clone(), config).unwrap();

        let output = pipeline.load(TransformResult::default()).await.unwrap();
        assert_eq!(output, "mock://jobs.zip");
        assert!(storage.get_file("fake_jobs.csv").await.is_none());

        let zip_data = storage.get_file("jobs.zip").await.unwrap();
        let archive = zip::ZipArchive::new(std::io::Cursor::new(zip_data)).unwrap();
        let names: Vec<_> = archive.file_names().collect();
        assert!(names.contains(&"fake_jobs.csv"));
        assert!(names.contains(&"fake_jobs.json"));
    }
}
