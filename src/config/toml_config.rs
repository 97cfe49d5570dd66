use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Result, ScraperError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::LazyLock;

pub const DEFAULT_SOURCE_URL: &str = "https://realpython.github.io/fake-jobs/";
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (compatible; job-search-scraper/1.0; +https://github.com/job-search-scraper)";
pub const SUPPORTED_FORMATS: [&str; 2] = ["csv", "json"];

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("valid regex"));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScraperConfig {
    #[serde(default)]
    pub scraper: ScraperInfo,
    #[serde(default = "default_sources")]
    pub sources: Vec<SourceConfig>,
    #[serde(default)]
    pub request: RequestConfig,
    #[serde(default)]
    pub extract: ExtractConfig,
    #[serde(default)]
    pub load: LoadConfig,
    pub monitoring: Option<MonitoringConfig>,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            scraper: ScraperInfo::default(),
            sources: default_sources(),
            request: RequestConfig::default(),
            extract: ExtractConfig::default(),
            load: LoadConfig::default(),
            monitoring: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScraperInfo {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_version")]
    pub version: String,
}

impl Default for ScraperInfo {
    fn default() -> Self {
        Self {
            name: "fake-jobs".to_string(),
            description: "Real Python fake jobs board".to_string(),
            version: default_version(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    pub name: String,
    pub url: String,
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default)]
    pub selectors: SelectorConfig,
}

impl SourceConfig {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            enabled: true,
            selectors: SelectorConfig::default(),
        }
    }
}

/// 每個欄位可給多個候選選擇器，依序嘗試
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    pub card: String,
    pub title: Vec<String>,
    pub company: Vec<String>,
    pub location: Vec<String>,
    pub date_posted: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            card: "div.card-content".to_string(),
            title: vec!["h2.title".to_string(), "h2".to_string()],
            company: vec!["h3.company".to_string(), "h3".to_string()],
            location: vec!["p.location".to_string(), "p".to_string()],
            date_posted: "time".to_string(),
        }
    }
}

impl SelectorConfig {
    fn all(&self) -> impl Iterator<Item = (&'static str, &str)> {
        std::iter::once(("card", self.card.as_str()))
            .chain(self.title.iter().map(|s| ("title", s.as_str())))
            .chain(self.company.iter().map(|s| ("company", s.as_str())))
            .chain(self.location.iter().map(|s| ("location", s.as_str())))
            .chain(std::iter::once(("date_posted", self.date_posted.as_str())))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestConfig {
    pub timeout_seconds: u64,
    pub retry_attempts: u32,
    pub retry_delay_ms: u64,
    pub user_agent: String,
    pub headers: HashMap<String, String>,
}

impl Default for RequestConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            retry_attempts: 2,
            retry_delay_ms: 500,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            headers: HashMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractConfig {
    pub concurrent_requests: Option<usize>,
    pub max_records: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    #[serde(default = "default_output_path")]
    pub output_path: String,
    #[serde(default = "default_formats")]
    pub output_formats: Vec<String>,
    pub compression: Option<CompressionConfig>,
    pub filenames: Option<FilenameConfig>,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            output_path: default_output_path(),
            output_formats: default_formats(),
            compression: None,
            filenames: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompressionConfig {
    pub enabled: bool,
    #[serde(default = "default_archive_name")]
    pub filename: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilenameConfig {
    pub csv: Option<String>,
    pub json: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

fn default_sources() -> Vec<SourceConfig> {
    vec![SourceConfig::new("realpython", DEFAULT_SOURCE_URL)]
}

fn default_version() -> String {
    "1.0".to_string()
}

fn default_true() -> bool {
    true
}

fn default_output_path() -> String {
    ".".to_string()
}

fn default_formats() -> Vec<String> {
    vec!["csv".to_string()]
}

pub fn default_archive_name() -> String {
    "fake_jobs.zip".to_string()
}

impl ScraperConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);

        toml::from_str(&processed).map_err(|e| ScraperError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${JOBS_URL})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn enabled_sources(&self) -> impl Iterator<Item = &SourceConfig> {
        self.sources.iter().filter(|s| s.enabled)
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

impl Validate for ScraperConfig {
    fn validate(&self) -> Result<()> {
        if self.enabled_sources().next().is_none() {
            return Err(ScraperError::MissingConfigError {
                field: "sources".to_string(),
            });
        }

        for (idx, source) in self.sources.iter().enumerate() {
            validation::validate_non_empty_string(&format!("sources[{}].name", idx), &source.name)?;
            validation::validate_url(&format!("sources[{}].url", idx), &source.url)?;
            for (field, selector) in source.selectors.all() {
                validation::validate_selector(
                    &format!("sources[{}].selectors.{}", idx, field),
                    selector,
                )?;
            }
        }

        validation::validate_range("request.timeout_seconds", self.request.timeout_seconds, 1, 300)?;
        validation::validate_range("request.retry_attempts", self.request.retry_attempts, 0, 10)?;

        if let Some(concurrent) = self.extract.concurrent_requests {
            validation::validate_positive_number("extract.concurrent_requests", concurrent, 1)?;
        }
        if let Some(max) = self.extract.max_records {
            validation::validate_positive_number("extract.max_records", max, 1)?;
        }

        validation::validate_path("load.output_path", &self.load.output_path)?;
        validation::validate_output_formats(
            "load.output_formats",
            &self.load.output_formats,
            &SUPPORTED_FORMATS,
        )?;

        Ok(())
    }
}

impl ConfigProvider for ScraperConfig {
    fn sources(&self) -> Vec<SourceConfig> {
        self.enabled_sources().cloned().collect()
    }

    fn request(&self) -> RequestConfig {
        self.request.clone()
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.load.output_formats
    }

    fn output_filename(&self, format: &str) -> String {
        let configured = self.load.filenames.as_ref().and_then(|f| match format {
            "csv" => f.csv.clone(),
            "json" => f.json.clone(),
            _ => None,
        });
        configured.unwrap_or_else(|| format!("fake_jobs.{}", format))
    }

    fn archive_filename(&self) -> Option<String> {
        self.load
            .compression
            .as_ref()
            .filter(|c| c.enabled)
            .map(|c| c.filename.clone())
    }

    fn concurrent_requests(&self) -> usize {
        self.extract.concurrent_requests.unwrap_or(4)
    }

    fn max_records(&self) -> Option<usize> {
        self.extract.max_records
    }
}
