use crate::config::toml_config::{RequestConfig, SourceConfig};
use crate::domain::model::{ScrapeBatch, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    /// Location of `path` as presented to users.
    fn display_path(&self, path: &str) -> String;
}

pub trait ConfigProvider: Send + Sync {
    fn sources(&self) -> Vec<SourceConfig>;
    fn request(&self) -> RequestConfig;
    fn output_path(&self) -> &str;
    fn output_formats(&self) -> &[String];
    fn output_filename(&self, format: &str) -> String;
    /// Archive name when outputs are bundled, `None` writes plain files.
    fn archive_filename(&self) -> Option<String>;
    fn concurrent_requests(&self) -> usize;
    fn max_records(&self) -> Option<usize>;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<ScrapeBatch>>;
    async fn transform(&self, batches: Vec<ScrapeBatch>) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<String>;
}
