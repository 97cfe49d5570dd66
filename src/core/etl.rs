use crate::core::Pipeline;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("🚀 Starting scrape run");

        tracing::info!("🔎 Extracting job postings...");
        let batches = self.pipeline.extract().await?;
        let raw_count: usize = batches.iter().map(|b| b.postings.len()).sum();
        tracing::info!(
            "Extracted {} postings from {} source(s)",
            raw_count,
            batches.len()
        );
        self.monitor.log_stats("Extract");

        tracing::info!("🧹 Normalizing and deduplicating...");
        let result = self.pipeline.transform(batches).await?;
        tracing::info!(
            "Kept {} postings ({} duplicates removed, {} rejected)",
            result.postings.len(),
            result.duplicates_removed,
            result.rejected
        );
        self.monitor.log_stats("Transform");

        tracing::info!("💾 Storing results...");
        let output_path = self.pipeline.load(result).await?;
        tracing::info!("Output saved to: {}", output_path);
        self.monitor.log_stats("Load");
        self.monitor.log_final_stats();

        Ok(output_path)
    }
}
