pub mod jobs_pipeline;
