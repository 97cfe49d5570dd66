pub mod etl;
pub mod mission;
pub mod normalize;
pub mod parser;
pub mod search;

pub use crate::domain::model::{JobPosting, ScrapeBatch, TransformResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
