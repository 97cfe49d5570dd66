use crate::utils::text::collapse_whitespace;
use serde::{Deserialize, Serialize};

/// CSV 欄位名稱與原始資料集一致
pub const CSV_HEADERS: [&str; 4] = ["Job Title", "Company", "Location", "Date Posted"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobPosting {
    #[serde(rename = "Job Title")]
    pub title: String,
    #[serde(rename = "Company")]
    pub company: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Date Posted")]
    pub date_posted: String,
}

impl JobPosting {
    pub fn new(
        title: impl Into<String>,
        company: impl Into<String>,
        location: impl Into<String>,
        date_posted: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            company: company.into(),
            location: location.into(),
            date_posted: date_posted.into(),
        }
    }

    /// Identity used for deduplication. Date is excluded so a re-posted job collapses.
    pub fn dedup_key(&self) -> (String, String, String) {
        let fold = |s: &str| collapse_whitespace(s).to_lowercase();
        (fold(&self.title), fold(&self.company), fold(&self.location))
    }
}

#[derive(Debug, Clone)]
pub struct ScrapeBatch {
    pub source: String,
    pub postings: Vec<JobPosting>,
}

#[derive(Debug, Clone, Default)]
pub struct TransformResult {
    pub postings: Vec<JobPosting>,
    pub duplicates_removed: usize,
    pub rejected: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionOutcome {
    Mission(String),
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissionResult {
    pub url: String,
    pub outcome: MissionOutcome,
}

impl MissionResult {
    pub fn mission(url: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            outcome: MissionOutcome::Mission(text.into()),
        }
    }

    pub fn error(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            outcome: MissionOutcome::Error(message.into()),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.outcome, MissionOutcome::Error(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup_key_ignores_case_whitespace_and_date() {
        let a = JobPosting::new("Senior  Python Developer", "Payne, Roberts and Davis", "Stewartbury, AA", "2021-04-08");
        let b = JobPosting::new("senior python developer ", "PAYNE, ROBERTS AND DAVIS", "Stewartbury,  AA", "2021-05-01");
        assert_eq!(a.dedup_key(), b.dedup_key());

        let c = JobPosting::new("Senior Python Developer", "Vasquez-Davidson", "Christopherville, AA", "");
        assert_ne!(a.dedup_key(), c.dedup_key());
    }
}
