use crate::domain::model::{JobPosting, TransformResult};
use crate::utils::text::collapse_whitespace;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::collections::HashSet;

/// Rewrites ISO dates (with or without a time part) as `YYYY-MM-DD`; anything else is returned unchanged.
pub fn normalize_date(raw: &str) -> String {
    let raw = raw.trim();
    if raw.is_empty() {
        return String::new();
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.format("%Y-%m-%d").to_string();
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.date_naive().format("%Y-%m-%d").to_string();
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return dt.date().format("%Y-%m-%d").to_string();
        }
    }

    raw.to_string()
}

pub fn normalize_posting(posting: JobPosting) -> JobPosting {
    JobPosting {
        title: collapse_whitespace(&posting.title),
        company: collapse_whitespace(&posting.company),
        location: collapse_whitespace(&posting.location),
        date_posted: normalize_date(&collapse_whitespace(&posting.date_posted)),
    }
}

/// Normalizes, rejects untitled postings, then drops later duplicates (first one wins).
pub fn normalize_and_dedup(
    postings: impl IntoIterator<Item = JobPosting>,
    max_records: Option<usize>,
) -> TransformResult {
    let mut seen = HashSet::new();
    let mut result = TransformResult::default();

    for posting in postings.into_iter().map(normalize_posting) {
        if posting.title.is_empty() {
            result.rejected += 1;
            continue;
        }
        if !seen.insert(posting.dedup_key()) {
            result.duplicates_removed += 1;
            continue;
        }
        result.postings.push(posting);
    }

    if let Some(max) = max_records {
        if result.postings.len() > max {
            tracing::debug!("Truncating {} postings to max_records={}", result.postings.len(), max);
            result.postings.truncate(max);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_date_formats() {
        assert_eq!(normalize_date("2021-04-08"), "2021-04-08");
        assert_eq!(normalize_date(" 2021-04-08T09:30:00Z "), "2021-04-08");
        assert_eq!(normalize_date("2021-04-08 09:30:00"), "2021-04-08");
        assert_eq!(normalize_date("Yesterday"), "Yesterday");
        assert_eq!(normalize_date(""), "");
    }

    #[test]
    fn test_month_name_dates_are_kept_as_is() {
        assert_eq!(normalize_date("April 8, 2021"), "April 8, 2021");
        assert_eq!(normalize_date(" Apr 8, 2021 "), "Apr 8, 2021");
        assert_eq!(normalize_date("8 April 2021"), "8 April 2021");
    }

    #[test]
    fn test_dedup_keeps_first_occurrence_in_order() {
        let postings = vec![
            JobPosting::new("Senior Python Developer", "Payne, Roberts and Davis", "Stewartbury, AA", "2021-04-08"),
            JobPosting::new("Energy engineer", "Vasquez-Davidson", "Christopherville, AA", "2021-04-08"),
            JobPosting::new(" senior  python developer", "PAYNE, ROBERTS AND DAVIS", "Stewartbury, AA", "2021-04-09"),
            JobPosting::new("   ", "Ghost Corp", "Nowhere", ""),
        ];

        let result = normalize_and_dedup(postings, None);

        assert_eq!(result.postings.len(), 2);
        assert_eq!(result.postings[0].title, "Senior Python Developer");
        assert_eq!(result.postings[0].date_posted, "2021-04-08");
        assert_eq!(result.postings[1].title, "Energy engineer");
        assert_eq!(result.duplicates_removed, 1);
        assert_eq!(result.rejected, 1);
    }

    #[test]
    fn test_max_records_applies_after_dedup() {
        let postings = vec![
            JobPosting::new("A", "X", "L", ""),
            JobPosting::new("A", "X", "L", ""),
            JobPosting::new("B", "X", "L", ""),
            JobPosting::new("C", "X", "L", ""),
        ];

        let result = normalize_and_dedup(postings, Some(2));
        let titles: Vec<_> = result.postings.iter().map(|p| p.title.as_str()).collect();

        assert_eq!(titles, vec!["A", "B"]);
        assert_eq!(result.duplicates_removed, 1);
    }
}
