use crate::domain::model::JobPosting;
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::io::Read;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchField {
    #[default]
    Any,
    Title,
    Company,
    Location,
}

impl FromStr for SearchField {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "any" => Ok(SearchField::Any),
            "title" => Ok(SearchField::Title),
            "company" => Ok(SearchField::Company),
            "location" => Ok(SearchField::Location),
            other => Err(format!(
                "unknown field '{}', expected one of: any, title, company, location",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SearchQuery {
    pub keywords: Vec<String>,
    pub field: SearchField,
    pub limit: Option<usize>,
}

impl SearchQuery {
    pub fn new(text: &str) -> Self {
        Self {
            keywords: text.split_whitespace().map(str::to_lowercase).collect(),
            ..Self::default()
        }
    }

    pub fn with_field(mut self, field: SearchField) -> Self {
        self.field = field;
        self
    }

    pub fn with_limit(mut self, limit: Option<usize>) -> Self {
        self.limit = limit;
        self
    }

    /// Every keyword must appear (case-insensitive) in the selected field.
    pub fn matches(&self, posting: &JobPosting) -> bool {
        let haystack = match self.field {
            SearchField::Any => format!(
                "{} {} {}",
                posting.title, posting.company, posting.location
            ),
            SearchField::Title => posting.title.clone(),
            SearchField::Company => posting.company.clone(),
            SearchField::Location => posting.location.clone(),
        }
        .to_lowercase();

        self.keywords.iter().all(|k| haystack.contains(k.as_str()))
    }
}

pub fn read_postings<R: Read>(reader: R) -> Result<Vec<JobPosting>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let postings = csv_reader
        .deserialize()
        .collect::<std::result::Result<Vec<JobPosting>, _>>()?;
    Ok(postings)
}

/// Reads a stored dataset through the storage backend.
pub async fn load_postings<S: Storage>(storage: &S, path: &str) -> Result<Vec<JobPosting>> {
    let data = storage.read_file(path).await?;
    read_postings(data.as_slice())
}

pub fn search<'a>(postings: &'a [JobPosting], query: &SearchQuery) -> Vec<&'a JobPosting> {
    let matches = postings.iter().filter(|p| query.matches(p));
    match query.limit {
        Some(limit) => matches.take(limit).collect(),
        None => matches.collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STORED: &str = "\
Job Title,Company,Location,Date Posted
Senior Python Developer,\"Payne, Roberts and Davis\",\"Stewartbury, AA\",2021-04-08
Energy engineer,Vasquez-Davidson,\"Christopherville, AA\",2021-04-08
Python Programmer (Entry-Level),Moss LLC,\"Port Sara, AE\",2021-04-08
Legal executive,\"Jackson, Chambers and Levy\",\"Port Ericaburgh, AA\",
";

    #[test]
    fn test_read_postings_from_csv() {
        let postings = read_postings(STORED.as_bytes()).unwrap();
        assert_eq!(postings.len(), 4);
        assert_eq!(postings[0].company, "Payne, Roberts and Davis");
        assert_eq!(postings[3].date_posted, "");
    }

    #[tokio::test]
    async fn test_load_postings_from_storage() {
        use crate::adapters::storage::LocalStorage;

        let temp_dir = tempfile::TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());
        storage.write_file("fake_jobs.csv", STORED.as_bytes()).await.unwrap();

        let postings = load_postings(&storage, "fake_jobs.csv").await.unwrap();
        assert_eq!(postings.len(), 4);
        assert_eq!(postings[1].title, "Energy engineer");

        let err = load_postings(&storage, "missing.csv").await.unwrap_err();
        assert!(matches!(err, crate::utils::error::ScraperError::IoError(_)));
    }

    #[test]
    fn test_keywords_are_anded_and_case_insensitive() {
        let postings = read_postings(STORED.as_bytes()).unwrap();

        let hits = search(&postings, &SearchQuery::new("PYTHON"));
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].title, "Senior Python Developer");

        let hits = search(&postings, &SearchQuery::new("python port"));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].company, "Moss LLC");
    }

    #[test]
    fn test_field_restriction_and_limit() {
        let postings = read_postings(STORED.as_bytes()).unwrap();

        let by_location = SearchQuery::new("port").with_field(SearchField::Location);
        assert_eq!(search(&postings, &by_location).len(), 2);

        let by_title = SearchQuery::new("port").with_field(SearchField::Title);
        assert!(search(&postings, &by_title).is_empty());

        let limited = SearchQuery::new("aa").with_limit(Some(1));
        assert_eq!(search(&postings, &limited).len(), 1);
    }

    #[test]
    fn test_empty_query_matches_everything() {
        let postings = read_postings(STORED.as_bytes()).unwrap();
        assert_eq!(search(&postings, &SearchQuery::new("  ")).len(), 4);
    }

    #[test]
    fn test_parse_search_field() {
        assert_eq!("Company".parse::<SearchField>().unwrap(), SearchField::Company);
        assert!("salary".parse::<SearchField>().is_err());
    }
}
