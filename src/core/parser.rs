use crate::config::toml_config::SelectorConfig;
use crate::domain::model::JobPosting;
use crate::utils::error::{Result, ScraperError};
use crate::utils::text::collapse_whitespace;
use scraper::{ElementRef, Html, Selector};

fn compile(selector: &str) -> Result<Selector> {
    Selector::parse(selector).map_err(|e| ScraperError::SelectorError {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

fn compile_all(selectors: &[String]) -> Result<Vec<Selector>> {
    selectors.iter().map(|s| compile(s)).collect()
}

pub fn element_text(element: ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<String>())
}

/// Like [`element_text`] but separates text nodes, so block children never run together.
pub fn element_text_spaced(element: ElementRef<'_>) -> String {
    collapse_whitespace(&element.text().collect::<Vec<_>>().join(" "))
}

/// Extracts job cards from a listing page.
///
/// Each field has an ordered list of candidate selectors; the first one that
/// matches inside the card wins. Cards without a title are skipped.
pub struct JobCardParser {
    card: Selector,
    title: Vec<Selector>,
    company: Vec<Selector>,
    location: Vec<Selector>,
    date_posted: Selector,
}

impl JobCardParser {
    pub fn new(config: &SelectorConfig) -> Result<Self> {
        Ok(Self {
            card: compile(&config.card)?,
            title: compile_all(&config.title)?,
            company: compile_all(&config.company)?,
            location: compile_all(&config.location)?,
            date_posted: compile(&config.date_posted)?,
        })
    }

    pub fn parse(&self, html: &str) -> Vec<JobPosting> {
        let document = Html::parse_document(html);

        document
            .select(&self.card)
            .filter_map(|card| {
                let title = Self::first_text(card, &self.title);
                if title.is_empty() {
                    return None;
                }

                Some(JobPosting {
                    title,
                    company: Self::first_text(card, &self.company),
                    location: Self::first_text(card, &self.location),
                    date_posted: self.date_posted(card),
                })
            })
            .collect()
    }

    fn first_text(card: ElementRef<'_>, candidates: &[Selector]) -> String {
        candidates
            .iter()
            .find_map(|selector| card.select(selector).next())
            .map(element_text)
            .unwrap_or_default()
    }

    // datetime 屬性優先，其次才是文字內容
    fn date_posted(&self, card: ElementRef<'_>) -> String {
        let Some(time) = card.select(&self.date_posted).next() else {
            return String::new();
        };

        match time.value().attr("datetime").map(str::trim) {
            Some(datetime) if !datetime.is_empty() => datetime.to_string(),
            _ => element_text(time),
        }
    }
}
