use crate::adapters::http::HttpFetcher;
use crate::config::toml_config::RequestConfig;
use crate::core::parser::element_text_spaced;
use crate::domain::model::{MissionOutcome, MissionResult};
use crate::utils::error::Result;
use crate::utils::text::{collapse_whitespace, find_sentence_containing, truncate_chars};
use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;
use std::io::Write;
use std::sync::LazyLock;

pub const DEFAULT_XULA_URL: &str = "https://www.xula.edu/about/mission-values.html";
pub const DEFAULT_OTHER_URL: &str = "https://tulane.edu/about/mission-vision-values";
pub const MISSION_USER_AGENT: &str = "Mozilla/5.0 (compatible; mission-scraper/1.0)";

const FALLBACK_CHARS: usize = 2000;
const FOUNDER_PHRASE: &str = "founded by Saint";
const KEYWORDS: [&str; 3] = ["mission", "purpose", "vision"];
const SIBLING_WINDOW: usize = 6;
const HEADINGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];
const CONTENT_SELECTORS: [&str; 5] = ["main", "article", "section", "div.content", "div#content"];

struct Selectors {
    editorarea: Selector,
    paragraph: Selector,
    headings: Vec<Selector>,
    content: Vec<Selector>,
}

// 固定的選擇器字串，解析失敗代表程式錯誤
static SELECTORS: LazyLock<Selectors> = LazyLock::new(|| {
    let parse = |s: &str| Selector::parse(s).expect("static selector");
    Selectors {
        editorarea: parse("div.editorarea"),
        paragraph: parse("p"),
        headings: HEADINGS.iter().map(|h| parse(h)).collect(),
        content: CONTENT_SELECTORS.iter().map(|c| parse(c)).collect(),
    }
});

fn contains_keyword(text: &str) -> bool {
    let lower = text.to_lowercase();
    KEYWORDS.iter().any(|k| lower.contains(k))
}

/// CMS pages keep body copy in `div.editorarea`; prefer the founding sentence.
fn from_editorarea(document: &Html) -> Option<String> {
    let blocks: Vec<String> = document
        .select(&SELECTORS.editorarea)
        .map(element_text_spaced)
        .collect();
    if blocks.is_empty() {
        return None;
    }

    let combined = blocks.join(" ");
    if let Some(sentence) = find_sentence_containing(&combined, FOUNDER_PHRASE) {
        return Some(sentence);
    }

    let snippet = truncate_chars(&combined, FALLBACK_CHARS).trim();
    (!snippet.is_empty()).then(|| snippet.to_string())
}

/// Text of the `p`/`div` blocks following the first keyword heading.
fn from_keyword_heading(document: &Html) -> Option<String> {
    for heading_selector in &SELECTORS.headings {
        for heading in document.select(heading_selector) {
            if !contains_keyword(&element_text_spaced(heading)) {
                continue;
            }

            let paragraphs: Vec<String> = heading
                .next_siblings()
                .filter_map(ElementRef::wrap)
                .take(SIBLING_WINDOW)
                .filter(|sib| matches!(sib.value().name(), "p" | "div"))
                .map(element_text_spaced)
                .filter(|text| !text.is_empty())
                .collect();

            if !paragraphs.is_empty() {
                return Some(paragraphs.join(" "));
            }
        }
    }

    document
        .select(&SELECTORS.paragraph)
        .map(element_text_spaced)
        .find(|text| contains_keyword(text))
}

/// Largest main-content block, else the start of the page text.
fn from_main_content(document: &Html) -> Option<String> {
    let largest = SELECTORS
        .content
        .iter()
        .filter_map(|selector| document.select(selector).next())
        .map(element_text_spaced)
        .fold(None::<String>, |best, text| match best {
            // 以字元數比較，多位元組文字才不會被高估
            Some(b) if b.chars().count() >= text.chars().count() => Some(b),
            _ => Some(text),
        });

    let text = match largest {
        Some(text) => text,
        None => {
            let page = collapse_whitespace(&document.root_element().text().collect::<Vec<_>>().join(" "));
            truncate_chars(&page, FALLBACK_CHARS).to_string()
        }
    };

    (!text.is_empty()).then_some(text)
}

/// Runs the extraction strategies in order; the first non-empty result wins.
pub fn extract_mission(html: &str) -> Option<String> {
    let document = Html::parse_document(html);

    from_editorarea(&document)
        .or_else(|| from_keyword_heading(&document))
        .or_else(|| from_main_content(&document))
}

pub struct MissionScraper {
    fetcher: HttpFetcher,
}

impl MissionScraper {
    pub fn new() -> Result<Self> {
        let config = RequestConfig {
            timeout_seconds: 15,
            retry_attempts: 0,
            retry_delay_ms: 0,
            user_agent: MISSION_USER_AGENT.to_string(),
            headers: HashMap::new(),
        };
        Self::with_config(&config)
    }

    pub fn with_config(config: &RequestConfig) -> Result<Self> {
        Ok(Self {
            fetcher: HttpFetcher::new(config)?,
        })
    }

    /// Never fails: request and extraction problems are reported inside the result.
    pub async fn scrape(&self, url: &str) -> MissionResult {
        let html = match self.fetcher.fetch_html(url).await {
            Ok(html) => html,
            Err(e) => {
                tracing::warn!("⚠️ Mission request failed for {}: {}", url, e);
                return MissionResult::error(url, format!("Request failed: {}", e));
            }
        };

        match extract_mission(&html) {
            Some(text) => MissionResult::mission(url, text),
            None => MissionResult::error(url, "No mission-like content found"),
        }
    }
}

pub fn write_report<W: Write>(out: &mut W, results: &[MissionResult]) -> std::io::Result<()> {
    let rule = "-".repeat(72);
    for result in results {
        writeln!(out, "{}", rule)?;
        writeln!(out, "URL: {}", result.url)?;
        match &result.outcome {
            MissionOutcome::Error(message) => writeln!(out, "Error: {}", message)?,
            MissionOutcome::Mission(text) => {
                writeln!(out, "Mission snippet:")?;
                writeln!(out, "{}", text)?;
            }
        }
    }
    writeln!(out, "{}", rule)?;
    out.flush()
}
