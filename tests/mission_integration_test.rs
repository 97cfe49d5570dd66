use httpmock::prelude::*;
use job_search_scraper::config::toml_config::RequestConfig;
use job_search_scraper::core::mission::{MissionScraper, MISSION_USER_AGENT};
use job_search_scraper::domain::model::MissionOutcome;

fn scraper() -> MissionScraper {
    let config = RequestConfig {
        timeout_seconds: 5,
        retry_attempts: 0,
        user_agent: MISSION_USER_AGENT.to_string(),
        ..RequestConfig::default()
    };
    MissionScraper::with_config(&config).unwrap()
}

#[tokio::test]
async fn test_scrape_mission_page() {
    let server = MockServer::start();
    let page = server.mock(|when, then| {
        when.method(GET)
            .path("/about/mission-values.html")
            .header("user-agent", MISSION_USER_AGENT);
        then.status(200).body(
            r#"<html><body><div class="editorarea">
            <p>Xavier University of Louisiana, founded by Saint Katharine Drexel, is Catholic. It prepares leaders.</p>
            </div></body></html>"#,
        );
    });

    let result = scraper().scrape(&server.url("/about/mission-values.html")).await;

    page.assert();
    assert_eq!(
        result.outcome,
        MissionOutcome::Mission(
            "Xavier University of Louisiana, founded by Saint Katharine Drexel, is Catholic.".to_string()
        )
    );
}

#[tokio::test]
async fn test_request_failure_is_reported_in_result() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/missing");
        then.status(404);
    });

    let url = server.url("/missing");
    let result = scraper().scrape(&url).await;

    assert!(result.is_error());
    assert_eq!(result.url, url);
    match result.outcome {
        MissionOutcome::Error(message) => assert!(message.starts_with("Request failed:")),
        other => panic!("expected error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_empty_page_has_no_mission() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/blank");
        then.status(200).body("<html><body></body></html>");
    });

    let result = scraper().scrape(&server.url("/blank")).await;
    assert_eq!(
        result.outcome,
        MissionOutcome::Error("No mission-like content found".to_string())
    );
}
