//! Job ingestion: turns raw text or a fetched posting into a title and a
//! stored description.

use lazy_static::lazy_static;
use regex::Regex;
use reqwest::Url;
use scraper::{Html, Node};
use serde::Deserialize;

use crate::errors::AppError;
use crate::jobs::fetch::PageFetcher;

/// Descriptions are truncated to this many characters before storage.
pub const MAX_DESCRIPTION_CHARS: usize = 20_000;
const MAX_TITLE_CHARS: usize = 120;
const MIN_TITLE_CHARS: usize = 2;
const MIN_DESCRIPTION_CHARS: usize = 5;
pub const UNTITLED_ROLE: &str = "Untitled role";

const SKIPPED_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

lazy_static! {
    static ref TITLE_RE: Regex =
        Regex::new(r"(?i)(?:job\s*)?title\s*[:\-]\s*(.+)").expect("valid regex");
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeJobRequest {
    pub user_id: uuid::Uuid,
    pub jd_text: Option<String>,
    pub url: Option<String>,
}

/// Title and description ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDraft {
    pub title: String,
    pub description: String,
}

/// Resolves the request to job text (fetching the URL if one is given),
/// then derives the title and the stored description.
pub async fn prepare_job(
    request: &AnalyzeJobRequest,
    fetcher: &dyn PageFetcher,
) -> Result<JobDraft, AppError> {
    let jd_text = request.jd_text.as_deref().filter(|t| !t.is_empty());
    let url = request.url.as_deref().filter(|u| !u.is_empty());

    let text = match (url, jd_text) {
        (None, None) => {
            return Err(AppError::UnprocessableEntity(
                "Provide either jd_text or url".to_string(),
            ))
        }
        (Some(url), _) => fetch_job_text(url, fetcher).await?,
        (None, Some(text)) => text.to_string(),
    };

    if text.trim().chars().count() < MIN_DESCRIPTION_CHARS {
        return Err(AppError::Validation(
            "Job description appears to be empty".to_string(),
        ));
    }

    Ok(JobDraft {
        title: guess_title(&text),
        description: text.chars().take(MAX_DESCRIPTION_CHARS).collect(),
    })
}

async fn fetch_job_text(raw_url: &str, fetcher: &dyn PageFetcher) -> Result<String, AppError> {
    let url = parse_http_url(raw_url)?;
    let page = fetcher
        .fetch(&url)
        .await
        .map_err(|e| AppError::Validation(format!("Error fetching URL: {e}")))?;

    if page.status != 200 || page.body.is_empty() {
        return Err(AppError::Validation(format!(
            "Failed to fetch URL (status {})",
            page.status
        )));
    }
    Ok(strip_html(&page.body))
}

fn parse_http_url(raw: &str) -> Result<Url, AppError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| AppError::UnprocessableEntity(format!("url is not a valid URL: {e}")))?;
    match url.scheme() {
        "http" | "https" if url.host_str().is_some() => Ok(url),
        _ => Err(AppError::UnprocessableEntity(
            "url must be an http(s) URL".to_string(),
        )),
    }
}

/// Visible text of an HTML document: script/style content dropped, entities
/// decoded, whitespace collapsed to single spaces.
pub fn strip_html(html: &str) -> String {
    let document = Html::parse_document(html);
    let mut pieces: Vec<&str> = Vec::new();

    for node in document.tree.nodes() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let hidden = node.ancestors().any(|a| {
            a.value()
                .as_element()
                .is_some_and(|e| SKIPPED_ELEMENTS.contains(&e.name()))
        });
        if !hidden {
            pieces.push(&**text);
        }
    }

    pieces
        .iter()
        .flat_map(|p| p.split_whitespace())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Prefers an explicit "Title:" / "Job title -" line; otherwise the first
/// short fragment of the text.
pub fn guess_title(text: &str) -> String {
    if let Some(caps) = TITLE_RE.captures(text) {
        let title: String = caps[1].trim().chars().take(MAX_TITLE_CHARS).collect();
        if !title.is_empty() {
            return title;
        }
    }

    text.split(['\n', '.'])
        .map(str::trim)
        .find(|s| (MIN_TITLE_CHARS..=MAX_TITLE_CHARS).contains(&s.chars().count()))
        .map(String::from)
        .unwrap_or_else(|| UNTITLED_ROLE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::test_support::StaticPageFetcher;
    use uuid::Uuid;

    fn request(jd_text: Option<&str>, url: Option<&str>) -> AnalyzeJobRequest {
        AnalyzeJobRequest {
            user_id: Uuid::new_v4(),
            jd_text: jd_text.map(String::from),
            url: url.map(String::from),
        }
    }

    fn fetcher(status: u16, body: &str) -> StaticPageFetcher {
        StaticPageFetcher {
            status,
            body: body.to_string(),
        }
    }

    struct FailingFetcher;

    #[async_trait::async_trait]
    impl PageFetcher for FailingFetcher {
        async fn fetch(&self, _url: &Url) -> anyhow::Result<crate::jobs::fetch::FetchedPage> {
            Err(anyhow::anyhow!("connection refused"))
        }
    }

    #[test]
    fn test_strip_html_drops_scripts_styles_and_tags() {
        let html = r#"<html><head><title>Careers</title>
            <style>.x { color: red }</style>
            <script>var secret = "tracking";</script></head>
            <body><h1>Backend&nbsp;Engineer</h1>
            <p>Rust &amp; Postgres,
               <b>remote</b>.</p><noscript>enable js</noscript></body></html>"#;
        let text = strip_html(html);
        assert_eq!(text, "Careers Backend Engineer Rust & Postgres, remote .");
        assert!(!text.contains("secret"));
        assert!(!text.contains("color"));
    }

    #[test]
    fn test_strip_html_plain_text_passthrough() {
        assert_eq!(strip_html("  just\n\ttext  "), "just text");
    }

    #[test]
    fn test_guess_title_prefers_explicit_title_line() {
        let text = "Acme Corp is hiring\nJob Title: Staff Platform Engineer\nRemote";
        assert_eq!(guess_title(text), "Staff Platform Engineer");
        assert_eq!(guess_title("title - Data Analyst"), "Data Analyst");
    }

    #[test]
    fn test_guess_title_falls_back_to_first_short_fragment() {
        let text = "\n\nSenior Rust Engineer. We build databases.";
        assert_eq!(guess_title(text), "Senior Rust Engineer");
    }

    #[test]
    fn test_guess_title_truncates_long_title_line() {
        let text = format!("Title: {}", "x".repeat(300));
        assert_eq!(guess_title(&text).chars().count(), 120);
    }

    #[test]
    fn test_guess_title_untitled_when_nothing_fits() {
        assert_eq!(guess_title("a"), UNTITLED_ROLE);
        assert_eq!(guess_title(&"y".repeat(200)), UNTITLED_ROLE);
    }

    #[tokio::test]
    async fn test_prepare_job_requires_text_or_url() {
        let err = prepare_job(&request(None, None), &fetcher(200, "x"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UnprocessableEntity(_)));

        let err = prepare_job(&request(Some(""), Some("")), &fetcher(200, "x"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::UnprocessableEntity(_)));
    }

    #[tokio::test]
    async fn test_prepare_job_from_text() {
        let draft = prepare_job(
            &request(Some("Title: Backend Engineer\nPython, SQL, Docker"), None),
            &fetcher(500, ""),
        )
        .await
        .unwrap();
        assert_eq!(draft.title, "Backend Engineer");
        assert_eq!(draft.description, "Title: Backend Engineer\nPython, SQL, Docker");
    }

    #[tokio::test]
    async fn test_prepare_job_rejects_near_empty_text() {
        let err = prepare_job(&request(Some("  abc  "), None), &fetcher(200, ""))
            .await
            .unwrap_err();
        match err {
            AppError::Validation(msg) => assert_eq!(msg, "Job description appears to be empty"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_prepare_job_truncates_description() {
        let long = "word ".repeat(10_000);
        let draft = prepare_job(&request(Some(&long), None), &fetcher(200, ""))
            .await
            .unwrap();
        assert_eq!(draft.description.chars().count(), MAX_DESCRIPTION_CHARS);
    }

    #[tokio::test]
    async fn test_prepare_job_url_wins_over_text() {
        let page = "<html><body><h1>Job title: SRE</h1><p>Kubernetes on-call</p></body></html>";
        let draft = prepare_job(
            &request(Some("ignored text body"), Some("https://jobs.example.com/42")),
            &fetcher(200, page),
        )
        .await
        .unwrap();
        assert_eq!(draft.description, "Job title: SRE Kubernetes on-call");
        assert_eq!(draft.title, "SRE Kubernetes on-call");
    }

    #[tokio::test]
    async fn test_prepare_job_non_200_is_bad_input() {
        let err = prepare_job(
            &request(None, Some("https://jobs.example.com/404")),
            &fetcher(404, "not found"),
        )
        .await
        .unwrap_err();
        match err {
            AppError::Validation(msg) => assert_eq!(msg, "Failed to fetch URL (status 404)"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_prepare_job_transport_error_is_bad_input() {
        let err = prepare_job(&request(None, Some("http://localhost:9/")), &FailingFetcher)
            .await
            .unwrap_err();
        match err {
            AppError::Validation(msg) => {
                assert!(msg.starts_with("Error fetching URL:"), "{msg}");
                assert!(msg.contains("connection refused"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_prepare_job_rejects_non_http_url() {
        for url in ["ftp://example.com/job", "not a url"] {
            let err = prepare_job(&request(None, Some(url)), &fetcher(200, "x"))
                .await
                .unwrap_err();
            assert!(matches!(err, AppError::UnprocessableEntity(_)), "{url}");
        }
    }
}
