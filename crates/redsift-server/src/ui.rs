//! Server-rendered search page.

use axum::{
    extract::{Query, State},
    response::Html,
};
use redsift_pipeline::{fetch_posts, Cell, Record, SOURCE_GROUP_COLUMN};
use serde::Deserialize;

use crate::api::AppState;

const DEFAULT_QUERY: &str = "fastapi";

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SearchParams {
    query: Option<String>,
    fetch: Option<String>,
}

/// Outcome shown under the search form.
#[derive(Debug)]
pub(crate) enum SearchOutcome {
    Prompt,
    Found(Vec<Record>),
    Empty,
    Failed(String),
}

pub(crate) async fn search_page(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Html<String> {
    let query = params.query.unwrap_or_else(|| DEFAULT_QUERY.to_string());

    let outcome = if params.fetch.is_none() {
        SearchOutcome::Prompt
    } else {
        let settings = state.fetch.with_post_limit(state.ui_post_limit);
        match fetch_posts(state.source.as_ref(), &query, &settings).await {
            Ok(records) if records.is_empty() => SearchOutcome::Empty,
            Ok(records) => SearchOutcome::Found(records),
            Err(e) => {
                tracing::warn!(query = %query, error = %e, "search page fetch failed");
                SearchOutcome::Failed(e.to_string())
            }
        }
    };

    Html(render_search_page(&query, &outcome))
}

pub(crate) fn render_search_page(query: &str, outcome: &SearchOutcome) -> String {
    let results = match outcome {
        SearchOutcome::Prompt => r#"<p class="notice info">Enter a query and click "Fetch posts" to get results.</p>"#.to_string(),
        SearchOutcome::Empty => {
            r#"<p class="notice error">No posts found for the provided query.</p>"#.to_string()
        }
        SearchOutcome::Failed(message) => format!(
            r#"<p class="notice error">An error occurred while fetching posts: {}</p>"#,
            html_escape(message)
        ),
        SearchOutcome::Found(records) => {
            let mut cards = format!(
                r#"<p class="notice success">Found {} posts for the query "{}"!</p>"#,
                records.len(),
                html_escape(query)
            );
            for record in records {
                cards.push_str(&render_card(record));
            }
            cards
        }
    };

    let content = format!(
        r#"<div class="container">
<h1>Reddit Scraper</h1>
<p>Enter a search query to fetch the latest posts from Reddit.</p>
<form method="get" action="/">
    <input type="text" name="query" value="{query}" aria-label="Search query">
    <button type="submit" name="fetch" value="1">Fetch posts</button>
</form>
{results}
</div>"#,
        query = html_escape(query),
    );

    build_page("Reddit Scraper", &content)
}

fn cell_text(record: &Record, key: &str) -> String {
    record.get(key).map(Cell::to_string).unwrap_or_default()
}

fn render_card(record: &Record) -> String {
    let link = match record.get("url") {
        Some(Cell::Text(url)) if !url.is_empty() => format!(
            r#"<a href="{}" target="_blank" rel="noopener">Link</a>"#,
            html_escape(url)
        ),
        _ => String::new(),
    };

    let mut extra = String::new();
    for (key, cell) in record.iter() {
        if matches!(
            key,
            "title" | "url" | "body" | "score" | "comment_count" | "created_at"
        ) || key == SOURCE_GROUP_COLUMN
        {
            continue;
        }
        extra.push_str(&format!(
            "<span><strong>{}:</strong> {}</span>",
            html_escape(key),
            html_escape(&cell.to_string())
        ));
    }

    format!(
        r#"<div class="post-card">
    <div class="group">{group}</div>
    <h3>{title}</h3>
    <div class="meta-row"><span>Score: {score}</span><span>Comments: {comments}</span><span>Created at: {created}</span>{link}</div>
    <p class="body">{body}</p>
    <div class="meta-row">{extra}</div>
</div>"#,
        group = html_escape(&cell_text(record, SOURCE_GROUP_COLUMN)),
        title = html_escape(&cell_text(record, "title")),
        score = html_escape(&cell_text(record, "score")),
        comments = html_escape(&cell_text(record, "comment_count")),
        created = html_escape(&cell_text(record, "created_at")),
        body = html_escape(&cell_text(record, "body")),
    )
}

fn build_page(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>
*{{margin:0;padding:0;box-sizing:border-box;}}
body{{font-family:-apple-system,BlinkMacSystemFont,"Segoe UI",Roboto,sans-serif;color:#1a1a1a;background:#fafafa;}}
.container{{max-width:860px;margin:0 auto;padding:24px;}}
h1{{font-size:24px;margin-bottom:8px;}}
form{{display:flex;gap:8px;margin:16px 0;}}
form input{{flex:1;padding:8px;border:1px solid #ccc;border-radius:4px;font-size:14px;}}
form button{{padding:8px 16px;border:none;border-radius:4px;background:#ff4500;color:#fff;font-weight:600;cursor:pointer;}}
.notice{{padding:10px 12px;border-radius:4px;margin-bottom:16px;font-size:14px;}}
.notice.info{{background:#e3f2fd;color:#1565c0;}}
.notice.success{{background:#e8f5e9;color:#2e7d32;}}
.notice.error{{background:#ffebee;color:#c62828;}}
.post-card{{background:#fff;border:1px solid #e0e0e0;border-radius:8px;padding:16px;margin-bottom:12px;}}
.post-card .group{{font-size:12px;font-weight:600;color:#ff4500;margin-bottom:4px;}}
.post-card h3{{font-size:16px;margin-bottom:6px;}}
.post-card .body{{color:#555;font-size:14px;margin:8px 0;white-space:pre-wrap;}}
.meta-row{{display:flex;flex-wrap:wrap;gap:12px;font-size:12px;color:#666;}}
</style>
</head>
<body>
{content}
</body>
</html>"#
    )
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> Record {
        let mut record = Record::new();
        record.insert(SOURCE_GROUP_COLUMN, Cell::Text("testsub".into()));
        record.insert("title", Cell::Text("<b>Test Post</b>".into()));
        record.insert("score", Cell::Integer(10));
        record.insert("url", Cell::Text("http://example.com".into()));
        record.insert("author", Cell::Text("alice".into()));
        record
    }

    #[test]
    fn prompt_page_prefills_query() {
        let html = render_search_page("fastapi", &SearchOutcome::Prompt);
        assert!(html.contains(r#"value="fastapi""#));
        assert!(html.contains("Fetch posts"));
    }

    #[test]
    fn found_page_renders_escaped_cards() {
        let html = render_search_page("rust", &SearchOutcome::Found(vec![record()]));
        assert!(html.contains(r#"Found 1 posts for the query "rust"!"#));
        assert!(html.contains("&lt;b&gt;Test Post&lt;/b&gt;"));
        assert!(!html.contains("<b>Test Post</b>"));
        assert!(html.contains(r#"href="http://example.com""#));
        assert!(html.contains("<strong>author:</strong> alice"));
    }

    #[test]
    fn query_is_escaped_in_form() {
        let html = render_search_page(r#""><script>"#, &SearchOutcome::Empty);
        assert!(!html.contains("<script>"));
        assert!(html.contains("No posts found"));
    }

    #[test]
    fn failure_message_is_shown() {
        let html = render_search_page("x", &SearchOutcome::Failed("boom".into()));
        assert!(html.contains("An error occurred while fetching posts: boom"));
    }
}
