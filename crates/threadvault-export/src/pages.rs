//! HTML page rendering

use crate::formatters::{format_date, format_display_name, format_text};
use serde_json::Value;
use threadvault_core::prelude::*;
use threadvault_core::escape_html;

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="ja">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title}</title>
<link rel="stylesheet" href="/main.css">
</head>
<body>
{body}
</body>
</html>
"#,
        title = escape_html(title),
        body = body
    )
}

fn field_str<'a>(fields: &'a Fields, key: &str) -> Option<&'a str> {
    fields.get(key).and_then(Value::as_str)
}

fn tweet_meta(fields: &Fields) -> String {
    match field_str(fields, "date") {
        Some(date) => format!(r#"<time class="tweet-date">{}</time>"#, format_date(date)),
        None => String::new(),
    }
}

fn document_href(document_id: &str) -> String {
    format!("/document/{}", escape_html(document_id))
}

fn tweet_href(document_id: &str, tweet_id: &str) -> String {
    format!(
        "/document/{}/{}.html",
        escape_html(document_id),
        escape_html(tweet_id)
    )
}

/// Top-level page listing every document
pub fn render_index(dataset: &Dataset) -> String {
    let items: String = dataset
        .documents()
        .map(|(id, document)| {
            let name = format_display_name(document.display_name.as_deref());
            let label = if name.is_empty() { id.to_string() } else { name };
            format!(
                r#"<li class="document-item"><a href="{}/">{}</a> <span class="tweet-count">{}</span></li>"#,
                document_href(id),
                escape_html(&label),
                document.tweets.len()
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    layout(
        "Documents",
        &format!("<h1>Documents</h1>\n<ul class=\"document-list\">\n{}\n</ul>", items),
    )
}

/// Page for one document with all of its tweets in order
pub fn render_document(document_id: &str, document: &Document) -> String {
    let name = format_display_name(document.display_name.as_deref());
    let tweets: String = document
        .tweets
        .iter()
        .map(|tweet| {
            format!(
                r#"<article class="tweet" id="tweet-{id}">
<a class="tweet-link" href="{href}">{meta}</a>
<div class="tweet-text">{text}</div>
</article>"#,
                id = escape_html(&tweet.id),
                href = tweet_href(document_id, &tweet.id),
                meta = tweet_meta(&tweet.fields),
                text = format_text(tweet.text()),
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let account = document
        .account_id
        .as_deref()
        .map(|a| format!(r#"<p class="account-id">@{}</p>"#, escape_html(a)))
        .unwrap_or_default();

    layout(
        &name,
        &format!(
            "<a class=\"back-link\" href=\"/\">Back</a>\n<h1>{}</h1>\n{}\n<section class=\"tweets\">\n{}\n</section>",
            escape_html(&name),
            account,
            tweets
        ),
    )
}

fn render_linked(link: &ResolvedLink) -> String {
    let label = field_str(&link.fields, "label")
        .or_else(|| field_str(&link.fields, "title"))
        .unwrap_or(&link.url);

    let content = match &link.content {
        Some(target) => {
            let source = format_display_name(target.document.display_name.as_deref());
            format!(
                r#"<blockquote class="linked-tweet">
<p class="linked-source">{source}</p>
<div class="tweet-text">{text}</div>
</blockquote>"#,
                source = escape_html(&source),
                text = format_text(field_str(&target.fields, "text")),
            )
        }
        None => r#"<p class="link-unavailable">Link target unavailable</p>"#.to_string(),
    };

    let href = match link.content.as_ref().zip(PathKey::parse(&link.url)) {
        Some((_, key)) => tweet_href(&key.document_id, &key.tweet_id),
        None => "#".to_string(),
    };

    format!(
        r#"<li class="tweet-link-item"><a href="{href}">{label}</a>
{content}
</li>"#,
        href = href,
        label = escape_html(label),
        content = content
    )
}

/// Page for one tweet with its resolved outbound links
pub fn render_tweet(tweet: &ResolvedTweet, current_url: &str, back_url: &str) -> String {
    let name = format_display_name(tweet.document.display_name.as_deref());

    let links = match &tweet.links {
        Some(links) => format!(
            "<ul class=\"tweet-links\">\n{}\n</ul>",
            links.iter().map(render_linked).collect::<Vec<_>>().join("\n")
        ),
        None => String::new(),
    };

    layout(
        &name,
        &format!(
            r#"<a class="back-link" href="{back}">Back</a>
<article class="tweet" data-url="{current}">
<h1>{name}</h1>
{meta}
<div class="tweet-text">{text}</div>
{links}
</article>"#,
            back = escape_html(back_url),
            current = escape_html(current_url),
            name = escape_html(&name),
            meta = tweet_meta(&tweet.fields),
            text = format_text(field_str(&tweet.fields, "text")),
            links = links,
        ),
    )
}
