//! Rendered documents are deterministic, keep a fixed key order, and parse
//! back as YAML whatever the article text contains.

use blogsync_core::{schema::validate_content, ArticleContent};
use blogsync_renderer::{Renderer, FRONT_MATTER_KEYS};
use rstest::rstest;
use serde_json::json;

fn article(title: &str, description: &str, body: &str) -> ArticleContent {
    validate_content(&json!({
        "type_of": "article",
        "id": 501,
        "title": title,
        "description": description,
        "readable_publish_date": "May 5",
        "slug": "quoting-things-3kd9",
        "path": "/jane/quoting-things-3kd9",
        "url": "https://dev.to/jane/quoting-things-3kd9",
        "comments_count": 0,
        "public_reactions_count": 4,
        "collection_id": null,
        "published_timestamp": "2024-05-05T12:00:00Z",
        "positive_reactions_count": 4,
        "cover_image": "https://cdn.example.com/cover.png",
        "social_image": "https://cdn.example.com/social.png",
        "canonical_url": "https://jane.dev/quoting-things",
        "created_at": "2024-05-04T12:00:00Z",
        "edited_at": "2024-05-06T12:00:00Z",
        "crossposted_at": null,
        "published_at": "2024-05-05T12:00:00Z",
        "last_comment_at": "2024-05-05T12:00:00Z",
        "reading_time_minutes": 2,
        "tag_list": "yaml, rust , escaping",
        "tags": ["yaml", "rust", "escaping"],
        "body_html": "<p>x</p>",
        "body_markdown": body
    }))
    .expect("fixture is valid")
}

/// Split a rendered document into (front-matter YAML, body).
fn split(doc: &str) -> (&str, &str) {
    let rest = doc.strip_prefix("---\n").expect("opening delimiter");
    let end = rest.find("\n---\n\n").expect("closing delimiter");
    (&rest[..end + 1], &rest[end + "\n---\n\n".len()..])
}

#[test]
fn rendering_twice_is_byte_identical() {
    let renderer = Renderer::new().unwrap();
    let content = article("Same", "Same", "# Same\n");
    let a = renderer.render(&content).unwrap();
    let b = renderer.render(&content).unwrap();
    assert_eq!(a.content.as_bytes(), b.content.as_bytes());
}

#[test]
fn keys_appear_in_fixed_order() {
    let renderer = Renderer::new().unwrap();
    let doc = renderer.render(&article("T", "D", "B")).unwrap();
    let (front, _) = split(&doc.content);
    let keys: Vec<&str> = front
        .lines()
        .map(|line| line.split_once(':').expect("key: value").0)
        .collect();
    assert_eq!(keys, FRONT_MATTER_KEYS);
}

#[rstest]
#[case::double_quotes(r#"The "best" parser"#)]
#[case::backslash(r"C:\path\to")]
#[case::colon_and_hash("Rust: part #2")]
#[case::newline("two\nlines")]
#[case::unicode("Ünïcödé ✨")]
#[case::noncharacter("bad\u{FFFE}title")]
#[case::line_separator("one\u{2028}two")]
fn awkward_titles_survive_yaml_roundtrip(#[case] title: &str) {
    let renderer = Renderer::new().unwrap();
    let doc = renderer
        .render(&article(title, &format!("about {title}"), "body"))
        .unwrap();
    let (front, _) = split(&doc.content);
    let parsed: serde_yaml::Value = serde_yaml::from_str(front).expect("valid YAML");
    assert_eq!(parsed["title"].as_str(), Some(title));
    assert_eq!(
        parsed["description"].as_str(),
        Some(format!("about {title}").as_str())
    );
}

#[rstest]
#[case::lone_colon(":")]
#[case::boolean_word("true")]
#[case::float_literal("1e3")]
#[case::free_text("last week: maybe")]
fn odd_timestamps_stay_strings(#[case] raw: &str) {
    let renderer = Renderer::new().unwrap();
    let mut content = article("T", "D", "B");
    content.meta.last_comment_at = raw.to_owned();
    let doc = renderer.render(&content).unwrap();
    let (front, _) = split(&doc.content);
    let parsed: serde_yaml::Value = serde_yaml::from_str(front).expect("valid YAML");
    assert_eq!(parsed["last_comment_at"].as_str(), Some(raw));
}

#[test]
fn tags_come_from_split_tag_list_in_order() {
    let renderer = Renderer::new().unwrap();
    let doc = renderer.render(&article("T", "D", "B")).unwrap();
    let (front, _) = split(&doc.content);
    let parsed: serde_yaml::Value = serde_yaml::from_str(front).expect("valid YAML");
    let tags: Vec<&str> = parsed["tags"]
        .as_sequence()
        .expect("sequence")
        .iter()
        .filter_map(|t| t.as_str())
        .collect();
    assert_eq!(tags, vec!["yaml", "rust", "escaping"]);
}

#[test]
fn null_dates_are_yaml_null_and_present_dates_are_not() {
    let renderer = Renderer::new().unwrap();
    let doc = renderer.render(&article("T", "D", "B")).unwrap();
    let (front, _) = split(&doc.content);
    let parsed: serde_yaml::Value = serde_yaml::from_str(front).expect("valid YAML");
    assert!(parsed["crosspostedAt"].is_null());
    assert!(!parsed["editedAt"].is_null());
    assert!(!doc.content.contains("undefined"));
}

#[test]
fn body_is_passed_through_verbatim() {
    let renderer = Renderer::new().unwrap();
    let body = "---\ntitle: fake\n---\r\n\n```rust\nfn main() {}\n```\n";
    let doc = renderer.render(&article("T", "D", body)).unwrap();
    let (_, rendered_body) = split(&doc.content);
    assert_eq!(rendered_body, body);
}
