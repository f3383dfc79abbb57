//! Document context — front-matter scalars prepared from [`ArticleContent`].
//!
//! Every field arrives here already formatted as a YAML scalar; the template
//! only concatenates.

use serde::Serialize;

use blogsync_core::types::ArticleContent;

use crate::error::RenderError;

/// YAML literal written for an optional timestamp the API sent as `null`.
pub const ABSENT: &str = "null";

/// Flat rendering payload; field names match the template placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentContext {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub path: String,
    pub url: String,
    pub comments_count: u64,
    pub public_reactions_count: u64,
    pub published_timestamp: String,
    pub positive_reactions_count: u64,
    pub cover_image: String,
    pub social_image: String,
    pub canonical_url: String,
    pub created_at: String,
    pub edited_at: String,
    pub crossposted_at: String,
    pub published_at: String,
    pub last_comment_at: String,
    pub reading_time_minutes: u64,
    /// Flow sequence, e.g. `["rust", "cli"]`.
    pub tags: String,
    /// `body_markdown`, untouched.
    pub body: String,
}

impl DocumentContext {
    pub fn from_content(content: &ArticleContent) -> Self {
        let meta = &content.meta;
        DocumentContext {
            id: meta.id.0,
            title: quoted(&meta.title),
            description: quoted(&meta.description),
            path: quoted(&meta.path),
            url: quoted(&meta.url),
            comments_count: meta.comments_count,
            public_reactions_count: meta.public_reactions_count,
            published_timestamp: timestamp(&meta.published_timestamp),
            positive_reactions_count: meta.positive_reactions_count,
            cover_image: quoted(&meta.cover_image),
            social_image: quoted(&meta.social_image),
            canonical_url: quoted(&meta.canonical_url),
            created_at: timestamp(&meta.created_at),
            edited_at: optional_timestamp(meta.edited_at.as_deref()),
            crossposted_at: optional_timestamp(meta.crossposted_at.as_deref()),
            published_at: timestamp(&meta.published_at),
            last_comment_at: timestamp(&meta.last_comment_at),
            reading_time_minutes: meta.reading_time_minutes,
            tags: tag_sequence(&content.tag_list),
            body: content.body_markdown.clone(),
        }
    }

    /// Convert to a [`tera::Context`].
    pub fn to_tera_context(&self) -> Result<tera::Context, RenderError> {
        Ok(tera::Context::from_serialize(self)?)
    }
}

// ---------------------------------------------------------------------------
// Scalar formatting
// ---------------------------------------------------------------------------

/// Double-quoted YAML scalar. `\`, `"` and every character outside the YAML
/// printable set are escaped, as are the Unicode line and paragraph
/// separators, which YAML would otherwise fold.
pub fn quoted(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 2);
    out.push('"');
    for ch in raw.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if is_yaml_printable(c) => out.push(c),
            c if (c as u32) <= 0xFF => out.push_str(&format!("\\x{:02X}", c as u32)),
            c => out.push_str(&format!("\\u{:04X}", c as u32)),
        }
    }
    out.push('"');
    out
}

/// YAML 1.2 `c-printable`, minus the BOM and the two separators libyaml
/// treats as line breaks.
fn is_yaml_printable(c: char) -> bool {
    matches!(
        c,
        '\u{20}'..='\u{7E}'
            | '\u{A0}'..='\u{2027}'
            | '\u{202A}'..='\u{D7FF}'
            | '\u{E000}'..='\u{FEFE}'
            | '\u{FF00}'..='\u{FFFD}'
            | '\u{10000}'..='\u{10FFFF}'
    )
}

/// Timestamps are written bare so the site build reads them as dates. Only an
/// ISO-8601 date or date-time stays bare; anything else is a quoted string.
pub fn timestamp(raw: &str) -> String {
    if is_iso_datetime(raw) {
        raw.to_owned()
    } else {
        quoted(raw)
    }
}

/// `YYYY-MM-DD`, optionally followed by `THH:MM[:SS[.f+]]` and a `Z` or
/// `±HH:MM` offset.
fn is_iso_datetime(raw: &str) -> bool {
    let mut rest = raw.as_bytes();
    let date = digits(&mut rest, 4)
        && byte(&mut rest, b'-')
        && digits(&mut rest, 2)
        && byte(&mut rest, b'-')
        && digits(&mut rest, 2);
    if !date {
        return false;
    }
    if rest.is_empty() {
        return true;
    }
    let time = byte(&mut rest, b'T')
        && digits(&mut rest, 2)
        && byte(&mut rest, b':')
        && digits(&mut rest, 2);
    if !time {
        return false;
    }
    if byte(&mut rest, b':') {
        if !digits(&mut rest, 2) {
            return false;
        }
        if byte(&mut rest, b'.') {
            let len = rest.iter().take_while(|b| b.is_ascii_digit()).count();
            if len == 0 {
                return false;
            }
            rest = &rest[len..];
        }
    }
    if byte(&mut rest, b'Z') {
        return rest.is_empty();
    }
    if byte(&mut rest, b'+') || byte(&mut rest, b'-') {
        return digits(&mut rest, 2)
            && byte(&mut rest, b':')
            && digits(&mut rest, 2)
            && rest.is_empty();
    }
    rest.is_empty()
}

fn digits(rest: &mut &[u8], n: usize) -> bool {
    if rest.len() < n || !rest[..n].iter().all(u8::is_ascii_digit) {
        return false;
    }
    *rest = &rest[n..];
    true
}

fn byte(rest: &mut &[u8], expected: u8) -> bool {
    match rest.split_first() {
        Some((&b, tail)) if b == expected => {
            *rest = tail;
            true
        }
        _ => false,
    }
}

pub fn optional_timestamp(raw: Option<&str>) -> String {
    raw.map_or_else(|| ABSENT.to_owned(), timestamp)
}

pub fn tag_sequence(tags: &[String]) -> String {
    let items: Vec<String> = tags.iter().map(|t| quoted(t.trim())).collect();
    format!("[{}]", items.join(", "))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
