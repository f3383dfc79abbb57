//! Validation of raw API JSON into article records.
//!
//! Both entry points walk every required field and collect one [`Violation`]
//! per problem, so a caller sees the full list rather than the first failure.
//! No record is produced unless the violation list is empty.
//!
//! The list validator is all-or-nothing: a single malformed element fails
//! the whole array.

use serde_json::{Map, Value};
use url::Url;

use crate::error::{ValidationError, Violation, ViolationKind};
use crate::types::{ArticleContent, ArticleId, ArticleMeta, ArticleSummary, Slug};

/// The only `type_of` value the API uses for posts.
pub const ARTICLE_TYPE: &str = "article";

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Validate the body of the list endpoint.
pub fn validate_summaries(value: &Value) -> Result<Vec<ArticleSummary>, ValidationError> {
    let mut violations = Vec::new();
    let Some(items) = value.as_array() else {
        violations.push(wrong_type("", "array", value));
        return Err(ValidationError { violations });
    };

    let mut summaries = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let prefix = format!("[{i}]");
        if let Some(summary) = summary_at(item, &prefix, &mut violations) {
            summaries.push(summary);
        }
    }

    finish(summaries, violations)
}

/// Validate the body of the single-article endpoint.
pub fn validate_content(value: &Value) -> Result<ArticleContent, ValidationError> {
    let mut violations = Vec::new();
    let Some(obj) = as_object("", value, &mut violations) else {
        return Err(ValidationError { violations });
    };

    let mut fields = Fields::new(obj, "", &mut violations);
    let meta = read_meta(&mut fields);
    let tag_list = fields.comma_list("tag_list");
    let tags = fields.string_array("tags");
    let body_html = fields.string("body_html");
    let body_markdown = fields.string("body_markdown");

    finish(
        ArticleContent {
            meta,
            tag_list,
            tags,
            body_html,
            body_markdown,
        },
        violations,
    )
}

/// Split an upstream comma-joined tag string into trimmed tokens.
///
/// Order is preserved; empty tokens (from `""` or `"a,,b"`) are dropped.
pub fn split_tags(joined: &str) -> Vec<String> {
    joined
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_owned)
        .collect()
}

/// Whether `slug` can be used verbatim as a file stem inside the content dir.
pub fn is_safe_slug(slug: &str) -> bool {
    !slug.is_empty()
        && !slug.starts_with('.')
        && !slug.contains(['/', '\\', '\0'])
}

// ---------------------------------------------------------------------------
// Record readers
// ---------------------------------------------------------------------------

fn summary_at(
    value: &Value,
    prefix: &str,
    violations: &mut Vec<Violation>,
) -> Option<ArticleSummary> {
    let obj = as_object(prefix, value, violations)?;
    let mut fields = Fields::new(obj, prefix, violations);
    let meta = read_meta(&mut fields);
    let tag_list = fields.string_array("tag_list");
    let tags = fields.string("tags");
    Some(ArticleSummary {
        meta,
        tag_list,
        tags,
    })
}

fn read_meta(f: &mut Fields<'_>) -> ArticleMeta {
    ArticleMeta {
        id: ArticleId(f.uint("id")),
        type_of: f.literal("type_of", ARTICLE_TYPE),
        title: f.string("title"),
        description: f.string("description"),
        readable_publish_date: f.string("readable_publish_date"),
        slug: f.slug("slug"),
        path: f.string("path"),
        url: f.string("url"),
        comments_count: f.uint("comments_count"),
        public_reactions_count: f.uint("public_reactions_count"),
        collection_id: f.nullable_uint("collection_id"),
        published_timestamp: f.string("published_timestamp"),
        positive_reactions_count: f.uint("positive_reactions_count"),
        cover_image: f.url("cover_image"),
        social_image: f.url("social_image"),
        canonical_url: f.url("canonical_url"),
        created_at: f.string("created_at"),
        edited_at: f.nullable_string("edited_at"),
        crossposted_at: f.nullable_string("crossposted_at"),
        published_at: f.string("published_at"),
        last_comment_at: f.string("last_comment_at"),
        reading_time_minutes: f.uint("reading_time_minutes"),
    }
}

// ---------------------------------------------------------------------------
// Field access
// ---------------------------------------------------------------------------

/// Typed reads over one JSON object.
///
/// Each accessor records a violation and returns a placeholder on failure;
/// placeholders never escape because [`finish`] discards the record whenever
/// the violation list is non-empty.
struct Fields<'a> {
    obj: &'a Map<String, Value>,
    prefix: &'a str,
    violations: &'a mut Vec<Violation>,
}

impl<'a> Fields<'a> {
    fn new(
        obj: &'a Map<String, Value>,
        prefix: &'a str,
        violations: &'a mut Vec<Violation>,
    ) -> Self {
        Self {
            obj,
            prefix,
            violations,
        }
    }

    fn path(&self, key: &str) -> String {
        if self.prefix.is_empty() {
            key.to_owned()
        } else {
            format!("{}.{key}", self.prefix)
        }
    }

    fn fail(&mut self, key: &str, kind: ViolationKind) {
        let path = self.path(key);
        self.violations.push(Violation { path, kind });
    }

    fn get(&mut self, key: &str) -> Option<&'a Value> {
        let value = self.obj.get(key);
        if value.is_none() {
            self.fail(key, ViolationKind::Missing);
        }
        value
    }

    fn string(&mut self, key: &str) -> String {
        let Some(value) = self.get(key) else {
            return String::new();
        };
        match value.as_str() {
            Some(s) => s.to_owned(),
            None => {
                self.fail(key, type_kind("string", value));
                String::new()
            }
        }
    }

    fn nullable_string(&mut self, key: &str) -> Option<String> {
        match self.get(key)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => {
                self.fail(key, type_kind("string or null", other));
                None
            }
        }
    }

    fn uint(&mut self, key: &str) -> u64 {
        let Some(value) = self.get(key) else {
            return 0;
        };
        self.uint_value(key, value).unwrap_or_default()
    }

    fn nullable_uint(&mut self, key: &str) -> Option<u64> {
        match self.get(key)? {
            Value::Null => None,
            value => self.uint_value(key, value),
        }
    }

    fn uint_value(&mut self, key: &str, value: &Value) -> Option<u64> {
        if !value.is_number() {
            self.fail(key, type_kind("number", value));
            return None;
        }
        let n = value.as_u64();
        if n.is_none() {
            self.fail(key, ViolationKind::NotUnsignedInteger);
        }
        n
    }

    fn url(&mut self, key: &str) -> String {
        let Some(value) = self.get(key) else {
            return String::new();
        };
        let Some(s) = value.as_str() else {
            self.fail(key, type_kind("string", value));
            return String::new();
        };
        if Url::parse(s).is_err() {
            self.fail(key, ViolationKind::InvalidUrl);
        }
        s.to_owned()
    }

    fn literal(&mut self, key: &str, expected: &'static str) -> String {
        let s = self.string_if_present(key);
        match s {
            Some(s) if s != expected => {
                self.fail(key, ViolationKind::LiteralMismatch { expected });
                s
            }
            Some(s) => s,
            None => String::new(),
        }
    }

    fn slug(&mut self, key: &str) -> Slug {
        let s = self.string_if_present(key);
        match s {
            Some(s) => {
                if !is_safe_slug(&s) {
                    self.fail(key, ViolationKind::UnsafeSlug);
                }
                Slug(s)
            }
            None => Slug(String::new()),
        }
    }

    fn string_array(&mut self, key: &str) -> Vec<String> {
        let Some(value) = self.get(key) else {
            return Vec::new();
        };
        let Some(items) = value.as_array() else {
            self.fail(key, type_kind("array", value));
            return Vec::new();
        };
        let mut out = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            match item.as_str() {
                Some(s) => out.push(s.to_owned()),
                None => self.fail(&format!("{key}[{i}]"), type_kind("string", item)),
            }
        }
        out
    }

    fn comma_list(&mut self, key: &str) -> Vec<String> {
        self.string_if_present(key)
            .map(|s| split_tags(&s))
            .unwrap_or_default()
    }

    /// Like [`Fields::string`] but distinguishes "failed" from "empty".
    fn string_if_present(&mut self, key: &str) -> Option<String> {
        let value = self.get(key)?;
        match value.as_str() {
            Some(s) => Some(s.to_owned()),
            None => {
                self.fail(key, type_kind("string", value));
                None
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn as_object<'v>(
    path: &str,
    value: &'v Value,
    violations: &mut Vec<Violation>,
) -> Option<&'v Map<String, Value>> {
    let obj = value.as_object();
    if obj.is_none() {
        violations.push(wrong_type(path, "object", value));
    }
    obj
}

fn finish<T>(value: T, violations: Vec<Violation>) -> Result<T, ValidationError> {
    if violations.is_empty() {
        Ok(value)
    } else {
        Err(ValidationError { violations })
    }
}

fn wrong_type(path: &str, expected: &'static str, found: &Value) -> Violation {
    Violation {
        path: path.to_owned(),
        kind: type_kind(expected, found),
    }
}

fn type_kind(expected: &'static str, found: &Value) -> ViolationKind {
    ViolationKind::WrongType {
        expected,
        found: json_kind(found),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
