//! `blogsync list` — show the author's published articles.

use anyhow::{Context, Result};
use clap::Args;
use tabled::{settings::Style, Table, Tabled};

use blogsync_core::ArticleSummary;
use blogsync_sync::ArticleSource;

use super::{block_on, SiteArgs};

/// Arguments for `blogsync list`.
#[derive(Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub site: SiteArgs,

    /// Print the validated summaries as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Tabled)]
struct ArticleRow {
    #[tabled(rename = "slug")]
    slug: String,
    #[tabled(rename = "title")]
    title: String,
    #[tabled(rename = "published")]
    published: String,
    #[tabled(rename = "reactions")]
    reactions: u64,
    #[tabled(rename = "comments")]
    comments: u64,
    #[tabled(rename = "min")]
    reading_minutes: u64,
}

impl From<&ArticleSummary> for ArticleRow {
    fn from(s: &ArticleSummary) -> Self {
        Self {
            slug: s.meta.slug.to_string(),
            title: s.meta.title.clone(),
            published: s.meta.readable_publish_date.clone(),
            reactions: s.meta.public_reactions_count,
            comments: s.meta.comments_count,
            reading_minutes: s.meta.reading_time_minutes,
        }
    }
}

impl ListArgs {
    pub fn run(self) -> Result<()> {
        let site = self.site.resolve()?;
        let client = site.client()?;
        let author = &site.config.author;

        let summaries = block_on(client.fetch_summaries(author))?
            .with_context(|| format!("could not list articles for '{author}'"))?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&summaries)?);
            return Ok(());
        }
        if summaries.is_empty() {
            println!("'{author}' has no published articles.");
            return Ok(());
        }

        let rows: Vec<ArticleRow> = summaries.iter().map(ArticleRow::from).collect();
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{table}");
        Ok(())
    }
}
