//! `blogsync sync` — fetch every article and write one content file per slug.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde_json::json;

use blogsync_sync::{ArticleStatus, Listing, SyncReport};

use super::{block_on, SiteArgs};

/// Arguments for `blogsync sync`.
#[derive(Args, Debug)]
pub struct SyncArgs {
    #[command(flatten)]
    pub site: SiteArgs,

    /// Show what would be written without actually writing any files.
    #[arg(long)]
    pub dry_run: bool,

    /// Print the run report as JSON.
    #[arg(long)]
    pub json: bool,
}

impl SyncArgs {
    /// Exits successfully whatever happens to individual articles; only a
    /// config problem is an error. Per-article results are in the output.
    pub fn run(self) -> Result<()> {
        let site = self.site.resolve()?;
        let pipeline = site.pipeline()?;
        let report = block_on(pipeline.run(&site.config.author, self.dry_run))?;

        if self.json {
            let body = json!({ "result": "Ok", "report": report });
            println!("{}", serde_json::to_string_pretty(&body)?);
        } else {
            print_report(&report, self.dry_run);
        }
        Ok(())
    }
}

fn print_report(report: &SyncReport, dry_run: bool) {
    let prefix = if dry_run { "[dry-run] " } else { "" };
    let author = &report.author;

    match &report.listing {
        Listing::Fetched { count: 0 } => {
            println!("{prefix}✓ '{author}' — no published articles");
            return;
        }
        Listing::Failed { reason } => {
            println!("{prefix}{} '{author}' — could not list articles: {reason}", "!".yellow());
            return;
        }
        Listing::TimedOut => {
            println!("{prefix}{} '{author}' — listing timed out", "!".yellow());
            return;
        }
        Listing::Fetched { .. } => {}
    }

    println!(
        "{prefix}✓ '{author}' synced ({} written, {} unchanged, {} not updated) in {} ms",
        report.written(),
        report.unchanged(),
        report.problems(),
        report.duration_ms
    );

    for article in &report.articles {
        match &article.status {
            ArticleStatus::Written { path } => println!("  {}  {}", "✎".green(), path.display()),
            ArticleStatus::WouldWrite { path } => println!("  ~  {}", path.display()),
            ArticleStatus::Unchanged { path } => {
                println!("  {}  {}", "·".dimmed(), path.display())
            }
            ArticleStatus::Skipped { reason } => {
                println!("  {}  {} — skipped: {reason}", "⤼".yellow(), article.slug)
            }
            ArticleStatus::Failed { reason } => {
                println!("  {}  {} — failed: {reason}", "✗".red(), article.slug)
            }
            ArticleStatus::TimedOut => {
                println!("  {}  {} — timed out", "✗".red(), article.slug)
            }
        }
    }
}
