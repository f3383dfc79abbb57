//! `blogsync diff` — show unified diffs for what sync would write.

use anyhow::{Context, Result};
use clap::Args;

use blogsync_sync::{diff_all, Listing};

use super::{block_on, SiteArgs};

/// Arguments for `blogsync diff`.
#[derive(Args, Debug)]
pub struct DiffArgs {
    #[command(flatten)]
    pub site: SiteArgs,
}

impl DiffArgs {
    pub fn run(self) -> Result<()> {
        let site = self.site.resolve()?;
        let pipeline = site.pipeline()?;
        let author = &site.config.author;

        let result = block_on(diff_all(&pipeline, author))?
            .with_context(|| format!("diff failed for '{author}'"))?;

        match &result.listing {
            Listing::Failed { reason } => {
                eprintln!("could not list articles for '{author}': {reason}");
            }
            Listing::TimedOut => eprintln!("listing articles for '{author}' timed out"),
            Listing::Fetched { .. } => {}
        }
        for problem in &result.problems {
            eprintln!("'{}' {}", problem.slug, problem.status);
        }

        if result.diffs.is_empty() {
            println!("No differences for '{author}'.");
            return Ok(());
        }

        for diff in result.diffs {
            print!("{}", diff.unified_diff);
            if !diff.unified_diff.ends_with('\n') {
                println!();
            }
        }

        Ok(())
    }
}
