use crate::BrowserArgs;
use crate::commands::browser::{close_session, load_selectors, open_session};
use anyhow::{Context, Result};
use plover_core::table::{CategoryReader, ChunkWriter};
use plover_crawler::{LeadScraper, ScrapeOptions, ScrapeSummary};
use std::path::Path;

/// Scrape leads for every category link in `input`, writing chunk files to `output_dir`
pub fn execute(
    input: &Path,
    output_dir: &Path,
    prefix: &str,
    options: ScrapeOptions,
    browser: &BrowserArgs,
) -> Result<()> {
    let links = CategoryReader::from_file(input)
        .with_context(|| format!("Failed to read category links from {}", input.display()))?;
    if links.is_empty() {
        println!("⚠️  No category links in {}, nothing to scrape", input.display());
        return Ok(());
    }

    let selectors = load_selectors(browser.selectors.as_deref())?;
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;
    let writer = ChunkWriter::new(output_dir, prefix);

    println!(
        "📋 {} subcategories, target {} leads in chunks of {}",
        links.len(),
        options.target,
        options.chunk_size
    );

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let summary = runtime.block_on(async {
        let session = open_session(browser).await?;
        let result = LeadScraper::new(session.page(), &selectors, options, writer)
            .run(&links)
            .await;
        close_session(session).await;
        anyhow::Ok(result?)
    })?;

    print_summary(&summary);
    Ok(())
}

fn print_summary(summary: &ScrapeSummary) {
    use console::style;

    println!("\n{}", style("Scrape Summary").bold().cyan());
    println!("{}", style("==============").cyan());
    println!("  Leads:          {}", summary.total_leads);
    println!("  Chunk files:    {}", summary.chunks.len());
    println!("  Subcategories:  {}", summary.subcategories_visited);
    println!("  Pages:          {}", summary.pages_visited);
    if summary.cards_skipped > 0 {
        println!(
            "  Skipped cards:  {}",
            style(summary.cards_skipped).yellow()
        );
    }
    if let Some(last) = summary.chunks.last() {
        println!("  Last chunk:     {}", last.display());
    }
    println!();
}
