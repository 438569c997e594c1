use crate::BrowserArgs;
use crate::commands::browser::{close_session, load_selectors, open_session};
use anyhow::Result;
use plover_core::table::CategoryWriter;
use plover_core::wait::Wait;
use plover_crawler::CategoryCollector;
use std::path::Path;

/// Collect every subcategory link from the categories index into `output`
pub fn execute(
    start_url: &str,
    output: &Path,
    page_load: Wait,
    browser: &BrowserArgs,
) -> Result<()> {
    tracing::info!("Collecting categories from {}", start_url);
    let selectors = load_selectors(browser.selectors.as_deref())?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let links = runtime.block_on(async {
        let session = open_session(browser).await?;
        let result = CategoryCollector::new(session.page(), &selectors, page_load)
            .collect(start_url)
            .await;
        close_session(session).await;
        anyhow::Ok(result?)
    })?;

    CategoryWriter::to_file(&links, output)?;
    println!(
        "✅ Collected {} category links. Saved to {}",
        links.len(),
        output.display()
    );

    Ok(())
}
