use crate::card::CardExtractor;
use crate::links::paginated_url;
use crate::selectors::Selectors;
use plover_core::dom::Page;
use plover_core::table::ChunkWriter;
use plover_core::wait::Wait;
use plover_core::{Batch, CategoryLink, Error, Lead, Result};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct ScrapeOptions {
    /// Stop once this many leads have been recorded
    pub target: usize,
    /// Leads per output file
    pub chunk_size: usize,
    /// Give up on a subcategory after this many pages
    pub max_pages: Option<usize>,
    /// How long a listing page may take to show its cards
    pub page_load: Wait,
    /// How long a contact tooltip may take to appear
    pub tooltip: Wait,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            target: 30_000,
            chunk_size: 20,
            max_pages: None,
            page_load: Wait::default(),
            tooltip: Wait::default(),
        }
    }
}

/// Counters and the pending batch carried through a scrape
#[derive(Debug)]
pub struct ScrapeState {
    target: usize,
    chunk_size: usize,
    total_leads: usize,
    next_sequence: usize,
    batch: Vec<Lead>,
}

impl ScrapeState {
    pub fn new(target: usize, chunk_size: usize) -> Self {
        Self {
            target,
            chunk_size: chunk_size.max(1),
            total_leads: 0,
            next_sequence: 1,
            batch: Vec::new(),
        }
    }

    pub fn total_leads(&self) -> usize {
        self.total_leads
    }

    pub fn target_reached(&self) -> bool {
        self.total_leads >= self.target
    }

    pub fn push(&mut self, lead: Lead) {
        self.batch.push(lead);
        self.total_leads += 1;
    }

    /// The pending batch, once it has reached the chunk size
    pub fn take_full_batch(&mut self) -> Option<Batch> {
        (self.batch.len() >= self.chunk_size).then(|| self.next_batch())
    }

    /// Whatever is left over at the end of a run
    pub fn take_remaining(&mut self) -> Option<Batch> {
        (!self.batch.is_empty()).then(|| self.next_batch())
    }

    fn next_batch(&mut self) -> Batch {
        let batch = Batch::new(self.next_sequence, std::mem::take(&mut self.batch));
        self.next_sequence += 1;
        batch
    }
}

/// Outcome of a finished scrape
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScrapeSummary {
    pub total_leads: usize,
    pub chunks: Vec<PathBuf>,
    pub subcategories_visited: usize,
    pub pages_visited: usize,
    pub cards_skipped: usize,
}

/// Walks subcategory listing pages and records a lead per card
pub struct LeadScraper<'a, P: Page> {
    page: &'a P,
    selectors: &'a Selectors,
    options: ScrapeOptions,
    writer: ChunkWriter,
}

impl<'a, P: Page> LeadScraper<'a, P> {
    pub fn new(
        page: &'a P,
        selectors: &'a Selectors,
        options: ScrapeOptions,
        writer: ChunkWriter,
    ) -> Self {
        Self {
            page,
            selectors,
            options,
            writer,
        }
    }

    /// Scrape `links` in order until the target is met or they run out.
    ///
    /// Browser and extraction failures are logged and skipped past. Only a
    /// failure to write an output file ends the run early.
    pub async fn run(&self, links: &[CategoryLink]) -> Result<ScrapeSummary> {
        let mut state = ScrapeState::new(self.options.target, self.options.chunk_size);
        let mut summary = ScrapeSummary::default();

        for link in links {
            if state.target_reached() {
                break;
            }
            tracing::info!("Scraping subcategory: '{}' ({})", link.subcategory, link.link);
            summary.subcategories_visited += 1;
            self.scrape_subcategory(link, &mut state, &mut summary).await?;
        }

        if state.target_reached() {
            tracing::info!("Reached target number of leads.");
        }
        if let Some(batch) = state.take_remaining() {
            summary.chunks.push(self.writer.write(&batch)?);
        }

        summary.total_leads = state.total_leads();
        tracing::info!(
            "Scraping complete. Total leads scraped: {}",
            summary.total_leads
        );
        Ok(summary)
    }

    async fn scrape_subcategory(
        &self,
        link: &CategoryLink,
        state: &mut ScrapeState,
        summary: &mut ScrapeSummary,
    ) -> Result<()> {
        let extractor = CardExtractor::new(self.selectors, self.options.tooltip);
        let mut page_number = 1;

        while !state.target_reached() {
            if self.options.max_pages.is_some_and(|max| page_number > max) {
                tracing::info!(
                    "Stopping '{}' after {} pages",
                    link.subcategory,
                    page_number - 1
                );
                return Ok(());
            }

            let url = match paginated_url(&link.link, page_number) {
                Ok(url) => url,
                Err(e) => {
                    tracing::warn!("Invalid link for '{}': {}", link.subcategory, e);
                    return Ok(());
                }
            };

            if let Err(e) = self.page.goto(&url).await {
                tracing::warn!(
                    "Error loading page {} for '{}': {}",
                    page_number,
                    link.subcategory,
                    e
                );
                return Ok(());
            }
            summary.pages_visited += 1;

            let cards = match self.wait_for_cards().await {
                Ok(cards) => cards,
                Err(e) => {
                    tracing::warn!(
                        "Error reading page {} for '{}': {}",
                        page_number,
                        link.subcategory,
                        e
                    );
                    return Ok(());
                }
            };
            if cards.is_empty() {
                tracing::info!(
                    "No business cards found on page {} for '{}'.",
                    page_number,
                    link.subcategory
                );
                return Ok(());
            }

            for card in &cards {
                if state.target_reached() {
                    break;
                }

                match extractor.extract(self.page, card, link).await {
                    Ok(lead) => state.push(lead),
                    Err(e) => {
                        tracing::warn!(
                            "Error processing a business card on page {} for '{}': {}",
                            page_number,
                            link.subcategory,
                            e
                        );
                        summary.cards_skipped += 1;
                    }
                }

                if let Some(batch) = state.take_full_batch() {
                    summary.chunks.push(self.writer.write(&batch)?);
                }
            }

            tracing::info!(
                "Subcategory '{}', Page {}: Total leads scraped so far: {}",
                link.subcategory,
                page_number,
                state.total_leads()
            );
            page_number += 1;
        }

        Ok(())
    }

    /// Listing cards on the current page, empty if none show up in time
    async fn wait_for_cards(&self) -> Result<Vec<P::Element>> {
        let page = self.page;
        let selector = self.selectors.listing_card.as_str();
        let cards = self
            .options
            .page_load
            .until(move || async move {
                let cards = page.find_all(selector).await?;
                Ok::<_, Error>((!cards.is_empty()).then_some(cards))
            })
            .await?;
        Ok(cards.unwrap_or_default())
    }
}
