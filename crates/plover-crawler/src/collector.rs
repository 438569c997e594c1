use crate::links::resolve_href;
use crate::selectors::Selectors;
use plover_core::dom::{Element, Page, text_at};
use plover_core::wait::Wait;
use plover_core::{CategoryLink, Error, Result};
use url::Url;

/// Categories index scraped by default
pub const DEFAULT_START_URL: &str = "https://uk.trustpilot.com/categories";

/// Reads every subcategory link off the categories index page
pub struct CategoryCollector<'a, P: Page> {
    page: &'a P,
    selectors: &'a Selectors,
    page_load: Wait,
}

impl<'a, P: Page> CategoryCollector<'a, P> {
    pub fn new(page: &'a P, selectors: &'a Selectors, page_load: Wait) -> Self {
        Self {
            page,
            selectors,
            page_load,
        }
    }

    /// Load `start_url` and collect the subcategory links of every card.
    ///
    /// A card that cannot be read contributes nothing; failing to load the
    /// index page at all is an error.
    pub async fn collect(&self, start_url: &str) -> Result<Vec<CategoryLink>> {
        let start = Url::parse(start_url)?;
        let base = start.join("/")?;

        tracing::info!("Loading categories from {}", start);
        self.page.goto(start.as_str()).await?;

        let cards = self.wait_for_cards().await?;
        if cards.is_empty() {
            tracing::warn!("No category cards found on {}", start);
        }

        let mut links = Vec::new();
        for (idx, card) in cards.iter().enumerate() {
            match self.collect_card(card, &base).await {
                Ok(found) => {
                    tracing::debug!("Category card {} has {} links", idx + 1, found.len());
                    links.extend(found);
                }
                Err(e) => tracing::warn!("Error processing category card {}: {}", idx + 1, e),
            }
        }

        tracing::info!("Collected {} category links", links.len());
        Ok(links)
    }

    /// All links of one card, or an error if any of them is unreadable
    async fn collect_card(&self, card: &P::Element, base: &Url) -> Result<Vec<CategoryLink>> {
        let s = self.selectors;

        let category = match text_at(card, &s.category_heading).await {
            Ok(heading) => heading,
            Err(e) => {
                tracing::debug!("Unreadable category heading: {}", e);
                None
            }
        };
        if category.is_none() {
            tracing::debug!("Category card has no heading");
        }
        let category = category.unwrap_or_default();

        let mut links = Vec::new();
        for anchor in card.find_all(&s.subcategory_link).await? {
            let subcategory = anchor
                .text()
                .await?
                .map(|t| t.trim().to_string())
                .unwrap_or_default();
            let href = anchor
                .attribute("href")
                .await?
                .ok_or_else(|| Error::NotFound(format!("href of '{}'", subcategory)))?;

            links.push(CategoryLink::new(
                resolve_href(base, &href)?,
                subcategory,
                category.clone(),
            ));
        }

        Ok(links)
    }

    async fn wait_for_cards(&self) -> Result<Vec<P::Element>> {
        let page = self.page;
        let selector = self.selectors.category_card.as_str();
        let cards = self
            .page_load
            .until(move || async move {
                let cards = page.find_all(selector).await?;
                Ok::<_, Error>((!cards.is_empty()).then_some(cards))
            })
            .await?;
        Ok(cards.unwrap_or_default())
    }
}
