//! Field extraction for a single listing card.
//!
//! Card fields are read directly. Contact details sit behind a "contact"
//! button that opens a tooltip. Whenever the tooltip cannot be had, the lead
//! keeps the values displayed on the card.

use crate::links::email_from_href;
use crate::selectors::Selectors;
use plover_core::dom::{Element, Page, attribute_at, optional, text_at};
use plover_core::wait::Wait;
use plover_core::{CategoryLink, Lead, Result};

/// Contact details read from a revealed tooltip
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Contact {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub address: Option<String>,
}

pub struct CardExtractor<'a> {
    selectors: &'a Selectors,
    tooltip_wait: Wait,
}

impl<'a> CardExtractor<'a> {
    pub fn new(selectors: &'a Selectors, tooltip_wait: Wait) -> Self {
        Self {
            selectors,
            tooltip_wait,
        }
    }

    /// Build a lead from one card.
    ///
    /// Missing elements only blank out their field. An error here means the
    /// card could not be read at all and no lead should be recorded for it.
    pub async fn extract<P: Page>(
        &self,
        page: &P,
        card: &P::Element,
        link: &CategoryLink,
    ) -> Result<Lead> {
        let s = self.selectors;

        let company = text_at(card, &s.company).await?;
        let name = text_at(card, &s.contact_name)
            .await?
            .or_else(|| company.clone());
        let displayed_website = text_at(card, &s.displayed_website).await?;
        let displayed_location = text_at(card, &s.displayed_location).await?;

        let label = company.as_deref().unwrap_or("unknown company");
        let contact = match self.reveal_contact(page, card, label).await {
            Ok(Some(contact)) => contact,
            Ok(None) => Contact::default(),
            Err(e) => {
                tracing::warn!("Error extracting contact details for '{}': {}", label, e);
                Contact::default()
            }
        };

        Ok(Lead {
            name,
            email: contact.email,
            company,
            location: contact.address.or(displayed_location),
            phone: contact.phone,
            website: contact.website.or(displayed_website),
            ..Lead::for_link(link)
        })
    }

    /// Click the card's contact button and read the tooltip it opens.
    /// `None` when there is no button or the tooltip never shows.
    ///
    /// The tooltip is looked up page-wide, not under the card. If the previous
    /// card's tooltip is still visible when this one is polled, its details
    /// are read for this card. Like the address heuristic in
    /// [`first_unlinked_item`], this breaks silently.
    async fn reveal_contact<P: Page>(
        &self,
        page: &P,
        card: &P::Element,
        label: &str,
    ) -> Result<Option<Contact>> {
        let s = self.selectors;

        let Some(button) = optional(card.find(&s.contact_button).await)? else {
            tracing::warn!("No contact button for '{}'", label);
            return Ok(None);
        };
        button.dispatch_click().await?;

        let selector = s.tooltip.as_str();
        let tooltip = self
            .tooltip_wait
            .until(move || page.find_visible(selector))
            .await?;
        let Some(tooltip) = tooltip else {
            tracing::warn!(
                "Contact tooltip for '{}' did not appear within {:?}",
                label,
                self.tooltip_wait.timeout
            );
            return Ok(None);
        };

        self.read_contact(&tooltip).await.map(Some)
    }

    async fn read_contact<E: Element>(&self, tooltip: &E) -> Result<Contact> {
        let s = self.selectors;

        let email = attribute_at(tooltip, &s.email_link, "href")
            .await?
            .and_then(|href| email_from_href(&href));
        let phone = text_at(tooltip, &s.phone_link).await?;
        let website = text_at(tooltip, &s.website_link).await?;
        let address = first_unlinked_item(tooltip, &s.address_item).await?;

        Ok(Contact {
            email,
            phone,
            website,
            address,
        })
    }
}

/// Text of the first list item that holds no link.
///
/// The tooltip does not label its lines: email, phone and website are all
/// anchors, so the first plain line is taken to be the postal address. This
/// breaks silently if the site starts rendering other plain lines first.
pub async fn first_unlinked_item<E: Element>(
    scope: &E,
    selector: &str,
) -> Result<Option<String>> {
    for item in scope.find_all(selector).await? {
        if optional(item.find("a").await)?.is_none() {
            let text = item.text().await?;
            return Ok(text
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()));
        }
    }
    Ok(None)
}
