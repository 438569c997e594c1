//! CSS selectors for the target site's markup.
//!
//! The class names carry build hashes and change whenever the site is
//! redeployed, so every selector can be overridden from a JSON file.

use plover_core::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    // Categories index
    pub category_card: String,
    pub category_heading: String,
    pub subcategory_link: String,

    // Listing pages
    pub listing_card: String,
    pub company: String,
    pub contact_name: String,
    pub displayed_website: String,
    pub displayed_location: String,
    pub contact_button: String,

    // Contact tooltip
    pub tooltip: String,
    pub email_link: String,
    pub phone_link: String,
    pub website_link: String,
    pub address_item: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            category_card: "div.styles_card__Z1lPe".into(),
            category_heading: "h2.styles_headingDisplayName__XN7x3".into(),
            subcategory_link: "ul.styles_linkList__C9GRA li a".into(),

            listing_card: "div.styles_wrapper__Jg8fe".into(),
            company: "p.typography_heading-xs__osRhC".into(),
            contact_name: "p.contact-name".into(),
            displayed_website: "p.styles_websiteUrlDisplayed__lSw1A".into(),
            displayed_location: "span.styles_location__wea8G".into(),
            contact_button: "button.styles_iconWrapper__offmB".into(),

            tooltip: "div.tooltip_tooltip__49opG".into(),
            email_link: "a[data-email-typography]".into(),
            phone_link: "a[data-phone-typography]".into(),
            website_link: "a[data-website-typography]".into(),
            address_item: "ul.styles_list__2Yton li".into(),
        }
    }
}

impl Selectors {
    /// Load overrides from a JSON file; keys left out keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let selectors = serde_json::from_str(&content)?;
        tracing::info!("Loaded selector overrides from {}", path.display());
        Ok(selectors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_override_keeps_defaults() {
        let selectors: Selectors =
            serde_json::from_str(r#"{"listing_card": "article.card"}"#).unwrap();

        assert_eq!(selectors.listing_card, "article.card");
        assert_eq!(selectors.tooltip, Selectors::default().tooltip);
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("selectors.json");
        std::fs::write(&path, r#"{"tooltip": "div.popover"}"#).unwrap();

        let selectors = Selectors::from_file(&path).unwrap();

        assert_eq!(selectors.tooltip, "div.popover");
        assert_eq!(selectors.company, Selectors::default().company);
    }

    #[test]
    fn test_unreadable_file_is_an_error() {
        assert!(Selectors::from_file(Path::new("/nonexistent/selectors.json")).is_err());
    }
}
