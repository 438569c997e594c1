use serde::{Deserialize, Serialize};

/// One subcategory listing page discovered on the categories index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryLink {
    #[serde(rename = "Link")]
    pub link: String,
    #[serde(rename = "Subcategory")]
    pub subcategory: String,
    /// Empty when the category heading could not be read
    #[serde(rename = "Category", default)]
    pub category: String,
}

impl CategoryLink {
    pub fn new(
        link: impl Into<String>,
        subcategory: impl Into<String>,
        category: impl Into<String>,
    ) -> Self {
        Self {
            link: link.into(),
            subcategory: subcategory.into(),
            category: category.into(),
        }
    }
}

/// A business scraped from a single listing card
///
/// Everything read from the page is best-effort; only the provenance
/// fields are guaranteed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    #[serde(rename = "Name")]
    pub name: Option<String>,
    #[serde(rename = "Email")]
    pub email: Option<String>,
    #[serde(rename = "Company")]
    pub company: Option<String>,
    #[serde(rename = "Location")]
    pub location: Option<String>,
    #[serde(rename = "Phone")]
    pub phone: Option<String>,
    #[serde(rename = "Website")]
    pub website: Option<String>,
    #[serde(rename = "Subcategory")]
    pub subcategory: String,
    #[serde(rename = "Category")]
    pub category: String,
}

impl Lead {
    /// Start an empty lead attributed to the given category link
    pub fn for_link(link: &CategoryLink) -> Self {
        Self {
            subcategory: link.subcategory.clone(),
            category: link.category.clone(),
            ..Default::default()
        }
    }
}

/// A numbered group of leads written together to one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Batch {
    pub sequence: usize,
    pub leads: Vec<Lead>,
}

impl Batch {
    pub fn new(sequence: usize, leads: Vec<Lead>) -> Self {
        Self { sequence, leads }
    }

    pub fn len(&self) -> usize {
        self.leads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.leads.is_empty()
    }
}
