//! Browser automation boundary.
//!
//! The crawler only ever talks to a page through these two traits, so it can
//! be driven by a real Chrome session or by an in-memory fake in tests.
//!
//! Implementations report a selector or attribute with no match as
//! [`Error::NotFound`](crate::Error::NotFound). Every other error is treated by
//! callers as a failure of the session itself.

use crate::{Error, Result};
use async_trait::async_trait;

/// A node in the current document
#[async_trait]
pub trait Element: Send + Sync + Sized {
    /// First descendant matching `selector`
    async fn find(&self, selector: &str) -> Result<Self>;

    /// All descendants matching `selector`, in document order
    async fn find_all(&self, selector: &str) -> Result<Vec<Self>>;

    /// Rendered text content
    async fn text(&self) -> Result<Option<String>>;

    /// Raw attribute value
    async fn attribute(&self, name: &str) -> Result<Option<String>>;

    /// Dispatch a click from script, ignoring whether the node is obscured
    async fn dispatch_click(&self) -> Result<()>;
}

/// The single browser tab a crawl runs in
#[async_trait]
pub trait Page: Send + Sync {
    type Element: Element;

    /// Navigate and wait for the document to load
    async fn goto(&self, url: &str) -> Result<()>;

    /// All elements in the document matching `selector`
    async fn find_all(&self, selector: &str) -> Result<Vec<Self::Element>>;

    /// First element matching `selector` if it is currently visible
    async fn find_visible(&self, selector: &str) -> Result<Option<Self::Element>>;
}

/// Turn a `NotFound` result into `None`, passing other errors through
pub fn optional<T>(result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(Error::NotFound(selector)) => {
            tracing::trace!("No match for {}", selector);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Trimmed text of the first match under `scope`, `None` if absent or blank
pub async fn text_at<E: Element>(scope: &E, selector: &str) -> Result<Option<String>> {
    let Some(element) = optional(scope.find(selector).await)? else {
        return Ok(None);
    };
    Ok(non_blank(element.text().await?))
}

/// Trimmed attribute of the first match under `scope`, `None` if absent or blank
pub async fn attribute_at<E: Element>(
    scope: &E,
    selector: &str,
    name: &str,
) -> Result<Option<String>> {
    let Some(element) = optional(scope.find(selector).await)? else {
        return Ok(None);
    };
    Ok(non_blank(element.attribute(name).await?))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
