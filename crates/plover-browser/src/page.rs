use crate::error::query_error;
use async_trait::async_trait;
use chromiumoxide::element::Element as CdpNode;
use chromiumoxide::error::CdpError;
use plover_core::Result;
use plover_core::dom::{Element, Page};

// Mirrors Selenium's notion of "displayed"
const IS_VISIBLE_JS: &str = r#"function() {
    const style = window.getComputedStyle(this);
    const rect = this.getBoundingClientRect();
    return style.display !== 'none'
        && style.visibility !== 'hidden'
        && parseFloat(style.opacity || '1') > 0
        && rect.width > 0
        && rect.height > 0;
}"#;

const CLICK_JS: &str = "function() { this.click(); }";

/// A Chrome tab driven over CDP
pub struct CdpPage {
    page: chromiumoxide::Page,
}

impl CdpPage {
    pub fn new(page: chromiumoxide::Page) -> Self {
        Self { page }
    }

    pub fn into_inner(self) -> chromiumoxide::Page {
        self.page
    }
}

/// An element handle in a [`CdpPage`]
pub struct CdpElement {
    node: CdpNode,
}

impl CdpElement {
    async fn is_visible(&self) -> Result<bool> {
        let returns = self
            .node
            .call_js_fn(IS_VISIBLE_JS, false)
            .await
            .map_err(|e| query_error(e, "visibility check"))?;
        Ok(returns
            .result
            .value
            .and_then(|v| v.as_bool())
            .unwrap_or(false))
    }
}

/// Raw outcome of a chromiumoxide selector query
type Query<N> = std::result::Result<Vec<N>, CdpError>;

/// Nodes matched by a query. No match is an empty list, never an error.
fn matches<N>(result: Query<N>, selector: &str) -> Result<Vec<N>> {
    match result {
        Ok(nodes) => Ok(nodes),
        Err(CdpError::NotFound) => Ok(Vec::new()),
        Err(e) => Err(query_error(e, selector)),
    }
}

/// First node of a query, `NotFound` when nothing matched.
///
/// chromiumoxide's `find_element` asks Chrome to describe node 0 when
/// `querySelector` misses, which fails with a generic protocol error. Going
/// through `querySelectorAll` keeps "no match" apart from a dead session.
fn first_match<N>(result: Query<N>, selector: &str) -> Result<N> {
    matches(result, selector)?
        .into_iter()
        .next()
        .ok_or_else(|| plover_core::Error::NotFound(selector.to_string()))
}

fn wrap_all(nodes: Vec<CdpNode>) -> Vec<CdpElement> {
    nodes.into_iter().map(|node| CdpElement { node }).collect()
}

#[async_trait]
impl Element for CdpElement {
    async fn find(&self, selector: &str) -> Result<Self> {
        first_match(self.node.find_elements(selector).await, selector)
            .map(|node| CdpElement { node })
    }

    async fn find_all(&self, selector: &str) -> Result<Vec<Self>> {
        matches(self.node.find_elements(selector).await, selector).map(wrap_all)
    }

    async fn text(&self) -> Result<Option<String>> {
        self.node
            .inner_text()
            .await
            .map_err(|e| query_error(e, "innerText"))
    }

    async fn attribute(&self, name: &str) -> Result<Option<String>> {
        self.node
            .attribute(name)
            .await
            .map_err(|e| query_error(e, name))
    }

    async fn dispatch_click(&self) -> Result<()> {
        self.node
            .call_js_fn(CLICK_JS, false)
            .await
            .map_err(|e| query_error(e, "click"))?;
        Ok(())
    }
}

#[async_trait]
impl Page for CdpPage {
    type Element = CdpElement;

    async fn goto(&self, url: &str) -> Result<()> {
        tracing::debug!("Navigating to {}", url);
        self.page.goto(url).await.map_err(|e| {
            plover_core::Error::Browser(format!("Navigation to {} failed: {}", url, e))
        })?;
        Ok(())
    }

    async fn find_all(&self, selector: &str) -> Result<Vec<CdpElement>> {
        matches(self.page.find_elements(selector).await, selector).map(wrap_all)
    }

    async fn find_visible(&self, selector: &str) -> Result<Option<CdpElement>> {
        let nodes = matches(self.page.find_elements(selector).await, selector)?;
        let Some(node) = nodes.into_iter().next() else {
            return Ok(None);
        };
        let element = CdpElement { node };

        if element.is_visible().await? {
            Ok(Some(element))
        } else {
            Ok(None)
        }
    }
}
