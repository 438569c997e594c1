//! In-memory stand-in for a browser page.
//!
//! Elements are trees keyed by the exact selector string the crawler asks
//! for, so no CSS matching is involved.

#![allow(dead_code)]

use async_trait::async_trait;
use plover_core::dom::{Element, Page};
use plover_core::wait::Wait;
use plover_core::{Error, Result};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};
use std::time::Duration;

type Slot = Arc<Mutex<Option<FakeElement>>>;

#[derive(Clone, Default)]
pub struct FakeElement {
    text: Option<String>,
    attrs: HashMap<String, String>,
    children: Vec<(String, FakeElement)>,
    reveals: Option<(Slot, Option<Box<FakeElement>>)>,
    broken: bool,
}

impl FakeElement {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.insert(name.to_string(), value.to_string());
        self
    }

    pub fn child(mut self, selector: &str, element: FakeElement) -> Self {
        self.children.push((selector.to_string(), element));
        self
    }

    /// Every query on this element fails as if the session dropped
    pub fn broken(mut self) -> Self {
        self.broken = true;
        self
    }

    fn check(&self) -> Result<()> {
        if self.broken {
            Err(Error::Browser("node is detached from document".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl Element for FakeElement {
    async fn find(&self, selector: &str) -> Result<Self> {
        self.check()?;
        self.children
            .iter()
            .find(|(key, _)| key == selector)
            .map(|(_, element)| element.clone())
            .ok_or_else(|| Error::NotFound(selector.to_string()))
    }

    async fn find_all(&self, selector: &str) -> Result<Vec<Self>> {
        self.check()?;
        Ok(self
            .children
            .iter()
            .filter(|(key, _)| key == selector)
            .map(|(_, element)| element.clone())
            .collect())
    }

    async fn text(&self) -> Result<Option<String>> {
        self.check()?;
        Ok(self.text.clone())
    }

    async fn attribute(&self, name: &str) -> Result<Option<String>> {
        self.check()?;
        Ok(self.attrs.get(name).cloned())
    }

    async fn dispatch_click(&self) -> Result<()> {
        self.check()?;
        // A click closes whatever tooltip was open before
        if let Some((slot, tooltip)) = &self.reveals {
            *slot.lock().unwrap() = tooltip.as_deref().cloned();
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct FakePage {
    documents: HashMap<String, Vec<(String, FakeElement)>>,
    failing: HashSet<String>,
    current: Mutex<Option<String>>,
    visited: Mutex<Vec<String>>,
    tooltip: Slot,
}

impl FakePage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `elements` for `selector` at `url`
    pub fn with(mut self, url: &str, selector: &str, elements: Vec<FakeElement>) -> Self {
        let document = self.documents.entry(url.to_string()).or_default();
        for element in elements {
            document.push((selector.to_string(), element));
        }
        self
    }

    /// Navigating to `url` fails
    pub fn failing(mut self, url: &str) -> Self {
        self.failing.insert(url.to_string());
        self
    }

    /// A button that shows `tooltip` on this page when clicked
    pub fn contact_button(&self, tooltip: FakeElement) -> FakeElement {
        FakeElement {
            reveals: Some((self.tooltip.clone(), Some(Box::new(tooltip)))),
            ..FakeElement::default()
        }
    }

    /// A button whose tooltip never shows up
    pub fn dead_contact_button(&self) -> FakeElement {
        FakeElement {
            reveals: Some((self.tooltip.clone(), None)),
            ..FakeElement::default()
        }
    }

    pub fn visited(&self) -> Vec<String> {
        self.visited.lock().unwrap().clone()
    }
}

#[async_trait]
impl Page for FakePage {
    type Element = FakeElement;

    async fn goto(&self, url: &str) -> Result<()> {
        self.visited.lock().unwrap().push(url.to_string());
        *self.tooltip.lock().unwrap() = None;
        if self.failing.contains(url) {
            *self.current.lock().unwrap() = None;
            return Err(Error::Browser(format!("net::ERR_CONNECTION_RESET at {}", url)));
        }
        *self.current.lock().unwrap() = Some(url.to_string());
        Ok(())
    }

    async fn find_all(&self, selector: &str) -> Result<Vec<FakeElement>> {
        let current = self.current.lock().unwrap().clone();
        let elements = current
            .and_then(|url| self.documents.get(&url))
            .map(|document| {
                document
                    .iter()
                    .filter(|(key, _)| key == selector)
                    .map(|(_, element)| element.clone())
                    .collect()
            })
            .unwrap_or_default();
        Ok(elements)
    }

    async fn find_visible(&self, _selector: &str) -> Result<Option<FakeElement>> {
        Ok(self.tooltip.lock().unwrap().clone())
    }
}

/// Short waits so timeouts in tests cost milliseconds
pub fn quick_wait() -> Wait {
    Wait::new(Duration::from_millis(20), Duration::from_millis(5))
}
