pub mod webdriver;

#[cfg(test)]
pub mod fixture;

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

pub use webdriver::WebDriverSession;

/// How an element is located on a page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "by", content = "query", rename_all = "lowercase")]
pub enum Lookup {
    /// CSS selector
    Css(String),
    /// XPath expression
    XPath(String),
}

impl Lookup {
    pub fn css(query: &str) -> Self {
        Lookup::Css(query.to_string())
    }

    pub fn xpath(query: &str) -> Self {
        Lookup::XPath(query.to_string())
    }
}

impl fmt::Display for Lookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lookup::Css(q) => write!(f, "css `{}`", q),
            Lookup::XPath(q) => write!(f, "xpath `{}`", q),
        }
    }
}

/// Opaque handle to one browsing context (tab) of a session
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ContextHandle(pub(crate) String);

impl fmt::Display for ContextHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A controllable browser with one or more browsing contexts.
///
/// Every command acts on the currently focused context. Contexts are only
/// ever addressed through the handles returned by `current_context` and
/// `open_context`.
#[async_trait]
pub trait BrowserSession: Send {
    /// Navigate the focused context to `url`
    async fn goto(&mut self, url: &str) -> Result<()>;

    /// URL of the focused context
    async fn current_url(&mut self) -> Result<String>;

    /// Visible text of the first element matching `lookup`, without waiting
    async fn text(&mut self, lookup: &Lookup) -> Result<String>;

    /// Click the first element matching `lookup`, without waiting
    async fn click(&mut self, lookup: &Lookup) -> Result<()>;

    /// Wait until an element matching `lookup` is present
    async fn wait_for(&mut self, lookup: &Lookup, timeout: Duration) -> Result<()>;

    /// Wait until an element matching `lookup` is clickable, then click it
    async fn wait_and_click(&mut self, lookup: &Lookup, timeout: Duration) -> Result<()>;

    /// Wait until an element matching `lookup` is present, then type `text` into it
    async fn wait_and_type(&mut self, lookup: &Lookup, text: &str, timeout: Duration)
    -> Result<()>;

    /// Wait for the presence of elements matching `lookup` and read `attr`
    /// from every one of them, in document order
    async fn wait_for_attrs(
        &mut self,
        lookup: &Lookup,
        attr: &str,
        timeout: Duration,
    ) -> Result<Vec<Option<String>>>;

    /// Handle of the focused context
    async fn current_context(&mut self) -> Result<ContextHandle>;

    /// Open a new, empty context. Focus is not moved.
    async fn open_context(&mut self) -> Result<ContextHandle>;

    /// Move focus to `handle`
    async fn switch_to(&mut self, handle: &ContextHandle) -> Result<()>;

    /// Close the focused context. Focus must be moved explicitly afterwards.
    async fn close_context(&mut self) -> Result<()>;

    /// Tear the whole session down
    async fn close(&mut self) -> Result<()>;
}

/// Handle of the focused context of a freshly created session.
///
/// The session is closed when the handle cannot be read, so a failed setup
/// never leaves a browser running.
pub async fn initial_context(session: &mut dyn BrowserSession) -> Result<ContextHandle> {
    match session.current_context().await {
        Ok(handle) => Ok(handle),
        Err(e) => {
            if let Err(close_err) = session.close().await {
                ::log::warn!("Failed to close the browser session: {}", close_err);
            }
            Err(e)
        }
    }
}
