//! In-memory browser session serving canned HTML pages.
//!
//! Only CSS lookups are evaluated; XPath lookups never match. Clicking an
//! `<a href>`, or any element with a `data-href`, navigates the focused
//! context; any other click is recorded and otherwise ignored. Navigating to
//! a URL with no page fails.

use crate::error::{Result, ScrapeError};
use crate::session::{BrowserSession, ContextHandle, Lookup};
use async_trait::async_trait;
use scraper::{Html, Selector};
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

/// First element matching a lookup, reduced to owned data
struct Match {
    text: String,
    href: Option<String>,
}

pub struct FixtureSession {
    pages: HashMap<String, String>,
    contexts: HashMap<ContextHandle, Option<String>>,
    focused: ContextHandle,
    opened: usize,
    /// Every successful `goto`, in order
    pub visits: Vec<String>,
    /// Every click, as the lookup that was clicked
    pub clicks: Vec<Lookup>,
    /// Every `(lookup, text)` typed
    pub typed: Vec<(Lookup, String)>,
    pub closed: bool,
}

impl FixtureSession {
    pub fn new() -> Self {
        let main = ContextHandle("ctx-0".to_string());
        let mut contexts = HashMap::new();
        contexts.insert(main.clone(), None);
        Self {
            pages: HashMap::new(),
            contexts,
            focused: main,
            opened: 0,
            visits: Vec::new(),
            clicks: Vec::new(),
            typed: Vec::new(),
            closed: false,
        }
    }

    /// Serve `html` for `url`
    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    /// Number of contexts currently open
    pub fn open_contexts(&self) -> usize {
        self.contexts.len()
    }

    fn focused_html(&self) -> Option<&str> {
        let url = self.contexts.get(&self.focused)?.as_ref()?;
        self.pages.get(url).map(|s| s.as_str())
    }

    fn focused_url(&self) -> Option<&str> {
        self.contexts.get(&self.focused)?.as_deref()
    }

    fn selector(lookup: &Lookup) -> Option<Selector> {
        match lookup {
            Lookup::Css(q) => Selector::parse(q).ok(),
            Lookup::XPath(_) => None,
        }
    }

    fn select_all(&self, lookup: &Lookup, attr: &str) -> Vec<Option<String>> {
        let (Some(html), Some(selector)) = (self.focused_html(), Self::selector(lookup)) else {
            return Vec::new();
        };
        let doc = Html::parse_document(html);
        doc.select(&selector)
            .map(|e| e.value().attr(attr).map(|s| s.to_string()))
            .collect()
    }

    fn select_first(&self, lookup: &Lookup) -> Result<Match> {
        let not_found = || ScrapeError::NotFound(lookup.to_string());
        let html = self.focused_html().ok_or_else(not_found)?;
        let selector = Self::selector(lookup).ok_or_else(not_found)?;
        let doc = Html::parse_document(html);
        let element = doc.select(&selector).next().ok_or_else(not_found)?;
        let href = match element.value().name() {
            "a" => element.value().attr("href"),
            _ => element.value().attr("data-href"),
        };
        Ok(Match {
            text: element.text().collect::<String>(),
            href: href.map(|s| s.to_string()),
        })
    }

    fn navigate(&mut self, url: &str) -> Result<()> {
        if !self.pages.contains_key(url) {
            return Err(ScrapeError::Navigation {
                url: url.to_string(),
                reason: "net::ERR_NAME_NOT_RESOLVED".to_string(),
            });
        }
        self.contexts
            .insert(self.focused.clone(), Some(url.to_string()));
        self.visits.push(url.to_string());
        Ok(())
    }

    fn do_click(&mut self, lookup: &Lookup) -> Result<()> {
        let found = self.select_first(lookup)?;
        self.clicks.push(lookup.clone());
        if let Some(href) = found.href {
            let base = self.focused_url().unwrap_or_default().to_string();
            let target = Url::parse(&base)
                .and_then(|b| b.join(&href))
                .map(|u| u.to_string())
                .unwrap_or(href);
            self.navigate(&target)?;
        }
        Ok(())
    }
}

#[async_trait]
impl BrowserSession for FixtureSession {
    async fn goto(&mut self, url: &str) -> Result<()> {
        self.navigate(url)
    }

    async fn current_url(&mut self) -> Result<String> {
        Ok(self.focused_url().unwrap_or("about:blank").to_string())
    }

    async fn text(&mut self, lookup: &Lookup) -> Result<String> {
        self.select_first(lookup).map(|m| m.text)
    }

    async fn click(&mut self, lookup: &Lookup) -> Result<()> {
        self.do_click(lookup)
    }

    async fn wait_for(&mut self, lookup: &Lookup, _timeout: Duration) -> Result<()> {
        self.select_first(lookup).map(|_| ())
    }

    async fn wait_and_click(&mut self, lookup: &Lookup, _timeout: Duration) -> Result<()> {
        self.do_click(lookup)
    }

    async fn wait_and_type(
        &mut self,
        lookup: &Lookup,
        text: &str,
        _timeout: Duration,
    ) -> Result<()> {
        self.select_first(lookup)?;
        self.typed.push((lookup.clone(), text.to_string()));
        Ok(())
    }

    async fn wait_for_attrs(
        &mut self,
        lookup: &Lookup,
        attr: &str,
        _timeout: Duration,
    ) -> Result<Vec<Option<String>>> {
        let values = self.select_all(lookup, attr);
        if values.is_empty() {
            return Err(ScrapeError::NotFound(lookup.to_string()));
        }
        Ok(values)
    }

    async fn current_context(&mut self) -> Result<ContextHandle> {
        if !self.contexts.contains_key(&self.focused) {
            return Err(ScrapeError::NotFound(format!(
                "browsing context {}",
                self.focused
            )));
        }
        Ok(self.focused.clone())
    }

    async fn open_context(&mut self) -> Result<ContextHandle> {
        self.opened += 1;
        let handle = ContextHandle(format!("ctx-{}", self.opened));
        self.contexts.insert(handle.clone(), None);
        Ok(handle)
    }

    async fn switch_to(&mut self, handle: &ContextHandle) -> Result<()> {
        if !self.contexts.contains_key(handle) {
            return Err(ScrapeError::NotFound(format!("browsing context {}", handle)));
        }
        self.focused = handle.clone();
        Ok(())
    }

    async fn close_context(&mut self) -> Result<()> {
        self.contexts.remove(&self.focused);
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        self.closed = true;
        Ok(())
    }
}

/// Default configuration with every wait and delay set to zero
pub fn fixture_config() -> crate::config::ScraperConfig {
    crate::config::ScraperConfig {
        timing: crate::config::TimingConfig::immediate(),
        ..Default::default()
    }
}

/// Home page whose search button leads to `results_url`
pub fn home_html(results_url: &str) -> String {
    format!(
        r#"<html><body>
<input id="global-header-search-bar-input">
<div id="category-dropdown">All categories</div>
<ul id="category-dropdown-menu">
  <li>All</li><li>Buy &amp; Sell</li><li>Cars &amp; Vehicles</li><li>Real Estate</li>
</ul>
<button class="sc-6e4eeff6-0 dXZBeM" data-href="{}">Search</button>
</body></html>"#,
        results_url
    )
}

/// Search results page listing `hrefs`, with a "next" control when `next` is set
pub fn results_html(hrefs: &[&str], next: Option<&str>) -> String {
    let mut html = String::from("<html><body><ul>");
    for href in hrefs {
        html.push_str(&format!(
            r#"<li><a class="sc-7c655743-0 ctMqFL" href="{}">Listing</a></li>"#,
            href
        ));
    }
    html.push_str("</ul>");
    if let Some(next) = next {
        html.push_str(&format!(
            r#"<a class="sc-70ac4838-0 dMffGH sc-4c795659-3 garPwt" href="{}">Next</a>"#,
            next
        ));
    }
    html.push_str("</body></html>");
    html
}

/// Listing page markup; every `None` field is left out of the page
#[derive(Debug, Clone, Default)]
pub struct ListingFixture {
    /// Title in the `#vip-body` layout
    pub title_a: Option<String>,
    /// Title in the `#ViewItemPage` layout
    pub title_b: Option<String>,
    /// Inner HTML of the `priceWrapper` element
    pub price_a: Option<String>,
    /// Inner HTML of the `priceContainer` element
    pub price_b: Option<String>,
    pub seller: Option<String>,
    pub description: Option<String>,
    /// Adds a "Show more" button right after the description
    pub show_more: bool,
    pub phone: Option<String>,
}

impl ListingFixture {
    /// A listing where every field is present, in the first layout
    pub fn complete(n: usize) -> Self {
        Self {
            title_a: Some(format!("Bicycle {}", n)),
            title_b: None,
            price_a: Some(format!("${}00\n<span>Negotiable</span>", n)),
            price_b: None,
            seller: Some(format!("Seller {}", n)),
            description: Some(format!("  Road bike number {}, barely used.  ", n)),
            show_more: true,
            phone: Some(format!("416-555-010{}", n)),
        }
    }

    pub fn html(&self) -> String {
        let mut html = String::from("<html><body>");
        if let Some(title) = &self.title_a {
            html.push_str(&format!(
                r#"<div id="vip-body"><div>gallery</div><div><div><h1> {} </h1></div></div></div>"#,
                title
            ));
        }
        if let Some(title) = &self.title_b {
            html.push_str(&format!(
                r#"<div id="ViewItemPage"><div></div><div></div><div></div><div></div><div><div><div><div><h1>{}</h1></div></div></div></div></div>"#,
                title
            ));
        }
        if let Some(price) = &self.price_a {
            html.push_str(&format!(
                r#"<span class="priceWrapper-3915768379">{}</span>"#,
                price
            ));
        }
        if let Some(price) = &self.price_b {
            html.push_str(&format!(
                r#"<div class="priceContainer-1877772231">{}</div>"#,
                price
            ));
        }
        if let Some(seller) = &self.seller {
            html.push_str(&format!(r#"<a class="link-441721484"> {} </a>"#, seller));
        }
        if let Some(phone) = &self.phone {
            html.push_str(&format!(
                r#"<button class="phoneShowNumberButton-1507564712">{}</button>"#,
                phone
            ));
        }
        if let Some(description) = &self.description {
            html.push_str(&format!(
                r#"<div itemprop="description">{}</div>"#,
                description
            ));
        }
        if self.show_more {
            html.push_str("<button>Show more</button>");
        }
        html.push_str("</body></html>");
        html
    }
}
