use crate::config::BrowserConfig;
use crate::error::{Result, ScrapeError};
use crate::session::{BrowserSession, ContextHandle, Lookup};
use async_trait::async_trait;
use fantoccini::elements::Element;
use fantoccini::wd::{Capabilities, WindowHandle};
use fantoccini::{Client, ClientBuilder, Locator};
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Polling interval while waiting for an element to become clickable
const CLICKABLE_POLL: Duration = Duration::from_millis(250);

/// Browser session backed by a WebDriver server (chromedriver by default)
pub struct WebDriverSession {
    client: Client,
    windows: HashMap<ContextHandle, WindowHandle>,
}

fn locator(lookup: &Lookup) -> Locator<'_> {
    match lookup {
        Lookup::Css(q) => Locator::Css(q),
        Lookup::XPath(q) => Locator::XPath(q),
    }
}

/// Chrome capabilities for headless mode and a fixed user agent
fn chrome_capabilities(browser: &BrowserConfig) -> Capabilities {
    let mut args = vec![format!("--user-agent={}", browser.user_agent)];
    if browser.headless {
        args.push("--headless=new".to_string());
    }

    let mut caps = Capabilities::new();
    caps.insert(
        "goog:chromeOptions".to_string(),
        serde_json::json!({ "args": args }),
    );
    caps
}

impl WebDriverSession {
    /// Connects to the WebDriver server at `webdriver_url`, falling back to the
    /// usual local driver ports when that fails
    pub async fn connect(webdriver_url: &str, browser: &BrowserConfig) -> Result<Self> {
        let caps = chrome_capabilities(browser);

        let mut last_error = match Self::try_connect(webdriver_url, &caps).await {
            Ok(client) => return Self::from_client(client).await,
            Err(e) => {
                ::log::error!("Failed to connect to WebDriver at {}: {}", webdriver_url, e);
                e
            }
        };

        let fallback_urls = [
            "http://localhost:9515", // ChromeDriver default
            "http://127.0.0.1:4444",
        ];

        for url in fallback_urls.iter() {
            if *url == webdriver_url {
                continue;
            }

            ::log::info!("Trying fallback WebDriver URL: {}", url);
            match Self::try_connect(url, &caps).await {
                Ok(client) => return Self::from_client(client).await,
                Err(e) => last_error = e,
            }
        }

        ::log::error!(
            "Make sure a WebDriver server is running or set the WEBDRIVER_URL environment variable"
        );
        Err(ScrapeError::Connect {
            url: webdriver_url.to_string(),
            reason: last_error,
        })
    }

    async fn try_connect(url: &str, caps: &Capabilities) -> std::result::Result<Client, String> {
        let mut builder = ClientBuilder::native();
        builder.capabilities(caps.clone());
        let client = builder.connect(url).await.map_err(|e| e.to_string())?;
        ::log::debug!("Connected to WebDriver at {}", url);
        Ok(client)
    }

    async fn from_client(client: Client) -> Result<Self> {
        let mut session = Self {
            client,
            windows: HashMap::new(),
        };
        // Register the initial window so it has a handle like any other context
        super::initial_context(&mut session).await?;
        Ok(session)
    }

    fn register(&mut self, window: WindowHandle) -> ContextHandle {
        let handle = ContextHandle(String::from(window.clone()));
        self.windows.insert(handle.clone(), window);
        handle
    }

    async fn find(&self, lookup: &Lookup) -> Result<Element> {
        self.client
            .find(locator(lookup))
            .await
            .map_err(|_| ScrapeError::NotFound(lookup.to_string()))
    }

    async fn wait_present(&self, lookup: &Lookup, timeout: Duration) -> Result<Element> {
        self.client
            .wait()
            .at_most(timeout)
            .for_element(locator(lookup))
            .await
            .map_err(|_| ScrapeError::NotFound(lookup.to_string()))
    }

    async fn is_clickable(element: &Element) -> bool {
        let displayed = element.is_displayed().await.unwrap_or(false);
        let enabled = element.is_enabled().await.unwrap_or(false);
        displayed && enabled
    }
}

#[async_trait]
impl BrowserSession for WebDriverSession {
    async fn goto(&mut self, url: &str) -> Result<()> {
        self.client
            .goto(url)
            .await
            .map_err(|e| ScrapeError::Navigation {
                url: url.to_string(),
                reason: e.to_string(),
            })
    }

    async fn current_url(&mut self) -> Result<String> {
        let url = self
            .client
            .current_url()
            .await
            .map_err(|e| ScrapeError::command("reading current URL", e))?;
        Ok(url.to_string())
    }

    async fn text(&mut self, lookup: &Lookup) -> Result<String> {
        let element = self.find(lookup).await?;
        element
            .text()
            .await
            .map_err(|e| ScrapeError::command(format!("reading text of {}", lookup), e))
    }

    async fn click(&mut self, lookup: &Lookup) -> Result<()> {
        let element = self.find(lookup).await?;
        element
            .click()
            .await
            .map_err(|e| ScrapeError::command(format!("clicking {}", lookup), e))
    }

    async fn wait_for(&mut self, lookup: &Lookup, timeout: Duration) -> Result<()> {
        self.wait_present(lookup, timeout).await.map(|_| ())
    }

    async fn wait_and_click(&mut self, lookup: &Lookup, timeout: Duration) -> Result<()> {
        let deadline = Instant::now() + timeout;
        let element = self.wait_present(lookup, timeout).await?;

        while !Self::is_clickable(&element).await {
            if Instant::now() >= deadline {
                return Err(ScrapeError::NotFound(format!("clickable {}", lookup)));
            }
            tokio::time::sleep(CLICKABLE_POLL).await;
        }

        element
            .click()
            .await
            .map_err(|e| ScrapeError::command(format!("clicking {}", lookup), e))
    }

    async fn wait_and_type(
        &mut self,
        lookup: &Lookup,
        text: &str,
        timeout: Duration,
    ) -> Result<()> {
        let element = self.wait_present(lookup, timeout).await?;
        element
            .send_keys(text)
            .await
            .map_err(|e| ScrapeError::command(format!("typing into {}", lookup), e))
    }

    async fn wait_for_attrs(
        &mut self,
        lookup: &Lookup,
        attr: &str,
        timeout: Duration,
    ) -> Result<Vec<Option<String>>> {
        self.wait_present(lookup, timeout).await?;

        let elements = self
            .client
            .find_all(locator(lookup))
            .await
            .map_err(|e| ScrapeError::command(format!("finding all {}", lookup), e))?;

        let mut values = Vec::with_capacity(elements.len());
        for element in &elements {
            let value = element
                .attr(attr)
                .await
                .map_err(|e| ScrapeError::command(format!("reading `{}` attribute", attr), e))?;
            values.push(value);
        }
        Ok(values)
    }

    async fn current_context(&mut self) -> Result<ContextHandle> {
        let window = self
            .client
            .window()
            .await
            .map_err(|e| ScrapeError::command("reading current window handle", e))?;
        Ok(self.register(window))
    }

    async fn open_context(&mut self) -> Result<ContextHandle> {
        let response = self
            .client
            .new_window(true)
            .await
            .map_err(|e| ScrapeError::command("opening a new tab", e))?;
        Ok(self.register(response.handle))
    }

    async fn switch_to(&mut self, handle: &ContextHandle) -> Result<()> {
        let window = self
            .windows
            .get(handle)
            .cloned()
            .ok_or_else(|| ScrapeError::NotFound(format!("browsing context {}", handle)))?;
        self.client
            .switch_to_window(window)
            .await
            .map_err(|e| ScrapeError::command(format!("switching to tab {}", handle), e))
    }

    async fn close_context(&mut self) -> Result<()> {
        let window = self
            .client
            .window()
            .await
            .map_err(|e| ScrapeError::command("reading current window handle", e))?;
        self.client
            .close_window()
            .await
            .map_err(|e| ScrapeError::command("closing tab", e))?;
        self.windows
            .remove(&ContextHandle(String::from(window)));
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        self.windows.clear();
        self.client
            .clone()
            .close()
            .await
            .map_err(|e| ScrapeError::command("closing WebDriver session", e))
    }
}
