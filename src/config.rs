use crate::error::Result;
use crate::extract::{ReadRule, SelectorStrategy};
use crate::session::Lookup;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Configuration for a scrape run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScraperConfig {
    /// Home page the search starts from
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    #[serde(default)]
    pub browser: BrowserConfig,

    /// 1-based entry of the category dropdown to select before searching
    /// (None searches all categories)
    #[serde(default = "default_category_option")]
    pub category_option: Option<u32>,

    #[serde(default)]
    pub selectors: SiteSelectors,

    #[serde(default)]
    pub timing: TimingConfig,

    #[serde(default)]
    pub link_filter: LinkFilterConfig,

    #[serde(default)]
    pub output: OutputConfig,

    /// What to record for a listing whose page could not be loaded
    #[serde(default)]
    pub failure_policy: FailurePolicy,
}

/// Browser launch options
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrowserConfig {
    #[serde(default = "default_headless")]
    pub headless: bool,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Every element lookup used against the target site
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSelectors {
    pub search_input: Lookup,
    pub search_button: Lookup,
    pub category_dropdown: Lookup,
    pub category_menu: Lookup,
    /// Items of the category menu; the configured option is picked by position
    pub category_items: String,
    pub listing_links: Lookup,
    pub next_page: Lookup,
    /// Title strategies, tried in order
    pub title: Vec<SelectorStrategy>,
    /// Price strategies, tried in order
    pub price: Vec<SelectorStrategy>,
    pub seller: Vec<SelectorStrategy>,
    pub show_more: Lookup,
    pub description: Vec<SelectorStrategy>,
    pub phone_button: Lookup,
    /// Where the number shows up once revealed, tried in order
    pub phone_revealed: Vec<SelectorStrategy>,
}

/// Waits and delays, in milliseconds
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Upper bound for element waits
    pub element_timeout_ms: u64,
    /// Delay between clicking the phone reveal control and reading the number
    pub phone_settle_ms: u64,
    /// Inter-listing throttle lower bound
    pub throttle_min_ms: u64,
    /// Inter-listing throttle upper bound
    pub throttle_max_ms: u64,
}

/// Regex patterns applied to collected listing links
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinkFilterConfig {
    /// If non-empty, a link must match at least one of these
    #[serde(default)]
    pub include_patterns: Vec<String>,

    /// Links matching any of these are dropped (takes precedence)
    #[serde(default)]
    pub exclude_patterns: Vec<String>,
}

/// Where and how the result table is written
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_path")]
    pub path: PathBuf,

    #[serde(default)]
    pub mode: WriteMode,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    /// Replace any existing file
    #[default]
    Overwrite,
    /// Add rows to an existing file, writing the header only for a new file
    Append,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Record the URL with placeholder values in every other column
    #[default]
    Pad,
    /// Record nothing
    Discard,
}

fn default_base_url() -> String {
    "https://www.kijiji.ca/".to_string()
}

fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

fn default_category_option() -> Option<u32> {
    // Real estate
    Some(4)
}

fn default_headless() -> bool {
    true
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/92.0.4515.159 Safari/537.36"
        .to_string()
}

fn default_output_path() -> PathBuf {
    PathBuf::from("output").join("kijiji_data.csv")
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            headless: default_headless(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for SiteSelectors {
    fn default() -> Self {
        Self {
            search_input: Lookup::css("input#global-header-search-bar-input"),
            search_button: Lookup::css("button[class='sc-6e4eeff6-0 dXZBeM']"),
            category_dropdown: Lookup::css("div#category-dropdown"),
            category_menu: Lookup::css("ul#category-dropdown-menu"),
            category_items: "ul#category-dropdown-menu > li".to_string(),
            listing_links: Lookup::css("a[class*='sc-7c655743-0 ctMqFL']"),
            next_page: Lookup::css(".sc-70ac4838-0.dMffGH.sc-4c795659-3.garPwt"),
            title: vec![
                SelectorStrategy::new(
                    Lookup::css("#vip-body > div:nth-of-type(2) > div:nth-of-type(1) > h1"),
                    ReadRule::Trimmed,
                ),
                SelectorStrategy::new(
                    Lookup::css(
                        "#ViewItemPage > div:nth-of-type(5) > div > div:nth-of-type(1) > div > h1",
                    ),
                    ReadRule::Trimmed,
                ),
            ],
            price: vec![
                SelectorStrategy::new(
                    Lookup::css(".priceWrapper-3915768379"),
                    ReadRule::SingleLine,
                ),
                SelectorStrategy::new(
                    Lookup::css("div[class='priceContainer-1877772231']"),
                    ReadRule::SingleLine,
                ),
            ],
            seller: vec![SelectorStrategy::new(
                Lookup::css(".link-441721484"),
                ReadRule::Trimmed,
            )],
            show_more: Lookup::xpath("//button[normalize-space()='Show more']"),
            description: vec![SelectorStrategy::new(
                Lookup::css("div[itemprop='description']"),
                ReadRule::Trimmed,
            )],
            phone_button: Lookup::css("button[class*='phoneShowNumberButton']"),
            phone_revealed: vec![SelectorStrategy::new(
                Lookup::css(".phoneShowNumberButton-1507564712"),
                ReadRule::SingleLine,
            )],
        }
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            element_timeout_ms: 10_000,
            phone_settle_ms: 2_000,
            throttle_min_ms: 2_000,
            throttle_max_ms: 5_000,
        }
    }
}

impl TimingConfig {
    pub fn element_timeout(&self) -> Duration {
        Duration::from_millis(self.element_timeout_ms)
    }

    pub fn phone_settle(&self) -> Duration {
        Duration::from_millis(self.phone_settle_ms)
    }

    /// No waiting at all
    #[cfg(test)]
    pub(crate) fn immediate() -> Self {
        Self {
            element_timeout_ms: 0,
            phone_settle_ms: 0,
            throttle_min_ms: 0,
            throttle_max_ms: 0,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            mode: WriteMode::default(),
        }
    }
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            webdriver_url: default_webdriver_url(),
            browser: BrowserConfig::default(),
            category_option: default_category_option(),
            selectors: SiteSelectors::default(),
            timing: TimingConfig::default(),
            link_filter: LinkFilterConfig::default(),
            output: OutputConfig::default(),
            failure_policy: FailurePolicy::default(),
        }
    }
}

impl ScraperConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Parse configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values serde cannot check on its own
    pub fn validate(&self) -> Result<()> {
        if self.timing.throttle_min_ms > self.timing.throttle_max_ms {
            return Err(crate::error::ScrapeError::Config(format!(
                "throttle_min_ms ({}) exceeds throttle_max_ms ({})",
                self.timing.throttle_min_ms, self.timing.throttle_max_ms
            )));
        }
        if self.category_option == Some(0) {
            return Err(crate::error::ScrapeError::Config(
                "category_option is 1-based".to_string(),
            ));
        }
        Ok(())
    }

    /// Use `WEBDRIVER_URL` from the environment when it is set and non-empty
    pub fn apply_env(&mut self) {
        if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
            if !webdriver_url.is_empty() {
                self.webdriver_url = webdriver_url;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = ScraperConfig::from_json("{}").unwrap();
        assert_eq!(config.base_url, "https://www.kijiji.ca/");
        assert_eq!(config.webdriver_url, "http://localhost:4444");
        assert_eq!(config.category_option, Some(4));
        assert!(config.browser.headless);
        assert_eq!(config.timing.element_timeout(), Duration::from_secs(10));
        assert_eq!(config.timing.phone_settle(), Duration::from_secs(2));
        assert_eq!(config.output.mode, WriteMode::Overwrite);
        assert_eq!(config.failure_policy, FailurePolicy::Pad);
        assert_eq!(config.selectors.title.len(), 2);
        assert_eq!(config.selectors.price.len(), 2);
    }

    #[test]
    fn test_partial_config() {
        let json = r#"{
            "category_option": null,
            "output": { "path": "out/ads.csv", "mode": "append" },
            "failure_policy": "discard",
            "timing": { "throttle_min_ms": 100, "throttle_max_ms": 200 },
            "selectors": {
                "title": [ { "lookup": { "by": "css", "query": "h1.title" }, "read": "trimmed" } ]
            }
        }"#;
        let config = ScraperConfig::from_json(json).unwrap();

        assert_eq!(config.category_option, None);
        assert_eq!(config.output.path, PathBuf::from("out/ads.csv"));
        assert_eq!(config.output.mode, WriteMode::Append);
        assert_eq!(config.failure_policy, FailurePolicy::Discard);
        assert_eq!(config.timing.throttle_min_ms, 100);
        // Unset timing fields keep their defaults
        assert_eq!(config.timing.element_timeout_ms, 10_000);
        assert_eq!(config.selectors.title.len(), 1);
        assert_eq!(config.selectors.title[0].lookup, Lookup::css("h1.title"));
        // Unset selectors keep their defaults
        assert_eq!(config.selectors.price.len(), 2);
    }

    #[test]
    fn test_invalid_throttle_range() {
        let json = r#"{ "timing": { "throttle_min_ms": 5000, "throttle_max_ms": 10 } }"#;
        assert!(ScraperConfig::from_json(json).is_err());
    }

    #[test]
    fn test_zero_category_rejected() {
        assert!(ScraperConfig::from_json(r#"{ "category_option": 0 }"#).is_err());
    }
}
