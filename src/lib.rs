pub mod config;
pub mod crawlers;
pub mod error;
pub mod extract;
pub mod filter;
pub mod results;
pub mod session;
pub mod utils;
pub mod writer;

// Re-export commonly used types for convenience
pub use config::{FailurePolicy, ScraperConfig, WriteMode};
pub use error::{Result, ScrapeError};
pub use results::{ListingRecord, ResultTable};
pub use session::{BrowserSession, WebDriverSession};

use crawlers::Crawl;
use crawlers::pagination::scrape_pages;
use crawlers::search::open_search_page;
use std::path::{Path, PathBuf};

/// What a finished run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Result pages walked
    pub pages: u32,
    /// Records collected
    pub listings: usize,
    /// Data rows written to the output file
    pub rows_written: usize,
    pub output: PathBuf,
}

/// Builder for one search-and-scrape run
pub struct Scrape {
    config: ScraperConfig,
}

impl Scrape {
    /// Create a new Scrape builder with the given configuration
    pub fn new(config: ScraperConfig) -> Self {
        Self { config }
    }

    /// Load configuration from a JSON file
    pub fn with_config_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(ScraperConfig::from_file(path)?))
    }

    /// Override the output file
    pub fn with_output(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.output.path = path.into();
        self
    }

    /// Override the output write mode
    pub fn with_write_mode(mut self, mode: WriteMode) -> Self {
        self.config.output.mode = mode;
        self
    }

    /// Override what is recorded for listings that fail to load
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.config.failure_policy = policy;
        self
    }

    /// Override the category selected before searching (`None` for all)
    pub fn with_category_option(mut self, option: Option<u32>) -> Self {
        self.config.category_option = option;
        self
    }

    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    /// Searches for `search`, walks up to `pages` result pages and writes
    /// every collected record to the output file.
    ///
    /// Nothing is written when the search itself cannot be submitted. Once
    /// traversal has started, whatever was collected is written even if
    /// traversal stops on an error; that error is returned afterwards.
    pub async fn run(
        &self,
        session: &mut dyn BrowserSession,
        search: &str,
        pages: u32,
    ) -> Result<RunSummary> {
        self.config.validate()?;
        let crawl = Crawl::new(&self.config)?;

        open_search_page(&self.config, session, search).await?;

        if pages == 0 {
            ::log::warn!("Asked for 0 pages; nothing will be scraped");
        }

        let mut table = ResultTable::new();
        let walked = scrape_pages(&crawl, session, pages, &mut table).await;
        if let Err(e) = &walked {
            ::log::error!(
                "Traversal stopped early, saving {} collected listings: {}",
                table.len(),
                e
            );
        }

        if table.is_empty() {
            ::log::warn!("No listings were collected for \"{}\"", search);
        }

        let rows_written = writer::save_to_csv(&table, &self.config.output)?;
        let pages = walked?;

        ::log::info!(
            "Scraped {} listings from {} pages into {}",
            table.len(),
            pages,
            self.config.output.path.display()
        );

        Ok(RunSummary {
            pages,
            listings: table.len(),
            rows_written,
            output: self.config.output.path.clone(),
        })
    }
}
