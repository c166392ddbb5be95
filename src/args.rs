use clap::Parser;
use kijiji_scrape::{ScraperConfig, WriteMode};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "kijiji-scrape")]
#[command(about = "Scrapes Kijiji search results into a CSV file")]
#[command(version)]
pub struct Args {
    /// What to search for (prompted for when omitted)
    pub search: Option<String>,

    /// Number of result pages to scrape (prompted for when omitted)
    #[arg(short, long)]
    pub pages: Option<u32>,

    /// JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// CSV file to write
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Append rows to the output file instead of replacing it
    #[arg(long)]
    pub append: bool,

    /// WebDriver server URL (overrides WEBDRIVER_URL and the config file)
    #[arg(long)]
    pub webdriver_url: Option<String>,

    /// Show the browser window
    #[arg(long)]
    pub no_headless: bool,
}

impl Args {
    /// Apply command-line overrides on top of a loaded configuration
    pub fn apply_to(&self, config: &mut ScraperConfig) {
        if let Some(output) = &self.output {
            config.output.path = output.clone();
        }
        if self.append {
            config.output.mode = WriteMode::Append;
        }
        if let Some(webdriver_url) = &self.webdriver_url {
            config.webdriver_url = webdriver_url.clone();
        }
        if self.no_headless {
            config.browser.headless = false;
        }
    }
}
