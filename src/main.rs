use clap::Parser;
use dialoguer::Input;
use kijiji_scrape::{BrowserSession, Scrape, ScrapeError, ScraperConfig, WebDriverSession};

mod args;
use args::Args;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging, defaulting to info
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Parse command-line arguments
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => ScraperConfig::from_file(path)?,
        None => ScraperConfig::default(),
    };
    config.apply_env();
    args.apply_to(&mut config);
    config.validate()?;

    let search = match &args.search {
        Some(search) => search.clone(),
        None => prompt_search()?,
    };
    let pages = match args.pages {
        Some(pages) => pages,
        None => prompt_pages()?,
    };

    println!("Note: scraping requires a WebDriver server (e.g., ChromeDriver).");
    println!(
        "Set WEBDRIVER_URL environment variable if not using the default {}",
        config.webdriver_url
    );

    let mut session = WebDriverSession::connect(&config.webdriver_url, &config.browser).await?;

    let start_time = std::time::Instant::now();
    let result = Scrape::new(config).run(&mut session, &search, pages).await;

    if let Err(e) = session.close().await {
        ::log::warn!("Failed to close the browser session: {}", e);
    }

    let summary = result?;
    ::log::info!(
        "Scraping complete - {} listings from {} pages in {:.2} seconds, saved to {}",
        summary.listings,
        summary.pages,
        start_time.elapsed().as_secs_f64(),
        summary.output.display()
    );

    Ok(())
}

fn prompt_search() -> Result<String, ScrapeError> {
    let search: String = Input::new()
        .with_prompt("What are you looking for?")
        .allow_empty(true)
        .interact_text()
        .map_err(|e| ScrapeError::Input(e.to_string()))?;

    Ok(search_term(&search))
}

/// Search text is free-form; only surrounding whitespace is dropped
fn search_term(input: &str) -> String {
    input.trim().to_string()
}

fn prompt_pages() -> Result<u32, ScrapeError> {
    let pages: String = Input::new()
        .with_prompt("How many pages you want to scrape? (1 page = 45 results)")
        .interact_text()
        .map_err(|e| ScrapeError::Input(e.to_string()))?;

    pages
        .trim()
        .parse()
        .map_err(|_| ScrapeError::Input(format!("not a page count: {:?}", pages.trim())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_term_passed_through() {
        assert_eq!(search_term("  mountain bike \n"), "mountain bike");
        assert_eq!(search_term("2br $1,500 / month!"), "2br $1,500 / month!");
        assert_eq!(search_term("   "), "");
    }
}
