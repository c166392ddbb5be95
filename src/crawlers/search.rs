use crate::config::{ScraperConfig, SiteSelectors};
use crate::error::Result;
use crate::session::{BrowserSession, Lookup};
use std::time::Duration;

/// Opens the home page and submits a search for `search`, leaving the focused
/// context on the first page of results.
///
/// Category selection is best-effort; every other step is required.
pub async fn open_search_page(
    config: &ScraperConfig,
    session: &mut dyn BrowserSession,
    search: &str,
) -> Result<()> {
    let selectors = &config.selectors;
    let timeout = config.timing.element_timeout();

    session.goto(&config.base_url).await?;
    session
        .wait_and_type(&selectors.search_input, search, timeout)
        .await?;
    session.wait_for(&selectors.search_button, timeout).await?;

    if let Some(option) = config.category_option {
        if let Err(e) = select_category(session, selectors, option, timeout).await {
            ::log::error!("An error occurred while selecting the dropdown: {}", e);
        }
    }

    session
        .wait_and_click(&selectors.search_button, timeout)
        .await?;
    ::log::info!("Searching for \"{}\"", search);
    Ok(())
}

/// Lookup for the `option`-th (1-based) entry of the category menu
pub fn category_option_lookup(selectors: &SiteSelectors, option: u32) -> Lookup {
    Lookup::Css(format!("{}:nth-of-type({})", selectors.category_items, option))
}

async fn select_category(
    session: &mut dyn BrowserSession,
    selectors: &SiteSelectors,
    option: u32,
    timeout: Duration,
) -> Result<()> {
    session
        .wait_and_click(&selectors.category_dropdown, timeout)
        .await?;
    session.wait_for(&selectors.category_menu, timeout).await?;

    let lookup = category_option_lookup(selectors, option);
    ::log::info!("Looking for option with {}", lookup);
    session.wait_and_click(&lookup, timeout).await
}
