use crate::crawlers::Crawl;
use crate::crawlers::listing::scrape_listing;
use crate::results::ResultTable;
use crate::session::BrowserSession;
use crate::utils;

/// Collects every listing link on the results page shown in the focused
/// context and scrapes the listings one at a time, in page order.
///
/// Returns the number of listings visited; 0 when no links showed up
/// within the element timeout.
pub async fn scrape_page_links(
    crawl: &Crawl,
    session: &mut dyn BrowserSession,
    table: &mut ResultTable,
) -> usize {
    let page_url = match session.current_url().await {
        Ok(url) => url,
        Err(e) => {
            ::log::error!("An error occurred while scraping page links: {}", e);
            return 0;
        }
    };

    let hrefs = match session
        .wait_for_attrs(
            &crawl.selectors.listing_links,
            "href",
            crawl.timing.element_timeout(),
        )
        .await
    {
        Ok(hrefs) => hrefs,
        Err(e) => {
            ::log::error!("An error occurred while scraping page links: {}", e);
            return 0;
        }
    };

    let links = crawl.link_filter.apply(&page_url, hrefs);
    ::log::info!("Found {} listing links on {}", links.len(), page_url);

    for link in &links {
        scrape_listing(crawl, session, link, table).await;
        utils::throttle(&crawl.timing).await;
    }

    links.len()
}
