use crate::crawlers::Crawl;
use crate::crawlers::links::scrape_page_links;
use crate::error::Result;
use crate::results::ResultTable;
use crate::session::BrowserSession;

/// Walks up to `num_pages` search result pages starting from the page shown
/// in the focused context.
///
/// Each page's listings are scraped from a throwaway tab opened on the same
/// URL, so the main tab stays on the results page and can click through to
/// the next one. Stops early, without error, once no "next page" control can
/// be clicked. Returns the number of pages walked.
pub async fn scrape_pages(
    crawl: &Crawl,
    session: &mut dyn BrowserSession,
    num_pages: u32,
    table: &mut ResultTable,
) -> Result<u32> {
    let main = session.current_context().await?;
    let mut page_count = 0;

    while page_count < num_pages {
        ::log::info!("Scraping page {}", page_count + 1);
        let current_page = session.current_url().await?;

        let aux = session.open_context().await?;
        ::log::info!("New tab opened.");
        session.switch_to(&aux).await?;
        ::log::info!("Switched to new tab.");

        match session.goto(&current_page).await {
            Ok(()) => {
                scrape_page_links(crawl, session, table).await;
            }
            Err(e) => {
                ::log::error!("Failed to open results page in new tab: {}", e);
            }
        }

        session.close_context().await?;
        ::log::info!("Closed the new tab.");
        session.switch_to(&main).await?;
        ::log::info!("Switched back to the main tab.");
        page_count += 1;

        if page_count >= num_pages {
            break;
        }

        match session
            .wait_and_click(&crawl.selectors.next_page, crawl.timing.element_timeout())
            .await
        {
            Ok(()) => {
                let url = session.current_url().await.unwrap_or_default();
                ::log::info!("Moved to the next page: {}", url);
            }
            Err(e) => {
                ::log::info!("No more pages to scrape");
                ::log::debug!("Next page control unavailable: {}", e);
                break;
            }
        }
    }

    Ok(page_count)
}
