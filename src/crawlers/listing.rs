use crate::config::FailurePolicy;
use crate::crawlers::Crawl;
use crate::results::{ListingRecord, ResultTable};
use crate::session::BrowserSession;

/// Visits one listing and records it.
///
/// Exactly one complete record is pushed per call, except for a listing
/// that fails to load under [`FailurePolicy::Discard`]. Returns whether a
/// record was pushed.
pub async fn scrape_listing(
    crawl: &Crawl,
    session: &mut dyn BrowserSession,
    url: &str,
    table: &mut ResultTable,
) -> bool {
    if let Err(e) = session.goto(url).await {
        ::log::error!("An error occurred while processing URL {}: {}", url, e);
        return match crawl.failure_policy {
            FailurePolicy::Pad => {
                table.push(ListingRecord::unreachable(url.to_string()));
                true
            }
            FailurePolicy::Discard => false,
        };
    }

    let extractors = &crawl.extractors;
    let phone = extractors.phone(session).await;
    let title = extractors.title(session).await;
    let price = extractors.price(session).await;
    let seller = extractors.seller(session).await;
    let description = extractors.description(session).await;

    table.push(ListingRecord::new(
        url.to_string(),
        phone,
        title,
        price,
        seller,
        description,
    ));
    true
}
