pub mod links;
pub mod listing;
pub mod pagination;
pub mod search;

#[cfg(test)]
mod tests;

use crate::config::{FailurePolicy, ScraperConfig, SiteSelectors, TimingConfig};
use crate::error::Result;
use crate::extract::ListingExtractors;
use crate::filter::LinkFilter;

/// Everything the traversal needs besides the session and the result table
pub struct Crawl {
    pub extractors: ListingExtractors,
    pub link_filter: LinkFilter,
    pub selectors: SiteSelectors,
    pub timing: TimingConfig,
    pub failure_policy: FailurePolicy,
}

impl Crawl {
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        Ok(Self {
            extractors: ListingExtractors::new(&config.selectors, &config.timing),
            link_filter: LinkFilter::new(&config.link_filter)?,
            selectors: config.selectors.clone(),
            timing: config.timing.clone(),
            failure_policy: config.failure_policy,
        })
    }
}
