use crate::config::LinkFilterConfig;
use regex::Regex;
use url::Url;

/// Turns raw listing hrefs into absolute URLs and drops unwanted ones.
///
/// Order and duplicates are preserved.
#[derive(Debug, Default)]
pub struct LinkFilter {
    include_regexes: Vec<Regex>,
    exclude_regexes: Vec<Regex>,
}

impl LinkFilter {
    /// Create a new link filter from configuration
    pub fn new(config: &LinkFilterConfig) -> Result<Self, regex::Error> {
        let mut include_regexes = Vec::with_capacity(config.include_patterns.len());
        for pattern in &config.include_patterns {
            include_regexes.push(Regex::new(pattern)?);
        }

        let mut exclude_regexes = Vec::with_capacity(config.exclude_patterns.len());
        for pattern in &config.exclude_patterns {
            exclude_regexes.push(Regex::new(pattern)?);
        }

        Ok(Self {
            include_regexes,
            exclude_regexes,
        })
    }

    /// Resolves every href against `page_url` and keeps the ones that pass
    pub fn apply(&self, page_url: &str, hrefs: Vec<Option<String>>) -> Vec<String> {
        let base = Url::parse(page_url).ok();
        let mut links = Vec::with_capacity(hrefs.len());

        for href in hrefs {
            let Some(href) = href else {
                ::log::debug!("Skipping listing link without href");
                continue;
            };

            let Some(resolved) = resolve(base.as_ref(), &href) else {
                ::log::warn!("Skipping unparsable listing link: {}", href);
                continue;
            };

            if !self.should_visit(&resolved) {
                ::log::debug!("Link filter rejected: {}", resolved);
                continue;
            }

            links.push(normalize_url(&resolved).to_string());
        }

        links
    }

    /// Determine if a listing URL passes the include/exclude patterns
    pub fn should_visit(&self, url: &Url) -> bool {
        let url_str = url.as_str();

        // Exclusions take precedence
        if self.exclude_regexes.iter().any(|r| r.is_match(url_str)) {
            return false;
        }

        self.include_regexes.is_empty() || self.include_regexes.iter().any(|r| r.is_match(url_str))
    }
}

fn resolve(base: Option<&Url>, href: &str) -> Option<Url> {
    match base {
        Some(base) => base.join(href).ok(),
        None => Url::parse(href).ok(),
    }
}

/// Removes the fragment, which never changes the listing served
pub fn normalize_url(url: &Url) -> Url {
    let mut normalized = url.clone();
    normalized.set_fragment(None);
    normalized
}
