
use crate::session::fixture::{FixtureSession, ListingFixture, results_html};

pub(super) const HOME: &str = "https://www.kijiji.ca/";
pub(super) const RESULTS_1: &str = "https://www.kijiji.ca/b-search/bicycle/k0";
pub(super) const RESULTS_2: &str = "https://www.kijiji.ca/b-search/bicycle/page-2/k0";

pub(super) fn listing_url(n: usize) -> String {
    format!("https://www.kijiji.ca/v-bike/{}", n)
}

/// Session serving complete listings `ns` and a results page linking to them
pub(super) fn results_session(ns: &[usize], next: Option<&str>) -> FixtureSession {
    let hrefs: Vec<String> = ns.iter().map(|n| format!("/v-bike/{}", n)).collect();
    let hrefs: Vec<&str> = hrefs.iter().map(String::as_str).collect();
    let mut session =
        FixtureSession::new().with_page(RESULTS_1, &results_html(&hrefs, next));
    for &n in ns {
        session = session.with_page(&listing_url(n), &ListingFixture::complete(n).html());
    }
    session
}
