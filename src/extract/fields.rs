use crate::config::{SiteSelectors, TimingConfig};
use crate::extract::{Field, FieldExtractor};
use crate::results::PHONE_NOT_AVAILABLE;
use crate::session::{BrowserSession, Lookup};
use std::time::Duration;

/// All field extractors for a listing page
pub struct ListingExtractors {
    title: FieldExtractor,
    price: FieldExtractor,
    seller: FieldExtractor,
    description: FieldExtractor,
    show_more: Lookup,
    phone_button: Lookup,
    phone: FieldExtractor,
    phone_settle: Duration,
}

impl ListingExtractors {
    pub fn new(selectors: &SiteSelectors, timing: &TimingConfig) -> Self {
        Self {
            title: FieldExtractor::from_selectors(Field::Title, &selectors.title),
            price: FieldExtractor::from_selectors(Field::Price, &selectors.price),
            seller: FieldExtractor::from_selectors(Field::Seller, &selectors.seller),
            description: FieldExtractor::from_selectors(Field::Description, &selectors.description),
            show_more: selectors.show_more.clone(),
            phone_button: selectors.phone_button.clone(),
            phone: FieldExtractor::from_selectors(Field::Phone, &selectors.phone_revealed),
            phone_settle: timing.phone_settle(),
        }
    }

    pub async fn title(&self, session: &mut dyn BrowserSession) -> Option<String> {
        self.title.extract(session).await
    }

    pub async fn price(&self, session: &mut dyn BrowserSession) -> Option<String> {
        self.price.extract(session).await
    }

    pub async fn seller(&self, session: &mut dyn BrowserSession) -> Option<String> {
        let seller = self.seller.extract(session).await;
        if let Some(name) = &seller {
            ::log::info!("Seller name found: {}", name);
        }
        seller
    }

    /// Expands a collapsed description first, if the page offers to
    pub async fn description(&self, session: &mut dyn BrowserSession) -> Option<String> {
        if let Err(e) = session.click(&self.show_more).await {
            ::log::debug!("No \"Show more\" control to expand: {}", e);
        }
        self.description.extract(session).await
    }

    /// Reveals and reads the phone number.
    ///
    /// Returns [`PHONE_NOT_AVAILABLE`] when the listing has no reveal control
    /// or nothing shows up once it has been clicked.
    pub async fn phone(&self, session: &mut dyn BrowserSession) -> String {
        if let Err(e) = session.click(&self.phone_button).await {
            ::log::warn!("No phone number available: {}", e);
            return PHONE_NOT_AVAILABLE.to_string();
        }

        tokio::time::sleep(self.phone_settle).await;

        match self.phone.extract(session).await {
            Some(number) => {
                ::log::info!("Phone number found: {}", number);
                number
            }
            None => PHONE_NOT_AVAILABLE.to_string(),
        }
    }
}
