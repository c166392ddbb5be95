pub mod fields;
pub mod text;


pub use fields::ListingExtractors;

use crate::error::Result;
use crate::session::{BrowserSession, Lookup};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The fields read from a listing page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Price,
    Seller,
    Description,
    Phone,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Title => "Title",
            Field::Price => "Price",
            Field::Seller => "Seller name",
            Field::Description => "Description",
            Field::Phone => "Phone number",
        };
        f.write_str(name)
    }
}

/// How raw element text is turned into a field value
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadRule {
    /// Leading and trailing whitespace removed
    #[default]
    Trimmed,
    /// Trimmed, with line breaks collapsed into spaces
    SingleLine,
}

/// One way of reading a field off a page
#[async_trait]
pub trait ExtractionStrategy: Send + Sync {
    /// The field text, or an error when this strategy does not apply to the page
    async fn extract(&self, session: &mut dyn BrowserSession) -> Result<String>;

    /// Short description for logs
    fn describe(&self) -> String;
}

/// Reads the text of the first element matching a lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorStrategy {
    pub lookup: Lookup,
    #[serde(default)]
    pub read: ReadRule,
}

impl SelectorStrategy {
    pub fn new(lookup: Lookup, read: ReadRule) -> Self {
        Self { lookup, read }
    }
}

#[async_trait]
impl ExtractionStrategy for SelectorStrategy {
    async fn extract(&self, session: &mut dyn BrowserSession) -> Result<String> {
        let raw = session.text(&self.lookup).await?;
        Ok(text::read(&raw, self.read))
    }

    fn describe(&self) -> String {
        self.lookup.to_string()
    }
}

/// A field together with its strategies in priority order
pub struct FieldExtractor {
    field: Field,
    strategies: Vec<Box<dyn ExtractionStrategy>>,
}

impl FieldExtractor {
    pub fn new(field: Field) -> Self {
        Self {
            field,
            strategies: Vec::new(),
        }
    }

    /// Builds an extractor from selector strategies, keeping their order
    pub fn from_selectors(field: Field, selectors: &[SelectorStrategy]) -> Self {
        selectors
            .iter()
            .cloned()
            .fold(Self::new(field), |extractor, s| extractor.with_strategy(s))
    }

    /// Append a strategy with the lowest priority so far
    pub fn with_strategy(mut self, strategy: impl ExtractionStrategy + 'static) -> Self {
        self.strategies.push(Box::new(strategy));
        self
    }

    pub fn field(&self) -> Field {
        self.field
    }

    /// Tries each strategy in order and returns the first non-empty value.
    ///
    /// Never fails: when every strategy misses, a warning is logged and `None`
    /// is returned.
    pub async fn extract(&self, session: &mut dyn BrowserSession) -> Option<String> {
        for strategy in &self.strategies {
            match strategy.extract(session).await {
                Ok(value) if !value.is_empty() => return Some(value),
                Ok(_) => {
                    ::log::debug!("{} strategy {} matched empty text", self.field, strategy.describe());
                }
                Err(e) => {
                    ::log::debug!("{} strategy {} missed: {}", self.field, strategy.describe(), e);
                }
            }
        }

        ::log::warn!("{} not found", self.field);
        None
    }
}
