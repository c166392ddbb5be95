/// Placeholder for a field that could not be extracted
pub const NOT_FOUND: &str = "N/A";

/// Phone placeholder for a listing without a reveal control or number
pub const PHONE_NOT_AVAILABLE: &str = "Not available";

/// Phone placeholder for a listing whose page could not be loaded
pub const PHONE_UNREACHABLE: &str = "Phone isn't available";

/// Column names of the output table, in order
pub const COLUMNS: [&str; 6] = [
    "Name of sellers",
    "Offer Titles",
    "Prices",
    "Phone numbers",
    "Descriptions",
    "Links of the offers",
];

/// Everything recorded for one visited listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRecord {
    pub seller: String,
    pub title: String,
    pub price: String,
    pub phone: String,
    pub description: String,
    /// Listing URL
    pub link: String,
}

impl ListingRecord {
    /// Builds a record from extractor output, substituting [`NOT_FOUND`] for
    /// missing fields
    pub fn new(
        link: String,
        phone: String,
        title: Option<String>,
        price: Option<String>,
        seller: Option<String>,
        description: Option<String>,
    ) -> Self {
        let or_placeholder = |v: Option<String>| v.unwrap_or_else(|| NOT_FOUND.to_string());
        Self {
            seller: or_placeholder(seller),
            title: or_placeholder(title),
            price: or_placeholder(price),
            phone,
            description: or_placeholder(description),
            link,
        }
    }

    /// Record for a listing whose page could not be loaded
    pub fn unreachable(link: String) -> Self {
        Self::new(link, PHONE_UNREACHABLE.to_string(), None, None, None, None)
    }

    /// Values in column order
    pub fn to_row(&self) -> [&str; 6] {
        [
            self.seller.as_str(),
            self.title.as_str(),
            self.price.as_str(),
            self.phone.as_str(),
            self.description.as_str(),
            self.link.as_str(),
        ]
    }
}

/// Records accumulated over a run, in visit order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultTable {
    records: Vec<ListingRecord>,
}

impl ResultTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: ListingRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[ListingRecord] {
        &self.records
    }

    /// Splits the table into its six column sequences
    pub fn columns(&self) -> ResultColumns {
        let mut columns = ResultColumns::default();
        for r in &self.records {
            for (column, value) in columns.all_mut().into_iter().zip(r.to_row()) {
                column.push(value.to_string());
            }
        }
        columns
    }
}

/// The output table as six parallel sequences
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultColumns {
    pub names: Vec<String>,
    pub titles: Vec<String>,
    pub prices: Vec<String>,
    pub phones: Vec<String>,
    pub descriptions: Vec<String>,
    pub links: Vec<String>,
}

impl ResultColumns {
    fn all(&self) -> [&Vec<String>; 6] {
        [
            &self.names,
            &self.titles,
            &self.prices,
            &self.phones,
            &self.descriptions,
            &self.links,
        ]
    }

    fn all_mut(&mut self) -> [&mut Vec<String>; 6] {
        [
            &mut self.names,
            &mut self.titles,
            &mut self.prices,
            &mut self.phones,
            &mut self.descriptions,
            &mut self.links,
        ]
    }

    /// Length of the longest sequence
    pub fn max_len(&self) -> usize {
        self.all().iter().map(|c| c.len()).max().unwrap_or(0)
    }

    pub fn is_aligned(&self) -> bool {
        let len = self.max_len();
        self.all().iter().all(|c| c.len() == len)
    }

    /// Right-pads every shorter sequence with [`NOT_FOUND`] up to the longest one
    pub fn pad(&mut self) {
        let len = self.max_len();
        for column in self.all_mut() {
            column.resize(len, NOT_FOUND.to_string());
        }
    }

    /// Row `i` in column order. Call after [`pad`](Self::pad).
    pub fn row(&self, i: usize) -> [&str; 6] {
        self.all().map(|c| c[i].as_str())
    }
}
