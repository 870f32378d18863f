//! Value types returned by a postcode lookup.

use serde::Serialize;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Number of comma-separated positions in a getaddress.io address string.
pub(crate) const ADDRESS_FIELDS: usize = 7;

/// A single postal address, decomposed into its seven positional fields.
///
/// Fields that the API left blank are empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Address {
    line1: String,
    line2: String,
    line3: String,
    line4: String,
    town: String,
    postal_town: String,
    county: String,
}

impl Address {
    /// Split a raw `"line1, line2, line3, line4, town, postal town, county"` string.
    ///
    /// Each part is trimmed. Missing trailing parts are left empty; parts past
    /// the seventh are dropped.
    pub fn parse(raw: &str) -> Self {
        let mut parts = raw.split(',').map(str::trim);
        let mut next = || parts.next().unwrap_or_default().to_string();

        let address = Self {
            line1: next(),
            line2: next(),
            line3: next(),
            line4: next(),
            town: next(),
            postal_town: next(),
            county: next(),
        };

        let extra = raw.split(',').count().saturating_sub(ADDRESS_FIELDS);
        if extra > 0 {
            log::warn!("address has {extra} unexpected trailing component(s), ignoring: {raw:?}");
        }

        address
    }

    /// First address line, usually the house name or number and street.
    pub fn line1(&self) -> &str {
        &self.line1
    }

    /// Second address line.
    pub fn line2(&self) -> &str {
        &self.line2
    }

    /// Third address line.
    pub fn line3(&self) -> &str {
        &self.line3
    }

    /// Fourth address line.
    pub fn line4(&self) -> &str {
        &self.line4
    }

    /// Town or locality.
    pub fn town(&self) -> &str {
        &self.town
    }

    /// The Royal Mail post town, which can differ from [`Address::town`].
    pub fn postal_town(&self) -> &str {
        &self.postal_town
    }

    /// County, often blank for addresses in cities.
    pub fn county(&self) -> &str {
        &self.county
    }

    /// The non-empty fields in order, ready for printing on an envelope.
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.fields().into_iter().filter(|field| !field.is_empty())
    }

    /// Whether the composed address text contains `needle` (case-sensitive).
    pub fn matches(&self, needle: &str) -> bool {
        self.to_string().contains(needle)
    }

    fn fields(&self) -> [&str; ADDRESS_FIELDS] {
        [
            &self.line1,
            &self.line2,
            &self.line3,
            &self.line4,
            &self.town,
            &self.postal_town,
            &self.county,
        ]
    }
}

/// Re-joins the fields in the API's `", "`-separated layout.
impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.fields().join(", "))
    }
}

impl FromStr for Address {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

/// The result of a postcode lookup: the postcode's coordinates and its addresses.
///
/// Coordinates are kept as the decimal text the API sent so no precision is
/// lost; use [`LookupResponse::latitude_f64`] for arithmetic.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LookupResponse {
    latitude: String,
    longitude: String,
    addresses: Vec<Address>,
}

impl LookupResponse {
    pub(crate) fn new(latitude: String, longitude: String, addresses: Vec<Address>) -> Self {
        Self {
            latitude,
            longitude,
            addresses,
        }
    }

    /// Latitude as the decimal text the API sent.
    pub fn latitude(&self) -> &str {
        &self.latitude
    }

    /// Longitude as the decimal text the API sent.
    pub fn longitude(&self) -> &str {
        &self.longitude
    }

    /// Latitude as a number, `None` if the text is not a valid float.
    pub fn latitude_f64(&self) -> Option<f64> {
        self.latitude.parse().ok()
    }

    /// Longitude as a number, `None` if the text is not a valid float.
    pub fn longitude_f64(&self) -> Option<f64> {
        self.longitude.parse().ok()
    }

    /// Addresses in the order the API returned them.
    pub fn addresses(&self) -> &[Address] {
        &self.addresses
    }

    /// Consume the response, keeping only the addresses.
    pub fn into_addresses(self) -> Vec<Address> {
        self.addresses
    }

    /// Keep only the addresses whose composed text contains `needle`.
    ///
    /// Matching is a case-sensitive substring test and preserves order.
    pub fn filter(mut self, needle: &str) -> Self {
        self.addresses.retain(|address| address.matches(needle));
        self
    }
}
