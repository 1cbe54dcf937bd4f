//! Catalog item domain model

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// A vehicle in the restomod catalog.
///
/// Instances are built by the client's normalization layer and are never
/// mutated afterwards. `brand_name` and `price` stay optional so that a
/// malformed backend record can still be listed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: String,
    pub name: String,
    pub brand_name: Option<String>,
    /// Non-negative amount in the shop currency
    pub price: Option<f64>,
    pub status: ItemStatus,
    pub description: Option<String>,
    #[serde(default)]
    pub images: Vec<String>,
}

impl CatalogItem {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            brand_name: None,
            price: None,
            status: ItemStatus::Unknown,
            description: None,
            images: Vec::new(),
        }
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand_name = Some(brand.into());
        self
    }

    /// Negative and non-finite prices are dropped.
    pub fn with_price(mut self, price: f64) -> Self {
        self.price = (price.is_finite() && price >= 0.0).then_some(price);
        self
    }

    pub fn with_status(mut self, status: ItemStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_images(mut self, images: Vec<String>) -> Self {
        self.images = images;
        self
    }

    /// First image, used as the listing thumbnail
    pub fn cover_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

/// Sale status of a catalog item.
///
/// `Unknown` absorbs any value outside the closed set so that a bad record
/// never aborts a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemStatus {
    Available,
    Reserved,
    Sold,
    Unknown,
}

impl ItemStatus {
    /// Lenient mapping used at the API boundary. Accepts the English and
    /// Italian spellings in any case; everything else becomes `Unknown`.
    pub fn from_backend(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "available" | "disponibile" => Self::Available,
            "reserved" | "riservato" | "prenotato" => Self::Reserved,
            "sold" | "venduto" => Self::Sold,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Reserved => "reserved",
            Self::Sold => "sold",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strict parsing for user input: `unknown` is not a selectable status.
impl FromStr for ItemStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Self::from_backend(s) {
            Self::Unknown => Err(CoreError::UnknownStatus(s.to_string())),
            status => Ok(status),
        }
    }
}
