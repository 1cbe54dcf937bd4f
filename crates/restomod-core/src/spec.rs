//! Filter and page specifications
//!
//! Both are ephemeral: a listing view creates them with defaults, mutates
//! them on user input and drops them with the view.

use std::num::NonZeroU32;
use std::str::FromStr;

use crate::{CatalogItem, CoreError, ItemStatus, Result, max_observed_price};

/// Lower bound applied to the derived price ceiling
pub const PRICE_CEILING_FLOOR: f64 = 1_000_000.0;

/// Page size of the blog listing
pub const DEFAULT_PAGE_SIZE: u32 = 9;

/// Either the `all` sentinel or one exact value
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Selector<T> {
    All,
    Only(T),
}

impl<T> Default for Selector<T> {
    fn default() -> Self {
        Self::All
    }
}

impl<T> Selector<T> {
    pub fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }

    pub fn as_only(&self) -> Option<&T> {
        match self {
            Self::All => None,
            Self::Only(value) => Some(value),
        }
    }
}

impl<T: PartialEq> Selector<T> {
    /// `All` accepts anything, including a missing value. `Only` requires
    /// the value to be present and equal.
    pub fn accepts(&self, value: Option<&T>) -> bool {
        match self {
            Self::All => true,
            Self::Only(expected) => value == Some(expected),
        }
    }
}

/// `"all"` in any case is the sentinel; anything else goes through `T`.
impl<T> FromStr for Selector<T>
where
    T: FromStr,
{
    type Err = T::Err;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            s.parse().map(Self::Only)
        }
    }
}

/// Inclusive price bounds with `0 <= min <= max`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    min: f64,
    max: f64,
}

impl PriceRange {
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(CoreError::InvalidPriceRange(format!(
                "bounds must be finite: ({}, {})",
                min, max
            )));
        }
        if min < 0.0 || max < 0.0 {
            return Err(CoreError::InvalidPriceRange(format!(
                "bounds must be non-negative: ({}, {})",
                min, max
            )));
        }
        if min > max {
            return Err(CoreError::InvalidPriceRange(format!(
                "min {} is greater than max {}",
                min, max
            )));
        }
        Ok(Self { min, max })
    }

    /// `(0, ceiling)`; a negative or non-finite ceiling collapses to 0.
    pub fn up_to(ceiling: f64) -> Self {
        let max = if ceiling.is_finite() && ceiling > 0.0 {
            ceiling
        } else {
            0.0
        };
        Self { min: 0.0, max }
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn contains(&self, price: f64) -> bool {
        self.min <= price && price <= self.max
    }
}

impl Default for PriceRange {
    fn default() -> Self {
        Self::up_to(PRICE_CEILING_FLOOR)
    }
}

/// Client-side filter for the catalog listing
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSpec {
    pub search_text: String,
    pub brand: Selector<String>,
    pub status: Selector<ItemStatus>,
    pub price_range: PriceRange,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            search_text: String::new(),
            brand: Selector::All,
            status: Selector::All,
            price_range: PriceRange::default(),
        }
    }
}

impl FilterSpec {
    /// Default spec for a freshly loaded collection: every sentinel set and
    /// the price range opened up to the highest observed price.
    pub fn for_items(items: &[CatalogItem]) -> Self {
        Self {
            price_range: PriceRange::up_to(max_observed_price(items)),
            ..Self::default()
        }
    }

    pub fn with_search(mut self, text: impl Into<String>) -> Self {
        self.search_text = text.into();
        self
    }

    pub fn with_brand(mut self, brand: Selector<String>) -> Self {
        self.brand = brand;
        self
    }

    pub fn with_status(mut self, status: Selector<ItemStatus>) -> Self {
        self.status = status;
        self
    }

    pub fn with_price_range(mut self, range: PriceRange) -> Self {
        self.price_range = range;
        self
    }

    /// Search text as typed; only the empty string means no constraint.
    pub fn search_needle(&self) -> Option<&str> {
        (!self.search_text.is_empty()).then_some(self.search_text.as_str())
    }
}

/// Request parameters for a server-paginated listing
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageSpec {
    /// 1-based
    pub page: NonZeroU32,
    pub page_size: NonZeroU32,
    pub category: Selector<String>,
}

impl PageSpec {
    pub fn new(page: u32, page_size: u32) -> Result<Self> {
        let page = NonZeroU32::new(page)
            .ok_or_else(|| CoreError::InvalidPageSpec("page must be at least 1".to_string()))?;
        let page_size = NonZeroU32::new(page_size).ok_or_else(|| {
            CoreError::InvalidPageSpec("page size must be at least 1".to_string())
        })?;
        Ok(Self {
            page,
            page_size,
            category: Selector::All,
        })
    }

    /// Same listing, different page. The page is not clamped.
    pub fn with_page(&self, page: NonZeroU32) -> Self {
        Self {
            page,
            ..self.clone()
        }
    }

    /// Changing category always goes back to the first page.
    pub fn with_category(&self, category: Selector<String>) -> Self {
        Self {
            page: NonZeroU32::MIN,
            category,
            ..self.clone()
        }
    }
}

impl Default for PageSpec {
    fn default() -> Self {
        Self {
            page: NonZeroU32::MIN,
            page_size: NonZeroU32::new(DEFAULT_PAGE_SIZE).unwrap_or(NonZeroU32::MIN),
            category: Selector::All,
        }
    }
}
