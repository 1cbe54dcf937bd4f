//! Catalog filter engine
//!
//! `filter` is a pure function of its inputs:
//! - Same items + same spec -> same elements, same order
//! - Input order is preserved (stable filter, no re-sort)
//! - Never fails; an empty result is just an empty Vec
//!
//! Ordering for display is a separate pass (`sort_visible`).

use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{CatalogItem, CoreError, FilterSpec, PRICE_CEILING_FLOOR};

/// Return the items matching every active criterion of `spec`.
///
/// The result borrows from the input, so two calls with the same inputs
/// yield references to the very same elements. Passing a previous result
/// back in (`filtered.iter().copied()`) is supported and idempotent.
pub fn filter<'a, I>(items: I, spec: &FilterSpec) -> Vec<&'a CatalogItem>
where
    I: IntoIterator<Item = &'a CatalogItem>,
{
    let matcher = Matcher::new(spec);
    items
        .into_iter()
        .filter(|item| matcher.matches(item))
        .collect()
}

/// Highest price in the collection, never below `PRICE_CEILING_FLOOR`.
///
/// Run once per freshly loaded collection to seed the price range.
pub fn max_observed_price(items: &[CatalogItem]) -> f64 {
    items
        .iter()
        .filter_map(|item| item.price)
        .filter(|price| price.is_finite())
        .fold(PRICE_CEILING_FLOOR, f64::max)
}

/// Per-pass state; the needle is lowercased once instead of per item.
struct Matcher<'s> {
    spec: &'s FilterSpec,
    needle: Option<String>,
}

impl<'s> Matcher<'s> {
    fn new(spec: &'s FilterSpec) -> Self {
        Self {
            spec,
            needle: spec.search_needle().map(str::to_lowercase),
        }
    }

    fn matches(&self, item: &CatalogItem) -> bool {
        self.matches_text(item)
            && self.spec.brand.accepts(item.brand_name.as_ref())
            && self.spec.status.accepts(Some(&item.status))
            && self.matches_price(item)
    }

    fn matches_text(&self, item: &CatalogItem) -> bool {
        let Some(needle) = self.needle.as_deref() else {
            return true;
        };

        [
            Some(item.name.as_str()),
            item.brand_name.as_deref(),
            item.description.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(needle))
    }

    // Missing price never matches a price range
    fn matches_price(&self, item: &CatalogItem) -> bool {
        item.price
            .is_some_and(|price| self.spec.price_range.contains(price))
    }
}

/// Display order of the catalog listing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    /// Backend order
    #[default]
    Featured,
    PriceAsc,
    PriceDesc,
    NameAsc,
}

impl FromStr for SortKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "featured" => Ok(Self::Featured),
            "price-asc" | "price" => Ok(Self::PriceAsc),
            "price-desc" => Ok(Self::PriceDesc),
            "name" | "name-asc" => Ok(Self::NameAsc),
            _ => Err(CoreError::UnknownSortKey(s.to_string())),
        }
    }
}

/// Reorder filtered items for display. Stable; membership is unchanged and
/// items without a price go last for both price orders.
pub fn sort_visible(items: &mut [&CatalogItem], key: SortKey) {
    match key {
        SortKey::Featured => {}
        SortKey::PriceAsc => items.sort_by(|a, b| compare_price(a.price, b.price, false)),
        SortKey::PriceDesc => items.sort_by(|a, b| compare_price(a.price, b.price, true)),
        SortKey::NameAsc => items.sort_by_cached_key(|item| item.name.to_lowercase()),
    }
}

fn compare_price(a: Option<f64>, b: Option<f64>, descending: bool) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => {
            let ordering = a.total_cmp(&b);
            if descending { ordering.reverse() } else { ordering }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
