//! Plain data types shared by the state, logic, network and UI layers.

use crate::error::CatalogError;
use crate::logic::requests::FetchToken;

/// Category value meaning "no category restriction".
pub const ALL_CATEGORIES: &str = "All";

/// What: Decide whether a category selection is the "no restriction" sentinel.
///
/// Inputs:
/// - `category`: Selected category string.
///
/// Output:
/// - `true` for `"All"` and for the lowercase `"all"` spelling.
pub fn is_all_categories(category: &str) -> bool {
    category == ALL_CATEGORIES || category == "all"
}

/// Optional review summary attached to a product.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rating {
    /// Average rating in `[0, 5]`.
    #[serde(default)]
    pub rate: f64,
    /// Number of reviews behind `rate`.
    #[serde(default)]
    pub count: u64,
}

/// What: One catalog item as returned by the product API.
///
/// Inputs:
/// - Decoded from `GET {base}/products` (array) or `GET {base}/products/{id}` (object).
///
/// Output:
/// - Read by the filter/sort engine, the detail navigator and the UI.
///
/// Details:
/// - `id` stays signed so malformed upstream ids survive decoding; consumers that
///   need positive ids filter them out.
/// - Missing text fields decode as empty strings; a missing `rating` means unrated.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ProductRecord {
    pub id: i64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<Rating>,
}

impl ProductRecord {
    /// Rating used for ordering; unrated products count as `0`.
    pub fn rate_or_zero(&self) -> f64 {
        self.rating.as_ref().map(|r| r.rate).unwrap_or(0.0)
    }

    /// Review count, `0` when unrated.
    pub fn review_count(&self) -> u64 {
        self.rating.as_ref().map(|r| r.count).unwrap_or(0)
    }
}

/// Ordering applied to the filtered product list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Source order as returned by the API (also accepted as "relevance").
    #[default]
    Featured,
    PriceAsc,
    PriceDesc,
    /// Highest `rating.rate` first.
    Rating,
}

impl SortMode {
    /// Stable key used in `settings.conf`.
    pub fn as_config_key(&self) -> &'static str {
        match self {
            SortMode::Featured => "featured",
            SortMode::PriceAsc => "price-asc",
            SortMode::PriceDesc => "price-desc",
            SortMode::Rating => "rating",
        }
    }

    /// Parse a config key; unknown values yield `None`.
    pub fn from_config_key(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "featured" | "relevance" => Some(SortMode::Featured),
            "price-asc" | "price" => Some(SortMode::PriceAsc),
            "price-desc" => Some(SortMode::PriceDesc),
            "rating" | "top-rated" => Some(SortMode::Rating),
            _ => None,
        }
    }

    /// Human readable label for the sort indicator.
    pub fn label(&self) -> &'static str {
        match self {
            SortMode::Featured => "Featured",
            SortMode::PriceAsc => "Price: Low to High",
            SortMode::PriceDesc => "Price: High to Low",
            SortMode::Rating => "Top Rated",
        }
    }

    /// Next mode in the cycle used by the sort key binding.
    pub fn next(self) -> Self {
        match self {
            SortMode::Featured => SortMode::PriceAsc,
            SortMode::PriceAsc => SortMode::PriceDesc,
            SortMode::PriceDesc => SortMode::Rating,
            SortMode::Rating => SortMode::Featured,
        }
    }
}

/// Which product fields the search text is matched against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum QueryScope {
    /// Title only.
    Title,
    /// Title, category and description.
    #[default]
    TitleCategoryDescription,
}

impl QueryScope {
    pub fn from_config_key(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "title" => Some(QueryScope::Title),
            "all" | "full" | "title_category_description" => {
                Some(QueryScope::TitleCategoryDescription)
            }
            _ => None,
        }
    }
}

/// Load state of a fetched resource as seen by the UI.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Ready,
    /// Fetch failure; message is shown with a retry hint.
    Failed(String),
    /// The requested id is not a positive integer; no fetch was issued.
    Invalid(String),
}

/// Which screen is active.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    List,
    Detail,
}

/// Which widget on the list screen receives key input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Search,
    Results,
}

/// Work item sent from the event layer to the fetch worker.
#[derive(Clone, Debug)]
pub enum FetchRequest {
    /// Load the full product list.
    List { request_id: u64, token: FetchToken },
    /// Load one product plus the full list for neighbour navigation.
    Detail {
        request_id: u64,
        product_id: i64,
        token: FetchToken,
    },
}

/// Product and list fetched together for the detail screen.
#[derive(Clone, Debug, PartialEq)]
pub struct DetailBundle {
    pub product: ProductRecord,
    /// Full list used for prev/next; empty when the list request failed.
    pub all_products: Vec<ProductRecord>,
}

/// Result sent back from the fetch worker, tagged with the request id.
#[derive(Debug)]
pub enum FetchOutcome {
    List {
        request_id: u64,
        result: Result<Vec<ProductRecord>, CatalogError>,
    },
    Detail {
        request_id: u64,
        result: Result<DetailBundle, CatalogError>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Decode product records with and without optional fields.
    ///
    /// Inputs:
    /// - A full product object and a minimal one carrying only an id.
    ///
    /// Output:
    /// - Missing text fields become empty, missing rating becomes `None`.
    ///
    /// Details:
    /// - `rate_or_zero` and `review_count` fall back to zero for unrated products.
    fn product_record_decodes_full_and_minimal_objects() {
        let full: ProductRecord = serde_json::from_str(
            r#"{"id":3,"title":"Mens Cotton Jacket","price":55.99,"category":"men's clothing",
               "image":"https://example.test/3.jpg","description":"warm",
               "rating":{"rate":4.7,"count":500}}"#,
        )
        .unwrap();
        assert_eq!(full.id, 3);
        assert_eq!(full.rate_or_zero(), 4.7);
        assert_eq!(full.review_count(), 500);

        let minimal: ProductRecord = serde_json::from_str(r#"{"id":-2}"#).unwrap();
        assert_eq!(minimal.id, -2);
        assert!(minimal.title.is_empty());
        assert!(minimal.rating.is_none());
        assert_eq!(minimal.rate_or_zero(), 0.0);
        assert_eq!(minimal.review_count(), 0);
    }

    #[test]
    /// What: Round-trip sort modes through their config keys and cycle order.
    ///
    /// Inputs:
    /// - Every `SortMode` plus the `relevance` alias and an unknown key.
    ///
    /// Output:
    /// - Keys parse back to the same mode; cycling visits all four modes.
    ///
    /// Details:
    /// - Underscore spellings such as `price_desc` are accepted for hand-edited configs.
    fn sort_mode_config_keys_and_cycle() {
        for mode in [
            SortMode::Featured,
            SortMode::PriceAsc,
            SortMode::PriceDesc,
            SortMode::Rating,
        ] {
            assert_eq!(SortMode::from_config_key(mode.as_config_key()), Some(mode));
        }
        assert_eq!(
            SortMode::from_config_key("relevance"),
            Some(SortMode::Featured)
        );
        assert_eq!(
            SortMode::from_config_key("PRICE_DESC"),
            Some(SortMode::PriceDesc)
        );
        assert_eq!(SortMode::from_config_key("newest"), None);

        let mut m = SortMode::Featured;
        for _ in 0..4 {
            m = m.next();
        }
        assert_eq!(m, SortMode::Featured);
    }

    #[test]
    fn category_sentinel_accepts_both_spellings() {
        assert!(is_all_categories("All"));
        assert!(is_all_categories("all"));
        assert!(!is_all_categories("ALL"));
        assert!(!is_all_categories("electronics"));
    }
}
