use crate::state::{ProductRecord, SortMode};

/// What: Order products in place according to `mode`.
///
/// Inputs:
/// - `list`: Filtered products in source order.
/// - `mode`: Active sort mode.
///
/// Output:
/// - `list` reordered; `Featured` leaves it untouched.
///
/// Details:
/// - `slice::sort_by` is stable, so equal keys keep their relative source order in every mode.
/// - Unrated products sort as rating `0`.
pub fn sort_products(list: &mut [ProductRecord], mode: SortMode) {
    match mode {
        SortMode::Featured => {}
        SortMode::PriceAsc => list.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortMode::PriceDesc => list.sort_by(|a, b| b.price.total_cmp(&a.price)),
        SortMode::Rating => list.sort_by(|a, b| b.rate_or_zero().total_cmp(&a.rate_or_zero())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Rating;

    fn item(id: i64, price: f64, rate: Option<f64>) -> ProductRecord {
        ProductRecord {
            id,
            title: format!("item {id}"),
            price,
            category: "misc".into(),
            image: String::new(),
            description: String::new(),
            rating: rate.map(|rate| Rating { rate, count: 1 }),
        }
    }

    fn ids(list: &[ProductRecord]) -> Vec<i64> {
        list.iter().map(|p| p.id).collect()
    }

    #[test]
    /// What: Price sorts are stable for ties in both directions.
    ///
    /// Inputs:
    /// - Products 1..=4 where 1 and 3 share a price and 2 and 4 share another.
    ///
    /// Output:
    /// - Ascending and descending orders keep 1 before 3 and 2 before 4.
    ///
    /// Details:
    /// - Descending is not implemented as a reversed ascending sort, which would flip ties.
    fn price_sorts_keep_source_order_for_ties() {
        let src = vec![
            item(1, 10.0, None),
            item(2, 5.0, None),
            item(3, 10.0, None),
            item(4, 5.0, None),
        ];
        let mut asc = src.clone();
        sort_products(&mut asc, SortMode::PriceAsc);
        assert_eq!(ids(&asc), vec![2, 4, 1, 3]);

        let mut desc = src.clone();
        sort_products(&mut desc, SortMode::PriceDesc);
        assert_eq!(ids(&desc), vec![1, 3, 2, 4]);

        let mut featured = src.clone();
        sort_products(&mut featured, SortMode::Featured);
        assert_eq!(featured, src);
    }

    #[test]
    fn rating_sort_puts_unrated_last_without_dropping_them() {
        let mut list = vec![
            item(1, 1.0, None),
            item(2, 1.0, Some(3.9)),
            item(3, 1.0, Some(0.0)),
            item(4, 1.0, Some(4.8)),
        ];
        sort_products(&mut list, SortMode::Rating);
        // 1 (unrated) ties with 3 (rated 0.0) and keeps its earlier source position.
        assert_eq!(ids(&list), vec![4, 2, 1, 3]);
    }
}
