use std::collections::BTreeSet;

use serde_json::Value;

/// What: Set of favorited product ids.
///
/// Inputs:
/// - Built from persisted JSON or mutated by the store's toggle/clear operations.
///
/// Output:
/// - Membership checks for the favorites-only filter and the favorite markers.
///
/// Details:
/// - Kept in ascending order so the persisted encoding is canonical: toggling the
///   same id twice always reproduces the original bytes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FavoriteSet {
    ids: BTreeSet<i64>,
}

impl FavoriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ids<I: IntoIterator<Item = i64>>(ids: I) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }

    pub fn contains(&self, id: i64) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Ids in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = i64> + '_ {
        self.ids.iter().copied()
    }

    /// Add `id` if absent, remove it otherwise. Returns `true` when it was added.
    pub(crate) fn flip(&mut self, id: i64) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    pub(crate) fn clear(&mut self) {
        self.ids.clear();
    }

    /// Persisted encoding: JSON array of ids, ascending.
    pub fn to_json(&self) -> String {
        let ids: Vec<i64> = self.iter().collect();
        serde_json::to_string(&ids).unwrap_or_else(|_| "[]".to_string())
    }

    /// What: Parse the persisted encoding.
    ///
    /// Inputs:
    /// - `raw`: Slot contents.
    ///
    /// Output:
    /// - `Some(set)` when `raw` is a JSON array; `None` when it is malformed or not an array.
    ///
    /// Details:
    /// - Elements may be integers, integral floats, or numeric strings; anything else is
    ///   skipped rather than failing the whole read.
    pub fn parse(raw: &str) -> Option<Self> {
        let value: Value = serde_json::from_str(raw).ok()?;
        let arr = value.as_array()?;
        Some(Self::from_ids(arr.iter().filter_map(id_of)))
    }
}

fn id_of(v: &Value) -> Option<i64> {
    if let Some(i) = v.as_i64() {
        return Some(i);
    }
    if let Some(f) = v.as_f64() {
        return integral(f);
    }
    let s = v.as_str()?.trim();
    if let Ok(i) = s.parse::<i64>() {
        return Some(i);
    }
    s.parse::<f64>().ok().and_then(integral)
}

fn integral(f: f64) -> Option<i64> {
    if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::FavoriteSet;

    #[test]
    /// What: Accept the lenient element forms the browser version accepted.
    ///
    /// Inputs:
    /// - Arrays mixing integers, numeric strings, floats and junk; plus non-array payloads.
    ///
    /// Output:
    /// - Integral values are kept, junk is dropped, non-arrays yield `None`.
    ///
    /// Details:
    /// - Duplicates collapse because the set is canonical.
    fn parse_keeps_integral_values_and_rejects_non_arrays() {
        let set = FavoriteSet::parse(r#"[3, "7", 2.0, 2.5, "x", null, {"id":1}, 3]"#).unwrap();
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![2, 3, 7]);

        assert!(FavoriteSet::parse(r#"{"ids":[1]}"#).is_none());
        assert!(FavoriteSet::parse("not json").is_none());
        assert!(FavoriteSet::parse("").is_none());
        assert_eq!(FavoriteSet::parse("[]"), Some(FavoriteSet::new()));
    }

    #[test]
    fn encoding_is_ascending_and_stable_under_double_flip() {
        let mut set = FavoriteSet::from_ids([5, 1, 9]);
        let before = set.to_json();
        assert_eq!(before, "[1,5,9]");
        assert!(!set.flip(5));
        assert!(set.flip(5));
        assert_eq!(set.to_json(), before);
    }
}
